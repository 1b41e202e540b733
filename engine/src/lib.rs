#[cfg(feature="speedy2d")]
mod speedy2d;
#[cfg(feature="speedy2d")]
pub use crate::speedy2d::start;
