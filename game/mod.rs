extern crate interface;

mod square_dodge;
pub use self::square_dodge::{NAME, INITIAL_SIZE};
use self::square_dodge::SquareDodge;

pub fn create_game() -> SquareDodge {
    SquareDodge::new()
}
