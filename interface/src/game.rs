pub type Color = [f32;4];

/// Parse a hex string of 6 or 8 bytes into a color.
/// Format is rrggbbaa, where the aa is optional.
#[track_caller]
pub fn hex(color: &str) -> Color {
    let a = match color.len() {
        8 => u8::from_str_radix(&color[6..], 16).unwrap(),
        6 => 255,
        _ => panic!("color string must be 6 or 8 characters")
    };
    let r = u8::from_str_radix(&color[..2], 16).unwrap();
    let g = u8::from_str_radix(&color[2..4], 16).unwrap();
    let b = u8::from_str_radix(&color[4..6], 16).unwrap();
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0]
}

#[derive(Debug, Clone,Copy, PartialEq,Eq)]
pub enum MouseButton {
    Unknown,
    Left,
    Right,
    Middle,
    X1,
    X2,
    Button6,
    Button7,
    Button8,
}

/// What a game wants drawn this frame.
/// Coordinates are window-local pixels; rectangle areas are [x, y, width, height],
/// line areas are [x1, y1, x2, y2] with width as a radius.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line { color: Color,  width: f32,  area: [f32;4] },
    Rectangle { color: Color,  area: [f32;4] },
    StaticText { color: Color,  size: f32,  position: [f32;2],  text: &'static str },
}

/// Buffer of shapes produced by `Game::render()` and drained by the engine.
/// Keeps the game logic free of any graphics library types.
#[derive(Default)]
pub struct Graphics {
    shapes: Vec<Shape>,
}

impl Graphics {
    pub fn line(&mut self,  color: Color,  width: f32,  area: [f32;4]) {
        self.shapes.push(Shape::Line { color, width, area });
    }
    pub fn rectangle(&mut self,  color: Color,  area: [f32;4]) {
        self.shapes.push(Shape::Rectangle { color, area });
    }
    pub fn text(&mut self,  color: Color,  position: [f32;2],  size: f32,  text: &'static str) {
        self.shapes.push(Shape::StaticText { color, size, position, text });
    }
    pub fn drain(&mut self) -> std::vec::Drain<'_, Shape> {
        self.shapes.drain(..)
    }
}

pub trait Game {
    fn render(&mut self,  gfx: &mut Graphics);
    fn update(&mut self,  dt: f32);
    fn resize(&mut self,  size: [f32;2]);
    fn mouse_move(&mut self,  pos: [f32;2]);
    fn mouse_press(&mut self,  button: MouseButton,  pos: [f32;2]);
    fn mouse_release(&mut self,  button: MouseButton,  pos: [f32;2]);
}
