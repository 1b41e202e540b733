use interface::game::*;

use std::collections::HashMap;
use std::rc::Rc;
#[cfg(not(target_arch = "wasm32"))]
use std::thread;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

extern crate speedy2d;
use speedy2d::Graphics2D;
use speedy2d::color::Color as spColor;
use speedy2d::dimen::Vector2;
use speedy2d::font::{Font, TextLayout, TextOptions, FormattedTextBlock};
use speedy2d::shape::Rectangle;
use speedy2d::time::Stopwatch;
use speedy2d::window::{
    MouseButton as spMouseButton,
    WindowHandler,
    WindowHelper,
};
#[cfg(target_arch="wasm32")]
use speedy2d::WebCanvas;
#[cfg(not(target_arch = "wasm32"))]
use speedy2d::Window;
#[cfg(not(target_arch="wasm32"))]
use speedy2d::window::{WindowCreationOptions, WindowSize};

extern crate fxhash;
use fxhash::FxBuildHasher;

#[cfg(not(target_arch="wasm32"))]
const UPDATE_RATE: u32 = 100; // 10ms pulses
const FONT_PATH: &str = "font/font.ttf";

fn map_button(b: spMouseButton) -> Option<MouseButton> {
    match b {
        spMouseButton::Left => Some(MouseButton::Left),
        spMouseButton::Right => Some(MouseButton::Right),
        spMouseButton::Middle => Some(MouseButton::Middle),
        spMouseButton::Other(_) => None
    }
}

fn map_color([r, g, b, a]: [f32; 4]) -> spColor {
    spColor::from_rgba(r, g, b, a)
}

struct TextCache {
    font: Option<Font>,
    statics: HashMap<(&'static str, i32), Rc<FormattedTextBlock>, FxBuildHasher>,
}

impl TextCache {
    fn new() -> Self {
        let font = std::fs::read(FONT_PATH).ok()
            .and_then(|bytes| Font::new(&bytes).ok() );
        if font.is_none() {
            eprintln!("cannot load {}, text will not be drawn", FONT_PATH);
        }
        TextCache {
            font,
            statics: HashMap::default(),
        }
    }
    fn get_static(&mut self,  text: &'static str,  size: f32) -> Option<Rc<FormattedTextBlock>> {
        let font = self.font.as_ref()?;
        let key = (text, size as i32);
        Some(self.statics.entry(key).or_insert_with(|| {
            font.layout_text(text, size, TextOptions::new()).into()
        }).clone())
    }
}

struct GameWrapper<G: Game> {
    game: G,
    window_size: [f32; 2], // changes if window is resized
    mouse_pos: [f32; 2], // last seen cursor position, for press/release events
    stopwatch: Stopwatch,
    last_physics: f64,
    shapes: Graphics,
    text: TextCache,
}

impl<G: Game> WindowHandler for GameWrapper<G> {
    fn on_start(&mut self,
            h: &mut WindowHelper<()>,
            info: speedy2d::window::WindowStartupInfo
    ) {
        let size = info.viewport_size_pixels().into_f32();
        self.window_size = [size.x, size.y];
        self.game.resize(self.window_size);
        h.set_cursor_visible(true);
        h.set_cursor_grab(false).unwrap();

        // threads don't work in wasm; there on_draw drives the updates instead.
        #[cfg(not(target_arch="wasm32"))]
        {
            let sender = h.create_user_event_sender();
            thread::spawn(move || {
                loop {
                    sender.send_event(()).unwrap();
                    thread::sleep(Duration::from_secs_f32((UPDATE_RATE as f32).recip()));
                }
            });
        }
    }

    fn on_user_event(&mut self,  _: &mut WindowHelper<()>,  _: ()) {
        let prev = self.last_physics;
        self.last_physics = self.stopwatch.secs_elapsed();
        let elapsed = self.last_physics - prev;
        self.game.update(elapsed as f32);
    }

    fn on_draw(&mut self,  h: &mut WindowHelper<()>,  g: &mut Graphics2D) {
        #[cfg(target_arch="wasm32")]
        self.on_user_event(h, ());

        g.clear_screen(spColor::WHITE);
        self.game.render(&mut self.shapes);

        for shape in self.shapes.drain() {
            match shape {
                Shape::Line { color, width, area } => {
                    let start = Vector2::new(area[0], area[1]);
                    let end = Vector2::new(area[2], area[3]);
                    let thickness = width * 2.0;
                    g.draw_line(start, end, thickness, map_color(color));
                }
                Shape::Rectangle { color, area } => {
                    let rect = Rectangle::new(
                        Vector2 { x: area[0],  y: area[1] },
                        Vector2 { x: area[0]+area[2],  y: area[1]+area[3] },
                    );
                    g.draw_rectangle(rect, map_color(color));
                }
                Shape::StaticText { color, size, position, text } => {
                    if let Some(text) = self.text.get_static(text, size) {
                        let position = Vector2 { x: position[0], y: position[1] };
                        g.draw_text(position, map_color(color), &text);
                    }
                }
            }
        }

        // Required to make the screen update.
        // Surprisingly doesn't cause 100% CPU usage.
        h.request_redraw();
    }

    fn on_resize(&mut self,  _: &mut WindowHelper<()>,  size: speedy2d::dimen::UVec2) {
        self.window_size[0] = size.into_f32().x;
        self.window_size[1] = size.into_f32().y;
        self.game.resize(self.window_size);
    }

    fn on_mouse_move(&mut self,  _: &mut WindowHelper<()>,  pos: Vector2<f32>) {
        self.mouse_pos = [pos.x, pos.y];
        self.game.mouse_move(self.mouse_pos);
    }

    fn on_mouse_button_down(&mut self,  _: &mut WindowHelper<()>,  button: spMouseButton) {
        if let Some(button) = map_button(button) {
            self.game.mouse_press(button, self.mouse_pos);
        }
    }

    fn on_mouse_button_up(&mut self,  _: &mut WindowHelper<()>,  button: spMouseButton) {
        if let Some(button) = map_button(button) {
            self.game.mouse_release(button, self.mouse_pos);
        }
    }

    // TODO pause when window loses focus (!= mouse leaves)
}

#[inline(never)]
pub fn start<G:Game+'static>(game: G,  name: &'static str,  initial_size: [f32; 2]) {
    let wrapper = GameWrapper {
        game,
        window_size: initial_size,
        mouse_pos: [0.0, 0.0],
        stopwatch: Stopwatch::new().expect("create stopwatch"),
        last_physics: 0.0,
        shapes: Graphics::default(),
        text: TextCache::new(),
    };

    #[cfg(target_arch="wasm32")]
    {
        wasm_logger::init(wasm_logger::Config::default());
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));
        log::info!("starting {}", name);
        WebCanvas::new_for_id("square_dodge_game", wrapper)
            .expect("bind to canvas");
        // .unregister_when_dropped() would make the game end immediately.
    }
    #[cfg(not(target_arch="wasm32"))]
    {
        let window_size = Vector2 { x: initial_size[0], y: initial_size[1] };
        let window_size = WindowSize::ScaledPixels(window_size);
        let options = WindowCreationOptions::new_windowed(window_size, None)
                .with_always_on_top(false)
                .with_decorations(true)
                .with_resizable(true)
                .with_transparent(false)
                .with_vsync(true);
        let window = Window::new_with_options(name, options).unwrap();
        window.run_loop(wrapper);
    }
}
