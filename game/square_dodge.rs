use interface::game::*;

pub const NAME: &str = "square dodge";
pub const INITIAL_SIZE: [f32;2] = [500.0, 500.0];

const TICK: f32 = 0.01; // the animation advances in 10ms pulses
const PLAYER_SIZE: [f32;2] = [70.0, 30.0];
const PLAYER_START: [f32;2] = [20.0, 20.0];
const ENEMY_SIZE: [f32;2] = [20.0, 20.0];
const ENEMY_START: [f32;2] = [150.0, 0.0];
const TARGET: Rect = Rect { pos: [300.0, 350.0], size: [70.0, 30.0] };

const MESSAGE_Y: f32 = 100.0;
const MESSAGE_SIZE: f32 = 14.0;
const PROMPT: &str = "Move orange square to gray! Dodge the red enemy!";
const WIN_MESSAGE: &str = "YOU WIN!!!!";
const LOSE_MESSAGE: &str = "YOU LOSE!!!";

const MESSAGE_COLOR: &str = "0000ff";
const TARGET_COLOR: &str = "404040";
const PLAYER_COLOR: &str = "ffc800";
const ENEMY_COLOR: &str = "ff0000";
const OUTLINE_RADIUS: f32 = 1.5; // 3px strokes

#[derive(Clone,Copy, Debug, PartialEq)]
struct Rect {
    pos: [f32;2],
    size: [f32;2],
}

impl Rect {
    /// Inclusive on all four edges.
    fn contains(&self,  [x, y]: [f32;2]) -> bool {
        x >= self.pos[0]  &&  x <= self.pos[0]+self.size[0]
            &&  y >= self.pos[1]  &&  y <= self.pos[1]+self.size[1]
    }
    fn center(&self) -> [f32;2] {
        [self.pos[0]+self.size[0]/2.0, self.pos[1]+self.size[1]/2.0]
    }
    fn area(&self) -> [f32;4] {
        [self.pos[0], self.pos[1], self.size[0], self.size[1]]
    }
}

/// One-sided overlap test: only the enemy's bottom edge is checked against the
/// player's vertical band, with exclusive bounds on every comparison.
/// An enemy sliding in sideways or resting exactly on an edge is not caught.
/// Making this a full intersection test would change the gameplay.
fn enemy_caught_player(enemy: &Rect,  player: &Rect) -> bool {
    let enemy_bottom = enemy.pos[1] + enemy.size[1];
    let enemy_left = enemy.pos[0];
    let enemy_right = enemy.pos[0] + enemy.size[0];
    let player_left = player.pos[0];
    let player_right = player.pos[0] + player.size[0];
    let player_top = player.pos[1];
    let player_bottom = player.pos[1] + player.size[1];
    enemy_bottom > player_top  &&  enemy_bottom < player_bottom
        &&  ((enemy_right > player_left && enemy_right < player_right)
            || (enemy_left > player_left && enemy_left < player_right))
}

fn outline(gfx: &mut Graphics,  color: Color,  rect: &Rect,  radius: f32) {
    let [x, y, w, h] = rect.area();
    gfx.line(color, radius, [x, y, x+w, y]);
    gfx.line(color, radius, [x+w, y, x+w, y+h]);
    gfx.line(color, radius, [x+w, y+h, x, y+h]);
    gfx.line(color, radius, [x, y+h, x, y]);
}

#[derive(Clone,Copy, Debug, PartialEq,Eq)]
enum Outcome {InProgress, Won, Lost}

pub struct SquareDodge {
    viewport: [f32;2],
    message_x: f32,
    player: Rect,
    enemy: Rect,
    /// pointer position minus player origin, captured at grab time.
    /// `Some` only while the player square is being dragged.
    drag: Option<[f32;2]>,
    outcome: Outcome,
    pending: f32, // time not yet consumed by whole ticks
}

impl SquareDodge {
    pub fn new() -> Self {SquareDodge {
        viewport: INITIAL_SIZE,
        message_x: 0.0,
        player: Rect { pos: PLAYER_START, size: PLAYER_SIZE },
        enemy: Rect { pos: ENEMY_START, size: ENEMY_SIZE },
        drag: None,
        outcome: Outcome::InProgress,
        pending: 0.0,
    } }

    /// One 10ms quantum: scroll the banner, move the enemy with per-axis
    /// wrap-around, then look for a hit. Frozen once the game has ended.
    fn tick(&mut self) {
        if self.outcome != Outcome::InProgress {
            return;
        }
        self.message_x += 1.0;
        if self.message_x > self.viewport[0] {
            self.message_x = 0.0;
        }
        self.enemy.pos[0] += 1.0;
        self.enemy.pos[1] += 2.0;
        if self.enemy.pos[0] > self.viewport[0] {
            self.enemy.pos[0] = 0.0;
        }
        if self.enemy.pos[1] > self.viewport[1] {
            self.enemy.pos[1] = 0.0;
        }
        if enemy_caught_player(&self.enemy, &self.player) {
            self.outcome = Outcome::Lost;
        }
    }

    fn pointer_down(&mut self,  pos: [f32;2]) {
        if self.outcome != Outcome::InProgress {
            return;
        }
        if self.player.contains(pos) {
            self.drag = Some([pos[0]-self.player.pos[0], pos[1]-self.player.pos[1]]);
        }
    }

    /// Moves the player square while it's grabbed. Not clamped to the window;
    /// the square can be dragged off-screen.
    fn pointer_drag(&mut self,  pos: [f32;2]) {
        if self.outcome != Outcome::InProgress {
            return;
        }
        if let Some(offset) = self.drag {
            self.player.pos = [pos[0]-offset[0], pos[1]-offset[1]];
        }
    }

    /// Checks the win whether or not a drag was in progress, then releases
    /// the grab unconditionally.
    fn pointer_up(&mut self,  _pos: [f32;2]) {
        if self.outcome == Outcome::InProgress  &&  self.player.contains(TARGET.center()) {
            self.outcome = Outcome::Won;
            self.player.pos = TARGET.pos; // snap onto the target
        }
        self.drag = None;
    }

    fn message(&self) -> &'static str {
        match self.outcome {
            Outcome::InProgress => PROMPT,
            Outcome::Won => WIN_MESSAGE,
            Outcome::Lost => LOSE_MESSAGE,
        }
    }
}

impl Game for SquareDodge {
    fn render(&mut self,  gfx: &mut Graphics) {
        gfx.text(hex(MESSAGE_COLOR), [self.message_x, MESSAGE_Y], MESSAGE_SIZE, self.message());
        gfx.rectangle(hex(TARGET_COLOR), TARGET.area());
        outline(gfx, hex(PLAYER_COLOR), &self.player, OUTLINE_RADIUS);
        outline(gfx, hex(ENEMY_COLOR), &self.enemy, OUTLINE_RADIUS);
    }

    fn update(&mut self,  dt: f32) {
        self.pending += dt;
        while self.pending >= TICK {
            self.pending -= TICK;
            self.tick();
        }
    }

    fn resize(&mut self,  size: [f32;2]) {
        self.viewport = size;
    }

    fn mouse_move(&mut self,  pos: [f32;2]) {
        self.pointer_drag(pos);
    }

    fn mouse_press(&mut self,  _: MouseButton,  pos: [f32;2]) {
        self.pointer_down(pos);
    }

    fn mouse_release(&mut self,  _: MouseButton,  pos: [f32;2]) {
        self.pointer_up(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks(game: &mut SquareDodge,  n: u32) {
        for _ in 0..n {
            game.tick();
        }
    }

    fn drawn_message(game: &mut SquareDodge) -> &'static str {
        let mut gfx = Graphics::default();
        game.render(&mut gfx);
        let message = gfx.drain()
            .find_map(|shape| match shape {
                Shape::StaticText { text, .. } => Some(text),
                _ => None,
            })
            .expect("render always draws the banner");
        message
    }

    #[test]
    fn test_enemy_moves_diagonally() {
        let mut game = SquareDodge::new();
        game.resize([10_000.0, 10_000.0]);
        ticks(&mut game, 40);
        assert_eq!(game.enemy.pos, [190.0, 80.0]);
        assert_eq!(game.outcome, Outcome::InProgress);
    }

    #[test]
    fn test_enemy_x_wraps_to_zero_past_width() {
        let mut game = SquareDodge::new();
        game.resize([400.0, 10_000.0]);
        ticks(&mut game, 250);
        assert_eq!(game.enemy.pos[0], 400.0); // not past the edge yet
        game.tick(); // 401 > 400
        assert_eq!(game.enemy.pos[0], 0.0);
        assert_eq!(game.enemy.pos[1], 502.0); // y keeps going
    }

    #[test]
    fn test_enemy_axes_wrap_independently() {
        let mut game = SquareDodge::new();
        game.resize([10_000.0, 100.0]);
        ticks(&mut game, 51); // y would reach 102
        assert_eq!(game.enemy.pos, [201.0, 0.0]);
    }

    #[test]
    fn test_message_scrolls_and_wraps() {
        let mut game = SquareDodge::new();
        game.resize([400.0, 10_000.0]);
        ticks(&mut game, 400);
        assert_eq!(game.message_x, 400.0);
        game.tick();
        assert_eq!(game.message_x, 0.0);
        game.tick();
        assert_eq!(game.message_x, 1.0);
    }

    #[test]
    fn test_enemy_bottom_entering_player_band_loses() {
        let mut game = SquareDodge::new();
        game.enemy.pos = [4.0, 13.0];
        game.tick(); // enemy moves to (5, 15): bottom 35, right 25
        assert_eq!(game.outcome, Outcome::Lost);
        assert_eq!(drawn_message(&mut game), LOSE_MESSAGE);
    }

    #[test]
    fn test_enemy_passing_to_the_right_is_harmless() {
        let mut game = SquareDodge::new();
        game.enemy.pos = [200.0, 20.0];
        // the y-bands overlap for the first few ticks, but the enemy is
        // entirely to the right of the player the whole way down
        ticks(&mut game, 20);
        assert_eq!(game.outcome, Outcome::InProgress);
    }

    #[test]
    fn test_edge_touching_is_not_a_hit() {
        let mut game = SquareDodge::new();
        // after the tick the enemy bottom lands exactly on the player top (20)
        game.enemy.pos = [30.0, -2.0];
        game.tick();
        assert_eq!(game.enemy.pos, [31.0, 0.0]);
        assert_eq!(game.outcome, Outcome::InProgress);
    }

    #[test]
    fn test_drag_offset_tracks_grab_point() {
        let mut game = SquareDodge::new();
        game.pointer_down([30.0, 25.0]);
        assert_eq!(game.drag, Some([10.0, 5.0]));
        game.pointer_drag([100.0, 100.0]);
        assert_eq!(game.player.pos, [90.0, 95.0]);
    }

    #[test]
    fn test_grab_is_inclusive_on_player_edges() {
        let mut game = SquareDodge::new();
        game.pointer_down([20.0, 20.0]); // top-left corner
        assert_eq!(game.drag, Some([0.0, 0.0]));
        game.pointer_up([20.0, 20.0]);

        game.pointer_down([90.0, 50.0]); // bottom-right corner
        assert_eq!(game.drag, Some([70.0, 30.0]));
        game.pointer_up([90.0, 50.0]);

        game.pointer_down([91.0, 50.0]); // just outside
        assert_eq!(game.drag, None);
    }

    #[test]
    fn test_drag_without_grab_does_nothing() {
        let mut game = SquareDodge::new();
        game.pointer_drag([100.0, 100.0]);
        assert_eq!(game.player.pos, PLAYER_START);
    }

    #[test]
    fn test_release_ends_the_drag() {
        let mut game = SquareDodge::new();
        game.pointer_down([30.0, 25.0]);
        game.pointer_up([30.0, 25.0]);
        assert_eq!(game.drag, None);
        game.pointer_drag([200.0, 200.0]);
        assert_eq!(game.player.pos, PLAYER_START);
    }

    #[test]
    fn test_dropping_player_on_target_wins_and_snaps() {
        let mut game = SquareDodge::new();
        game.pointer_down([30.0, 25.0]);
        game.pointer_drag([310.0, 355.0]); // player ends up exactly on the target
        assert_eq!(game.player.pos, [300.0, 350.0]);
        game.pointer_up([310.0, 355.0]);
        assert_eq!(game.outcome, Outcome::Won);
        assert_eq!(game.player.pos, [300.0, 350.0]);
        assert_eq!(drawn_message(&mut game), WIN_MESSAGE);
    }

    #[test]
    fn test_win_is_inclusive_when_center_sits_on_player_corner() {
        let mut game = SquareDodge::new();
        game.player.pos = [335.0, 365.0]; // target center on the top-left corner
        game.pointer_up([0.0, 0.0]);
        assert_eq!(game.outcome, Outcome::Won);
        assert_eq!(game.player.pos, [300.0, 350.0]); // snapped
    }

    #[test]
    fn test_release_beside_target_does_not_win() {
        let mut game = SquareDodge::new();
        game.pointer_down([30.0, 25.0]);
        game.pointer_drag([246.0, 355.0]); // player right edge at 306, center at 335
        game.pointer_up([246.0, 355.0]);
        assert_eq!(game.outcome, Outcome::InProgress);
        assert_eq!(game.player.pos, [236.0, 350.0]); // no snap
        assert_eq!(game.drag, None);
    }

    #[test]
    fn test_release_checks_win_even_when_idle() {
        let mut game = SquareDodge::new();
        game.player.pos = [300.0, 350.0];
        game.pointer_up([0.0, 0.0]); // never grabbed
        assert_eq!(game.outcome, Outcome::Won);
    }

    #[test]
    fn test_ticks_freeze_after_loss() {
        let mut game = SquareDodge::new();
        game.enemy.pos = [4.0, 13.0];
        game.tick();
        assert_eq!(game.outcome, Outcome::Lost);
        let enemy = game.enemy.pos;
        let message_x = game.message_x;
        ticks(&mut game, 100);
        assert_eq!(game.enemy.pos, enemy);
        assert_eq!(game.message_x, message_x);
    }

    #[test]
    fn test_drag_freezes_after_win() {
        let mut game = SquareDodge::new();
        game.player.pos = [300.0, 350.0];
        game.pointer_up([0.0, 0.0]);
        assert_eq!(game.outcome, Outcome::Won);

        game.pointer_down([310.0, 360.0]);
        assert_eq!(game.drag, None);
        game.pointer_drag([50.0, 50.0]);
        assert_eq!(game.player.pos, [300.0, 350.0]);
    }

    #[test]
    fn test_losing_is_terminal_even_over_the_target() {
        let mut game = SquareDodge::new();
        game.enemy.pos = [4.0, 13.0];
        game.tick();
        assert_eq!(game.outcome, Outcome::Lost);
        game.player.pos = [300.0, 350.0];
        game.pointer_up([0.0, 0.0]);
        assert_eq!(game.outcome, Outcome::Lost);
    }

    #[test]
    fn test_update_runs_whole_ticks_and_keeps_the_rest() {
        let mut game = SquareDodge::new();
        game.resize([10_000.0, 10_000.0]);
        game.update(0.005); // less than one tick
        assert_eq!(game.enemy.pos, ENEMY_START);
        game.update(0.006); // 0.011 accumulated
        assert_eq!(game.enemy.pos, [151.0, 2.0]);
        game.update(0.055); // five more ticks
        assert_eq!(game.enemy.pos, [156.0, 12.0]);
    }

    #[test]
    fn test_render_draws_prompt_and_target() {
        let mut game = SquareDodge::new();
        assert_eq!(drawn_message(&mut game), PROMPT);

        let mut gfx = Graphics::default();
        game.render(&mut gfx);
        let target_drawn = gfx.drain().any(|shape| {
            shape == Shape::Rectangle { color: hex(TARGET_COLOR), area: [300.0, 350.0, 70.0, 30.0] }
        });
        assert!(target_drawn, "target square is always drawn");
    }
}
