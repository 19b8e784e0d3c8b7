//! Top-level game-mode state machine.
//!
//! One mode handler runs to completion per frame. Handlers are plain
//! functions of (world, input, elapsed, mode-local timer/option) that draw
//! into the framebuffer and return the next mode; the controller applies the
//! result and resets the mode-local state only when the mode actually
//! changed.

use crate::assets;
use crate::collection;
use crate::input::{InputSnapshot, Key};
use crate::movement::{self, MoveState};
use crate::screen::{PixelMode, Screen};
use crate::text::{draw_text, text_width};
use sdl2::pixels::Color;

const WHITE: Color = Color::RGB(255, 255, 255);
const BLACK: Color = Color::RGB(0, 0, 0);

/// Idle timeout before menus fall back to the attract screen, in seconds.
const ATTRACT_TIMEOUT: f32 = 30.0;
/// Idle timeout before a forgotten pause menu returns to the title.
const PAUSE_TIMEOUT: f32 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Asset loading; stays here while anything fails to load.
    Init,
    Credits,
    Title,
    /// Active play: movement, collection, clock, world rendering.
    Main,
    Won,
    Lost,
    /// Idle/attract screen.
    Sleep,
    Pause,
    /// Terminal; the frame loop stops.
    Exit,
}

/// The controller: owns the single world, the current mode and the
/// mode-local state (timer, menu cursor, movement accumulators).
pub struct Game {
    mode: Mode,
    /// Seconds spent in the current mode.
    timer: f32,
    /// Menu cursor for the mode, clamped by each menu to its option count.
    option: i32,
    move_state: MoveState,
    world: Option<crate::world::World>,
    config_path: String,
}

impl Game {
    pub fn new(config_path: &str) -> Self {
        Game {
            mode: Mode::Init,
            timer: 0.0,
            option: 0,
            move_state: MoveState::default(),
            world: None,
            config_path: config_path.to_string(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Runs one frame. Returns `false` once the machine is in `Exit`.
    pub fn frame(&mut self, screen: &mut Screen, input: &InputSnapshot, elapsed: f32) -> bool {
        let next = match self.mode {
            Mode::Init => self.init(screen),
            Mode::Credits => self.credits(screen, input),
            Mode::Title => self.title(screen, input),
            Mode::Main => self.play(screen, input, elapsed),
            Mode::Won => self.won(screen, input),
            Mode::Lost => self.lost(screen, input),
            Mode::Sleep => self.sleep(screen, input),
            Mode::Pause => self.pause(screen, input),
            Mode::Exit => return false,
        };

        self.timer += elapsed;
        self.update_mode(next);
        true
    }

    /// Applies the handler's verdict. Mode-local state resets only on an
    /// actual change, so a handler returning its own mode keeps its timer.
    fn update_mode(&mut self, next: Mode) {
        if next != self.mode {
            self.mode = next;
            self.timer = 0.0;
            self.option = 0;
            self.move_state.reset();
        }
    }

    /// First frame shows the loading placeholder; every later frame attempts
    /// the full asset load and, on failure, lists what could not be loaded
    /// and tries again next frame.
    fn init(&mut self, screen: &mut Screen) -> Mode {
        if self.timer != 0.0 {
            match assets::load_world(&self.config_path) {
                Ok(world) => {
                    self.world = Some(world);
                    return Mode::Credits;
                }
                Err(failed) => {
                    screen.clear(BLACK);
                    draw_text(screen, "COULD NOT LOAD:", 4, 4, WHITE, 1);
                    for (i, name) in failed.iter().enumerate() {
                        draw_text(screen, name, 4, (i as i32 + 1) * 12 + 4, WHITE, 1);
                    }
                    return Mode::Init;
                }
            }
        }

        screen.clear(BLACK);
        draw_text(
            screen,
            "LOADING... PLEASE WAIT",
            8,
            screen.height() as i32 - 16,
            WHITE,
            1,
        );
        Mode::Init
    }

    /// Timed sequence of credit panels; cancel (or the end of the sequence)
    /// skips to the title.
    fn credits(&mut self, screen: &mut Screen, input: &InputSnapshot) -> Mode {
        if input.pressed(Key::Cancel) {
            return Mode::Title;
        }

        const ENGINE_CREDITS: f32 = 3.0;
        const BLANK_1: f32 = ENGINE_CREDITS + 1.0;
        const CREATOR_CREDITS: f32 = BLANK_1 + 3.5;
        const BLANK_2: f32 = CREATOR_CREDITS + 1.0;
        const GAME_JAM_CREDITS: f32 = BLANK_2 + 4.0;
        const BLANK_3: f32 = GAME_JAM_CREDITS + 1.0;
        const TITLE_CREDITS: f32 = BLANK_3 + 5.0;
        const BLANK_4: f32 = TITLE_CREDITS + 1.5;

        screen.clear(BLACK);

        let mid_y = screen.height() as i32 / 2;
        if self.timer < ENGINE_CREDITS {
            self.draw_centered(screen, "RUST + SDL2", mid_y - 4, 1);
        } else if self.timer < BLANK_1 {
        } else if self.timer < CREATOR_CREDITS {
            self.draw_centered(screen, "DENNIS BELLINGER", mid_y - 8, 1);
            self.draw_centered(screen, "PRESENTS", mid_y, 1);
        } else if self.timer < BLANK_2 {
        } else if self.timer < GAME_JAM_CREDITS {
            self.draw_centered(screen, "A BEAT THE BOREDOM", mid_y - 8, 1);
            self.draw_centered(screen, "GAME JAM ENTRY", mid_y, 1);
        } else if self.timer < BLANK_3 {
        } else if self.timer < TITLE_CREDITS {
            self.draw_centered(screen, "PAINTED EGGS", mid_y - 8, 2);
        } else if self.timer < BLANK_4 {
        } else {
            return Mode::Title;
        }

        Mode::Credits
    }

    /// Main menu. Entering it (timer 0) resets the play session.
    fn title(&mut self, screen: &mut Screen, input: &InputSnapshot) -> Mode {
        if self.timer == 0.0 {
            if let Some(world) = &mut self.world {
                world.reset_session(screen.width(), screen.height());
            }
        }

        if input.pressed(Key::Confirm) {
            return match self.option {
                0 => Mode::Main,
                _ => Mode::Exit,
            };
        }
        if input.pressed(Key::Up) {
            self.option -= 1;
        }
        if input.pressed(Key::Down) {
            self.option += 1;
        }
        self.option = self.option.clamp(0, 1);

        if self.timer > ATTRACT_TIMEOUT || input.pressed(Key::Cancel) {
            return Mode::Sleep;
        }

        screen.clear(BLACK);
        let mid_x = screen.width() as i32 / 2;
        let mid_y = screen.height() as i32 / 2;
        self.draw_centered(screen, "PAINTED EGGS", screen.height() as i32 / 4 - 8, 2);
        self.draw_centered(screen, "START", mid_y - 4, 1);
        self.draw_centered(screen, "EXIT", mid_y + 8, 1);
        draw_text(
            screen,
            "*",
            mid_x - 36,
            mid_y - 4 + self.option * 12,
            WHITE,
            1,
        );

        Mode::Title
    }

    /// Active play: movement, collection, win/loss clock, world rendering.
    fn play(&mut self, screen: &mut Screen, input: &InputSnapshot, elapsed: f32) -> Mode {
        if input.pressed(Key::Cancel) {
            return Mode::Pause;
        }
        let Some(world) = self.world.as_mut() else {
            return Mode::Init;
        };

        movement::step_player(world, input, elapsed, &mut self.move_state);
        collection::collect(world);

        let is_won = collection::objective_met(world);
        if !is_won {
            world.time_remaining -= elapsed;
            if world.time_remaining <= 0.0 {
                return Mode::Lost;
            }
        }

        // Render the world: layer stack up to the player's layer, cropped to
        // the viewport, then pickups and the player as masked sprites.
        screen.clear(BLACK);
        world.update_viewport(screen.width(), screen.height());
        screen.set_pixel_mode(PixelMode::Mask);
        for i in 0..=world.layer {
            screen.draw_partial_sprite(
                0,
                0,
                &world.layers[i].background,
                world.viewport_x,
                world.viewport_y,
                screen.width(),
                screen.height(),
            );
        }
        for collectible in &world.layers[world.layer].collectibles {
            if !collectible.collected && collectible.visible {
                screen.draw_sprite(
                    collectible.x - world.viewport_x,
                    collectible.y - world.viewport_y,
                    &world.collectible_types[collectible.type_index].sprite,
                );
            }
        }
        // Player sprite is 16x16, anchored on its center.
        screen.draw_sprite(
            world.pos_x as i32 - world.viewport_x - 8,
            world.pos_y as i32 - world.viewport_y - 8,
            &world.player,
        );
        screen.set_pixel_mode(PixelMode::Normal);

        // HUD: score lines for every scored type, clock top-right.
        let mut line = 0;
        for collectible_type in &world.collectible_types {
            if collectible_type.goal > 0 {
                let score = format!(
                    "{:>4}/{:<4} {}",
                    collectible_type.collected, collectible_type.goal, collectible_type.name
                );
                draw_text(screen, &score, 4, line * 8 + 4, WHITE, 1);
                line += 1;
            }
        }

        let minutes = (world.time_remaining / 60.0) as i32;
        let seconds = (world.time_remaining - minutes as f32 * 60.0) as i32;
        let clock = format!("{minutes:02}:{seconds:02}");
        draw_text(
            screen,
            &clock,
            screen.width() as i32 - 4 - text_width(&clock, 1) as i32,
            4,
            WHITE,
            1,
        );

        #[cfg(debug_assertions)]
        {
            let coords = format!("({:>4}, {:>4})", world.pos_x as i32, world.pos_y as i32);
            draw_text(
                screen,
                &coords,
                4,
                screen.height() as i32 - 3 * 8,
                WHITE,
                1,
            );
        }

        if is_won { Mode::Won } else { Mode::Main }
    }

    fn won(&mut self, screen: &mut Screen, input: &InputSnapshot) -> Mode {
        if input.pressed(Key::Confirm) {
            return Mode::Title;
        }
        if self.timer > ATTRACT_TIMEOUT {
            return Mode::Sleep;
        }
        if self.timer == 0.0 {
            // Drawn once over the last play frame, which stays visible.
            self.draw_centered(screen, "WINNER!", screen.height() as i32 / 4 - 12, 3);
            self.draw_centered(
                screen,
                "PRESS SPACE TO CONTINUE",
                screen.height() as i32 - 16,
                1,
            );
        }
        Mode::Won
    }

    fn lost(&mut self, screen: &mut Screen, input: &InputSnapshot) -> Mode {
        if input.pressed(Key::Confirm) {
            return Mode::Title;
        }
        if self.timer > ATTRACT_TIMEOUT {
            return Mode::Sleep;
        }
        if self.timer == 0.0 {
            self.draw_centered(screen, "LOSER!", screen.height() as i32 / 4 - 12, 3);
            self.draw_centered(
                screen,
                "PRESS SPACE TO CONTINUE",
                screen.height() as i32 - 16,
                1,
            );
        }
        Mode::Lost
    }

    /// Attract screen: player sprite centered, six collectible sprites
    /// orbiting on timer-driven angles. Any confirm/cancel restarts the
    /// credits roll.
    fn sleep(&mut self, screen: &mut Screen, input: &InputSnapshot) -> Mode {
        if input.pressed(Key::Cancel) || input.pressed(Key::Confirm) {
            return Mode::Credits;
        }

        screen.clear(BLACK);
        if let Some(world) = &self.world {
            screen.set_pixel_mode(PixelMode::Mask);
            screen.draw_sprite(
                screen.width() as i32 / 2 - 8,
                screen.height() as i32 / 2 - 8,
                &world.player,
            );

            if let Some(first_type) = world.collectible_types.first() {
                for i in 0..6 {
                    let angle = self.timer / 3.0 + i as f32 * std::f32::consts::TAU / 6.0;
                    let x = (angle.sin() / 2.0 + 0.5) * (screen.width() - 32) as f32 + 8.0;
                    let y = (angle.cos() / 2.0 + 0.5) * (screen.height() - 32) as f32 + 8.0;
                    screen.draw_sprite(x as i32, y as i32, &first_type.sprite);
                }
            }
            screen.set_pixel_mode(PixelMode::Normal);
        }

        Mode::Sleep
    }

    /// Pause menu. Confirm and cancel both activate the highlighted option.
    fn pause(&mut self, screen: &mut Screen, input: &InputSnapshot) -> Mode {
        if input.pressed(Key::Confirm) || input.pressed(Key::Cancel) {
            return match self.option {
                0 => Mode::Main,
                _ => Mode::Title,
            };
        }
        if input.pressed(Key::Up) {
            self.option -= 1;
        }
        if input.pressed(Key::Down) {
            self.option += 1;
        }
        self.option = self.option.clamp(0, 1);

        if self.timer > PAUSE_TIMEOUT {
            return Mode::Title;
        }

        screen.clear(BLACK);
        let mid_x = screen.width() as i32 / 2;
        let mid_y = screen.height() as i32 / 2;
        self.draw_centered(screen, "PAUSED", screen.height() as i32 / 4 - 4, 1);
        self.draw_centered(screen, "RESUME", mid_y - 4, 1);
        self.draw_centered(screen, "EXIT", mid_y + 8, 1);
        draw_text(
            screen,
            "*",
            mid_x - 36,
            mid_y - 4 + self.option * 12,
            WHITE,
            1,
        );

        Mode::Pause
    }

    fn draw_centered(&self, screen: &mut Screen, line: &str, y: i32, scale: u32) {
        let x = (screen.width() as i32 - text_width(line, scale) as i32) / 2;
        draw_text(screen, line, x, y, WHITE, scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::test_support::test_world;
    use crate::world::Collectible;

    const W: u32 = 256;
    const H: u32 = 240;

    fn game_in(mode: Mode) -> (Game, Screen) {
        let mut game = Game::new("unused.json");
        game.world = Some(test_world(1024, 720, 2));
        game.mode = mode;
        (game, Screen::new(W, H))
    }

    fn pressed(key: Key) -> InputSnapshot {
        let mut input = InputSnapshot::new();
        input.press(key);
        input
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::new()
    }

    #[test]
    fn test_title_resets_session_on_entry() {
        let (mut game, mut screen) = game_in(Mode::Title);
        {
            let world = game.world.as_mut().unwrap();
            world.time_remaining = 1.0;
            world.pos_x = 3.0;
            world.collectible_types[0].collected = 7;
        }

        game.frame(&mut screen, &idle(), 0.016);

        let world = game.world.as_ref().unwrap();
        assert_eq!(world.time_remaining, 180.0);
        assert_eq!(world.collectible_types[0].collected, 0);
        assert_eq!(game.mode(), Mode::Title);
    }

    #[test]
    fn test_title_option_clamps_and_selects() {
        let (mut game, mut screen) = game_in(Mode::Title);

        assert_eq!(game.option, 0);
        game.frame(&mut screen, &pressed(Key::Down), 0.016);
        assert_eq!(game.option, 1);
        game.frame(&mut screen, &pressed(Key::Down), 0.016);
        assert_eq!(game.option, 1);

        game.frame(&mut screen, &pressed(Key::Confirm), 0.016);
        assert_eq!(game.mode(), Mode::Exit);
    }

    #[test]
    fn test_title_confirm_on_start_enters_main() {
        let (mut game, mut screen) = game_in(Mode::Title);
        game.frame(&mut screen, &pressed(Key::Confirm), 0.016);
        assert_eq!(game.mode(), Mode::Main);
    }

    #[test]
    fn test_title_idles_into_sleep() {
        let (mut game, mut screen) = game_in(Mode::Title);
        game.frame(&mut screen, &idle(), 31.0);
        game.frame(&mut screen, &idle(), 0.016);
        assert_eq!(game.mode(), Mode::Sleep);
    }

    #[test]
    fn test_title_cancel_enters_sleep() {
        let (mut game, mut screen) = game_in(Mode::Title);
        game.frame(&mut screen, &pressed(Key::Cancel), 0.016);
        assert_eq!(game.mode(), Mode::Sleep);
    }

    #[test]
    fn test_exit_stops_the_frame_loop() {
        let (mut game, mut screen) = game_in(Mode::Exit);
        assert!(!game.frame(&mut screen, &idle(), 0.016));
    }

    #[test]
    fn test_main_cancel_pauses() {
        let (mut game, mut screen) = game_in(Mode::Main);
        game.frame(&mut screen, &pressed(Key::Cancel), 0.016);
        assert_eq!(game.mode(), Mode::Pause);
    }

    #[test]
    fn test_main_ticks_the_clock_down() {
        let (mut game, mut screen) = game_in(Mode::Main);
        game.world.as_mut().unwrap().collectible_types[0].goal = 5;

        game.frame(&mut screen, &idle(), 0.5);

        assert_eq!(game.world.as_ref().unwrap().time_remaining, 179.5);
        assert_eq!(game.mode(), Mode::Main);
    }

    #[test]
    fn test_main_time_exhaustion_loses() {
        let (mut game, mut screen) = game_in(Mode::Main);
        game.world.as_mut().unwrap().collectible_types[0].goal = 5;
        game.world.as_mut().unwrap().time_remaining = 0.25;

        game.frame(&mut screen, &idle(), 0.5);
        assert_eq!(game.mode(), Mode::Lost);
    }

    #[test]
    fn test_main_clock_frozen_once_objective_met() {
        let (mut game, mut screen) = game_in(Mode::Main);
        {
            let world = game.world.as_mut().unwrap();
            world.collectible_types[0].collected = 1;
            world.time_remaining = 0.1;
        }

        game.frame(&mut screen, &idle(), 0.5);

        assert_eq!(game.mode(), Mode::Won);
        assert_eq!(game.world.as_ref().unwrap().time_remaining, 0.1);
    }

    #[test]
    fn test_main_collecting_final_egg_wins() {
        let (mut game, mut screen) = game_in(Mode::Main);
        {
            let world = game.world.as_mut().unwrap();
            world.layers[0].collectibles.push(Collectible {
                x: 100,
                y: 100,
                type_index: 0,
                collected: false,
                visible: true,
            });
            world.pos_x = 105.0;
            world.pos_y = 105.0;
        }

        game.frame(&mut screen, &idle(), 0.016);

        assert_eq!(game.mode(), Mode::Won);
        assert_eq!(game.world.as_ref().unwrap().collectible_types[0].collected, 1);
    }

    #[test]
    fn test_won_confirm_returns_to_title() {
        let (mut game, mut screen) = game_in(Mode::Won);
        game.frame(&mut screen, &pressed(Key::Confirm), 0.016);
        assert_eq!(game.mode(), Mode::Title);
    }

    #[test]
    fn test_lost_idles_into_sleep() {
        let (mut game, mut screen) = game_in(Mode::Lost);
        game.frame(&mut screen, &idle(), 31.0);
        game.frame(&mut screen, &idle(), 0.016);
        assert_eq!(game.mode(), Mode::Sleep);
    }

    #[test]
    fn test_sleep_wakes_into_credits() {
        let (mut game, mut screen) = game_in(Mode::Sleep);
        game.frame(&mut screen, &pressed(Key::Confirm), 0.016);
        assert_eq!(game.mode(), Mode::Credits);

        let (mut game, mut screen) = game_in(Mode::Sleep);
        game.frame(&mut screen, &pressed(Key::Cancel), 0.016);
        assert_eq!(game.mode(), Mode::Credits);
    }

    #[test]
    fn test_credits_run_out_into_title() {
        let (mut game, mut screen) = game_in(Mode::Credits);
        game.frame(&mut screen, &idle(), 25.0);
        game.frame(&mut screen, &idle(), 0.016);
        assert_eq!(game.mode(), Mode::Title);
    }

    #[test]
    fn test_credits_cancel_skips_to_title() {
        let (mut game, mut screen) = game_in(Mode::Credits);
        game.frame(&mut screen, &pressed(Key::Cancel), 0.016);
        assert_eq!(game.mode(), Mode::Title);
    }

    #[test]
    fn test_pause_resume_and_exit_options() {
        let (mut game, mut screen) = game_in(Mode::Pause);
        game.frame(&mut screen, &pressed(Key::Confirm), 0.016);
        assert_eq!(game.mode(), Mode::Main);

        let (mut game, mut screen) = game_in(Mode::Pause);
        game.frame(&mut screen, &pressed(Key::Down), 0.016);
        game.frame(&mut screen, &pressed(Key::Cancel), 0.016);
        assert_eq!(game.mode(), Mode::Title);
    }

    #[test]
    fn test_pause_idles_back_to_title() {
        let (mut game, mut screen) = game_in(Mode::Pause);
        game.frame(&mut screen, &idle(), 301.0);
        game.frame(&mut screen, &idle(), 0.016);
        assert_eq!(game.mode(), Mode::Title);
    }

    #[test]
    fn test_mode_change_resets_timer_option_and_accumulators() {
        let (mut game, mut screen) = game_in(Mode::Main);
        game.world.as_mut().unwrap().collectible_types[0].goal = 5;
        game.move_state.acc_x = 0.7;
        game.timer = 12.0;

        game.frame(&mut screen, &pressed(Key::Cancel), 0.016);

        assert_eq!(game.mode(), Mode::Pause);
        assert_eq!(game.timer, 0.0);
        assert_eq!(game.option, 0);
        assert_eq!(game.move_state.acc_x, 0.0);
    }

    #[test]
    fn test_staying_in_mode_keeps_the_timer() {
        let (mut game, mut screen) = game_in(Mode::Title);
        game.frame(&mut screen, &idle(), 1.0);
        game.frame(&mut screen, &idle(), 1.0);
        assert_eq!(game.timer, 2.0);
        assert_eq!(game.mode(), Mode::Title);
    }

    #[test]
    fn test_movement_accumulator_survives_within_main() {
        let (mut game, mut screen) = game_in(Mode::Main);
        game.world.as_mut().unwrap().collectible_types[0].goal = 5;

        let mut input = InputSnapshot::new();
        input.hold(Key::Right);

        let start_x = game.world.as_ref().unwrap().pos_x;
        // 0.6 px banked, then another 0.6: one whole pixel across two frames.
        game.frame(&mut screen, &input, 0.01);
        assert_eq!(game.world.as_ref().unwrap().pos_x, start_x);
        game.frame(&mut screen, &input, 0.01);
        assert_eq!(game.world.as_ref().unwrap().pos_x, start_x + 1.0);
    }
}
