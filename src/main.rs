use sdl2::event::Event;
use sdl2::pixels::PixelFormatEnum;
use std::time::{Duration, Instant};

mod assets;
mod collection;
mod config;
mod game;
mod input;
mod movement;
mod raster;
mod screen;
mod text;
mod world;

use game::Game;
use input::InputSnapshot;
use screen::Screen;

// Game resolution constants
const GAME_WIDTH: u32 = 256;
const GAME_HEIGHT: u32 = 240;
const WINDOW_SCALE: u32 = 4;

const WORLD_CONFIG_PATH: &str = "assets/config/world.json";

fn main() -> Result<(), String> {
    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context = sdl2::image::init(sdl2::image::InitFlag::PNG)?;

    let window = video_subsystem
        .window(
            "Painted Eggs",
            GAME_WIDTH * WINDOW_SCALE,
            GAME_HEIGHT * WINDOW_SCALE,
        )
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

    // Logical size gives pixel-perfect scaling of the 256x240 framebuffer.
    canvas
        .set_logical_size(GAME_WIDTH, GAME_HEIGHT)
        .map_err(|e| e.to_string())?;

    let texture_creator = canvas.texture_creator();
    let mut frame_texture = texture_creator
        .create_texture_streaming(PixelFormatEnum::RGBA32, GAME_WIDTH, GAME_HEIGHT)
        .map_err(|e| e.to_string())?;

    let mut event_pump = sdl_context.event_pump()?;
    let mut screen = Screen::new(GAME_WIDTH, GAME_HEIGHT);
    let mut game = Game::new(WORLD_CONFIG_PATH);

    println!("Controls:");
    println!("Arrows/WASD/HJKL - Move");
    println!("SPACE/ENTER - Confirm");
    println!("ESC - Pause / back");

    let mut last_frame = Instant::now();

    'running: loop {
        let mut input = InputSnapshot::new();
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => input.record_press(keycode),
                _ => {}
            }
        }
        input.capture_held(&event_pump.keyboard_state());

        let now = Instant::now();
        let elapsed = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        if !game.frame(&mut screen, &input, elapsed) {
            break 'running;
        }

        frame_texture
            .update(None, screen.pixels(), (GAME_WIDTH * 4) as usize)
            .map_err(|e| e.to_string())?;
        canvas.clear();
        canvas.copy(&frame_texture, None, None)?;
        canvas.present();

        // Cap framerate to ~60 FPS
        std::thread::sleep(Duration::new(0, 1_000_000_000u32 / 60));
    }

    Ok(())
}
