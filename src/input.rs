use sdl2::keyboard::{KeyboardState, Keycode, Scancode};

/// Logical keys the game reacts to.
///
/// Movement keys accept arrow, WASD and vi (HJKL) aliases; `Confirm` is
/// Space or Return, `Cancel` is Escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
}

const KEY_COUNT: usize = 6;

impl Key {
    fn index(self) -> usize {
        match self {
            Key::Up => 0,
            Key::Down => 1,
            Key::Left => 2,
            Key::Right => 3,
            Key::Confirm => 4,
            Key::Cancel => 5,
        }
    }
}

/// One frame's worth of input, sampled synchronously at the top of the frame.
///
/// Two-state model: `pressed` is edge-triggered (key went down this frame,
/// key repeat excluded), `held` is level-triggered (key is currently down).
/// Menu navigation uses `pressed`; player movement uses `held`.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    pressed: [bool; KEY_COUNT],
    held: [bool; KEY_COUNT],
}

impl InputSnapshot {
    pub fn new() -> Self {
        InputSnapshot::default()
    }

    /// Was this logical key pressed this frame?
    pub fn pressed(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }

    /// Is this logical key currently held?
    pub fn held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// Marks a logical key as pressed this frame. Tests build snapshots
    /// through this and `hold`.
    pub fn press(&mut self, key: Key) {
        self.pressed[key.index()] = true;
    }

    /// Marks a logical key as held this frame.
    pub fn hold(&mut self, key: Key) {
        self.held[key.index()] = true;
    }

    /// Records an SDL key-down event (callers filter out key repeat).
    pub fn record_press(&mut self, keycode: Keycode) {
        if let Some(key) = key_from_keycode(keycode) {
            self.press(key);
        }
    }

    /// Reads the level state of every mapped key from the keyboard snapshot.
    pub fn capture_held(&mut self, keyboard: &KeyboardState) {
        for &(scancode, key) in SCANCODE_MAP {
            if keyboard.is_scancode_pressed(scancode) {
                self.hold(key);
            }
        }
    }
}

fn key_from_keycode(keycode: Keycode) -> Option<Key> {
    match keycode {
        Keycode::Up | Keycode::W | Keycode::K => Some(Key::Up),
        Keycode::Down | Keycode::S | Keycode::J => Some(Key::Down),
        Keycode::Left | Keycode::A | Keycode::H => Some(Key::Left),
        Keycode::Right | Keycode::D | Keycode::L => Some(Key::Right),
        Keycode::Space | Keycode::Return => Some(Key::Confirm),
        Keycode::Escape => Some(Key::Cancel),
        _ => None,
    }
}

const SCANCODE_MAP: &[(Scancode, Key)] = &[
    (Scancode::Up, Key::Up),
    (Scancode::W, Key::Up),
    (Scancode::K, Key::Up),
    (Scancode::Down, Key::Down),
    (Scancode::S, Key::Down),
    (Scancode::J, Key::Down),
    (Scancode::Left, Key::Left),
    (Scancode::A, Key::Left),
    (Scancode::H, Key::Left),
    (Scancode::Right, Key::Right),
    (Scancode::D, Key::Right),
    (Scancode::L, Key::Right),
    (Scancode::Space, Key::Confirm),
    (Scancode::Return, Key::Confirm),
    (Scancode::Escape, Key::Cancel),
];
