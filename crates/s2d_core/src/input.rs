//! Input vocabulary and held-state tracking.
//!
//! Two channels reach the application:
//!
//! - **Edge-triggered:** `Event::KeyDown` fires once per physical press and is
//!   delivered to `on_key`. OS auto-repeat is filtered out by `InputState::key_down`.
//!
//! - **Level-triggered:** `InputState::held_keys` is sampled once per loop iteration
//!   and every held key is delivered to `on_key_down`, so it fires at loop rate for
//!   as long as the key stays down.

use std::collections::BTreeSet;

/// Physical key. Keys without a named variant arrive as `Other` with the platform
/// scancode, so every press is still delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,
    Left,
    Right,
    Up,
    Down,
    Space,
    Return,
    Escape,
    Tab,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    CapsLock,
    LeftShift,
    RightShift,
    LeftCtrl,
    RightCtrl,
    LeftAlt,
    RightAlt,
    Minus,
    Equals,
    LeftBracket,
    RightBracket,
    Semicolon,
    Apostrophe,
    Comma,
    Period,
    Slash,
    Backslash,
    Grave,
    Keypad0,
    Keypad1,
    Keypad2,
    Keypad3,
    Keypad4,
    Keypad5,
    Keypad6,
    Keypad7,
    Keypad8,
    Keypad9,
    KeypadDivide,
    KeypadMultiply,
    KeypadMinus,
    KeypadPlus,
    KeypadEnter,
    KeypadPeriod,
    KeypadEquals,
    NumLock,
    ScrollLock,
    PrintScreen,
    Pause,
    LeftGui,
    RightGui,
    Menu,
    Other(u32),
}

impl Key {
    /// Human-readable key name, e.g. `"A"`, `"Left Shift"`, `"Return"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
            Self::H => "H",
            Self::I => "I",
            Self::J => "J",
            Self::K => "K",
            Self::L => "L",
            Self::M => "M",
            Self::N => "N",
            Self::O => "O",
            Self::P => "P",
            Self::Q => "Q",
            Self::R => "R",
            Self::S => "S",
            Self::T => "T",
            Self::U => "U",
            Self::V => "V",
            Self::W => "W",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::Num0 => "0",
            Self::Num1 => "1",
            Self::Num2 => "2",
            Self::Num3 => "3",
            Self::Num4 => "4",
            Self::Num5 => "5",
            Self::Num6 => "6",
            Self::Num7 => "7",
            Self::Num8 => "8",
            Self::Num9 => "9",
            Self::F1 => "F1",
            Self::F2 => "F2",
            Self::F3 => "F3",
            Self::F4 => "F4",
            Self::F5 => "F5",
            Self::F6 => "F6",
            Self::F7 => "F7",
            Self::F8 => "F8",
            Self::F9 => "F9",
            Self::F10 => "F10",
            Self::F11 => "F11",
            Self::F12 => "F12",
            Self::F13 => "F13",
            Self::F14 => "F14",
            Self::F15 => "F15",
            Self::F16 => "F16",
            Self::F17 => "F17",
            Self::F18 => "F18",
            Self::F19 => "F19",
            Self::F20 => "F20",
            Self::F21 => "F21",
            Self::F22 => "F22",
            Self::F23 => "F23",
            Self::F24 => "F24",
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Space => "Space",
            Self::Return => "Return",
            Self::Escape => "Escape",
            Self::Tab => "Tab",
            Self::Backspace => "Backspace",
            Self::Delete => "Delete",
            Self::Insert => "Insert",
            Self::Home => "Home",
            Self::End => "End",
            Self::PageUp => "PageUp",
            Self::PageDown => "PageDown",
            Self::CapsLock => "CapsLock",
            Self::LeftShift => "Left Shift",
            Self::RightShift => "Right Shift",
            Self::LeftCtrl => "Left Ctrl",
            Self::RightCtrl => "Right Ctrl",
            Self::LeftAlt => "Left Alt",
            Self::RightAlt => "Right Alt",
            Self::Minus => "-",
            Self::Equals => "=",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::Semicolon => ";",
            Self::Apostrophe => "'",
            Self::Comma => ",",
            Self::Period => ".",
            Self::Slash => "/",
            Self::Backslash => "\\",
            Self::Grave => "`",
            Self::Keypad0 => "Keypad 0",
            Self::Keypad1 => "Keypad 1",
            Self::Keypad2 => "Keypad 2",
            Self::Keypad3 => "Keypad 3",
            Self::Keypad4 => "Keypad 4",
            Self::Keypad5 => "Keypad 5",
            Self::Keypad6 => "Keypad 6",
            Self::Keypad7 => "Keypad 7",
            Self::Keypad8 => "Keypad 8",
            Self::Keypad9 => "Keypad 9",
            Self::KeypadDivide => "Keypad /",
            Self::KeypadMultiply => "Keypad *",
            Self::KeypadMinus => "Keypad -",
            Self::KeypadPlus => "Keypad +",
            Self::KeypadEnter => "Keypad Enter",
            Self::KeypadPeriod => "Keypad .",
            Self::KeypadEquals => "Keypad =",
            Self::NumLock => "Numlock",
            Self::ScrollLock => "ScrollLock",
            Self::PrintScreen => "PrintScreen",
            Self::Pause => "Pause",
            Self::LeftGui => "Left GUI",
            Self::RightGui => "Right GUI",
            Self::Menu => "Menu",
            Self::Other(_) => "Unknown",
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// A mouse button press at raw (drawable) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseClick {
    pub x: i32,
    pub y: i32,
    pub button: MouseButton,
}

/// Input from the one opened controller or joystick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    Axis { axis: u8, value: i16 },
    Button { button: u8 },
}

/// Discrete platform events, delivered in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    KeyDown(Key),
    MouseDown(MouseClick),
    Controller(ControllerEvent),
    Resized { width: u32, height: u32 },
    Quit,
}

/// Held keys and buttons plus the last known cursor position, fed by a platform's
/// raw event stream.
#[derive(Debug, Default)]
pub struct InputState {
    held: BTreeSet<Key>,
    mouse_held: BTreeSet<MouseButton>,
    pub mouse_position: (f64, f64),
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true only for a fresh press; repeats of a held key return false.
    pub fn key_down(&mut self, key: Key) -> bool {
        self.held.insert(key)
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn mouse_down(&mut self, btn: MouseButton) -> bool {
        self.mouse_held.insert(btn)
    }

    pub fn mouse_up(&mut self, btn: MouseButton) {
        self.mouse_held.remove(&btn);
    }

    #[cfg(test)]
    fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    #[cfg(test)]
    fn is_mouse_held(&self, btn: MouseButton) -> bool {
        self.mouse_held.contains(&btn)
    }

    /// Held keys in a stable order.
    pub fn held_keys(&self) -> Vec<Key> {
        self.held.iter().copied().collect()
    }

    /// Mouse position truncated to whole drawable pixels.
    pub fn mouse_pixel(&self) -> (i32, i32) {
        (self.mouse_position.0 as i32, self.mouse_position.1 as i32)
    }

    /// Forget everything held, e.g. when the window loses focus and release events
    /// will never arrive.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.mouse_held.clear();
    }
}
