//! Windowing and input capability consumed by the run-loop.

use std::time::Duration;

use crate::backend::RenderBackend;
use crate::config::WindowConfig;
use crate::error::PlatformError;
use crate::input::{Event, Key};

/// What a raw joystick reports once opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoystickInfo {
    pub name: String,
    pub axes: usize,
    pub buttons: usize,
}

/// A native window together with its rendering context.
pub struct NativeWindow<S> {
    pub surface: S,
    /// Drawable size the platform actually produced.
    pub width: u32,
    pub height: u32,
}

pub trait Platform {
    /// Rendering context bound to the native window.
    type Surface: RenderBackend + 'static;

    /// Best-effort request for vsync on windows created afterwards.
    fn set_vsync_hint(&mut self, enabled: bool) -> Result<(), PlatformError>;

    fn joystick_count(&self) -> usize;
    fn is_game_controller(&self, index: usize) -> bool;
    /// Open device `index` through the game-controller interface, returning its name.
    fn open_game_controller(&mut self, index: usize) -> Result<String, PlatformError>;
    /// Open device `index` as a raw joystick.
    fn open_joystick(&mut self, index: usize) -> Result<JoystickInfo, PlatformError>;

    fn create_window(
        &mut self,
        config: &WindowConfig,
    ) -> Result<NativeWindow<Self::Surface>, PlatformError>;
    /// Release the rendering context, then the native window.
    fn destroy_window(&mut self, surface: Self::Surface);

    /// Monotonic time since the platform started.
    fn now(&self) -> Duration;
    fn delay(&mut self, duration: Duration);

    /// Drain every pending event, oldest first.
    fn poll_events(&mut self) -> Vec<Event>;
    fn held_keys(&self) -> Vec<Key>;
    /// Cursor position in drawable pixels.
    fn mouse_position(&self) -> (i32, i32);
}
