pub mod backend;
pub mod collision;
pub mod color;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod input;
pub mod pixels;
pub mod platform;
pub mod resources;
pub mod shapes;
pub mod time;
pub mod viewport;
pub mod window;

#[cfg(test)]
mod testing;

pub use backend::{
    AudioBackend, FilterMode, FontBackend, FontId, MusicId, PixelFormat, Placement,
    RasterizedText, RenderBackend, Repeat, SoundId, TextureId, Vertex,
};
pub use collision::{contains, intersects, FRect};
pub use color::Color;
pub use config::{load_window_config, WindowConfig, WindowFlags};
pub use error::{
    AudioError, ConfigError, FontError, PlatformError, RenderError, ResourceError, ResourceKind,
    ShapeError, WindowError,
};
pub use input::{ControllerEvent, Event, InputState, Key, MouseButton, MouseClick};
pub use platform::{JoystickInfo, NativeWindow, Platform};
pub use resources::{Image, Music, Sound, Text};
pub use time::{FramePacer, FrameTiming};
pub use viewport::{compute_viewport, ViewSpec, Viewport, ViewportMode};
pub use window::{Frame, MousePosition, Window, WindowState};
