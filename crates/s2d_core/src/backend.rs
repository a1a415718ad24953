//! Capability traits the core draws, plays and rasterizes through.
//!
//! The core never talks to a GPU, mixer or font library directly. The desktop
//! implementations live in `s2d_render` (wgpu, fontdue) and `s2d_audio` (rodio).

use std::path::Path;
use std::time::Duration;

use crate::color::Color;
use crate::error::{AudioError, FontError, RenderError};
use crate::viewport::ViewSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SoundId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MusicId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontId(pub u32);

/// A colored point handed to the rasterizer. Positions are logical pixels, origin
/// top-left, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self { x, y, color }
    }
}

/// Byte layout of a pixel buffer passed to `upload_texture`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb,
    Rgba,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    Nearest,
    Linear,
}

/// Where a textured quad lands on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Rendering capability: everything the run-loop, primitives and resources need.
pub trait RenderBackend {
    fn initialize(&mut self, view: &ViewSpec) -> Result<(), RenderError>;
    fn clear(&mut self, color: Color);
    fn draw_triangle(&mut self, vertices: [Vertex; 3]);
    fn upload_texture(
        &mut self,
        format: PixelFormat,
        width: u32,
        height: u32,
        pixels: &[u8],
        filter: FilterMode,
    ) -> Result<TextureId, RenderError>;
    fn draw_image(&mut self, texture: TextureId, placement: Placement, tint: Color);
    fn draw_text(&mut self, texture: TextureId, placement: Placement, tint: Color);
    fn free_texture(&mut self, texture: TextureId);
    fn set_viewport(&mut self, view: &ViewSpec);
    fn present(&mut self);
}

/// How many times a piece of music plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    #[default]
    Once,
    Times(u32),
    Forever,
}

/// Audio capability. Music plays on a single channel; the pause/resume/stop/fade
/// operations act on whatever music was played last.
pub trait AudioBackend {
    fn load_sound(&mut self, path: &Path) -> Result<SoundId, AudioError>;
    fn play_sound(&mut self, sound: SoundId) -> Result<(), AudioError>;
    fn free_sound(&mut self, sound: SoundId);
    fn load_music(&mut self, path: &Path) -> Result<MusicId, AudioError>;
    fn play_music(&mut self, music: MusicId, repeat: Repeat) -> Result<(), AudioError>;
    fn pause_music(&mut self);
    fn resume_music(&mut self);
    fn stop_music(&mut self);
    fn fade_out_music(&mut self, duration: Duration);
    fn free_music(&mut self, music: MusicId);
}

/// RGBA8 pixels of a rendered string, white glyphs with coverage in alpha.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterizedText {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Font capability. `text` is never empty; callers substitute a single space.
pub trait FontBackend {
    fn open_font(&mut self, path: &Path, size: u32) -> Result<FontId, FontError>;
    fn measure_text(&self, font: FontId, text: &str) -> Result<(u32, u32), FontError>;
    fn render_text(&self, font: FontId, text: &str) -> Result<RasterizedText, FontError>;
    fn close_font(&mut self, font: FontId);
}
