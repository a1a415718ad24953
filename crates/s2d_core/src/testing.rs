//! In-crate fakes for the capability traits, so the run-loop, primitives and
//! resources can be exercised without a GPU, display or sound card.

use std::cell::Cell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::backend::{
    AudioBackend, FilterMode, FontBackend, FontId, MusicId, PixelFormat, Placement,
    RasterizedText, RenderBackend, Repeat, SoundId, TextureId, Vertex,
};
use crate::color::Color;
use crate::config::WindowConfig;
use crate::error::{AudioError, FontError, PlatformError, RenderError};
use crate::input::{Event, Key};
use crate::platform::{JoystickInfo, NativeWindow, Platform};
use crate::viewport::ViewSpec;

pub fn temp_file_path(name_hint: &str, extension: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "s2d_test_{}_{}_{}.{}",
        name_hint,
        std::process::id(),
        nanos,
        extension
    ))
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Initialize(ViewSpec),
    Clear(Color),
    Triangle([Vertex; 3]),
    Upload {
        format: PixelFormat,
        width: u32,
        height: u32,
        filter: FilterMode,
        bytes: usize,
    },
    DrawImage {
        texture: TextureId,
        placement: Placement,
        tint: Color,
    },
    DrawText {
        texture: TextureId,
        placement: Placement,
        tint: Color,
    },
    FreeTexture(TextureId),
    SetViewport(ViewSpec),
    Present,
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<RenderCall>,
    /// Pixel payload of every successful upload, in order.
    pub uploads: Vec<Vec<u8>>,
    pub fail_uploads: bool,
    pub fail_initialize: bool,
    next_texture: u32,
}

impl RecordingRenderer {
    /// A renderer that rejects every texture upload.
    pub fn failing() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub fn triangles(&self) -> Vec<[Vertex; 3]> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::Triangle(v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&RenderCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl RenderBackend for RecordingRenderer {
    fn initialize(&mut self, view: &ViewSpec) -> Result<(), RenderError> {
        self.calls.push(RenderCall::Initialize(*view));
        if self.fail_initialize {
            return Err(RenderError::Init("no adapter".to_string()));
        }
        Ok(())
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(RenderCall::Clear(color));
    }

    fn draw_triangle(&mut self, vertices: [Vertex; 3]) {
        self.calls.push(RenderCall::Triangle(vertices));
    }

    fn upload_texture(
        &mut self,
        format: PixelFormat,
        width: u32,
        height: u32,
        pixels: &[u8],
        filter: FilterMode,
    ) -> Result<TextureId, RenderError> {
        if self.fail_uploads {
            return Err(RenderError::Texture("upload rejected".to_string()));
        }
        self.next_texture += 1;
        self.calls.push(RenderCall::Upload {
            format,
            width,
            height,
            filter,
            bytes: pixels.len(),
        });
        self.uploads.push(pixels.to_vec());
        Ok(TextureId(self.next_texture))
    }

    fn draw_image(&mut self, texture: TextureId, placement: Placement, tint: Color) {
        self.calls.push(RenderCall::DrawImage {
            texture,
            placement,
            tint,
        });
    }

    fn draw_text(&mut self, texture: TextureId, placement: Placement, tint: Color) {
        self.calls.push(RenderCall::DrawText {
            texture,
            placement,
            tint,
        });
    }

    fn free_texture(&mut self, texture: TextureId) {
        self.calls.push(RenderCall::FreeTexture(texture));
    }

    fn set_viewport(&mut self, view: &ViewSpec) {
        self.calls.push(RenderCall::SetViewport(*view));
    }

    fn present(&mut self) {
        self.calls.push(RenderCall::Present);
    }
}

/// What the scripted platform reports for one loop iteration.
#[derive(Debug, Clone, Default)]
pub struct FrameScript {
    pub events: Vec<Event>,
    pub held: Vec<Key>,
    pub mouse: (i32, i32),
}

impl FrameScript {
    pub fn events(events: Vec<Event>) -> Self {
        Self {
            events,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct FakeDevice {
    pub name: &'static str,
    pub game_controller: bool,
    pub opens: bool,
}

/// Platform driven by a queue of `FrameScript`s and a hand-advanced clock. Once the
/// script runs out every poll yields `Event::Quit`.
#[derive(Default)]
pub struct ScriptedPlatform {
    pub clock: Rc<Cell<Duration>>,
    pub frames: VecDeque<FrameScript>,
    pub devices: Vec<FakeDevice>,
    /// Device indices in the order something tried to open them.
    pub open_attempts: Vec<usize>,
    /// Drawable size to report instead of the requested size.
    pub actual_size: Option<(u32, u32)>,
    pub vsync_hint: Option<bool>,
    pub fail_vsync: bool,
    pub fail_create: bool,
    /// Surfaces handed out will fail `initialize`.
    pub fail_initialize: bool,
    pub delays: Vec<Duration>,
    pub windows_created: u32,
    pub windows_destroyed: Rc<Cell<u32>>,
    current: FrameScript,
}

impl ScriptedPlatform {
    pub fn new(frames: Vec<FrameScript>) -> Self {
        Self {
            frames: frames.into(),
            ..Default::default()
        }
    }

    fn device(&self, index: usize) -> Result<&FakeDevice, PlatformError> {
        self.devices.get(index).ok_or(PlatformError::Device {
            index,
            message: "no such device".to_string(),
        })
    }
}

impl Platform for ScriptedPlatform {
    type Surface = RecordingRenderer;

    fn set_vsync_hint(&mut self, enabled: bool) -> Result<(), PlatformError> {
        self.vsync_hint = Some(enabled);
        if self.fail_vsync {
            return Err(PlatformError::Vsync("not supported".to_string()));
        }
        Ok(())
    }

    fn joystick_count(&self) -> usize {
        self.devices.len()
    }

    fn is_game_controller(&self, index: usize) -> bool {
        self.devices
            .get(index)
            .is_some_and(|device| device.game_controller)
    }

    fn open_game_controller(&mut self, index: usize) -> Result<String, PlatformError> {
        self.open_attempts.push(index);
        let device = self.device(index)?;
        if device.opens {
            Ok(device.name.to_string())
        } else {
            Err(PlatformError::Device {
                index,
                message: "refused".to_string(),
            })
        }
    }

    fn open_joystick(&mut self, index: usize) -> Result<JoystickInfo, PlatformError> {
        self.open_attempts.push(index);
        let device = self.device(index)?;
        if device.opens {
            Ok(JoystickInfo {
                name: device.name.to_string(),
                axes: 2,
                buttons: 4,
            })
        } else {
            Err(PlatformError::Device {
                index,
                message: "refused".to_string(),
            })
        }
    }

    fn create_window(
        &mut self,
        config: &WindowConfig,
    ) -> Result<NativeWindow<RecordingRenderer>, PlatformError> {
        if self.fail_create {
            return Err(PlatformError::WindowCreation("no display".to_string()));
        }
        self.windows_created += 1;
        let (width, height) = self.actual_size.unwrap_or((config.width, config.height));
        Ok(NativeWindow {
            surface: RecordingRenderer {
                fail_initialize: self.fail_initialize,
                ..RecordingRenderer::default()
            },
            width,
            height,
        })
    }

    fn destroy_window(&mut self, _surface: RecordingRenderer) {
        self.windows_destroyed.set(self.windows_destroyed.get() + 1);
    }

    fn now(&self) -> Duration {
        self.clock.get()
    }

    fn delay(&mut self, duration: Duration) {
        self.delays.push(duration);
        self.clock.set(self.clock.get() + duration);
    }

    fn poll_events(&mut self) -> Vec<Event> {
        match self.frames.pop_front() {
            Some(mut frame) => {
                let events = std::mem::take(&mut frame.events);
                self.current = frame;
                events
            }
            None => {
                self.current = FrameScript::default();
                vec![Event::Quit]
            }
        }
    }

    fn held_keys(&self) -> Vec<Key> {
        self.current.held.clone()
    }

    fn mouse_position(&self) -> (i32, i32) {
        self.current.mouse
    }
}

/// Font backend whose glyphs are `size / 2` wide and `size` tall.
#[derive(Debug, Default)]
pub struct FakeFonts {
    pub opened: Vec<(PathBuf, u32)>,
    pub closed: Vec<FontId>,
}

impl FakeFonts {
    fn size_of(&self, font: FontId) -> Result<u32, FontError> {
        let index = (font.0 as usize).checked_sub(1).ok_or(FontError::InvalidHandle)?;
        if self.closed.contains(&font) {
            return Err(FontError::InvalidHandle);
        }
        self.opened
            .get(index)
            .map(|(_, size)| *size)
            .ok_or(FontError::InvalidHandle)
    }
}

impl FontBackend for FakeFonts {
    fn open_font(&mut self, path: &Path, size: u32) -> Result<FontId, FontError> {
        self.opened.push((path.to_path_buf(), size));
        Ok(FontId(self.opened.len() as u32))
    }

    fn measure_text(&self, font: FontId, text: &str) -> Result<(u32, u32), FontError> {
        if text.is_empty() {
            return Err(FontError::Load("empty text has no extent".to_string()));
        }
        let size = self.size_of(font)?;
        Ok((text.chars().count() as u32 * size / 2, size))
    }

    fn render_text(&self, font: FontId, text: &str) -> Result<RasterizedText, FontError> {
        let (width, height) = self.measure_text(font, text)?;
        Ok(RasterizedText {
            width,
            height,
            pixels: vec![255; (width * height * 4) as usize],
        })
    }

    fn close_font(&mut self, font: FontId) {
        self.closed.push(font);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AudioCall {
    LoadSound(PathBuf),
    PlaySound(SoundId),
    FreeSound(SoundId),
    LoadMusic(PathBuf),
    PlayMusic(MusicId, Repeat),
    PauseMusic,
    ResumeMusic,
    StopMusic,
    FadeOutMusic(Duration),
    FreeMusic(MusicId),
}

#[derive(Debug, Default)]
pub struct FakeAudio {
    pub calls: Vec<AudioCall>,
    pub fail_loads: bool,
    pub fail_playback: bool,
    next_id: u32,
}

impl FakeAudio {
    /// An audio backend that cannot decode anything.
    pub fn failing() -> Self {
        Self {
            fail_loads: true,
            ..Self::default()
        }
    }

    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl AudioBackend for FakeAudio {
    fn load_sound(&mut self, path: &Path) -> Result<SoundId, AudioError> {
        if self.fail_loads {
            return Err(AudioError::Load("unrecognized format".to_string()));
        }
        self.calls.push(AudioCall::LoadSound(path.to_path_buf()));
        Ok(SoundId(self.next()))
    }

    fn play_sound(&mut self, sound: SoundId) -> Result<(), AudioError> {
        self.calls.push(AudioCall::PlaySound(sound));
        if self.fail_playback {
            return Err(AudioError::Playback("no free channel".to_string()));
        }
        Ok(())
    }

    fn free_sound(&mut self, sound: SoundId) {
        self.calls.push(AudioCall::FreeSound(sound));
    }

    fn load_music(&mut self, path: &Path) -> Result<MusicId, AudioError> {
        if self.fail_loads {
            return Err(AudioError::Load("unrecognized format".to_string()));
        }
        self.calls.push(AudioCall::LoadMusic(path.to_path_buf()));
        Ok(MusicId(self.next()))
    }

    fn play_music(&mut self, music: MusicId, repeat: Repeat) -> Result<(), AudioError> {
        self.calls.push(AudioCall::PlayMusic(music, repeat));
        if self.fail_playback {
            return Err(AudioError::Playback("mixer stopped".to_string()));
        }
        Ok(())
    }

    fn pause_music(&mut self) {
        self.calls.push(AudioCall::PauseMusic);
    }

    fn resume_music(&mut self) {
        self.calls.push(AudioCall::ResumeMusic);
    }

    fn stop_music(&mut self) {
        self.calls.push(AudioCall::StopMusic);
    }

    fn fade_out_music(&mut self, duration: Duration) {
        self.calls.push(AudioCall::FadeOutMusic(duration));
    }

    fn free_music(&mut self, music: MusicId) {
        self.calls.push(AudioCall::FreeMusic(music));
    }
}
