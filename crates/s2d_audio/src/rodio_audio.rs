//! `AudioBackend` using rodio.
//!
//! Sounds are read into memory once and decoded afresh for every play, each on its
//! own detached sink so overlapping plays mix. Music has a single channel: one sink
//! that `play_music` replaces and the pause/resume/stop/fade controls act on.
//!
//! Supports whatever rodio decodes (WAV, OGG Vorbis, MP3, FLAC). Fades are applied
//! by the music sources themselves as the mixer pulls samples; no extra thread runs.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sample, Sink, Source};
use s2d_core::{AudioBackend, AudioError, MusicId, Repeat, SoundId};

/// How often a playing track re-reads its fade.
const FADE_STEP: Duration = Duration::from_millis(20);

type AudioBytes = Arc<[u8]>;

#[derive(Debug, Clone, Copy)]
struct Fade {
    started: Instant,
    duration: Duration,
}

/// Shared between the channel and every source queued on its sink.
type FadeHandle = Arc<Mutex<Option<Fade>>>;

struct MusicChannel {
    music: MusicId,
    sink: Sink,
    fade: FadeHandle,
}

pub struct RodioAudio {
    /// Must outlive every sink.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sounds: HashMap<SoundId, AudioBytes>,
    music: HashMap<MusicId, AudioBytes>,
    channel: Option<MusicChannel>,
    next_sound: u32,
    next_music: u32,
}

impl RodioAudio {
    /// Opens the default output device. Failing here means there is no audio at all;
    /// the caller decides whether that aborts startup.
    pub fn new() -> Result<Self, AudioError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::Init(e.to_string()))?;
        log::info!("Audio output opened");
        Ok(Self {
            _stream: stream,
            handle,
            sounds: HashMap::new(),
            music: HashMap::new(),
            channel: None,
            next_sound: 0,
            next_music: 0,
        })
    }

    fn new_sink(&self) -> Result<Sink, AudioError> {
        Sink::try_new(&self.handle).map_err(|e| AudioError::Playback(e.to_string()))
    }

    fn current_sink(&self) -> Option<&Sink> {
        self.channel.as_ref().map(|channel| &channel.sink)
    }
}

fn read_audio(path: &Path) -> Result<AudioBytes, AudioError> {
    let bytes = std::fs::read(path)
        .map_err(|e| AudioError::Load(format!("{}: {e}", path.display())))?;
    let bytes: AudioBytes = bytes.into();
    // Decode the header now so a corrupt file fails at load, not at first play.
    decoder(&bytes).map_err(|e| AudioError::Load(format!("{}: {e}", path.display())))?;
    Ok(bytes)
}

fn decoder(bytes: &AudioBytes) -> Result<Decoder<Cursor<AudioBytes>>, AudioError> {
    Decoder::new(Cursor::new(bytes.clone())).map_err(|e| AudioError::Playback(e.to_string()))
}

/// How many times a track is queued for a finite repeat; zero still plays once.
fn play_count(repeat: Repeat) -> Option<u32> {
    match repeat {
        Repeat::Once => Some(1),
        Repeat::Times(n) => Some(n.max(1)),
        Repeat::Forever => None,
    }
}

/// Linear ramp from `start` to silence over `duration`.
fn fade_volume(start: f32, elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() || elapsed >= duration {
        return 0.0;
    }
    start * (1.0 - elapsed.as_secs_f32() / duration.as_secs_f32())
}

/// Gain a track should play at right now; `None` once a fade has run out.
fn fade_gain(fade: &FadeHandle) -> Option<f32> {
    let Ok(fade) = fade.lock() else {
        return Some(1.0);
    };
    match *fade {
        None => Some(1.0),
        Some(Fade { started, duration }) => {
            let gain = fade_volume(1.0, started.elapsed(), duration);
            (gain > 0.0).then_some(gain)
        }
    }
}

/// Wraps a music source so it follows the channel's fade and ends when it finishes.
fn fading<S>(source: S, fade: FadeHandle) -> impl Source<Item = S::Item> + Send
where
    S: Source + Send + 'static,
    S::Item: Sample + Send,
{
    source
        .amplify(1.0)
        .stoppable()
        .periodic_access(FADE_STEP, move |track| match fade_gain(&fade) {
            Some(gain) => track.inner_mut().set_factor(gain),
            None => track.stop(),
        })
}

impl AudioBackend for RodioAudio {
    fn load_sound(&mut self, path: &Path) -> Result<SoundId, AudioError> {
        let bytes = read_audio(path)?;
        self.next_sound += 1;
        let id = SoundId(self.next_sound);
        self.sounds.insert(id, bytes);
        Ok(id)
    }

    fn play_sound(&mut self, sound: SoundId) -> Result<(), AudioError> {
        let bytes = self.sounds.get(&sound).ok_or(AudioError::InvalidHandle)?;
        let source = decoder(bytes)?;
        let sink = self.new_sink()?;
        sink.append(source);
        sink.detach();
        Ok(())
    }

    fn free_sound(&mut self, sound: SoundId) {
        self.sounds.remove(&sound);
    }

    fn load_music(&mut self, path: &Path) -> Result<MusicId, AudioError> {
        let bytes = read_audio(path)?;
        self.next_music += 1;
        let id = MusicId(self.next_music);
        self.music.insert(id, bytes);
        Ok(id)
    }

    fn play_music(&mut self, music: MusicId, repeat: Repeat) -> Result<(), AudioError> {
        let bytes = self.music.get(&music).ok_or(AudioError::InvalidHandle)?;
        let sink = self.new_sink()?;
        let fade = FadeHandle::default();
        match play_count(repeat) {
            None => sink.append(fading(decoder(bytes)?.repeat_infinite(), fade.clone())),
            Some(count) => {
                for _ in 0..count {
                    sink.append(fading(decoder(bytes)?, fade.clone()));
                }
            }
        }

        if let Some(previous) = self.channel.take() {
            previous.sink.stop();
        }
        self.channel = Some(MusicChannel { music, sink, fade });
        Ok(())
    }

    fn pause_music(&mut self) {
        if let Some(sink) = self.current_sink() {
            sink.pause();
        }
    }

    fn resume_music(&mut self) {
        if let Some(sink) = self.current_sink() {
            sink.play();
        }
    }

    fn stop_music(&mut self) {
        if let Some(channel) = self.channel.take() {
            channel.sink.stop();
        }
    }

    fn fade_out_music(&mut self, duration: Duration) {
        let Some(channel) = self.channel.as_ref() else {
            return;
        };
        if duration.is_zero() {
            self.stop_music();
            return;
        }
        let fade_set = match channel.fade.lock() {
            Ok(mut fade) => {
                *fade = Some(Fade {
                    started: Instant::now(),
                    duration,
                });
                true
            }
            Err(_) => false,
        };
        if !fade_set {
            log::warn!("Music fade unavailable, stopping instead");
            self.stop_music();
        }
    }

    fn free_music(&mut self, music: MusicId) {
        if self.channel.as_ref().is_some_and(|c| c.music == music) {
            self.stop_music();
        }
        self.music.remove(&music);
    }
}

impl Drop for RodioAudio {
    fn drop(&mut self) {
        self.stop_music();
        log::info!("Audio output closed");
    }
}
