use std::path::Path;
use std::time::Duration;

use super::{reported, require_file};
use crate::backend::{AudioBackend, MusicId, Repeat};
use crate::diagnostics;
use crate::error::{ResourceError, ResourceKind};

/// A streamed track. Only one piece of music plays at a time; the channel-wide
/// controls (`pause`, `resume`, `stop`, `fade_out`) act on whichever track was
/// played last.
#[derive(Debug)]
pub struct Music {
    id: MusicId,
}

impl Music {
    pub fn create<A: AudioBackend + ?Sized>(
        audio: &mut A,
        path: impl AsRef<Path>,
    ) -> Result<Self, ResourceError> {
        const CALLER: &str = "Music::create";
        let path = path.as_ref();
        require_file(ResourceKind::Music, path, CALLER)?;

        let id = audio.load_music(path).map_err(|e| reported(CALLER, e))?;
        log::info!("Loaded music '{}'", path.display());
        Ok(Self { id })
    }

    pub fn id(&self) -> MusicId {
        self.id
    }

    /// Start playing, replacing any music already on the channel.
    pub fn play<A: AudioBackend + ?Sized>(&self, audio: &mut A, repeat: Repeat) {
        if let Err(err) = audio.play_music(self.id, repeat) {
            diagnostics::report("Music::play", err);
        }
    }

    pub fn pause<A: AudioBackend + ?Sized>(audio: &mut A) {
        audio.pause_music();
    }

    pub fn resume<A: AudioBackend + ?Sized>(audio: &mut A) {
        audio.resume_music();
    }

    pub fn stop<A: AudioBackend + ?Sized>(audio: &mut A) {
        audio.stop_music();
    }

    pub fn fade_out<A: AudioBackend + ?Sized>(audio: &mut A, duration: Duration) {
        audio.fade_out_music(duration);
    }

    pub fn free<A: AudioBackend + ?Sized>(self, audio: &mut A) {
        audio.free_music(self.id);
    }
}
