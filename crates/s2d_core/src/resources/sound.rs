use std::path::Path;

use super::{reported, require_file};
use crate::backend::{AudioBackend, SoundId};
use crate::diagnostics;
use crate::error::{ResourceError, ResourceKind};

/// A short sample that plays on any free mixer channel.
#[derive(Debug)]
pub struct Sound {
    id: SoundId,
}

impl Sound {
    pub fn create<A: AudioBackend + ?Sized>(
        audio: &mut A,
        path: impl AsRef<Path>,
    ) -> Result<Self, ResourceError> {
        const CALLER: &str = "Sound::create";
        let path = path.as_ref();
        require_file(ResourceKind::Sound, path, CALLER)?;

        let id = audio.load_sound(path).map_err(|e| reported(CALLER, e))?;
        log::info!("Loaded sound '{}'", path.display());
        Ok(Self { id })
    }

    pub fn id(&self) -> SoundId {
        self.id
    }

    /// Fire and forget; a playback failure is logged, not returned.
    pub fn play<A: AudioBackend + ?Sized>(&self, audio: &mut A) {
        if let Err(err) = audio.play_sound(self.id) {
            diagnostics::report("Sound::play", err);
        }
    }

    pub fn free<A: AudioBackend + ?Sized>(self, audio: &mut A) {
        audio.free_sound(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{temp_file_path, AudioCall, FakeAudio};

    #[test]
    fn create_play_free() {
        let path = temp_file_path("sound_ok", "wav");
        std::fs::write(&path, b"RIFF").expect("write temp sound");
        let mut audio = FakeAudio::default();

        let sound = Sound::create(&mut audio, &path).expect("sound should load");
        let id = sound.id();
        sound.play(&mut audio);
        sound.free(&mut audio);

        assert_eq!(
            audio.calls,
            vec![
                AudioCall::LoadSound(path.clone()),
                AudioCall::PlaySound(id),
                AudioCall::FreeSound(id),
            ]
        );
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_file_never_reaches_the_mixer() {
        let mut audio = FakeAudio::default();
        let err = Sound::create(&mut audio, "/no/such/sound.wav").unwrap_err();
        assert!(matches!(
            err,
            ResourceError::NotFound {
                kind: ResourceKind::Sound,
                ..
            }
        ));
        assert!(audio.calls.is_empty());
    }

    #[test]
    fn loader_failure_is_an_audio_error() {
        let path = temp_file_path("sound_bad", "wav");
        std::fs::write(&path, b"junk").expect("write temp sound");
        let mut audio = FakeAudio::failing();

        let err = Sound::create(&mut audio, &path).unwrap_err();
        assert!(matches!(err, ResourceError::Audio(_)));
        let _ = std::fs::remove_file(path);
    }
}
