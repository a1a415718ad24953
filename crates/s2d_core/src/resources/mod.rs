//! Images, text, sounds and music.
//!
//! Every factory follows the same contract: check the file exists, decode or load it
//! through the matching backend, and report any failure through `log` before returning
//! it. The `Option`-taking functions below are the null-safe surface: drawing,
//! playing or freeing `None` does nothing and logs nothing.

mod image;
mod music;
mod sound;
mod text;

pub use self::image::Image;
pub use self::music::Music;
pub use self::sound::Sound;
pub use self::text::Text;

use std::path::Path;

use crate::backend::{AudioBackend, FontBackend, RenderBackend, Repeat};
use crate::diagnostics;
use crate::error::{ResourceError, ResourceKind};

fn require_file(kind: ResourceKind, path: &Path, caller: &str) -> Result<(), ResourceError> {
    if path.exists() {
        return Ok(());
    }
    Err(reported(
        caller,
        ResourceError::NotFound {
            kind,
            path: path.to_path_buf(),
        },
    ))
}

fn reported(caller: &str, err: impl Into<ResourceError>) -> ResourceError {
    let err = err.into();
    diagnostics::report(caller, &err);
    err
}

pub fn draw_image<R: RenderBackend + ?Sized>(image: Option<&Image>, renderer: &mut R) {
    if let Some(image) = image {
        image.draw(renderer);
    }
}

pub fn free_image<R: RenderBackend + ?Sized>(image: Option<Image>, renderer: &mut R) {
    if let Some(image) = image {
        image.free(renderer);
    }
}

pub fn draw_text<R: RenderBackend + ?Sized>(text: Option<&Text>, renderer: &mut R) {
    if let Some(text) = text {
        text.draw(renderer);
    }
}

pub fn free_text<F, R>(text: Option<Text>, fonts: &mut F, renderer: &mut R)
where
    F: FontBackend + ?Sized,
    R: RenderBackend + ?Sized,
{
    if let Some(text) = text {
        text.free(fonts, renderer);
    }
}

pub fn play_sound<A: AudioBackend + ?Sized>(sound: Option<&Sound>, audio: &mut A) {
    if let Some(sound) = sound {
        sound.play(audio);
    }
}

pub fn free_sound<A: AudioBackend + ?Sized>(sound: Option<Sound>, audio: &mut A) {
    if let Some(sound) = sound {
        sound.free(audio);
    }
}

pub fn play_music<A: AudioBackend + ?Sized>(music: Option<&Music>, audio: &mut A, repeat: Repeat) {
    if let Some(music) = music {
        music.play(audio, repeat);
    }
}

pub fn free_music<A: AudioBackend + ?Sized>(music: Option<Music>, audio: &mut A) {
    if let Some(music) = music {
        music.free(audio);
    }
}
