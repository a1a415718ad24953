//! Error types shared by the core and every backend crate.
//!
//! Two severities exist in practice. Backend start-up failures (`PlatformError::Init`,
//! `AudioError::Init`) are returned to the embedding application, which is expected to
//! abort. Everything else is reported through `log` at the call site and handed back
//! as an `Err` the caller may ignore.

use std::path::PathBuf;

use thiserror::Error;

/// The four resource families. Used to build resource-specific messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Image,
    Font,
    Sound,
    Music,
}

impl ResourceKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Font => "Font",
            Self::Sound => "Sound",
            Self::Music => "Music",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("{kind} file not found: {}", path.display())]
    NotFound { kind: ResourceKind, path: PathBuf },

    #[error("failed to decode {kind} '{}': {message}", path.display())]
    Decode {
        kind: ResourceKind,
        path: PathBuf,
        message: String,
    },

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error(transparent)]
    Font(#[from] FontError),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("rendering context initialization failed: {0}")]
    Init(String),

    #[error("texture upload failed: {0}")]
    Texture(String),

    #[error("surface error: {0}")]
    Surface(String),
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio backend failed to start: {0}")]
    Init(String),

    #[error("failed to load audio: {0}")]
    Load(String),

    #[error("audio playback failed: {0}")]
    Playback(String),

    #[error("invalid audio handle")]
    InvalidHandle,
}

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to load font: {0}")]
    Load(String),

    #[error("invalid font handle")]
    InvalidHandle,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("a circle needs at least one sector")]
    NoSectors,
}

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("platform initialization failed: {0}")]
    Init(String),

    #[error("window creation failed: {0}")]
    WindowCreation(String),

    #[error("vsync hint rejected: {0}")]
    Vsync(String),

    #[error("could not open device {index}: {message}")]
    Device { index: usize, message: String },

    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("window cannot be shown: {0}")]
    CannotShow(&'static str),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse window config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("window config validation failed: {0}")]
    Invalid(String),
}
