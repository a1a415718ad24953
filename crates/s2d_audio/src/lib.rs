pub mod rodio_audio;

pub use rodio_audio::RodioAudio;
