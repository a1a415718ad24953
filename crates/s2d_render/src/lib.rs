pub mod batch;
pub mod camera;
pub mod font;
pub mod gpu_context;
pub mod pipeline;
pub mod renderer;
pub mod texture;
pub mod vertex;

pub use camera::{CameraUniform, PixelCamera};
pub use font::FontdueFonts;
pub use gpu_context::GpuContext;
pub use pipeline::DrawPipeline;
pub use renderer::WgpuRenderer;
pub use texture::GpuTexture;
pub use vertex::GpuVertex;
