use std::path::Path;

use ::image::DynamicImage;

use super::{reported, require_file};
use crate::backend::{FilterMode, PixelFormat, Placement, RenderBackend, TextureId};
use crate::color::Color;
use crate::error::{ResourceError, ResourceKind};
use crate::pixels::{to_canonical_order, ChannelMasks};

/// A decoded image uploaded as a texture.
#[derive(Debug)]
pub struct Image {
    texture: TextureId,
    pub x: f32,
    pub y: f32,
    /// Drawn size; starts as the decoded size.
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

struct DecodedImage {
    format: PixelFormat,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Image {
    pub fn create<R: RenderBackend + ?Sized>(
        renderer: &mut R,
        path: impl AsRef<Path>,
    ) -> Result<Self, ResourceError> {
        const CALLER: &str = "Image::create";
        let path = path.as_ref();
        require_file(ResourceKind::Image, path, CALLER)?;

        let decoded = decode(path).map_err(|e| reported(CALLER, e))?;
        let texture = renderer
            .upload_texture(
                decoded.format,
                decoded.width,
                decoded.height,
                &decoded.pixels,
                FilterMode::Nearest,
            )
            .map_err(|e| reported(CALLER, e))?;

        log::info!(
            "Loaded image '{}' ({}x{})",
            path.display(),
            decoded.width,
            decoded.height
        );
        Ok(Self {
            texture,
            x: 0.0,
            y: 0.0,
            width: decoded.width as f32,
            height: decoded.height as f32,
            color: Color::WHITE,
        })
    }

    pub fn texture(&self) -> TextureId {
        self.texture
    }

    pub fn draw<R: RenderBackend + ?Sized>(&self, renderer: &mut R) {
        let placement = Placement {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        };
        renderer.draw_image(self.texture, placement, self.color);
    }

    pub fn free<R: RenderBackend + ?Sized>(self, renderer: &mut R) {
        renderer.free_texture(self.texture);
    }
}

fn decode(path: &Path) -> Result<DecodedImage, ResourceError> {
    let img = ::image::open(path).map_err(|e| ResourceError::Decode {
        kind: ResourceKind::Image,
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let (width, height) = (img.width(), img.height());

    let (format, masks, raw) = match img {
        DynamicImage::ImageRgb8(buf) => (PixelFormat::Rgb, ChannelMasks::RGB, buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => (PixelFormat::Rgba, ChannelMasks::RGBA, buf.into_raw()),
        other => (
            PixelFormat::Rgba,
            ChannelMasks::RGBA,
            other.to_rgba8().into_raw(),
        ),
    };

    Ok(DecodedImage {
        format,
        width,
        height,
        pixels: to_canonical_order(&raw, &masks),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{temp_file_path, RecordingRenderer, RenderCall};
    use ::image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn create_uploads_rgba_png_and_sets_defaults() {
        let path = temp_file_path("image_rgba", "png");
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 128]));
        img.save(&path).expect("write png");

        let mut renderer = RecordingRenderer::default();
        let image = Image::create(&mut renderer, &path).expect("image should load");
        assert_eq!((image.width, image.height), (3.0, 2.0));
        assert_eq!((image.x, image.y), (0.0, 0.0));
        assert_eq!(image.color, Color::WHITE);

        match &renderer.calls[0] {
            RenderCall::Upload {
                format,
                width,
                height,
                filter,
                ..
            } => {
                assert_eq!(*format, PixelFormat::Rgba);
                assert_eq!((*width, *height), (3, 2));
                assert_eq!(*filter, FilterMode::Nearest);
            }
            other => panic!("expected upload, got {other:?}"),
        }
        assert_eq!(&renderer.uploads[0][..4], &[255, 0, 0, 128]);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn create_keeps_rgb_images_as_rgb() {
        let path = temp_file_path("image_rgb", "png");
        RgbImage::from_pixel(2, 2, Rgb([1, 2, 3]))
            .save(&path)
            .expect("write png");

        let mut renderer = RecordingRenderer::default();
        Image::create(&mut renderer, &path).expect("image should load");
        assert!(matches!(
            renderer.calls[0],
            RenderCall::Upload {
                format: PixelFormat::Rgb,
                ..
            }
        ));
        assert_eq!(renderer.uploads[0], vec![1, 2, 3, 1, 2, 3, 1, 2, 3, 1, 2, 3]);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_file_is_not_found_and_uploads_nothing() {
        let mut renderer = RecordingRenderer::default();
        let err = Image::create(&mut renderer, "/no/such/image.png").unwrap_err();
        assert!(matches!(
            err,
            ResourceError::NotFound {
                kind: ResourceKind::Image,
                ..
            }
        ));
        assert!(renderer.calls.is_empty());
    }

    #[test]
    fn undecodable_file_is_a_decode_error() {
        let path = temp_file_path("image_garbage", "png");
        std::fs::write(&path, b"definitely not a png").expect("write temp file");

        let mut renderer = RecordingRenderer::default();
        let err = Image::create(&mut renderer, &path).unwrap_err();
        assert!(matches!(err, ResourceError::Decode { .. }));
        assert!(renderer.calls.is_empty());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn draw_and_free_use_the_uploaded_texture() {
        let path = temp_file_path("image_draw", "png");
        RgbaImage::new(4, 4).save(&path).expect("write png");

        let mut renderer = RecordingRenderer::default();
        let mut image = Image::create(&mut renderer, &path).expect("image should load");
        image.x = 10.0;
        image.width = 8.0;
        let texture = image.texture();
        image.draw(&mut renderer);
        image.free(&mut renderer);

        assert_eq!(
            renderer.calls[1],
            RenderCall::DrawImage {
                texture,
                placement: Placement {
                    x: 10.0,
                    y: 0.0,
                    width: 8.0,
                    height: 4.0
                },
                tint: Color::WHITE,
            }
        );
        assert_eq!(renderer.calls[2], RenderCall::FreeTexture(texture));
        let _ = std::fs::remove_file(path);
    }
}
