use std::path::Path;

use super::{reported, require_file};
use crate::backend::{
    FilterMode, FontBackend, FontId, PixelFormat, Placement, RenderBackend, TextureId,
};
use crate::color::Color;
use crate::error::{ResourceError, ResourceKind};

/// A string rendered with a font into its own texture.
#[derive(Debug)]
pub struct Text {
    font: FontId,
    texture: TextureId,
    message: String,
    width: u32,
    height: u32,
    pub x: f32,
    pub y: f32,
    pub color: Color,
}

/// Font measurement cannot size an empty string.
fn printable(message: &str) -> &str {
    if message.is_empty() {
        " "
    } else {
        message
    }
}

impl Text {
    pub fn create<F, R>(
        fonts: &mut F,
        renderer: &mut R,
        font_path: impl AsRef<Path>,
        message: &str,
        size: u32,
    ) -> Result<Self, ResourceError>
    where
        F: FontBackend + ?Sized,
        R: RenderBackend + ?Sized,
    {
        const CALLER: &str = "Text::create";
        let font_path = font_path.as_ref();
        require_file(ResourceKind::Font, font_path, CALLER)?;

        let message = printable(message);
        let font = fonts
            .open_font(font_path, size)
            .map_err(|e| reported(CALLER, e))?;

        match rasterize(fonts, renderer, font, message) {
            Ok((texture, width, height)) => Ok(Self {
                font,
                texture,
                message: message.to_string(),
                width,
                height,
                x: 0.0,
                y: 0.0,
                color: Color::WHITE,
            }),
            Err(err) => {
                fonts.close_font(font);
                Err(reported(CALLER, err))
            }
        }
    }

    /// Replace the message, re-measuring and re-uploading the texture. On failure the
    /// previous message stays in place.
    pub fn set_text<F, R>(
        &mut self,
        fonts: &mut F,
        renderer: &mut R,
        message: &str,
    ) -> Result<(), ResourceError>
    where
        F: FontBackend + ?Sized,
        R: RenderBackend + ?Sized,
    {
        let message = printable(message);
        let (texture, width, height) = rasterize(fonts, renderer, self.font, message)
            .map_err(|e| reported("Text::set_text", e))?;

        renderer.free_texture(self.texture);
        self.texture = texture;
        self.width = width;
        self.height = height;
        self.message = message.to_string();
        Ok(())
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn texture(&self) -> TextureId {
        self.texture
    }

    pub fn draw<R: RenderBackend + ?Sized>(&self, renderer: &mut R) {
        let placement = Placement {
            x: self.x,
            y: self.y,
            width: self.width as f32,
            height: self.height as f32,
        };
        renderer.draw_text(self.texture, placement, self.color);
    }

    pub fn free<F, R>(self, fonts: &mut F, renderer: &mut R)
    where
        F: FontBackend + ?Sized,
        R: RenderBackend + ?Sized,
    {
        renderer.free_texture(self.texture);
        fonts.close_font(self.font);
    }
}

fn rasterize<F, R>(
    fonts: &mut F,
    renderer: &mut R,
    font: FontId,
    message: &str,
) -> Result<(TextureId, u32, u32), ResourceError>
where
    F: FontBackend + ?Sized,
    R: RenderBackend + ?Sized,
{
    let (width, height) = fonts.measure_text(font, message)?;
    let raster = fonts.render_text(font, message)?;
    let texture = renderer.upload_texture(
        PixelFormat::Rgba,
        raster.width,
        raster.height,
        &raster.pixels,
        FilterMode::Nearest,
    )?;
    Ok((texture, width, height))
}
