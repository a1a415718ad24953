//! `FontBackend` using fontdue.
//!
//! Strings are laid out on a single line: each glyph advances the pen by its advance
//! width, and glyph bitmaps are placed relative to a baseline at the font's ascent.
//! The result is white RGBA with coverage in alpha, so the tint color comes through.

use std::collections::HashMap;
use std::path::Path;

use fontdue::{Font, FontSettings};
use s2d_core::{FontBackend, FontError, FontId, RasterizedText};

struct LoadedFont {
    font: Font,
    px: f32,
}

impl LoadedFont {
    /// Line height and distance from the top to the baseline.
    fn vertical_metrics(&self) -> (u32, f32) {
        match self.font.horizontal_line_metrics(self.px) {
            Some(lm) => ((lm.ascent - lm.descent).ceil().max(1.0) as u32, lm.ascent),
            None => (self.px.ceil().max(1.0) as u32, self.px),
        }
    }

    fn advance_width(&self, text: &str) -> u32 {
        let width: f32 = text
            .chars()
            .map(|ch| self.font.metrics(ch, self.px).advance_width)
            .sum();
        width.ceil().max(1.0) as u32
    }
}

#[derive(Default)]
pub struct FontdueFonts {
    fonts: HashMap<FontId, LoadedFont>,
    next_id: u32,
}

impl FontdueFonts {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, font: FontId) -> Result<&LoadedFont, FontError> {
        self.fonts.get(&font).ok_or(FontError::InvalidHandle)
    }
}

impl FontBackend for FontdueFonts {
    fn open_font(&mut self, path: &Path, size: u32) -> Result<FontId, FontError> {
        let bytes = std::fs::read(path)
            .map_err(|e| FontError::Load(format!("{}: {e}", path.display())))?;
        let px = size.max(1) as f32;
        let font = Font::from_bytes(
            bytes,
            FontSettings {
                scale: px,
                ..FontSettings::default()
            },
        )
        .map_err(|e| FontError::Load(format!("{}: {e}", path.display())))?;

        self.next_id += 1;
        let id = FontId(self.next_id);
        self.fonts.insert(id, LoadedFont { font, px });
        log::info!("Opened font '{}' at {size}px", path.display());
        Ok(id)
    }

    fn measure_text(&self, font: FontId, text: &str) -> Result<(u32, u32), FontError> {
        let loaded = self.get(font)?;
        let (line_height, _) = loaded.vertical_metrics();
        Ok((loaded.advance_width(text), line_height))
    }

    fn render_text(&self, font: FontId, text: &str) -> Result<RasterizedText, FontError> {
        let loaded = self.get(font)?;
        let (height, ascent) = loaded.vertical_metrics();
        let width = loaded.advance_width(text);
        let mut pixels = blank_white(width, height);

        let mut pen_x = 0.0f32;
        for ch in text.chars() {
            let (metrics, coverage) = loaded.font.rasterize(ch, loaded.px);
            let gx = (pen_x + metrics.xmin as f32).round() as i32;
            let gy = (ascent - (metrics.height as i32 + metrics.ymin) as f32).round() as i32;
            blit_glyph(
                &mut pixels,
                width,
                height,
                &coverage,
                metrics.width as u32,
                metrics.height as u32,
                gx,
                gy,
            );
            pen_x += metrics.advance_width;
        }

        Ok(RasterizedText {
            width,
            height,
            pixels,
        })
    }

    fn close_font(&mut self, font: FontId) {
        self.fonts.remove(&font);
    }
}

fn blank_white(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = vec![255u8; (width * height * 4) as usize];
    for alpha in pixels.iter_mut().skip(3).step_by(4) {
        *alpha = 0;
    }
    pixels
}

/// Copy glyph coverage into the alpha channel at (`x`, `y`), clipping to the
/// destination. Overlapping glyphs keep the stronger coverage.
#[allow(clippy::too_many_arguments)]
fn blit_glyph(
    dst: &mut [u8],
    dst_w: u32,
    dst_h: u32,
    coverage: &[u8],
    glyph_w: u32,
    glyph_h: u32,
    x: i32,
    y: i32,
) {
    for row in 0..glyph_h as i32 {
        let ty = y + row;
        if ty < 0 || ty >= dst_h as i32 {
            continue;
        }
        for col in 0..glyph_w as i32 {
            let tx = x + col;
            if tx < 0 || tx >= dst_w as i32 {
                continue;
            }
            let src = coverage[(row * glyph_w as i32 + col) as usize];
            let alpha = &mut dst[((ty as u32 * dst_w + tx as u32) * 4 + 3) as usize];
            *alpha = (*alpha).max(src);
        }
    }
}
