//! CPU-side geometry for one frame.
//!
//! Shapes, images and text are appended in call order. Consecutive draws that
//! bind the same texture collapse into a single indexed draw.

use s2d_core::{Color, Placement, TextureId, Vertex};

use crate::vertex::GpuVertex;

/// Texture a run of indices samples from. `Solid` is the shared white texel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Solid,
    Texture(TextureId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub binding: Binding,
    pub index_start: u32,
    pub index_count: u32,
}

#[derive(Debug, Default)]
pub struct DrawBatch {
    pub vertices: Vec<GpuVertex>,
    pub indices: Vec<u32>,
    pub draw_calls: Vec<DrawCall>,
}

impl DrawBatch {
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.draw_calls.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn push_triangle(&mut self, v: [Vertex; 3]) {
        let base = self.vertices.len() as u32;
        let index_start = self.indices.len() as u32;
        self.vertices.extend(v.into_iter().map(GpuVertex::solid));
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
        push_draw_call(&mut self.draw_calls, Binding::Solid, index_start, 3);
    }

    /// Whole texture stretched over `placement`, tinted by `tint`.
    pub fn push_textured_quad(&mut self, texture: TextureId, placement: Placement, tint: Color) {
        let Placement {
            x,
            y,
            width,
            height,
        } = placement;
        let color = tint.to_array();
        let corners = [
            ([x, y], [0.0, 0.0]),
            ([x + width, y], [1.0, 0.0]),
            ([x + width, y + height], [1.0, 1.0]),
            ([x, y + height], [0.0, 1.0]),
        ];

        let base = self.vertices.len() as u32;
        let index_start = self.indices.len() as u32;
        self.vertices
            .extend(corners.into_iter().map(|(position, tex_coords)| GpuVertex {
                position,
                tex_coords,
                color,
            }));
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        push_draw_call(
            &mut self.draw_calls,
            Binding::Texture(texture),
            index_start,
            6,
        );
    }
}

/// Append a draw call, merging with the previous one when the binding matches and
/// the indices are contiguous.
fn push_draw_call(
    draw_calls: &mut Vec<DrawCall>,
    binding: Binding,
    index_start: u32,
    index_count: u32,
) {
    if let Some(last) = draw_calls.last_mut() {
        let contiguous = last.index_start + last.index_count == index_start;
        if last.binding == binding && contiguous {
            last.index_count += index_count;
            return;
        }
    }
    draw_calls.push(DrawCall {
        binding,
        index_start,
        index_count,
    });
}
