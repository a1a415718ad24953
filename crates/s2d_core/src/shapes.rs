//! Shape primitives. Every shape is decomposed into colored triangles and handed to
//! the render backend; nothing here keeps state.

use std::f32::consts::PI;

use glam::Vec2;

use crate::backend::{RenderBackend, Vertex};
use crate::collision::FRect;
use crate::color::Color;
use crate::error::ShapeError;

/// Named points of a rectangle that rotations can pivot around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Rotate `p` by `angle_deg` degrees around `pivot`.
pub fn rotate_point(p: Vec2, angle_deg: f32, pivot: Vec2) -> Vec2 {
    let (sa, ca) = angle_deg.to_radians().sin_cos();
    let d = p - pivot;
    Vec2::new(d.x * ca - d.y * sa, d.x * sa + d.y * ca) + pivot
}

/// The point of the rectangle `(x, y, w, h)` named by `anchor`.
pub fn rect_rotation_point(x: f32, y: f32, w: f32, h: f32, anchor: Anchor) -> Vec2 {
    match anchor {
        Anchor::Center => Vec2::new(x + w / 2.0, y + h / 2.0),
        Anchor::TopLeft => Vec2::new(x, y),
        Anchor::TopRight => Vec2::new(x + w, y),
        Anchor::BottomLeft => Vec2::new(x, y + h),
        Anchor::BottomRight => Vec2::new(x + w, y + h),
    }
}

pub fn draw_triangle<R: RenderBackend + ?Sized>(renderer: &mut R, a: Vertex, b: Vertex, c: Vertex) {
    renderer.draw_triangle([a, b, c]);
}

/// Quad `v` split into triangles (1, 2, 3) and (3, 4, 1).
pub fn draw_quad<R: RenderBackend + ?Sized>(renderer: &mut R, v: [Vertex; 4]) {
    renderer.draw_triangle([v[0], v[1], v[2]]);
    renderer.draw_triangle([v[2], v[3], v[0]]);
}

pub fn draw_rect_xywh<R: RenderBackend + ?Sized>(
    renderer: &mut R,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    color: Color,
) {
    // Clockwise from the top-left corner.
    draw_quad(
        renderer,
        [
            Vertex::new(x, y, color),
            Vertex::new(x + width, y, color),
            Vertex::new(x + width, y + height, color),
            Vertex::new(x, y + height, color),
        ],
    );
}

pub fn draw_rect<R: RenderBackend + ?Sized>(renderer: &mut R, rect: FRect, color: Color) {
    draw_rect_xywh(renderer, rect.x, rect.y, rect.width, rect.height, color);
}

/// Stroke from `(x1, y1)` to `(x2, y2)` as a quad `width` wide. `colors` are the four
/// corners: start-left, start-right, end-right, end-left.
///
/// A zero-length segment has no direction to stroke across and draws nothing.
pub fn draw_line<R: RenderBackend + ?Sized>(
    renderer: &mut R,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    width: f32,
    colors: [Color; 4],
) {
    let start = Vec2::new(x1, y1);
    let end = Vec2::new(x2, y2);
    let length = start.distance(end);
    if length == 0.0 {
        return;
    }

    let half = (end - start) / length * (width / 2.0);
    // perpendicular offset (-half.y, half.x)
    let (dx, dy) = (half.x, half.y);
    draw_quad(
        renderer,
        [
            Vertex::new(x1 - dy, y1 + dx, colors[0]),
            Vertex::new(x1 + dy, y1 - dx, colors[1]),
            Vertex::new(x2 + dy, y2 - dx, colors[2]),
            Vertex::new(x2 - dy, y2 + dx, colors[3]),
        ],
    );
}

/// Triangle fan of `sectors` slices around `(x, y)`. Slice `i` spans the angles
/// `(i - 1) * 2π / sectors` to `i * 2π / sectors`, so slice 0 closes the fan.
pub fn draw_circle<R: RenderBackend + ?Sized>(
    renderer: &mut R,
    x: f32,
    y: f32,
    radius: f32,
    sectors: u32,
    color: Color,
) -> Result<(), ShapeError> {
    if sectors == 0 {
        return Err(ShapeError::NoSectors);
    }

    let slice = 2.0 * PI / sectors as f32;
    let center = Vertex::new(x, y, color);
    let point = |i: i64| {
        let angle = i as f32 * slice;
        Vertex::new(x + radius * angle.cos(), y + radius * angle.sin(), color)
    };

    for i in 0..i64::from(sectors) {
        renderer.draw_triangle([center, point(i), point(i - 1)]);
    }
    Ok(())
}
