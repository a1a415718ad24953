//! Mapping between the requested (logical) window size and the drawable the
//! platform actually produced.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportMode {
    /// Logical space keeps its requested size at the top-left corner.
    Fixed,
    /// Logical space grows and shrinks with the drawable.
    Expand,
    /// Uniform scale preserving aspect ratio, letterboxed and centered.
    #[default]
    Scale,
    /// Logical space stretched to fill the drawable.
    Stretch,
}

/// Everything a render backend needs to set up its projection and viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSpec {
    pub orig_width: u32,
    pub orig_height: u32,
    pub width: u32,
    pub height: u32,
    pub mode: ViewportMode,
}

/// Viewport rectangle in drawable pixels plus the logical extent projected into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub ortho_width: f32,
    pub ortho_height: f32,
}

pub fn compute_viewport(view: &ViewSpec) -> Viewport {
    let orig_w = view.orig_width.max(1) as f32;
    let orig_h = view.orig_height.max(1) as f32;
    let w = view.width.max(1) as f32;
    let h = view.height.max(1) as f32;

    match view.mode {
        ViewportMode::Fixed => Viewport {
            x: 0.0,
            y: 0.0,
            width: orig_w,
            height: orig_h,
            ortho_width: orig_w,
            ortho_height: orig_h,
        },
        ViewportMode::Expand => Viewport {
            x: 0.0,
            y: 0.0,
            width: w,
            height: h,
            ortho_width: w,
            ortho_height: h,
        },
        ViewportMode::Scale => {
            let scale = (w / orig_w).min(h / orig_h);
            let vw = orig_w * scale;
            let vh = orig_h * scale;
            Viewport {
                x: (w - vw) / 2.0,
                y: (h - vh) / 2.0,
                width: vw,
                height: vh,
                ortho_width: orig_w,
                ortho_height: orig_h,
            }
        }
        ViewportMode::Stretch => Viewport {
            x: 0.0,
            y: 0.0,
            width: w,
            height: h,
            ortho_width: orig_w,
            ortho_height: orig_h,
        },
    }
}

/// Convert a raw (drawable) mouse coordinate into logical space on one axis.
/// Only rescales when the two sizes differ; rounds to the nearest integer.
pub fn scale_axis(raw: i32, requested: u32, actual: u32) -> i32 {
    if requested == actual || actual == 0 {
        return raw;
    }
    (raw as f64 * (requested as f64 / actual as f64)).round() as i32
}
