use glam::Mat4;
use s2d_core::Viewport;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Orthographic projection over logical pixel space: origin top-left, y down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelCamera {
    pub width: f32,
    pub height: f32,
}

impl PixelCamera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn for_viewport(viewport: &Viewport) -> Self {
        Self::new(viewport.ortho_width, viewport.ortho_height)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::orthographic_rh(0.0, self.width, self.height, 0.0, -1.0, 1.0)
    }

    pub fn build_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.projection().to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec4;

    impl PixelCamera {
        /// Where a logical point lands in clip space.
        fn to_clip(&self, x: f32, y: f32) -> (f32, f32) {
            let p = self.projection() * Vec4::new(x, y, 0.0, 1.0);
            (p.x, p.y)
        }
    }

    #[test]
    fn corners_map_to_clip_space_with_y_down() {
        let cam = PixelCamera::new(640.0, 480.0);
        let (x0, y0) = cam.to_clip(0.0, 0.0);
        assert_relative_eq!(x0, -1.0, epsilon = 1e-6);
        assert_relative_eq!(y0, 1.0, epsilon = 1e-6);

        let (x1, y1) = cam.to_clip(640.0, 480.0);
        assert_relative_eq!(x1, 1.0, epsilon = 1e-6);
        assert_relative_eq!(y1, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn centre_maps_to_origin() {
        let cam = PixelCamera::new(800.0, 600.0);
        let (x, y) = cam.to_clip(400.0, 300.0);
        assert_relative_eq!(x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn degenerate_extent_is_clamped() {
        let cam = PixelCamera::new(0.0, 0.0);
        assert_eq!((cam.width, cam.height), (1.0, 1.0));
    }
}
