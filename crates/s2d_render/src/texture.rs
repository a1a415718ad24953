use s2d_core::{FilterMode, PixelFormat, RenderError};

pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub size: (u32, u32),
}

impl GpuTexture {
    /// Upload a tightly packed RGB or RGBA buffer. RGB is widened to RGBA first since
    /// wgpu has no three-channel texture format.
    pub fn from_pixels(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: PixelFormat,
        width: u32,
        height: u32,
        pixels: &[u8],
        filter: FilterMode,
        label: &str,
    ) -> Result<Self, RenderError> {
        check_dimensions(width, height, device.limits().max_texture_dimension_2d)?;
        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if pixels.len() != expected {
            return Err(RenderError::Texture(format!(
                "'{label}': expected {expected} bytes for {width}x{height}, got {}",
                pixels.len()
            )));
        }

        let rgba;
        let data = match format {
            PixelFormat::Rgba => pixels,
            PixelFormat::Rgb => {
                rgba = expand_rgb_to_rgba(pixels);
                &rgba
            }
        };

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let wgpu_filter = match filter {
            FilterMode::Nearest => wgpu::FilterMode::Nearest,
            FilterMode::Linear => wgpu::FilterMode::Linear,
        };
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu_filter,
            min_filter: wgpu_filter,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Ok(Self {
            texture,
            view,
            sampler,
            size: (width, height),
        })
    }

    /// 1x1 opaque white, bound for untextured geometry.
    pub fn white(device: &wgpu::Device, queue: &wgpu::Queue) -> Result<Self, RenderError> {
        Self::from_pixels(
            device,
            queue,
            PixelFormat::Rgba,
            1,
            1,
            &[255, 255, 255, 255],
            FilterMode::Nearest,
            "white",
        )
    }
}

fn check_dimensions(width: u32, height: u32, max: u32) -> Result<(), RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::Texture(format!(
            "texture size {width}x{height} is empty"
        )));
    }
    if width > max || height > max {
        return Err(RenderError::Texture(format!(
            "texture size {width}x{height} exceeds the device limit of {max}"
        )));
    }
    Ok(())
}

pub fn expand_rgb_to_rgba(rgb: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(rgb.len() / 3 * 4);
    for px in rgb.chunks_exact(3) {
        out.extend_from_slice(px);
        out.push(255);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_gains_an_opaque_alpha() {
        assert_eq!(
            expand_rgb_to_rgba(&[1, 2, 3, 4, 5, 6]),
            vec![1, 2, 3, 255, 4, 5, 6, 255]
        );
    }

    #[test]
    fn dimensions_must_be_non_zero_and_within_limits() {
        assert!(check_dimensions(16, 16, 8192).is_ok());
        assert!(check_dimensions(0, 16, 8192).is_err());
        assert!(check_dimensions(9000, 1, 8192).is_err());
    }
}
