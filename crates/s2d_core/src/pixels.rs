//! Normalization of decoded pixel buffers to the canonical RGB(A) byte order the
//! render backends upload.

/// Channel bit masks of a packed pixel, as a decoder reports them. A mask describes
/// where the channel sits when the pixel bytes are read as a little-endian integer,
/// so canonical RGBA is `r = 0x0000_00FF`, `g = 0x0000_FF00`, `b = 0x00FF_0000`,
/// `a = 0xFF00_0000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMasks {
    pub r: u32,
    pub g: u32,
    pub b: u32,
    pub a: u32,
    pub bytes_per_pixel: usize,
}

impl ChannelMasks {
    pub const RGB: ChannelMasks = ChannelMasks {
        r: 0x0000_00FF,
        g: 0x0000_FF00,
        b: 0x00FF_0000,
        a: 0,
        bytes_per_pixel: 3,
    };

    pub const RGBA: ChannelMasks = ChannelMasks {
        r: 0x0000_00FF,
        g: 0x0000_FF00,
        b: 0x00FF_0000,
        a: 0xFF00_0000,
        bytes_per_pixel: 4,
    };

    #[cfg(test)]
    const BGR: ChannelMasks = ChannelMasks {
        r: 0x00FF_0000,
        g: 0x0000_FF00,
        b: 0x0000_00FF,
        a: 0,
        bytes_per_pixel: 3,
    };

    #[cfg(test)]
    const BGRA: ChannelMasks = ChannelMasks {
        r: 0x00FF_0000,
        g: 0x0000_FF00,
        b: 0x0000_00FF,
        a: 0xFF00_0000,
        bytes_per_pixel: 4,
    };

    #[cfg(test)]
    const ABGR: ChannelMasks = ChannelMasks {
        r: 0xFF00_0000,
        g: 0x00FF_0000,
        b: 0x0000_FF00,
        a: 0x0000_00FF,
        bytes_per_pixel: 4,
    };

    /// Red outside the low byte means the buffer is not in canonical order.
    pub fn needs_reorder(&self) -> bool {
        self.r & 0xFF00_0000 != 0 || self.r & 0x00FF_0000 != 0
    }
}

/// Return a copy of `pixels` reordered into canonical RGB(A).
///
/// Per pixel, in this order: alpha stored in the low byte is swapped with byte 3,
/// green stored in the third byte is swapped with byte 1, red stored in the third
/// byte is swapped with byte 0. A trailing partial pixel is copied unchanged.
pub fn to_canonical_order(pixels: &[u8], masks: &ChannelMasks) -> Vec<u8> {
    let mut out = pixels.to_vec();
    let bpp = masks.bytes_per_pixel;
    if bpp < 3 || !masks.needs_reorder() {
        return out;
    }

    for px in out.chunks_exact_mut(bpp) {
        if bpp >= 4 && masks.a & 0xFF != 0 {
            px.swap(0, 3);
        }
        if masks.g & 0x00FF_0000 != 0 {
            px.swap(1, 2);
        }
        if masks.r & 0x00FF_0000 != 0 {
            px.swap(0, 2);
        }
    }
    out
}
