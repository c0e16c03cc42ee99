use crate::consts::BYTES_PER_PIXEL;
use crate::error::{Result, ViewerError};

/// Colour channel of a planar frame, in engine plane order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
}

/// One 8-bit channel plane. Rows start every `stride` bytes; bytes past
/// `width` in a row are padding.
#[derive(Clone, Debug)]
pub struct Plane {
    pub data: Vec<u8>,
    pub stride: usize,
}

impl Plane {
    pub fn new(data: Vec<u8>, stride: usize) -> Self {
        Self { data, stride }
    }
}

/// A single decoded frame as handed back by the engine: planar 8-bit R, G, B.
#[derive(Clone, Debug)]
pub struct DecodedFrame {
    width: u32,
    height: u32,
    planes: [Plane; 3],
}

impl DecodedFrame {
    /// Wrap engine planes, checking that every row of every plane is addressable.
    pub fn new(width: u32, height: u32, planes: [Plane; 3]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ViewerError::InvalidDimensions { width, height });
        }

        let w = width as usize;
        let h = height as usize;
        for (index, plane) in planes.iter().enumerate() {
            if plane.stride < w {
                return Err(ViewerError::InvalidFrame(format!(
                    "plane {index} stride {} is smaller than width {w}",
                    plane.stride
                )));
            }
            // The last row only needs `width` bytes, padding may be cut off.
            let needed = plane.stride * (h - 1) + w;
            if plane.data.len() < needed {
                return Err(ViewerError::InvalidFrame(format!(
                    "plane {index} holds {} bytes, expected at least {needed}",
                    plane.data.len()
                )));
            }
        }

        Ok(Self {
            width,
            height,
            planes,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn plane(&self, channel: Channel) -> &Plane {
        &self.planes[channel as usize]
    }

    /// Visible bytes of row `y` in the given channel (padding excluded).
    pub fn row(&self, channel: Channel, y: usize) -> &[u8] {
        let plane = self.plane(channel);
        let start = y * plane.stride;
        &plane.data[start..start + self.width as usize]
    }
}

/// Byte order of an interleaved pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelLayout {
    /// Blue, green, red. The order the native renderer consumes.
    #[default]
    Bgr24,
    Rgb24,
}

impl std::fmt::Display for PixelLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bgr24 => write!(f, "BGR24"),
            Self::Rgb24 => write!(f, "RGB24"),
        }
    }
}

/// Tightly packed interleaved pixels, `width * height * 3` bytes, no row padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    layout: PixelLayout,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub(crate) fn from_parts(width: u32, height: u32, layout: PixelLayout, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * BYTES_PER_PIXEL);
        Self {
            width,
            height,
            layout,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Pixel at (x, y) as `[r, g, b]`, whatever the stored layout.
    pub fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let px = &self.data[i..i + BYTES_PER_PIXEL];
        match self.layout {
            PixelLayout::Bgr24 => [px[2], px[1], px[0]],
            PixelLayout::Rgb24 => [px[0], px[1], px[2]],
        }
    }
}

/// Output node properties reported by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeInfo {
    pub width: u32,
    pub height: u32,
    /// `None` when the engine cannot tell (variable length clips).
    pub frame_count: Option<usize>,
    pub format: String,
}
