use rayon::prelude::*;
use tracing::debug;

use crate::consts::{BYTES_PER_PIXEL, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{Result, ViewerError};
use crate::frame::{Channel, DecodedFrame, PixelBuffer, PixelLayout};

/// Interleave the three planes of `frame` into a packed buffer in `layout` order.
///
/// Each plane is walked with its own stride; padding never reaches the output.
/// Only 8-bit RGB input is handled, no colour conversion takes place.
pub fn convert(frame: &DecodedFrame, layout: PixelLayout) -> Result<PixelBuffer> {
    let w = frame.width() as usize;
    let h = frame.height() as usize;
    let row_bytes = w * BYTES_PER_PIXEL;
    let bytes = row_bytes * h;

    let mut data = Vec::new();
    data.try_reserve_exact(bytes)
        .map_err(|_| ViewerError::Allocation { bytes })?;
    data.resize(bytes, 0);

    let fill_row = |(y, out): (usize, &mut [u8])| {
        let r = frame.row(Channel::Red, y);
        let g = frame.row(Channel::Green, y);
        let b = frame.row(Channel::Blue, y);
        match layout {
            PixelLayout::Bgr24 => interleave_row(out, b, g, r),
            PixelLayout::Rgb24 => interleave_row(out, r, g, b),
        }
    };

    if w * h >= PARALLEL_PIXEL_THRESHOLD {
        data.par_chunks_mut(row_bytes).enumerate().for_each(fill_row);
    } else {
        data.chunks_mut(row_bytes).enumerate().for_each(fill_row);
    }

    debug!(width = w, height = h, %layout, "Frame converted");
    Ok(PixelBuffer::from_parts(
        frame.width(),
        frame.height(),
        layout,
        data,
    ))
}

#[inline]
fn interleave_row(out: &mut [u8], first: &[u8], second: &[u8], third: &[u8]) {
    for (i, px) in out.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
        px[0] = first[i];
        px[1] = second[i];
        px[2] = third[i];
    }
}
