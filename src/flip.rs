use crate::header::ImageOrigin;

fn swap_pixels(raster: &mut [u8], a: usize, b: usize) {
    if a == b {
        return;
    }
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    let (left, right) = raster.split_at_mut(hi * 4);
    left[lo * 4..lo * 4 + 4].swap_with_slice(&mut right[..4]);
}

fn flip_horizontal(raster: &mut [u8], width: usize, height: usize) {
    for row in 0..height {
        let base = row * width;
        for i in 0..width / 2 {
            swap_pixels(raster, base + i, base + width - 1 - i);
        }
    }
}

fn flip_vertical(raster: &mut [u8], width: usize, height: usize) {
    for row in 0..height / 2 {
        let top = row * width;
        let bottom = (height - 1 - row) * width;
        for col in 0..width {
            swap_pixels(raster, top + col, bottom + col);
        }
    }
}

fn flip_diagonal(raster: &mut [u8], total_pixels: usize) {
    for i in 0..total_pixels / 2 {
        swap_pixels(raster, i, total_pixels - 1 - i);
    }
}

/// Normalizes `raster` (`width` x `height` BGRA8888 pixels) from `origin` to top-left origin, in
/// place. A no-op for [`ImageOrigin::TopLeft`] and [`ImageOrigin::Unknown`].
pub fn flip(raster: &mut [u8], origin: ImageOrigin, width: usize, height: usize) {
    match origin {
        ImageOrigin::TopLeft | ImageOrigin::Unknown => {}
        ImageOrigin::TopRight => flip_horizontal(raster, width, height),
        ImageOrigin::BottomLeft => flip_vertical(raster, width, height),
        ImageOrigin::BottomRight => flip_diagonal(raster, width * height),
    }
}
