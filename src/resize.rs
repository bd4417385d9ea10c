//! Height normalization for oversized frames.

use image::{DynamicImage, imageops::FilterType};

/// Compute the output size for a frame under a maximum height.
///
/// Returns `None` when the frame already fits. Otherwise the height becomes
/// exactly `max_height` and the width is `round(width * max_height / height)`,
/// at least one pixel. Rounding the width independently can shift the aspect
/// ratio by a fraction of a pixel; that is intended.
///
/// ```
/// use stillframe::resize::capped_dimensions;
///
/// assert_eq!(capped_dimensions(1000, 2000, 1080), Some((540, 1080)));
/// assert_eq!(capped_dimensions(1920, 1080, 1080), None);
/// ```
pub fn capped_dimensions(width: u32, height: u32, max_height: u32) -> Option<(u32, u32)> {
    if height <= max_height || height == 0 {
        return None;
    }
    let scale = max_height as f64 / height as f64;
    let new_width = (width as f64 * scale).round() as u32;
    Some((new_width.max(1), max_height))
}

/// Downscale `image` so its height does not exceed `max_height`.
///
/// Frames that already fit are returned untouched.
pub fn cap_height(image: DynamicImage, max_height: u32) -> DynamicImage {
    match capped_dimensions(image.width(), image.height(), max_height) {
        Some((width, height)) => image.resize_exact(width, height, FilterType::Triangle),
        None => image,
    }
}
