use crate::emotion_classifier::detection::luminance;
use image::{imageops, RgbImage};
use tract_onnx::prelude::*;

/// Fits the image into `width`x`height`, keeping aspect ratio and padding with black.
pub fn resize_image(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    if image.width() == image.height() {
        return imageops::resize(image, width, height, imageops::FilterType::Triangle);
    }

    let (w, h) = (image.width() as f32, image.height() as f32);
    let scale = (width as f32 / w).min(height as f32 / h);
    let new_w = ((w * scale) as u32).clamp(1, width);
    let new_h = ((h * scale) as u32).clamp(1, height);

    let scaled = imageops::resize(image, new_w, new_h, imageops::FilterType::Triangle);
    let mut padded = RgbImage::new(width, height);
    let x_offset = (width - new_w) / 2;
    let y_offset = (height - new_h) / 2;
    imageops::replace(&mut padded, &scaled, x_offset as i64, y_offset as i64);

    padded
}

/// NCHW tensor scaled to [0, 1]. Grayscale uses a single luminance channel.
pub fn image_to_tensor(
    image: &RgbImage,
    grayscale: bool,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    let channels = if grayscale { 1 } else { 3 };
    let (height, width) = (image.height() as usize, image.width() as usize);
    let mut tensor = Tensor::zero::<f32>(&[1, channels, height, width])?;
    let slice = tensor.as_slice_mut::<f32>()?;

    for (x, y, pixel) in image.enumerate_pixels() {
        let offset = y as usize * width + x as usize;
        if grayscale {
            slice[offset] = (luminance(pixel) / 255.0) as f32;
        } else {
            for c in 0..3 {
                slice[c * height * width + offset] = pixel[c] as f32 / 255.0;
            }
        }
    }

    Ok(tensor)
}

pub fn resize_image_to_tensor(
    image: &RgbImage,
    width: u32,
    height: u32,
    grayscale: bool,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    let resized = resize_image(image, width, height);
    image_to_tensor(&resized, grayscale)
}
