// piiguard-core/src/redact/image.rs
//! Blurs the pixel regions of OCR word boxes that belong to detected PII.
//!
//! A box is tied to a match when its text is a substring of the match value.
//! This is a coarse bridge between per-token geometry and character spans:
//! short tokens can be contained in unrelated longer values.
//!
//! License: MIT OR APACHE 2.0

use std::io::Cursor;

use ::image::{imageops, DynamicImage, Pixel};
use imageproc::definitions::{Clamp, Image};
use imageproc::filter::gaussian_blur_f32;
use imageproc::rect::Rect;
use log::{debug, info};

use crate::config::DEFAULT_BLUR_SIGMA;
use crate::errors::PiiGuardError;
use crate::ocr::WordBox;
use crate::pii_match::PiiMatch;

#[derive(Debug, Clone, Copy)]
pub struct ImageRedactor {
    sigma: f32,
}

impl ImageRedactor {
    /// `sigma` must be positive. 4.1 matches a 25x25 Gaussian kernel.
    pub fn new(sigma: f32) -> Self {
        Self { sigma }
    }

    /// Reliable boxes whose text occurs inside some match value, in box
    /// order, each box at most once.
    pub fn marked_boxes<'a>(word_boxes: &'a [WordBox], matches: &[PiiMatch]) -> Vec<&'a WordBox> {
        word_boxes
            .iter()
            .filter(|b| b.is_reliable() && !b.text.trim().is_empty())
            .filter(|b| matches.iter().any(|m| m.value.contains(b.text.as_str())))
            .collect()
    }

    /// Clips a box to the image. `None` when nothing of it is inside.
    ///
    /// Edges are computed in `i64` so OCR geometry anywhere in the `i32`
    /// range clips instead of overflowing.
    pub fn clip_to_image(word_box: &WordBox, image_width: u32, image_height: u32) -> Option<Rect> {
        if word_box.width <= 0 || word_box.height <= 0 {
            return None;
        }
        let (x, y) = (i64::from(word_box.x), i64::from(word_box.y));
        let left = x.max(0);
        let top = y.max(0);
        let right = (x + i64::from(word_box.width)).min(i64::from(image_width));
        let bottom = (y + i64::from(word_box.height)).min(i64::from(image_height));
        if right <= left || bottom <= top {
            return None;
        }

        let width = u32::try_from(right - left).ok()?;
        let height = u32::try_from(bottom - top).ok()?;
        Some(Rect::at(i32::try_from(left).ok()?, i32::try_from(top).ok()?).of_size(width, height))
    }

    /// Returns the image with every marked region blurred, re-encoded in its
    /// original format.
    ///
    /// Empty `word_boxes` or `matches` return the input bytes untouched, as
    /// does an image in which no box could be placed.
    pub fn redact(
        &self,
        image_bytes: &[u8],
        word_boxes: &[WordBox],
        matches: &[PiiMatch],
    ) -> Result<Vec<u8>, PiiGuardError> {
        if word_boxes.is_empty() || matches.is_empty() {
            return Ok(image_bytes.to_vec());
        }

        let format = ::image::guess_format(image_bytes).map_err(PiiGuardError::Decode)?;
        if !format.writing_enabled() {
            return Err(PiiGuardError::UnsupportedImageFormat);
        }
        let mut decoded = ::image::load_from_memory_with_format(image_bytes, format).map_err(PiiGuardError::Decode)?;
        let (width, height) = (decoded.width(), decoded.height());

        let marked = Self::marked_boxes(word_boxes, matches);
        let regions: Vec<Rect> = marked
            .iter()
            .filter_map(|b| Self::clip_to_image(b, width, height))
            .collect();

        debug!(
            "{} of {} word box(es) marked, {} inside the {}x{} image.",
            marked.len(),
            word_boxes.len(),
            regions.len(),
            width,
            height
        );

        if regions.is_empty() {
            return Ok(image_bytes.to_vec());
        }

        // Blur in the decoded pixel layout so depth and channels survive re-encoding.
        match &mut decoded {
            DynamicImage::ImageLuma8(buf) => blur_regions(buf, &regions, self.sigma),
            DynamicImage::ImageLumaA8(buf) => blur_regions(buf, &regions, self.sigma),
            DynamicImage::ImageRgb8(buf) => blur_regions(buf, &regions, self.sigma),
            DynamicImage::ImageRgba8(buf) => blur_regions(buf, &regions, self.sigma),
            DynamicImage::ImageLuma16(buf) => blur_regions(buf, &regions, self.sigma),
            DynamicImage::ImageLumaA16(buf) => blur_regions(buf, &regions, self.sigma),
            DynamicImage::ImageRgb16(buf) => blur_regions(buf, &regions, self.sigma),
            DynamicImage::ImageRgba16(buf) => blur_regions(buf, &regions, self.sigma),
            DynamicImage::ImageRgb32F(buf) => blur_regions(buf, &regions, self.sigma),
            DynamicImage::ImageRgba32F(buf) => blur_regions(buf, &regions, self.sigma),
            other => {
                let mut rgba = other.to_rgba8();
                blur_regions(&mut rgba, &regions, self.sigma);
                *other = DynamicImage::ImageRgba8(rgba);
            }
        }

        let mut buffer = Cursor::new(Vec::new());
        decoded.write_to(&mut buffer, format).map_err(PiiGuardError::Encode)?;
        info!("Blurred {} region(s) in {:?} image.", regions.len(), format);
        Ok(buffer.into_inner())
    }
}

impl Default for ImageRedactor {
    fn default() -> Self {
        Self::new(DEFAULT_BLUR_SIGMA)
    }
}

fn blur_regions<P>(canvas: &mut Image<P>, regions: &[Rect], sigma: f32)
where
    P: Pixel + 'static,
    <P as Pixel>::Subpixel: Into<f32> + Clamp<f32> + 'static,
{
    for region in regions {
        let (x, y) = (region.left() as u32, region.top() as u32);
        let patch = imageops::crop_imm(&*canvas, x, y, region.width(), region.height()).to_image();
        let blurred = gaussian_blur_f32(&patch, sigma);
        imageops::replace(&mut *canvas, &blurred, i64::from(x), i64::from(y));
    }
}
