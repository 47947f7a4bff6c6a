//! Redaction in the two coordinate spaces: character spans over text and
//! pixel rectangles over an image.

pub mod image;
pub mod text;

pub use self::image::ImageRedactor;
pub use self::text::{TextRedactor, DEFAULT_MASK_CHAR};
