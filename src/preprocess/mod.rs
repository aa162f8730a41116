pub mod encoding;
pub mod image;

pub use encoding::decode_base64_image;
pub use image::{image_bytes_to_rgb_input, Normalization, INPUT_HEIGHT, INPUT_PIXELS, INPUT_WIDTH};
