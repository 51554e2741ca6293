//! WebP decoding and PNG encoding.

use crate::error::{ConvertError, ConvertResult};
use crate::media::{TARGET_MEDIA_TYPE, png_file_name};
use crate::platform::BoxFuture;
use image::ImageFormat;

/// A decoded-and-re-encoded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodedImage {
    /// PNG bytes.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Converts WebP bytes into PNG bytes.
pub trait Transcoder {
    fn transcode(&self, webp: Vec<u8>) -> BoxFuture<'static, ConvertResult<TranscodedImage>>;
}

/// Transcoder backed by the `image` WebP decoder and the `png` encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageTranscoder;

impl ImageTranscoder {
    pub fn new() -> Self {
        Self
    }
}

impl Transcoder for ImageTranscoder {
    fn transcode(&self, webp: Vec<u8>) -> BoxFuture<'static, ConvertResult<TranscodedImage>> {
        Box::pin(async move { webp_to_png(&webp) })
    }
}

/// Decode a WebP image and re-encode it as 8-bit RGBA PNG.
pub fn webp_to_png(webp: &[u8]) -> ConvertResult<TranscodedImage> {
    let decoded = image::load_from_memory_with_format(webp, ImageFormat::WebP)?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ConvertError::EmptyImage);
    }

    let data = encode_png(rgba.as_raw(), width, height)?;
    log::debug!("Transcoded {}x{} WebP ({} bytes) to PNG ({} bytes)", width, height, webp.len(), data.len());

    Ok(TranscodedImage { data, width, height })
}

/// Encode RGBA pixel data to PNG bytes.
fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> ConvertResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(rgba_data)?;
    }

    Ok(png_data)
}

/// The PNG produced for one eligible item, ready to be wrapped in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodedAsset {
    pub name: String,
    pub media_type: &'static str,
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl TranscodedAsset {
    /// Pair a transcoded image with the name derived from its source file.
    pub fn new(source_name: &str, image: TranscodedImage) -> Self {
        Self {
            name: png_file_name(source_name),
            media_type: TARGET_MEDIA_TYPE,
            data: image.data,
            width: image.width,
            height: image.height,
        }
    }
}
