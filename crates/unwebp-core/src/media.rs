//! Media types and file naming.

/// Media type of the payloads we convert.
pub const SOURCE_MEDIA_TYPE: &str = "image/webp";

/// Media type of the converted payload.
pub const TARGET_MEDIA_TYPE: &str = "image/png";

const SOURCE_EXTENSION: &str = ".webp";
const TARGET_EXTENSION: &str = ".png";

/// Derive the converted file name.
///
/// Only an exact, lowercase `.webp` suffix is replaced; any other name is
/// returned unchanged.
pub fn png_file_name(name: &str) -> String {
    match name.strip_suffix(SOURCE_EXTENSION) {
        Some(stem) => format!("{}{}", stem, TARGET_EXTENSION),
        None => name.to_string(),
    }
}
