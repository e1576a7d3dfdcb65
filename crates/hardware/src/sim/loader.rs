//! Program and data image loading.
//!
//! This module reads memory images from disk. It performs:
//! 1. **Format selection:** Files ending in `.hex` are parsed as text, anything
//!    else is taken as a raw little-endian binary.
//! 2. **Hex parsing:** `$readmemh`-style input with one 32-bit word per token,
//!    `//` comments, blank lines and `@addr` word-address markers.
//! 3. **Bounds:** Images are capped at [`MAX_IMAGE_BYTES`]; placing them in
//!    a memory is checked again by [`System`](crate::soc::System).

use std::fs;
use std::path::Path;

use crate::common::error::LoadError;

/// Largest image the loader will materialize (16 MiB).
pub const MAX_IMAGE_BYTES: usize = 16 * 1024 * 1024;

/// Reads the image at `path`.
///
/// # Errors
///
/// * [`LoadError::Io`] if the file cannot be read.
/// * [`LoadError::ParseHex`] for a malformed `.hex` token.
/// * [`LoadError::TooLarge`] if the image exceeds [`MAX_IMAGE_BYTES`].
pub fn load_image(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    let is_hex = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("hex"));

    let image = if is_hex {
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse_hex(&text, path)?
    } else {
        fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?
    };

    if image.len() > MAX_IMAGE_BYTES {
        return Err(too_large(image.len()));
    }
    tracing::debug!(path = %path.display(), bytes = image.len(), "read image");
    Ok(image)
}

/// Parses `$readmemh`-style text into little-endian bytes.
///
/// `path` only labels errors.
///
/// # Errors
///
/// [`LoadError::ParseHex`] for a token that is not a hex word or marker, and
/// [`LoadError::TooLarge`] if a marker or word lands past [`MAX_IMAGE_BYTES`].
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use pmpsim_core::sim::loader::parse_hex;
///
/// let text = "00000013 // nop\n@2\n0000_0513\n";
/// let bytes = parse_hex(text, Path::new("prog.hex")).unwrap();
/// assert_eq!(bytes.len(), 12);
/// assert_eq!(&bytes[0..4], &[0x13, 0, 0, 0]);
/// assert_eq!(&bytes[8..12], &[0x13, 0x05, 0, 0]);
/// ```
pub fn parse_hex(text: &str, path: &Path) -> Result<Vec<u8>, LoadError> {
    let mut image = Vec::new();
    let mut cursor = 0usize;

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.split("//").next().unwrap_or("");
        for token in line.split_whitespace() {
            let bad_token = || LoadError::ParseHex {
                path: path.to_path_buf(),
                line: index + 1,
                token: token.to_string(),
            };

            if let Some(addr) = token.strip_prefix('@') {
                let word = u32::from_str_radix(&addr.replace('_', ""), 16).map_err(|_| bad_token())?;
                cursor = word as usize * 4;
                if cursor > MAX_IMAGE_BYTES {
                    return Err(too_large(cursor));
                }
                continue;
            }

            let word = u32::from_str_radix(&token.replace('_', ""), 16).map_err(|_| bad_token())?;
            let end = cursor + 4;
            if end > MAX_IMAGE_BYTES {
                return Err(too_large(end));
            }
            if image.len() < end {
                image.resize(end, 0);
            }
            image[cursor..end].copy_from_slice(&word.to_le_bytes());
            cursor = end;
        }
    }
    Ok(image)
}

fn too_large(len: usize) -> LoadError {
    LoadError::TooLarge {
        len,
        capacity: MAX_IMAGE_BYTES,
        target: "image buffer",
    }
}
