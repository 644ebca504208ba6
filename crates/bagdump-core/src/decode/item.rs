//! Content item decoding.
//!
//! An item is the smallest decoded unit: a chunk opened by the shared
//! signature whose 3-byte ASCII class tag selects one of three layouts.
//!
//! - Text: a 4-byte little-endian length followed by code-page bytes. All
//!   text in the format uses the windows-1251 code page, not UTF-8.
//! - Picture: a complete PNG file starting at a fixed offset. The format
//!   stores no image length; the image ends 8 bytes after the `IEND` chunk
//!   type (type plus CRC), located by scanning.
//! - Empty: no payload.
//!
//! The decoder reports no consumed length. Items are variable length and
//! self-delimited only by the next occurrence of the chunk signature, so the
//! caller re-scans to find the following item.

use crate::error::{Error, Result};
use crate::layout::{self, ItemLayout};
use crate::scanner;
use encoding_rs::WINDOWS_1251;
use tracing::trace;

/// One decoded content unit of a question body or an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentItem {
    /// Decoded code-page text
    Text(String),
    /// A complete PNG image, valid as a standalone file
    Picture(Vec<u8>),
    /// An item with no content
    Empty,
}

impl ContentItem {
    /// Returns the text content, if this is a text item
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentItem::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the image bytes, if this is a picture item
    pub fn as_picture(&self) -> Option<&[u8]> {
        match self {
            ContentItem::Picture(bytes) => Some(bytes),
            _ => None,
        }
    }
}

/// Decode the item starting at the beginning of `data`.
///
/// `data` runs from the item's chunk signature to the end of the enclosing
/// record; `base` is the item's absolute offset, used in errors.
pub(crate) fn decode_item(data: &[u8], base: usize, offsets: &ItemLayout) -> Result<ContentItem> {
    let tag = super::read_slice(
        data,
        offsets.type_tag_offset,
        layout::ITEM_TAG_LEN,
        base,
        "item type tag",
    )?;

    if tag == layout::TEXT_TAG {
        decode_text(data, base, offsets)
    } else if tag == layout::PICTURE_TAG {
        decode_picture(data, base, offsets)
    } else if tag == layout::EMPTY_TAG {
        trace!("empty item at {:#x}", base);
        Ok(ContentItem::Empty)
    } else {
        Err(Error::unknown_item_type(base + offsets.type_tag_offset, tag))
    }
}

fn decode_text(data: &[u8], base: usize, offsets: &ItemLayout) -> Result<ContentItem> {
    // Text lengths are little-endian even though the correct-answer index in
    // the enclosing question is big-endian; the mixed order is the on-disk
    // format.
    let len_bytes = super::read_u32_bytes(data, offsets.text_length_offset, base, "text length")?;
    let text_len = u32::from_le_bytes(len_bytes) as usize;

    let raw = super::read_slice(data, offsets.text_data_offset, text_len, base, "text payload")?;
    let (decoded, _, _) = WINDOWS_1251.decode(raw);
    let mut text = decoded.into_owned();

    // Fixed-width padding leaves exactly one trailing space; drop only that
    // one character, never more.
    if text.ends_with(' ') {
        text.pop();
    }

    trace!("text item at {:#x}: {} bytes", base, text_len);
    Ok(ContentItem::Text(text))
}

fn decode_picture(data: &[u8], base: usize, offsets: &ItemLayout) -> Result<ContentItem> {
    let iend = scanner::find_after(data, layout::PNG_IEND, 0)
        .ok_or_else(|| Error::truncated(base, "image end chunk not found"))?;
    let end = iend + layout::PNG_IEND_TRAILER;
    let start = offsets.picture_data_offset;

    if start > end || end > data.len() {
        return Err(Error::truncated(
            base + start,
            "image payload exceeds the record",
        ));
    }

    trace!("picture item at {:#x}: {} bytes", base, end - start);
    Ok(ContentItem::Picture(data[start..end].to_vec()))
}
