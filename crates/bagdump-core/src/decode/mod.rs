//! Record decoding module.
//!
//! Decoding follows the nesting of the format itself:
//!
//! 1. The database is segmented into question records by the question marker
//! 2. Each question record decodes its body items, then is segmented into
//!    answer records by the answer marker
//! 3. Each answer record decodes its items
//! 4. Each item classifies itself by a 3-byte tag and decodes as text,
//!    picture, or empty
//!
//! Items inside a record are located the same way records are: the format
//! stores no "next item" offsets, so after decoding one item the decoder
//! scans forward for the next occurrence of the shared chunk signature.
//!
//! All decoded content is copied out of the database buffer; nothing borrows
//! from it once decoding returns.

mod answer;
mod item;
mod question;

pub use answer::Answer;
pub use item::ContentItem;
pub use question::Question;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::layout::{self, ItemLayout, Layout};
use crate::scanner;
use std::path::Path;
use tracing::{debug, trace};

/// The decoded content of one database, in on-disk order.
///
/// On-disk order is display order, so it is preserved throughout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSet {
    /// The decoded questions
    pub questions: Vec<Question>,
}

impl QuestionSet {
    /// Returns the number of questions
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Returns true if the set holds no questions
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Iterates the questions in on-disk order
    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

/// Decoder for one layout profile.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    layout: Layout,
}

impl Decoder {
    /// Creates a decoder for the default (observed-build) layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder for a custom layout profile
    pub fn with_layout(layout: Layout) -> Self {
        Self { layout }
    }

    /// Returns the layout profile this decoder uses
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Extracts the database from an executable and decodes it.
    pub fn decode_file(&self, path: impl AsRef<Path>) -> Result<QuestionSet> {
        let database = Database::from_exe_file(path, &self.layout)?;
        self.decode(&database)
    }

    /// Decodes an already-extracted database into a question set.
    ///
    /// Fails with [`Error::Format`] if the database contains no question
    /// records at all.
    pub fn decode(&self, database: &Database) -> Result<QuestionSet> {
        let data = database.as_bytes();
        debug!("decoding database '{}' ({} bytes)", database.name, data.len());

        let ranges = scanner::segment(data, layout::QUESTION_MARKER);
        if ranges.is_empty() {
            return Err(Error::format(0, "no question records found"));
        }
        debug!("found {} question records", ranges.len());

        let mut questions = Vec::with_capacity(ranges.len());
        for range in ranges {
            trace!("decoding question record at {:#x}..{:#x}", range.start, range.end);
            questions.push(Question::decode(
                &data[range.clone()],
                range.start,
                &self.layout,
            )?);
        }

        Ok(QuestionSet { questions })
    }
}

/// Decode the database embedded in an executable using the default layout.
///
/// This is a convenience function wrapping [`Decoder::decode_file`].
pub fn decode_file(path: impl AsRef<Path>) -> Result<QuestionSet> {
    Decoder::new().decode_file(path)
}

/// Read `len` bytes at `offset` within a record slice.
///
/// `base` is the record's absolute offset within the database, used only for
/// error reporting.
pub(crate) fn read_slice<'a>(
    data: &'a [u8],
    offset: usize,
    len: usize,
    base: usize,
    what: &str,
) -> Result<&'a [u8]> {
    offset
        .checked_add(len)
        .and_then(|end| data.get(offset..end))
        .ok_or_else(|| Error::truncated(base + offset, format!("{what}: need {len} bytes")))
}

/// Read a 4-byte field at `offset` within a record slice.
pub(crate) fn read_u32_bytes(
    data: &[u8],
    offset: usize,
    base: usize,
    what: &str,
) -> Result<[u8; 4]> {
    let bytes = read_slice(data, offset, 4, base, what)?;
    Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Decode a declared number of content items from a record.
///
/// The count is a single byte at `count_offset`; the first item starts at
/// `first_item_offset`; each subsequent item is located by scanning for the
/// next chunk signature strictly after the previous item's start.
pub(crate) fn decode_items(
    data: &[u8],
    base: usize,
    count_offset: usize,
    first_item_offset: usize,
    item_layout: &ItemLayout,
) -> Result<Vec<ContentItem>> {
    let count = *data
        .get(count_offset)
        .ok_or_else(|| Error::truncated(base + count_offset, "item count: need 1 byte"))?
        as usize;
    trace!("record at {:#x} declares {} items", base, count);

    let mut items = Vec::with_capacity(count);
    let mut pos = first_item_offset;
    for i in 0..count {
        if pos >= data.len() {
            return Err(Error::truncated(
                base + data.len(),
                format!("item {} of {count} starts past the end of the record", i + 1),
            ));
        }
        items.push(item::decode_item(&data[pos..], base + pos, item_layout)?);

        if i + 1 < count {
            pos = scanner::find_after(data, layout::BAG_MARKER, pos + layout::BAG_MARKER.len())
                .ok_or_else(|| {
                    Error::truncated(
                        base + pos,
                        format!("no marker for item {} of {count}", i + 2),
                    )
                })?;
        }
    }
    Ok(items)
}
