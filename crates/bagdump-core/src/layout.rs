//! Binary layout of the embedded quiz-database format.
//!
//! Every record in the database opens with the same chunk signature,
//! `BAG\x1A`, followed by a little-endian length and the ASCII class name of
//! the record (`TestQuestion`, `TestAnswer`, or a 3-byte item tag). Records
//! carry no length fields of their own; a record ends where the next marker
//! begins. Field positions inside a record are fixed offsets.
//!
//! The offsets are specific to the executable build the database was
//! extracted from, and the format carries no version field that would allow
//! detecting which build produced a given file. They are therefore grouped
//! into a [`Layout`] profile rather than free constants: [`Layout::default`]
//! is the observed build, and a caller holding a differently-built executable
//! can construct its own profile.
//!
//! One documented idiosyncrasy: the correct-answer index is stored big-endian
//! while text lengths and the marker length prefixes are little-endian. The
//! mixed byte order is the on-disk format and is preserved per-field.

/// Chunk signature opening every record and content item.
pub const BAG_MARKER: &[u8] = b"BAG\x1A";

/// Marker opening a question record: the chunk signature, a 4-byte
/// little-endian class-name length, and the class name itself.
pub const QUESTION_MARKER: &[u8] = b"BAG\x1A\x0C\x00\x00\x00TestQuestion";

/// Marker opening an answer record, structured like [`QUESTION_MARKER`].
pub const ANSWER_MARKER: &[u8] = b"BAG\x1A\x0A\x00\x00\x00TestAnswer";

/// Item type tag for a code-page text item.
pub const TEXT_TAG: &[u8] = b"TPO";

/// Item type tag for an embedded PNG image item.
pub const PICTURE_TAG: &[u8] = b"GPO";

/// Item type tag for an item with no content.
pub const EMPTY_TAG: &[u8] = b"LPO";

/// Length of an item type tag in bytes.
pub const ITEM_TAG_LEN: usize = 3;

/// Chunk type of the PNG end-of-image chunk, the scan target that delimits
/// an embedded image (the format stores no image length).
pub const PNG_IEND: &[u8] = b"IEND";

/// Bytes of IEND framing (chunk type plus CRC) that belong to the image and
/// follow the scan target.
pub(crate) const PNG_IEND_TRAILER: usize = 8;

/// Byte order of a fixed-width integer field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Most significant byte first
    Big,
    /// Least significant byte first
    Little,
}

impl ByteOrder {
    /// Reads a u32 from four bytes in this order
    pub fn read_u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::Big => u32::from_be_bytes(bytes),
            ByteOrder::Little => u32::from_le_bytes(bytes),
        }
    }
}

/// Field offsets within a question record
#[derive(Debug, Clone)]
pub struct QuestionLayout {
    /// Offset of the 4-byte correct-answer index
    pub correct_answer_offset: usize,
    /// Byte order of the correct-answer index
    pub correct_answer_order: ByteOrder,
    /// Offset of the 1-byte question-body item count
    pub item_count_offset: usize,
    /// Offset at which the first question-body item starts
    pub first_item_offset: usize,
}

/// Field offsets within an answer record
#[derive(Debug, Clone)]
pub struct AnswerLayout {
    /// Offset of the 1-byte item count
    pub item_count_offset: usize,
    /// Offset at which the first item starts
    pub first_item_offset: usize,
}

/// Field offsets within a content item
#[derive(Debug, Clone)]
pub struct ItemLayout {
    /// Offset of the 3-byte ASCII type tag
    pub type_tag_offset: usize,
    /// Offset of the 4-byte little-endian text length
    pub text_length_offset: usize,
    /// Offset at which text payload bytes start
    pub text_data_offset: usize,
    /// Offset at which an embedded image starts
    pub picture_data_offset: usize,
}

/// Complete offset profile for one executable build
#[derive(Debug, Clone)]
pub struct Layout {
    /// Offset of the compressed database within the host executable
    pub database_offset: usize,
    /// Question record offsets
    pub question: QuestionLayout,
    /// Answer record offsets
    pub answer: AnswerLayout,
    /// Content item offsets
    pub item: ItemLayout,
}

impl Layout {
    /// The offsets observed in the known build.
    pub const fn observed() -> Self {
        Self {
            database_offset: 0x70C10,
            question: QuestionLayout {
                correct_answer_offset: 0x48,
                correct_answer_order: ByteOrder::Big,
                item_count_offset: 0xBB,
                first_item_offset: 0xBF,
            },
            answer: AnswerLayout {
                item_count_offset: 0x33,
                first_item_offset: 0x37,
            },
            item: ItemLayout {
                type_tag_offset: 0x8,
                text_length_offset: 0x17,
                text_data_offset: 0x1B,
                picture_data_offset: 0x1F,
            },
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::observed()
    }
}
