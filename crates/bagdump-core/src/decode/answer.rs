//! Answer record decoding.

use crate::error::Result;
use crate::layout::Layout;

use super::ContentItem;

/// One selectable choice of a question.
///
/// Observed databases hold a single item per answer, but the format declares
/// a count, so mixed text/image answers decode as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// The answer's content, in on-disk order
    pub items: Vec<ContentItem>,
}

impl Answer {
    /// Decode one answer record.
    ///
    /// `data` spans the record as produced by segmentation; `base` is its
    /// absolute offset within the database.
    pub(crate) fn decode(data: &[u8], base: usize, layout: &Layout) -> Result<Self> {
        let items = super::decode_items(
            data,
            base,
            layout.answer.item_count_offset,
            layout.answer.first_item_offset,
            &layout.item,
        )?;
        Ok(Self { items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::testdata::{answer_record, picture_item, text_item, tiny_png};
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_text_item() {
        let record = answer_record(&[text_item(b"42")]);
        let answer = Answer::decode(&record, 0, &Layout::observed()).unwrap();
        assert_eq!(answer.items, vec![ContentItem::Text("42".into())]);
    }

    #[test]
    fn test_items_decode_in_order() {
        let record = answer_record(&[
            text_item(b"see figure:"),
            picture_item(&tiny_png()),
        ]);
        let answer = Answer::decode(&record, 0, &Layout::observed()).unwrap();
        assert_eq!(
            answer.items,
            vec![
                ContentItem::Text("see figure:".into()),
                ContentItem::Picture(tiny_png()),
            ]
        );
    }

    #[test]
    fn test_declared_count_exceeding_record_is_truncated() {
        let mut record = answer_record(&[text_item(b"only one")]);
        record[Layout::observed().answer.item_count_offset] = 3;

        let err = Answer::decode(&record, 0x500, &Layout::observed()).unwrap_err();
        assert!(matches!(err, Error::TruncatedRecord { .. }));
    }

    #[test]
    fn test_record_shorter_than_count_field() {
        let record = &answer_record(&[])[..0x20];
        let err = Answer::decode(record, 0, &Layout::observed()).unwrap_err();
        assert!(matches!(err, Error::TruncatedRecord { .. }));
    }
}
