//! Question record decoding.

use crate::error::{Error, Result};
use crate::layout::{Layout, ANSWER_MARKER};
use crate::scanner;
use tracing::trace;

use super::{Answer, ContentItem};

/// One question with its choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// The question body, in on-disk order
    pub body: Vec<ContentItem>,
    /// The selectable answers, in on-disk (display) order
    pub answers: Vec<Answer>,
    /// Zero-based index of the correct answer.
    ///
    /// Always in bounds: decoding fails rather than producing an
    /// out-of-range index.
    pub correct_answer: usize,
}

impl Question {
    /// Decode one question record.
    ///
    /// `data` spans the record as produced by segmentation; `base` is its
    /// absolute offset within the database.
    pub(crate) fn decode(data: &[u8], base: usize, layout: &Layout) -> Result<Self> {
        let index_bytes = super::read_u32_bytes(
            data,
            layout.question.correct_answer_offset,
            base,
            "correct-answer index",
        )?;
        let correct_answer = layout.question.correct_answer_order.read_u32(index_bytes) as usize;

        let body = super::decode_items(
            data,
            base,
            layout.question.item_count_offset,
            layout.question.first_item_offset,
            &layout.item,
        )?;

        let ranges = scanner::segment(data, ANSWER_MARKER);
        if ranges.is_empty() {
            return Err(Error::format(base, "question record contains no answer records"));
        }
        trace!("question at {:#x}: {} answer records", base, ranges.len());

        let mut answers = Vec::with_capacity(ranges.len());
        for range in ranges {
            answers.push(Answer::decode(&data[range.clone()], base + range.start, layout)?);
        }

        if correct_answer >= answers.len() {
            return Err(Error::format(
                base + layout.question.correct_answer_offset,
                format!(
                    "correct-answer index {correct_answer} out of bounds for {} answers",
                    answers.len()
                ),
            ));
        }

        Ok(Self {
            body,
            answers,
            correct_answer,
        })
    }

    /// Returns the correct answer.
    pub fn correct(&self) -> &Answer {
        &self.answers[self.correct_answer]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::testdata::{answer_record, question_record, text_item};
    use pretty_assertions::assert_eq;

    fn two_answers() -> Vec<Vec<u8>> {
        vec![
            answer_record(&[text_item(b"yes")]),
            answer_record(&[text_item(b"no")]),
        ]
    }

    #[test]
    fn test_decodes_body_answers_and_index() {
        let record = question_record(&[text_item(b"sure?")], &two_answers(), 0);
        let question = Question::decode(&record, 0, &Layout::observed()).unwrap();

        assert_eq!(question.body, vec![ContentItem::Text("sure?".into())]);
        assert_eq!(question.answers.len(), 2);
        assert_eq!(question.correct_answer, 0);
        assert_eq!(question.correct().items, vec![ContentItem::Text("yes".into())]);
    }

    #[test]
    fn test_multi_item_body() {
        let record = question_record(
            &[text_item(b"part one"), text_item(b"part two")],
            &two_answers(),
            1,
        );
        let question = Question::decode(&record, 0, &Layout::observed()).unwrap();
        assert_eq!(
            question.body,
            vec![
                ContentItem::Text("part one".into()),
                ContentItem::Text("part two".into()),
            ]
        );
    }

    #[test]
    fn test_index_of_last_answer_succeeds() {
        let record = question_record(&[text_item(b"q")], &two_answers(), 1);
        let question = Question::decode(&record, 0, &Layout::observed()).unwrap();
        assert_eq!(question.correct_answer, 1);
    }

    #[test]
    fn test_index_equal_to_answer_count_fails() {
        let record = question_record(&[text_item(b"q")], &two_answers(), 2);
        let err = Question::decode(&record, 0x1000, &Layout::observed()).unwrap_err();
        match err {
            Error::Format { offset, details } => {
                assert_eq!(
                    offset,
                    0x1000 + Layout::observed().question.correct_answer_offset
                );
                assert!(details.contains("out of bounds"));
            }
            other => panic!("expected Format, got {other:?}"),
        }
    }

    #[test]
    fn test_no_answer_records_fails() {
        let record = question_record(&[text_item(b"q")], &[], 0);
        let err = Question::decode(&record, 0x2000, &Layout::observed()).unwrap_err();
        assert!(matches!(err, Error::Format { offset: 0x2000, .. }));
    }

    #[test]
    fn test_index_is_big_endian_in_observed_build() {
        // 0x00000001 big-endian; a little-endian read would see 0x01000000
        // and fail the bounds check.
        let record = question_record(&[text_item(b"q")], &two_answers(), 1);
        let offset = Layout::observed().question.correct_answer_offset;
        assert_eq!(&record[offset..offset + 4], &[0, 0, 0, 1]);
    }
}
