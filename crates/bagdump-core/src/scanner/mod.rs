//! Signature scanning and record segmentation.
//!
//! The database carries no record table: question and answer records are
//! variable length and delimited only by the recurring byte markers that open
//! them. This module provides the one generic routine that turns marker
//! occurrences into record ranges, reused at every nesting level:
//!
//! 1. Find every occurrence of the marker via consecutive non-overlapping
//!    search (each search resumes strictly after the end of the previous hit)
//! 2. Derive ranges: each record spans from its marker to the next marker,
//!    and the final record runs to the end of the buffer
//!
//! The produced ranges are contiguous, non-overlapping, preserve on-disk
//! order, and cover `[first_marker, len)`. Zero occurrences produce an empty
//! vec; whether that is an error is the caller's call.
//!
//! The routine knows nothing about what a record's fields mean.

use std::ops::Range;
use tracing::trace;

/// Find the next occurrence of `marker` at or after `from`.
pub fn find_after(data: &[u8], marker: &[u8], from: usize) -> Option<usize> {
    if marker.is_empty() || from >= data.len() {
        return None;
    }
    data[from..]
        .windows(marker.len())
        .position(|window| window == marker)
        .map(|pos| from + pos)
}

/// Find every non-overlapping occurrence of `marker` at or after `from`,
/// in order of appearance.
pub fn find_markers(data: &[u8], marker: &[u8], from: usize) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut pos = from;
    while let Some(found) = find_after(data, marker, pos) {
        offsets.push(found);
        pos = found + marker.len();
    }
    offsets
}

/// Split `data` into consecutive record ranges delimited by `marker`.
///
/// Each range starts at a marker occurrence and ends at the next occurrence;
/// the last range extends to the end of the buffer. Bytes before the first
/// marker belong to no range.
pub fn segment(data: &[u8], marker: &[u8]) -> Vec<Range<usize>> {
    let offsets = find_markers(data, marker, 0);
    trace!("found {} marker occurrences in {} bytes", offsets.len(), data.len());

    let mut ranges = Vec::with_capacity(offsets.len());
    for (i, &start) in offsets.iter().enumerate() {
        let end = offsets.get(i + 1).copied().unwrap_or(data.len());
        ranges.push(start..end);
    }
    ranges
}
