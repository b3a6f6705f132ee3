//! Capped cartesian product over segments.

use super::segment::Segment;

/// Punctuation that attaches to the preceding word without a space.
const ATTACHING_PUNCT: [&str; 6] = [",", ".", ";", ":", "!", "?"];

/// Lazily yields space-joined combinations of one choice per segment,
/// rightmost segment varying fastest, stopping after `cap` strings.
///
/// Restartable only by constructing a new iterator over the same inputs.
#[derive(Debug, Clone)]
pub struct Variants<'a> {
    segments: &'a [Segment],
    /// Choice index per segment; `None` once every combination is emitted.
    cursor: Option<Vec<usize>>,
    remaining: usize,
}

impl<'a> Variants<'a> {
    pub fn new(segments: &'a [Segment], cap: usize) -> Self {
        let exhausted = segments.is_empty() || segments.iter().any(Vec::is_empty);
        Self {
            segments,
            cursor: (!exhausted).then(|| vec![0; segments.len()]),
            remaining: cap,
        }
    }

    fn render(&self, cursor: &[usize]) -> String {
        let mut out = String::new();
        for (segment, &choice) in self.segments.iter().zip(cursor) {
            let piece = segment[choice].as_str();
            if !out.is_empty() && !ATTACHING_PUNCT.contains(&piece) {
                out.push(' ');
            }
            out.push_str(piece);
        }
        out
    }

    /// Odometer step; returns false after the last combination.
    fn advance(segments: &[Segment], cursor: &mut [usize]) -> bool {
        for (pos, segment) in cursor.iter_mut().zip(segments).rev() {
            *pos += 1;
            if *pos < segment.len() {
                return true;
            }
            *pos = 0;
        }
        false
    }
}

impl Iterator for Variants<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.remaining == 0 {
            return None;
        }
        let cursor = self.cursor.as_mut()?;
        let current = cursor.clone();
        if !Self::advance(self.segments, cursor) {
            self.cursor = None;
        }
        self.remaining -= 1;
        Some(self.render(&current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.cursor.is_none() {
            return (0, Some(0));
        }
        (0, Some(self.remaining))
    }
}

/// Number of strings `Variants` will produce, without producing them.
pub fn variant_count(segments: &[Segment], cap: usize) -> usize {
    if segments.is_empty() {
        return 0;
    }
    segments
        .iter()
        .try_fold(1usize, |acc, s| acc.checked_mul(s.len()))
        .map_or(cap, |total| total.min(cap))
}
