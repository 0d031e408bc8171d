//! Size-bounded accumulation of atomic chunks.
//!
//! Chunks are kept whole, in order, until the first one that would push the
//! running total past the budget. From then on every chunk is dropped and the
//! truncation text is appended once at the end, evicting at most one kept
//! chunk to make room for it.

use std::borrow::Cow;
use std::num::NonZeroUsize;

use tracing::debug;
use tracing::trace;

use crate::Measure;
use crate::error::Result;
use crate::error::TruncationError;

/// Running state of one fold; partial accumulators must be combined in input order.
#[derive(Debug, Clone)]
pub struct Accumulator<'a> {
    max_size: usize,
    measure: Measure,
    truncation_text: &'a str,
    kept: Vec<Cow<'a, str>>,
    total: usize,
    dropped: usize,
    truncated: bool,
}

impl<'a> Accumulator<'a> {
    /// Fails when `max_size` cannot hold `truncation_text`, whatever the
    /// chunks turn out to be.
    pub fn new(max_size: usize, measure: Measure, truncation_text: &'a str) -> Result<Self> {
        let marker_size = measure.of(truncation_text);
        if max_size < marker_size {
            return Err(TruncationError::BudgetTooSmall {
                max_size,
                marker_size,
                measure,
            });
        }
        Ok(Self {
            max_size,
            measure,
            truncation_text,
            kept: Vec::new(),
            total: 0,
            dropped: 0,
            truncated: false,
        })
    }

    pub fn add(&mut self, chunk: impl Into<Cow<'a, str>>) {
        if self.truncated {
            self.dropped += 1;
            return;
        }
        let chunk: Cow<'a, str> = chunk.into();
        let size = self.measure.of(&chunk);
        if self.total + size > self.max_size {
            self.truncated = true;
            self.dropped += 1;
            return;
        }
        self.kept.push(chunk);
        self.total += size;
    }

    /// Appends the chunks kept by `other`, which must have folded the input
    /// that directly follows this accumulator's input. Merging out of order
    /// reorders the output.
    ///
    /// If `other` dropped chunks itself, the result is marked truncated even
    /// when everything `other` kept still fits.
    pub fn combine(mut self, other: Accumulator<'a>) -> Self {
        trace!(
            left_kept = self.kept.len(),
            right_kept = other.kept.len(),
            right_truncated = other.truncated,
            "combining accumulators"
        );
        for chunk in other.kept {
            self.add(chunk);
        }
        if other.truncated {
            self.truncated = true;
            self.dropped += other.dropped;
        }
        self
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Measured size of the chunks kept so far.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns the kept chunks, followed by the truncation text when anything
    /// was dropped. When the truncation text does not fit after the last kept
    /// chunk, that one chunk is evicted; no further chunks are removed.
    pub fn finish(mut self) -> Vec<Cow<'a, str>> {
        if !self.truncated {
            return self.kept;
        }

        let marker_size = self.measure.of(self.truncation_text);
        let mut evicted = false;
        if self.total + marker_size > self.max_size
            && let Some(last) = self.kept.pop()
        {
            self.total -= self.measure.of(&last);
            evicted = true;
        }
        debug!(
            max_size = self.max_size,
            measure = %self.measure,
            kept = self.kept.len(),
            dropped = self.dropped + usize::from(evicted),
            evicted,
            "truncated output"
        );
        self.kept.push(Cow::Borrowed(self.truncation_text));
        self.kept
    }
}

/// Folds `chunks` sequentially.
pub fn fold<'a, I>(
    chunks: I,
    max_size: usize,
    measure: Measure,
    truncation_text: &'a str,
) -> Result<Vec<Cow<'a, str>>>
where
    I: IntoIterator,
    I::Item: Into<Cow<'a, str>>,
{
    let mut acc = Accumulator::new(max_size, measure, truncation_text)?;
    for chunk in chunks {
        acc.add(chunk);
    }
    Ok(acc.finish())
}

/// Folds contiguous slices of `chunks` on separate threads and merges the
/// partial results left to right. The output is identical to [`fold`].
pub fn fold_partitioned<'a>(
    chunks: &[Cow<'a, str>],
    partitions: NonZeroUsize,
    max_size: usize,
    measure: Measure,
    truncation_text: &'a str,
) -> Result<Vec<Cow<'a, str>>> {
    // Validate up front so an empty input still reports a bad budget.
    let first = Accumulator::new(max_size, measure, truncation_text)?;
    if chunks.is_empty() {
        return Ok(first.finish());
    }

    let slice_len = chunks.len().div_ceil(partitions.get());
    let partials: Vec<Accumulator<'a>> = std::thread::scope(|scope| {
        let handles: Vec<_> = chunks
            .chunks(slice_len)
            .map(|slice| {
                let mut acc = first.clone();
                scope.spawn(move || {
                    for chunk in slice {
                        acc.add(chunk.clone());
                    }
                    acc
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(acc) => acc,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    let combined = partials.into_iter().fold(first, Accumulator::combine);
    Ok(combined.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn joined(chunks: Vec<Cow<'_, str>>) -> String {
        chunks.concat()
    }

    #[test]
    fn keeps_everything_that_fits_without_marker() {
        let out = fold(["aaa", "bb", "c"], 6, Measure::Bytes, "Truncated").map(joined);
        assert_eq!(out, Ok("aaabbc".to_string()));
    }

    #[test]
    fn evicts_last_kept_chunk_to_fit_marker() {
        let out = fold(
            ["xxxxxxxxxx", "yyyyy", "zzzzzzz"],
            20,
            Measure::Bytes,
            "Truncated",
        )
        .map(joined);
        assert_eq!(out, Ok("xxxxxxxxxxTruncated".to_string()));
    }

    #[test]
    fn no_eviction_when_marker_fits() {
        let out =
            fold(["xxxxxxxxxx", "zzzzzzzzzzzz"], 20, Measure::Bytes, "Truncated").map(joined);
        assert_eq!(out, Ok("xxxxxxxxxxTruncated".to_string()));

        let out = fold(["xxxxx", "yyyyyy", "zzzzzzzzzz"], 20, Measure::Bytes, "Truncated")
            .map(joined);
        assert_eq!(out, Ok("xxxxxyyyyyyTruncated".to_string()));
    }

    #[test]
    fn later_smaller_chunks_are_dropped_after_overflow() {
        let out = fold(["aaaa", "bbbbbbbbbb", "c"], 10, Measure::Bytes, "..").map(joined);
        assert_eq!(out, Ok("aaaa..".to_string()));
    }

    #[test]
    fn eviction_happens_at_most_once() {
        // 10 + 1 kept; the marker still overflows after evicting the 1-byte chunk.
        let out = fold(["aaaaaaaaaa", "b", "cccc"], 12, Measure::Bytes, "Truncated").map(joined);
        assert_eq!(out, Ok("aaaaaaaaaaTruncated".to_string()));
    }

    #[test]
    fn oversized_first_chunk_leaves_only_marker() {
        let out = fold(["this will not fit"], 10, Measure::Bytes, "[cut]").map(joined);
        assert_eq!(out, Ok("[cut]".to_string()));
    }

    #[test]
    fn rejects_budget_smaller_than_marker() {
        let err = fold(Vec::<&str>::new(), 5, Measure::Chars, "Truncated");
        assert_eq!(
            err,
            Err(TruncationError::BudgetTooSmall {
                max_size: 5,
                marker_size: 9,
                measure: Measure::Chars,
            })
        );
    }

    #[test]
    fn budget_equal_to_marker_is_accepted() {
        let out = fold(["abcdefghijk"], 9, Measure::Bytes, "Truncated").map(joined);
        assert_eq!(out, Ok("Truncated".to_string()));
    }

    #[test]
    fn chars_and_bytes_budgets_differ_for_multibyte_text() {
        let chunks = ["ééééé", "ééééé"];
        let by_chars = fold(chunks, 12, Measure::Chars, "~").map(joined);
        assert_eq!(by_chars, Ok("éééééééééé".to_string()));

        let by_bytes = fold(chunks, 12, Measure::Bytes, "~").map(joined);
        assert_eq!(by_bytes, Ok("ééééé~".to_string()));
    }

    #[test]
    fn combine_in_order_matches_sequential_fold() {
        let chunks = ["aaaa", "bbbb", "cc", "dddddd", "e"];
        let sequential = fold(chunks, 12, Measure::Bytes, "..").map(joined);

        let mut left = Accumulator::new(12, Measure::Bytes, "..").expect("budget");
        let mut right = left.clone();
        for chunk in &chunks[..2] {
            left.add(*chunk);
        }
        for chunk in &chunks[2..] {
            right.add(*chunk);
        }
        let combined = joined(left.combine(right).finish());

        assert_eq!(sequential, Ok(combined));
    }

    #[test]
    fn combine_carries_truncation_from_right_side() {
        let mut left = Accumulator::new(20, Measure::Bytes, "..").expect("budget");
        left.add("aa");
        let mut right = Accumulator::new(20, Measure::Bytes, "..").expect("budget");
        right.add("bbbbbbbbbbbbbbbbbb");
        right.add("cccc");
        assert!(right.is_truncated());

        let combined = left.combine(right);
        assert!(combined.is_truncated());
        assert_eq!(combined.total(), 20);
        assert_eq!(joined(combined.finish()), "aa..");
    }

    #[test]
    fn combine_is_order_sensitive() {
        let mut first = Accumulator::new(100, Measure::Bytes, "..").expect("budget");
        first.add("first ");
        let mut second = Accumulator::new(100, Measure::Bytes, "..").expect("budget");
        second.add("second");

        let forward = joined(first.clone().combine(second.clone()).finish());
        let backward = joined(second.combine(first).finish());
        assert_eq!(forward, "first second");
        assert_eq!(backward, "secondfirst ");
    }

    #[test]
    fn partitioned_fold_matches_sequential_fold() {
        let chunks: Vec<Cow<'_, str>> = (0..40)
            .map(|i| Cow::Owned(format!("line {i:02}\n")))
            .collect();
        let sequential = fold(chunks.clone(), 100, Measure::Bytes, "[truncated]\n");
        for partitions in [1, 2, 3, 7, 40, 64] {
            let partitions = NonZeroUsize::new(partitions).expect("non-zero");
            let parallel =
                fold_partitioned(&chunks, partitions, 100, Measure::Bytes, "[truncated]\n");
            assert_eq!(parallel, sequential);
        }
    }

    #[test]
    fn output_stays_within_budget_when_eviction_frees_enough_room() {
        let cases: &[(&[&str], usize)] = &[
            (&[], 5),
            (&["abcdefghij"], 5),
            (&["aaaa", "bbbbbb", "cc"], 9),
            (&["ééé", "ü", "ßßßß"], 12),
            (&["😀😀", "😀😀😀"], 16),
            (&["line one\n", "line two\n", "line three\n"], 20),
            (&["## Heading\n", "```\ncode\n```\n", "tail\n"], 16),
        ];
        for measure in [Measure::Bytes, Measure::Chars] {
            for (chunks, max_size) in cases {
                let out = fold(chunks.iter().copied(), *max_size, measure, "[cut]")
                    .map(joined)
                    .expect("budget holds marker");
                assert!(
                    measure.of(&out) <= *max_size,
                    "{measure} output {out:?} exceeds {max_size}"
                );
            }
        }
    }

    #[test]
    fn partitioned_fold_rejects_small_budget_on_empty_input() {
        let partitions = NonZeroUsize::new(4).expect("non-zero");
        let err = fold_partitioned(&[], partitions, 1, Measure::Bytes, "Truncated");
        assert!(matches!(err, Err(TruncationError::BudgetTooSmall { .. })));
    }
}
