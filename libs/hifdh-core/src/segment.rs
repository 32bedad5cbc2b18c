//! Trial segmentation: partitioning a juz span into near-equal slices,
//! one per trial.

use crate::canon::JUZ_COUNT;
use crate::error::{Result, TrialError};
use crate::types::TrialSlice;

/// Compute the juz slice assigned to one trial.
///
/// The span is split into `total_trials` contiguous slices whose sizes
/// differ by at most one juz: with `base = total_juz / total_trials` and
/// `remainder = total_juz % total_trials`, the first `remainder` trials
/// get `base + 1` juz and the rest get `base`.
///
/// Requesting more trials than there are juz makes some trailing slice
/// empty; that surfaces as [`TrialError::EmptySlice`] rather than being
/// coerced to the last valid juz, since it signals a misconfigured call.
pub fn compute_slice(
    trial_number: u32,
    total_trials: u32,
    start_juz: u8,
    end_juz: u8,
) -> Result<TrialSlice> {
    if start_juz < 1 || end_juz > JUZ_COUNT || start_juz > end_juz {
        return Err(TrialError::InvalidRange(format!(
            "juz span {start_juz}-{end_juz} is not within 1-{JUZ_COUNT}"
        )));
    }
    if total_trials == 0 || trial_number < 1 || trial_number > total_trials {
        return Err(TrialError::InvalidRange(format!(
            "trial {trial_number} of {total_trials} is not a valid index"
        )));
    }

    let total_juz = (end_juz - start_juz + 1) as u32;
    let base = total_juz / total_trials;
    let remainder = total_juz % total_trials;

    let size = base + u32::from(trial_number <= remainder);
    if size == 0 {
        return Err(TrialError::EmptySlice {
            trial_number,
            total_trials,
            start_juz,
            end_juz,
        });
    }

    // Prior slices: (trial_number - 1) of size `base`, of which the first
    // `remainder` carried one extra juz.
    let offset = (trial_number - 1) * base + (trial_number - 1).min(remainder);

    let slice_start = start_juz + offset as u8;
    let slice_end = (slice_start + size as u8 - 1).min(end_juz);

    Ok(TrialSlice { start_juz: slice_start, end_juz: slice_end })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ten_juz_over_three_trials() {
        // base = 3, remainder = 1, so trial 1 gets 4 juz.
        assert_eq!(
            compute_slice(1, 3, 1, 10).unwrap(),
            TrialSlice { start_juz: 1, end_juz: 4 }
        );
        assert_eq!(
            compute_slice(2, 3, 1, 10).unwrap(),
            TrialSlice { start_juz: 5, end_juz: 7 }
        );
        assert_eq!(
            compute_slice(3, 3, 1, 10).unwrap(),
            TrialSlice { start_juz: 8, end_juz: 10 }
        );
    }

    #[test]
    fn slices_cover_span_without_gaps_or_overlaps() {
        for start in [1u8, 5, 16, 26] {
            for end in [start, start + 2, 30.min(start + 9)] {
                let total_juz = (end - start + 1) as u32;
                for trials in 1..=total_juz {
                    let mut expected_next = start;
                    let mut sizes = Vec::new();
                    for n in 1..=trials {
                        let slice = compute_slice(n, trials, start, end).unwrap();
                        assert_eq!(slice.start_juz, expected_next, "gap/overlap at trial {n}");
                        assert!(slice.end_juz >= slice.start_juz);
                        sizes.push((slice.end_juz - slice.start_juz + 1) as u32);
                        expected_next = slice.end_juz + 1;
                    }
                    assert_eq!(expected_next, end + 1, "union must equal the span");
                    let min = sizes.iter().min().unwrap();
                    let max = sizes.iter().max().unwrap();
                    assert!(max - min <= 1, "slice sizes differ by more than one juz");
                }
            }
        }
    }

    #[test]
    fn more_trials_than_juz_fails() {
        // 3 juz over 5 trials: the last two trials have nothing to cover.
        let results: Vec<_> = (1..=5).map(|n| compute_slice(n, 5, 1, 3)).collect();
        assert!(results[..3].iter().all(|r| r.is_ok()));
        assert!(matches!(results[3], Err(TrialError::EmptySlice { trial_number: 4, .. })));
        assert!(matches!(results[4], Err(TrialError::EmptySlice { trial_number: 5, .. })));
    }

    #[test]
    fn single_trial_takes_whole_span() {
        assert_eq!(
            compute_slice(1, 1, 26, 30).unwrap(),
            TrialSlice { start_juz: 26, end_juz: 30 }
        );
    }

    #[test]
    fn rejects_bad_indices_and_spans() {
        assert!(matches!(compute_slice(0, 3, 1, 10), Err(TrialError::InvalidRange(_))));
        assert!(matches!(compute_slice(4, 3, 1, 10), Err(TrialError::InvalidRange(_))));
        assert!(matches!(compute_slice(1, 0, 1, 10), Err(TrialError::InvalidRange(_))));
        assert!(matches!(compute_slice(1, 1, 10, 5), Err(TrialError::InvalidRange(_))));
        assert!(matches!(compute_slice(1, 1, 0, 5), Err(TrialError::InvalidRange(_))));
        assert!(matches!(compute_slice(1, 1, 1, 31), Err(TrialError::InvalidRange(_))));
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let a = compute_slice(7, 15, 1, 30).unwrap();
        let b = compute_slice(7, 15, 1, 30).unwrap();
        assert_eq!(a, b);
    }
}
