//! Error types for hifdh-core.

use thiserror::Error;

/// Result type alias using TrialError.
pub type Result<T> = std::result::Result<T, TrialError>;

/// Errors from range resolution, segmentation and trial planning.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrialError {
    /// Caller supplied an inconsistent juz span or trial index.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// More trials requested than there are juz to distribute; the slice
    /// for this trial index would contain zero juz.
    #[error("trial {trial_number} of {total_trials} gets no juz in span {start_juz}-{end_juz}")]
    EmptySlice {
        trial_number: u32,
        total_trials: u32,
        start_juz: u8,
        end_juz: u8,
    },

    /// No surah lies in both the slice's juz bounds and the range's
    /// surah bounds.
    #[error("no eligible starting surah in juz {start_juz}-{end_juz}")]
    NoEligibleStart { start_juz: u8, end_juz: u8 },

    /// The eligible positions cannot satisfy even a one-verse trial.
    #[error("cannot collect any verses from surah {surah} ayah {ayah}")]
    InsufficientVerses { surah: u16, ayah: u16 },
}
