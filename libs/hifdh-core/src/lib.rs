//! Core memorization-practice library shared by the trainer application.
//!
//! Provides:
//! - Static canon reference data (114 surahs, 30 juz boundaries)
//! - Range resolution from presets or explicit juz spans
//! - Trial segmentation (juz slices per trial)
//! - Trial planning (random boundary-respecting verse spans)
//! - Snippet derivation and shared types

pub mod canon;
pub mod error;
pub mod range;
pub mod segment;
pub mod trial;
pub mod types;

pub use canon::{global_ayah_number, juz_boundary, surah, SurahInfo, JUZ_COUNT, SURAH_COUNT, TOTAL_VERSES};
pub use error::{Result, TrialError};
pub use range::{resolve_juz_span, resolve_preset};
pub use segment::compute_slice;
pub use trial::{
    generate_span, snippet, RandomSource, ThreadRngSource, DEFAULT_MAX_TRIAL_VERSES,
    DEFAULT_MIN_TRIAL_VERSES,
};
pub use types::{
    JuzBoundary, MemorizationRange, Preset, SurahRange, Trial, TrialRecord, TrialSlice, TrialSpan,
};
