//! Trial generation: plans a span in the core library, then enriches it
//! with verse text from a provider.

use hifdh_core::{
    canon, generate_span, snippet, MemorizationRange, RandomSource, Trial, TrialError, TrialSlice,
    DEFAULT_MAX_TRIAL_VERSES, DEFAULT_MIN_TRIAL_VERSES,
};
use tracing::warn;

use crate::providers::TextProvider;

/// Verse-length bounds for a trial.
#[derive(Debug, Clone, Copy)]
pub struct TrialConfig {
    pub min_verses: u32,
    pub max_verses: u32,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            min_verses: DEFAULT_MIN_TRIAL_VERSES,
            max_verses: DEFAULT_MAX_TRIAL_VERSES,
        }
    }
}

/// Generate one complete trial.
///
/// Span planning failures are hard errors; provider failures are not. A
/// verse the provider cannot supply degrades to an empty snippet and a 0
/// global number, so an offline device can still practice.
pub async fn generate_trial(
    range: &MemorizationRange,
    slice: TrialSlice,
    config: TrialConfig,
    rng: &mut dyn RandomSource,
    provider: &impl TextProvider,
) -> Result<Trial, TrialError> {
    let span = generate_span(range, slice, config.min_verses, config.max_verses, rng)?;

    let start = canon::surah(span.start_surah)
        .ok_or_else(|| TrialError::InvalidRange(format!("unknown surah {}", span.start_surah)))?;
    let end = canon::surah(span.end_surah)
        .ok_or_else(|| TrialError::InvalidRange(format!("unknown surah {}", span.end_surah)))?;

    let (arabic_snippet, start_global_ayah_number) =
        match provider.verse_text(span.start_surah, span.start_ayah).await {
            Ok(verse) => (snippet(&verse.text), verse.global_number),
            Err(e) => {
                warn!(
                    surah = span.start_surah,
                    ayah = span.start_ayah,
                    error = %e,
                    "verse text unavailable, degrading trial"
                );
                (String::new(), 0)
            }
        };

    let arabic_end_snippet = match provider.verse_text(span.end_surah, span.end_ayah).await {
        Ok(verse) => Some(snippet(&verse.text)),
        Err(e) => {
            warn!(
                surah = span.end_surah,
                ayah = span.end_ayah,
                error = %e,
                "end verse text unavailable"
            );
            None
        }
    };

    Ok(Trial {
        surah_id: start.id,
        surah_name: start.name.to_string(),
        surah_english_name: start.english_name.to_string(),
        start_ayah: span.start_ayah,
        start_global_ayah_number,
        end_surah_id: end.id,
        end_surah_name: end.name.to_string(),
        end_surah_english_name: end.english_name.to_string(),
        end_ayah: span.end_ayah,
        arabic_snippet,
        arabic_end_snippet,
    })
}
