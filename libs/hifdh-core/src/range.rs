//! Range resolution: presets and explicit juz spans normalized into a
//! canonical [`MemorizationRange`].

use crate::canon::{juz_boundary, JUZ_COUNT};
use crate::error::{Result, TrialError};
use crate::types::{MemorizationRange, Preset, SurahRange};

/// Resolve an explicit juz span into a memorization range.
///
/// The surah/verse bounds are copied verbatim from the juz boundary table;
/// nothing is recomputed.
pub fn resolve_juz_span(start_juz: u8, end_juz: u8) -> Result<MemorizationRange> {
    let start = juz_boundary(start_juz).ok_or_else(|| {
        TrialError::InvalidRange(format!("start juz {start_juz} outside 1-{JUZ_COUNT}"))
    })?;
    let end = juz_boundary(end_juz).ok_or_else(|| {
        TrialError::InvalidRange(format!("end juz {end_juz} outside 1-{JUZ_COUNT}"))
    })?;
    if start_juz > end_juz {
        return Err(TrialError::InvalidRange(format!(
            "start juz {start_juz} is after end juz {end_juz}"
        )));
    }

    Ok(MemorizationRange {
        id: format!("JUZ_{start_juz}_{end_juz}"),
        title: if start_juz == end_juz {
            format!("Juz {start_juz}")
        } else {
            format!("Juz {start_juz}-{end_juz}")
        },
        description: format!("Juz {start_juz} to {end_juz}"),
        range: SurahRange {
            start_surah: start.start_surah,
            start_ayah: start.start_ayah,
            end_surah: end.end_surah,
            end_ayah: end.end_ayah,
        },
        start_juz,
        end_juz,
    })
}

/// Resolve a named preset into a memorization range.
pub fn resolve_preset(preset: Preset) -> MemorizationRange {
    let (start_juz, end_juz) = preset.juz_span();
    // Preset spans are always valid juz numbers.
    let mut range = resolve_juz_span(start_juz, end_juz)
        .expect("preset juz spans are within 1-30");
    range.id = preset.as_str().to_string();
    let (title, description) = match preset {
        Preset::Last5Juz => ("Last 5 Juz", "Juz 26-30 (Surah Al-Ahqaf to An-Nas)"),
        Preset::Last10Juz => ("Last 10 Juz", "Juz 21-30 (Surah Al-Ankabut Ayah 46 to An-Nas)"),
        Preset::HalfQuran => ("Half Quran (Last 15 Juz)", "Juz 16-30 (Surah Al-Kahf Ayah 75 to An-Nas)"),
        Preset::FullQuran => ("Full Quran", "Juz 1-30 (Surah Al-Fatiha to An-Nas)"),
    };
    range.title = title.to_string();
    range.description = description.to_string();
    range
}
