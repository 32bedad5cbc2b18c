//! Core types for memorization practice.

use serde::{Deserialize, Serialize};

/// One of the 30 fixed juz boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JuzBoundary {
    pub juz: u8,
    pub start_surah: u16,
    pub start_ayah: u16,
    pub end_surah: u16,
    pub end_ayah: u16,
}

/// Inclusive surah/verse range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurahRange {
    pub start_surah: u16,
    pub start_ayah: u16,
    pub end_surah: u16,
    pub end_ayah: u16,
}

impl SurahRange {
    /// Whether a position lies within this range under canon ordering.
    pub fn contains(&self, surah: u16, ayah: u16) -> bool {
        if surah < self.start_surah || surah > self.end_surah {
            return false;
        }
        if surah == self.start_surah && ayah < self.start_ayah {
            return false;
        }
        if surah == self.end_surah && ayah > self.end_ayah {
            return false;
        }
        true
    }
}

/// Named memorization presets offered by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Last5Juz,
    Last10Juz,
    HalfQuran,
    FullQuran,
}

impl Preset {
    /// Stable identifier used for persistence and remote rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Last5Juz => "LAST_5_JUZ",
            Self::Last10Juz => "LAST_10_JUZ",
            Self::HalfQuran => "HALF_QURAN",
            Self::FullQuran => "FULL_QURAN",
        }
    }

    /// Parse from the stable identifier.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "LAST_5_JUZ" => Some(Self::Last5Juz),
            "LAST_10_JUZ" => Some(Self::Last10Juz),
            "HALF_QURAN" => Some(Self::HalfQuran),
            "FULL_QURAN" => Some(Self::FullQuran),
            _ => None,
        }
    }

    /// Juz span covered by the preset.
    pub fn juz_span(&self) -> (u8, u8) {
        match self {
            Self::Last5Juz => (26, 30),
            Self::Last10Juz => (21, 30),
            Self::HalfQuran => (16, 30),
            Self::FullQuran => (1, 30),
        }
    }
}

/// A resolved memorization range: the surah/verse bounds plus the juz span
/// they were derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorizationRange {
    pub id: String,
    pub title: String,
    pub description: String,
    pub range: SurahRange,
    pub start_juz: u8,
    pub end_juz: u8,
}

/// The juz sub-span assigned to one trial within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialSlice {
    pub start_juz: u8,
    pub end_juz: u8,
}

/// The raw positional outcome of planning a trial: start and end
/// references, before any text enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialSpan {
    pub start_surah: u16,
    pub start_ayah: u16,
    pub end_surah: u16,
    pub end_ayah: u16,
}

/// One practice question: recite from the start position to the end
/// position. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trial {
    pub surah_id: u16,
    /// Arabic name of the starting surah.
    pub surah_name: String,
    pub surah_english_name: String,
    pub start_ayah: u16,
    /// Absolute 1..6236 verse index of the start, or 0 when the text
    /// provider could not supply it (audio unavailable for this trial).
    pub start_global_ayah_number: u32,
    pub end_surah_id: u16,
    pub end_surah_name: String,
    pub end_surah_english_name: String,
    pub end_ayah: u16,
    /// First few words of the starting verse.
    pub arabic_snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arabic_end_snippet: Option<String>,
}

/// A scored trial, recorded when the user advances past it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub trial: Trial,
    /// Self-rated 1-5, or None if skipped.
    pub score: Option<u8>,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_contains_respects_edge_ayahs() {
        let r = SurahRange { start_surah: 29, start_ayah: 46, end_surah: 114, end_ayah: 6 };
        assert!(r.contains(29, 46));
        assert!(!r.contains(29, 45));
        assert!(r.contains(30, 1));
        assert!(r.contains(114, 6));
        assert!(!r.contains(114, 7));
        assert!(!r.contains(28, 10));
    }

    #[test]
    fn preset_id_round_trip() {
        for p in [Preset::Last5Juz, Preset::Last10Juz, Preset::HalfQuran, Preset::FullQuran] {
            assert_eq!(Preset::from_str(p.as_str()), Some(p));
        }
        assert_eq!(Preset::from_str("LAST_3_JUZ"), None);
    }
}
