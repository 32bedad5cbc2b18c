//! Verse text retrieval and audio addressing.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

/// Default reciter identifier for audio URLs.
pub const DEFAULT_RECITER: &str = "ar.minshawi";

const TEXT_API_BASE: &str = "https://api.alquran.cloud/v1/ayah";
const AUDIO_CDN_BASE: &str = "https://cdn.islamic.network/quran/audio/128";

/// The Arabic text of one verse plus its global (1..6236) number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseText {
    pub text: String,
    pub global_number: u32,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("verse {surah}:{ayah} not found")]
    NotFound { surah: u16, ayah: u16 },

    #[error("unexpected response: {0}")]
    Response(String),
}

/// Source of verse text. The production impl is HTTP-backed; tests use
/// in-memory fakes.
#[allow(async_fn_in_trait)]
pub trait TextProvider {
    async fn verse_text(&self, surah: u16, ayah: u16) -> Result<VerseText, ProviderError>;
}

/// CDN URL for one verse's recitation audio.
pub fn verse_audio_url(reciter: &str, global_ayah_number: u32) -> String {
    format!("{AUDIO_CDN_BASE}/{reciter}/{global_ayah_number}.mp3")
}

#[derive(Debug, Deserialize)]
struct AyahResponse {
    data: AyahData,
}

#[derive(Debug, Deserialize)]
struct AyahData {
    text: String,
    number: u32,
}

/// Fetches verse text from the alquran.cloud API, memoizing responses so
/// repeat lookups within a process never hit the network twice.
pub struct HttpTextProvider {
    client: reqwest::Client,
    cache: Mutex<HashMap<(u16, u16), VerseText>>,
}

impl HttpTextProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            cache: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for HttpTextProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProvider for HttpTextProvider {
    async fn verse_text(&self, surah: u16, ayah: u16) -> Result<VerseText, ProviderError> {
        if let Some(cached) = self
            .cache
            .lock()
            .expect("text cache lock poisoned")
            .get(&(surah, ayah))
        {
            return Ok(cached.clone());
        }

        let url = format!("{TEXT_API_BASE}/{surah}:{ayah}/quran-uthmani");
        let response = self.client.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound { surah, ayah });
        }
        if !response.status().is_success() {
            return Err(ProviderError::Response(format!(
                "status {} for {surah}:{ayah}",
                response.status()
            )));
        }

        let parsed: AyahResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Response(e.to_string()))?;
        let verse = VerseText {
            text: parsed.data.text,
            global_number: parsed.data.number,
        };

        self.cache
            .lock()
            .expect("text cache lock poisoned")
            .insert((surah, ayah), verse.clone());
        Ok(verse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn audio_url_format() {
        assert_eq!(
            verse_audio_url(DEFAULT_RECITER, 5673),
            "https://cdn.islamic.network/quran/audio/128/ar.minshawi/5673.mp3"
        );
        assert_eq!(
            verse_audio_url("ar.alafasy", 1),
            "https://cdn.islamic.network/quran/audio/128/ar.alafasy/1.mp3"
        );
    }
}
