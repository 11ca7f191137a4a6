use crate::error::FetchError;
use crate::locate::{resolve_audio_url, AudioLocator, LocatorKind};
use crate::slug::slugify;
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_ORIGIN: &str = "https://dictionary.cambridge.org";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Where and how to reach the dictionary.
#[derive(Debug, Clone)]
pub struct DictionaryConfig {
    /// Scheme + host, no trailing path (e.g. "https://dictionary.cambridge.org").
    pub origin: String,
    pub user_agent: String,
    /// Applied to each GET on its own.
    pub timeout: Duration,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Anything that can produce pronunciation audio for a word.
#[async_trait]
pub trait AudioSource: Send + Sync {
    async fn fetch(&self, word: &str) -> Result<Vec<u8>, FetchError>;
}

/// Dictionary page URL for an already-normalised slug.
pub fn page_url(origin: &str, slug: &str) -> String {
    format!("{}/dictionary/english/{slug}", origin.trim_end_matches('/'))
}

/// Scrapes the dictionary: one GET for the entry page, one for the clip.
///
/// Nothing is cached and nothing is retried; the same word fetched twice
/// costs two full round trips.
pub struct PronunciationFetcher {
    client: reqwest::Client,
    config: DictionaryConfig,
    locator: Box<dyn AudioLocator>,
}

impl PronunciationFetcher {
    pub fn new(config: DictionaryConfig, locator: Box<dyn AudioLocator>) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            config,
            locator,
        })
    }

    /// Fetcher with the given config and the default pattern locator.
    pub fn with_config(config: DictionaryConfig) -> reqwest::Result<Self> {
        Self::new(config, LocatorKind::default().build())
    }

    pub fn config(&self) -> &DictionaryConfig {
        &self.config
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        self.client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })
    }

    async fn get_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self.get(url).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::PageStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })
    }

    async fn get_audio(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.get(url).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::AudioStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;
        if body.is_empty() {
            return Err(FetchError::EmptyAudio {
                url: url.to_string(),
            });
        }

        Ok(body.to_vec())
    }
}

#[async_trait]
impl AudioSource for PronunciationFetcher {
    async fn fetch(&self, word: &str) -> Result<Vec<u8>, FetchError> {
        let slug = slugify(word);
        if slug.is_empty() {
            return Err(FetchError::EmptySlug);
        }

        let url = page_url(&self.config.origin, &slug);
        tracing::debug!(word, url = %url, "Fetching dictionary page");
        let html = self.get_page(&url).await?;
        tracing::debug!(bytes = html.len(), "Received HTML");

        let src = self
            .locator
            .locate(&html)
            .ok_or_else(|| FetchError::NoAudioReference { url: url.clone() })?;
        let audio_url = resolve_audio_url(&self.config.origin, &src);

        tracing::debug!(word, url = %audio_url, "Fetching pronunciation audio");
        let audio = self.get_audio(&audio_url).await?;
        tracing::debug!(word, bytes = audio.len(), "Received audio");

        Ok(audio)
    }
}
