use thiserror::Error;

/// Why no audio was obtained for a word.
///
/// The archive builder treats every variant the same way (the word is left
/// out), but keeping them apart lets callers tell "no pronunciation exists"
/// from "the network failed".
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("word normalises to an empty slug")]
    EmptySlug,

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("dictionary page {url} returned HTTP {status}")]
    PageStatus { url: String, status: u16 },

    #[error("no US pronunciation reference on {url}")]
    NoAudioReference { url: String },

    #[error("audio {url} returned HTTP {status}")]
    AudioStatus { url: String, status: u16 },

    #[error("audio {url} has an empty body")]
    EmptyAudio { url: String },
}

impl FetchError {
    /// True for connection failures and timeouts, as opposed to the
    /// dictionary answering without a usable clip.
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Request { .. })
    }

    /// True when the dictionary has no clip for the word: unknown page or
    /// no US reference on it.
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            FetchError::EmptySlug
                | FetchError::NoAudioReference { .. }
                | FetchError::PageStatus { status: 404, .. }
        )
    }
}
