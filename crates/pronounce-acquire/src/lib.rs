//! Pronunciation acquisition: turn a word into the US-English audio clip
//! published on an online dictionary.
//!
//! The pipeline is [`slug::slugify`] → dictionary page GET →
//! [`locate::AudioLocator`] → audio GET, wrapped up by
//! [`fetch::PronunciationFetcher`].

pub mod error;
pub mod fetch;
pub mod locate;
pub mod slug;

pub use error::FetchError;
pub use fetch::{AudioSource, DictionaryConfig, PronunciationFetcher};
pub use locate::{AudioLocator, LocatorKind, MarkupLocator, PatternLocator};
pub use slug::{archive_file_name, slugify};
