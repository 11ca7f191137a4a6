//! Packs pronunciation clips for a batch of words into one zip archive.

use pronounce_acquire::{archive_file_name, slugify, AudioSource, FetchError};
use std::collections::HashSet;
use std::io::{Cursor, Write};
use thiserror::Error;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// File name used when the archive is offered for download.
pub const ARCHIVE_NAME: &str = "pronunciations.zip";

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to write zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("failed to write archive entry: {0}")]
    Io(#[from] std::io::Error),
}

/// A word that produced no entry, and why.
#[derive(Debug)]
pub struct SkippedWord {
    pub word: String,
    pub reason: FetchError,
}

/// The finished archive plus what went into it.
#[derive(Debug)]
pub struct ArchiveReport {
    pub bytes: Vec<u8>,
    /// Entry names in write order.
    pub entries: Vec<String>,
    /// Words left out, in input order.
    pub skipped: Vec<SkippedWord>,
}

/// Fetch every word in order and zip up the clips that came back.
///
/// Words are fetched one at a time. A failed fetch leaves the word out of
/// the archive and lands in [`ArchiveReport::skipped`]; only writing the
/// archive itself can fail the batch.
///
/// Entries are named `<slug>.mp3`. When two words share a slug the later
/// ones become `<slug>-2.mp3`, `<slug>-3.mp3`, ... so no clip is lost.
pub async fn build_archive(
    source: &dyn AudioSource,
    words: &[String],
) -> Result<ArchiveReport, ArchiveError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut names = EntryNames::default();
    let mut entries = Vec::new();
    let mut skipped = Vec::new();

    for word in words {
        match source.fetch(word).await {
            Ok(audio) => {
                let name = names.next(&slugify(word));
                zip.start_file(name.as_str(), options)?;
                zip.write_all(&audio)?;
                tracing::debug!(word = %word, entry = %name, bytes = audio.len(), "Added archive entry");
                entries.push(name);
            }
            Err(reason) => {
                tracing::info!(word = %word, reason = %reason, "Skipping word");
                skipped.push(SkippedWord {
                    word: word.clone(),
                    reason,
                });
            }
        }
    }

    let bytes = zip.finish()?.into_inner();
    tracing::info!(
        words = words.len(),
        entries = entries.len(),
        skipped = skipped.len(),
        bytes = bytes.len(),
        "Built pronunciation archive"
    );

    Ok(ArchiveReport {
        bytes,
        entries,
        skipped,
    })
}

/// Hands out entry names that have not been written yet.
#[derive(Default)]
struct EntryNames {
    used: HashSet<String>,
}

impl EntryNames {
    fn next(&mut self, slug: &str) -> String {
        let mut name = archive_file_name(slug);
        let mut n = 1;
        while self.used.contains(&name) {
            n += 1;
            name = archive_file_name(&format!("{slug}-{n}"));
        }
        self.used.insert(name.clone());
        name
    }
}
