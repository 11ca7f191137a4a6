use regex::Regex;
use scraper::{Html, Selector};

/// Marker the dictionary puts in every US-English audio path.
const US_MARKER: &str = "us_pron";

/// Finds the US pronunciation audio reference inside a dictionary page.
///
/// Returns the reference as written in the markup; use
/// [`resolve_audio_url`] to make it absolute.
pub trait AudioLocator: Send + Sync {
    fn locate(&self, html: &str) -> Option<String>;
}

/// Which [`AudioLocator`] to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LocatorKind {
    /// Two ordered text patterns over the raw page.
    #[default]
    Pattern,
    /// Same two lookups over a parsed DOM.
    Markup,
}

impl LocatorKind {
    pub fn build(self) -> Box<dyn AudioLocator> {
        match self {
            LocatorKind::Pattern => Box::new(PatternLocator::new()),
            LocatorKind::Markup => Box::new(MarkupLocator::new()),
        }
    }
}

/// Text-pattern locator: the `data-src-mp3` attribute form first, then the
/// `<source type="audio/mpeg">` form. First match wins.
pub struct PatternLocator {
    patterns: [Regex; 2],
}

impl PatternLocator {
    pub fn new() -> Self {
        Self {
            patterns: [
                Regex::new(r#"data-src-mp3="([^"]*us_pron[^"]*)""#).expect("valid regex"),
                Regex::new(r#"<source type="audio/mpeg" src="([^"]*us_pron[^"]*)""#)
                    .expect("valid regex"),
            ],
        }
    }
}

impl Default for PatternLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioLocator for PatternLocator {
    fn locate(&self, html: &str) -> Option<String> {
        self.patterns
            .iter()
            .find_map(|re| re.captures(html))
            .map(|caps| caps[1].to_string())
    }
}

/// DOM-based locator. Tolerates attribute reordering and extra attributes
/// on `<source>`, which the text patterns do not.
pub struct MarkupLocator {
    data_src: Selector,
    source: Selector,
}

impl MarkupLocator {
    pub fn new() -> Self {
        Self {
            data_src: Selector::parse("[data-src-mp3]").expect("valid selector"),
            source: Selector::parse(r#"source[type="audio/mpeg"][src]"#)
                .expect("valid selector"),
        }
    }
}

impl Default for MarkupLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioLocator for MarkupLocator {
    fn locate(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);

        let first_us = |selector: &Selector, attr: &str| {
            document
                .select(selector)
                .filter_map(|el| el.value().attr(attr))
                .find(|src| src.contains(US_MARKER))
                .map(str::to_string)
        };

        first_us(&self.data_src, "data-src-mp3").or_else(|| first_us(&self.source, "src"))
    }
}

/// Make an audio reference absolute.
///
/// Protocol-relative references get `https:`, absolute ones are kept, and
/// anything else is treated as a path on `origin`.
pub fn resolve_audio_url(origin: &str, src: &str) -> String {
    if src.starts_with("//") {
        format!("https:{src}")
    } else if src.starts_with("http") {
        src.to_string()
    } else {
        format!(
            "{}/{}",
            origin.trim_end_matches('/'),
            src.trim_start_matches('/')
        )
    }
}
