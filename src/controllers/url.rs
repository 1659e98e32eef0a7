// URL construction for AZLyrics pages
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{ExtractError, Result};

pub const DEFAULT_BASE_URL: &str = "https://www.azlyrics.com";

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s]").expect("valid slug pattern"));

/// Lowercase `[a-z0-9]` token derived from a human readable name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalSlug(String);

impl CanonicalSlug {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn first_char(&self) -> char {
        // Never empty: construction rejects empty segments
        self.0.chars().next().unwrap_or('0')
    }
}

impl fmt::Display for CanonicalSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully qualified page address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceAddress(url::Url);

impl ResourceAddress {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &url::Url {
        &self.0
    }
}

impl fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Lowercase, drop everything outside `[a-z0-9\s]`, then drop whitespace.
fn normalize(name: &str) -> String {
    let lowered = name.to_lowercase();
    NON_SLUG_CHARS
        .replace_all(&lowered, "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Canonical slug for a name. Every occurrence of `the` is removed, not only
/// a leading article: the site's artist pages are keyed this way
/// ("Weather" becomes "wear").
pub fn slug(name: &str) -> Result<CanonicalSlug> {
    let mut token = normalize(name);
    while token.contains("the") {
        token = token.replace("the", "");
    }
    if token.is_empty() {
        return Err(ExtractError::InvalidName(name.to_string()));
    }
    Ok(CanonicalSlug(token))
}

/// Song path segment. Unlike artist slugs the article is kept, so
/// "The Other Side" maps to `theotherside`.
pub fn song_segment(song: &str) -> Result<CanonicalSlug> {
    let token = normalize(song);
    if token.is_empty() {
        return Err(ExtractError::InvalidName(song.to_string()));
    }
    Ok(CanonicalSlug(token))
}

/// Builds page addresses against a configurable site root.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base: url::Url,
}

impl UrlBuilder {
    pub fn new(base: &str) -> Result<Self> {
        let mut base = url::Url::parse(base)
            .map_err(|e| ExtractError::Config(format!("invalid base url {base:?}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ExtractError::Config(format!("{base} cannot be a base url")));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    fn join(&self, path: &str) -> Result<ResourceAddress> {
        let url = self
            .base
            .join(path)
            .map_err(|e| ExtractError::Config(format!("cannot join {path:?}: {e}")))?;
        debug!("Generated URL: {}", url);
        Ok(ResourceAddress(url))
    }

    /// `{base}/{first letter}/{artist}.html`
    pub fn artist_url(&self, artist: &str) -> Result<ResourceAddress> {
        let artist = slug(artist)?;
        self.join(&format!("{}/{}.html", artist.first_char(), artist))
    }

    /// `{base}/lyrics/{artist}/{song}.html`
    pub fn song_url(&self, artist: &str, song: &str) -> Result<ResourceAddress> {
        let artist = slug(artist)?;
        let song = song_segment(song)?;
        self.join(&format!("lyrics/{}/{}.html", artist, song))
    }
}

impl Default for UrlBuilder {
    fn default() -> Self {
        Self {
            base: url::Url::parse(&format!("{DEFAULT_BASE_URL}/")).expect("valid default base url"),
        }
    }
}
