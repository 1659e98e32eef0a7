use tokio_util::sync::CancellationToken;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use super::discography::parse_discography;
use super::document::ParsedDocument;
use super::fetcher::{FetchConfig, Fetcher, RawPage};
use super::parser::{extract_album, extract_genre, extract_writers, locate_lyrics};
use super::url::{ResourceAddress, UrlBuilder};
use crate::error::{ExtractError, Result};
use crate::models::discography::DiscographyResult;
use crate::models::song::SongRecord;

/// Single-song and discography extraction: address, fetch, parse.
///
/// Cheap to clone; clones share the HTTP connection pool. Every call applies
/// its own politeness delay, nothing else is shared between calls.
#[derive(Debug, Clone)]
pub struct Extractor {
    urls: UrlBuilder,
    fetcher: Fetcher,
}

impl Extractor {
    pub fn new(base_url: &str, config: FetchConfig) -> Result<Self> {
        Ok(Self { urls: UrlBuilder::new(base_url)?, fetcher: Fetcher::new(config)? })
    }

    pub async fn extract_song(&self, artist: &str, song: &str, cancel: &CancellationToken) -> Result<SongRecord> {
        let span = info_span!("extract_song", request_id = %Uuid::new_v4(), artist, song);
        async {
            let address = self.urls.song_url(artist, song).inspect_err(log_failure)?;
            let page = self.fetch(&address, cancel).await?;
            let record = song_from_page(song, &page).inspect_err(log_failure)?;
            info!(address = %address, outcome = "ok", "song extracted");
            Ok(record)
        }
        .instrument(span)
        .await
    }

    pub async fn extract_discography(&self, artist: &str, cancel: &CancellationToken) -> Result<DiscographyResult> {
        let span = info_span!("extract_discography", request_id = %Uuid::new_v4(), artist);
        async {
            let address = self.urls.artist_url(artist).inspect_err(log_failure)?;
            let page = self.fetch(&address, cancel).await?;
            let albums = discography_from_page(&page);
            info!(address = %address, outcome = "ok", albums = albums.len(), "discography extracted");
            Ok(albums)
        }
        .instrument(span)
        .await
    }

    async fn fetch(&self, address: &ResourceAddress, cancel: &CancellationToken) -> Result<RawPage> {
        self.fetcher
            .fetch(address, cancel)
            .await
            .inspect_err(|e| error!(address = %address, outcome = e.kind(), "fetch failed: {}", e))
    }
}

fn log_failure(e: &ExtractError) {
    error!(outcome = e.kind(), "extraction failed: {}", e);
}

/// The parsed tree is not `Send`, so it lives only inside this call.
fn song_from_page(title: &str, page: &RawPage) -> Result<SongRecord> {
    let doc = ParsedDocument::parse(&page.body);
    let lyrics = locate_lyrics(&doc).inspect_err(|_| {
        error!(address = %page.address, locator = "lyrics", "no lyrics block on page");
    })?;

    Ok(SongRecord {
        title: title.to_string(),
        lyrics,
        genre: extract_genre(&doc),
        album: extract_album(&doc),
        writers: extract_writers(&doc),
    })
}

fn discography_from_page(page: &RawPage) -> DiscographyResult {
    parse_discography(&ParsedDocument::parse(&page.body))
}
