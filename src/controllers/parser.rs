use tracing::{debug, warn};

use super::document::{Node, ParsedDocument};
use crate::error::{ExtractError, Result};

/// The one container on a song page that holds the lyrics block, next to
/// headers, ads and disclaimers.
const LYRICS_CONTAINER: &str = "col-xs-12 col-lg-8 text-center";

const GENRE_SCRIPT_MARKER: &str = "window.rtkGPTSlotsTargeting";
const GENRE_OPEN: &str = r#"["genre", ""#;
const GENRE_CLOSE: &str = r#""]"#;

const ALBUM_CLASS: &str = "songinalbum_title";
const ALBUM_LABEL: &str = "album:";

const CREDITS_CLASS: &str = "smt";
const WRITERS_LABEL: &str = "Writer(s):";

/// Picks the lyrics block: the container child with the most `<br>`
/// descendants. Ties keep the earliest child.
pub fn locate_lyrics(doc: &ParsedDocument) -> Result<String> {
    let container = doc
        .first_by_class(LYRICS_CONTAINER)
        .ok_or_else(|| ExtractError::LyricsNotFound("lyrics container missing".to_string()))?;

    let mut best: Option<(usize, Node<'_>)> = None;
    for (i, child) in container.children().enumerate() {
        let n_br = child.count_descendants("br");
        match best {
            Some((max, _)) if n_br <= max => {}
            _ => {
                debug!("lyrics candidate index={} br={}", i, n_br);
                best = Some((n_br, child));
            }
        }
    }

    let (n_br, block) = best
        .ok_or_else(|| ExtractError::LyricsNotFound("lyrics container is empty".to_string()))?;
    let lyrics = block.text();
    debug!("extracted_lyrics_len={} br={}", lyrics.len(), n_br);
    Ok(lyrics)
}

/// Genre from the ad-targeting script in `<head>`.
pub fn extract_genre(doc: &ParsedDocument) -> Option<String> {
    let genre = doc
        .select("head script")
        .into_iter()
        .map(|script| script.text())
        .find(|body| body.contains(GENRE_SCRIPT_MARKER))
        .and_then(|body| {
            let start = body.find(GENRE_OPEN)? + GENRE_OPEN.len();
            let len = body[start..].find(GENRE_CLOSE)?;
            Some(body[start..start + len].to_string())
        });

    match &genre {
        Some(g) => debug!("Genre found: {}", g),
        None => warn!("Genre not found"),
    }
    genre
}

/// Album attribution, e.g. `album: "Tell Me I'm Alive"(2023)`.
pub fn extract_album(doc: &ParsedDocument) -> Option<String> {
    let album = doc.first_by_class(ALBUM_CLASS).and_then(|div| {
        let text = div.stripped_text();
        let rest = text.strip_prefix(ALBUM_LABEL).unwrap_or(&text);
        let album = rest.trim().trim_start_matches('"').trim();
        (!album.is_empty()).then(|| album.to_string())
    });

    match &album {
        Some(a) => debug!("Album found: {}", a),
        None => warn!("Album not found"),
    }
    album
}

/// Writer credits from the first credits block that lists them.
pub fn extract_writers(doc: &ParsedDocument) -> Option<String> {
    let writers = doc.find_by_class(CREDITS_CLASS).into_iter().find_map(|div| {
        let small = div.first_descendant("small")?;
        let text = small.stripped_text();
        text.contains(WRITERS_LABEL)
            .then(|| text.replace(WRITERS_LABEL, "").trim().to_string())
    });

    match &writers {
        Some(w) => debug!("Writer(s) found: {}", w),
        None => warn!("Writers not found"),
    }
    writers
}
