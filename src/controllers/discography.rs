// Rebuilds album -> songs from an artist page.
//
// Album headings and song rows are siblings, not parent/child: each
// `div.album` marker is followed by a run of `div.listalbum-item` rows.
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use super::document::{Node, ParsedDocument};
use crate::models::discography::{AlbumRecord, DiscographyResult};

const MARKER_SELECTOR: &str = "div.album";
const ITEM_CLASS: &str = "listalbum-item";
pub const SINGLES_TITLE: &str = "Singles";

static RELEASE_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\((\d{4})\)").expect("valid year pattern"));

enum Marker {
    Album { title: String, release_year: Option<u16> },
    Singles,
    Other,
}

fn classify(text: &str) -> Marker {
    let lower = text.to_lowercase();
    if lower.contains("album:") || lower.contains("ep:") {
        let release_year = RELEASE_YEAR
            .captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| match m.as_str().parse::<u16>() {
                Ok(year) => Some(year),
                Err(e) => {
                    warn!("Unreadable release year {:?}: {}", m.as_str(), e);
                    None
                }
            });
        let after_label = text.split_once(':').map(|(_, rest)| rest).unwrap_or(text);
        let title = RELEASE_YEAR
            .replace_all(after_label, "")
            .replace('"', "")
            .trim()
            .to_string();
        Marker::Album { title, release_year }
    } else if lower.contains("other songs:") {
        Marker::Singles
    } else {
        Marker::Other
    }
}

/// Song title from a list row: the text of its first link.
fn song_title(item: Node<'_>) -> Option<String> {
    let link = item.first_descendant("a").filter(|a| a.attr("href").is_some())?;
    let title = link.stripped_text();
    (!title.is_empty()).then_some(title)
}

pub fn parse_discography(doc: &ParsedDocument) -> DiscographyResult {
    let mut albums: Vec<AlbumRecord> = Vec::new();
    // Index into `albums`; survives markers that start nothing
    let mut current: Option<usize> = None;

    for marker in doc.select(MARKER_SELECTOR) {
        let text = marker.stripped_text();
        match classify(&text) {
            Marker::Album { title, release_year } => {
                debug!("album marker title={:?} year={:?}", title, release_year);
                albums.push(AlbumRecord::new(title, release_year));
                current = Some(albums.len() - 1);
            }
            Marker::Singles => {
                albums.push(AlbumRecord::new(SINGLES_TITLE, None));
                current = Some(albums.len() - 1);
            }
            Marker::Other => debug!("ignoring marker {:?}", text),
        }

        let Some(idx) = current else { continue };
        let album = &mut albums[idx];

        let mut next = marker.next_sibling();
        while let Some(item) = next.filter(|n| n.has_class(ITEM_CLASS)) {
            match song_title(item) {
                Some(title) => {
                    debug!("Found song: {} under album {}", title, album.title);
                    album.songs.push(title);
                }
                None => warn!("Song link missing for a song in {}", album.title),
            }
            next = item.next_sibling();
        }
    }

    info!(
        "Parsed albums: {:?}",
        albums.iter().map(|a| a.title.as_str()).collect::<Vec<_>>()
    );
    albums
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str) -> String {
        format!(r#"<div class="listalbum-item"><a href="/lyrics/x/{0}.html">{0}</a></div>"#, title)
    }

    fn page(parts: &[String]) -> ParsedDocument {
        ParsedDocument::parse(&format!(
            r#"<html><body><div id="listAlbum">{}</div></body></html>"#,
            parts.concat()
        ))
    }

    fn marker(text: &str) -> String {
        format!(r#"<div class="album">{text}</div>"#)
    }

    #[test]
    fn albums_then_singles() {
        let doc = page(&[
            marker(r#"Album: "X" (2001)"#),
            item("Song A"),
            item("Song B"),
            marker("Other songs:"),
            item("Song C"),
        ]);
        let albums = parse_discography(&doc);
        assert_eq!(
            albums,
            vec![
                AlbumRecord {
                    title: "X".into(),
                    release_year: Some(2001),
                    songs: vec!["Song A".into(), "Song B".into()],
                },
                AlbumRecord {
                    title: "Singles".into(),
                    release_year: None,
                    songs: vec!["Song C".into()],
                },
            ]
        );
    }

    #[test]
    fn markup_inside_marker_is_flattened() {
        let doc = page(&[marker(r#"EP: <b>"Put Up Or Shut Up"</b> (2006)"#), item("Coffee Shop Soundtrack")]);
        let albums = parse_discography(&doc);
        assert_eq!(albums[0].title, "Put Up Or Shut Up");
        assert_eq!(albums[0].release_year, Some(2006));
    }

    #[test]
    fn title_keeps_text_after_later_colons() {
        let doc = page(&[marker(r#"album: "Live: Straight To DVD" (2010)"#)]);
        assert_eq!(parse_discography(&doc)[0].title, "Live: Straight To DVD");
    }

    #[test]
    fn album_without_year() {
        let doc = page(&[marker(r#"album: "Demo""#), item("One")]);
        let albums = parse_discography(&doc);
        assert_eq!(albums[0].release_year, None);
        assert_eq!(albums[0].songs, ["One"]);
    }

    #[test]
    fn unknown_marker_keeps_current_album() {
        let doc = page(&[
            marker(r#"album: "A" (2005)"#),
            item("One"),
            marker("compilation: Greatest"),
            item("Two"),
        ]);
        let albums = parse_discography(&doc);
        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].songs, ["One", "Two"]);
    }

    #[test]
    fn items_before_first_album_are_dropped() {
        let doc = page(&[marker("Featured"), item("Orphan"), marker(r#"album: "A""#), item("One")]);
        let albums = parse_discography(&doc);
        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].songs, ["One"]);
    }

    #[test]
    fn walk_stops_at_first_non_item_sibling() {
        let doc = page(&[
            marker(r#"album: "A""#),
            item("One"),
            r#"<div class="ad">buy</div>"#.to_string(),
            item("Lost"),
        ]);
        assert_eq!(parse_discography(&doc)[0].songs, ["One"]);
    }

    #[test]
    fn rows_without_links_are_skipped() {
        let doc = page(&[
            marker(r#"album: "A""#),
            item("One"),
            r#"<div class="listalbum-item">no link</div>"#.to_string(),
            r#"<div class="listalbum-item"><a href="/x.html">  </a></div>"#.to_string(),
            item("Two"),
        ]);
        assert_eq!(parse_discography(&doc)[0].songs, ["One", "Two"]);
    }

    #[test]
    fn only_div_markers_start_albums() {
        let doc = page(&[
            r#"<span class="album">album: "Sidebar" (1999)</span>"#.to_string(),
            marker(r#"album: "A" (2005)"#),
            item("One"),
        ]);
        let albums = parse_discography(&doc);
        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].title, "A");
    }

    #[test]
    fn page_without_markers_is_empty() {
        let doc = page(&[item("Loose")]);
        assert!(parse_discography(&doc).is_empty());
    }
}
