use serde::{Deserialize, Serialize};

/// One album, EP or the synthetic "Singles" group from an artist page.
/// Song order is page order.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct AlbumRecord {
    pub title: String,
    pub songs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<u16>,
}

impl AlbumRecord {
    pub fn new(title: impl Into<String>, release_year: Option<u16>) -> Self {
        AlbumRecord { title: title.into(), songs: Vec::new(), release_year }
    }
}

pub type DiscographyResult = Vec<AlbumRecord>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_in_persisted_shape() {
        let mut album = AlbumRecord::new("Nothing Personal", Some(2009));
        album.songs.push("Weightless".into());
        assert_eq!(
            serde_json::to_value(&album).unwrap(),
            json!({"title": "Nothing Personal", "songs": ["Weightless"], "release_year": 2009})
        );
    }

    #[test]
    fn singles_are_written_without_release_year() {
        let mut singles = AlbumRecord::new("Singles", None);
        singles.songs.push("Monsters".into());
        assert_eq!(
            serde_json::to_value(&singles).unwrap(),
            json!({"title": "Singles", "songs": ["Monsters"]})
        );
    }

    #[test]
    fn singles_may_omit_release_year() {
        let album: AlbumRecord =
            serde_json::from_value(json!({"title": "Singles", "songs": ["A", "B"]})).unwrap();
        assert_eq!(album.release_year, None);
        assert_eq!(album.songs, ["A", "B"]);
    }
}
