use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const GENRE_NOT_FOUND: &str = "Genre not found";
pub const ALBUM_NOT_FOUND: &str = "Album not found";
pub const WRITERS_NOT_FOUND: &str = "Writers not found";

/// Everything scraped from a single song page.
///
/// Missing metadata is `None` here; on the wire it is written as the
/// "... not found" text the existing song store expects.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SongRecord {
    pub title: String,
    pub lyrics: String,
    #[serde(default, with = "genre")]
    pub genre: Option<String>,
    #[serde(default, with = "album")]
    pub album: Option<String>,
    #[serde(default, with = "writers")]
    pub writers: Option<String>,
}

fn serialize_or<S: Serializer>(value: &Option<String>, sentinel: &str, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(value.as_deref().unwrap_or(sentinel))
}

fn deserialize_or<'de, D: Deserializer<'de>>(sentinel: &str, d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(d)?;
    Ok(value.filter(|v| v != sentinel))
}

macro_rules! sentinel_field {
    ($name:ident, $sentinel:expr) => {
        mod $name {
            use super::*;

            pub fn serialize<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
                serialize_or(value, $sentinel, s)
            }

            pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
                deserialize_or($sentinel, d)
            }
        }
    };
}

sentinel_field!(genre, GENRE_NOT_FOUND);
sentinel_field!(album, ALBUM_NOT_FOUND);
sentinel_field!(writers, WRITERS_NOT_FOUND);
