//! Song and discography extraction for AZLyrics pages.
//!
//! Addresses are derived from artist and song names, pages are fetched one at
//! a time behind a random politeness delay, and the loosely structured HTML is
//! turned into [`SongRecord`] and [`AlbumRecord`] values.

pub mod controllers;
pub mod error;
pub mod models;
pub mod routers;
pub mod settings;

pub use controllers::{Extractor, FetchConfig, UrlBuilder};
pub use error::{ExtractError, Result};
pub use models::discography::{AlbumRecord, DiscographyResult};
pub use models::song::SongRecord;
pub use settings::Settings;
