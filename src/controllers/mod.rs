pub mod discography;
pub mod document;
pub mod fetcher;
pub mod parser;
pub mod root;
pub mod song;
pub mod url;
pub use fetcher::{FetchConfig, Fetcher, RawPage};
pub use root::RootController;
pub use song::Extractor;
pub use self::url::{ResourceAddress, UrlBuilder};
