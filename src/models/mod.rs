pub mod discography;
pub mod song;
