pub mod api;
pub mod client;
pub mod images;

pub use client::TmdbClient;
pub use images::{backdrop_url, image_url, poster_url, ImageSize, PLACEHOLDER_IMAGE};
