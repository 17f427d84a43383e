pub mod error;
pub mod tmdb;
pub mod traits;

pub use error::SourceError;
pub use tmdb::{ImageSize, TmdbClient, PLACEHOLDER_IMAGE};
pub use traits::MetadataSource;
