pub mod content;
pub mod display;
pub mod entry;
pub mod media;
pub mod page;

pub use content::{CastMember, ContentRecord, Credits, CrewMember, Episode, Genre, SeasonDetails, SeasonSummary};
pub use display::{DisplayItem, TaggedRecord};
pub use entry::{EntryKey, MinimalEntry, ShareEntry};
pub use media::{MediaType, ParseMediaTypeError};
pub use page::Page;
