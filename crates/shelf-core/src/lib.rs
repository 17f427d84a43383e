pub mod catalog;
pub mod hydrate;
pub mod pager;
pub mod share;
pub mod storage;
pub mod store;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::{filter_by_genre, merge_genres, Catalog};
pub use hydrate::{HydrateError, Hydrator};
pub use pager::Pager;
pub use share::{data_param, decode, encode, share_url, DecodeError, DATA_PARAM, SHARED_ROUTE};
pub use storage::{FileStorage, MemoryStorage, StorageError, WatchlistStorage};
pub use store::{StoreError, WatchlistStore};
pub use view::{apply, filter, sort, SearchScope, SortKey, TypeFilter, ViewFilter};
