//! Filtering and ordering of hydrated watchlist items.
//!
//! Everything here is a pure function over `&[DisplayItem]`; callers rerun the
//! pipeline whenever the query, type filter or sort key changes.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use shelf_models::{DisplayItem, MediaType};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Movie,
    Tv,
}

impl TypeFilter {
    pub fn accepts(self, media_type: MediaType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Movie => media_type == MediaType::Movie,
            TypeFilter::Tv => media_type == MediaType::Tv,
        }
    }
}

impl From<MediaType> for TypeFilter {
    fn from(media_type: MediaType) -> Self {
        match media_type {
            MediaType::Movie => TypeFilter::Movie,
            MediaType::Tv => TypeFilter::Tv,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TypeFilter::All),
            "movie" => Ok(TypeFilter::Movie),
            "tv" => Ok(TypeFilter::Tv),
            other => Err(format!("Unknown type filter '{}' (expected all, movie or tv)", other)),
        }
    }
}

/// Which fields a search query is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    /// Title only (shared lists carry no notes)
    TitleOnly,
    /// Title, overview and note
    #[default]
    Full,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    pub query: String,
    pub type_filter: TypeFilter,
    pub scope: SearchScope,
}

impl ViewFilter {
    pub fn new(query: impl Into<String>, type_filter: TypeFilter, scope: SearchScope) -> Self {
        Self {
            query: query.into(),
            type_filter,
            scope,
        }
    }

    pub fn matches(&self, item: &DisplayItem) -> bool {
        if !self.type_filter.accepts(item.media_type) {
            return false;
        }

        // Matched as typed; surrounding spaces are part of the query
        let query = self.query.to_lowercase();
        if query.is_empty() {
            return true;
        }

        if contains_folded(item.title(), &query) {
            return true;
        }
        match self.scope {
            SearchScope::TitleOnly => false,
            SearchScope::Full => {
                contains_folded(item.record.overview_of(), &query) || contains_folded(&item.note, &query)
            }
        }
    }
}

fn contains_folded(haystack: &str, lowered_query: &str) -> bool {
    haystack.to_lowercase().contains(lowered_query)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Most recently added first
    #[default]
    AddedAt,
    /// A to Z, ignoring case and accents
    Title,
    /// Highest rated first
    Rating,
    /// Newest release first
    Year,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::AddedAt, SortKey::Title, SortKey::Rating, SortKey::Year];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::AddedAt => "addedAt",
            SortKey::Title => "title",
            SortKey::Rating => "rating",
            SortKey::Year => "year",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "addedAt" | "added" | "added_at" => Ok(SortKey::AddedAt),
            "title" => Ok(SortKey::Title),
            "rating" => Ok(SortKey::Rating),
            "year" => Ok(SortKey::Year),
            other => Err(format!(
                "Unknown sort key '{}' (expected addedAt, title, rating or year)",
                other
            )),
        }
    }
}

pub fn filter(items: &[DisplayItem], view: &ViewFilter) -> Vec<DisplayItem> {
    items.iter().filter(|item| view.matches(item)).cloned().collect()
}

/// Stable sort; items without a rating or year go after those with one.
pub fn sort(items: &mut [DisplayItem], key: SortKey) {
    match key {
        SortKey::AddedAt => items.sort_by(|a, b| b.added_at.cmp(&a.added_at)),
        SortKey::Title => items.sort_by_cached_key(|item| title_key(item.title())),
        SortKey::Rating => items.sort_by(|a, b| descending_present_first(a.rating(), b.rating())),
        SortKey::Year => items.sort_by(|a, b| descending_present_first(a.year(), b.year())),
    }
}

pub fn apply(items: &[DisplayItem], view: &ViewFilter, key: SortKey) -> Vec<DisplayItem> {
    let mut visible = filter(items, view);
    sort(&mut visible, key);
    visible
}

/// Case-folded, accent-stripped form first; the raw title breaks ties so
/// "Eclair" and "Éclair" still order deterministically.
fn title_key(title: &str) -> (String, String) {
    let folded: String = title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    (folded, title.to_string())
}

fn descending_present_first<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
