//! Shareable watchlist links.
//!
//! A link carries `[{id, type, addedAt}, ...]` as compact JSON, percent-escaped
//! into the `data` query parameter of the shared-watchlist route. Notes never
//! leave the machine.

use serde_json::Value;
use shelf_models::{MediaType, MinimalEntry, ShareEntry};
use tracing::debug;

/// Client-side route that renders a shared list
pub const SHARED_ROUTE: &str = "#/shared-watchlist";
pub const DATA_PARAM: &str = "data";

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("No watchlist data provided")]
    Missing,

    #[error("Shared data is not valid percent-encoded UTF-8: {0}")]
    Unescape(#[source] std::string::FromUtf8Error),

    #[error("Shared data is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Shared data is not a list of entries")]
    NotAList,
}

/// Percent-escaped JSON for the `data` parameter
pub fn encode(entries: &[MinimalEntry]) -> String {
    let shared: Vec<ShareEntry> = entries.iter().map(MinimalEntry::to_share).collect();
    let json = serde_json::to_string(&shared).unwrap_or_default();
    urlencoding::encode(&json).into_owned()
}

/// `<origin>/<base_path>/#/shared-watchlist?data=<encoded>`
pub fn share_url(origin: &str, base_path: &str, entries: &[MinimalEntry]) -> String {
    let origin = origin.trim_end_matches('/');
    let base_path = base_path.trim_matches('/');
    let encoded = encode(entries);

    if base_path.is_empty() {
        format!("{}/{}?{}={}", origin, SHARED_ROUTE, DATA_PARAM, encoded)
    } else {
        format!("{}/{}/{}?{}={}", origin, base_path, SHARED_ROUTE, DATA_PARAM, encoded)
    }
}

/// Raw `data` value of a shared link. Input without a query string is taken
/// to be the bare value itself.
pub fn data_param(link: &str) -> Option<&str> {
    let link = link.trim();
    let Some((_, query)) = link.split_once('?') else {
        if link.is_empty() || link.contains("://") || link.starts_with('#') {
            return None;
        }
        return Some(link);
    };

    query.split('&').find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        (name == DATA_PARAM).then_some(value)
    })
}

/// Reverses [`encode`]. The whole payload must be a JSON array; inside it,
/// elements with an unknown `type` or otherwise malformed fields are skipped
/// one by one. Decoded entries always have an empty note.
pub fn decode(raw: Option<&str>) -> Result<Vec<MinimalEntry>, DecodeError> {
    let raw = raw.map(str::trim).filter(|value| !value.is_empty()).ok_or(DecodeError::Missing)?;
    let text = urlencoding::decode(raw).map_err(DecodeError::Unescape)?;
    let value: Value = serde_json::from_str(&text).map_err(DecodeError::Parse)?;

    let Value::Array(elements) = value else {
        return Err(DecodeError::NotAList);
    };

    let total = elements.len();
    let entries: Vec<MinimalEntry> = elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| decode_element(index, element))
        .collect();

    if entries.len() < total {
        debug!("Skipped {} of {} shared entries", total - entries.len(), total);
    }
    Ok(entries)
}

fn decode_element(index: usize, element: Value) -> Option<MinimalEntry> {
    let type_ok = element
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|kind| kind.parse::<MediaType>().is_ok());
    if !type_ok {
        debug!("Shared entry {} has no recognised type, skipping", index);
        return None;
    }

    match serde_json::from_value::<ShareEntry>(element) {
        Ok(entry) => Some(entry.into()),
        Err(e) => {
            debug!("Shared entry {} is malformed, skipping: {}", index, e);
            None
        }
    }
}
