use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shelf_models::{ContentRecord, Genre, MediaType, Page, SeasonDetails};
use std::time::Duration;
use tracing::{debug, trace};
use crate::error::SourceError;

/// Everything a request needs besides its path and parameters
pub struct RequestContext<'a> {
    pub client: &'a Client,
    pub base_url: &'a str,
    pub api_key: &'a str,
    pub language: Option<&'a str>,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct GenreList {
    #[serde(default)]
    genres: Vec<Genre>,
}

/// Full request URL: base + path, then api_key, language and the extra parameters
pub fn build_url(ctx: &RequestContext<'_>, path: &str, params: &[(&str, String)]) -> String {
    let mut url = format!(
        "{}/{}?api_key={}",
        ctx.base_url.trim_end_matches('/'),
        path.trim_start_matches('/'),
        urlencoding::encode(ctx.api_key)
    );
    if let Some(language) = ctx.language {
        url.push_str("&language=");
        url.push_str(&urlencoding::encode(language));
    }
    for (name, value) in params {
        url.push('&');
        url.push_str(name);
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }
    url
}

async fn get_json<T: DeserializeOwned>(
    ctx: &RequestContext<'_>,
    path: &str,
    params: &[(&str, String)],
) -> Result<T, SourceError> {
    let endpoint = format!("/{}", path.trim_start_matches('/'));
    let url = build_url(ctx, path, params);
    debug!("GET {}", endpoint);

    let response = ctx
        .client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| request_error(&endpoint, ctx.timeout, e))?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(SourceError::NotFound(endpoint));
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SourceError::Status {
            endpoint,
            status: status.as_u16(),
            body,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| request_error(&endpoint, ctx.timeout, e))?;
    trace!("{} returned {} bytes", endpoint, body.len());

    serde_json::from_str(&body).map_err(|source| SourceError::Decode { endpoint, source })
}

fn request_error(endpoint: &str, timeout: Duration, error: reqwest::Error) -> SourceError {
    if error.is_timeout() {
        SourceError::Timeout {
            endpoint: endpoint.to_string(),
            timeout,
        }
    } else {
        SourceError::Http {
            endpoint: endpoint.to_string(),
            source: error.without_url(),
        }
    }
}

/// `/{type}/{id}`, optionally with credits appended to the same response
pub async fn get_details(
    ctx: &RequestContext<'_>,
    media_type: MediaType,
    id: u64,
    with_credits: bool,
) -> Result<ContentRecord, SourceError> {
    let path = format!("{}/{}", media_type.as_str(), id);
    let params = if with_credits {
        vec![("append_to_response", "credits".to_string())]
    } else {
        Vec::new()
    };
    get_json(ctx, &path, &params).await
}

/// Trending (daily) for the media type, or a search when `query` has text
pub async fn get_listing(
    ctx: &RequestContext<'_>,
    media_type: MediaType,
    page: u32,
    query: Option<&str>,
) -> Result<Page<ContentRecord>, SourceError> {
    let page = page.max(1);
    match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(query) => {
            let path = format!("search/{}", media_type.as_str());
            get_json(ctx, &path, &[("query", query.to_string()), ("page", page.to_string())]).await
        }
        None => {
            let path = format!("trending/{}/day", media_type.as_str());
            get_json(ctx, &path, &[("page", page.to_string())]).await
        }
    }
}

/// `/{type}/popular`
pub async fn get_popular(
    ctx: &RequestContext<'_>,
    media_type: MediaType,
    page: u32,
) -> Result<Page<ContentRecord>, SourceError> {
    let path = format!("{}/popular", media_type.as_str());
    get_json(ctx, &path, &[("page", page.max(1).to_string())]).await
}

pub async fn get_genres(ctx: &RequestContext<'_>, media_type: MediaType) -> Result<Vec<Genre>, SourceError> {
    let path = format!("genre/{}/list", media_type.as_str());
    let list: GenreList = get_json(ctx, &path, &[]).await?;
    Ok(list.genres)
}

pub async fn get_season(
    ctx: &RequestContext<'_>,
    series_id: u64,
    season_number: u32,
) -> Result<SeasonDetails, SourceError> {
    let path = format!("tv/{}/season/{}", series_id, season_number);
    get_json(ctx, &path, &[]).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context<'a>(client: &'a Client, language: Option<&'a str>) -> RequestContext<'a> {
        RequestContext {
            client,
            base_url: "https://api.themoviedb.org/3/",
            api_key: "k3y",
            language,
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_build_url_details() {
        let client = Client::new();
        let ctx = context(&client, None);
        assert_eq!(
            build_url(&ctx, "movie/603", &[("append_to_response", "credits".to_string())]),
            "https://api.themoviedb.org/3/movie/603?api_key=k3y&append_to_response=credits"
        );
    }

    #[test]
    fn test_build_url_escapes_query_and_language() {
        let client = Client::new();
        let ctx = context(&client, Some("en-US"));
        assert_eq!(
            build_url(&ctx, "/search/tv", &[("query", "the office & co".to_string()), ("page", "2".to_string())]),
            "https://api.themoviedb.org/3/search/tv?api_key=k3y&language=en-US&query=the%20office%20%26%20co&page=2"
        );
    }

    #[test]
    fn test_build_url_popular_per_type() {
        let client = Client::new();
        let ctx = context(&client, None);
        for media_type in MediaType::ALL {
            let path = format!("{}/popular", media_type.as_str());
            assert_eq!(
                build_url(&ctx, &path, &[("page", "1".to_string())]),
                format!("https://api.themoviedb.org/3/{}/popular?api_key=k3y&page=1", media_type)
            );
        }
    }

    #[test]
    fn test_genre_list_payload() {
        let list: GenreList =
            serde_json::from_str(r#"{"genres":[{"id":28,"name":"Action"},{"id":18,"name":"Drama"}]}"#).unwrap();
        assert_eq!(list.genres.len(), 2);
        assert_eq!(list.genres[1].name, "Drama");
    }

    #[test]
    fn test_listing_payload_decodes() {
        let page: Page<ContentRecord> = serde_json::from_str(
            r#"{"page":2,"results":[{"id":603,"title":"The Matrix","genre_ids":[28,878],"vote_average":8.2}],"total_pages":40,"total_results":800}"#,
        )
        .unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 40);
        assert_eq!(page.results[0].title_of(), "The Matrix");
    }
}
