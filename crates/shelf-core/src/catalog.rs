//! Remote browsing: listings, search, genres, details and seasons.

use std::collections::HashSet;

use futures::future::join_all;
use shelf_config::FeaturedItem;
use shelf_models::{ContentRecord, Genre, MediaType, Page, SeasonDetails, TaggedRecord};
use shelf_sources::{MetadataSource, SourceError};
use tracing::{debug, warn};

use crate::pager::Pager;

pub struct Catalog<M> {
    source: M,
}

impl<M: MetadataSource> Catalog<M> {
    pub fn new(source: M) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &M {
        &self.source
    }

    /// Trending content for the pager's category, or search results when it
    /// holds a query. The response's page count is written back into the
    /// pager and the selected genre is applied to the returned page only.
    pub async fn listing(&self, pager: &mut Pager) -> Result<Page<ContentRecord>, SourceError> {
        let mut page = self
            .source
            .get_listing(pager.category(), pager.page(), pager.query())
            .await?;

        pager.set_total_pages(page.total_pages);
        debug!(
            "Listing {} page {}/{} ({} results)",
            pager.category(),
            pager.page(),
            pager.total_pages(),
            page.results.len()
        );

        if let Some(genre) = pager.genre() {
            page.results = filter_by_genre(page.results, genre);
        }
        Ok(page)
    }

    /// Carousel content: the curated items that could be loaded, then popular
    /// movies, then popular series. All three are fetched together; a curated
    /// item that fails is left out, a failing popular list fails the call.
    pub async fn featured(&self, curated: &[FeaturedItem]) -> Result<Vec<TaggedRecord>, SourceError> {
        let (picks, movies, series) = futures::join!(
            self.curated(curated),
            self.source.get_popular(MediaType::Movie, 1),
            self.source.get_popular(MediaType::Tv, 1)
        );

        let mut featured = picks;
        featured.extend(movies?.results.into_iter().map(|r| TaggedRecord::new(r, MediaType::Movie)));
        featured.extend(series?.results.into_iter().map(|r| TaggedRecord::new(r, MediaType::Tv)));
        debug!("{} featured titles ({} curated)", featured.len(), curated.len());
        Ok(featured)
    }

    async fn curated(&self, items: &[FeaturedItem]) -> Vec<TaggedRecord> {
        let fetches = items.iter().map(|item| self.source.get_details(item.media_type, item.id));

        join_all(fetches)
            .await
            .into_iter()
            .zip(items)
            .filter_map(|(result, item)| match result {
                Ok(record) => Some(TaggedRecord::new(record, item.media_type)),
                Err(e) => {
                    warn!("Failed to fetch featured {} {}: {}", item.media_type, item.id, e);
                    None
                }
            })
            .collect()
    }

    /// Movie and TV genres fetched together, merged by id
    pub async fn genres(&self) -> Result<Vec<Genre>, SourceError> {
        let (movie, tv) = futures::join!(
            self.source.get_genres(MediaType::Movie),
            self.source.get_genres(MediaType::Tv)
        );
        Ok(merge_genres([movie?, tv?]))
    }

    pub async fn details(&self, media_type: MediaType, id: u64) -> Result<ContentRecord, SourceError> {
        match media_type {
            MediaType::Movie => self.source.get_details_with_credits(media_type, id).await,
            MediaType::Tv => self.source.get_details(media_type, id).await,
        }
    }

    /// Every season listed on `series`, fetched concurrently. Seasons that fail
    /// to load are left out.
    pub async fn seasons(&self, series: &ContentRecord) -> Vec<SeasonDetails> {
        let fetches = series
            .seasons
            .iter()
            .map(|season| self.source.get_season(series.id, season.season_number));

        join_all(fetches)
            .await
            .into_iter()
            .zip(&series.seasons)
            .filter_map(|(result, season)| match result {
                Ok(details) => Some(details),
                Err(e) => {
                    warn!(
                        "Failed to load season {} of series {}: {}",
                        season.season_number, series.id, e
                    );
                    None
                }
            })
            .collect()
    }
}

pub fn filter_by_genre(records: Vec<ContentRecord>, genre_id: u64) -> Vec<ContentRecord> {
    records.into_iter().filter(|record| record.has_genre(genre_id)).collect()
}

/// Concatenates the lists, keeping the first genre seen for each id
pub fn merge_genres<I>(lists: I) -> Vec<Genre>
where
    I: IntoIterator<Item = Vec<Genre>>,
{
    let mut seen = HashSet::new();
    lists
        .into_iter()
        .flatten()
        .filter(|genre| seen.insert(genre.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{record, FakeSource};
    use shelf_models::SeasonSummary;

    fn genre(id: u64, name: &str) -> Genre {
        Genre {
            id,
            name: name.to_string(),
        }
    }

    fn with_genres(id: u64, genre_ids: &[u64]) -> ContentRecord {
        ContentRecord {
            genre_ids: genre_ids.to_vec(),
            ..record(id, &format!("Title {}", id))
        }
    }

    fn season(number: u32) -> SeasonDetails {
        SeasonDetails {
            season_number: number,
            name: Some(format!("Season {}", number)),
            overview: None,
            episodes: Vec::new(),
        }
    }

    #[test]
    fn test_merge_genres_keeps_first_occurrence() {
        let merged = merge_genres([
            vec![genre(28, "Action"), genre(18, "Drama")],
            vec![genre(10759, "Action & Adventure"), genre(18, "Drama (TV)")],
        ]);
        let names: Vec<&str> = merged.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Action", "Drama", "Action & Adventure"]);
    }

    #[test]
    fn test_filter_by_genre() {
        let records = vec![with_genres(1, &[28, 12]), with_genres(2, &[18]), with_genres(3, &[12])];
        let ids: Vec<u64> = filter_by_genre(records, 12).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_listing_updates_pager_and_filters_genre() {
        let mut source = FakeSource::default();
        source.listing.insert(
            MediaType::Tv,
            Page {
                page: 1,
                results: vec![with_genres(1, &[18]), with_genres(2, &[35]), with_genres(3, &[18, 35])],
                total_pages: 3,
                total_results: 60,
            },
        );
        let catalog = Catalog::new(source);

        let mut pager = Pager::new(MediaType::Tv);
        pager.set_genre(Some(35));
        let page = catalog.listing(&mut pager).await.unwrap();

        assert_eq!(pager.total_pages(), 3);
        assert!(pager.has_next());
        let ids: Vec<u64> = page.results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_listing_passes_query_and_page() {
        let mut source = FakeSource::default();
        source.listing.insert(
            MediaType::Movie,
            Page {
                total_pages: 4,
                ..Page::empty()
            },
        );
        let catalog = Catalog::new(source);

        let mut pager = Pager::new(MediaType::Movie);
        catalog.listing(&mut pager).await.unwrap();
        assert!(pager.next());
        catalog.listing(&mut pager).await.unwrap();
        pager.set_query("dune");
        catalog.listing(&mut pager).await.unwrap();

        let requests = catalog.source().listing_requests.lock().unwrap().clone();
        assert_eq!(
            requests,
            vec![
                (MediaType::Movie, 1, None),
                (MediaType::Movie, 2, None),
                (MediaType::Movie, 1, Some("dune".to_string())),
            ]
        );
    }

    #[tokio::test]
    async fn test_genres_merged_across_types() {
        let mut source = FakeSource::default();
        source.genres.insert(MediaType::Movie, vec![genre(28, "Action"), genre(18, "Drama")]);
        source.genres.insert(MediaType::Tv, vec![genre(18, "Drama"), genre(10765, "Sci-Fi & Fantasy")]);
        let catalog = Catalog::new(source);

        let ids: Vec<u64> = catalog.genres().await.unwrap().iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![28, 18, 10765]);
    }

    #[tokio::test]
    async fn test_genres_fail_when_a_list_is_missing() {
        let mut source = FakeSource::default();
        source.genres.insert(MediaType::Movie, vec![genre(28, "Action")]);
        let catalog = Catalog::new(source);
        assert!(catalog.genres().await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_movie_details_include_credits() {
        let source = FakeSource::default()
            .with_record(MediaType::Movie, record(603, "The Matrix"))
            .with_record(MediaType::Tv, record(1399, "Game of Thrones"));
        let catalog = Catalog::new(source);

        let movie = catalog.details(MediaType::Movie, 603).await.unwrap();
        assert!(movie.credits.is_some());
        let show = catalog.details(MediaType::Tv, 1399).await.unwrap();
        assert!(show.credits.is_none());
        assert!(catalog.details(MediaType::Tv, 603).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_seasons_skip_failures_and_keep_order() {
        let mut source = FakeSource::default();
        for number in [0, 1, 3] {
            source.seasons.insert((1399, number), season(number));
        }
        let catalog = Catalog::new(source);

        let series = ContentRecord {
            seasons: (0..4)
                .map(|number| SeasonSummary {
                    season_number: number,
                    name: None,
                    episode_count: Some(10),
                    air_date: None,
                })
                .collect(),
            ..record(1399, "Game of Thrones")
        };

        let numbers: Vec<u32> = catalog.seasons(&series).await.iter().map(|s| s.season_number).collect();
        assert_eq!(numbers, vec![0, 1, 3]);
    }

    fn popular(ids: &[u64]) -> Page<ContentRecord> {
        Page {
            results: ids.iter().map(|id| record(*id, &format!("Popular {}", id))).collect(),
            ..Page::empty()
        }
    }

    fn pick(id: u64, media_type: MediaType) -> FeaturedItem {
        FeaturedItem { id, media_type }
    }

    #[tokio::test]
    async fn test_featured_orders_curated_then_movies_then_series() {
        let mut source = FakeSource::default()
            .with_record(MediaType::Tv, record(1396, "Breaking Bad"))
            .with_record(MediaType::Movie, record(27205, "Inception"))
            .with_record(MediaType::Movie, record(155, "The Dark Knight"))
            .failing(MediaType::Movie, 155);
        source.popular.insert(MediaType::Movie, popular(&[1, 2]));
        source.popular.insert(MediaType::Tv, popular(&[3]));
        let catalog = Catalog::new(source);

        let curated = [
            pick(1396, MediaType::Tv),
            pick(155, MediaType::Movie),
            pick(27205, MediaType::Movie),
            pick(999, MediaType::Tv),
        ];
        let featured = catalog.featured(&curated).await.unwrap();
        let keys: Vec<(u64, MediaType)> = featured.iter().map(|t| (t.record.id, t.media_type)).collect();
        assert_eq!(
            keys,
            vec![
                (1396, MediaType::Tv),
                (27205, MediaType::Movie),
                (1, MediaType::Movie),
                (2, MediaType::Movie),
                (3, MediaType::Tv),
            ]
        );
    }

    #[tokio::test]
    async fn test_featured_without_curated_items() {
        let mut source = FakeSource::default();
        source.popular.insert(MediaType::Movie, popular(&[10]));
        let catalog = Catalog::new(source);

        let featured = catalog.featured(&[]).await.unwrap();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].media_type, MediaType::Movie);
    }

    #[tokio::test]
    async fn test_featured_fails_when_a_popular_list_fails() {
        let mut source = FakeSource::default().with_record(MediaType::Movie, record(27205, "Inception"));
        source.popular.insert(MediaType::Movie, popular(&[1]));
        source.failing_popular.insert(MediaType::Tv);
        let catalog = Catalog::new(source);

        assert!(catalog.featured(&[pick(27205, MediaType::Movie)]).await.is_err());
    }
}
