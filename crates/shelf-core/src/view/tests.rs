use super::*;
use chrono::{DateTime, Duration, TimeZone, Utc};
use shelf_models::{ContentRecord, MinimalEntry};

fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap() + Duration::minutes(minutes)
}

fn item(id: u64, media_type: MediaType, title: &str, minutes: i64) -> DisplayItem {
    let record = match media_type {
        MediaType::Movie => ContentRecord {
            id,
            title: Some(title.to_string()),
            ..Default::default()
        },
        MediaType::Tv => ContentRecord {
            id,
            name: Some(title.to_string()),
            ..Default::default()
        },
    };
    DisplayItem::new(record, &MinimalEntry::new(id, media_type, at(minutes), ""))
}

fn rated(id: u64, rating: Option<f64>, minutes: i64) -> DisplayItem {
    let mut display = item(id, MediaType::Movie, &format!("Movie {}", id), minutes);
    display.record.vote_average = rating;
    display
}

fn dated(id: u64, date: Option<&str>, minutes: i64) -> DisplayItem {
    let mut display = item(id, MediaType::Tv, &format!("Show {}", id), minutes);
    display.record.first_air_date = date.map(str::to_string);
    display
}

fn ids(items: &[DisplayItem]) -> Vec<u64> {
    items.iter().map(DisplayItem::id).collect()
}

#[test]
fn test_type_and_query_filter() {
    let items = vec![
        item(603, MediaType::Movie, "The Matrix", 0),
        item(604, MediaType::Tv, "Matrix Reloaded", 1),
        item(605, MediaType::Movie, "Inception", 2),
    ];
    let view = ViewFilter::new("matrix", TypeFilter::Movie, SearchScope::Full);
    assert_eq!(ids(&filter(&items, &view)), vec![603]);

    let everything = ViewFilter::new("MATRIX", TypeFilter::All, SearchScope::Full);
    assert_eq!(ids(&filter(&items, &everything)), vec![603, 604]);
}

#[test]
fn test_empty_query_passes_everything_of_the_type() {
    let items = vec![
        item(1, MediaType::Movie, "A", 0),
        item(2, MediaType::Tv, "B", 1),
        item(3, MediaType::Tv, "C", 2),
    ];
    assert_eq!(ids(&filter(&items, &ViewFilter::default())), vec![1, 2, 3]);

    let shows = ViewFilter::new("", TypeFilter::Tv, SearchScope::TitleOnly);
    assert_eq!(ids(&filter(&items, &shows)), vec![2, 3]);
}

#[test]
fn test_query_whitespace_is_significant() {
    let items = vec![
        item(603, MediaType::Movie, "The Matrix", 0),
        item(604, MediaType::Movie, "Inception", 1),
    ];

    let spaced = ViewFilter::new("matrix ", TypeFilter::All, SearchScope::TitleOnly);
    assert!(filter(&items, &spaced).is_empty());

    let blank = ViewFilter::new(" ", TypeFilter::All, SearchScope::TitleOnly);
    assert_eq!(ids(&filter(&items, &blank)), vec![603]);
}

#[test]
fn test_full_scope_searches_overview_and_note() {
    let mut with_overview = item(1, MediaType::Movie, "Alien", 0);
    with_overview.record.overview = Some("A crew meets a Xenomorph.".to_string());
    let mut with_note = item(2, MediaType::Movie, "Heat", 1);
    with_note.note = "Watch with xenia".to_string();
    let items = vec![with_overview, with_note, item(3, MediaType::Movie, "Up", 2)];

    let full = ViewFilter::new("xeno", TypeFilter::All, SearchScope::Full);
    assert_eq!(ids(&filter(&items, &full)), vec![1]);

    let note = ViewFilter::new("XENIA", TypeFilter::All, SearchScope::Full);
    assert_eq!(ids(&filter(&items, &note)), vec![2]);

    let title_only = ViewFilter::new("xen", TypeFilter::All, SearchScope::TitleOnly);
    assert!(filter(&items, &title_only).is_empty());
}

#[test]
fn test_rating_descending_then_added_at_restores_default_order() {
    let items = vec![rated(1, Some(7.2), 0), rated(2, Some(9.0), 1), rated(3, Some(5.1), 2)];

    let mut by_rating = items.clone();
    sort(&mut by_rating, SortKey::Rating);
    let ratings: Vec<f64> = by_rating.iter().filter_map(DisplayItem::rating).collect();
    assert_eq!(ratings, vec![9.0, 7.2, 5.1]);

    let mut from_original = items.clone();
    sort(&mut from_original, SortKey::AddedAt);
    sort(&mut by_rating, SortKey::AddedAt);
    assert_eq!(ids(&by_rating), ids(&from_original));
    // newest first
    assert_eq!(ids(&by_rating), vec![3, 2, 1]);
}

#[test]
fn test_missing_rating_sorts_last_and_ties_are_stable() {
    let items = vec![
        rated(1, None, 0),
        rated(2, Some(8.0), 1),
        rated(3, Some(f64::NAN), 2),
        rated(4, Some(8.0), 3),
        rated(5, Some(6.5), 4),
    ];
    let mut sorted = items;
    sort(&mut sorted, SortKey::Rating);
    assert_eq!(ids(&sorted), vec![2, 4, 5, 1, 3]);
}

#[test]
fn test_year_descending_with_unknown_dates_last() {
    let items = vec![
        dated(1, Some("1999-03-31"), 0),
        dated(2, None, 1),
        dated(3, Some("2021-12-22"), 2),
        dated(4, Some(""), 3),
        dated(5, Some("2021-01-01"), 4),
    ];
    let mut sorted = items;
    sort(&mut sorted, SortKey::Year);
    assert_eq!(ids(&sorted), vec![3, 5, 1, 2, 4]);
}

#[test]
fn test_title_sort_ignores_case_and_accents() {
    let items = vec![
        item(1, MediaType::Movie, "zodiac", 0),
        item(2, MediaType::Tv, "Élite", 1),
        item(3, MediaType::Movie, "Amélie", 2),
        item(4, MediaType::Movie, "Elf", 3),
        item(5, MediaType::Movie, "amadeus", 4),
    ];
    let mut sorted = items;
    sort(&mut sorted, SortKey::Title);
    let titles: Vec<&str> = sorted.iter().map(DisplayItem::title).collect();
    assert_eq!(titles, vec!["amadeus", "Amélie", "Elf", "Élite", "zodiac"]);
}

#[test]
fn test_apply_filters_before_sorting() {
    let mut first = rated(1, Some(6.0), 0);
    first.record.title = Some("Dune".to_string());
    let mut second = rated(2, Some(8.5), 1);
    second.record.title = Some("Dune: Part Two".to_string());
    let items = vec![first, second, rated(3, Some(9.9), 2)];

    let view = ViewFilter::new("dune", TypeFilter::Movie, SearchScope::TitleOnly);
    assert_eq!(ids(&apply(&items, &view, SortKey::Rating)), vec![2, 1]);
}

#[test]
fn test_sort_key_parsing() {
    assert_eq!("addedAt".parse::<SortKey>().unwrap(), SortKey::AddedAt);
    assert_eq!("added_at".parse::<SortKey>().unwrap(), SortKey::AddedAt);
    assert_eq!("year".parse::<SortKey>().unwrap(), SortKey::Year);
    assert!("popularity".parse::<SortKey>().is_err());
    for key in SortKey::ALL {
        assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
    }
    assert_eq!(SortKey::default(), SortKey::AddedAt);
}

#[test]
fn test_type_filter_parsing() {
    assert_eq!("all".parse::<TypeFilter>().unwrap(), TypeFilter::All);
    assert_eq!("tv".parse::<TypeFilter>().unwrap(), TypeFilter::Tv);
    assert!("TV".parse::<TypeFilter>().is_err());
    assert_eq!(TypeFilter::from(MediaType::Movie), TypeFilter::Movie);
}
