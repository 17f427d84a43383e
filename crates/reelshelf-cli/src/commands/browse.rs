use super::progress::spinner;
use super::AppContext;
use crate::output::{self, Output};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use owo_colors::OwoColorize;
use serde_json::json;
use shelf_core::{Catalog, Pager};
use shelf_models::{ContentRecord, MediaType, SeasonDetails};
use shelf_sources::tmdb::{backdrop_url, poster_url};
use shelf_sources::ImageSize;

pub async fn run_browse(
    ctx: &AppContext,
    media_type: MediaType,
    query: Option<String>,
    page: u32,
    genre: Option<u64>,
    output: &Output,
) -> Result<()> {
    let catalog = Catalog::new(ctx.source()?);

    let mut pager = Pager::new(media_type);
    pager.set_query(query.unwrap_or_default());
    pager.set_genre(genre);
    // Total is unknown until the first response; allow the requested page for now
    pager.set_total_pages(page);
    pager.go_to(page);

    let progress = spinner(output, "Loading...");
    let mut listing = catalog.listing(&mut pager).await;
    if matches!(&listing, Ok(_) if pager.page() < page) {
        progress.set_message(format!("Only {} pages available, loading the last one...", pager.total_pages()));
        listing = catalog.listing(&mut pager).await;
    }
    progress.finish_and_clear();
    let listing = listing.map_err(|e| eyre!("Failed to load {} listing: {}", media_type, e))?;

    if !output.is_human() {
        output.json(&json!({
            "type": media_type,
            "query": pager.query(),
            "genre": pager.genre(),
            "page": pager.page(),
            "total_pages": pager.total_pages(),
            "total_results": listing.total_results,
            "results": listing.results,
        }));
        return Ok(());
    }

    if pager.page() < page {
        output.warn(format!("Page {} is out of range, showing page {}", page, pager.page()));
    }
    let heading = match pager.query() {
        Some(query) => format!("Search results for \"{}\"", query),
        None => format!("Trending {}", plural(media_type)),
    };
    output.info(heading.bold().to_string());
    render_records(&listing.results, media_type, output);
    output.info(format!(
        "Page {} of {}{}{}",
        pager.page(),
        pager.total_pages(),
        if pager.has_prev() { "  (--page N-1 for previous)" } else { "" },
        if pager.has_next() { "  (--page N+1 for next)" } else { "" },
    ));
    Ok(())
}

pub async fn run_featured(ctx: &AppContext, output: &Output) -> Result<()> {
    let catalog = Catalog::new(ctx.source()?);

    let progress = spinner(output, "Loading featured titles...");
    let featured = catalog.featured(&ctx.config.featured.items).await;
    progress.finish_and_clear();
    let featured = featured.map_err(|e| eyre!("Failed to load featured titles: {}", e))?;

    if !output.is_human() {
        output.data(&featured);
        return Ok(());
    }
    output.info("Featured".bold().to_string());
    if featured.is_empty() {
        output.info("Nothing found");
        return Ok(());
    }

    let mut table = output::new_table();
    table.set_header(output::header(&["Type", "ID", "Title", "Year", "Rating"]));
    for item in &featured {
        table.add_row(vec![
            Cell::new(item.media_type.label()),
            Cell::new(item.record.id),
            Cell::new(item.record.title_of()),
            output::year_cell(item.record.year_of()),
            output::rating_cell(item.record.rating()),
        ]);
    }
    output.table(&table);
    output.info("Details: reelshelf show <type> <id>".dimmed().to_string());
    Ok(())
}

pub async fn run_genres(ctx: &AppContext, output: &Output) -> Result<()> {
    let catalog = Catalog::new(ctx.source()?);
    let genres = catalog
        .genres()
        .await
        .map_err(|e| eyre!("Failed to load genres: {}", e))?;

    if !output.is_human() {
        output.data(&genres);
        return Ok(());
    }

    let mut table = output::new_table();
    table.set_header(output::header(&["ID", "Genre"]));
    for genre in &genres {
        table.add_row(vec![Cell::new(genre.id), Cell::new(&genre.name)]);
    }
    output.table(&table);
    Ok(())
}

pub async fn run_show(ctx: &AppContext, media_type: MediaType, id: u64, with_seasons: bool, output: &Output) -> Result<()> {
    let catalog = Catalog::new(ctx.source()?);

    let progress = spinner(output, "Loading details...");
    let record = catalog.details(media_type, id).await;
    let record = match record {
        Ok(record) => record,
        Err(e) if e.is_not_found() => {
            progress.finish_and_clear();
            return Err(eyre!("No {} found with id {}", media_type.label().to_lowercase(), id));
        }
        Err(e) => {
            progress.finish_and_clear();
            return Err(eyre!("Failed to load details for {} {}: {}", media_type, id, e));
        }
    };
    let seasons = if with_seasons && media_type == MediaType::Tv {
        catalog.seasons(&record).await
    } else {
        Vec::new()
    };
    progress.finish_and_clear();

    let in_watchlist = ctx.store().contains(id, media_type).unwrap_or_else(|e| {
        tracing::warn!("Could not read watchlist: {}", e);
        false
    });
    let image_base = &ctx.config.tmdb.image_base;
    let poster = poster_url(image_base, ImageSize::W500, &record);
    let backdrop = backdrop_url(image_base, ImageSize::Original, &record);

    if !output.is_human() {
        output.json(&json!({
            "type": media_type,
            "record": record,
            "poster_url": poster,
            "backdrop_url": backdrop,
            "in_watchlist": in_watchlist,
            "seasons": seasons,
        }));
        return Ok(());
    }

    render_details(&record, media_type, in_watchlist, output);
    output.info(format!("{} {}", "Poster:".dimmed(), poster));
    if !seasons.is_empty() {
        render_seasons(&seasons, output);
    }
    Ok(())
}

fn plural(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Movie => "movies",
        MediaType::Tv => "series",
    }
}

fn render_records(records: &[ContentRecord], media_type: MediaType, output: &Output) {
    if records.is_empty() {
        output.info("Nothing found");
        return;
    }

    let mut table = output::new_table();
    table.set_header(output::header(&["ID", "Title", "Year", "Rating", "Overview"]));
    for record in records {
        table.add_row(vec![
            Cell::new(record.id),
            Cell::new(record.title_of()),
            output::year_cell(record.year_of()),
            output::rating_cell(record.rating()),
            Cell::new(output::truncate(record.overview_of(), 60)),
        ]);
    }
    output.table(&table);
    output.info(
        format!("Details: reelshelf show {} <id>", media_type)
            .dimmed()
            .to_string(),
    );
}

fn render_details(record: &ContentRecord, media_type: MediaType, in_watchlist: bool, output: &Output) {
    let year = record.year_of().map(|y| format!(" ({})", y)).unwrap_or_default();
    output.info(format!("{}{}", record.title_of().bold(), year));
    if let Some(tagline) = record.tagline.as_deref().filter(|t| !t.is_empty()) {
        output.info(tagline.italic().to_string());
    }

    let mut facts = output::new_table();
    facts.add_row(vec![Cell::new("Type"), Cell::new(media_type.label())]);
    if let Some(rating) = record.rating() {
        let votes = record.vote_count.map(|v| format!(" ({} votes)", v)).unwrap_or_default();
        facts.add_row(vec![Cell::new("Rating"), Cell::new(format!("{:.1}/10{}", rating, votes))]);
    }
    if let Some(date) = record.release_date_of() {
        facts.add_row(vec![Cell::new("Released"), Cell::new(date)]);
    }
    if let Some(runtime) = record.runtime.filter(|r| *r > 0) {
        facts.add_row(vec![Cell::new("Runtime"), Cell::new(format!("{}h {}m", runtime / 60, runtime % 60))]);
    }
    if let Some(seasons) = record.number_of_seasons {
        let episodes = record
            .number_of_episodes
            .map(|e| format!(", {} episodes", e))
            .unwrap_or_default();
        facts.add_row(vec![Cell::new("Seasons"), Cell::new(format!("{}{}", seasons, episodes))]);
    }
    if let Some(status) = record.status.as_deref() {
        facts.add_row(vec![Cell::new("Status"), Cell::new(status)]);
    }
    if !record.genres.is_empty() {
        let names: Vec<&str> = record.genres.iter().map(|g| g.name.as_str()).collect();
        facts.add_row(vec![Cell::new("Genres"), Cell::new(names.join(", "))]);
    }
    if let Some(director) = record.director() {
        facts.add_row(vec![Cell::new("Director"), Cell::new(&director.name)]);
    }
    let cast = record.top_cast(5);
    if !cast.is_empty() {
        let names: Vec<String> = cast
            .iter()
            .map(|member| match member.character.as_deref().filter(|c| !c.is_empty()) {
                Some(character) => format!("{} as {}", member.name, character),
                None => member.name.clone(),
            })
            .collect();
        facts.add_row(vec![Cell::new("Cast"), Cell::new(names.join("\n"))]);
    }
    facts.add_row(vec![
        Cell::new("Watchlist"),
        Cell::new(if in_watchlist { "yes" } else { "no" }),
    ]);
    output.table(&facts);

    let overview = record.overview_of();
    if !overview.is_empty() {
        output.info(overview);
    }
}

fn render_seasons(seasons: &[SeasonDetails], output: &Output) {
    let mut table = output::new_table();
    table.set_header(output::header(&["Season", "Name", "Episodes", "First aired"]));
    for season in seasons {
        let first_aired = season
            .episodes
            .iter()
            .filter_map(|episode| episode.air_date.as_deref())
            .find(|date| !date.is_empty())
            .unwrap_or("-");
        table.add_row(vec![
            Cell::new(season.season_number),
            Cell::new(season.name.as_deref().unwrap_or("")),
            Cell::new(season.episodes.len()),
            Cell::new(first_aired),
        ]);
    }
    output.table(&table);
}
