use super::progress::hydrate_interruptible;
use super::{AppContext, WATCHLIST_LOAD_FAILED};
use crate::output::{self, Output};
use crate::ViewArgs;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use owo_colors::OwoColorize;
use serde_json::json;
use shelf_core::{apply, share_url, HydrateError, Hydrator, SearchScope, ViewFilter};
use shelf_models::{DisplayItem, MediaType};

pub async fn run_list(ctx: &AppContext, view: &ViewArgs, output: &Output) -> Result<()> {
    let entries = ctx
        .store()
        .list()
        .map_err(|e| load_failed(HydrateError::SourceUnreadable(e)))?;

    if entries.is_empty() {
        if output.is_human() {
            output.info("Your watchlist is empty. Add titles with 'reelshelf watchlist add <type> <id>'.");
        } else {
            output.json(&json!([]));
        }
        return Ok(());
    }

    let hydrator = Hydrator::new(ctx.source()?).with_timeout(ctx.config.request_timeout());
    let items = hydrate_interruptible(&hydrator, &entries, output)
        .await
        .map_err(load_failed)?;

    if items.len() < entries.len() {
        output.warn(format!(
            "{} of {} titles could not be loaded and are not shown",
            entries.len() - items.len(),
            entries.len()
        ));
    }

    let filter = view_filter(view, SearchScope::Full);
    let visible = apply(&items, &filter, ctx.sort_key(view.sort));
    render_items(&visible, true, output);
    Ok(())
}

pub fn run_add(ctx: &AppContext, media_type: MediaType, id: u64, note: &str, output: &Output) -> Result<()> {
    let added = ctx
        .store()
        .add(id, media_type, note)
        .map_err(|e| eyre!("Failed to update watchlist: {}", e))?;

    if output.is_human() {
        if added {
            output.success(format!("Added {} {} to your watchlist", media_type.label(), id));
        } else {
            output.info(format!("{} {} is already in your watchlist", media_type.label(), id));
        }
    } else {
        output.json(&json!({ "id": id, "type": media_type, "in_watchlist": true, "changed": added }));
    }
    Ok(())
}

pub fn run_remove(ctx: &AppContext, media_type: MediaType, id: u64, output: &Output) -> Result<()> {
    let removed = ctx
        .store()
        .remove(id, media_type)
        .map_err(|e| eyre!("Failed to update watchlist: {}", e))?;

    if output.is_human() {
        if removed {
            output.success(format!("Removed {} {} from your watchlist", media_type.label(), id));
        } else {
            output.info(format!("{} {} was not in your watchlist", media_type.label(), id));
        }
    } else {
        output.json(&json!({ "id": id, "type": media_type, "in_watchlist": false, "changed": removed }));
    }
    Ok(())
}

pub fn run_toggle(ctx: &AppContext, media_type: MediaType, id: u64, output: &Output) -> Result<()> {
    let present = ctx
        .store()
        .toggle(id, media_type)
        .map_err(|e| eyre!("Failed to update watchlist: {}", e))?;

    if output.is_human() {
        if present {
            output.success(format!("Added {} {} to your watchlist", media_type.label(), id));
        } else {
            output.success(format!("Removed {} {} from your watchlist", media_type.label(), id));
        }
    } else {
        output.json(&json!({ "id": id, "type": media_type, "in_watchlist": present, "changed": true }));
    }
    Ok(())
}

pub fn run_note(ctx: &AppContext, media_type: MediaType, id: u64, text: &str, output: &Output) -> Result<()> {
    let updated = ctx
        .store()
        .set_note(id, media_type, text)
        .map_err(|e| eyre!("Failed to update watchlist: {}", e))?;

    if !updated {
        return Err(eyre!(
            "{} {} is not in your watchlist; add it first with 'reelshelf watchlist add'",
            media_type.label(),
            id
        ));
    }

    if output.is_human() {
        output.success(format!("Updated note for {} {}", media_type.label(), id));
    } else {
        output.json(&json!({ "id": id, "type": media_type, "note": text }));
    }
    Ok(())
}

pub fn run_share(ctx: &AppContext, output: &Output) -> Result<()> {
    let entries = ctx
        .store()
        .list()
        .map_err(|e| load_failed(HydrateError::SourceUnreadable(e)))?;
    let url = share_url(&ctx.config.share.origin, &ctx.config.share.base_path, &entries);

    if output.is_human() {
        if entries.is_empty() {
            output.warn("Your watchlist is empty; the link will show an empty list");
        }
        output.info(format!("Share link for {} titles (notes are not included):", entries.len()));
        output.info(url.bright_blue().to_string());
    } else {
        output.json(&json!({ "url": url, "entries": entries.len() }));
    }
    Ok(())
}

pub(crate) fn view_filter(view: &ViewArgs, scope: SearchScope) -> ViewFilter {
    ViewFilter::new(view.query.clone(), view.type_filter, scope)
}

pub(crate) fn load_failed(error: HydrateError) -> color_eyre::Report {
    match error {
        HydrateError::Cancelled => eyre!("Cancelled"),
        other => {
            tracing::error!("{}", other);
            eyre!(WATCHLIST_LOAD_FAILED)
        }
    }
}

/// Table in human mode, the items themselves in JSON mode
pub(crate) fn render_items(items: &[DisplayItem], with_notes: bool, output: &Output) {
    if !output.is_human() {
        output.data(&items);
        return;
    }
    if items.is_empty() {
        output.info("No titles match the current filter");
        return;
    }

    let mut columns = vec!["Type", "ID", "Title", "Year", "Rating", "Added"];
    if with_notes {
        columns.push("Note");
    }

    let mut table = output::new_table();
    table.set_header(output::header(&columns));
    for item in items {
        let mut row = vec![
            Cell::new(item.media_type.label()),
            Cell::new(item.id()),
            Cell::new(item.title()),
            output::year_cell(item.year()),
            output::rating_cell(item.rating()),
            Cell::new(item.added_at.format("%Y-%m-%d")),
        ];
        if with_notes {
            row.push(Cell::new(output::truncate(&item.note, 40)));
        }
        table.add_row(row);
    }
    output.table(&table);
}
