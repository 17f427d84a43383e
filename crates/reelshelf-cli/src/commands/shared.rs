use super::progress::hydrate_interruptible;
use super::watchlist::{load_failed, render_items, view_filter};
use super::{AppContext, SHARED_LINK_INVALID};
use crate::output::Output;
use crate::ViewArgs;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;
use shelf_core::{apply, data_param, decode, Hydrator, SearchScope};

/// Read-only view of someone else's list; nothing is written to the local store
pub async fn run_shared(ctx: &AppContext, link: &str, view: &ViewArgs, output: &Output) -> Result<()> {
    let entries = decode(data_param(link)).map_err(|e| {
        tracing::warn!("Rejected shared link: {}", e);
        eyre!(SHARED_LINK_INVALID)
    })?;

    if entries.is_empty() {
        if output.is_human() {
            output.info("This shared watchlist is empty");
        } else {
            output.json(&json!([]));
        }
        return Ok(());
    }

    let hydrator = Hydrator::new(ctx.source()?).with_timeout(ctx.config.request_timeout());
    let items = hydrate_interruptible(&hydrator, &entries, output)
        .await
        .map_err(load_failed)?;

    let filter = view_filter(view, SearchScope::TitleOnly);
    let visible = apply(&items, &filter, ctx.sort_key(view.sort));
    if output.is_human() {
        output.info(format!("Shared watchlist with {} titles", items.len()));
    }
    render_items(&visible, false, output);
    Ok(())
}
