use crate::output::Output;
use indicatif::{ProgressBar, ProgressStyle};
use shelf_core::{HydrateError, Hydrator};
use shelf_models::{DisplayItem, MinimalEntry};
use shelf_sources::MetadataSource;
use std::io::IsTerminal;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}

/// Spinner on stderr, hidden unless a person is watching human output
pub fn spinner(output: &Output, message: impl Into<String>) -> ProgressBar {
    if output.is_quiet() || !output.is_human() || !is_interactive() {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .map(|style| style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "))
    {
        spinner.set_style(style);
    }
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Hydrates `entries` behind a spinner. Ctrl-C cancels the whole batch.
pub async fn hydrate_interruptible<M: MetadataSource>(
    hydrator: &Hydrator<M>,
    entries: &[MinimalEntry],
    output: &Output,
) -> Result<Vec<DisplayItem>, HydrateError> {
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling watchlist loading");
            on_interrupt.cancel();
        }
    });

    let spinner = spinner(output, format!("Loading {} titles...", entries.len()));
    let result = hydrator.hydrate(entries, &cancel).await;
    spinner.finish_and_clear();
    interrupt.abort();

    result
}
