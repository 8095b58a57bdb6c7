use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use alpha_shared::sources::first_success;
use alpha_shared::{FetchError, StatsDisplay, StatsSnapshot, StatsSource};

use crate::config::{
    JOIN_BUTTON_SELECTOR, LAST_UPDATED_ID, ONLINE_COUNT_ID, SERVER_ID, SERVER_NAME_ID,
    STATS_FILE, TOTAL_MEMBERS_ID, VOICE_CHANNELS_ID,
};
use crate::dom;
use crate::fetch::{self, now_ms};

/// Generated snapshot first, live widget second.
fn stats_sources() -> [StatsSource; 2] {
    [
        StatsSource::SnapshotFile {
            path: STATS_FILE.to_string(),
        },
        StatsSource::GuildWidget {
            server_id: SERVER_ID.to_string(),
        },
    ]
}

async fn fetch_snapshot(source: &StatsSource, requested_ms: u64) -> Result<StatsSnapshot, FetchError> {
    let body = fetch::get_text(&source.url(requested_ms)).await?;
    source.decode(&body)
}

/// Walk the source chain and publish whatever it resolves to (placeholder if nothing).
pub(crate) fn load_stats(display: RwSignal<Option<StatsDisplay>>) {
    spawn_local(async move {
        let sources = stats_sources();
        let started_ms = now_ms();
        let outcome = first_success(&sources, |source| fetch_snapshot(source, started_ms)).await;

        for (source, e) in &outcome.failures {
            dom::log_warn(&format!("Stats {} unavailable: {e}", source.label()));
        }

        let next = match outcome.resolved {
            Some((source, snapshot)) => {
                dom::log_info(&format!("Stats loaded from {}", source.label()));
                StatsDisplay::from_snapshot(snapshot, chrono::Utc::now())
            }
            None => StatsDisplay::placeholder(),
        };
        display.set(Some(next));
    });
}

/// Recompute the "last updated" label from the stored instant. No network.
pub(crate) fn reage_label(display: RwSignal<Option<StatsDisplay>>) {
    display.update(|current| {
        if let Some(current) = current {
            current.reage(chrono::Utc::now());
        }
    });
}

/// Write the stats widget. Elements the page doesn't have are skipped.
pub(crate) fn render_stats(display: &StatsDisplay) {
    dom::set_text(SERVER_NAME_ID, &display.server_name);
    dom::set_text(ONLINE_COUNT_ID, &display.online);
    dom::set_text(TOTAL_MEMBERS_ID, &display.members);
    dom::set_text(VOICE_CHANNELS_ID, &display.voice_channels);
    dom::set_text(LAST_UPDATED_ID, &display.last_updated);

    if let Some(url) = display.invite_url.as_deref()
        && let Some(join) = dom::query(JOIN_BUTTON_SELECTOR)
    {
        join.set_attribute("href", url).ok();
    }
}
