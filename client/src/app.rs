use std::sync::Arc;

use leptos::prelude::*;

use alpha_shared::{PopupState, StatsDisplay, TournamentLookup};

use crate::popup::PopupOverlay;
use crate::timers::PageTask;
use crate::{chrome, directory, popup, stats, timers, tournaments};

#[component]
pub fn App() -> impl IntoView {
    let stats_display: RwSignal<Option<StatsDisplay>> = RwSignal::new(None);
    let lookup: RwSignal<Arc<TournamentLookup>> = RwSignal::new(Arc::default());
    let popup_state: RwSignal<PopupState> = RwSignal::new(PopupState::Closed);

    // Mirror the stats signal into the static page markup.
    Effect::new(move || {
        stats_display.with(|display| {
            if let Some(display) = display {
                stats::render_stats(display);
            }
        });
    });

    // Boot once: initial loads, page bindings and the recurring schedule.
    Effect::new(move || {
        stats::load_stats(stats_display);
        directory::load_servers();
        directory::load_staff();
        tournaments::load_tournaments(lookup);

        chrome::bind();
        popup::bind(lookup, popup_state);

        timers::start(move |task| match task {
            PageTask::RefreshStats => stats::load_stats(stats_display),
            PageTask::AgeStatsLabel => stats::reage_label(stats_display),
        });

        on_cleanup(|| {
            timers::stop();
            popup::unbind();
            chrome::unbind();
        });
    });

    view! { <PopupOverlay state=popup_state /> }
}
