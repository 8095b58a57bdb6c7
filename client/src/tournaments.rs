use std::sync::Arc;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use alpha_shared::tournament::{render_archived, render_featured};
use alpha_shared::{TournamentDocument, TournamentLookup};

use crate::config::{ARCHIVED_TOURNAMENTS_ID, FEATURED_TOURNAMENT_ID, TOURNAMENTS_FILE};
use crate::dom;
use crate::fetch::get_static_json;

/// Fetch the tournament document, render both regions and publish the popup lookup.
/// Skipped entirely when the page has neither region.
pub(crate) fn load_tournaments(lookup: RwSignal<Arc<TournamentLookup>>) {
    let featured = dom::by_id(FEATURED_TOURNAMENT_ID);
    let archived = dom::by_id(ARCHIVED_TOURNAMENTS_ID);
    if featured.is_none() && archived.is_none() {
        dom::log_info("No tournament regions on this page; skipping tournaments");
        return;
    }

    spawn_local(async move {
        let doc = match get_static_json::<TournamentDocument>(TOURNAMENTS_FILE).await {
            Ok(doc) => doc,
            Err(e) => {
                dom::log_warn(&format!("Tournaments unavailable: {e}"));
                return;
            }
        };

        if let Some(el) = &featured {
            el.set_inner_html(&render_featured(&doc));
        }
        if let Some(el) = &archived {
            el.set_inner_html(&render_archived(&doc));
        }

        let built = TournamentLookup::build(&doc);
        dom::log_info(&format!("Loaded {} tournaments", built.len()));
        lookup.set(Arc::new(built));
    });
}
