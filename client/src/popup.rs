use std::cell::RefCell;
use std::sync::Arc;

use leptos::prelude::*;
use web_sys::{Event, KeyboardEvent};
use wasm_bindgen::JsCast;

use alpha_shared::{CloseTrigger, PopupState, PopupView, TournamentLookup};

use crate::config::POPUP_BUTTON_SELECTOR;
use crate::dom::{self, EventBinding};

thread_local! {
    static POPUP_BINDINGS: RefCell<Vec<EventBinding>> = const { RefCell::new(Vec::new()) };
}

/// Open `view` for `id`. Unknown ids are logged and ignored.
pub(crate) fn open(
    popup: RwSignal<PopupState>,
    lookup: &TournamentLookup,
    id: &str,
    view: PopupView,
) {
    if lookup.get(id).is_none() {
        dom::log_warn(&format!("No tournament with id {id}"));
        return;
    }
    // Subscribers are only notified when the state actually changed.
    popup.maybe_update(|state| state.open(lookup, id, view));
}

pub(crate) fn close(popup: RwSignal<PopupState>, trigger: CloseTrigger) {
    if popup.with_untracked(PopupState::is_open) {
        popup.update(|state| {
            state.close(trigger);
        });
    }
}

/// Document-level click delegation for tournament buttons, plus Escape to close.
/// Buttons rendered later are picked up without rebinding.
pub(crate) fn bind(lookup: RwSignal<Arc<TournamentLookup>>, popup: RwSignal<PopupState>) {
    unbind();
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let clicks = EventBinding::listen(&document, "click", move |e: Event| {
        let Some(button) = dom::closest_to_target(&e, POPUP_BUTTON_SELECTOR) else {
            return;
        };
        let Some(id) = button.get_attribute("data-popup-id") else {
            return;
        };
        let view = button
            .get_attribute("data-popup-view")
            .and_then(|v| v.parse::<PopupView>().ok())
            .unwrap_or(PopupView::Details);
        e.prevent_default();
        let lookup = lookup.get_untracked();
        open(popup, &lookup, &id, view);
    });

    let escape = EventBinding::listen(&window, "keydown", move |e: Event| {
        let Ok(key) = e.dyn_into::<KeyboardEvent>() else {
            return;
        };
        if key.key() == "Escape" {
            close(popup, CloseTrigger::Escape);
        }
    });

    POPUP_BINDINGS.with(|slot| {
        slot.borrow_mut().extend(clicks.into_iter().chain(escape));
    });
}

pub(crate) fn unbind() {
    POPUP_BINDINGS.with(|slot| slot.borrow_mut().clear());
}

#[component]
pub fn PopupOverlay(state: RwSignal<PopupState>) -> impl IntoView {
    // Page scrolling is locked only while a popup is showing.
    Effect::new(move || {
        dom::set_body_overflow(state.with(PopupState::body_overflow));
    });

    view! {
        <div
            id="popupOverlay"
            class="popup-overlay"
            class:active=move || state.with(PopupState::is_open)
            on:click=move |e| {
                // Clicks inside the dialog bubble here too; only the backdrop itself closes.
                if e.target() == e.current_target() {
                    close(state, CloseTrigger::Backdrop);
                }
            }
        >
            <div class="popup-content">
                <div class="popup-header">
                    <h2 id="popupTitle">{move || state.with(|s| s.title())}</h2>
                    <button
                        type="button"
                        class="popup-close"
                        aria-label="Close"
                        on:click=move |_| close(state, CloseTrigger::CloseButton)
                    >
                        <i class="fas fa-times"></i>
                    </button>
                </div>
                <div id="popupContent" class="popup-body" inner_html=move || state.with(|s| s.body().to_string()) />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alpha_shared::TournamentDocument;

    fn lookup() -> TournamentLookup {
        let doc: TournamentDocument =
            serde_json::from_str(r#"{"active":[{"id":"cup","title":"Cup"}]}"#).unwrap();
        TournamentLookup::build(&doc)
    }

    #[test]
    fn stale_id_leaves_the_overlay_closed() {
        let popup = RwSignal::new(PopupState::Closed);
        let lookup = lookup();
        assert!(lookup.get("gone").is_none());
        popup.maybe_update(|state| state.open(&lookup, "gone", PopupView::Teams));
        assert_eq!(popup.get_untracked(), PopupState::Closed);

        popup.maybe_update(|state| state.open(&lookup, "cup", PopupView::Teams));
        assert!(popup.with_untracked(PopupState::is_open));
        assert_eq!(popup.with_untracked(|s| s.title()), "Registered Teams");
    }
}
