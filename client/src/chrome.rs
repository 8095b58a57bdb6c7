//! Navbar behaviour: mobile toggle, smooth in-page scrolling, scrolled style.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, ScrollBehavior, ScrollToOptions};

use alpha_shared::chrome::{anchor_target, navbar_is_scrolled, scroll_destination};

use crate::config::{IN_PAGE_LINK_SELECTOR, NAV_LINKS_SELECTOR, NAVBAR_SELECTOR, NAV_TOGGLE_SELECTOR};
use crate::dom::{self, EventBinding};

thread_local! {
    static CHROME_BINDINGS: RefCell<Vec<EventBinding>> = const { RefCell::new(Vec::new()) };
}

fn set_nav_open(open: bool) {
    if let Some(links) = dom::query(NAV_LINKS_SELECTOR) {
        links.class_list().toggle_with_force("active", open).ok();
    }
}

fn toggle_nav() {
    if let Some(links) = dom::query(NAV_LINKS_SELECTOR) {
        links.class_list().toggle("active").ok();
    }
}

fn scroll_to_anchor(href: &str) {
    let Some(selector) = anchor_target(href) else {
        return;
    };
    let Some(section) = dom::query(selector).and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let Some(window) = web_sys::window() else {
        return;
    };

    let options = ScrollToOptions::new();
    options.set_top(scroll_destination(f64::from(section.offset_top())));
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
    set_nav_open(false);
}

fn sync_navbar_style() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    if let Some(navbar) = dom::query(NAVBAR_SELECTOR) {
        navbar
            .class_list()
            .toggle_with_force("scrolled", navbar_is_scrolled(scroll_y))
            .ok();
    }
}

pub(crate) fn bind() {
    unbind();
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let mut bindings = Vec::new();

    if let Some(toggle) = dom::query(NAV_TOGGLE_SELECTOR) {
        bindings.extend(EventBinding::listen(&toggle, "click", |_| toggle_nav()));
    }

    // Delegated so links inside rendered regions behave the same.
    bindings.extend(EventBinding::listen(&document, "click", |e: Event| {
        let Some(link) = dom::closest_to_target(&e, IN_PAGE_LINK_SELECTOR) else {
            return;
        };
        e.prevent_default();
        if let Some(href) = link.get_attribute("href") {
            scroll_to_anchor(&href);
        }
    }));

    bindings.extend(EventBinding::listen(&window, "scroll", |_| sync_navbar_style()));
    sync_navbar_style();

    CHROME_BINDINGS.with(|slot| *slot.borrow_mut() = bindings);
}

pub(crate) fn unbind() {
    CHROME_BINDINGS.with(|slot| slot.borrow_mut().clear());
}
