use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget};

pub(crate) fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub(crate) fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub(crate) fn query(selector: &str) -> Option<Element> {
    document()?.query_selector(selector).ok().flatten()
}

/// Set text on an element if the page has it.
pub(crate) fn set_text(id: &str, text: &str) {
    if let Some(el) = by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub(crate) fn set_body_overflow(value: &str) {
    if let Some(body) = document().and_then(|doc| doc.body()) {
        body.style().set_property("overflow", value).ok();
    }
}

/// Nearest ancestor-or-self of the event target matching `selector`.
pub(crate) fn closest_to_target(e: &Event, selector: &str) -> Option<Element> {
    e.target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}

pub(crate) fn log_info(message: &str) {
    web_sys::console::info_1(&message.into());
}

pub(crate) fn log_warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

/// A registered DOM listener. Dropping it unregisters the handler.
pub(crate) struct EventBinding {
    target: EventTarget,
    event: &'static str,
    handler: Closure<dyn Fn(Event)>,
}

impl EventBinding {
    pub(crate) fn listen(
        target: &EventTarget,
        event: &'static str,
        handler: impl Fn(Event) + 'static,
    ) -> Option<Self> {
        let handler = Closure::<dyn Fn(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())
            .ok()?;
        Some(Self {
            target: target.clone(),
            event,
            handler,
        })
    }
}

impl Drop for EventBinding {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.handler.as_ref().unchecked_ref());
    }
}
