use web_sys::{ScrollBehavior, ScrollIntoViewOptions};
use yew::prelude::*;

/// Smooth-scrolls to a section by element id. Unknown ids are ignored.
pub fn scroll_to_section(id: &str) {
    if let Some(el) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        el.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

/// Click handler for in-page anchors: suppress navigation, scroll instead.
pub fn anchor_callback(id: &'static str) -> Callback<MouseEvent> {
    Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        scroll_to_section(id);
    })
}

/// Pins the page while the mobile menu is open. Returns the scroll offset the
/// caller must hand back to `unlock_scroll` to land on the same spot.
pub fn lock_scroll() -> f64 {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return 0.0,
    };
    let offset = window.page_y_offset().unwrap_or(0.0);
    if let Some(body) = window.document().and_then(|d| d.body()) {
        let style = body.style();
        let _ = style.set_property("position", "fixed");
        let _ = style.set_property("top", &format!("-{offset}px"));
        let _ = style.set_property("width", "100%");
    }
    offset
}

pub fn unlock_scroll(offset: f64) {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return,
    };
    if let Some(body) = window.document().and_then(|d| d.body()) {
        let style = body.style();
        let _ = style.remove_property("position");
        let _ = style.remove_property("top");
        let _ = style.remove_property("width");
    }
    window.scroll_to_with_x_and_y(0.0, offset);
}
