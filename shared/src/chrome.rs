//! Page chrome rules that don't need a document to evaluate.

/// Space kept above a scrolled-to section for the fixed navbar.
pub const NAV_SCROLL_OFFSET: f64 = 80.0;
/// Vertical scroll past which the navbar gets its `scrolled` style.
pub const NAVBAR_SCROLLED_THRESHOLD: f64 = 50.0;

/// Selector for the element an in-page link points at, or `None` for a bare `#`
/// (and anything that isn't a same-page fragment).
pub fn anchor_target(href: &str) -> Option<&str> {
    let fragment = href.strip_prefix('#')?;
    if fragment.is_empty() {
        return None;
    }
    Some(href)
}

/// Scroll position that puts a section's top just below the navbar.
pub fn scroll_destination(offset_top: f64) -> f64 {
    (offset_top - NAV_SCROLL_OFFSET).max(0.0)
}

pub fn navbar_is_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_SCROLLED_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hash_has_no_target() {
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/about"), None);
        assert_eq!(anchor_target("#tournaments"), Some("#tournaments"));
    }

    #[test]
    fn destination_leaves_room_for_navbar() {
        assert_eq!(scroll_destination(1000.0), 920.0);
        assert_eq!(scroll_destination(30.0), 0.0);
    }

    #[test]
    fn navbar_threshold_is_exclusive() {
        assert!(!navbar_is_scrolled(0.0));
        assert!(!navbar_is_scrolled(50.0));
        assert!(navbar_is_scrolled(50.5));
    }
}
