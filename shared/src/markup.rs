//! Helpers shared by the view-model → markup builders.

/// Escape text for use inside element content or a double-quoted attribute.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    push_escaped(&mut out, raw);
    out
}

pub fn push_escaped(out: &mut String, raw: &str) {
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

/// Escape free-form text and turn line breaks into `<br>`.
pub fn escape_multiline(raw: &str) -> String {
    raw.lines()
        .map(escape_html)
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Render `<ul>` with one escaped `<li>` per item. Empty input renders nothing.
pub fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let mut html = String::from("<ul>");
    for item in items {
        html.push_str("<li>");
        push_escaped(&mut html, item);
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}
