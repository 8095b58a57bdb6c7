use serde::{Deserialize, Serialize};

use crate::markup::push_escaped;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServerList {
    #[serde(default)]
    pub servers: Vec<ServerEntry>,
}

/// One game server card. Authored by hand in `data/servers.json`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServerEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Icon font classes, e.g. `fas fa-tree`.
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub offline: bool,
}

impl ServerEntry {
    /// Connect address shown on the card: `ip:port`, or just `ip` without a port.
    pub fn address(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{port}", self.ip),
            None => self.ip.clone(),
        }
    }
}

pub const NO_SERVERS_MESSAGE: &str = "No servers listed yet.";

/// Markup for the whole server list container.
pub fn render_server_list(list: &ServerList) -> String {
    if list.servers.is_empty() {
        return format!(r#"<p class="servers-empty">{NO_SERVERS_MESSAGE}</p>"#);
    }
    let mut html = String::new();
    for server in &list.servers {
        render_server_card(&mut html, server);
    }
    html
}

fn render_server_card(html: &mut String, server: &ServerEntry) {
    let (state_class, state_label) = if server.offline {
        ("offline", "Offline")
    } else {
        ("online", "Online")
    };

    html.push_str(r#"<div class="server-card "#);
    html.push_str(state_class);
    html.push_str(r#""><div class="server-header">"#);
    if !server.icon.is_empty() {
        html.push_str(r#"<i class="server-icon "#);
        push_escaped(html, &server.icon);
        html.push_str(r#"" aria-hidden="true"></i>"#);
    }
    html.push_str(r#"<div class="server-title"><h3>"#);
    push_escaped(html, &server.name);
    html.push_str("</h3>");
    if !server.kind.is_empty() {
        html.push_str(r#"<span class="server-type">"#);
        push_escaped(html, &server.kind);
        html.push_str("</span>");
    }
    html.push_str(r#"</div><span class="server-status "#);
    html.push_str(state_class);
    html.push_str(r#"">"#);
    html.push_str(state_label);
    html.push_str("</span></div>");
    if !server.description.is_empty() {
        html.push_str(r#"<p class="server-description">"#);
        push_escaped(html, &server.description);
        html.push_str("</p>");
    }
    if !server.ip.is_empty() {
        html.push_str(r#"<div class="server-address"><code>"#);
        push_escaped(html, &server.address());
        html.push_str("</code></div>");
    }
    html.push_str("</div>");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ServerList {
        serde_json::from_str(
            r#"{"servers": [
                {"name": "Alpha Survival", "description": "Vanilla+ <SMP>", "icon": "fas fa-tree",
                 "ip": "play.alpha.gg", "port": 25565, "type": "Minecraft", "offline": false},
                {"name": "Alpha Soccer", "description": "Epic mode", "icon": "", "ip": "10.0.0.2",
                 "type": "Brawl", "offline": true}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn renders_one_card_per_server() {
        let html = render_server_list(&sample());
        assert_eq!(html.matches(r#"<div class="server-card "#).count(), 2);
        assert!(html.contains("<code>play.alpha.gg:25565</code>"));
        assert!(html.contains("<code>10.0.0.2</code>"));
        assert!(html.contains("Vanilla+ &lt;SMP&gt;"));
    }

    #[test]
    fn offline_servers_are_marked() {
        let html = render_server_list(&sample());
        assert!(html.contains(r#"<div class="server-card offline">"#));
        assert!(html.contains(r#"<span class="server-status offline">Offline</span>"#));
        assert!(html.contains(r#"<span class="server-status online">Online</span>"#));
    }

    #[test]
    fn rendering_twice_is_byte_identical() {
        let list = sample();
        assert_eq!(render_server_list(&list), render_server_list(&list));
    }

    #[test]
    fn empty_list_renders_message() {
        let html = render_server_list(&ServerList::default());
        assert_eq!(html, r#"<p class="servers-empty">No servers listed yet.</p>"#);
    }

    #[test]
    fn icon_is_an_icon_font_class() {
        let html = render_server_list(&sample());
        assert_eq!(html.matches(r#"<i class="server-icon "#).count(), 1);
        assert!(html.contains(r#"<i class="server-icon fas fa-tree" aria-hidden="true"></i>"#));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn bundled_site_data_renders() {
        let list: ServerList =
            serde_json::from_str(include_str!("../../client/public/data/servers.json")).unwrap();
        let html = render_server_list(&list);
        assert_eq!(html.matches(r#"<div class="server-card "#).count(), list.servers.len());
        for server in &list.servers {
            assert!(html.contains(&format!(r#"<i class="server-icon {}""#, server.icon)));
        }
        assert!(!html.contains("<img"));
    }
}
