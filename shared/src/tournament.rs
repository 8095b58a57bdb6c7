use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::markup::{bullet_list, escape_multiline, push_escaped};

pub const NO_ACTIVE_TOURNAMENT_MESSAGE: &str = "No active tournaments right now. Check back soon!";
pub const NO_TEAMS_MESSAGE: &str = "No teams registered yet.";
pub const NO_BRACKET_MESSAGE: &str = "Bracket not released yet.";

/// `data/tournaments.json`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_enabled: Option<bool>,
    #[serde(default)]
    pub active: Vec<Tournament>,
    #[serde(default)]
    pub archived: Vec<Tournament>,
}

impl TournamentDocument {
    /// The tournament shown in the featured slot. Only the first active entry is
    /// ever featured; `activeEnabled: false` hides it.
    pub fn featured(&self) -> Option<&Tournament> {
        if self.active_enabled == Some(false) {
            return None;
        }
        self.active.first()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub quote: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub game: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub registration_open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winners: Option<Winners>,
    #[serde(default)]
    pub details: TournamentDetails,
    #[serde(default)]
    pub registered_teams: Vec<Team>,
    #[serde(default)]
    pub bracket: Vec<BracketRound>,
}

impl Tournament {
    /// Last match of the last round. `None` when that round has no matches yet.
    pub fn final_match(&self) -> Option<&BracketMatch> {
        self.bracket.last()?.matches.last()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TournamentDetails {
    #[serde(default)]
    pub format: Vec<String>,
    #[serde(default)]
    pub rewards: Rewards,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rewards {
    #[serde(default)]
    pub first: Vec<String>,
    #[serde(default)]
    pub second: Vec<String>,
    #[serde(default)]
    pub third: Vec<String>,
}

impl Rewards {
    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.second.is_empty() && self.third.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Winners {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third: Option<String>,
}

impl Winners {
    /// Placings that were recorded, podium order.
    pub fn placings(&self) -> impl Iterator<Item = (Tier, &str)> {
        [
            (Tier::Gold, &self.first),
            (Tier::Silver, &self.second),
            (Tier::Bronze, &self.third),
        ]
        .into_iter()
        .filter_map(|(tier, name)| {
            name.as_deref()
                .filter(|n| !n.trim().is_empty())
                .map(|n| (tier, n))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    #[serde(default)]
    pub players: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BracketRound {
    pub title: String,
    #[serde(default)]
    pub matches: Vec<BracketMatch>,
}

/// A match line. Authored either as a bare string or as `{teams, info?, status?}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "MatchRepr")]
pub struct BracketMatch {
    pub teams: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MatchRepr {
    Plain(String),
    Full {
        teams: String,
        #[serde(default)]
        info: Option<String>,
        #[serde(default)]
        status: Option<String>,
    },
}

impl From<MatchRepr> for BracketMatch {
    fn from(repr: MatchRepr) -> Self {
        match repr {
            MatchRepr::Plain(teams) => Self {
                teams,
                info: None,
                status: None,
            },
            MatchRepr::Full {
                teams,
                info,
                status,
            } => Self {
                teams,
                info,
                status,
            },
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }
    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

/// Podium tier, used for reward cards and winner rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Gold,
    Silver,
    Bronze,
}

impl Tier {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Bronze => "bronze",
        }
    }

    pub fn medal(self) -> &'static str {
        match self {
            Self::Gold => "\u{1F947}",
            Self::Silver => "\u{1F948}",
            Self::Bronze => "\u{1F949}",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Gold => "First Place",
            Self::Silver => "Second Place",
            Self::Bronze => "Third Place",
        }
    }
}

/// Immutable id → tournament map built from one fetched document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TournamentLookup {
    by_id: HashMap<String, Tournament>,
}

impl TournamentLookup {
    /// Register every active and archived tournament. On duplicate ids the first
    /// occurrence (active before archived) wins.
    pub fn build(doc: &TournamentDocument) -> Self {
        let mut by_id = HashMap::with_capacity(doc.active.len() + doc.archived.len());
        for t in doc.active.iter().chain(&doc.archived) {
            by_id.entry(t.id.clone()).or_insert_with(|| t.clone());
        }
        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&Tournament> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Featured slot markup: the first active tournament or the empty-state message.
pub fn render_featured(doc: &TournamentDocument) -> String {
    let Some(t) = doc.featured() else {
        return format!(r#"<div class="tournament-empty"><p>{NO_ACTIVE_TOURNAMENT_MESSAGE}</p></div>"#);
    };

    let mut html = String::from(r#"<div class="tournament-card featured" data-tournament-id=""#);
    push_escaped(&mut html, &t.id);
    html.push_str(r#""><div class="tournament-header">"#);
    if !t.game.is_empty() {
        html.push_str(r#"<span class="tournament-game">"#);
        push_escaped(&mut html, &t.game);
        html.push_str("</span>");
    }
    html.push_str(r#"<h3 class="tournament-title">"#);
    push_escaped(&mut html, &t.title);
    html.push_str("</h3>");
    if !t.quote.is_empty() {
        html.push_str(r#"<p class="tournament-quote">"#);
        push_escaped(&mut html, &t.quote);
        html.push_str("</p>");
    }
    html.push_str("</div>");

    html.push_str(r#"<div class="tournament-meta">"#);
    for (label, value) in [("Date", &t.date), ("Format", &t.format)] {
        if value.is_empty() {
            continue;
        }
        html.push_str(r#"<div class="meta-item"><span class="meta-label">"#);
        html.push_str(label);
        html.push_str(r#"</span><span class="meta-value">"#);
        push_escaped(&mut html, value);
        html.push_str("</span></div>");
    }
    html.push_str("</div>");

    if !t.description.is_empty() {
        html.push_str(r#"<p class="tournament-description">"#);
        html.push_str(&escape_multiline(&t.description));
        html.push_str("</p>");
    }

    if let Some(winners) = &t.winners {
        push_winner_rows(&mut html, winners);
    }

    html.push_str(r#"<div class="tournament-registration">"#);
    match (t.registration_open, t.registration_link.as_deref()) {
        (true, Some(link)) if !link.is_empty() => {
            html.push_str(r#"<a class="register-btn" href=""#);
            push_escaped(&mut html, link);
            html.push_str(r#"" target="_blank" rel="noopener">Register Now</a>"#);
        }
        (true, _) => {
            html.push_str(r#"<span class="registration-status open">Registration Open</span>"#)
        }
        (false, _) => {
            html.push_str(r#"<span class="registration-status closed">Registration Closed</span>"#)
        }
    }
    html.push_str("</div>");

    html.push_str(r#"<div class="tournament-actions">"#);
    for (view, label) in [("details", "Details"), ("teams", "Teams"), ("bracket", "Bracket")] {
        push_popup_button(&mut html, "tournament-btn", &t.id, view);
        html.push_str(label);
        html.push_str("</button>");
    }
    html.push_str("</div></div>");
    html
}

/// Collapsible list of past tournaments. Each entry opens its details popup.
pub fn render_archived(doc: &TournamentDocument) -> String {
    if doc.archived.is_empty() {
        return String::new();
    }
    let mut html = format!(
        r#"<details class="archived-tournaments"><summary>Past Tournaments ({})</summary><div class="archived-list">"#,
        doc.archived.len()
    );
    for t in &doc.archived {
        push_popup_button(&mut html, "archived-item", &t.id, "details");
        html.push_str(r#"<span class="archived-title">"#);
        push_escaped(&mut html, &t.title);
        html.push_str("</span>");
        if !t.date.is_empty() {
            html.push_str(r#"<span class="archived-date">"#);
            push_escaped(&mut html, &t.date);
            html.push_str("</span>");
        }
        html.push_str("</button>");
    }
    html.push_str("</div></details>");
    html
}

fn push_popup_button(html: &mut String, class: &str, id: &str, view: &str) {
    html.push_str(r#"<button type="button" class=""#);
    html.push_str(class);
    html.push_str(r#"" data-popup-id=""#);
    push_escaped(html, id);
    html.push_str(r#"" data-popup-view=""#);
    html.push_str(view);
    html.push_str(r#"">"#);
}

fn push_winner_rows(html: &mut String, winners: &Winners) {
    let mut placings = winners.placings().peekable();
    if placings.peek().is_none() {
        return;
    }
    html.push_str(r#"<div class="tournament-winners">"#);
    for (tier, name) in placings {
        html.push_str(r#"<div class="winner "#);
        html.push_str(tier.css_class());
        html.push_str(r#""><span class="winner-medal">"#);
        html.push_str(tier.medal());
        html.push_str(r#"</span><span class="winner-name">"#);
        push_escaped(html, name);
        html.push_str("</span></div>");
    }
    html.push_str("</div>");
}

/// Details popup body. Every section is optional and only emitted when the
/// record carries data for it.
pub fn render_details(t: &Tournament) -> String {
    let details = &t.details;
    let mut html = String::from(r#"<div class="details-content">"#);

    if !details.format.is_empty() {
        html.push_str("<h4>Tournament Format</h4>");
        html.push_str(&bullet_list(&details.format));
    }

    if !details.rewards.is_empty() {
        html.push_str(r#"<h4>Tournament Rewards</h4><div class="rewards-grid">"#);
        let tiers = [
            (Tier::Gold, &details.rewards.first),
            (Tier::Silver, &details.rewards.second),
            (Tier::Bronze, &details.rewards.third),
        ];
        for (tier, items) in tiers {
            if items.is_empty() {
                continue;
            }
            html.push_str(r#"<div class="reward-card "#);
            html.push_str(tier.css_class());
            html.push_str(r#""><div class="reward-medal">"#);
            html.push_str(tier.medal());
            html.push_str("</div><h5>");
            html.push_str(tier.label());
            html.push_str("</h5>");
            html.push_str(&bullet_list(items));
            html.push_str("</div>");
        }
        html.push_str("</div>");
    }

    if let Some(notes) = details.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        html.push_str("<h4>Important Notes</h4><p>");
        html.push_str(&escape_multiline(notes));
        html.push_str("</p>");
    }

    if !details.highlights.is_empty() {
        html.push_str("<h4>Highlights</h4>");
        html.push_str(&bullet_list(&details.highlights));
    }

    if let Some(winners) = &t.winners
        && winners.placings().next().is_some()
    {
        html.push_str("<h4>Winners</h4>");
        push_winner_rows(&mut html, winners);
    }

    if let Some(final_match) = t.final_match() {
        html.push_str("<h4>Final Match</h4>");
        push_match(&mut html, final_match, "match final-match");
    }

    html.push_str("</div>");
    html
}

/// Teams popup body.
pub fn render_teams(t: &Tournament) -> String {
    if t.registered_teams.is_empty() {
        return format!(r#"<div class="teams-content"><p class="popup-empty">{NO_TEAMS_MESSAGE}</p></div>"#);
    }
    let mut html = String::from(r#"<div class="teams-content">"#);
    for team in &t.registered_teams {
        html.push_str(r#"<div class="team-card"><div class="team-name">"#);
        push_escaped(&mut html, &team.name);
        html.push_str("</div>");
        for player in &team.players {
            push_player(&mut html, "player-main", player, "Main");
        }
        if let Some(sub) = team.sub.as_deref().filter(|s| !s.is_empty()) {
            push_player(&mut html, "player-sub", sub, "Substitute");
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");
    html
}

fn push_player(html: &mut String, class: &str, name: &str, label: &str) {
    html.push_str(r#"<div class="team-player"><span class=""#);
    html.push_str(class);
    html.push_str(r#"">"#);
    push_escaped(html, name);
    html.push_str("</span><span>");
    html.push_str(label);
    html.push_str("</span></div>");
}

/// Bracket popup body: one block per round, in authored order.
pub fn render_bracket(t: &Tournament) -> String {
    if t.bracket.is_empty() {
        return format!(r#"<div class="bracket-content"><p class="popup-empty">{NO_BRACKET_MESSAGE}</p></div>"#);
    }
    let mut html = String::from(r#"<div class="bracket-content">"#);
    let last = t.bracket.len() - 1;
    for (i, round) in t.bracket.iter().enumerate() {
        html.push_str(r#"<div class="bracket-round"><h5>"#);
        push_escaped(&mut html, &round.title);
        html.push_str("</h5>");
        let class = if i == last { "match final-match" } else { "match" };
        for m in &round.matches {
            push_match(&mut html, m, class);
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");
    html
}

fn push_match(html: &mut String, m: &BracketMatch, class: &str) {
    html.push_str(r#"<div class=""#);
    html.push_str(class);
    html.push_str(r#""><div class="match-teams">"#);
    push_escaped(html, &m.teams);
    html.push_str("</div>");
    if let Some(info) = m.info.as_deref() {
        html.push_str(r#"<div class="match-info">"#);
        push_escaped(html, info);
        html.push_str("</div>");
    }
    if let Some(status) = m.status.as_deref() {
        html.push_str(r#"<div class="match-status">"#);
        push_escaped(html, status);
        html.push_str("</div>");
    }
    html.push_str("</div>");
}
