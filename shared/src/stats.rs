use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::format::{format_count, parse_timestamp, time_ago};

pub const DEFAULT_SERVER_NAME: &str = "ALPHA COMMUNITY";
/// Discord channel type id for guild voice channels.
pub const VOICE_CHANNEL_TYPE: u8 = 2;

/// Statistics document generated ahead of time and served next to the page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatsFile {
    #[serde(default)]
    pub server_name: String,
    #[serde(default)]
    pub online_count: u64,
    #[serde(default)]
    pub voice_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<StatsOrigin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub update_history: Vec<HistoryPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime_percentage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_hour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fetch_error: bool,
}

/// Where a generated stats file got its numbers from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsOrigin {
    DiscordWidget,
    DemoData,
    FallbackData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn between(current: u64, previous: Option<u64>) -> Self {
        match previous {
            Some(prev) if current > prev => Self::Up,
            Some(prev) if current < prev => Self::Down,
            _ => Self::Stable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub timestamp: String,
    pub online: u64,
}

/// Public guild widget payload (`/api/guilds/{id}/widget.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WidgetResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub presence_count: Option<u64>,
    #[serde(default)]
    pub members: Vec<WidgetMember>,
    #[serde(default)]
    pub channels: Vec<WidgetChannel>,
    #[serde(default)]
    pub instant_invite: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WidgetMember {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WidgetChannel {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub channel_type: Option<u8>,
}

impl WidgetResponse {
    /// Members listed as online. Discord caps this list, so it can trail `presence_count`.
    pub fn listed_members(&self) -> u64 {
        self.members.len() as u64
    }

    /// Channels counted as voice. The widget only lists voice channels, so an
    /// untyped entry counts too.
    pub fn voice_channel_count(&self) -> u64 {
        self.channels
            .iter()
            .filter(|ch| ch.channel_type.is_none_or(|t| t == VOICE_CHANNEL_TYPE))
            .count() as u64
    }

    pub fn invite(&self) -> Option<&str> {
        self.instant_invite.as_deref().filter(|url| !url.is_empty())
    }
}

/// Normalized statistics, whichever source produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSnapshot {
    pub server_name: String,
    pub online_count: u64,
    pub member_count: u64,
    pub voice_channel_count: u64,
    pub last_updated: LastUpdated,
    pub invite_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastUpdated {
    At(DateTime<Utc>),
    /// Data came straight from the live API.
    Live,
    /// File carried a timestamp we could not read.
    Unknown,
}

/// The part of a stats file the page reads. Generator-only fields are ignored,
/// so an unexpected `source` or history entry never rejects the snapshot.
#[derive(Debug, Deserialize)]
struct SnapshotFileView {
    #[serde(default)]
    server_name: String,
    #[serde(default)]
    online_count: u64,
    #[serde(default)]
    voice_count: u64,
    #[serde(default)]
    last_updated: Option<String>,
    #[serde(default)]
    invite_url: Option<String>,
}

impl From<SnapshotFileView> for StatsSnapshot {
    fn from(file: SnapshotFileView) -> Self {
        let last_updated = match file.last_updated.as_deref() {
            None => LastUpdated::Live,
            Some(raw) => parse_timestamp(raw).map_or(LastUpdated::Unknown, LastUpdated::At),
        };
        Self {
            server_name: non_empty_or_default(Some(file.server_name)),
            online_count: file.online_count,
            // The file has no member total the page trusts; show the online count.
            member_count: file.online_count,
            voice_channel_count: file.voice_count,
            last_updated,
            invite_url: file.invite_url.filter(|url| !url.is_empty()),
        }
    }
}

impl From<WidgetResponse> for StatsSnapshot {
    fn from(widget: WidgetResponse) -> Self {
        Self {
            // The page shows presence only; the member list is capped by Discord.
            online_count: widget.presence_count.unwrap_or(0),
            member_count: widget.listed_members(),
            voice_channel_count: widget.voice_channel_count(),
            invite_url: widget.invite().map(str::to_string),
            server_name: non_empty_or_default(widget.name),
            last_updated: LastUpdated::Live,
        }
    }
}

fn non_empty_or_default(name: Option<String>) -> String {
    name.filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string())
}

/// Text written into the stats widget, one field per page element.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsDisplay {
    pub server_name: String,
    pub online: String,
    pub members: String,
    pub voice_channels: String,
    pub last_updated: String,
    pub invite_url: Option<String>,
    /// Instant the data was generated, kept so the label can be re-aged without refetching.
    pub updated_at: Option<DateTime<Utc>>,
}

impl StatsDisplay {
    /// Fixed content shown when no source could be reached.
    pub fn placeholder() -> Self {
        Self {
            server_name: DEFAULT_SERVER_NAME.to_string(),
            online: "250+".to_string(),
            members: "1,000+".to_string(),
            voice_channels: "8".to_string(),
            last_updated: "unknown".to_string(),
            invite_url: None,
            updated_at: None,
        }
    }

    pub fn from_snapshot(snapshot: StatsSnapshot, now: DateTime<Utc>) -> Self {
        let (last_updated, updated_at) = match snapshot.last_updated {
            LastUpdated::At(at) => (time_ago(at, now), Some(at)),
            LastUpdated::Live => ("just now".to_string(), Some(now)),
            LastUpdated::Unknown => ("unknown".to_string(), None),
        };
        Self {
            server_name: snapshot.server_name,
            online: format_count(snapshot.online_count),
            members: format_count(snapshot.member_count),
            voice_channels: snapshot.voice_channel_count.to_string(),
            last_updated,
            invite_url: snapshot.invite_url,
            updated_at,
        }
    }

    /// Recompute the relative-time label against a new clock reading.
    pub fn reage(&mut self, now: DateTime<Utc>) {
        if let Some(at) = self.updated_at {
            self.last_updated = time_ago(at, now);
        }
    }
}

/// Ordered places the stats widget can read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsSource {
    /// Generated snapshot served next to the page.
    SnapshotFile { path: String },
    /// Public guild widget API.
    GuildWidget { server_id: String },
}

impl StatsSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SnapshotFile { .. } => "snapshot file",
            Self::GuildWidget { .. } => "guild widget",
        }
    }

    /// Request URL. Only the snapshot file is cache-busted; the widget is always live.
    pub fn url(&self, now_ms: u64) -> String {
        match self {
            Self::SnapshotFile { path } => cache_busted(path, now_ms),
            Self::GuildWidget { server_id } => widget_url(server_id),
        }
    }

    /// Decode a response body for this source into the normalized shape.
    pub fn decode(&self, body: &str) -> Result<StatsSnapshot, crate::FetchError> {
        Ok(match self {
            Self::SnapshotFile { .. } => serde_json::from_str::<SnapshotFileView>(body)?.into(),
            Self::GuildWidget { .. } => serde_json::from_str::<WidgetResponse>(body)?.into(),
        })
    }
}

pub fn widget_url(server_id: &str) -> String {
    format!("https://discord.com/api/guilds/{server_id}/widget.json")
}

/// Append a `t=<ms>` query parameter so intermediaries never serve a stale copy.
pub fn cache_busted(path: &str, now_ms: u64) -> String {
    let sep = if path.contains('?') { '&' } else { '?' };
    format!("{path}{sep}t={now_ms}")
}
