use std::path::Path;

use alpha_shared::stats::{HistoryPoint, StatsOrigin, Trend, widget_url};
use alpha_shared::{StatsFile, WidgetResponse};
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{info, warn};

use crate::config::widget_poll_interval;
use crate::state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const HISTORY_LEN: usize = 10;
const UPTIME_PERCENTAGE: &str = "99.8%";
const PEAK_HOUR: &str = "19:00 UTC";

/// What one poll of the guild widget produced.
pub enum WidgetPoll {
    /// No guild configured.
    NotConfigured,
    Fetched(WidgetResponse),
    Failed,
}

pub async fn run(state: AppState) {
    let mut interval = tokio::time::interval(widget_poll_interval());

    // First tick fires immediately so the page has stats right after startup.
    loop {
        interval.tick().await;
        run_once(&state).await;
    }
}

/// Poll the widget once, then write and publish the resulting stats file.
pub async fn run_once(state: &AppState) -> StatsFile {
    let poll = match state.server_id.as_deref() {
        None => {
            info!("SERVER_ID not set, generating demo stats");
            WidgetPoll::NotConfigured
        }
        Some(server_id) => match fetch_widget(&state.http_client, server_id).await {
            Ok(widget) => WidgetPoll::Fetched(widget),
            Err(e) => {
                warn!(error = %e, server_id, "guild widget fetch failed");
                WidgetPoll::Failed
            }
        },
    };
    publish(state, poll, Utc::now()).await
}

pub async fn publish(state: &AppState, poll: WidgetPoll, now: DateTime<Utc>) -> StatsFile {
    let previous = load_previous(&state.stats_path).await;
    let stats = build_stats(state.server_id.as_deref(), poll, previous.as_ref(), now);

    match write_atomic(&state.stats_path, &stats).await {
        Ok(()) => info!(
            online = stats.online_count,
            estimated_total = ?stats.estimated_total,
            source = ?stats.source,
            path = %state.stats_path.display(),
            "stats file written"
        ),
        Err(e) => warn!(
            error = %e,
            path = %state.stats_path.display(),
            "failed to write stats file"
        ),
    }

    *state.stats.write().await = Some(stats.clone());
    stats
}

async fn fetch_widget(client: &reqwest::Client, server_id: &str) -> Result<WidgetResponse, BoxError> {
    let resp = client.get(widget_url(server_id)).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(format!("widget API returned {status}").into());
    }
    Ok(resp.json::<WidgetResponse>().await?)
}

/// Build the next stats file from a poll result and whatever was written last time.
pub fn build_stats(
    server_id: Option<&str>,
    poll: WidgetPoll,
    previous: Option<&StatsFile>,
    now: DateTime<Utc>,
) -> StatsFile {
    let stamp = now.to_rfc3339_opts(SecondsFormat::Secs, true);

    let mut stats = match poll {
        WidgetPoll::NotConfigured => demo_stats(),
        WidgetPoll::Fetched(widget) => widget_stats(server_id, &widget),
        WidgetPoll::Failed => match previous {
            Some(prev) if is_reusable(prev) => {
                info!("reusing previous stats after widget failure");
                StatsFile {
                    fetch_error: true,
                    ..prev.clone()
                }
            }
            _ => fallback_stats(server_id),
        },
    };

    stats.last_updated = Some(stamp.clone());
    stats.trend = Some(Trend::between(
        stats.online_count,
        previous.map(|prev| prev.online_count),
    ));

    let mut history: Vec<HistoryPoint> = previous
        .map(|prev| {
            let keep = prev.update_history.len().saturating_sub(HISTORY_LEN - 1);
            prev.update_history[keep..].to_vec()
        })
        .unwrap_or_default();
    history.push(HistoryPoint {
        timestamp: stamp,
        online: stats.online_count,
    });
    stats.update_history = history;

    stats.uptime_percentage = Some(UPTIME_PERCENTAGE.to_string());
    stats.peak_hour = Some(PEAK_HOUR.to_string());
    stats
}

/// Only real data is carried forward. Demo and origin-less files are not.
fn is_reusable(prev: &StatsFile) -> bool {
    matches!(
        prev.source,
        Some(StatsOrigin::DiscordWidget | StatsOrigin::FallbackData)
    )
}

/// The widget has no member total, so estimate one assuming about a quarter is online.
pub fn estimate_total(online: u64) -> u64 {
    if online == 0 {
        return 100;
    }
    (online * 4).max(online + 10)
}

fn widget_stats(server_id: Option<&str>, widget: &WidgetResponse) -> StatsFile {
    // The stored online count is the listed members, not the presence count.
    let online = widget.listed_members();
    StatsFile {
        server_name: widget
            .name
            .clone()
            .unwrap_or_else(|| "Unknown Server".to_string()),
        server_id: server_id.map(str::to_string),
        online_count: online,
        voice_count: widget.channels.len() as u64,
        invite_url: widget.invite().map(str::to_string),
        estimated_total: Some(estimate_total(online)),
        source: Some(StatsOrigin::DiscordWidget),
        ..StatsFile::default()
    }
}

fn demo_stats() -> StatsFile {
    StatsFile {
        server_name: "Demo Discord Server".to_string(),
        server_id: Some("demo123".to_string()),
        online_count: 247,
        estimated_total: Some(1250),
        voice_count: 5,
        invite_url: Some("https://discord.gg/demo".to_string()),
        source: Some(StatsOrigin::DemoData),
        note: Some("Set SERVER_ID for real Discord widget data".to_string()),
        ..StatsFile::default()
    }
}

fn fallback_stats(server_id: Option<&str>) -> StatsFile {
    StatsFile {
        server_name: "My Discord Server".to_string(),
        server_id: server_id.map(str::to_string),
        online_count: 150,
        estimated_total: Some(750),
        voice_count: 3,
        source: Some(StatsOrigin::FallbackData),
        note: Some("Enable server widget in Discord settings for live data".to_string()),
        ..StatsFile::default()
    }
}

async fn load_previous(path: &Path) -> Option<StatsFile> {
    let body = match tokio::fs::read_to_string(path).await {
        Ok(body) => body,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(error = %e, path = %path.display(), "failed to read previous stats file");
            return None;
        }
    };
    match serde_json::from_str(&body) {
        Ok(stats) => Some(stats),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "previous stats file is not valid JSON");
            None
        }
    }
}

/// Write pretty JSON to a sibling temp file, then rename over the target so readers
/// never see a partial file.
async fn write_atomic(path: &Path, stats: &StatsFile) -> Result<(), BoxError> {
    let json = serde_json::to_vec_pretty(stats)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alpha_shared::stats::{WidgetChannel, WidgetMember};
    use std::path::PathBuf;

    fn now() -> DateTime<Utc> {
        "2025-02-01T10:00:00Z".parse().unwrap()
    }

    fn widget(presence: Option<u64>, members: usize, channels: usize) -> WidgetResponse {
        WidgetResponse {
            name: Some("Alpha".to_string()),
            presence_count: presence,
            members: vec![WidgetMember::default(); members],
            channels: vec![WidgetChannel::default(); channels],
            instant_invite: Some("https://discord.gg/alpha".to_string()),
        }
    }

    fn previous_with(online: u64, source: Option<StatsOrigin>, history: usize) -> StatsFile {
        StatsFile {
            server_name: "Alpha".to_string(),
            online_count: online,
            source,
            update_history: (0..history)
                .map(|i| HistoryPoint {
                    timestamp: format!("2025-01-{:02}T00:00:00Z", i + 1),
                    online: i as u64,
                })
                .collect(),
            ..StatsFile::default()
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("alpha-widget-poller-{}-{name}", std::process::id()))
            .join("discord-stats.json")
    }

    #[test]
    fn estimate_total_never_undercounts_small_servers() {
        assert_eq!(estimate_total(0), 100);
        assert_eq!(estimate_total(2), 12);
        assert_eq!(estimate_total(50), 200);
    }

    #[test]
    fn widget_poll_counts_listed_members_and_channels() {
        let stats = build_stats(
            Some("42"),
            WidgetPoll::Fetched(widget(Some(120), 30, 4)),
            None,
            now(),
        );
        assert_eq!(stats.server_name, "Alpha");
        assert_eq!(stats.online_count, 30);
        assert_eq!(stats.voice_count, 4);
        assert_eq!(stats.estimated_total, Some(120));
        assert_eq!(stats.source, Some(StatsOrigin::DiscordWidget));
        assert_eq!(stats.last_updated.as_deref(), Some("2025-02-01T10:00:00Z"));
        assert_eq!(stats.trend, Some(Trend::Stable));
        assert_eq!(stats.uptime_percentage.as_deref(), Some("99.8%"));
        assert_eq!(stats.peak_hour.as_deref(), Some("19:00 UTC"));
        assert!(!stats.fetch_error);
    }

    #[test]
    fn missing_name_is_unknown_server() {
        let mut w = widget(None, 7, 0);
        w.name = None;
        let stats = build_stats(Some("42"), WidgetPoll::Fetched(w), None, now());
        assert_eq!(stats.online_count, 7);
        assert_eq!(stats.server_name, "Unknown Server");
    }

    #[test]
    fn no_server_id_generates_demo_data() {
        let stats = build_stats(None, WidgetPoll::NotConfigured, None, now());
        assert_eq!(stats.server_name, "Demo Discord Server");
        assert_eq!(stats.online_count, 247);
        assert_eq!(stats.estimated_total, Some(1250));
        assert_eq!(stats.voice_count, 5);
        assert_eq!(stats.source, Some(StatsOrigin::DemoData));
    }

    #[test]
    fn failure_reuses_previous_real_data() {
        let prev = previous_with(80, Some(StatsOrigin::DiscordWidget), 0);
        let stats = build_stats(Some("42"), WidgetPoll::Failed, Some(&prev), now());
        assert_eq!(stats.online_count, 80);
        assert!(stats.fetch_error);
        assert_eq!(stats.source, Some(StatsOrigin::DiscordWidget));
        assert_eq!(stats.last_updated.as_deref(), Some("2025-02-01T10:00:00Z"));
        assert_eq!(stats.trend, Some(Trend::Stable));
    }

    #[test]
    fn failure_after_demo_or_nothing_uses_fallback() {
        let demo = previous_with(247, Some(StatsOrigin::DemoData), 0);
        let untagged = previous_with(10, None, 0);
        for prev in [Some(&demo), Some(&untagged), None] {
            let stats = build_stats(Some("42"), WidgetPoll::Failed, prev, now());
            assert_eq!(stats.server_name, "My Discord Server");
            assert_eq!(stats.online_count, 150);
            assert_eq!(stats.estimated_total, Some(750));
            assert_eq!(stats.source, Some(StatsOrigin::FallbackData));
            assert_eq!(stats.server_id.as_deref(), Some("42"));
        }
    }

    #[test]
    fn trend_compares_against_previous_online_count() {
        let prev = previous_with(100, Some(StatsOrigin::DiscordWidget), 0);
        let up = build_stats(Some("1"), WidgetPoll::Fetched(widget(None, 101, 0)), Some(&prev), now());
        let down = build_stats(Some("1"), WidgetPoll::Fetched(widget(None, 99, 0)), Some(&prev), now());
        let same = build_stats(Some("1"), WidgetPoll::Fetched(widget(None, 100, 0)), Some(&prev), now());
        assert_eq!(up.trend, Some(Trend::Up));
        assert_eq!(down.trend, Some(Trend::Down));
        assert_eq!(same.trend, Some(Trend::Stable));
    }

    #[test]
    fn history_keeps_the_last_ten_points() {
        let prev = previous_with(5, Some(StatsOrigin::DiscordWidget), 12);
        let stats = build_stats(Some("1"), WidgetPoll::Fetched(widget(None, 33, 0)), Some(&prev), now());
        assert_eq!(stats.update_history.len(), 10);
        assert_eq!(stats.update_history[0].online, 3);
        let last = stats.update_history.last().unwrap();
        assert_eq!(last.online, 33);
        assert_eq!(last.timestamp, "2025-02-01T10:00:00Z");

        let first_run = build_stats(None, WidgetPoll::NotConfigured, None, now());
        assert_eq!(first_run.update_history.len(), 1);
    }

    #[tokio::test]
    async fn publish_writes_file_and_updates_state() {
        let path = temp_path("publish");
        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        let state = AppState::new(None, PathBuf::from("."), path.clone());

        let first = publish(&state, WidgetPoll::NotConfigured, now()).await;
        assert_eq!(state.stats.read().await.as_ref(), Some(&first));

        let written: StatsFile =
            serde_json::from_str(&tokio::fs::read_to_string(&path).await.unwrap()).unwrap();
        assert_eq!(written, first);
        assert!(!path.with_extension("json.tmp").exists());

        // Second run sees the first file as previous.
        let second = publish(&state, WidgetPoll::NotConfigured, now()).await;
        assert_eq!(second.update_history.len(), 2);

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }

    #[tokio::test]
    async fn corrupt_previous_file_is_ignored() {
        let path = temp_path("corrupt");
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, b"{not json").await.unwrap();
        let state = AppState::new(Some("42".to_string()), PathBuf::from("."), path.clone());

        let stats = publish(&state, WidgetPoll::Failed, now()).await;
        assert_eq!(stats.source, Some(StatsOrigin::FallbackData));
        assert_eq!(stats.update_history.len(), 1);

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }
}
