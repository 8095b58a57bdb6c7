use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_SITE_DIR: &str = "client/dist";
pub const STATS_FILE_NAME: &str = "discord-stats.json";
pub const DEFAULT_WIDGET_POLL_INTERVAL_SECS: u64 = 300; // 5 minutes
pub const DEFAULT_UPSTREAM_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS: u64 = 3;

/// Guild whose widget is polled. Unset or blank means demo data.
pub fn server_id() -> Option<String> {
    std::env::var("SERVER_ID")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn server_port() -> u16 {
    std::env::var("SERVER_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SERVER_PORT)
}

pub fn site_dir() -> PathBuf {
    std::env::var("SITE_DIR")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SITE_DIR))
}

/// Where the generated stats file goes. Defaults to the site directory so the
/// page can fetch it next to itself.
pub fn stats_output_path() -> PathBuf {
    std::env::var("STATS_OUTPUT_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| site_dir().join(STATS_FILE_NAME))
}

pub fn widget_poll_interval() -> Duration {
    std::env::var("WIDGET_POLL_INTERVAL_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_WIDGET_POLL_INTERVAL_SECS))
}

pub fn upstream_http_timeout() -> Duration {
    std::env::var("UPSTREAM_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_UPSTREAM_HTTP_TIMEOUT_SECS))
}

pub fn upstream_connect_timeout() -> Duration {
    std::env::var("UPSTREAM_CONNECT_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS))
}

/// Write the stats file once and exit instead of serving.
pub fn stats_oneshot() -> bool {
    std::env::var("STATS_ONESHOT")
        .map(|value| {
            let normalized = value.trim().to_ascii_lowercase();
            matches!(normalized.as_str(), "1" | "true" | "yes" | "on")
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_server_id_means_demo_mode() {
        temp_env::with_var("SERVER_ID", Some("   "), || {
            assert_eq!(server_id(), None);
        });
        temp_env::with_var("SERVER_ID", Some(" 1172812733100609547 "), || {
            assert_eq!(server_id().as_deref(), Some("1172812733100609547"));
        });
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        temp_env::with_vars(
            [
                ("SERVER_PORT", Some("0")),
                ("WIDGET_POLL_INTERVAL_SECS", Some("soon")),
                ("UPSTREAM_HTTP_TIMEOUT_SECS", Some("-4")),
            ],
            || {
                assert_eq!(server_port(), DEFAULT_SERVER_PORT);
                assert_eq!(
                    widget_poll_interval(),
                    Duration::from_secs(DEFAULT_WIDGET_POLL_INTERVAL_SECS)
                );
                assert_eq!(
                    upstream_http_timeout(),
                    Duration::from_secs(DEFAULT_UPSTREAM_HTTP_TIMEOUT_SECS)
                );
            },
        );
    }

    #[test]
    fn stats_output_follows_site_dir() {
        temp_env::with_vars(
            [("SITE_DIR", Some("public")), ("STATS_OUTPUT_PATH", None)],
            || {
                assert_eq!(stats_output_path(), PathBuf::from("public/discord-stats.json"));
            },
        );
        temp_env::with_var("STATS_OUTPUT_PATH", Some("/tmp/stats.json"), || {
            assert_eq!(stats_output_path(), PathBuf::from("/tmp/stats.json"));
        });
    }

    #[test]
    fn oneshot_flag_accepts_common_truthy_values() {
        for value in ["1", "true", "YES", " on "] {
            temp_env::with_var("STATS_ONESHOT", Some(value), || assert!(stats_oneshot()));
        }
        temp_env::with_var("STATS_ONESHOT", Some("nope"), || assert!(!stats_oneshot()));
        temp_env::with_var("STATS_ONESHOT", None::<&str>, || assert!(!stats_oneshot()));
    }
}
