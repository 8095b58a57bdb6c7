pub const SERVER_ID: &str = "1172812733100609547";
pub const STATS_FILE: &str = "discord-stats.json";

pub const SERVERS_FILE: &str = "data/servers.json";
pub const STAFF_FILE: &str = "data/staff.json";
pub const TOURNAMENTS_FILE: &str = "data/tournaments.json";

pub const STATS_REFRESH_MS: u64 = 60_000;
pub const STATS_LABEL_TICK_MS: u64 = 60_000;
/// How often the page schedule is pumped. Task periods are multiples of this.
pub const SCHEDULE_PUMP_MS: u32 = 1_000;

// Stats widget targets
pub const SERVER_NAME_ID: &str = "serverName";
pub const ONLINE_COUNT_ID: &str = "onlineCount";
pub const TOTAL_MEMBERS_ID: &str = "totalMembers";
pub const VOICE_CHANNELS_ID: &str = "voiceChannels";
pub const LAST_UPDATED_ID: &str = "lastUpdated";
pub const JOIN_BUTTON_SELECTOR: &str = ".join-btn";

// Rendered regions
pub const SERVERS_CONTAINER_ID: &str = "servers-container";
pub const STAFF_CONTAINER_ID: &str = "staff-container";
pub const FEATURED_TOURNAMENT_ID: &str = "featured-tournament";
pub const ARCHIVED_TOURNAMENTS_ID: &str = "archived-tournaments";

// Chrome
pub const NAV_TOGGLE_SELECTOR: &str = ".nav-mobile-toggle";
pub const NAV_LINKS_SELECTOR: &str = ".nav-links";
pub const NAVBAR_SELECTOR: &str = ".navbar";
pub const IN_PAGE_LINK_SELECTOR: &str = "a[href^=\"#\"]";
pub const POPUP_BUTTON_SELECTOR: &str = "[data-popup-id]";
