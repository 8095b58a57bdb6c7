pub mod chrome;
pub mod error;
pub mod format;
pub mod markup;
pub mod popup;
pub mod schedule;
pub mod servers;
pub mod sources;
pub mod staff;
pub mod stats;
pub mod tournament;

pub use error::FetchError;
pub use popup::{CloseTrigger, PopupState, PopupView};
pub use schedule::{Schedule, TaskHandle};
pub use servers::{ServerEntry, ServerList};
pub use staff::{StaffMember, StaffRole, StaffRoster};
pub use stats::{StatsDisplay, StatsFile, StatsSnapshot, StatsSource, WidgetResponse};
pub use tournament::{Tournament, TournamentDocument, TournamentLookup};
