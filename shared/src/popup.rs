use std::str::FromStr;

use crate::tournament::{TournamentLookup, render_bracket, render_details, render_teams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupView {
    Details,
    Teams,
    Bracket,
}

impl PopupView {
    pub fn title(self) -> &'static str {
        match self {
            Self::Details => "Tournament Details",
            Self::Teams => "Registered Teams",
            Self::Bracket => "Tournament Bracket",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Details => "details",
            Self::Teams => "teams",
            Self::Bracket => "bracket",
        }
    }
}

impl FromStr for PopupView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "details" => Ok(Self::Details),
            "teams" => Ok(Self::Teams),
            "bracket" => Ok(Self::Bracket),
            other => Err(format!("unknown popup view: {other}")),
        }
    }
}

/// What closed the overlay. All triggers land in the same state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    Escape,
    Backdrop,
    CloseButton,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenPopup {
    pub tournament_id: String,
    pub view: PopupView,
    pub title: &'static str,
    pub body: String,
}

/// Overlay state. At most one popup is open at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PopupState {
    #[default]
    Closed,
    Open(OpenPopup),
}

impl PopupState {
    /// Open `view` for tournament `id`. An id missing from `lookup` leaves the
    /// state untouched and returns false. Opening over an open popup replaces it.
    pub fn open(&mut self, lookup: &TournamentLookup, id: &str, view: PopupView) -> bool {
        let Some(tournament) = lookup.get(id) else {
            return false;
        };
        let body = match view {
            PopupView::Details => render_details(tournament),
            PopupView::Teams => render_teams(tournament),
            PopupView::Bracket => render_bracket(tournament),
        };
        *self = Self::Open(OpenPopup {
            tournament_id: tournament.id.clone(),
            view,
            title: view.title(),
            body,
        });
        true
    }

    /// Returns true when this call actually closed an open popup.
    pub fn close(&mut self, _trigger: CloseTrigger) -> bool {
        let was_open = self.is_open();
        *self = Self::Closed;
        was_open
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Open(popup) => popup.title,
            Self::Closed => "",
        }
    }

    pub fn body(&self) -> &str {
        match self {
            Self::Open(popup) => &popup.body,
            Self::Closed => "",
        }
    }

    /// Value for `document.body.style.overflow` while in this state.
    pub fn body_overflow(&self) -> &'static str {
        if self.is_open() { "hidden" } else { "auto" }
    }
}
