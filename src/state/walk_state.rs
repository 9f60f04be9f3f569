/// Walk state definitions for tracking catalog progress
///
/// A walk moves `Start -> (FetchingPage -> ExtractingListings)* -> Done`.
use std::fmt;

/// Represents the current state of a catalog walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkState {
    /// Seed URL known, nothing fetched yet
    Start,

    /// The current catalog page is being fetched
    FetchingPage,

    /// Entries of the fetched page are being turned into records
    ExtractingListings,

    /// No further pages will be fetched
    Done,
}

impl WalkState {
    /// Returns true if the walk has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if `next` is a legal successor of this state
    pub fn can_transition_to(&self, next: WalkState) -> bool {
        matches!(
            (self, next),
            (Self::Start, Self::FetchingPage)
                | (Self::FetchingPage, Self::ExtractingListings)
                | (Self::FetchingPage, Self::Done)
                | (Self::ExtractingListings, Self::FetchingPage)
                | (Self::ExtractingListings, Self::Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::FetchingPage => "fetching_page",
            Self::ExtractingListings => "extracting_listings",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for WalkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
