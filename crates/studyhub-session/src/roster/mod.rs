//! Online roster: snapshot polling and display merge.

pub mod poller;
pub mod state;

pub use poller::run_roster_poll;
pub use state::RosterState;
