pub mod runtime;
pub mod scorecard;

pub use runtime::run_scorecard;
pub use scorecard::{Effect, Msg, Origin, ScorecardModel, SyncEvent, WriteStatus, update};
