pub mod leaderboard;
pub mod snapshot;
pub mod store;
pub mod sync;

pub use leaderboard::{Leaderboard, PlayerStanding, compute_leaderboard};
pub use snapshot::{RoundSnapshot, load_round_snapshot};
pub use store::ScoreStore;
pub use sync::SyncEngine;
