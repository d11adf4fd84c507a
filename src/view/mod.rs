pub mod hole_map;
pub mod leaderboard;

pub use hole_map::render_hole_map;
pub use leaderboard::render_leaderboard;
