use crate::model::{ParEntry, Player, par_for_hole, vs_par_label};
use crate::score::store::ScoreStore;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlayerStanding {
    pub player_id: String,
    pub name: String,
    pub handicap: i32,
    pub total_strokes: i32,
    pub vs_par: i32,
    pub holes_played: u32,
    pub net: i32,
    /// 1-based place on the leaderboard; 0 until ranked.
    pub position: usize,
}

impl PlayerStanding {
    #[must_use]
    pub fn has_played(&self) -> bool {
        self.holes_played > 0
    }

    /// "E", "+N", "-N"; "-" when nothing is recorded yet.
    #[must_use]
    pub fn vs_par_display(&self) -> String {
        if self.has_played() {
            vs_par_label(self.vs_par)
        } else {
            "-".to_string()
        }
    }

    #[must_use]
    pub fn net_display(&self) -> String {
        if self.has_played() {
            self.net.to_string()
        } else {
            "-".to_string()
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Leaderboard {
    pub standings: Vec<PlayerStanding>,
    pub hole_count: u32,
    pub round_par: i32,
}

impl Leaderboard {
    /// Top of the board, if anyone has played a hole.
    #[must_use]
    pub fn leader(&self) -> Option<&PlayerStanding> {
        self.standings.first().filter(|s| s.has_played())
    }

    /// Most holes played by any one player.
    #[must_use]
    pub fn progress(&self) -> u32 {
        self.standings
            .iter()
            .map(|s| s.holes_played)
            .max()
            .unwrap_or(0)
    }
}

/// Aggregates for one player over holes `1..=hole_count`.
#[must_use]
pub fn player_standing(
    player: &Player,
    pars: &[ParEntry],
    scores: &ScoreStore,
    hole_count: u32,
) -> PlayerStanding {
    let mut total_strokes = 0;
    let mut vs_par = 0;
    let mut holes_played = 0;
    for hole in 1..=hole_count {
        if let Some(strokes) = scores.get(&player.id, hole) {
            total_strokes += strokes;
            vs_par += strokes - par_for_hole(pars, hole);
            holes_played += 1;
        }
    }
    PlayerStanding {
        player_id: player.id.clone(),
        name: player.name.clone(),
        handicap: player.handicap,
        total_strokes,
        vs_par,
        holes_played,
        net: total_strokes - player.handicap,
        position: 0,
    }
}

/// Players with holes played come first, ascending by vs-par; everyone else
/// follows. Ties keep input order.
#[must_use]
pub fn compare_standings(a: &PlayerStanding, b: &PlayerStanding) -> Ordering {
    match (a.has_played(), b.has_played()) {
        (false, false) => Ordering::Equal,
        (false, true) => Ordering::Greater,
        (true, false) => Ordering::Less,
        (true, true) => a.vs_par.cmp(&b.vs_par),
    }
}

/// Stable sort and 1-based positions.
pub fn rank_standings(standings: &mut [PlayerStanding]) {
    standings.sort_by(compare_standings);
    for (i, standing) in standings.iter_mut().enumerate() {
        standing.position = i + 1;
    }
}

/// `players` must already be in display order; that order breaks ties.
#[must_use]
pub fn compute_leaderboard(
    players: &[Player],
    pars: &[ParEntry],
    scores: &ScoreStore,
    hole_count: u32,
) -> Leaderboard {
    let mut standings: Vec<PlayerStanding> = players
        .iter()
        .map(|p| player_standing(p, pars, scores, hole_count))
        .collect();
    rank_standings(&mut standings);
    let round_par = (1..=hole_count).map(|h| par_for_hole(pars, h)).sum();
    Leaderboard {
        standings,
        hole_count,
        round_par,
    }
}
