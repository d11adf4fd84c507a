use crate::model::{classify, par_for_hole, score_label};
use crate::score::leaderboard::Leaderboard;
use crate::score::snapshot::RoundSnapshot;
use crate::score::store::ScoreStore;
use maud::{Markup, html};

fn render_standings(board: &Leaderboard) -> Markup {
    html! {
        table class="styled-table standings" {
            thead {
                tr {
                    th { "POS" }
                    th { "PLAYER" }
                    th { "THRU" }
                    th { "TOTAL" }
                    th { "VS PAR" }
                    th { "NET" }
                }
            }
            tbody {
                @for s in &board.standings {
                    tr data-player=(s.player_id) {
                        td { (s.position) }
                        td { (s.name) }
                        td { (s.holes_played) }
                        td { @if s.has_played() { (s.total_strokes) } @else { "-" } }
                        td { (s.vs_par_display()) }
                        td { (s.net_display()) }
                    }
                }
            }
        }
    }
}

fn render_card(snapshot: &RoundSnapshot, scores: &ScoreStore, hole_count: u32) -> Markup {
    html! {
        table class="scorecard" {
            thead {
                tr {
                    th { "Hole" }
                    @for hole in 1..=hole_count {
                        th class=[scores.any_scored(hole, &snapshot.players).then_some("hole-scored")] { (hole) }
                    }
                }
                tr class="par-row" {
                    th { "Par" }
                    @for hole in 1..=hole_count {
                        td { (par_for_hole(&snapshot.pars, hole)) }
                    }
                }
            }
            tbody {
                @for player in &snapshot.players {
                    tr data-player=(player.id) {
                        th { (player.name) }
                        @for hole in 1..=hole_count {
                            @let par = par_for_hole(&snapshot.pars, hole);
                            @match scores.get(&player.id, hole) {
                                Some(strokes) => {
                                    td class=(classify(strokes, par).css_class()) title=(score_label(strokes, par)) {
                                        (strokes)
                                    }
                                }
                                None => { td class="score-empty" {} }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Standings followed by the full hole-by-hole card.
#[must_use]
pub fn render_leaderboard(snapshot: &RoundSnapshot, board: &Leaderboard) -> Markup {
    let scores = snapshot.score_store();
    html! {
        div class="leaderboard" data-round=(snapshot.round.id) {
            h3 { (snapshot.round.course_name) }
            p class="progress" {
                "Par " (board.round_par) " · thru " (board.progress()) " of " (board.hole_count)
            }
            @if let Some(leader) = board.leader() {
                p class="leader" { "Leader: " (leader.name) " (" (leader.vs_par_display()) ")" }
            }
            (render_standings(board))
            (render_card(snapshot, &scores, board.hole_count))
        }
    }
}
