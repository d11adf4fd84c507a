use crate::mvu::scorecard::{Effect, Msg, ScorecardModel, update};

/// Feeds `msg` through `update` and hands each resulting effect, in order, to `run_effect`.
pub fn run_scorecard(model: &mut ScorecardModel, msg: Msg, mut run_effect: impl FnMut(Effect)) {
    for effect in update(model, msg) {
        run_effect(effect);
    }
}
