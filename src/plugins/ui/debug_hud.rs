//! Debug HUD: log score transitions. Works headless.

use bevy::prelude::*;

use crate::plugins::scoring::Score;

pub fn plugin(app: &mut App) {
    app.add_systems(Update, report_score);
}

fn report_score(score: Res<Score>, mut last: Local<u32>) {
    if score.score != *last {
        *last = score.score;
        info!("score: {} (combo x{:.1})", score.score, score.multiplier);
    }
}
