//! Scoring: points, combo multiplier, high score.
//!
//! Consumes `ScoreEvent`s; the exactly-once-per-destruction guarantee is the
//! damage resolver's (destroyed-guard), not the scoreboard's. Combo-eligible
//! awards grow a multiplier that successful jumps and slides reset: risky
//! play is what keeps the combo alive.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::ResolveSet;

pub const COMBO_STEP: f32 = 0.1;
pub const MAX_COMBO_MULTIPLIER: f32 = 3.0;

#[derive(Message, Clone, Copy, Debug)]
pub struct ScoreEvent {
    pub points: u32,
    pub combo_eligible: bool,
}

#[derive(Message, Clone, Copy, Debug, Default)]
pub struct ComboReset;

#[derive(Resource, Debug, Clone, Copy)]
pub struct Score {
    pub score: u32,
    pub combo_count: u32,
    pub multiplier: f32,
    /// Best score this process has seen; survives restarts, not shutdowns.
    pub high_score: u32,
}

impl Default for Score {
    fn default() -> Self {
        Self {
            score: 0,
            combo_count: 0,
            multiplier: 1.0,
            high_score: 0,
        }
    }
}

impl Score {
    pub fn award(&mut self, points: u32, combo_eligible: bool) {
        if combo_eligible {
            self.combo_count += 1;
            self.multiplier =
                (1.0 + self.combo_count as f32 * COMBO_STEP).min(MAX_COMBO_MULTIPLIER);
        }
        self.score += (points as f32 * self.multiplier).round() as u32;
    }

    pub fn reset_combo(&mut self) {
        self.combo_count = 0;
        self.multiplier = 1.0;
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<Score>();
    app.add_message::<ScoreEvent>().add_message::<ComboReset>();

    app.add_systems(
        FixedPostUpdate,
        (award_points, handle_combo_resets).in_set(ResolveSet::Outcomes),
    );
    app.add_systems(OnEnter(GameState::InGame), reset_run_score);
    app.add_systems(OnEnter(GameState::GameOver), finalize_high_score);
}

fn award_points(mut score: ResMut<Score>, mut events: MessageReader<ScoreEvent>) {
    for ev in events.read() {
        score.award(ev.points, ev.combo_eligible);
    }
}

fn handle_combo_resets(mut score: ResMut<Score>, mut events: MessageReader<ComboReset>) {
    if events.read().next().is_some() {
        score.reset_combo();
    }
}

fn reset_run_score(mut score: ResMut<Score>) {
    score.score = 0;
    score.reset_combo();
}

fn finalize_high_score(mut score: ResMut<Score>) {
    score.high_score = score.high_score.max(score.score);
    info!(
        "run over: score {}, best {}",
        score.score, score.high_score
    );
}

#[cfg(test)]
mod tests;
