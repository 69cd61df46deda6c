use bevy::prelude::*;

use crate::common::test_utils::run_system_once;

use super::{finalize_high_score, Score, MAX_COMBO_MULTIPLIER};

#[test]
fn combo_awards_grow_the_multiplier() {
    let mut score = Score::default();

    score.award(5, true);
    assert_eq!(score.combo_count, 1);
    assert!((score.multiplier - 1.1).abs() < 1e-6);
    // 5 * 1.1 rounds up.
    assert_eq!(score.score, 6);

    score.award(5, true);
    assert!((score.multiplier - 1.2).abs() < 1e-6);
    assert_eq!(score.score, 12);
}

#[test]
fn multiplier_caps_out() {
    let mut score = Score::default();
    for _ in 0..40 {
        score.award(1, true);
    }
    assert_eq!(score.multiplier, MAX_COMBO_MULTIPLIER);
}

#[test]
fn non_combo_awards_leave_the_streak_alone() {
    let mut score = Score::default();
    score.award(10, false);
    assert_eq!(score.combo_count, 0);
    assert_eq!(score.multiplier, 1.0);
    assert_eq!(score.score, 10);
}

#[test]
fn reset_combo_drops_back_to_base_rate() {
    let mut score = Score::default();
    score.award(5, true);
    score.reset_combo();
    assert_eq!(score.combo_count, 0);
    assert_eq!(score.multiplier, 1.0);

    score.award(10, false);
    assert_eq!(score.score, 6 + 10);
}

#[test]
fn high_score_keeps_the_best_run() {
    let mut world = World::new();
    world.insert_resource(Score {
        score: 120,
        high_score: 90,
        ..Default::default()
    });
    run_system_once(&mut world, finalize_high_score);
    assert_eq!(world.resource::<Score>().high_score, 120);

    world.resource_mut::<Score>().score = 50;
    run_system_once(&mut world, finalize_high_score);
    assert_eq!(world.resource::<Score>().high_score, 120);
}
