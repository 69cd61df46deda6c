//! Charged blasts and chain reactions, end to end.

mod common;

use bevy::prelude::*;

use common::Captured;
use urban_runner::common::lanes::Lane;
use urban_runner::plugins::projectiles::Ball;
use urban_runner::plugins::runner::Runner;
use urban_runner::plugins::scoring::Score;

fn runner_muzzle(app: &mut App) -> Vec3 {
    let tf = app
        .world_mut()
        .query_filtered::<&Transform, With<Runner>>()
        .single(app.world())
        .unwrap();
    tf.translation + Vec3::new(0.0, 1.0, 0.5)
}

#[test]
fn charged_shot_wipes_a_cluster_and_is_consumed_regardless() {
    let mut app = common::app_headless();
    common::step(&mut app, 2);

    // Three weak bins packed inside one explosion radius.
    let bins = [
        common::place(&mut app, "TrashBin", Vec3::new(0.0, 0.5, 6.0)),
        common::place(&mut app, "TrashBin", Vec3::new(0.4, 0.5, 6.6)),
        common::place(&mut app, "TrashBin", Vec3::new(-0.4, 0.5, 7.0)),
    ];

    let origin = runner_muzzle(&mut app);
    common::shoot(&mut app, true, Lane::CENTER, origin);
    common::step(&mut app, 45);

    for bin in bins {
        assert!(app.world().get_entity(bin).is_err(), "blast must take all three");
    }

    let captured = app.world().resource::<Captured>();
    assert_eq!(captured.destroyed, 3);
    assert!(captured.max_live_balls <= 1);

    // Charged shots never survive a contact.
    let balls = app.world_mut().query::<&Ball>().iter(app.world()).count();
    assert_eq!(balls, 0);

    let score = app.world().resource::<Score>();
    assert!(score.score > 0);
    assert!(score.multiplier > 1.0, "kills build combo");
}

#[test]
fn destroying_a_vendor_cart_chains_into_the_neighbourhood() {
    let mut app = common::app_headless();
    common::step(&mut app, 2);

    let cart = common::place(&mut app, "VendorCart", Vec3::new(0.0, 0.6, 6.0));
    // Close enough for the chain pulse, far enough to survive nothing else.
    let bin = common::place(&mut app, "TrashBin", Vec3::new(0.6, 0.5, 7.5));

    let origin = runner_muzzle(&mut app);
    common::shoot(&mut app, false, Lane::CENTER, origin);

    // Flight + contact + the 0.1 s chain delay.
    common::step(&mut app, 60);

    assert!(app.world().get_entity(cart).is_err());
    assert!(app.world().get_entity(bin).is_err(), "chain pulse must reach the bin");

    let captured = app.world().resource::<Captured>();
    assert_eq!(captured.destroyed, 2, "each obstacle destroyed exactly once");
}
