//! Property tests for entity behaviour.
//!
//! These use `proptest` to check that movement, patrol and collision
//! invariants hold across arbitrary inputs and configurations.

use glam::Vec2;
use proptest::prelude::*;
use wheelie::sim::{
    Animation, Body, Directions, GameEvent, GameState, Lifecycle, Patrol, PatrolKind, Sprite,
    TickInput, resolve_movement, tick,
};

/// Strategy that generates finite f32 values.
fn finite_f32(range: i32) -> impl Strategy<Value = f32> {
    (-range..range).prop_map(|v| v as f32 * 0.25)
}

fn directions() -> impl Strategy<Value = Directions> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(up, down, left, right)| Directions {
            up,
            down,
            left,
            right,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    #[test]
    fn released_keys_zero_velocity(
        history in prop::collection::vec(directions(), 0..10),
        vx in finite_f32(400),
        vy in finite_f32(400),
    ) {
        let mut body = Body::with_velocity(1.0, 1.0);
        let mut sprite = Sprite::default();
        body.vel = Vec2::new(vx, vy);
        for keys in &history {
            resolve_movement(&mut body, &mut sprite, keys, 1.0);
        }

        resolve_movement(&mut body, &mut sprite, &Directions::default(), 1.0);
        prop_assert_eq!(body.vel, Vec2::ZERO);
        prop_assert_eq!(sprite.animation, Animation::Stand);
    }

    #[test]
    fn opposing_horizontal_keys_cancel(
        up in any::<bool>(),
        down in any::<bool>(),
        vx in finite_f32(400),
        scale in 1..4i32,
    ) {
        let mut body = Body::with_velocity(1.0, 1.0);
        let mut sprite = Sprite::default();
        body.vel.x = vx;
        let keys = Directions { up, down, left: true, right: true };

        resolve_movement(&mut body, &mut sprite, &keys, scale as f32 * 0.5);
        prop_assert_eq!(body.vel.x, vx);
        prop_assert_eq!(sprite.animation, Animation::Run);
    }

    #[test]
    fn patrol_range_is_ordered(
        x in finite_f32(4000),
        width in 1..2048i32,
    ) {
        let patrol = Patrol::from_authored(x, width as f32, 64.0);
        prop_assert!(patrol.range.start_x <= patrol.range.end_x);
        prop_assert_eq!(patrol.range.start_x, x);
        prop_assert!(!patrol.walk_left);
    }

    #[test]
    fn patroller_stays_near_range(
        width in 64..1024i32,
        ticks in 1..300usize,
    ) {
        let mut state = GameState::new();
        let id = state.spawn_patroller(PatrolKind::Enemy, Vec2::new(0.0, 0.0), width as f32);
        let range = state.entity(id).unwrap().patrol().unwrap().range;
        let overshoot = 2.0 * state.tuning.patrol_accel.x;

        for _ in 0..ticks {
            tick(&mut state, &TickInput::default(), 1.0);
            let x = state.entity(id).unwrap().pos.x;
            prop_assert!(x >= range.start_x - overshoot);
            prop_assert!(x <= range.end_x + overshoot);
        }
    }

    #[test]
    fn collectible_awards_exactly_once(
        touchers in 1..5usize,
        ticks in 1..5usize,
    ) {
        let mut state = GameState::new();
        let coin = state.spawn_collectible(Vec2::new(100.0, 100.0), Vec2::splat(32.0));
        // Several stationary barriers all overlapping the coin
        for i in 0..touchers {
            state.spawn_patroller(PatrolKind::Barrier, Vec2::new(80.0 + i as f32, 90.0), 64.0);
        }

        let mut removed = 0;
        for _ in 0..ticks {
            tick(&mut state, &TickInput::default(), 1.0);
            removed += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::Removed { entity, .. } if *entity == coin))
                .count();
        }

        prop_assert_eq!(state.score(), 250);
        prop_assert_eq!(removed, 1);
        prop_assert_eq!(state.lifecycle(coin), Lifecycle::Removed);
    }

    #[test]
    fn stomped_patroller_is_removed_once(
        drops in prop::collection::vec((0..20i32, 1..3usize, any::<bool>()), 1..5),
        extra_ticks in 0..10usize,
    ) {
        let mut state = GameState::new();
        let mut patrollers = Vec::new();
        // One stationary patroller per column, with one or two narrow
        // players dropping onto it from a random height
        for (i, (drop, stompers, barrier)) in drops.iter().enumerate() {
            let x = i as f32 * 200.0;
            let kind = if *barrier { PatrolKind::Barrier } else { PatrolKind::Enemy };
            patrollers.push(state.spawn_patroller(kind, Vec2::new(x, 100.0), 64.0));
            for s in 0..*stompers {
                let pos = Vec2::new(x + s as f32 * 30.0, 35.0 - *drop as f32);
                state.spawn_player(pos, Vec2::new(16.0, 64.0));
            }
        }
        let down = TickInput {
            directions: Directions { down: true, ..Default::default() },
        };

        let mut removed = vec![0usize; patrollers.len()];
        for _ in 0..(25 + extra_ticks) {
            tick(&mut state, &down, 1.0);
            for event in state.drain_events() {
                if let GameEvent::Removed { entity, .. } = event {
                    if let Some(i) = patrollers.iter().position(|id| *id == entity) {
                        removed[i] += 1;
                    }
                }
            }
        }

        prop_assert_eq!(state.score(), 0);
        for (i, id) in patrollers.iter().enumerate() {
            prop_assert_eq!(removed[i], 1);
            prop_assert_eq!(state.lifecycle(*id), Lifecycle::Removed);
        }
    }
}
