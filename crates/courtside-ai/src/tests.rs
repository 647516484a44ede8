use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use courtside_core::constants::*;
use courtside_core::enums::{AiState, Facing};
use courtside_core::goal::Goal;
use courtside_core::types::{Position, Velocity};

use crate::controller::{
    desired_state, AgentAction, AgentView, AutonomousController, CourtContext,
};
use crate::profiles::{get_profile, AiProfile, Difficulty};
use crate::steering::compute_steering_velocity;

const SPEED: f64 = 200.0;

fn view(x: f64, y: f64, has_ball: bool) -> AgentView {
    AgentView {
        position: Position::new(x, y),
        base_speed: SPEED,
        has_ball,
    }
}

fn right_goal() -> Goal {
    Goal::new(Position::new(1120.0, 320.0), Facing::Left)
}

fn left_goal() -> Goal {
    Goal::new(Position::new(80.0, 320.0), Facing::Right)
}

fn context(controlled: [AgentView; 2], opponents: Vec<AgentView>, ball: Position) -> CourtContext {
    CourtContext {
        controlled,
        opponents,
        ball_position: ball,
    }
}

/// Profile with no reaction delay and no randomness unless a test opts in.
fn instant_profile() -> AiProfile {
    AiProfile {
        reaction_delay_secs: 0.0,
        pass_chance: 0.0,
        long_shot_chance: 0.0,
        defensive_slop: 0.0,
        ..AiProfile::default()
    }
}

fn attacking_context(carrier_x: f64) -> CourtContext {
    context(
        [view(carrier_x, 320.0, true), view(600.0, 500.0, false)],
        vec![view(200.0, 300.0, false), view(250.0, 350.0, false)],
        Position::new(carrier_x, 302.0),
    )
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ---- Steering ----

#[test]
fn test_steering_at_target_is_zero_not_nan() {
    let p = Position::new(42.0, 17.0);
    let v = compute_steering_velocity(p, p, SPEED, 1.0);
    assert_eq!(v, Velocity::ZERO);
    assert!(!v.x.is_nan() && !v.y.is_nan());
}

#[test]
fn test_steering_inside_arrive_radius_stops() {
    let v = compute_steering_velocity(
        Position::new(0.0, 0.0),
        Position::new(ARRIVE_RADIUS - 0.1, 0.0),
        SPEED,
        1.0,
    );
    assert_eq!(v, Velocity::ZERO);
}

#[test]
fn test_steering_scales_unit_direction() {
    let v = compute_steering_velocity(
        Position::new(0.0, 0.0),
        Position::new(30.0, 40.0),
        SPEED,
        0.5,
    );
    assert_close(v.speed(), 100.0);
    assert_close(v.x, 60.0);
    assert_close(v.y, 80.0);
}

// ---- State selection and debounce ----

#[test]
fn test_desired_state_from_possession() {
    let free = context(
        [view(0.0, 0.0, false), view(10.0, 0.0, false)],
        vec![view(50.0, 0.0, false)],
        Position::default(),
    );
    assert_eq!(desired_state(&free), AiState::ChaseBall);

    let ours = context(
        [view(0.0, 0.0, false), view(10.0, 0.0, true)],
        vec![view(50.0, 0.0, false)],
        Position::default(),
    );
    assert_eq!(desired_state(&ours), AiState::Attack);

    let theirs = context(
        [view(0.0, 0.0, false), view(10.0, 0.0, false)],
        vec![view(50.0, 0.0, true)],
        Position::default(),
    );
    assert_eq!(desired_state(&theirs), AiState::Defend);
}

#[test]
fn test_state_commits_after_reaction_delay() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut controller = AutonomousController::new(right_goal(), AiProfile::default());
    let ctx = attacking_context(500.0);

    controller.update(&ctx, DT, &mut rng);
    assert_eq!(controller.state(), AiState::ChaseBall);
    assert_eq!(controller.pending_state(), Some(AiState::Attack));

    let mut ticks = 1;
    while controller.state() != AiState::Attack {
        controller.update(&ctx, DT, &mut rng);
        ticks += 1;
        assert!(ticks < 100, "state never committed");
    }
    let waited = (ticks - 1) as f64 * DT;
    assert!(waited >= AI_REACTION_DELAY_SECS - 1e-9);
    assert!(waited < AI_REACTION_DELAY_SECS + 2.0 * DT);
    assert_eq!(controller.pending_state(), None);
}

#[test]
fn test_brief_possession_flip_never_leaves_attack() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut controller = AutonomousController::new(right_goal(), AiProfile::default());
    let ours = attacking_context(500.0);
    let theirs = context(
        [view(500.0, 320.0, false), view(600.0, 500.0, false)],
        vec![view(510.0, 320.0, true), view(250.0, 350.0, false)],
        Position::new(510.0, 302.0),
    );

    for _ in 0..30 {
        controller.update(&ours, DT, &mut rng);
    }
    assert_eq!(controller.state(), AiState::Attack);

    // ~100 ms with the opponent holding the ball, then back.
    for _ in 0..6 {
        controller.update(&theirs, DT, &mut rng);
        assert_eq!(controller.state(), AiState::Attack);
    }
    for _ in 0..30 {
        controller.update(&ours, DT, &mut rng);
        assert_eq!(controller.state(), AiState::Attack);
    }
    assert_eq!(controller.pending_state(), None);
}

#[test]
fn test_pending_state_restarts_after_revert() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut controller = AutonomousController::new(right_goal(), AiProfile::default());
    let ours = attacking_context(500.0);
    let loose = context(
        [view(500.0, 320.0, false), view(600.0, 500.0, false)],
        vec![view(200.0, 300.0, false)],
        Position::new(700.0, 100.0),
    );

    for _ in 0..9 {
        controller.update(&ours, DT, &mut rng);
    }
    controller.update(&loose, DT, &mut rng);
    // The earlier latch must not carry its timestamp over.
    for _ in 0..9 {
        controller.update(&ours, DT, &mut rng);
        assert_eq!(controller.state(), AiState::ChaseBall);
    }
}

// ---- Chase ----

#[test]
fn test_chase_sends_closer_agent_at_ball() {
    let mut controller = AutonomousController::new(right_goal(), instant_profile());
    let ball = Position::new(400.0, 300.0);
    let ctx = context(
        [view(100.0, 100.0, false), view(380.0, 400.0, false)],
        vec![],
        ball,
    );

    let output = controller.chase_ball(&ctx);
    assert_eq!(controller.active_index(), 1);

    let expected = compute_steering_velocity(ctx.controlled[1].position, ball, SPEED, 1.0);
    assert_eq!(output.commands[1].velocity, expected);

    // Agent 0 sits above the ball, so it flanks from above at 80% speed.
    let flank = ball.offset(0.0, -AI_PINCER_OFFSET);
    let expected = compute_steering_velocity(ctx.controlled[0].position, flank, SPEED, 0.8);
    assert_eq!(output.commands[0].velocity, expected);
    assert!(output.commands.iter().all(|c| c.action.is_none()));
}

// ---- Attack ----

#[test]
fn test_attack_without_carrier_matches_chase() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let ctx = context(
        [view(300.0, 200.0, false), view(500.0, 450.0, false)],
        vec![view(700.0, 300.0, false), view(800.0, 320.0, false)],
        Position::new(450.0, 330.0),
    );

    let mut attacking = AutonomousController::new(right_goal(), AiProfile::default());
    let mut chasing = AutonomousController::new(right_goal(), AiProfile::default());

    let from_attack = attacking.attack(&ctx, &mut rng);
    let from_chase = chasing.chase_ball(&ctx);
    assert_eq!(from_attack, from_chase);
    assert_eq!(attacking.active_index(), chasing.active_index());
}

#[test]
fn test_attack_close_range_stops_and_shoots() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut controller = AutonomousController::new(right_goal(), instant_profile());
    let aim = right_goal().aim_point();
    let ctx = attacking_context(aim.x - 100.0);

    let output = controller.update(&ctx, DT, &mut rng);
    assert_eq!(controller.state(), AiState::Attack);
    assert_eq!(controller.active_index(), 0);
    assert_eq!(output.commands[0].action, Some(AgentAction::Shoot));
    assert_eq!(output.commands[0].velocity, Velocity::ZERO);
}

#[test]
fn test_attack_long_shot_keeps_moving() {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let profile = AiProfile {
        long_shot_chance: 1.0,
        ..instant_profile()
    };
    let mut controller = AutonomousController::new(right_goal(), profile);
    let aim = right_goal().aim_point();
    let ctx = attacking_context(aim.x - 250.0);

    let output = controller.update(&ctx, DT, &mut rng);
    assert_eq!(output.commands[0].action, Some(AgentAction::Shoot));
    assert!(output.commands[0].velocity.speed() > 0.0);
}

#[test]
fn test_attack_pass_intent_is_consumed() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let profile = AiProfile {
        pass_chance: 1.0,
        decision_interval_secs: 0.0,
        ..instant_profile()
    };
    let mut controller = AutonomousController::new(right_goal(), profile);
    let ctx = attacking_context(400.0);

    let output = controller.update(&ctx, DT, &mut rng);
    assert_eq!(output.commands[0].action, Some(AgentAction::Pass { to: 1 }));
    assert!(!controller.pass_intent());
}

#[test]
fn test_attack_drives_toward_aim_point() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut controller = AutonomousController::new(right_goal(), instant_profile());
    let ctx = attacking_context(400.0);

    let output = controller.update(&ctx, DT, &mut rng);
    let expected = compute_steering_velocity(
        ctx.controlled[0].position,
        right_goal().aim_point(),
        SPEED,
        AI_DRIVE_SPEED,
    );
    assert_eq!(output.commands[0].action, None);
    assert_eq!(output.commands[0].velocity, expected);

    // Teammate heads for the far side of the goal from the carrier.
    let teammate = output.commands[1];
    assert!(teammate.action.is_none());
    assert!(teammate.velocity.x > 0.0);
}

#[test]
fn test_open_spot_spreads_away_from_carrier() {
    let aim = right_goal().aim_point();
    let profile = AiProfile {
        decision_interval_secs: 0.0,
        ..instant_profile()
    };
    let defenders = vec![view(200.0, 300.0, false), view(250.0, 350.0, false)];
    let mut mean_dy = [0.0; 2];

    for seed in 0..20u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut controller = AutonomousController::new(right_goal(), profile);
        let sides = [(200.0, AI_OPEN_SPOT_SPREAD), (450.0, -AI_OPEN_SPOT_SPREAD)];
        for (side, (carrier_y, spread)) in sides.into_iter().enumerate() {
            let ctx = context(
                [view(400.0, carrier_y, true), view(600.0, 320.0, false)],
                defenders.clone(),
                Position::new(400.0, carrier_y),
            );
            let output = controller.update(&ctx, DT, &mut rng);
            let spot = controller.open_spot(ctx.controlled[0].position);

            let dx = spot.x - aim.x;
            let dy = spot.y - aim.y;
            assert!(dx.abs() <= AI_OPEN_SPOT_JITTER_X, "seed {seed}: dx {dx}");
            assert!(
                (-AI_OPEN_SPOT_JITTER_UP..=AI_OPEN_SPOT_JITTER_DOWN).contains(&(dy - spread)),
                "seed {seed}: dy {dy} with spread {spread}"
            );
            mean_dy[side] += dy / 20.0;

            let expected = compute_steering_velocity(
                ctx.controlled[1].position,
                spot,
                SPEED,
                AI_SUPPORT_SPEED,
            );
            assert_eq!(output.commands[1].velocity, expected);
            assert!(output.commands[1].action.is_none());
        }
    }

    // Carrier above the aim point sends the teammate below it, and back.
    assert!(mean_dy[0] > 0.0, "{mean_dy:?}");
    assert!(mean_dy[0] - mean_dy[1] > AI_OPEN_SPOT_SPREAD, "{mean_dy:?}");
}

#[test]
fn test_pass_intent_redraws_on_decision_interval() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let profile = AiProfile {
        pass_chance: 1.0,
        ..instant_profile()
    };
    assert_eq!(profile.decision_interval_secs, AI_DECISION_INTERVAL_SECS);
    let mut controller = AutonomousController::new(right_goal(), profile);
    let loose = context(
        [view(400.0, 320.0, false), view(600.0, 500.0, false)],
        vec![view(200.0, 300.0, false)],
        Position::new(500.0, 300.0),
    );
    let interval_ticks = (AI_DECISION_INTERVAL_SECS / DT).round() as usize;

    for tick in 1..interval_ticks {
        controller.update(&loose, DT, &mut rng);
        assert!(!controller.pass_intent(), "intent drawn early at tick {tick}");
    }

    // Summed ticks may fall a hair short of the interval.
    let drawn = (0..2).any(|_| {
        controller.update(&loose, DT, &mut rng);
        controller.pass_intent()
    });
    assert!(drawn, "no intent at the first interval");

    // The carrier spends the intent once.
    let ctx = attacking_context(400.0);
    let output = controller.update(&ctx, DT, &mut rng);
    assert_eq!(output.commands[0].action, Some(AgentAction::Pass { to: 1 }));
    assert!(!controller.pass_intent());

    // Nothing new until the next interval.
    for tick in 0..interval_ticks - 5 {
        let output = controller.update(&ctx, DT, &mut rng);
        assert_eq!(output.commands[0].action, None, "pass at tick {tick}");
        assert!(!controller.pass_intent());
    }
}

// ---- Defend ----

#[test]
fn test_nearer_agent_becomes_primary_defender() {
    let mut controller = AutonomousController::new(right_goal(), instant_profile());
    let carrier = Position::new(600.0, 320.0);
    let ctx = context(
        [view(600.0, 440.0, false), view(650.0, 320.0, false)],
        vec![
            AgentView {
                position: carrier,
                base_speed: SPEED,
                has_ball: true,
            },
            view(300.0, 200.0, false),
        ],
        carrier,
    );

    let output = controller.defend(&ctx);
    assert_eq!(controller.active_index(), 1, "agent at distance 50 is primary");

    let lane = carrier.lerp(&right_goal().aim_point(), AI_DEFENSE_LANE_FRACTION);
    let expected = compute_steering_velocity(
        ctx.controlled[1].position,
        lane,
        SPEED,
        AI_PRIMARY_DEFENSE_SPEED,
    );
    assert_eq!(output.commands[1].velocity, expected);

    let midpoint = Position::new(300.0, 200.0).lerp(&right_goal().aim_point(), 0.5);
    let expected = compute_steering_velocity(
        ctx.controlled[0].position,
        midpoint,
        SPEED,
        AI_SECONDARY_DEFENSE_SPEED,
    );
    assert_eq!(output.commands[0].velocity, expected);
}

#[test]
fn test_defend_anchors_on_defended_goal() {
    let mut controller =
        AutonomousController::new(right_goal(), instant_profile()).with_defended_goal(left_goal());
    let carrier = Position::new(600.0, 320.0);
    let ctx = context(
        [view(500.0, 320.0, false), view(900.0, 320.0, false)],
        vec![AgentView {
            position: carrier,
            base_speed: SPEED,
            has_ball: true,
        }],
        carrier,
    );

    let output = controller.defend(&ctx);
    assert_eq!(controller.active_index(), 0);
    // Lane point sits between the carrier and the left goal.
    let lane = carrier.lerp(&left_goal().aim_point(), AI_DEFENSE_LANE_FRACTION);
    assert!(lane.x < carrier.x);
    assert!(output.commands[0].velocity.x < 0.0);

    // No second opponent: the secondary guards the paint at 70% speed.
    let paint = left_goal().paint_point();
    let expected =
        compute_steering_velocity(ctx.controlled[1].position, paint, SPEED, AI_PAINT_SPEED);
    assert_eq!(output.commands[1].velocity, expected);
}

#[test]
fn test_defend_anchors_on_target_goal_by_default() {
    let mut controller = AutonomousController::new(right_goal(), instant_profile());
    let carrier = Position::new(600.0, 320.0);
    let ctx = context(
        [view(700.0, 320.0, false), view(300.0, 320.0, false)],
        vec![AgentView {
            position: carrier,
            base_speed: SPEED,
            has_ball: true,
        }],
        carrier,
    );

    let output = controller.defend(&ctx);
    assert_eq!(controller.active_index(), 0);
    let lane = carrier.lerp(&right_goal().aim_point(), AI_DEFENSE_LANE_FRACTION);
    assert!(lane.x > carrier.x);
    let expected = compute_steering_velocity(
        ctx.controlled[0].position,
        lane,
        SPEED,
        AI_PRIMARY_DEFENSE_SPEED,
    );
    assert_eq!(output.commands[0].velocity, expected);

    let paint = right_goal().paint_point();
    let expected =
        compute_steering_velocity(ctx.controlled[1].position, paint, SPEED, AI_PAINT_SPEED);
    assert_eq!(output.commands[1].velocity, expected);
}

#[test]
fn test_defend_without_carrier_falls_back_to_chase() {
    let ctx = context(
        [view(300.0, 200.0, false), view(500.0, 450.0, false)],
        vec![view(700.0, 300.0, false)],
        Position::new(450.0, 330.0),
    );
    let mut defending = AutonomousController::new(right_goal(), instant_profile());
    let mut chasing = AutonomousController::new(right_goal(), instant_profile());
    assert_eq!(defending.defend(&ctx), chasing.chase_ball(&ctx));
}

#[test]
fn test_defensive_slop_stays_within_half_width() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let profile = AiProfile {
        reaction_delay_secs: 0.0,
        decision_interval_secs: 0.0,
        ..AiProfile::default()
    };
    let mut controller = AutonomousController::new(right_goal(), profile);
    let carrier = Position::new(600.0, 320.0);
    let lane = carrier.lerp(&right_goal().aim_point(), AI_DEFENSE_LANE_FRACTION);
    let defender = view(lane.x - 120.0, lane.y, false);
    let ctx = context(
        [defender, view(100.0, 100.0, false)],
        vec![AgentView {
            position: carrier,
            base_speed: SPEED,
            has_ball: true,
        }],
        carrier,
    );

    for _ in 0..50 {
        let output = controller.update(&ctx, DT, &mut rng);
        let v = output.commands[0].velocity;
        // Heading toward the jittered lane point: the lateral component is
        // bounded by the slop relative to the 120px approach.
        let half = AI_DEFENSIVE_SLOP / 2.0;
        let max_ratio = half / (120.0 - half);
        assert!(v.x > 0.0);
        assert!((v.y / v.x).abs() <= max_ratio + 1e-9);
    }
}

// ---- Profiles ----

#[test]
fn test_profiles_order_by_reaction() {
    let rookie = get_profile(Difficulty::Rookie);
    let pro = get_profile(Difficulty::Pro);
    let all_star = get_profile(Difficulty::AllStar);
    assert!(rookie.reaction_delay_secs > pro.reaction_delay_secs);
    assert!(pro.reaction_delay_secs > all_star.reaction_delay_secs);
    assert_eq!(AiProfile::default(), pro);
    assert_eq!(pro.reaction_delay_secs, AI_REACTION_DELAY_SECS);
}
