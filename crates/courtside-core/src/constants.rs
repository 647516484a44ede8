//! Simulation constants and tuning parameters.
//!
//! Distances are court pixels, speeds are pixels per second and every
//! duration is seconds of simulated time.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Court ---

/// Default court width.
pub const COURT_WIDTH: f64 = 1200.0;

/// Default court height.
pub const COURT_HEIGHT: f64 = 640.0;

/// Horizontal inset of each goal from its baseline.
pub const GOAL_INSET: f64 = 80.0;

// --- Steering ---

/// Inside this distance a steering target counts as reached.
pub const ARRIVE_RADIUS: f64 = 5.0;

// --- Agents ---

/// Default agent speed.
pub const AGENT_BASE_SPEED: f64 = 220.0;

/// Default shooting skill.
pub const AGENT_SHOOT_ACCURACY: f64 = 0.6;

/// Cooldown applied after a successful shot.
pub const SHOOT_COOLDOWN_SECS: f64 = 0.5;

/// Offset from the holder's position at which a held ball is carried.
pub const CARRY_OFFSET_X: f64 = 0.0;
pub const CARRY_OFFSET_Y: f64 = -18.0;

// --- Ball flight ---

/// Fixed part of a shot's flight time.
pub const FLIGHT_BASE_SECS: f64 = 0.6;

/// Flight time added per unit of distance (0.5 ms per pixel).
pub const FLIGHT_SECS_PER_UNIT: f64 = 0.0005;

/// Fixed part of a shot's peak arc height.
pub const ARC_BASE_HEIGHT: f64 = 80.0;

/// Arc height added per unit of distance.
pub const ARC_HEIGHT_PER_UNIT: f64 = 0.15;

/// Fixed part of a pass's flight time.
pub const PASS_BASE_SECS: f64 = 0.25;

/// Pass flight time added per unit of distance.
pub const PASS_SECS_PER_UNIT: f64 = 0.0008;

/// Fixed part of a pass's arc height.
pub const PASS_ARC_BASE_HEIGHT: f64 = 12.0;

/// Pass arc height added per unit of distance.
pub const PASS_ARC_HEIGHT_PER_UNIT: f64 = 0.04;

/// Speed cap for the ball's free motion.
pub const BALL_MAX_SPEED: f64 = 900.0;

// --- Loose ball environment ---

/// Fraction of velocity kept per second of free motion.
pub const BALL_FRICTION_PER_SEC: f64 = 0.35;

/// Fraction of speed kept when a loose ball bounces off a court edge.
pub const BALL_RESTITUTION: f64 = 0.6;

/// Below this speed a loose ball comes to rest.
pub const BALL_REST_SPEED: f64 = 4.0;

/// An agent this close to a loose ball picks it up.
pub const PICKUP_RADIUS: f64 = 22.0;

/// Window during which the agent that lost the ball cannot regrab it.
pub const REGRAB_LOCKOUT_SECS: f64 = 0.4;

/// A pass receiver this close to the ball at landing catches it.
pub const CATCH_RADIUS: f64 = 40.0;

// --- Goals ---

/// Distance from a goal's position to its aim point along the facing axis.
pub const GOAL_AIM_OFFSET: f64 = 20.0;

/// Radius of the scoring zone around a goal's aim point.
pub const SCORING_ZONE_RADIUS: f64 = 24.0;

/// Depth of the "paint" guard point in front of a goal.
pub const PAINT_DEPTH: f64 = 90.0;

// --- Scoring ---

/// Shots released beyond this distance from the aim point score three.
pub const LONG_RANGE_DISTANCE: f64 = 330.0;

/// Points for a regular make.
pub const POINTS_REGULAR: u32 = 2;

/// Points for a long-range make.
pub const POINTS_LONG_RANGE: u32 = 3;

/// Beyond this distance an AI release carries the minimum accuracy.
pub const MAX_SHOT_RANGE: f64 = 600.0;

/// Floor on derived release accuracy.
pub const MIN_RELEASE_ACCURACY: f64 = 0.1;

/// Make probability is `release * (BASE + WEIGHT * skill)`, capped.
pub const MAKE_CHANCE_BASE: f64 = 0.55;
pub const MAKE_CHANCE_SKILL_WEIGHT: f64 = 0.45;
pub const MAKE_CHANCE_CAP: f64 = 0.98;

/// Rebounds leave the rim within this angle of the goal's facing.
pub const REBOUND_SPREAD_RADIANS: f64 = std::f64::consts::FRAC_PI_3;

/// Speed range of the knock applied to a missed shot's rebound.
pub const REBOUND_SPEED_MIN: f64 = 120.0;
pub const REBOUND_SPEED_MAX: f64 = 260.0;

// --- Steals ---

/// Defender-to-carrier distance at which a steal can happen.
pub const STEAL_RADIUS: f64 = 26.0;

/// Steal probability per second of sustained contact.
pub const STEAL_CHANCE_PER_SEC: f64 = 0.9;

/// Speed at which a stolen ball is knocked loose.
pub const STEAL_KNOCK_SPEED: f64 = 160.0;

// --- Autonomous controller ---

/// Time a newly desired AI state must persist before it is committed.
pub const AI_REACTION_DELAY_SECS: f64 = 0.2;

/// Interval between fresh pass-intent draws.
pub const AI_DECISION_INTERVAL_SECS: f64 = 0.5;

/// Probability that a decision draw yields a pass intent.
pub const AI_PASS_CHANCE: f64 = 0.2;

/// Per-tick probability of an opportunistic long shot.
pub const AI_LONG_SHOT_CHANCE: f64 = 0.02;

/// Inside this range the carrier stops and shoots.
pub const AI_CLOSE_SHOT_RANGE: f64 = 150.0;

/// Inside this range the carrier may attempt a long shot.
pub const AI_LONG_SHOT_RANGE: f64 = 300.0;

/// Full width of the defensive positioning jitter (applied as +/- half).
pub const AI_DEFENSIVE_SLOP: f64 = 30.0;

/// Fraction of the carrier-to-goal lane where the primary defender sets up.
pub const AI_DEFENSE_LANE_FRACTION: f64 = 0.3;

/// Lateral offset of the supporting chaser from the ball.
pub const AI_PINCER_OFFSET: f64 = 50.0;

/// Horizontal jitter of the off-ball open spot.
pub const AI_OPEN_SPOT_JITTER_X: f64 = 100.0;

/// Vertical jitter bounds of the off-ball open spot.
pub const AI_OPEN_SPOT_JITTER_UP: f64 = 75.0;
pub const AI_OPEN_SPOT_JITTER_DOWN: f64 = 100.0;

/// Extra offset of the open spot away from the carrier's side.
pub const AI_OPEN_SPOT_SPREAD: f64 = 80.0;

/// Speed fractions used by the controller.
pub const AI_CHASE_SPEED: f64 = 1.0;
pub const AI_SUPPORT_SPEED: f64 = 0.8;
pub const AI_DRIVE_SPEED: f64 = 0.9;
pub const AI_PRIMARY_DEFENSE_SPEED: f64 = 0.95;
pub const AI_SECONDARY_DEFENSE_SPEED: f64 = 0.8;
pub const AI_PAINT_SPEED: f64 = 0.7;
