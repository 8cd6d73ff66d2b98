//! A particle steered by the flow field, trailing a bounded history of its
//! past positions.
//!
//! Each particle cycles through three phases:
//!
//! - [`Phase::Active`]: moves one step along the flow angle of its cell and
//!   appends the new position to its trail, dropping the oldest point once
//!   the trail exceeds `max_length`.
//! - [`Phase::Draining`]: its timer ran out; it stays put and the trail
//!   shrinks by one point per tick.
//! - [`Phase::Expired`]: the trail is down to one point; the particle
//!   respawns at a random position with a fresh timer.
//!
//! The timer starts at `2 * max_length` and is decremented at the start of
//! every tick.

use crate::field::FlowField;
use crate::prng::Xorshift64;
use crate::surface::Surface;
use glam::DVec2;
use std::collections::VecDeque;

/// Shortest trail a spawned particle can get.
pub const MIN_TRAIL_LENGTH: usize = 10;
/// Longest trail a spawned particle can get.
pub const MAX_TRAIL_LENGTH: usize = 209;
/// Speed modifiers are drawn from `1..=MAX_SPEED_MODIFIER`.
pub const MAX_SPEED_MODIFIER: usize = 3;

/// Lifecycle phase of a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    Draining,
    Expired,
}

/// Read-only view of the world a particle needs for one update.
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    pub field: &'a FlowField,
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone)]
pub struct Particle {
    position: DVec2,
    velocity: DVec2,
    angle: f64,
    speed_modifier: f64,
    history: VecDeque<DVec2>,
    max_length: usize,
    timer: i64,
    phase: Phase,
}

impl Particle {
    /// Creates a particle at `position` with an explicit speed and trail length.
    ///
    /// `max_length` is raised to 1 if zero so the trail can always hold the
    /// current position.
    pub fn new(position: DVec2, speed_modifier: u32, max_length: usize) -> Self {
        let max_length = max_length.max(1);
        let mut history = VecDeque::with_capacity(max_length + 1);
        history.push_back(position);
        Self {
            position,
            velocity: DVec2::ZERO,
            angle: 0.0,
            speed_modifier: speed_modifier as f64,
            history,
            max_length,
            timer: 2 * max_length as i64,
            phase: Phase::Active,
        }
    }

    /// Spawns a particle at a random whole-pixel position inside the canvas.
    ///
    /// Draw order: x, y, speed modifier, trail length.
    pub fn spawn(width: usize, height: usize, rng: &mut Xorshift64) -> Self {
        let position = random_point(width, height, rng);
        let speed_modifier = rng.next_between(1, MAX_SPEED_MODIFIER) as u32;
        let max_length = rng.next_between(MIN_TRAIL_LENGTH, MAX_TRAIL_LENGTH);
        Self::new(position, speed_modifier, max_length)
    }

    /// Strokes the trail as one open polyline, oldest point first.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let Some(first) = self.history.front() else {
            return;
        };
        surface.begin_path();
        surface.move_to(first.x, first.y);
        for p in &self.history {
            surface.line_to(p.x, p.y);
        }
        surface.stroke();
    }

    /// Advances the particle by one tick.
    pub fn update(&mut self, ctx: &TickContext<'_>, rng: &mut Xorshift64) {
        self.timer -= 1;
        if self.phase == Phase::Active && self.timer < 1 {
            self.phase = Phase::Draining;
        }
        if self.phase == Phase::Draining && self.history.len() <= 1 {
            self.phase = Phase::Expired;
        }

        match self.phase {
            Phase::Active => self.advance(ctx.field),
            Phase::Draining => {
                self.history.pop_front();
            }
            Phase::Expired => self.reset(ctx.width, ctx.height, rng),
        }
    }

    /// Moves to a fresh random position with a one-point trail and a full
    /// timer. Speed and trail length are kept.
    pub fn reset(&mut self, width: usize, height: usize, rng: &mut Xorshift64) {
        self.position = random_point(width, height, rng);
        self.history.clear();
        self.history.push_back(self.position);
        self.timer = 2 * self.max_length as i64;
        self.phase = Phase::Active;
        log::trace!(
            "particle respawned at ({}, {})",
            self.position.x,
            self.position.y
        );
    }

    fn advance(&mut self, field: &FlowField) {
        self.angle = field.angle_at(self.position.x, self.position.y);
        self.velocity = DVec2::new(self.angle.cos(), self.angle.sin()) * self.speed_modifier;
        self.position += self.velocity;
        self.history.push_back(self.position);
        if self.history.len() > self.max_length {
            self.history.pop_front();
        }
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Velocity applied on the last active tick.
    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    /// Flow angle sampled on the last active tick.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn speed_modifier(&self) -> u32 {
        self.speed_modifier as u32
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn timer(&self) -> i64 {
        self.timer
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Trail points, oldest first. Never empty.
    pub fn history(&self) -> &VecDeque<DVec2> {
        &self.history
    }
}

fn random_point(width: usize, height: usize, rng: &mut Xorshift64) -> DVec2 {
    let x = rng.next_below(width) as f64;
    let y = rng.next_below(height) as f64;
    DVec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records path calls so tests can inspect what a particle drew.
    #[derive(Default)]
    struct PathLog {
        ops: Vec<String>,
    }

    impl Surface for PathLog {
        fn width(&self) -> usize {
            100
        }

        fn height(&self) -> usize {
            100
        }

        fn clear_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) {
            self.ops.push("clear".into());
        }

        fn begin_path(&mut self) {
            self.ops.push("begin".into());
        }

        fn move_to(&mut self, x: f64, y: f64) {
            self.ops.push(format!("move {x} {y}"));
        }

        fn line_to(&mut self, x: f64, y: f64) {
            self.ops.push(format!("line {x} {y}"));
        }

        fn stroke(&mut self) {
            self.ops.push("stroke".into());
        }
    }

    /// 100x100 canvas, 10px cells, every angle `curve` (zoom 0 makes the
    /// trig terms constant: cos 0 + sin 0 = 1).
    fn uniform_field(curve: f64) -> FlowField {
        FlowField::new(100, 100, 10.0, curve, 0.0).unwrap()
    }

    fn ctx(field: &FlowField) -> TickContext<'_> {
        TickContext {
            field,
            width: 100,
            height: 100,
        }
    }

    #[test]
    fn new_starts_active_with_single_point_and_double_timer() {
        let p = Particle::new(DVec2::new(5.0, 6.0), 2, 30);
        assert_eq!(p.history().len(), 1);
        assert_eq!(p.history()[0], DVec2::new(5.0, 6.0));
        assert_eq!(p.timer(), 60);
        assert_eq!(p.phase(), Phase::Active);
        assert_eq!(p.speed_modifier(), 2);
    }

    #[test]
    fn new_raises_zero_max_length() {
        let p = Particle::new(DVec2::ZERO, 1, 0);
        assert_eq!(p.max_length(), 1);
    }

    #[test]
    fn spawn_draws_values_in_documented_ranges() {
        let mut rng = Xorshift64::new(42);
        for _ in 0..500 {
            let p = Particle::spawn(64, 48, &mut rng);
            let pos = p.position();
            assert!((0.0..64.0).contains(&pos.x) && pos.x.fract() == 0.0);
            assert!((0.0..48.0).contains(&pos.y) && pos.y.fract() == 0.0);
            assert!((1..=3).contains(&p.speed_modifier()));
            assert!((MIN_TRAIL_LENGTH..=MAX_TRAIL_LENGTH).contains(&p.max_length()));
            assert_eq!(p.timer(), 2 * p.max_length() as i64);
        }
    }

    #[test]
    fn angle_zero_speed_three_moves_exactly_three_right() {
        let field = uniform_field(0.0);
        let mut rng = Xorshift64::new(1);
        let mut p = Particle::new(DVec2::new(50.0, 50.0), 3, 20);
        p.update(&ctx(&field), &mut rng);
        assert_eq!(p.position(), DVec2::new(53.0, 50.0));
        assert_eq!(p.velocity(), DVec2::new(3.0, 0.0));
        assert_eq!(p.history().len(), 2);
    }

    #[test]
    fn velocity_follows_sampled_angle() {
        let field = uniform_field(1.0);
        let mut rng = Xorshift64::new(1);
        let mut p = Particle::new(DVec2::new(20.0, 20.0), 2, 20);
        p.update(&ctx(&field), &mut rng);
        assert_eq!(p.angle(), 1.0);
        let expected = DVec2::new(1.0_f64.cos(), 1.0_f64.sin()) * 2.0;
        assert!((p.velocity() - expected).length() < 1e-12);
        assert!((p.position() - (DVec2::new(20.0, 20.0) + expected)).length() < 1e-12);
    }

    #[test]
    fn trail_slides_once_full() {
        let field = uniform_field(0.0);
        let mut rng = Xorshift64::new(1);
        let mut p = Particle::new(DVec2::new(0.0, 50.0), 1, 10);
        for _ in 0..15 {
            p.update(&ctx(&field), &mut rng);
        }
        assert_eq!(p.history().len(), 10);
        assert_eq!(p.history().front().unwrap().x, 6.0);
        assert_eq!(p.history().back().unwrap().x, 15.0);
    }

    #[test]
    fn full_lifecycle_with_max_length_ten() {
        let field = uniform_field(0.0);
        let c = ctx(&field);
        let mut rng = Xorshift64::new(3);
        let mut p = Particle::new(DVec2::new(10.0, 10.0), 1, 10);
        assert_eq!(p.timer(), 20);

        for _ in 0..19 {
            p.update(&c, &mut rng);
            assert_eq!(p.phase(), Phase::Active);
        }
        assert_eq!(p.timer(), 1);
        assert_eq!(p.history().len(), 10);
        let parked = p.position();

        // Tick 20: the timer reaches 0 and the trail starts shrinking.
        p.update(&c, &mut rng);
        assert_eq!(p.phase(), Phase::Draining);
        assert_eq!(p.history().len(), 9);

        for _ in 0..8 {
            p.update(&c, &mut rng);
            assert_eq!(p.position(), parked, "draining particles do not move");
        }
        assert_eq!(p.history().len(), 1);
        assert_eq!(p.timer(), -8);

        // Tick 29: respawn.
        p.update(&c, &mut rng);
        assert_eq!(p.phase(), Phase::Active);
        assert_eq!(p.timer(), 20);
        assert_eq!(p.history().len(), 1);
        assert_eq!(p.max_length(), 10);
        assert_eq!(p.speed_modifier(), 1);
    }

    #[test]
    fn reset_keeps_speed_and_trail_length() {
        let mut rng = Xorshift64::new(8);
        let mut p = Particle::new(DVec2::new(1.0, 1.0), 3, 42);
        p.reset(30, 20, &mut rng);
        assert_eq!(p.speed_modifier(), 3);
        assert_eq!(p.max_length(), 42);
        assert_eq!(p.timer(), 84);
        assert_eq!(p.history().len(), 1);
        let pos = p.position();
        assert!((0.0..30.0).contains(&pos.x));
        assert!((0.0..20.0).contains(&pos.y));
        assert_eq!(p.history()[0], pos);
    }

    #[test]
    fn particles_drift_past_canvas_edge_without_clamping() {
        let field = uniform_field(0.0);
        let mut rng = Xorshift64::new(1);
        let mut p = Particle::new(DVec2::new(98.0, 50.0), 3, 100);
        for _ in 0..5 {
            p.update(&ctx(&field), &mut rng);
        }
        assert_eq!(p.position().x, 113.0);
    }

    #[test]
    fn draw_emits_open_polyline_oldest_first() {
        let field = uniform_field(0.0);
        let mut rng = Xorshift64::new(1);
        let mut p = Particle::new(DVec2::new(1.0, 2.0), 1, 10);
        p.update(&ctx(&field), &mut rng);
        let mut log = PathLog::default();
        p.draw(&mut log);
        assert_eq!(
            log.ops,
            vec!["begin", "move 1 2", "line 1 2", "line 2 2", "stroke"]
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn trail_stays_within_bounds(seed: u64, curve in -3.0_f64..3.0, zoom in 0.0_f64..0.5) {
                let field = FlowField::new(100, 100, 10.0, curve, zoom).unwrap();
                let c = ctx(&field);
                let mut rng = Xorshift64::new(seed);
                let mut p = Particle::spawn(100, 100, &mut rng);
                for _ in 0..600 {
                    p.update(&c, &mut rng);
                    prop_assert!(!p.history().is_empty());
                    prop_assert!(p.history().len() <= p.max_length());
                }
            }

            #[test]
            fn timer_decreases_until_reset(seed: u64) {
                let field = FlowField::new(100, 100, 10.0, 0.8, 0.04).unwrap();
                let c = ctx(&field);
                let mut rng = Xorshift64::new(seed);
                let mut p = Particle::spawn(100, 100, &mut rng);
                let full = 2 * p.max_length() as i64;
                for _ in 0..1000 {
                    let before = p.timer();
                    p.update(&c, &mut rng);
                    if p.timer() == full && p.history().len() == 1 && before < 1 {
                        continue;
                    }
                    prop_assert_eq!(p.timer(), before - 1);
                }
            }

            #[test]
            fn respawn_lands_inside_canvas(seed: u64, w in 1_usize..500, h in 1_usize..500) {
                let mut rng = Xorshift64::new(seed);
                let mut p = Particle::new(DVec2::new(-50.0, 9999.0), 2, 10);
                p.reset(w, h, &mut rng);
                let pos = p.position();
                prop_assert!(pos.x >= 0.0 && pos.x < w as f64);
                prop_assert!(pos.y >= 0.0 && pos.y < h as f64);
                prop_assert_eq!(p.history().len(), 1);
            }
        }
    }
}
