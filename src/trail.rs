//! Cursor Trail Engine
//! Short-lived glowing particles that follow pointer movement and fade out

use crate::config::{ThemePalette, TrailConfig};
use crate::filter::{PointerTarget, SpawnFilter};
use egui::{Color32, Painter, Pos2, Vec2};
use rand::Rng;
use std::f32::consts::TAU;

/// One trail particle. Position and opacity are derived from age each frame;
/// only `age_ms` is mutated after spawn.
#[derive(Clone, Debug)]
pub struct Particle {
    pub id: u64,
    /// Spawn position: pointer location plus jitter.
    pub origin: Pos2,
    /// Drift velocity in pixels per millisecond of age.
    pub vel: Vec2,
    /// Simulated age, advanced by a fixed step once per frame.
    pub age_ms: f32,
    /// Wall-clock spawn time; removal is keyed off this, not off age.
    pub spawned_at_ms: u64,
    /// Diameter in pixels, fixed for the particle's life.
    pub size: f32,
    pub color: Color32,
}

impl Particle {
    /// Normalized lifetime progress: 0 at spawn, 1 at expiry.
    pub fn progress(&self, config: &TrailConfig) -> f32 {
        (self.age_ms / config.lifetime_ms as f32).clamp(0.0, 1.0)
    }

    /// Linear fade from `max_opacity` to zero, clamped at zero.
    pub fn opacity(&self, config: &TrailConfig) -> f32 {
        let raw = (1.0 - self.age_ms / config.lifetime_ms as f32) * config.max_opacity;
        raw.max(0.0)
    }

    /// Current render position: linear drift plus quadratic downward sag.
    pub fn render_pos(&self, config: &TrailConfig) -> Pos2 {
        let progress = self.progress(config);
        Pos2::new(
            self.origin.x + self.vel.x * self.age_ms,
            self.origin.y + self.vel.y * self.age_ms + progress * progress * config.gravity_drift_px,
        )
    }

    /// Soft glow radius, growing linearly over the lifetime.
    pub fn glow_radius(&self, config: &TrailConfig) -> f32 {
        config.min_glow + (config.max_glow - config.min_glow) * self.progress(config)
    }
}

/// Owns the live particle set for the overlay's mounted lifetime. Spawning,
/// aging, and removal all run on the UI thread; the engine never blocks.
pub struct TrailEngine {
    config: TrailConfig,
    filter: SpawnFilter,
    particles: Vec<Particle>,
    palette: Vec<Color32>,
    next_id: u64,
    last_spawn_ms: Option<u64>,
}

impl TrailEngine {
    pub fn new(config: TrailConfig, palette: &ThemePalette) -> Self {
        let mut engine = Self {
            config,
            filter: SpawnFilter::default(),
            particles: Vec::new(),
            palette: vec![Color32::WHITE],
            next_id: 0,
            last_spawn_ms: None,
        };
        engine.set_palette(palette);
        engine
    }

    /// Swap in a new base-color palette; affects subsequent spawns only.
    pub fn set_palette(&mut self, palette: &ThemePalette) {
        self.palette = palette
            .particles
            .iter()
            .map(|c| Color32::from_rgb(c[0], c[1], c[2]))
            .collect();

        if self.palette.is_empty() {
            self.palette.push(Color32::WHITE);
        }
    }

    pub fn set_filter(&mut self, filter: SpawnFilter) {
        self.filter = filter;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Handle one pointer-move event. Applies the spatial exclusion filter,
    /// then the temporal throttle, then spawns 1 or 2 particles near `pos`.
    /// Returns how many particles were created.
    pub fn pointer_moved(
        &mut self,
        pos: Pos2,
        target: &PointerTarget,
        now_ms: u64,
        rng: &mut impl Rng,
    ) -> usize {
        if !self.config.enabled || self.filter.should_skip(target) {
            return 0;
        }

        if let Some(last) = self.last_spawn_ms {
            if now_ms.saturating_sub(last) < self.config.spawn_interval_ms {
                return 0;
            }
        }

        // Coin flip: one or two particles per eligible event.
        let count = if rng.gen_bool(0.5) { 2 } else { 1 };
        for _ in 0..count {
            self.spawn(pos, now_ms, rng);
        }
        self.last_spawn_ms = Some(now_ms);
        count
    }

    fn spawn(&mut self, pos: Pos2, now_ms: u64, rng: &mut impl Rng) {
        let jitter = self.config.jitter_px;
        let origin = Pos2::new(
            pos.x + rng.gen_range(-jitter..jitter),
            pos.y + rng.gen_range(-jitter..jitter),
        );

        let angle = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(self.config.min_speed..self.config.max_speed);
        let vel = Vec2::new(angle.cos() * speed, angle.sin() * speed);

        let size = rng.gen_range(self.config.min_size..self.config.max_size);
        let color = self.palette[rng.gen_range(0..self.palette.len())];

        let id = self.next_id;
        self.next_id += 1;

        self.particles.push(Particle {
            id,
            origin,
            vel,
            age_ms: 0.0,
            spawned_at_ms: now_ms,
            size,
            color,
        });
    }

    /// Advance every particle's age by the fixed frame step, then drop the
    /// ones whose wall-clock lifetime has elapsed. Removal is keyed on the
    /// clock so memory stays bounded even if the render loop stalls.
    pub fn tick(&mut self, now_ms: u64) {
        let step = self.config.frame_step_ms;
        for p in &mut self.particles {
            p.age_ms += step;
        }

        let lifetime = self.config.lifetime_ms;
        self.particles
            .retain(|p| now_ms.saturating_sub(p.spawned_at_ms) < lifetime);
    }

    /// Clear-and-redraw of the whole trail for this frame. Fully faded
    /// particles are skipped; the painter owns the actual surface.
    pub fn render(&self, painter: &Painter) {
        for p in &self.particles {
            let opacity = p.opacity(&self.config);
            if opacity <= 0.0 {
                continue;
            }

            let pos = p.render_pos(&self.config);
            let radius = p.size / 2.0;
            let [r, g, b, _] = p.color.to_array();

            // Outer glow, widening as the particle ages.
            let glow_alpha = (opacity * 0.6 * 255.0) as u8;
            if glow_alpha > 1 {
                painter.circle_filled(
                    pos,
                    radius + p.glow_radius(&self.config),
                    Color32::from_rgba_unmultiplied(r, g, b, glow_alpha),
                );
            }

            // Body with a brighter off-center highlight for a radial look.
            let body_alpha = (opacity * 0.5 * 255.0) as u8;
            painter.circle_filled(pos, radius, Color32::from_rgba_unmultiplied(r, g, b, body_alpha));

            let core_alpha = ((opacity * 1.2).min(1.0) * 255.0) as u8;
            let highlight = Pos2::new(pos.x - radius * 0.3, pos.y - radius * 0.3);
            painter.circle_filled(
                highlight,
                radius * 0.45,
                Color32::from_rgba_unmultiplied(r, g, b, core_alpha),
            );
        }
    }

    /// Teardown: discard the live set. Safe to call any number of times.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.last_spawn_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{ElementInfo, ElementKind};
    use rand::rngs::mock::StepRng;

    // StepRng(0, 0) makes gen_bool(0.5) return true (two particles);
    // StepRng(u64::MAX, 0) makes it return false (one particle).
    fn rng_two() -> StepRng {
        StepRng::new(0, 0)
    }

    fn rng_one() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn engine() -> TrailEngine {
        TrailEngine::new(TrailConfig::default(), &ThemePalette::light())
    }

    #[test]
    fn eligible_event_spawns_one_or_two() {
        let mut e = engine();
        let n = e.pointer_moved(Pos2::new(50.0, 50.0), &PointerTarget::generic(), 0, &mut rng_two());
        assert_eq!(n, 2);

        let mut e = engine();
        let n = e.pointer_moved(Pos2::new(50.0, 50.0), &PointerTarget::generic(), 0, &mut rng_one());
        assert_eq!(n, 1);
    }

    #[test]
    fn excluded_target_spawns_nothing() {
        let mut e = engine();
        let target = PointerTarget::new(ElementInfo::new(ElementKind::Generic).with_class("card"));
        for t in [0, 100, 200] {
            assert_eq!(e.pointer_moved(Pos2::new(10.0, 10.0), &target, t, &mut rng_two()), 0);
        }
        assert!(e.is_empty());
    }

    #[test]
    fn burst_within_throttle_window_spawns_once() {
        let mut e = engine();
        let target = PointerTarget::generic();
        let mut rng = rng_one();

        let mut opportunities = 0;
        for t in 0..24 {
            if e.pointer_moved(Pos2::new(0.0, 0.0), &target, t, &mut rng) > 0 {
                opportunities += 1;
            }
        }
        assert_eq!(opportunities, 1);

        // Once the window has elapsed, spawning resumes.
        assert!(e.pointer_moved(Pos2::new(0.0, 0.0), &target, 25, &mut rng) > 0);
    }

    #[test]
    fn ages_advance_by_fixed_step_and_never_decrease() {
        let mut e = engine();
        e.pointer_moved(Pos2::new(0.0, 0.0), &PointerTarget::generic(), 0, &mut rng_one());

        let mut prev = e.particles()[0].age_ms;
        assert_eq!(prev, 0.0);
        for i in 1..=10u64 {
            e.tick(i * 16);
            let age = e.particles()[0].age_ms;
            assert_eq!(age, prev + 16.0);
            prev = age;
        }
    }

    #[test]
    fn opacity_stays_within_bounds_over_full_lifetime() {
        let mut e = engine();
        e.pointer_moved(Pos2::new(0.0, 0.0), &PointerTarget::generic(), 0, &mut rng_one());

        let config = *e.config();
        let mut p = e.particles()[0].clone();
        let mut age = 0.0;
        while age <= 1000.0 {
            p.age_ms = age;
            let o = p.opacity(&config);
            assert!((0.0..=0.7).contains(&o), "opacity {o} out of bounds at age {age}");
            age += 16.0;
        }
        p.age_ms = 1200.0;
        assert_eq!(p.opacity(&config), 0.0);
    }

    #[test]
    fn particle_removed_exactly_at_wall_clock_lifetime() {
        let mut e = engine();
        e.pointer_moved(Pos2::new(0.0, 0.0), &PointerTarget::generic(), 500, &mut rng_one());

        e.tick(999 + 500);
        assert_eq!(e.len(), 1);
        e.tick(1000 + 500);
        assert!(e.is_empty());
    }

    #[test]
    fn removal_outlives_a_stalled_render_loop() {
        let mut e = engine();
        e.pointer_moved(Pos2::new(0.0, 0.0), &PointerTarget::generic(), 0, &mut rng_two());

        // One late tick long after expiry still clears the set.
        e.tick(60_000);
        assert!(e.is_empty());
    }

    #[test]
    fn single_particle_scenario_at_100_100() {
        let mut e = engine();
        let n = e.pointer_moved(
            Pos2::new(100.0, 100.0),
            &PointerTarget::generic(),
            0,
            &mut rng_one(),
        );
        assert_eq!(n, 1);

        let p = &e.particles()[0];
        assert!(p.origin.x >= 90.0 && p.origin.x <= 110.0);
        assert!(p.origin.y >= 90.0 && p.origin.y <= 110.0);
        assert!(p.size >= 2.0 && p.size < 6.0);
        assert_eq!(p.age_ms, 0.0);

        let speed = p.vel.length();
        assert!(speed >= 0.5 && speed < 2.5 + 1e-3);

        // 63 frame ticks carry simulated age past the lifetime; the particle
        // is gone and would no longer render.
        for i in 1..=63u64 {
            e.tick(i * 16);
        }
        assert!(e.is_empty());
    }

    #[test]
    fn ids_are_unique_and_monotonic() {
        let mut e = engine();
        let target = PointerTarget::generic();
        let mut rng = rng_two();
        for t in (0..200).step_by(30) {
            e.pointer_moved(Pos2::new(0.0, 0.0), &target, t, &mut rng);
        }
        let ids: Vec<u64> = e.particles().iter().map(|p| p.id).collect();
        for pair in ids.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn palette_flip_recolors_subsequent_spawns() {
        let mut e = engine();
        let target = PointerTarget::generic();
        let light: Vec<Color32> = ThemePalette::light()
            .particles
            .iter()
            .map(|c| Color32::from_rgb(c[0], c[1], c[2]))
            .collect();
        let dark: Vec<Color32> = ThemePalette::dark()
            .particles
            .iter()
            .map(|c| Color32::from_rgb(c[0], c[1], c[2]))
            .collect();

        e.pointer_moved(Pos2::new(0.0, 0.0), &target, 0, &mut rng_one());
        assert!(light.contains(&e.particles()[0].color));

        e.set_palette(&ThemePalette::dark());
        e.pointer_moved(Pos2::new(0.0, 0.0), &target, 100, &mut rng_one());
        let fresh = e.particles().last().unwrap();
        assert!(dark.contains(&fresh.color));
    }

    #[test]
    fn clear_is_idempotent() {
        let mut e = engine();
        e.pointer_moved(Pos2::new(0.0, 0.0), &PointerTarget::generic(), 0, &mut rng_two());
        assert!(!e.is_empty());

        e.clear();
        assert!(e.is_empty());
        e.clear();
        assert!(e.is_empty());

        // Ticking an empty set is a no-op, not an error.
        e.tick(5000);
        assert!(e.is_empty());
    }

    #[test]
    fn drift_math_matches_fade_curve() {
        let config = TrailConfig::default();
        let p = Particle {
            id: 0,
            origin: Pos2::new(100.0, 100.0),
            vel: Vec2::new(0.1, 0.0),
            age_ms: 500.0,
            spawned_at_ms: 0,
            size: 4.0,
            color: Color32::WHITE,
        };

        // Halfway: progress 0.5, opacity 0.35, glow halfway between 8 and 16.
        assert!((p.progress(&config) - 0.5).abs() < 1e-6);
        assert!((p.opacity(&config) - 0.35).abs() < 1e-6);
        assert!((p.glow_radius(&config) - 12.0).abs() < 1e-6);

        let pos = p.render_pos(&config);
        assert!((pos.x - 150.0).abs() < 1e-3);
        // y = origin + 0 drift + 0.25 * 20 sag
        assert!((pos.y - 105.0).abs() < 1e-3);
    }
}
