use rand::{rngs::StdRng, Rng, SeedableRng};
use tacmapcore::math::units::FEET_PER_NAUTICAL_MILE;
use tacmapcore::sim::{keys, TelemetrySnapshot};

use crate::generator::template::synthetic_feed;
use crate::workflow::config::ScenarioConfig;

/// Seeded ownship track: a straight leg with small random heading changes.
#[derive(Debug, Clone)]
pub struct FlightProfile {
    rng: StdRng,
    tick: usize,
    x_feet: f64,
    y_feet: f64,
    heading_deg: f64,
    feet_per_tick: f64,
    heading_jitter_deg: f64,
    bullseye: (f64, f64),
    theater: String,
    landing_tick: Option<usize>,
    nav_feed: String,
}

impl FlightProfile {
    pub fn new(config: &ScenarioConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let ownship = &config.ownship;
        let nav_feed = synthetic_feed(
            &mut rng,
            (ownship.x_feet, ownship.y_feet),
            ownship.heading_deg,
            config.waypoints,
            config.threats,
        );
        let hours_per_tick = config.tick_interval_ms as f64 / 3_600_000.0;
        Self {
            rng,
            tick: 0,
            x_feet: ownship.x_feet,
            y_feet: ownship.y_feet,
            heading_deg: ownship.heading_deg.rem_euclid(360.0),
            feet_per_tick: ownship.speed_knots * hours_per_tick * FEET_PER_NAUTICAL_MILE,
            heading_jitter_deg: ownship.heading_jitter_deg.abs(),
            bullseye: (config.bullseye.x_feet, config.bullseye.y_feet),
            theater: config.theater.clone(),
            landing_tick: config.landing_tick,
            nav_feed,
        }
    }

    pub fn tick(&self) -> usize {
        self.tick
    }

    pub fn in_flight(&self) -> bool {
        self.landing_tick.map_or(true, |landing| self.tick < landing)
    }

    /// Telemetry for the current tick, then advances the track. The nav
    /// feed is flagged as changed on the first tick only.
    pub fn next_snapshot(&mut self) -> TelemetrySnapshot {
        let mut snapshot = TelemetrySnapshot::new();
        if self.in_flight() {
            snapshot
                .set(keys::FLIGHT_ACTIVE, true)
                .set(keys::HEADING, self.heading_deg)
                .set(keys::OWNSHIP_X, self.x_feet)
                .set(keys::OWNSHIP_Y, self.y_feet)
                .set(keys::BULLSEYE_DX, self.x_feet - self.bullseye.0)
                .set(keys::BULLSEYE_DY, self.y_feet - self.bullseye.1);
        }
        snapshot
            .set(keys::THEATER, self.theater.as_str())
            .set(keys::NAV_POINTS_CHANGED, self.tick == 0);
        if self.tick == 0 {
            snapshot.set(keys::NAV_POINTS_FEED, self.nav_feed.as_str());
        }
        self.advance();
        snapshot
    }

    fn advance(&mut self) {
        self.tick += 1;
        if !self.in_flight() {
            return;
        }
        if self.heading_jitter_deg > 0.0 {
            let jitter = self
                .rng
                .gen_range(-self.heading_jitter_deg..=self.heading_jitter_deg);
            self.heading_deg = (self.heading_deg + jitter).rem_euclid(360.0);
        }
        let (sin, cos) = self.heading_deg.to_radians().sin_cos();
        self.x_feet += sin * self.feet_per_tick;
        self.y_feet += cos * self.feet_per_tick;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacmapcore::sim::TelemetrySource;

    fn config() -> ScenarioConfig {
        ScenarioConfig {
            landing_tick: Some(3),
            ..Default::default()
        }
    }

    #[test]
    fn same_seed_gives_same_track() {
        let mut first = FlightProfile::new(&config());
        let mut second = FlightProfile::new(&config());
        for _ in 0..3 {
            let a = first.next_snapshot();
            let b = second.next_snapshot();
            assert_eq!(a.read(keys::OWNSHIP_X), b.read(keys::OWNSHIP_X));
            assert_eq!(a.read(keys::HEADING), b.read(keys::HEADING));
        }
    }

    #[test]
    fn nav_feed_is_published_once() {
        let mut profile = FlightProfile::new(&config());
        let first = profile.next_snapshot();
        assert!(first.read(keys::NAV_POINTS_CHANGED).as_bool());
        assert!(!first.read(keys::NAV_POINTS_FEED).as_text().is_empty());
        let second = profile.next_snapshot();
        assert!(!second.read(keys::NAV_POINTS_CHANGED).as_bool());
    }

    #[test]
    fn ownship_moves_and_lands() {
        let mut profile = FlightProfile::new(&config());
        let start = profile.next_snapshot();
        let later = profile.next_snapshot();
        assert_ne!(
            start.read(keys::OWNSHIP_Y).as_f64(),
            later.read(keys::OWNSHIP_Y).as_f64()
        );
        profile.next_snapshot();
        let landed = profile.next_snapshot();
        assert!(!landed.read(keys::FLIGHT_ACTIVE).as_bool());
        assert_eq!(profile.tick(), 4);
    }
}
