//! Property tests for the limit coupling and the barometric formulas

use proptest::prelude::*;

use thermoguard_core::constants::SEA_LEVEL_PRESSURE_HPA;
use thermoguard_core::{
    altitude_from_pressure, local_normal_pressure, sea_level_pressure_from_local, try_dew_point,
    Scheduler, TemperatureBand, ThresholdConfig,
};

/// Relative tolerance for f32 comparisons after a few operations
fn close(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-4 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #[test]
    fn delta_setter_holds_high(h in -40.0f32..60.0, d in -10.0f32..10.0) {
        let mut cfg = ThresholdConfig::default();
        cfg.set_high(h);
        cfg.set_delta(d);

        prop_assert_eq!(cfg.high(), h);
        prop_assert_eq!(cfg.low(), h - d);
    }

    #[test]
    fn low_setter_keeps_previous_delta(start in 0.5f32..8.0, l in -40.0f32..60.0) {
        let mut cfg = ThresholdConfig::default();
        cfg.set_delta(start);
        let previous = cfg.delta();

        cfg.set_low(l);

        prop_assert_eq!(cfg.low(), l);
        prop_assert_eq!(cfg.high(), l + previous);
    }

    #[test]
    fn any_setter_keeps_coupling(ops in prop::collection::vec((0u8..3, -40.0f32..60.0), 1..20)) {
        let mut cfg = ThresholdConfig::default();
        for (op, value) in ops {
            match op {
                0 => cfg.set_low(value),
                1 => cfg.set_high(value),
                _ => cfg.set_delta(value),
            }
            prop_assert!(close(cfg.high(), cfg.low() + cfg.delta()));
        }
    }

    #[test]
    fn negative_delta_never_in_range(h in -40.0f32..60.0, d in -10.0f32..-0.01, t in -60.0f32..80.0) {
        let mut cfg = ThresholdConfig::default();
        cfg.set_high(h);
        cfg.set_delta(d);

        prop_assert_ne!(cfg.classify(t), TemperatureBand::InRange);
    }

    #[test]
    fn sea_level_round_trip(h in 0.0f32..4000.0) {
        let p0 = sea_level_pressure_from_local(local_normal_pressure(h), h);
        prop_assert!((p0 - SEA_LEVEL_PRESSURE_HPA).abs() < 0.05, "h={} p0={}", h, p0);
    }

    #[test]
    fn altimeter_inverts_barometric_formula(h in 0.0f32..4000.0) {
        let estimated = altitude_from_pressure(local_normal_pressure(h), SEA_LEVEL_PRESSURE_HPA);
        prop_assert!((estimated - h).abs() < 2.0, "h={} estimated={}", h, estimated);
    }

    #[test]
    fn dew_point_not_above_air_temperature(t in -30.0f32..50.0, rh in 1.0f32..100.0) {
        let dp = try_dew_point(t, rh).unwrap();
        prop_assert!(dp <= t + 0.01, "t={} rh={} dp={}", t, rh, dp);
    }

    #[test]
    fn scheduler_fires_iff_interval_elapsed(interval in 1u32..10_000, steps in prop::collection::vec(0u32..5_000, 1..50)) {
        let mut sched = Scheduler::new(interval);
        let mut now = 0u32;
        let mut last_fired = 0u32;

        for step in steps {
            now += step;
            let expected = now - last_fired >= interval;
            prop_assert_eq!(sched.poll(now), expected);
            if expected {
                last_fired = now;
            }
        }
    }
}
