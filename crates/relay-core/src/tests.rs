//! Unit tests for relay-core primitives.

#[cfg(test)]
mod ids {
    use crate::{DroneId, RouteId, WorkerId};

    #[test]
    fn index_roundtrip() {
        let id = DroneId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(DroneId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn next_is_monotonic() {
        assert_eq!(RouteId(0).next(), RouteId(1));
        assert!(RouteId(3) < RouteId(3).next());
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(DroneId::INVALID.0, u32::MAX);
        assert_eq!(WorkerId::default(), WorkerId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(DroneId(7).to_string(), "DroneId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Point;

    #[test]
    fn zero_distance() {
        let p = Point::new(3.0, -8.0);
        assert_eq!(p.distance(p), 0.0);
    }

    #[test]
    fn pythagorean_triple() {
        assert!((Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn negative_coordinates() {
        let d = Point::new(0.0, 0.0).distance(Point::new(-3.0, -4.0));
        assert!((d - 5.0).abs() < 1e-12);
    }
}

#[cfg(test)]
mod link {
    use crate::{LinkThresholds, RiskBand};

    const T: LinkThresholds = LinkThresholds::new(5.0, 10.0, 15.0);

    #[test]
    fn classify_bands_inclusive_upper_bounds() {
        assert_eq!(T.classify(0.0), Some(RiskBand::Safe));
        assert_eq!(T.classify(5.0), Some(RiskBand::Safe));
        assert_eq!(T.classify(5.5), Some(RiskBand::Close));
        assert_eq!(T.classify(10.0), Some(RiskBand::Close));
        assert_eq!(T.classify(11.0), Some(RiskBand::Danger));
        assert_eq!(T.classify(15.0), Some(RiskBand::Danger));
        assert_eq!(T.classify(15.1), None);
    }

    #[test]
    fn hop_cost_is_one_below_stable_and_linear_above() {
        assert_eq!(T.hop_cost(1.0), 1.0);
        assert_eq!(T.hop_cost(4.99), 1.0);
        assert_eq!(T.hop_cost(5.0), 1.0);
        assert_eq!(T.hop_cost(8.0), 4.0);
    }

    #[test]
    fn hop_quality_in_unit_interval() {
        for d in [0.5, 5.0, 7.5, 14.0, 100.0] {
            let q = T.hop_quality(d);
            assert!(q > 0.0 && q <= 1.0, "q({d}) = {q}");
        }
        assert!((T.hop_quality(9.0) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn delay_rounds_up() {
        assert_eq!(T.hop_delay_ticks(1.0), 1);
        assert_eq!(T.hop_delay_ticks(7.0), 3);
        assert_eq!(T.hop_delay_ticks(7.2), 4);
    }

    #[test]
    fn near_disconnect_is_inclusive() {
        assert!(!T.is_near_disconnect(9.99));
        assert!(T.is_near_disconnect(10.0));
        assert!(T.is_reachable(15.0));
        assert!(!T.is_reachable(15.01));
    }
}

#[cfg(test)]
mod time {
    use crate::Tick;

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn periods() {
        assert!(Tick(0).is_period(5));
        assert!(Tick(10).is_period(5));
        assert!(!Tick(11).is_period(5));
        assert!(!Tick(10).is_period(0));
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentRng, SimRng};

    fn picks(rng: &mut AgentRng) -> Vec<u32> {
        let pool: Vec<u32> = (0..1000).collect();
        (0..32).map(|_| *rng.choose(&pool).unwrap()).collect()
    }

    #[test]
    fn deterministic_same_seed() {
        assert_eq!(picks(&mut AgentRng::new(12345, 0)), picks(&mut AgentRng::new(12345, 0)));
    }

    #[test]
    fn different_streams_differ() {
        assert_ne!(
            picks(&mut AgentRng::new(1, 0)),
            picks(&mut AgentRng::new(1, 1)),
            "seeds for adjacent agents should diverge"
        );
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = AgentRng::new(0, 0);
        let empty: [u32; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&[9]), Some(&9));
    }

    #[test]
    fn sim_rng_range_in_bounds() {
        let mut rng = SimRng::new(7);
        for _ in 0..1000 {
            let v: i64 = rng.gen_range(-1..=1);
            assert!((-1..=1).contains(&v));
        }
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, RelayParams};

    #[test]
    fn defaults_are_valid() {
        RelayParams::default().validate().unwrap();
    }

    #[test]
    fn threshold_ordering_enforced() {
        let p = RelayParams { disconnect_radius: 15.0, ..RelayParams::default() };
        assert!(matches!(p.validate(), Err(CoreError::Config(_))));

        let p = RelayParams { stable_max: 10.0, ..RelayParams::default() };
        assert!(p.validate().is_err());
    }

    #[test]
    fn counts_and_periods_enforced() {
        for p in [
            RelayParams { drone_count: 1, ..RelayParams::default() },
            RelayParams { drone_move_period: 0, ..RelayParams::default() },
            RelayParams { scout_count: 0, ..RelayParams::default() },
            RelayParams { scout_energy_limit: 0.0, ..RelayParams::default() },
            RelayParams { data_count: 0, ..RelayParams::default() },
            RelayParams { data_size: 0, ..RelayParams::default() },
            RelayParams { data_generate_period: 0, ..RelayParams::default() },
            RelayParams { world_width: 0, ..RelayParams::default() },
            RelayParams { world_height: 0, ..RelayParams::default() },
        ] {
            assert!(p.validate().is_err(), "{p:?} should be rejected");
        }
    }

    #[test]
    fn thresholds_mirror_params() {
        let t = RelayParams::default().thresholds();
        assert_eq!((t.stable_max, t.disconnect_radius, t.max_radius), (5.0, 10.0, 15.0));
    }
}

#[cfg(all(test, feature = "serde"))]
mod params_json {
    use crate::RelayParams;

    #[test]
    fn missing_fields_take_defaults() {
        let p: RelayParams = serde_json::from_str(r#"{ "drone_count": 12, "seed": 3 }"#).unwrap();
        assert_eq!(p.drone_count, 12);
        assert_eq!(p.seed, 3);
        assert_eq!(p.scout_count, RelayParams::default().scout_count);
    }

    #[test]
    fn dotted_keys_are_accepted() {
        let p: RelayParams = serde_json::from_str(
            r#"{ "drone.count": 8, "drone.drone_radius_distance": 20.0, "stop.at": 500 }"#,
        )
        .unwrap();
        assert_eq!(p.drone_count, 8);
        assert_eq!(p.max_radius, 20.0);
        assert_eq!(p.total_ticks, 500);
    }
}
