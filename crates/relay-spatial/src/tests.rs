//! Unit tests for relay-spatial.

use relay_core::{DroneId, Point};

use crate::{NodeSnapshot, SpatialError};

/// Drones 0..n on the y axis at the given heights.
fn column(ys: &[f64]) -> NodeSnapshot {
    NodeSnapshot::new(
        ys.iter()
            .enumerate()
            .map(|(i, &y)| (DroneId(i as u32), Point::new(0.0, y))),
    )
}

#[cfg(test)]
mod lookup {
    use super::*;

    #[test]
    fn finds_by_id() {
        let snap = column(&[0.0, 1.0, 10.0]);
        assert_eq!(snap.len(), 3);
        assert_eq!(snap.position(DroneId(2)).unwrap(), Point::new(0.0, 10.0));
        assert!(snap.contains(DroneId(0)));
    }

    #[test]
    fn missing_id_is_an_error_not_a_default() {
        let snap = column(&[0.0, 0.0]);
        match snap.position(DroneId(11)) {
            Err(SpatialError::NodeNotFound(id)) => assert_eq!(id, DroneId(11)),
            other => panic!("expected NodeNotFound, got {other:?}"),
        }
        assert!(snap.distance(DroneId(0), DroneId(11)).is_err());
    }

    #[test]
    fn repeated_positions_allowed() {
        let snap = column(&[5.0, 5.0, 5.0]);
        assert_eq!(snap.distance(DroneId(0), DroneId(2)).unwrap(), 0.0);
    }

    #[test]
    fn repeated_id_keeps_last_position() {
        let snap = NodeSnapshot::new([
            (DroneId(1), Point::new(0.0, 0.0)),
            (DroneId(1), Point::new(3.0, 4.0)),
        ]);
        assert_eq!(snap.len(), 1);
        assert_eq!(snap.position(DroneId(1)).unwrap(), Point::new(3.0, 4.0));
    }

    #[test]
    fn empty_snapshot() {
        let snap = NodeSnapshot::empty();
        assert!(snap.is_empty());
        assert!(snap.within(Point::default(), 100.0).is_empty());
    }
}

#[cfg(test)]
mod radius_query {
    use super::*;

    #[test]
    fn inclusive_boundary() {
        let snap = column(&[0.0, 15.0, 15.5]);
        let ids: Vec<DroneId> = snap
            .within(Point::new(0.0, 0.0), 15.0)
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec![DroneId(0), DroneId(1)]);
    }

    #[test]
    fn sorted_by_id_with_exact_distances() {
        let snap = NodeSnapshot::new([
            (DroneId(9), Point::new(3.0, 4.0)),
            (DroneId(2), Point::new(0.0, 1.0)),
            (DroneId(5), Point::new(6.0, 8.0)),
        ]);
        let found = snap.within(Point::new(0.0, 0.0), 10.0);
        assert_eq!(found.len(), 3);
        assert_eq!(found[0], (DroneId(2), 1.0));
        assert_eq!(found[1].0, DroneId(5));
        assert!((found[1].1 - 10.0).abs() < 1e-12);
        assert_eq!(found[2].0, DroneId(9));
        assert!((found[2].1 - 5.0).abs() < 1e-12);
    }
}
