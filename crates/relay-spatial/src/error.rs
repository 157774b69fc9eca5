use relay_core::DroneId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpatialError {
    /// A drone assumed present for this tick is missing from the snapshot.
    #[error("drone {0} not found in snapshot")]
    NodeNotFound(DroneId),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
