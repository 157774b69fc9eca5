use relay_core::DroneId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("grid {width}x{height} has no cells")]
    EmptyGrid { width: u32, height: u32 },

    #[error("a relay field needs at least 2 drones, got {0}")]
    TooFewDrones(usize),

    #[error("{drone} placed at ({x}, {y}) outside the {width}x{height} grid")]
    OutOfBounds {
        drone:  DroneId,
        x:      u32,
        y:      u32,
        width:  u32,
        height: u32,
    },
}

pub type MobilityResult<T> = Result<T, MobilityError>;
