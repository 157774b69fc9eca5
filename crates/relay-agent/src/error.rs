use relay_core::{DroneId, RouteId, WorkerId};
use relay_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error("{worker} is at {node}, which is not on {route}")]
    NotOnRoute {
        worker: WorkerId,
        node:   DroneId,
        route:  RouteId,
    },

    #[error("{worker} relays on {expected} but was stepped with {got}")]
    WrongRoute {
        worker:   WorkerId,
        expected: RouteId,
        got:      RouteId,
    },

    #[error("{0} already reached a terminal phase")]
    Finished(WorkerId),
}

pub type AgentResult<T> = Result<T, AgentError>;
