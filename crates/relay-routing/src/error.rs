use relay_core::RouteId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("route {0} is not in the table")]
    UnknownRoute(RouteId),

    #[error("a route needs at least two hops, got {0}")]
    TooFewHops(usize),

    #[error("route has {hops} hops but {distances} hop distances")]
    LengthMismatch {
        hops:      usize,
        distances: usize,
    },
}

pub type RoutingResult<T> = Result<T, RoutingError>;
