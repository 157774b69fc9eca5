use relay_agent::AgentError;
use relay_data::DataError;
use relay_mobility::MobilityError;
use relay_routing::RoutingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("route table error: {0}")]
    Routing(#[from] RoutingError),

    #[error("data ledger error: {0}")]
    Data(#[from] DataError),

    #[error("drone field error: {0}")]
    Mobility(#[from] MobilityError),
}

pub type SimResult<T> = Result<T, SimError>;
