use relay_core::{DataId, PackageId};
use thiserror::Error;

use crate::PackageState;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("data unit {0} does not exist")]
    UnknownData(DataId),

    #[error("package {package} does not exist in {data}")]
    UnknownPackage {
        data:    DataId,
        package: PackageId,
    },

    #[error("package cannot move from {from} to {to}")]
    InvalidTransition {
        from: PackageState,
        to:   PackageState,
    },
}

pub type DataResult<T> = Result<T, DataError>;
