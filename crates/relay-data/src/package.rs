//! Packages and the data units that own them.

use relay_core::{DataId, PackageId};

use crate::{DataError, DataResult};

/// Lifecycle of one package.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PackageState {
    #[default]
    Unsent,
    InFlight,
    Delivered,
    Lost,
}

impl PackageState {
    /// Numeric code used in the data-state log: `0, 1, 2, -1`.
    pub fn code(self) -> i8 {
        match self {
            PackageState::Unsent    => 0,
            PackageState::InFlight  => 1,
            PackageState::Delivered => 2,
            PackageState::Lost      => -1,
        }
    }

    /// `true` once the package is Delivered or Lost.
    #[inline]
    pub fn is_resolved(self) -> bool {
        matches!(self, PackageState::Delivered | PackageState::Lost)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PackageState::Unsent    => "unsent",
            PackageState::InFlight  => "in_flight",
            PackageState::Delivered => "delivered",
            PackageState::Lost      => "lost",
        }
    }
}

impl std::fmt::Display for PackageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One relayable unit of a [`DataUnit`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Package {
    pub id: PackageId,
    state:  PackageState,
}

impl Package {
    pub fn new(id: PackageId) -> Self {
        Self { id, state: PackageState::Unsent }
    }

    #[inline]
    pub fn state(&self) -> PackageState {
        self.state
    }

    /// `Unsent → InFlight`.
    pub fn dispatch(&mut self) -> DataResult<()> {
        self.transition(PackageState::Unsent, PackageState::InFlight)
    }

    /// `InFlight → Delivered`.
    pub fn deliver(&mut self) -> DataResult<()> {
        self.transition(PackageState::InFlight, PackageState::Delivered)
    }

    /// `InFlight → Lost`.
    pub fn lose(&mut self) -> DataResult<()> {
        self.transition(PackageState::InFlight, PackageState::Lost)
    }

    fn transition(&mut self, from: PackageState, to: PackageState) -> DataResult<()> {
        if self.state != from {
            return Err(DataError::InvalidTransition { from: self.state, to });
        }
        self.state = to;
        Ok(())
    }
}

/// A generated piece of data split into a fixed number of packages.
///
/// The package count is set at construction and never changes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataUnit {
    pub id:   DataId,
    packages: Vec<Package>,
}

impl DataUnit {
    pub fn new(id: DataId, size: usize) -> Self {
        let packages = (0..size as u32).map(|i| Package::new(PackageId(i))).collect();
        Self { id, packages }
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn package(&self, id: PackageId) -> DataResult<&Package> {
        self.packages
            .get(id.index())
            .ok_or(DataError::UnknownPackage { data: self.id, package: id })
    }

    pub fn package_mut(&mut self, id: PackageId) -> DataResult<&mut Package> {
        let data = self.id;
        self.packages
            .get_mut(id.index())
            .ok_or(DataError::UnknownPackage { data, package: id })
    }

    /// Packages still waiting for a worker, in package order.
    pub fn unsent(&self) -> impl Iterator<Item = &Package> + '_ {
        self.packages.iter().filter(|p| p.state() == PackageState::Unsent)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
