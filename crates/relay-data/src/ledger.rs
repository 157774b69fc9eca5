//! `DataLedger` — all data units generated during a run.

use relay_core::{DataId, PackageId};

use crate::{DataError, DataResult, DataUnit, Package, PackageState};

/// Package totals by lifecycle state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PackageCounts {
    pub unsent:    usize,
    pub in_flight: usize,
    pub delivered: usize,
    pub lost:      usize,
}

impl PackageCounts {
    pub fn total(&self) -> usize {
        self.unsent + self.in_flight + self.delivered + self.lost
    }
}

/// Owner of every [`DataUnit`], indexed by a monotonic [`DataId`].
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataLedger {
    units: Vec<DataUnit>,
}

impl DataLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a new data unit of `size` packages, all Unsent.
    pub fn add_data(&mut self, size: usize) -> DataId {
        let id = DataId(self.units.len() as u32);
        self.units.push(DataUnit::new(id, size));
        id
    }

    /// Number of data units generated so far.
    pub fn data_count(&self) -> usize {
        self.units.len()
    }

    pub fn units(&self) -> &[DataUnit] {
        &self.units
    }

    pub fn data(&self, id: DataId) -> DataResult<&DataUnit> {
        self.units.get(id.index()).ok_or(DataError::UnknownData(id))
    }

    pub fn package_mut(&mut self, data: DataId, package: PackageId) -> DataResult<&mut Package> {
        self.units
            .get_mut(data.index())
            .ok_or(DataError::UnknownData(data))?
            .package_mut(package)
    }

    /// Every Unsent package as `(data, package)`, oldest data first.
    pub fn unsent_packages(&self) -> Vec<(DataId, PackageId)> {
        self.units
            .iter()
            .flat_map(|unit| unit.unsent().map(move |p| (unit.id, p.id)))
            .collect()
    }

    /// `true` once every generated package is Delivered or Lost.
    pub fn all_resolved(&self) -> bool {
        self.units
            .iter()
            .all(|unit| unit.packages().iter().all(|p| p.state().is_resolved()))
    }

    pub fn counts(&self) -> PackageCounts {
        let mut counts = PackageCounts::default();
        for p in self.units.iter().flat_map(|u| u.packages()) {
            match p.state() {
                PackageState::Unsent    => counts.unsent += 1,
                PackageState::InFlight  => counts.in_flight += 1,
                PackageState::Delivered => counts.delivered += 1,
                PackageState::Lost      => counts.lost += 1,
            }
        }
        counts
    }
}
