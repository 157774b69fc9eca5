//! `RunSummary` — end-of-run statistics over packages and scouting rounds.
//!
//! A package's lifetime is the span between its first and last recorded
//! state change (generation to delivery or loss).  A data unit's lifetime
//! spans the first and last change of any of its packages.

use std::collections::BTreeMap;
use std::fmt;

use relay_core::{DataId, PackageId, Tick};
use relay_data::PackageState;
use relay_sim::{PackageEvent, ScoutingRound};

/// Min / max / mean over a set of lifetimes, in ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Lifetimes {
    pub min:  u64,
    pub max:  u64,
    pub mean: f64,
}

impl Lifetimes {
    fn over(spans: impl Iterator<Item = u64>) -> Option<Self> {
        let (mut min, mut max, mut sum, mut n) = (u64::MAX, 0, 0u64, 0u64);
        for s in spans {
            min = min.min(s);
            max = max.max(s);
            sum += s;
            n += 1;
        }
        (n > 0).then(|| Lifetimes { min, max, mean: sum as f64 / n as f64 })
    }
}

/// Final statistics of one run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunSummary {
    pub final_tick:       u64,
    pub delivered:        usize,
    pub lost:             usize,
    pub package_lifetime: Option<Lifetimes>,
    pub data_lifetime:    Option<Lifetimes>,
    pub scouting_rounds:  u64,
    /// Mean number of scouts per round that came back with a path.
    pub mean_paths_found: Option<f64>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn lifetimes(f: &mut fmt::Formatter<'_>, what: &str, l: Option<Lifetimes>) -> fmt::Result {
            match l {
                Some(l) => writeln!(f, "{what} lifetime: min {} / max {} / mean {:.2}", l.min, l.max, l.mean),
                None => writeln!(f, "{what} lifetime: n/a"),
            }
        }

        writeln!(f, "-----SCOUTING-----")?;
        writeln!(f, "scouting rounds:    {}", self.scouting_rounds)?;
        match self.mean_paths_found {
            Some(m) => writeln!(f, "mean paths found:   {m:.2}")?,
            None => writeln!(f, "mean paths found:   n/a")?,
        }
        writeln!(f, "-----PACKAGES-----")?;
        writeln!(f, "delivered:          {}", self.delivered)?;
        writeln!(f, "lost:               {}", self.lost)?;
        lifetimes(f, "package", self.package_lifetime)?;
        lifetimes(f, "data", self.data_lifetime)?;
        write!(f, "final tick:         {}", self.final_tick)
    }
}

/// Accumulates observer events into a [`RunSummary`].
#[derive(Debug, Default, Clone)]
pub struct SummaryBuilder {
    spans:       BTreeMap<(DataId, PackageId), (Tick, Tick)>,
    delivered:   usize,
    lost:        usize,
    rounds:      u64,
    paths_found: u64,
    final_tick:  Tick,
}

impl SummaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_package(&mut self, tick: Tick, event: &PackageEvent) {
        self.spans
            .entry((event.data, event.package))
            .and_modify(|(_, last)| *last = tick)
            .or_insert((tick, tick));
        match event.state {
            PackageState::Delivered => self.delivered += 1,
            PackageState::Lost      => self.lost += 1,
            PackageState::Unsent | PackageState::InFlight => {}
        }
    }

    pub fn record_round(&mut self, round: &ScoutingRound) {
        self.rounds += 1;
        self.paths_found += round.ended as u64;
    }

    pub fn record_end(&mut self, final_tick: Tick) {
        self.final_tick = final_tick;
    }

    pub fn build(&self) -> RunSummary {
        let package_lifetime = Lifetimes::over(self.spans.values().map(|(first, last)| *last - *first));

        let mut per_data: BTreeMap<DataId, (Tick, Tick)> = BTreeMap::new();
        for (&(data, _), &(first, last)) in &self.spans {
            per_data
                .entry(data)
                .and_modify(|(f, l)| {
                    *f = (*f).min(first);
                    *l = (*l).max(last);
                })
                .or_insert((first, last));
        }
        let data_lifetime = Lifetimes::over(per_data.values().map(|(first, last)| *last - *first));

        RunSummary {
            final_tick: self.final_tick.0,
            delivered: self.delivered,
            lost: self.lost,
            package_lifetime,
            data_lifetime,
            scouting_rounds: self.rounds,
            mean_paths_found: (self.rounds > 0).then(|| self.paths_found as f64 / self.rounds as f64),
        }
    }
}
