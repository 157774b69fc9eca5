//! Per-scout RNG streams, kept beside the scout arena.
//!
//! Scouts themselves stay plain data (`Clone`, optionally serializable); the
//! randomness they consume lives here, indexed by `ScoutId`.  Keeping the two
//! in separate `Vec`s lets the driver hand out `&mut Scout` and `&mut AgentRng`
//! for the same scout at once, sequentially or zipped on Rayon's pool.

use relay_core::{AgentRng, ScoutId};

/// Stream 0 would reproduce the root `SimRng` seed, so scouts start at 1.
const FIRST_SCOUT_STREAM: u64 = 1;

pub struct ScoutRngs {
    pub inner: Vec<AgentRng>,
}

impl ScoutRngs {
    /// Seed `count` streams from `global_seed`.
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u64)
            .map(|i| AgentRng::new(global_seed, FIRST_SCOUT_STREAM + i))
            .collect();
        Self { inner }
    }

    #[inline]
    pub fn get_mut(&mut self, scout: ScoutId) -> &mut AgentRng {
        &mut self.inner[scout.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
