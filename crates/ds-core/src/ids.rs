//! Strongly typed probe identifier.
//!
//! `ProbeId` is `Copy + Ord + Hash` so it can key maps and sort without
//! ceremony.  The inner integer is `pub` for direct `Vec` indexing, but
//! callers should prefer [`ProbeId::index`].

use std::fmt;

/// Index of a probe in the probe store.
///
/// Assigned densely in deployment order and never reused: probes are never
/// removed once deployed.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProbeId(pub u32);

impl ProbeId {
    /// Sentinel meaning "no probe".
    pub const INVALID: ProbeId = ProbeId(u32::MAX);

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for ProbeId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for ProbeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "probe#{}", self.0)
    }
}

impl TryFrom<usize> for ProbeId {
    type Error = std::num::TryFromIntError;

    fn try_from(n: usize) -> Result<ProbeId, Self::Error> {
        u32::try_from(n).map(ProbeId)
    }
}
