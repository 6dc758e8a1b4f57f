//! Line sections.

use std::fmt;

use super::station::Station;

/// Unique identifier for a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub u64);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when constructing an invalid section.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid section: {reason}")]
pub struct InvalidSection {
    reason: &'static str,
}

/// One hop between two adjacent stations on a line.
///
/// A section always connects two different stations over a positive distance.
/// This type guarantees both by construction, so topology and routing code
/// never re-validates individual hops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    line: LineId,
    up: Station,
    down: Station,
    distance: u32,
}

impl Section {
    /// Create a section between two stations.
    ///
    /// The stations must differ and the distance must be positive.
    pub fn new(
        line: LineId,
        up: Station,
        down: Station,
        distance: u32,
    ) -> Result<Self, InvalidSection> {
        if up.id() == down.id() {
            return Err(InvalidSection {
                reason: "a section must connect two different stations",
            });
        }
        if distance == 0 {
            return Err(InvalidSection {
                reason: "distance must be positive",
            });
        }

        Ok(Self {
            line,
            up,
            down,
            distance,
        })
    }

    /// The line this section belongs to.
    pub fn line(&self) -> LineId {
        self.line
    }

    /// The station at the up end of the hop.
    pub fn up(&self) -> &Station {
        &self.up
    }

    /// The station at the down end of the hop.
    pub fn down(&self) -> &Station {
        &self.down
    }

    /// The distance between the two stations.
    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// Construct without validation, to exercise defensive checks downstream.
    #[cfg(test)]
    pub(crate) fn unchecked(line: LineId, up: Station, down: Station, distance: u32) -> Self {
        Self {
            line,
            up,
            down,
            distance,
        }
    }
}
