//! Path query error types.

use crate::domain::StationId;

/// Error from a shortest-path query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Source and destination are the same station
    #[error("source and destination are both station {0}")]
    SameStation(StationId),

    /// A query endpoint is not a vertex of the graph
    #[error("station {0} is not part of the network")]
    StationNotFound(StationId),

    /// No route connects the two stations
    #[error("no path between stations {source} and {destination}")]
    PathNotFound {
        source: StationId,
        destination: StationId,
    },

    /// A section with a non-positive distance reached the graph builder
    #[error("section between stations {up} and {down} has a non-positive distance")]
    InvalidWeight { up: StationId, down: StationId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PathError::SameStation(StationId(1));
        assert_eq!(err.to_string(), "source and destination are both station 1");

        let err = PathError::PathNotFound {
            source: StationId(1),
            destination: StationId(9),
        };
        assert_eq!(err.to_string(), "no path between stations 1 and 9");

        let err = PathError::InvalidWeight {
            up: StationId(1),
            down: StationId(2),
        };
        assert_eq!(
            err.to_string(),
            "section between stations 1 and 2 has a non-positive distance"
        );
    }
}
