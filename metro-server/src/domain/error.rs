//! Topology error types.
//!
//! These errors represent validation failures against a line's section chain.
//! Every check runs before any mutation, so a returned error means the line
//! is exactly as it was before the call.

use super::station::StationId;

/// Validation failures for line topology mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    /// Neither station of the new section is on the line yet
    #[error("neither station of the new section is on the line")]
    SectionStationsNotFound,

    /// Both stations of the new section are already on the line
    #[error("both stations of the new section are already on the line")]
    SectionAlreadyExists,

    /// A splitting section must be strictly shorter than the section it splits
    #[error("new section distance {new} must be shorter than the split section distance {existing}")]
    InvalidSectionDistance { new: u32, existing: u32 },

    /// A line must keep at least one section
    #[error("a line must keep at least one section")]
    MinimumSectionSize,

    /// The target station is not part of the line
    #[error("station {0} is not on the line")]
    StationNotFound(StationId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TopologyError::SectionStationsNotFound;
        assert_eq!(
            err.to_string(),
            "neither station of the new section is on the line"
        );

        let err = TopologyError::InvalidSectionDistance {
            new: 10,
            existing: 7,
        };
        assert_eq!(
            err.to_string(),
            "new section distance 10 must be shorter than the split section distance 7"
        );

        let err = TopologyError::MinimumSectionSize;
        assert_eq!(err.to_string(), "a line must keep at least one section");

        let err = TopologyError::StationNotFound(StationId(4));
        assert_eq!(err.to_string(), "station 4 is not on the line");
    }
}
