//! Per-line section chains.
//!
//! A line's sections always form exactly one simple path from its up terminus
//! to its down terminus: no branches, no cycles, no duplicate hops. Inserting
//! a section next to an existing station may split a section in two; removing
//! an interior station merges its two sections back into one.
//!
//! Every mutation first computes its full change as a plan value and only
//! then commits it, so a failed call leaves the chain untouched.

use tracing::debug;

use super::error::TopologyError;
use super::section::{LineId, Section};
use super::station::{Station, StationId};

/// The section chain belonging to one line.
#[derive(Debug, Clone)]
pub struct LineTopology {
    line: LineId,
    sections: Vec<Section>,
}

/// A validated insertion, ready to commit.
#[derive(Debug)]
enum InsertPlan {
    /// The section extends the chain at a boundary, or is the first section.
    Append(Section),
    /// The section at `replaced` splits into an upper and a lower half.
    Split {
        replaced: usize,
        upper: Section,
        lower: Section,
    },
}

/// A validated removal, ready to commit.
#[derive(Debug)]
enum RemovePlan {
    /// Drop the single boundary section touching a terminus.
    Boundary { index: usize },
    /// Replace the two sections around an interior station with one.
    Merge {
        predecessor: usize,
        successor: usize,
        merged: Section,
    },
}

impl LineTopology {
    /// Create an empty topology for a line.
    pub fn new(line: LineId) -> Self {
        Self {
            line,
            sections: Vec::new(),
        }
    }

    /// The line this topology belongs to.
    pub fn line(&self) -> LineId {
        self.line
    }

    /// The sections of the chain, in storage order.
    ///
    /// Storage order is not traversal order; use [`ordered_stations`] for the
    /// up-to-down walk.
    ///
    /// [`ordered_stations`]: LineTopology::ordered_stations
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of sections in the chain.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True if the line has no sections yet.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// True if the station appears at either end of any section.
    pub fn contains_station(&self, id: StationId) -> bool {
        self.sections
            .iter()
            .any(|s| s.up().id() == id || s.down().id() == id)
    }

    /// The station no section arrives at, if the line has any sections.
    pub fn up_terminus(&self) -> Option<&Station> {
        self.sections
            .iter()
            .map(Section::up)
            .find(|station| self.position_to(station.id()).is_none())
    }

    /// The station no section departs from, if the line has any sections.
    pub fn down_terminus(&self) -> Option<&Station> {
        self.sections
            .iter()
            .map(Section::down)
            .find(|station| self.position_from(station.id()).is_none())
    }

    /// Add a section to the chain.
    ///
    /// The first section is accepted unconditionally. After that, exactly one
    /// station of the new section must already be on the line: a match at a
    /// terminus extends the chain, a match against the interior splits the
    /// existing section at the shared station. A split requires the new
    /// distance to be strictly shorter than the split section's, so both
    /// halves keep a positive distance.
    pub fn insert(&mut self, section: Section) -> Result<(), TopologyError> {
        let plan = self.plan_insert(section)?;
        self.commit_insert(plan);
        Ok(())
    }

    /// Remove a station from the chain.
    ///
    /// Removing a terminus drops its boundary section; removing an interior
    /// station merges the two sections around it, summing their distances.
    /// The last remaining section cannot be removed.
    pub fn remove_by_station(&mut self, station: &Station) -> Result<(), TopologyError> {
        let plan = self.plan_remove(station.id())?;
        self.commit_remove(plan);
        Ok(())
    }

    /// Walk the stations of the chain from up terminus to down terminus.
    ///
    /// The traversal is lazy and each call starts afresh. Yields section
    /// count + 1 stations, or nothing for an empty topology.
    pub fn ordered_stations(&self) -> OrderedStations<'_> {
        OrderedStations {
            topology: self,
            next: self.up_terminus(),
        }
    }

    fn plan_insert(&self, section: Section) -> Result<InsertPlan, TopologyError> {
        if self.sections.is_empty() {
            return Ok(InsertPlan::Append(section));
        }

        let has_up = self.contains_station(section.up().id());
        let has_down = self.contains_station(section.down().id());

        if !has_up && !has_down {
            return Err(TopologyError::SectionStationsNotFound);
        }
        // Both stations present would either duplicate an existing hop or
        // close a branch/cycle, so it is rejected outright.
        if has_up && has_down {
            return Err(TopologyError::SectionAlreadyExists);
        }

        if let Some(replaced) = self.position_from(section.up().id()) {
            return self.plan_split(replaced, section, SplitEnd::Up);
        }
        if let Some(replaced) = self.position_to(section.down().id()) {
            return self.plan_split(replaced, section, SplitEnd::Down);
        }

        // The matched station is a terminus in the extending direction.
        Ok(InsertPlan::Append(section))
    }

    fn plan_split(
        &self,
        replaced: usize,
        section: Section,
        end: SplitEnd,
    ) -> Result<InsertPlan, TopologyError> {
        let existing = &self.sections[replaced];
        if section.distance() >= existing.distance() {
            return Err(TopologyError::InvalidSectionDistance {
                new: section.distance(),
                existing: existing.distance(),
            });
        }

        let remainder = existing.distance() - section.distance();
        let (upper, lower) = match end {
            SplitEnd::Up => {
                // existing: (A, C); new: (A, B) => (A, B) + (B, C)
                let lower = Section::new(
                    existing.line(),
                    section.down().clone(),
                    existing.down().clone(),
                    remainder,
                )
                .expect("split remainder joins distinct stations over a positive distance");
                (section, lower)
            }
            SplitEnd::Down => {
                // existing: (A, C); new: (B, C) => (A, B) + (B, C)
                let upper = Section::new(
                    existing.line(),
                    existing.up().clone(),
                    section.up().clone(),
                    remainder,
                )
                .expect("split remainder joins distinct stations over a positive distance");
                (upper, section)
            }
        };

        Ok(InsertPlan::Split {
            replaced,
            upper,
            lower,
        })
    }

    fn plan_remove(&self, station: StationId) -> Result<RemovePlan, TopologyError> {
        if self.sections.len() <= 1 {
            return Err(TopologyError::MinimumSectionSize);
        }

        let incoming = self.position_to(station);
        let outgoing = self.position_from(station);

        match (incoming, outgoing) {
            (Some(predecessor), Some(successor)) => {
                let pred = &self.sections[predecessor];
                let succ = &self.sections[successor];
                let merged = Section::new(
                    pred.line(),
                    pred.up().clone(),
                    succ.down().clone(),
                    pred.distance() + succ.distance(),
                )
                .expect("merged section joins distinct stations over a positive distance");

                Ok(RemovePlan::Merge {
                    predecessor,
                    successor,
                    merged,
                })
            }
            (Some(index), None) | (None, Some(index)) => Ok(RemovePlan::Boundary { index }),
            (None, None) => Err(TopologyError::StationNotFound(station)),
        }
    }

    fn commit_insert(&mut self, plan: InsertPlan) {
        match plan {
            InsertPlan::Append(section) => {
                debug!(
                    line = %self.line,
                    up = %section.up().id(),
                    down = %section.down().id(),
                    distance = section.distance(),
                    "appending section"
                );
                self.sections.push(section);
            }
            InsertPlan::Split {
                replaced,
                upper,
                lower,
            } => {
                debug!(
                    line = %self.line,
                    up = %upper.up().id(),
                    via = %upper.down().id(),
                    down = %lower.down().id(),
                    "splitting section"
                );
                self.sections[replaced] = upper;
                self.sections.push(lower);
            }
        }
    }

    fn commit_remove(&mut self, plan: RemovePlan) {
        match plan {
            RemovePlan::Boundary { index } => {
                let removed = self.sections.swap_remove(index);
                debug!(
                    line = %self.line,
                    up = %removed.up().id(),
                    down = %removed.down().id(),
                    "dropping boundary section"
                );
            }
            RemovePlan::Merge {
                predecessor,
                successor,
                merged,
            } => {
                debug!(
                    line = %self.line,
                    up = %merged.up().id(),
                    down = %merged.down().id(),
                    distance = merged.distance(),
                    "merging sections"
                );
                self.sections[predecessor] = merged;
                self.sections.swap_remove(successor);
            }
        }
    }

    /// Index of the section departing from the station, if any.
    fn position_from(&self, id: StationId) -> Option<usize> {
        self.sections.iter().position(|s| s.up().id() == id)
    }

    /// Index of the section arriving at the station, if any.
    fn position_to(&self, id: StationId) -> Option<usize> {
        self.sections.iter().position(|s| s.down().id() == id)
    }

    fn section_from(&self, id: StationId) -> Option<&Section> {
        self.position_from(id).map(|index| &self.sections[index])
    }
}

/// Which end of the existing section the new section shares.
#[derive(Debug, Clone, Copy)]
enum SplitEnd {
    Up,
    Down,
}

/// Lazy walk over a line's stations, up terminus first.
#[derive(Debug, Clone)]
pub struct OrderedStations<'a> {
    topology: &'a LineTopology,
    next: Option<&'a Station>,
}

impl<'a> Iterator for OrderedStations<'a> {
    type Item = &'a Station;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self
            .topology
            .section_from(current.id())
            .map(Section::down);
        Some(current)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn station(id: u64) -> Station {
        Station::new(StationId(id), format!("station-{id}"))
    }

    fn section(up: u64, down: u64, distance: u32) -> Section {
        Section::new(LineId(1), station(up), station(down), distance).unwrap()
    }

    proptest! {
        /// Appending sections end to end yields one more station than
        /// sections, with no duplicates.
        #[test]
        fn chain_length_invariant(distances in proptest::collection::vec(1u32..=1_000, 1..=12)) {
            let mut topology = LineTopology::new(LineId(1));
            for (i, distance) in distances.iter().enumerate() {
                topology.insert(section(i as u64, i as u64 + 1, *distance)).unwrap();
            }

            let stations: Vec<_> = topology.ordered_stations().collect();
            prop_assert_eq!(stations.len(), topology.len() + 1);

            let unique: std::collections::HashSet<_> =
                stations.iter().map(|s| s.id()).collect();
            prop_assert_eq!(unique.len(), stations.len());
        }

        /// A split never changes the total distance of the chain.
        #[test]
        fn split_conserves_distance(existing in 2u32..=1_000, new in 1u32..=999) {
            prop_assume!(new < existing);

            let mut topology = LineTopology::new(LineId(1));
            topology.insert(section(1, 2, existing)).unwrap();
            topology.insert(section(1, 3, new)).unwrap();

            let total: u32 = topology.sections().iter().map(Section::distance).sum();
            prop_assert_eq!(total, existing);
            prop_assert_eq!(topology.ordered_stations().count(), 3);
        }

        /// Removing an interior station merges distances exactly.
        #[test]
        fn merge_conserves_distance(first in 1u32..=1_000, second in 1u32..=1_000) {
            let mut topology = LineTopology::new(LineId(1));
            topology.insert(section(1, 2, first)).unwrap();
            topology.insert(section(2, 3, second)).unwrap();

            topology.remove_by_station(&station(2)).unwrap();

            prop_assert_eq!(topology.len(), 1);
            prop_assert_eq!(topology.sections()[0].distance(), first + second);
        }

        /// A rejected split leaves the chain untouched.
        #[test]
        fn rejected_split_changes_nothing(existing in 1u32..=1_000, extra in 0u32..=100) {
            let mut topology = LineTopology::new(LineId(1));
            topology.insert(section(1, 2, existing)).unwrap();

            let result = topology.insert(section(1, 3, existing + extra));

            prop_assert!(result.is_err());
            prop_assert_eq!(topology.len(), 1);
            prop_assert_eq!(topology.sections()[0].distance(), existing);
        }
    }
}
