//! Shortest-path search over a network graph.
//!
//! Plain Dijkstra with a binary-heap frontier. Equal tentative distances are
//! popped in insertion order (a monotone counter in the heap key), so a run
//! over the same graph always returns the same path. No search state survives
//! a call; every query starts from a fresh graph and a fresh frontier.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use tracing::debug;

use crate::domain::{Section, Station, StationId};

use super::error::PathError;
use super::graph::NetworkGraph;

/// A shortest route between two stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    /// Stations along the route, source first.
    pub stations: Vec<Station>,

    /// Sum of the traversed section distances.
    pub distance: u64,
}

/// Find the shortest route between two stations across the given sections.
///
/// Builds a fresh [`NetworkGraph`] for the query and runs a single search.
pub fn find_shortest_path(
    source: &Station,
    destination: &Station,
    sections: &[Section],
) -> Result<Path, PathError> {
    let graph = NetworkGraph::from_sections(sections)?;
    graph.shortest_path(source, destination)
}

impl NetworkGraph {
    /// Run Dijkstra from `source` to `destination`.
    ///
    /// Fails if the stations are equal, if either is not a vertex of this
    /// graph, or if the frontier exhausts before reaching the destination.
    pub fn shortest_path(
        &self,
        source: &Station,
        destination: &Station,
    ) -> Result<Path, PathError> {
        if source.id() == destination.id() {
            return Err(PathError::SameStation(source.id()));
        }
        for station in [source, destination] {
            if !self.contains(station.id()) {
                return Err(PathError::StationNotFound(station.id()));
            }
        }

        let mut best: HashMap<StationId, u64> = HashMap::new();
        let mut came_from: HashMap<StationId, StationId> = HashMap::new();
        let mut frontier: BinaryHeap<Reverse<(u64, u64, StationId)>> = BinaryHeap::new();
        let mut sequence = 0u64;

        best.insert(source.id(), 0);
        frontier.push(Reverse((0, sequence, source.id())));

        while let Some(Reverse((distance, _, current))) = frontier.pop() {
            // A shorter route to this station was settled after this entry
            // was pushed.
            if distance > best.get(&current).copied().unwrap_or(u64::MAX) {
                continue;
            }

            if current == destination.id() {
                debug!(
                    source = %source.id(),
                    destination = %destination.id(),
                    distance,
                    settled = best.len(),
                    "shortest path found"
                );
                return self.reconstruct(destination.id(), &came_from, distance);
            }

            for edge in self.neighbors(current) {
                let candidate = distance + u64::from(edge.weight);
                if candidate < best.get(&edge.to).copied().unwrap_or(u64::MAX) {
                    best.insert(edge.to, candidate);
                    came_from.insert(edge.to, current);
                    sequence += 1;
                    frontier.push(Reverse((candidate, sequence, edge.to)));
                }
            }
        }

        debug!(
            source = %source.id(),
            destination = %destination.id(),
            settled = best.len(),
            "frontier exhausted without reaching destination"
        );
        Err(PathError::PathNotFound {
            source: source.id(),
            destination: destination.id(),
        })
    }

    /// Walk the predecessor links back from the destination.
    fn reconstruct(
        &self,
        destination: StationId,
        came_from: &HashMap<StationId, StationId>,
        distance: u64,
    ) -> Result<Path, PathError> {
        let mut stations = Vec::new();
        let mut current = destination;

        loop {
            let station = self
                .station(current)
                .ok_or(PathError::StationNotFound(current))?;
            stations.push(station.clone());

            match came_from.get(&current) {
                Some(&previous) => current = previous,
                None => break,
            }
        }

        stations.reverse();
        Ok(Path { stations, distance })
    }
}
