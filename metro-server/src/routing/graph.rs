//! Per-query network graph construction.

use std::collections::HashMap;

use crate::domain::{Section, Station, StationId};

use super::error::PathError;

/// One directed half of an undirected section edge.
#[derive(Debug, Clone, Copy)]
pub(super) struct Edge {
    pub(super) to: StationId,
    pub(super) weight: u32,
}

/// A transient weighted graph over the sections in scope for one query.
///
/// Vertices are the distinct stations of the supplied sections; every section
/// contributes one undirected edge. Parallel edges between the same station
/// pair are all kept, and the search simply never prefers the heavier one.
/// The graph is rebuilt for each query and never outlives it.
#[derive(Debug, Clone, Default)]
pub struct NetworkGraph {
    stations: HashMap<StationId, Station>,
    edges: HashMap<StationId, Vec<Edge>>,
}

impl NetworkGraph {
    /// Build a graph from the sections in scope for one query.
    ///
    /// Sections with a non-positive distance are rejected: Dijkstra's
    /// correctness argument needs strictly positive weights, so a malformed
    /// section is surfaced here instead of silently absorbed. Section
    /// construction already forbids such values, making this a backstop
    /// against unvalidated inputs.
    pub fn from_sections(sections: &[Section]) -> Result<Self, PathError> {
        let mut graph = Self::default();

        for section in sections {
            if section.distance() == 0 {
                return Err(PathError::InvalidWeight {
                    up: section.up().id(),
                    down: section.down().id(),
                });
            }

            graph.add_station(section.up());
            graph.add_station(section.down());
            graph.add_edge(section.up().id(), section.down().id(), section.distance());
            graph.add_edge(section.down().id(), section.up().id(), section.distance());
        }

        Ok(graph)
    }

    /// True if the station is a vertex of the graph.
    pub fn contains(&self, id: StationId) -> bool {
        self.stations.contains_key(&id)
    }

    /// Look up a vertex by id.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    /// Number of distinct stations.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub(super) fn neighbors(&self, id: StationId) -> &[Edge] {
        self.edges.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    fn add_station(&mut self, station: &Station) {
        self.stations
            .entry(station.id())
            .or_insert_with(|| station.clone());
    }

    fn add_edge(&mut self, from: StationId, to: StationId, weight: u32) {
        self.edges.entry(from).or_default().push(Edge { to, weight });
    }
}
