//! In-memory station and line registry.
//!
//! The administrative shell around the topology core: owns the station and
//! line records, allocates ids, resolves them to domain values, and hands the
//! resolved values to [`LineTopology`] and the routing engine. Everything
//! lives in process memory; persistence is deliberately absent.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{
    InvalidSection, LineId, LineTopology, Section, Station, StationId, TopologyError,
};
use crate::routing::{self, Path, PathError};

/// Registry errors: id resolution failures plus forwarded core validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// No station is registered under the id
    #[error("station {0} does not exist")]
    UnknownStation(StationId),

    /// No line is registered under the id
    #[error("line {0} does not exist")]
    UnknownLine(LineId),

    /// The station still appears in a line's section chain
    #[error("station {0} is still used by line {1}")]
    StationInUse(StationId, LineId),

    #[error(transparent)]
    Section(#[from] InvalidSection),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Path(#[from] PathError),
}

/// A line record: its naming plus its section chain.
#[derive(Debug, Clone)]
pub struct Line {
    id: LineId,
    name: String,
    color: String,
    topology: LineTopology,
}

impl Line {
    /// Returns the line id.
    pub fn id(&self) -> LineId {
        self.id
    }

    /// Returns the line name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the line color.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// The line's section chain.
    pub fn topology(&self) -> &LineTopology {
        &self.topology
    }
}

/// All stations and lines currently registered.
///
/// Callers are expected to serialize mutations (the web layer does so with a
/// single writer lock); each method validates before it mutates, so a failed
/// call leaves the registry unchanged.
#[derive(Debug, Default)]
pub struct Network {
    stations: BTreeMap<StationId, Station>,
    lines: BTreeMap<LineId, Line>,
    next_station_id: u64,
    next_line_id: u64,
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a station and return it.
    pub fn create_station(&mut self, name: impl Into<String>) -> Station {
        self.next_station_id += 1;
        let station = Station::new(StationId(self.next_station_id), name);
        debug!(id = %station.id(), name = station.name(), "station created");
        self.stations.insert(station.id(), station.clone());
        station
    }

    /// All registered stations, in id order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    /// Resolve a station id.
    pub fn station(&self, id: StationId) -> Result<&Station, NetworkError> {
        self.stations.get(&id).ok_or(NetworkError::UnknownStation(id))
    }

    /// Delete a station record.
    ///
    /// Rejected while any line's chain still references the station; remove
    /// the section first.
    pub fn remove_station(&mut self, id: StationId) -> Result<(), NetworkError> {
        self.station(id)?;
        for line in self.lines.values() {
            if line.topology.contains_station(id) {
                return Err(NetworkError::StationInUse(id, line.id));
            }
        }
        self.stations.remove(&id);
        Ok(())
    }

    /// Register a line with its first section.
    pub fn create_line(
        &mut self,
        name: impl Into<String>,
        color: impl Into<String>,
        up: StationId,
        down: StationId,
        distance: u32,
    ) -> Result<&Line, NetworkError> {
        let up = self.station(up)?.clone();
        let down = self.station(down)?.clone();

        self.next_line_id += 1;
        let id = LineId(self.next_line_id);

        let mut topology = LineTopology::new(id);
        topology.insert(Section::new(id, up, down, distance)?)?;

        let line = Line {
            id,
            name: name.into(),
            color: color.into(),
            topology,
        };
        debug!(id = %line.id, name = line.name.as_str(), "line created");

        Ok(self.lines.entry(id).or_insert(line))
    }

    /// All registered lines, in id order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    /// Resolve a line id.
    pub fn line(&self, id: LineId) -> Result<&Line, NetworkError> {
        self.lines.get(&id).ok_or(NetworkError::UnknownLine(id))
    }

    /// Rename or recolor a line.
    pub fn update_line(
        &mut self,
        id: LineId,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<(), NetworkError> {
        let line = self.line_mut(id)?;
        line.name = name.into();
        line.color = color.into();
        Ok(())
    }

    /// Delete a line and its section chain.
    pub fn remove_line(&mut self, id: LineId) -> Result<(), NetworkError> {
        self.line(id)?;
        self.lines.remove(&id);
        Ok(())
    }

    /// Add a section to a line's chain.
    pub fn add_section(
        &mut self,
        line_id: LineId,
        up: StationId,
        down: StationId,
        distance: u32,
    ) -> Result<(), NetworkError> {
        let up = self.station(up)?.clone();
        let down = self.station(down)?.clone();
        let section = Section::new(line_id, up, down, distance)?;

        let line = self.line_mut(line_id)?;
        line.topology.insert(section)?;
        Ok(())
    }

    /// Remove a station from a line's chain.
    pub fn remove_section(
        &mut self,
        line_id: LineId,
        station_id: StationId,
    ) -> Result<(), NetworkError> {
        let station = self.station(station_id)?.clone();

        let line = self.line_mut(line_id)?;
        line.topology.remove_by_station(&station)?;
        Ok(())
    }

    /// Find the shortest route between two stations across all lines.
    pub fn shortest_path(
        &self,
        source: StationId,
        target: StationId,
    ) -> Result<Path, NetworkError> {
        let source = self.station(source)?.clone();
        let target = self.station(target)?.clone();

        let sections: Vec<Section> = self
            .lines
            .values()
            .flat_map(|line| line.topology.sections().iter().cloned())
            .collect();

        Ok(routing::find_shortest_path(&source, &target, &sections)?)
    }

    fn line_mut(&mut self, id: LineId) -> Result<&mut Line, NetworkError> {
        self.lines.get_mut(&id).ok_or(NetworkError::UnknownLine(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A network with three stations and one line over the first two.
    fn seeded() -> (Network, Vec<StationId>, LineId) {
        let mut network = Network::new();
        let stations: Vec<StationId> = ["Gangnam", "Yeoksam", "Seolleung"]
            .iter()
            .map(|name| network.create_station(*name).id())
            .collect();
        let line = network
            .create_line("Line 2", "bg-green-600", stations[0], stations[1], 6)
            .unwrap()
            .id();
        (network, stations, line)
    }

    #[test]
    fn create_station_assigns_increasing_ids() {
        let mut network = Network::new();

        let first = network.create_station("Gangnam");
        let second = network.create_station("Yeoksam");

        assert!(second.id() > first.id());
        assert_eq!(network.stations().count(), 2);
    }

    #[test]
    fn create_line_registers_first_section() {
        let (network, stations, line) = seeded();

        let line = network.line(line).unwrap();
        let ordered: Vec<StationId> = line
            .topology()
            .ordered_stations()
            .map(Station::id)
            .collect();

        assert_eq!(ordered, [stations[0], stations[1]]);
        assert_eq!(line.name(), "Line 2");
        assert_eq!(line.color(), "bg-green-600");
    }

    #[test]
    fn create_line_rejects_unknown_station() {
        let mut network = Network::new();
        let up = network.create_station("Gangnam").id();

        let result = network.create_line("Line 2", "bg-green-600", up, StationId(99), 6);

        assert!(matches!(
            result,
            Err(NetworkError::UnknownStation(StationId(99)))
        ));
    }

    #[test]
    fn add_section_extends_the_line() {
        let (mut network, stations, line) = seeded();

        network
            .add_section(line, stations[1], stations[2], 10)
            .unwrap();

        let ordered: Vec<StationId> = network
            .line(line)
            .unwrap()
            .topology()
            .ordered_stations()
            .map(Station::id)
            .collect();
        assert_eq!(ordered, stations);
    }

    #[test]
    fn add_section_forwards_topology_errors() {
        let (mut network, stations, line) = seeded();

        let result = network.add_section(line, stations[0], stations[1], 3);

        assert_eq!(
            result,
            Err(NetworkError::Topology(TopologyError::SectionAlreadyExists))
        );
    }

    #[test]
    fn add_section_rejects_zero_distance() {
        let (mut network, stations, line) = seeded();

        let result = network.add_section(line, stations[1], stations[2], 0);

        assert!(matches!(result, Err(NetworkError::Section(_))));
    }

    #[test]
    fn remove_section_merges_through_the_registry() {
        let (mut network, stations, line) = seeded();
        network
            .add_section(line, stations[1], stations[2], 10)
            .unwrap();

        network.remove_section(line, stations[1]).unwrap();

        let ordered: Vec<StationId> = network
            .line(line)
            .unwrap()
            .topology()
            .ordered_stations()
            .map(Station::id)
            .collect();
        assert_eq!(ordered, [stations[0], stations[2]]);
    }

    #[test]
    fn remove_station_in_use_is_rejected() {
        let (mut network, stations, line) = seeded();

        let result = network.remove_station(stations[0]);

        assert_eq!(result, Err(NetworkError::StationInUse(stations[0], line)));
    }

    #[test]
    fn remove_unused_station() {
        let (mut network, stations, _) = seeded();

        network.remove_station(stations[2]).unwrap();

        assert!(matches!(
            network.station(stations[2]),
            Err(NetworkError::UnknownStation(_))
        ));
    }

    #[test]
    fn update_and_remove_line() {
        let (mut network, _, line) = seeded();

        network.update_line(line, "New Line 2", "bg-red-500").unwrap();
        assert_eq!(network.line(line).unwrap().name(), "New Line 2");

        network.remove_line(line).unwrap();
        assert!(matches!(
            network.line(line),
            Err(NetworkError::UnknownLine(_))
        ));
    }

    #[test]
    fn shortest_path_spans_lines() {
        let (mut network, stations, _) = seeded();
        // A second line continues from the first line's down terminus.
        network
            .create_line("Bundang", "bg-yellow-600", stations[1], stations[2], 3)
            .unwrap();

        let path = network.shortest_path(stations[0], stations[2]).unwrap();

        let ids: Vec<StationId> = path.stations.iter().map(Station::id).collect();
        assert_eq!(ids, stations);
        assert_eq!(path.distance, 9);
    }

    #[test]
    fn shortest_path_rejects_unknown_station() {
        let (network, stations, _) = seeded();

        let result = network.shortest_path(stations[0], StationId(99));

        assert!(matches!(
            result,
            Err(NetworkError::UnknownStation(StationId(99)))
        ));
    }

    #[test]
    fn shortest_path_forwards_path_errors() {
        let (mut network, stations, _) = seeded();
        // Registered but on no line, so it is absent from the graph.
        let isolated = network.create_station("Mangwon").id();

        let result = network.shortest_path(stations[0], isolated);

        assert_eq!(
            result,
            Err(NetworkError::Path(PathError::StationNotFound(isolated)))
        );
    }
}
