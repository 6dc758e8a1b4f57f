//! Metro network server.
//!
//! Models a rail network of named lines, each an ordered chain of
//! station-to-station sections, and answers shortest-path queries across
//! the union of all lines.

pub mod domain;
pub mod network;
pub mod routing;
pub mod web;
