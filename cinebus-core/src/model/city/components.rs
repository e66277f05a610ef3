//! Unified graph components - tagged nodes and edges of both networks

use geo::Point;

use crate::model::transit::LineSet;
use crate::{Meters, Seconds};

/// Node of the unified city graph
#[derive(Debug, Clone, PartialEq)]
pub enum CityNode {
    /// Street intersection copied from the street network
    Intersection { osm_id: i64, geometry: Point<f64> },
    /// Bus stop copied from the transit network
    Stop(StopNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StopNode {
    pub code: String,
    pub name: String,
    pub geometry: Point<f64>,
    /// Never empty
    pub lines: LineSet,
}

impl CityNode {
    pub fn geometry(&self) -> Point<f64> {
        match self {
            Self::Intersection { geometry, .. } => *geometry,
            Self::Stop(stop) => stop.geometry,
        }
    }

    pub fn is_stop(&self) -> bool {
        matches!(self, Self::Stop(_))
    }

    pub fn as_stop(&self) -> Option<&StopNode> {
        match self {
            Self::Stop(stop) => Some(stop),
            Self::Intersection { .. } => None,
        }
    }
}

/// Edge of the unified city graph, weighted by traversal time
#[derive(Debug, Clone, PartialEq)]
pub struct CityEdge {
    /// Traversal time in seconds, never negative
    pub time: Seconds,
    pub kind: EdgeKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EdgeKind {
    /// Walkable street segment
    Street { length: Meters },
    /// Bus hop between consecutive stops; `distance` is the road distance used for its time
    Transit { lines: LineSet, distance: Meters },
    /// Synthetic link between a stop and its nearest intersection
    Connector { distance: Meters },
}

impl CityEdge {
    pub fn street(length: Meters, time: Seconds) -> Self {
        Self {
            time,
            kind: EdgeKind::Street { length },
        }
    }

    pub fn transit(lines: LineSet, distance: Meters, time: Seconds) -> Self {
        Self {
            time,
            kind: EdgeKind::Transit { lines, distance },
        }
    }

    pub fn connector(distance: Meters, time: Seconds) -> Self {
        Self {
            time,
            kind: EdgeKind::Connector { distance },
        }
    }

    /// Lines of a transit hop, `None` for walking edges
    pub fn lines(&self) -> Option<&LineSet> {
        match &self.kind {
            EdgeKind::Transit { lines, .. } => Some(lines),
            EdgeKind::Street { .. } | EdgeKind::Connector { .. } => None,
        }
    }

    pub fn is_connector(&self) -> bool {
        matches!(self.kind, EdgeKind::Connector { .. })
    }

    /// Folds a parallel edge into this one: the faster time wins and transit lines are unioned.
    pub(crate) fn merge(&mut self, other: CityEdge) {
        let merged_lines = match (&self.kind, &other.kind) {
            (EdgeKind::Transit { lines: ours, .. }, EdgeKind::Transit { lines: theirs, .. }) => {
                Some(ours.union(theirs).cloned().collect::<LineSet>())
            }
            _ => None,
        };
        if other.time < self.time {
            *self = other;
        }
        if let (Some(merged), EdgeKind::Transit { lines, .. }) = (merged_lines, &mut self.kind) {
            *lines = merged;
        }
    }
}
