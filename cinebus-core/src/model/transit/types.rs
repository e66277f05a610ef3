use std::collections::BTreeSet;

use geo::Point;

use crate::LineId;

/// Ordered set of line identifiers. Ordering makes "any member" picks stable.
pub type LineSet = BTreeSet<LineId>;

/// Bus stop as supplied by the transit feed
#[derive(Debug, Clone, PartialEq)]
pub struct TransitStop {
    /// Feed code of the stop
    pub code: String,
    pub name: String,
    pub geometry: Point<f64>,
    /// Lines serving this stop
    pub lines: LineSet,
}

/// Hop between two consecutive stops
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitHop {
    /// Lines running over this hop
    pub lines: LineSet,
}
