use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "Point ({lon:.6}, {lat:.6}) is {distance:.0} m from the nearest street, outside the service area"
    )]
    OutOfServiceArea { lon: f64, lat: f64, distance: f64 },
    #[error("No path found between the given points")]
    NoPathFound,
    #[error("Street network has no nodes")]
    EmptyStreetNetwork,
    #[error("Invalid node index")]
    InvalidNodeIndex,
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error("Unrecoverable error: {0}")]
    UnrecoverableError(&'static str),
}

/// Reason a transit stop was left out of the city graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FusionError {
    #[error("stop {code} has no serving lines")]
    NoLines { code: String },
    #[error("stop {code} is {distance:.0} m from the nearest intersection (max {max_distance:.0} m)")]
    TooFarFromStreets {
        code: String,
        distance: f64,
        max_distance: f64,
    },
    #[error("stop {code} has no street node nearby")]
    NoStreetNode { code: String },
}

impl FusionError {
    pub fn stop_code(&self) -> &str {
        match self {
            Self::NoLines { code }
            | Self::TooFarFromStreets { code, .. }
            | Self::NoStreetNode { code } => code,
        }
    }
}

/// Line continuity problems found while segmenting a path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItineraryError {
    #[error("path position {0} is not a node of the city graph")]
    UnknownNode(usize),
    #[error("no edge between path positions {0} and {1}")]
    MissingEdge(usize, usize),
    #[error("stop-to-stop hop at path position {0} is not a transit edge")]
    NotTransitHop(usize),
    #[error("transit hop at path position {0} has no lines")]
    EmptyHopLines(usize),
}
