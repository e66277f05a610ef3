use serde::Deserialize;

/// Root of the bus network export
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct BusFeed {
    pub lines: Vec<FeedLine>,
}

/// One bus line with its stops in travel order
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FeedLine {
    pub code: String,
    pub name: String,
    pub stops: Vec<FeedStop>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FeedStop {
    pub code: String,
    pub name: String,
    pub municipality: String,
    pub lon: f64,
    pub lat: f64,
    /// Lines advertised at the stop, e.g. `"H6 - V3 - 59"`
    pub lines: String,
}
