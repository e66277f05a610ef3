//! Bus network from the metropolitan open-data JSON export

mod processor;
mod raw_types;

pub use processor::{parse_line_list, transit_graph_from_feed, transit_graph_from_json};
pub use raw_types::{BusFeed, FeedLine, FeedStop};
