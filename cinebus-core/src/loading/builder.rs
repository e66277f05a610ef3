use log::info;

use super::config::CityModelConfig;
use super::fusion::build_city_graph;
use super::streets::street_graph_from_csv;
use super::transit::transit_graph_from_json;
use crate::model::{CityModel, StreetGraph, TransitGraph};
use crate::{Error, Meters};

/// Creates a city model based on the provided configuration
///
/// # Errors
///
/// Returns an error if there are problems reading or processing data
pub fn create_city_model(config: &CityModelConfig) -> Result<CityModel, Error> {
    validate_config(config)?;

    info!(
        "Processing street data: {} / {}",
        config.street_nodes_path.display(),
        config.street_edges_path.display()
    );

    // Start street network processing in a separate thread
    let nodes_path = config.street_nodes_path.clone();
    let edges_path = config.street_edges_path.clone();
    let graph_handle = std::thread::spawn(move || street_graph_from_csv(&nodes_path, &edges_path));

    info!("Processing bus data: {}", config.transit_path.display());
    let transit = transit_graph_from_json(&config.transit_path, config.municipality.as_deref())?;

    let street_graph = graph_handle
        .join()
        .map_err(|_| Error::UnrecoverableError("street processing thread panicked"))??;

    validate_graph_transit_overlap(&street_graph, &transit, config.params.max_stop_snap_distance);

    let city_graph = build_city_graph(&street_graph, &transit, &config.params)?;

    let model = CityModel::new(street_graph, city_graph, config.params.clone());
    info!("{}", model.summary());
    Ok(model)
}

fn validate_config(config: &CityModelConfig) -> Result<(), Error> {
    for path in [
        &config.street_nodes_path,
        &config.street_edges_path,
        &config.transit_path,
    ] {
        if !path.exists() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Input file not found: {}", path.display()),
            )));
        }
    }
    config.params.validate()
}

#[allow(clippy::cast_precision_loss)]
fn validate_graph_transit_overlap(streets: &StreetGraph, transit: &TransitGraph, radius: Meters) {
    let total_stops = transit.stop_count();
    if total_stops == 0 {
        log::warn!("Bus network has no stops; routing will be walk-only");
        return;
    }

    let stops_off_streets = transit
        .stops()
        .filter(|(_, stop)| {
            streets
                .nearest_node(&stop.geometry)
                .is_none_or(|(_, distance)| distance > radius)
        })
        .count();

    let percentage = (stops_off_streets as f64 / total_stops as f64) * 100.0;
    if stops_off_streets > 0 {
        log::warn!(
            "{stops_off_streets} of {total_stops} bus stops ({percentage:.1}%) are more than \
        {radius:.0} m from the street network. These stops will be unreachable for routing. \
        Consider using a street extract that covers the whole bus network."
        );
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::loading::RoutingParams;

    #[test]
    fn missing_inputs_are_reported_before_loading() {
        let config = CityModelConfig {
            street_nodes_path: PathBuf::from("/nonexistent/nodes.csv"),
            street_edges_path: PathBuf::from("/nonexistent/edges.csv"),
            transit_path: PathBuf::from("/nonexistent/buses.json"),
            municipality: None,
            params: RoutingParams::default(),
        };

        let error = create_city_model(&config).unwrap_err();

        assert!(matches!(error, Error::IoError(ref e) if e.kind() == std::io::ErrorKind::NotFound));
        assert!(error.to_string().contains("nodes.csv"));
    }
}
