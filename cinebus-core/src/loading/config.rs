use std::path::PathBuf;

use serde::Deserialize;

use crate::{Error, Meters, Seconds};

/// Cost model shared by fusion and path finding
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoutingParams {
    /// Pedestrian speed in m/s
    pub walking_speed: f64,
    /// Bus speed over the road network in m/s
    pub bus_speed: f64,
    /// Wait estimate added to every stop connector, in seconds
    pub boarding_overhead: Seconds,
    /// Stops farther than this from any intersection are left out of the city graph
    pub max_stop_snap_distance: Meters,
    /// Query points farther than this from any intersection are outside the service area
    pub max_snap_distance: Meters,
}

impl Default for RoutingParams {
    fn default() -> Self {
        Self {
            walking_speed: 1.5,
            bus_speed: 4.5,
            boarding_overhead: 300.0,
            max_stop_snap_distance: 1_000.0,
            max_snap_distance: 10_000.0,
        }
    }
}

impl RoutingParams {
    pub fn validate(&self) -> Result<(), Error> {
        for (name, speed) in [
            ("walking_speed", self.walking_speed),
            ("bus_speed", self.bus_speed),
        ] {
            if !speed.is_finite() || speed <= 0.0 {
                return Err(Error::InvalidData(format!(
                    "{name} must be a positive number, got {speed}"
                )));
            }
        }
        if !self.boarding_overhead.is_finite() || self.boarding_overhead < 0.0 {
            return Err(Error::InvalidData(format!(
                "boarding_overhead must not be negative, got {}",
                self.boarding_overhead
            )));
        }
        for (name, distance) in [
            ("max_stop_snap_distance", self.max_stop_snap_distance),
            ("max_snap_distance", self.max_snap_distance),
        ] {
            if distance.is_nan() || distance <= 0.0 {
                return Err(Error::InvalidData(format!(
                    "{name} must be positive, got {distance}"
                )));
            }
        }
        Ok(())
    }

    /// Walking time over `distance` meters
    pub fn walking_time(&self, distance: Meters) -> Seconds {
        distance / self.walking_speed
    }

    /// Bus time over `distance` meters of road
    pub fn riding_time(&self, distance: Meters) -> Seconds {
        distance / self.bus_speed
    }
}

/// Input files and parameters for building a [`crate::CityModel`]
#[derive(Debug, Clone, Deserialize)]
pub struct CityModelConfig {
    /// CSV with `id,lon,lat` street nodes
    pub street_nodes_path: PathBuf,
    /// CSV with `source,target,length` street segments
    pub street_edges_path: PathBuf,
    /// Bus network JSON export
    pub transit_path: PathBuf,
    /// Keep only stops of this municipality
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default)]
    pub params: RoutingParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_make_the_bus_three_times_faster_than_walking() {
        let params = RoutingParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.walking_time(90.0), 60.0);
        assert_eq!(params.riding_time(270.0), 60.0);
    }

    #[test]
    fn rejects_non_positive_speeds() {
        let params = RoutingParams {
            bus_speed: 0.0,
            ..RoutingParams::default()
        };
        assert!(matches!(params.validate(), Err(Error::InvalidData(_))));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let params: RoutingParams = serde_json::from_str(r#"{ "walking_speed": 1.2 }"#).unwrap();
        assert_eq!(params.walking_speed, 1.2);
        assert_eq!(params.bus_speed, 4.5);
        assert_eq!(params.max_snap_distance, 10_000.0);
    }
}
