//! Geographic positions

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic position with an optional free-form info text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: f64,
    pub long: f64,
    pub info: Option<String>,
}

impl Geo {
    pub fn new(lat: f64, long: f64, info: Option<String>) -> Self {
        Self { lat, long, info }
    }

    /// Haversine distance to another position, in kilometers
    pub fn dist(&self, other: &Geo) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlong = (other.long - self.long).to_radians();

        let h = (dlat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (dlong / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
    }
}
