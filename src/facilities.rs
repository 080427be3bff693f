//! Nearby medical facility lookup.
//!
//! Pure distance computation over a built-in facility directory, used by the
//! results step when the submitter granted location consent.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityKind {
    Hospital,
    UrgentCare,
    Clinic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub name: String,
    pub kind: FacilityKind,
    pub latitude: f64,
    pub longitude: f64,
    /// Typical wait in minutes, shown alongside distance.
    pub wait_minutes: u32,
}

/// A facility within the search radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityMatch {
    pub facility: Facility,
    /// Distance from the submitter, rounded to 0.1 mi.
    pub distance_miles: f64,
}

/// Earth radius in miles, for the haversine formula.
const EARTH_RADIUS_MILES: f64 = 3958.8;

/// At most this many matches are returned per lookup.
const MAX_MATCHES: usize = 5;

fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1) = (lat1.to_radians(), lon1.to_radians());
    let (lat2, lon2) = (lat2.to_radians(), lon2.to_radians());

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Static directory of known facilities.
pub struct FacilityDirectory {
    facilities: Vec<Facility>,
}

impl FacilityDirectory {
    pub fn new(facilities: Vec<Facility>) -> Self {
        Self { facilities }
    }

    /// Facilities within `radius_miles` of the given point, closest first,
    /// capped at five results.
    pub fn nearby(&self, latitude: f64, longitude: f64, radius_miles: f64) -> Vec<FacilityMatch> {
        let mut matches: Vec<FacilityMatch> = self
            .facilities
            .iter()
            .filter_map(|facility| {
                let distance =
                    haversine_miles(latitude, longitude, facility.latitude, facility.longitude);
                (distance <= radius_miles).then(|| FacilityMatch {
                    facility: facility.clone(),
                    distance_miles: (distance * 10.0).round() / 10.0,
                })
            })
            .collect();

        matches.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
        matches.truncate(MAX_MATCHES);
        matches
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }
}

impl Default for FacilityDirectory {
    fn default() -> Self {
        let facility = |name: &str, kind, latitude, longitude, wait_minutes| Facility {
            name: name.to_string(),
            kind,
            latitude,
            longitude,
            wait_minutes,
        };

        Self::new(vec![
            facility("City General Hospital", FacilityKind::Hospital, 40.7128, -74.0060, 45),
            facility("Downtown Medical Center", FacilityKind::Hospital, 40.7589, -73.9851, 30),
            facility("Community Urgent Care", FacilityKind::UrgentCare, 40.7505, -73.9934, 15),
            facility("Westside Clinic", FacilityKind::Clinic, 40.7829, -73.9654, 10),
            facility("Emergency Trauma Center", FacilityKind::Hospital, 40.6413, -73.7781, 60),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Midtown Manhattan, within a few miles of most default facilities
    const LAT: f64 = 40.7549;
    const LON: f64 = -73.9840;

    #[test]
    fn test_nearby_sorted_by_distance() {
        let matches = FacilityDirectory::default().nearby(LAT, LON, 10.0);

        assert!(!matches.is_empty());
        for pair in matches.windows(2) {
            assert!(pair[0].distance_miles <= pair[1].distance_miles);
        }
        assert_eq!(matches[0].facility.name, "Downtown Medical Center");
    }

    #[test]
    fn test_radius_excludes_distant_facilities() {
        let matches = FacilityDirectory::default().nearby(LAT, LON, 3.0);

        // The trauma center out by the airport is well past 3 miles
        assert!(matches
            .iter()
            .all(|m| m.facility.name != "Emergency Trauma Center"));
        assert!(matches.iter().all(|m| m.distance_miles <= 3.0));
    }

    #[test]
    fn test_result_cap() {
        let base = Facility {
            name: "Clinic".to_string(),
            kind: FacilityKind::Clinic,
            latitude: LAT,
            longitude: LON,
            wait_minutes: 5,
        };
        let many = (0..8)
            .map(|i| Facility {
                name: format!("Clinic {i}"),
                ..base.clone()
            })
            .collect();

        let matches = FacilityDirectory::new(many).nearby(LAT, LON, 10.0);
        assert_eq!(matches.len(), 5);
    }

    #[test]
    fn test_zero_distance_at_same_point() {
        let matches = FacilityDirectory::default().nearby(40.7128, -74.0060, 1.0);
        assert_eq!(matches[0].facility.name, "City General Hospital");
        assert_eq!(matches[0].distance_miles, 0.0);
    }
}
