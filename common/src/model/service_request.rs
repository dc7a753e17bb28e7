use crate::model::status::RequestStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A mechanic service ticket tied to one customer and one vehicle.
///
/// Field names on the wire follow the backend's document shape (`_id`,
/// `userId`, `vehicleId`, camelCase timestamps). Customer and vehicle are
/// read-only references populated by the backend; either may be missing when
/// the referenced record was deleted, which is why they are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "userId", default)]
    pub customer: Option<Customer>,
    #[serde(rename = "vehicleId", default)]
    pub vehicle: Option<Vehicle>,
    #[serde(rename = "serviceType", default)]
    pub service_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: Option<Location>,
    pub status: RequestStatus,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "mobileNumber", default)]
    pub mobile_number: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: String,
    #[serde(rename = "licensePlate", default)]
    pub license_plate: String,
}

/// GeoJSON-like point plus the human readable address.
///
/// Only `address` is displayed; `coordinates` (`[lng, lat]`) are carried through
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "type", default = "point")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Vec<f64>,
    #[serde(default)]
    pub address: String,
}

fn point() -> String {
    "Point".to_string()
}

impl ServiceRequest {
    pub fn customer_name(&self) -> &str {
        self.customer.as_ref().map_or("", |c| c.name.as_str())
    }

    pub fn license_plate(&self) -> &str {
        self.vehicle.as_ref().map_or("", |v| v.license_plate.as_str())
    }

    pub fn address(&self) -> &str {
        self.location.as_ref().map_or("", |l| l.address.as_str())
    }

    /// `make model (plate)`, with empty parts left empty.
    pub fn vehicle_descriptor(&self) -> String {
        let (make, model, plate) = match &self.vehicle {
            Some(v) => (v.make.as_str(), v.model.as_str(), v.license_plate.as_str()),
            None => ("", "", ""),
        };
        format!("{} {} ({})", make, model, plate)
    }
}
