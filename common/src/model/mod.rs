pub mod service_request;
pub mod stats;
pub mod status;

pub use service_request::{Customer, Location, ServiceRequest, Vehicle};
pub use stats::{DerivedStats, MechanicProfile, StatsSource};
pub use status::RequestStatus;
