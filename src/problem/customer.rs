use crate::{define_index_newtype, problem::location::Location};

define_index_newtype!(CustomerIdx, Customer);

/// A customer site to be visited exactly once, with the expected on-site
/// service duration in the same time units as travel.
#[derive(Debug, Clone)]
pub struct Customer {
    external_id: u32,
    service_duration: f64,
    location: Location,
}

impl Customer {
    pub fn new(external_id: u32, service_duration: f64, location: Location) -> Self {
        Self {
            external_id,
            service_duration,
            location,
        }
    }

    pub fn external_id(&self) -> u32 {
        self.external_id
    }

    pub fn service_duration(&self) -> f64 {
        self.service_duration
    }

    pub fn location(&self) -> &Location {
        &self.location
    }
}
