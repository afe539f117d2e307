use crate::{define_index_newtype, problem::location::Location};

define_index_newtype!(DepotIdx, Depot);

/// A depot is where servicemen start and end each working day. Every tour is
/// anchored at exactly one depot.
#[derive(Debug, Clone)]
pub struct Depot {
    external_id: u32,
    location: Location,
}

impl Depot {
    pub fn new(external_id: u32, location: Location) -> Self {
        Self {
            external_id,
            location,
        }
    }

    pub fn external_id(&self) -> u32 {
        self.external_id
    }

    pub fn location(&self) -> &Location {
        &self.location
    }
}
