pub mod customer;
pub mod depot;
pub mod instance;
pub mod location;
