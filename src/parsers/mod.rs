pub mod cordeau;
pub mod parser;
