pub mod construction;
pub mod interchange;
pub mod savings;
pub mod solution;
pub mod tour;
