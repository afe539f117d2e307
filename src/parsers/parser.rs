use std::path::Path;

use crate::problem::instance::Problem;

pub trait DatasetParser {
    fn parse<P: AsRef<Path>>(&self, file: P) -> Result<Problem, anyhow::Error>;
}
