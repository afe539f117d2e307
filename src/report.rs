use std::fmt;

use crate::solver::solution::Solution;

/// Plain-text listing of a solution: a tour count header, then one line per
/// tour (`duration [depot id] > customer id > ...`), grouped by depot in
/// arena order. Pure formatting over the solver's read-only accessors.
pub fn describe(solution: &Solution) -> String {
    SolutionReport(solution).to_string()
}

struct SolutionReport<'a>(&'a Solution);

impl fmt::Display for SolutionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let solution = self.0;
        let problem = solution.problem();

        writeln!(f, "Number of tours: {}", solution.tour_count())?;

        for depot in problem.depot_ids() {
            for tour in solution.tours_from_depot(depot) {
                write!(
                    f,
                    "{:.2} [{}]",
                    tour.duration(problem),
                    problem.depot(depot).external_id()
                )?;

                for &customer in tour.customers() {
                    write!(f, " > {:>3}", problem.customer(customer).external_id())?;
                }

                writeln!(f)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        problem::{customer::CustomerIdx, depot::DepotIdx},
        solver::tour::Tour,
        test_utils,
    };

    #[test]
    fn test_describe_lists_tours_grouped_by_depot() {
        let problem = test_utils::create_problem(
            &[(3.0, 4.0, 1.0), (0.0, 2.0, 0.0)],
            &[(0.0, 0.0), (0.0, 4.0)],
            100.0,
        );

        let solution = crate::solver::solution::Solution::from_tours(
            Arc::clone(&problem),
            vec![
                Tour::singleton(DepotIdx::new(1), CustomerIdx::new(1)),
                Tour::singleton(DepotIdx::new(0), CustomerIdx::new(0)),
            ],
        );

        let report = describe(&solution);

        // Depot 0's tour prints first even though it was added second.
        assert_eq!(
            report,
            "Number of tours: 2\n\
             11.00 [101] >   1\n\
             4.00 [102] >   2\n"
        );
    }
}
