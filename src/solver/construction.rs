use std::sync::Arc;

use tracing::{Level, debug, instrument};

use crate::{
    problem::{customer::CustomerIdx, depot::DepotIdx, instance::Problem},
    solver::{solution::Solution, tour::Tour},
};

/// Maps every customer to exactly one depot and turns the mapping into a
/// first feasible-coverage solution.
pub trait Assigner {
    fn problem(&self) -> &Arc<Problem>;

    fn assignment(&self, customer: CustomerIdx) -> DepotIdx;

    /// Emits one singleton tour per customer at its assigned depot. The
    /// savings merge needs multiple tours per depot to work with, so nothing
    /// is grouped here.
    fn make_solution(&self) -> Solution {
        let problem = Arc::clone(self.problem());
        let mut solution = Solution::empty(Arc::clone(&problem));

        for customer in problem.customer_ids() {
            solution.add_tour(Tour::singleton(self.assignment(customer), customer));
        }

        solution
    }
}

/// Assigns each customer to its geometrically nearest depot, ties going to
/// the depot that comes first in the arena. The daily cap plays no part at
/// assignment time; capacity is dealt with downstream by the savings merge
/// and local search.
pub struct NearestDepotAssigner {
    problem: Arc<Problem>,
    assignment: Vec<DepotIdx>,
}

impl NearestDepotAssigner {
    #[instrument(skip_all, level = Level::DEBUG)]
    pub fn new(problem: Arc<Problem>) -> Self {
        let assignment = problem
            .customer_ids()
            .map(|customer| {
                let location = problem.customer(customer).location();

                let mut nearest = DepotIdx::new(0);
                let mut best = f64::INFINITY;

                for depot in problem.depot_ids() {
                    let travel_time = problem.depot(depot).location().travel_time_to(location);
                    if travel_time < best {
                        best = travel_time;
                        nearest = depot;
                    }
                }

                nearest
            })
            .collect();

        debug!(
            customers = problem.ncustomers(),
            depots = problem.ndepots(),
            "assigned customers to nearest depots"
        );

        Self {
            problem,
            assignment,
        }
    }
}

impl Assigner for NearestDepotAssigner {
    fn problem(&self) -> &Arc<Problem> {
        &self.problem
    }

    fn assignment(&self, customer: CustomerIdx) -> DepotIdx {
        self.assignment[customer.get()]
    }
}
