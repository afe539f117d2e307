use std::sync::Arc;

use fxhash::FxHashSet;

use crate::{
    define_index_newtype,
    problem::{customer::CustomerIdx, depot::DepotIdx, instance::Problem},
    solver::tour::Tour,
};

define_index_newtype!(TourIdx, Tour);

/// A proposed solution: a collection of tours over one problem instance.
/// Partial and infeasible solutions are representable on purpose; validity is
/// a diagnostic query, not a construction-time guarantee.
#[derive(Clone)]
pub struct Solution {
    problem: Arc<Problem>,
    tours: Vec<Tour>,
}

impl Solution {
    /// A non-solution with no tours.
    pub fn empty(problem: Arc<Problem>) -> Self {
        Self {
            problem,
            tours: Vec::new(),
        }
    }

    pub fn from_tours(problem: Arc<Problem>, tours: Vec<Tour>) -> Self {
        Self { problem, tours }
    }

    pub fn problem(&self) -> &Arc<Problem> {
        &self.problem
    }

    pub fn add_tour(&mut self, tour: Tour) {
        self.tours.push(tour);
    }

    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    pub fn tour(&self, index: TourIdx) -> &Tour {
        &self.tours[index]
    }

    pub fn tour_count(&self) -> usize {
        self.tours.len()
    }

    /// All tours anchored at the given depot, in insertion order.
    pub fn tours_from_depot(&self, depot: DepotIdx) -> impl Iterator<Item = &Tour> {
        self.tours.iter().filter(move |tour| tour.depot() == depot)
    }

    /// Checks that every customer is visited exactly once and that no tour
    /// exceeds the daily cap. Never fails; an invalid solution is still a
    /// legal object to inspect.
    pub fn is_valid(&self) -> bool {
        let mut visited: FxHashSet<CustomerIdx> = FxHashSet::default();

        for tour in &self.tours {
            if tour.duration(&self.problem) > self.problem.daily_cap() {
                return false;
            }

            for &customer in tour.customers() {
                if !visited.insert(customer) {
                    return false;
                }
            }
        }

        visited.len() == self.problem.ncustomers()
    }
}
