use smallvec::SmallVec;
use thiserror::Error;

use crate::problem::{
    customer::CustomerIdx,
    depot::DepotIdx,
    instance::Problem,
    location::detour_cost,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    #[error("cannot merge tours anchored at different depots ({left} and {right})")]
    DepotMismatch { left: DepotIdx, right: DepotIdx },
}

/// One round trip from a depot through an ordered sequence of customers and
/// back. The depot never changes after construction; the customer sequence
/// grows by cheapest insertion or by merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    depot: DepotIdx,
    customers: SmallVec<[CustomerIdx; 8]>,
}

impl Tour {
    /// A tour that doesn't go anywhere yet.
    pub fn empty(depot: DepotIdx) -> Self {
        Self {
            depot,
            customers: SmallVec::new(),
        }
    }

    /// A tour visiting a single customer.
    pub fn singleton(depot: DepotIdx, customer: CustomerIdx) -> Self {
        let mut customers = SmallVec::new();
        customers.push(customer);
        Self { depot, customers }
    }

    /// A tour visiting the given customers in the given order.
    pub fn from_sequence<I>(depot: DepotIdx, customers: I) -> Self
    where
        I: IntoIterator<Item = CustomerIdx>,
    {
        Self {
            depot,
            customers: customers.into_iter().collect(),
        }
    }

    /// Merges two tours from the same depot into a new tour visiting the left
    /// operand's customers first, then the right operand's, without
    /// reordering. The direction matters to the savings evaluation.
    pub fn merge(&self, right: &Tour) -> Result<Tour, MergeError> {
        if self.depot != right.depot {
            return Err(MergeError::DepotMismatch {
                left: self.depot,
                right: right.depot,
            });
        }

        let mut customers = self.customers.clone();
        customers.extend_from_slice(&right.customers);

        Ok(Tour {
            depot: self.depot,
            customers,
        })
    }

    pub fn depot(&self) -> DepotIdx {
        self.depot
    }

    pub fn customers(&self) -> &[CustomerIdx] {
        &self.customers
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn first(&self) -> Option<CustomerIdx> {
        self.customers.first().copied()
    }

    pub fn last(&self) -> Option<CustomerIdx> {
        self.customers.last().copied()
    }

    /// Total tour duration: both depot legs, all inter-customer legs and all
    /// service durations. An empty tour takes no time at all. Recomputed on
    /// every call; tours are short and evaluated infrequently.
    pub fn duration(&self, problem: &Problem) -> f64 {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return 0.0;
        };

        let depot = problem.depot(self.depot).location();

        let mut duration = depot.travel_time_to(problem.customer(first).location())
            + depot.travel_time_to(problem.customer(last).location());

        for leg in self.customers.windows(2) {
            duration += problem
                .customer(leg[0])
                .location()
                .travel_time_to(problem.customer(leg[1]).location());
        }

        for &customer in &self.customers {
            duration += problem.customer(customer).service_duration();
        }

        duration
    }

    /// Inserts a customer at the position where the added travel time is
    /// smallest, the depot acting as the neighbour at both ends. Greedy and
    /// non-backtracking; sub-optimal but fast, which is all the initial
    /// construction needs. Ties go to the earliest position.
    pub fn add_customer(&mut self, problem: &Problem, customer: CustomerIdx) {
        if self.customers.is_empty() {
            self.customers.push(customer);
            return;
        }

        let depot = problem.depot(self.depot).location();
        let inserted = problem.customer(customer).location();

        let mut best_slot = 0;
        let mut best_cost = f64::INFINITY;

        for slot in 0..=self.customers.len() {
            let before = match slot.checked_sub(1) {
                Some(i) => problem.customer(self.customers[i]).location(),
                None => depot,
            };
            let after = match self.customers.get(slot) {
                Some(&c) => problem.customer(c).location(),
                None => depot,
            };

            let cost = detour_cost(before, inserted, after);
            if cost < best_cost {
                best_cost = cost;
                best_slot = slot;
            }
        }

        self.customers.insert(best_slot, customer);
    }
}
