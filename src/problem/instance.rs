use fxhash::FxHashSet;

use crate::problem::{
    customer::{Customer, CustomerIdx},
    depot::{Depot, DepotIdx},
};

/// Maximum tour duration used when an instance does not specify one.
pub const DEFAULT_DAILY_CAP: f64 = 90.0;

/// The immutable problem instance: the customer and depot arenas plus the
/// daily duration cap. Tours and solutions refer to entities by index into
/// these arenas and never own them.
pub struct Problem {
    customers: Vec<Customer>,
    depots: Vec<Depot>,
    daily_cap: f64,
}

impl Problem {
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn depots(&self) -> &[Depot] {
        &self.depots
    }

    pub fn customer(&self, index: CustomerIdx) -> &Customer {
        &self.customers[index]
    }

    pub fn depot(&self, index: DepotIdx) -> &Depot {
        &self.depots[index]
    }

    pub fn customer_ids(&self) -> impl Iterator<Item = CustomerIdx> + use<> {
        (0..self.customers.len()).map(CustomerIdx::new)
    }

    pub fn depot_ids(&self) -> impl Iterator<Item = DepotIdx> + use<> {
        (0..self.depots.len()).map(DepotIdx::new)
    }

    pub fn ncustomers(&self) -> usize {
        self.customers.len()
    }

    pub fn ndepots(&self) -> usize {
        self.depots.len()
    }

    /// The daily maximal working duration of a serviceman, travel and service
    /// included.
    pub fn daily_cap(&self) -> f64 {
        self.daily_cap
    }
}

#[derive(Default)]
pub struct ProblemBuilder {
    customers: Vec<Customer>,
    depots: Vec<Depot>,
    daily_cap: Option<f64>,
}

impl ProblemBuilder {
    pub fn set_customers(&mut self, customers: Vec<Customer>) -> &mut Self {
        self.customers = customers;
        self
    }

    pub fn set_depots(&mut self, depots: Vec<Depot>) -> &mut Self {
        self.depots = depots;
        self
    }

    pub fn set_daily_cap(&mut self, daily_cap: f64) -> &mut Self {
        self.daily_cap = Some(daily_cap);
        self
    }

    /// Panics when the instance is structurally unusable: no depot to anchor
    /// tours at, or colliding external ids within the customer or depot set.
    pub fn build(self) -> Problem {
        if self.depots.is_empty() {
            panic!("Problem requires at least one depot");
        }

        let customer_ids: FxHashSet<u32> =
            self.customers.iter().map(Customer::external_id).collect();
        if customer_ids.len() != self.customers.len() {
            panic!("Duplicate customer external id");
        }

        let depot_ids: FxHashSet<u32> = self.depots.iter().map(Depot::external_id).collect();
        if depot_ids.len() != self.depots.len() {
            panic!("Duplicate depot external id");
        }

        Problem {
            customers: self.customers,
            depots: self.depots,
            daily_cap: self.daily_cap.unwrap_or(DEFAULT_DAILY_CAP),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::location::Location;

    #[test]
    fn test_build_defaults_daily_cap() {
        let mut builder = ProblemBuilder::default();
        builder.set_depots(vec![Depot::new(1, Location::from_cartesian(0.0, 0.0))]);
        let problem = builder.build();

        assert_eq!(problem.daily_cap(), DEFAULT_DAILY_CAP);
        assert_eq!(problem.depots().len(), 1);
        assert!(problem.customers().is_empty());
    }

    #[test]
    #[should_panic(expected = "Duplicate customer external id")]
    fn test_build_rejects_duplicate_customer_ids() {
        let mut builder = ProblemBuilder::default();
        builder.set_depots(vec![Depot::new(1, Location::from_cartesian(0.0, 0.0))]);
        builder.set_customers(vec![
            Customer::new(7, 0.0, Location::from_cartesian(1.0, 0.0)),
            Customer::new(7, 0.0, Location::from_cartesian(2.0, 0.0)),
        ]);
        builder.build();
    }

    #[test]
    #[should_panic(expected = "at least one depot")]
    fn test_build_rejects_missing_depots() {
        ProblemBuilder::default().build();
    }
}
