use std::sync::Arc;

use crate::problem::{
    customer::Customer,
    depot::Depot,
    instance::{Problem, ProblemBuilder},
    location::Location,
};

/// Builds a problem from bare coordinates: customers as `(x, y, service)`
/// triples and depots as `(x, y)` pairs. External ids are `1..` for customers
/// and `101..` for depots, so arena index 0 is never confused with an id.
pub fn create_problem(
    customers: &[(f64, f64, f64)],
    depots: &[(f64, f64)],
    daily_cap: f64,
) -> Arc<Problem> {
    let customers = customers
        .iter()
        .enumerate()
        .map(|(i, &(x, y, service_duration))| {
            Customer::new(
                (i + 1) as u32,
                service_duration,
                Location::from_cartesian(x, y),
            )
        })
        .collect();

    let depots = depots
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| Depot::new((i + 101) as u32, Location::from_cartesian(x, y)))
        .collect();

    let mut builder = ProblemBuilder::default();
    builder.set_customers(customers);
    builder.set_depots(depots);
    builder.set_daily_cap(daily_cap);

    Arc::new(builder.build())
}
