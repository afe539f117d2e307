use std::sync::Arc;

use tracing::{Level, debug, instrument};

use crate::{
    problem::{depot::DepotIdx, instance::Problem, location::detour_cost},
    solver::{solution::Solution, tour::Tour},
};

/// The Clarke and Wright savings algorithm. Within each depot, repeatedly
/// merges the pair of tours whose direct tail-to-head connection saves the
/// most travel time, as long as the merged tour stays under the daily cap,
/// until no beneficial merge remains. Primarily used to turn the assigner's
/// singleton tours into a sensible first guess for local search.
#[instrument(skip_all, level = Level::DEBUG)]
pub fn merge_savings(solution: &Solution) -> Solution {
    let problem = solution.problem();
    let mut merged: Vec<Tour> = Vec::new();

    for depot in problem.depot_ids() {
        let mut tours: Vec<Tour> = solution.tours_from_depot(depot).cloned().collect();

        while let Some((left, right, reduction)) = best_merge(problem, depot, &tours) {
            debug!(%depot, left, right, reduction, "merging tours");

            let merged_tour = tours[left]
                .merge(&tours[right])
                .expect("savings only pairs tours anchored at the same depot");

            // Remove the higher index first so the lower one stays in place.
            let (high, low) = if left > right {
                (left, right)
            } else {
                (right, left)
            };
            tours.remove(high);
            tours.remove(low);
            tours.push(merged_tour);
        }

        merged.append(&mut tours);
    }

    Solution::from_tours(Arc::clone(solution.problem()), merged)
}

/// Finds the ordered pair of distinct tours whose merge yields the greatest
/// travel-time reduction without breaking the daily cap. The reduction is
/// directional (it connects the left tour's last customer to the right tour's
/// first), so both orderings of every pair are candidates. Ties go to the
/// pair found first.
fn best_merge(
    problem: &Problem,
    depot: DepotIdx,
    tours: &[Tour],
) -> Option<(usize, usize, f64)> {
    let depot_location = problem.depot(depot).location();
    let mut best: Option<(usize, usize, f64)> = None;

    for (left, t1) in tours.iter().enumerate() {
        for (right, t2) in tours.iter().enumerate() {
            if left == right {
                continue;
            }

            let (Some(tail), Some(head)) = (t1.last(), t2.first()) else {
                continue;
            };

            let reduction = detour_cost(
                problem.customer(tail).location(),
                depot_location,
                problem.customer(head).location(),
            );

            if reduction < 0.0 {
                continue;
            }

            if t1.duration(problem) + t2.duration(problem) - reduction > problem.daily_cap() {
                continue;
            }

            if best.is_none_or(|(_, _, best_reduction)| reduction > best_reduction) {
                best = Some((left, right, reduction));
            }
        }
    }

    best
}
