use parking_lot::Mutex;
use serde::Serialize;

use crate::solver::{
    solution::{Solution, TourIdx},
    tour::Tour,
};

/// One candidate perturbation of a solution in the (1,1)-interchange
/// neighbourhood: relocating a single customer from one tour into the other,
/// or swapping one customer of each. The record only describes the move;
/// evaluating its cost delta and applying it are the optimization loop's
/// business, never the enumerator's.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Relocate the customer at `position` of `left_tour` into `right_tour`.
    RelocateLeftToRight {
        left_tour: TourIdx,
        right_tour: TourIdx,
        position: usize,
    },
    /// Relocate the customer at `position` of `right_tour` into `left_tour`.
    RelocateRightToLeft {
        left_tour: TourIdx,
        right_tour: TourIdx,
        position: usize,
    },
    /// Exchange the customers at the two positions between the two tours.
    Swap {
        left_tour: TourIdx,
        right_tour: TourIdx,
        left_position: usize,
        right_position: usize,
    },
}

impl Move {
    pub fn operator_name(&self) -> &'static str {
        match self {
            Move::RelocateLeftToRight { .. } => "Relocate-Left-To-Right",
            Move::RelocateRightToLeft { .. } => "Relocate-Right-To-Left",
            Move::Swap { .. } => "Swap",
        }
    }

    pub fn left_tour(&self) -> TourIdx {
        match self {
            Move::RelocateLeftToRight { left_tour, .. } => *left_tour,
            Move::RelocateRightToLeft { left_tour, .. } => *left_tour,
            Move::Swap { left_tour, .. } => *left_tour,
        }
    }

    pub fn right_tour(&self) -> TourIdx {
        match self {
            Move::RelocateLeftToRight { right_tour, .. } => *right_tour,
            Move::RelocateRightToLeft { right_tour, .. } => *right_tour,
            Move::Swap { right_tour, .. } => *right_tour,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    RelocateLeftToRight,
    RelocateRightToLeft,
    Swap,
}

/// Enumeration cursor: the next move to hand out. The invariant maintained by
/// `normalize` is that a stored cursor always points at an emittable move;
/// exhaustion is represented by dropping the cursor entirely.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    left_tour: usize,
    right_tour: usize,
    operation: Operation,
    left_position: usize,
    right_position: usize,
}

impl Cursor {
    fn initial() -> Self {
        Self {
            left_tour: 0,
            right_tour: 1,
            operation: Operation::RelocateLeftToRight,
            left_position: 0,
            right_position: 0,
        }
    }

    fn to_move(self) -> Move {
        let left_tour = TourIdx::new(self.left_tour);
        let right_tour = TourIdx::new(self.right_tour);

        match self.operation {
            Operation::RelocateLeftToRight => Move::RelocateLeftToRight {
                left_tour,
                right_tour,
                position: self.left_position,
            },
            Operation::RelocateRightToLeft => Move::RelocateRightToLeft {
                left_tour,
                right_tour,
                position: self.right_position,
            },
            Operation::Swap => Move::Swap {
                left_tour,
                right_tour,
                left_position: self.left_position,
                right_position: self.right_position,
            },
        }
    }
}

/// Lazily enumerates every relocate-and-swap move between every ordered pair
/// of tours of one solution, in a fixed deterministic order, without ever
/// materializing the full move list.
///
/// The cursor is the one piece of shared mutable state, guarded by a mutex
/// scoped to this cycle: concurrent pollers each receive a distinct move,
/// collectively covering the neighbourhood exactly once. The critical section
/// is the read-advance-return of the cursor only, never move evaluation. The
/// shared borrow of the solution freezes the tour set for the cycle's
/// lifetime.
pub struct InterchangeCycle<'a> {
    solution: &'a Solution,
    sizes: Vec<usize>,
    cursor: Mutex<Option<Cursor>>,
}

impl<'a> InterchangeCycle<'a> {
    pub fn new(solution: &'a Solution) -> Self {
        let sizes: Vec<usize> = solution.tours().iter().map(Tour::len).collect();
        let cursor = normalize(Cursor::initial(), &sizes);

        Self {
            solution,
            sizes,
            cursor: Mutex::new(cursor),
        }
    }

    pub fn solution(&self) -> &Solution {
        self.solution
    }

    /// Hands out the next unclaimed move, or `None` forever once the
    /// neighbourhood is exhausted. Safe to call from any number of threads.
    pub fn next_move(&self) -> Option<Move> {
        let mut guard = self.cursor.lock();
        let current = (*guard)?;
        *guard = advance(current, &self.sizes);

        Some(current.to_move())
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor.lock().is_none()
    }
}

/// Steps the cursor past the move it points at.
fn advance(mut cursor: Cursor, sizes: &[usize]) -> Option<Cursor> {
    match cursor.operation {
        Operation::RelocateLeftToRight => cursor.left_position += 1,
        Operation::RelocateRightToLeft => cursor.right_position += 1,
        // The right position is the inner swap loop; rollover is normalize's
        // job.
        Operation::Swap => cursor.right_position += 1,
    }

    normalize(cursor, sizes)
}

/// Walks the cursor forward to the next emittable move, rolling positions
/// into the next operation, operations into the next tour pair, and pairs
/// into the next left tour, skipping tours with no customers. Returns `None`
/// when the pair space is exhausted, including the degenerate solutions with
/// fewer than two tours.
fn normalize(mut cursor: Cursor, sizes: &[usize]) -> Option<Cursor> {
    let tour_count = sizes.len();

    loop {
        if cursor.right_tour >= tour_count {
            cursor.left_tour += 1;
            cursor.right_tour = cursor.left_tour + 1;
            cursor.operation = Operation::RelocateLeftToRight;
            cursor.left_position = 0;
            cursor.right_position = 0;
        }

        if cursor.left_tour + 1 >= tour_count {
            return None;
        }

        let left_len = sizes[cursor.left_tour];
        let right_len = sizes[cursor.right_tour];

        match cursor.operation {
            Operation::RelocateLeftToRight => {
                if cursor.left_position < left_len {
                    return Some(cursor);
                }
                cursor.operation = Operation::RelocateRightToLeft;
                cursor.right_position = 0;
            }
            Operation::RelocateRightToLeft => {
                if cursor.right_position < right_len {
                    return Some(cursor);
                }
                cursor.operation = Operation::Swap;
                cursor.left_position = 0;
                cursor.right_position = 0;
            }
            Operation::Swap => {
                if cursor.right_position >= right_len {
                    cursor.left_position += 1;
                    cursor.right_position = 0;
                }
                if cursor.left_position < left_len && cursor.right_position < right_len {
                    return Some(cursor);
                }
                // This pair is done; move on to the next one.
                cursor.right_tour += 1;
                cursor.operation = Operation::RelocateLeftToRight;
                cursor.left_position = 0;
                cursor.right_position = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fxhash::FxHashSet;

    use super::*;
    use crate::{
        problem::{customer::CustomerIdx, depot::DepotIdx, instance::Problem},
        solver::tour::Tour,
        test_utils,
    };

    /// A solution whose tours have the given sizes, customers dealt out in
    /// arena order.
    fn solution_with_tour_sizes(sizes: &[usize]) -> Solution {
        let total: usize = sizes.iter().sum();
        let customers: Vec<(f64, f64, f64)> =
            (0..total).map(|i| (i as f64, 0.0, 0.0)).collect();
        let problem = test_utils::create_problem(&customers, &[(0.0, 0.0)], 1e9);

        let mut next = 0;
        let tours = sizes
            .iter()
            .map(|&size| {
                let tour = Tour::from_sequence(
                    DepotIdx::new(0),
                    (next..next + size).map(CustomerIdx::new),
                );
                next += size;
                tour
            })
            .collect();

        Solution::from_tours(problem, tours)
    }

    /// Closed form of the neighbourhood size: over every pair i < j,
    /// s_i + s_j + s_i * s_j.
    fn expected_move_count(sizes: &[usize]) -> usize {
        let mut count = 0;
        for i in 0..sizes.len() {
            for j in i + 1..sizes.len() {
                count += sizes[i] + sizes[j] + sizes[i] * sizes[j];
            }
        }
        count
    }

    fn drain(cycle: &InterchangeCycle<'_>) -> Vec<Move> {
        std::iter::from_fn(|| cycle.next_move()).collect()
    }

    #[test]
    fn test_enumerates_exact_closed_form_count() {
        for sizes in [
            vec![1, 1],
            vec![2, 3],
            vec![2, 3, 4],
            vec![1, 5, 2, 3],
        ] {
            let solution = solution_with_tour_sizes(&sizes);
            let cycle = InterchangeCycle::new(&solution);

            let moves = drain(&cycle);

            assert_eq!(moves.len(), expected_move_count(&sizes));

            let distinct: FxHashSet<Move> = moves.iter().copied().collect();
            assert_eq!(distinct.len(), moves.len());
        }
    }

    #[test]
    fn test_empty_tours_contribute_no_positions() {
        let sizes = vec![2, 0, 3];
        let solution = solution_with_tour_sizes(&sizes);
        let cycle = InterchangeCycle::new(&solution);

        let moves = drain(&cycle);

        // (0,1): 2, (0,2): 2 + 3 + 6, (1,2): 3.
        assert_eq!(moves.len(), 16);
        assert_eq!(moves.len(), expected_move_count(&sizes));
    }

    #[test]
    fn test_move_order_for_a_single_pair() {
        let solution = solution_with_tour_sizes(&[2, 1]);
        let cycle = InterchangeCycle::new(&solution);

        let left_tour = TourIdx::new(0);
        let right_tour = TourIdx::new(1);

        assert_eq!(
            drain(&cycle),
            vec![
                Move::RelocateLeftToRight {
                    left_tour,
                    right_tour,
                    position: 0
                },
                Move::RelocateLeftToRight {
                    left_tour,
                    right_tour,
                    position: 1
                },
                Move::RelocateRightToLeft {
                    left_tour,
                    right_tour,
                    position: 0
                },
                Move::Swap {
                    left_tour,
                    right_tour,
                    left_position: 0,
                    right_position: 0
                },
                Move::Swap {
                    left_tour,
                    right_tour,
                    left_position: 1,
                    right_position: 0
                },
            ]
        );
    }

    #[test]
    fn test_exhausted_cycle_stays_exhausted() {
        let solution = solution_with_tour_sizes(&[1, 1]);
        let cycle = InterchangeCycle::new(&solution);

        drain(&cycle);

        assert!(cycle.is_exhausted());
        for _ in 0..5 {
            assert_eq!(cycle.next_move(), None);
        }
    }

    #[test]
    fn test_fewer_than_two_tours_yields_no_moves() {
        let singleton = solution_with_tour_sizes(&[4]);
        let cycle = InterchangeCycle::new(&singleton);
        assert_eq!(cycle.next_move(), None);

        let empty = Solution::empty(empty_problem());
        let cycle = InterchangeCycle::new(&empty);
        assert_eq!(cycle.next_move(), None);
    }

    fn empty_problem() -> Arc<Problem> {
        test_utils::create_problem(&[], &[(0.0, 0.0)], 1e9)
    }

    #[test]
    fn test_concurrent_pollers_split_the_neighbourhood() {
        let sizes = vec![4, 6, 5, 3];
        let solution = solution_with_tour_sizes(&sizes);
        let cycle = InterchangeCycle::new(&solution);

        let collected = parking_lot::Mutex::new(Vec::new());

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    let mut local = Vec::new();
                    while let Some(candidate) = cycle.next_move() {
                        local.push(candidate);
                    }
                    collected.lock().extend(local);
                });
            }
        });

        let moves = collected.into_inner();
        assert_eq!(moves.len(), expected_move_count(&sizes));

        let distinct: FxHashSet<Move> = moves.iter().copied().collect();
        assert_eq!(distinct.len(), moves.len());
    }
}
