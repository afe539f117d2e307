use geo::{Distance, Euclidean};

/// A location is any vertex of the problem plane, either a customer site or a
/// depot. Coordinates are planar; the instance files carry no road network, so
/// Euclidean distance doubles as the travel-time proxy throughout the solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    point: geo::Point,
}

impl Location {
    pub fn from_cartesian(x: f64, y: f64) -> Self {
        Self {
            point: geo::Point::new(x, y),
        }
    }

    pub fn x(&self) -> f64 {
        self.point.x()
    }

    pub fn y(&self) -> f64 {
        self.point.y()
    }

    /// Travel time to another location, in abstract time units.
    pub fn travel_time_to(&self, to: &Location) -> f64 {
        let euclidean = Euclidean;
        euclidean.distance(&self.point, &to.point)
    }
}

/// Marginal travel time of visiting `middle` on the way from `first` to
/// `last`, instead of going there directly. Non-negative by the triangle
/// inequality, up to floating-point error.
///
/// Doubles as the savings evaluation when `first` and `last` are the tail and
/// head of two tours and `middle` is their shared depot.
pub fn detour_cost(first: &Location, middle: &Location, last: &Location) -> f64 {
    first.travel_time_to(middle) + middle.travel_time_to(last) - first.travel_time_to(last)
}
