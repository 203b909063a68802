use crate::Axis3;

use core::fmt;
use core::ops::{Add, Div, Mul, Sub};
use serde::{Deserialize, Serialize};
use std::cmp::{max, min, Ordering};

/// A point on the 3D integer lattice.
///
/// Points support basic linear algebraic operations such as addition, subtraction, scalar multiplication, and scalar
/// division.
///
/// ```
/// use voxel_medium_core::Point3i;
///
/// let p1 = Point3i([1, 2, 3]);
/// let p2 = Point3i([3, 4, 5]);
///
/// assert_eq!(p1 + p2, Point3i([4, 6, 8]));
/// assert_eq!(p1 - p2, Point3i([-2, -2, -2]));
/// assert_eq!(p2 * 2, Point3i([6, 8, 10]));
/// assert_eq!(p2 / 2, Point3i([1, 2, 2]));
/// ```
///
/// There is also a partial order defined on points which says that a point A is greater than a point B if and only if all
/// of the components of point A are greater than point B. This is useful for checking if a point is inside of the extent
/// between two other points:
///
/// ```
/// use voxel_medium_core::Point3i;
///
/// let min = Point3i::ZERO;
/// let least_upper_bound = Point3i::fill(3);
///
/// let p = Point3i([0, 1, 2]);
/// assert!(min <= p && p < least_upper_bound);
/// ```
#[derive(Copy, Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Point3i(pub [i32; 3]);

impl Point3i {
    pub const ZERO: Self = Point3i([0; 3]);

    #[inline]
    pub const fn fill(value: i32) -> Self {
        Point3i([value; 3])
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.0[1]
    }

    #[inline]
    pub fn z(&self) -> i32 {
        self.0[2]
    }

    /// Returns the component on `axis`.
    #[inline]
    pub fn at(&self, axis: Axis3) -> i32 {
        self.0[axis.index()]
    }

    #[inline]
    pub fn map_components(&self, f: impl Fn(i32) -> i32) -> Self {
        Point3i([f(self.x()), f(self.y()), f(self.z())])
    }

    /// Component-wise maximum.
    #[inline]
    pub fn join(&self, other: Self) -> Self {
        Point3i([
            max(self.x(), other.x()),
            max(self.y(), other.y()),
            max(self.z(), other.z()),
        ])
    }

    /// Component-wise minimum.
    #[inline]
    pub fn meet(&self, other: Self) -> Self {
        Point3i([
            min(self.x(), other.x()),
            min(self.y(), other.y()),
            min(self.z(), other.z()),
        ])
    }

    /// Returns the first axis where `self` is not a multiple of `divisor`.
    pub fn first_axis_not_multiple_of(&self, divisor: i32) -> Option<Axis3> {
        Axis3::ALL
            .iter()
            .copied()
            .find(|axis| divisor == 0 || self.at(*axis) % divisor != 0)
    }
}

impl From<[i32; 3]> for Point3i {
    #[inline]
    fn from(components: [i32; 3]) -> Self {
        Point3i(components)
    }
}

impl fmt::Display for Point3i {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x(), self.y(), self.z())
    }
}

impl PartialOrd for Point3i {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self < other {
            Some(Ordering::Less)
        } else if self > other {
            Some(Ordering::Greater)
        } else if self == other {
            Some(Ordering::Equal)
        } else {
            None
        }
    }

    #[inline]
    fn lt(&self, other: &Self) -> bool {
        self.x() < other.x() && self.y() < other.y() && self.z() < other.z()
    }

    #[inline]
    fn gt(&self, other: &Self) -> bool {
        self.x() > other.x() && self.y() > other.y() && self.z() > other.z()
    }

    #[inline]
    fn le(&self, other: &Self) -> bool {
        self.x() <= other.x() && self.y() <= other.y() && self.z() <= other.z()
    }

    #[inline]
    fn ge(&self, other: &Self) -> bool {
        self.x() >= other.x() && self.y() >= other.y() && self.z() >= other.z()
    }
}

impl Add for Point3i {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Point3i([self.x() + rhs.x(), self.y() + rhs.y(), self.z() + rhs.z()])
    }
}

impl Sub for Point3i {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Point3i([self.x() - rhs.x(), self.y() - rhs.y(), self.z() - rhs.z()])
    }
}

impl Mul<i32> for Point3i {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: i32) -> Self {
        self.map_components(|c| c * rhs)
    }
}

impl Div<i32> for Point3i {
    type Output = Self;

    #[inline]
    fn div(self, rhs: i32) -> Self {
        self.map_components(|c| c / rhs)
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_order_requires_all_components() {
        let p = Point3i([0, 5, 0]);

        assert!(!(p < Point3i::fill(4)));
        assert!(!(p >= Point3i::fill(4)));
        assert_eq!(p.partial_cmp(&Point3i::fill(4)), None);
        assert!(p < Point3i::fill(6));
    }

    #[test]
    fn first_axis_not_multiple() {
        let dims = Point3i([4, 6, 8]);

        assert_eq!(dims.first_axis_not_multiple_of(2), None);
        assert_eq!(dims.first_axis_not_multiple_of(4), Some(Axis3::Y));
        assert_eq!(dims.first_axis_not_multiple_of(3), Some(Axis3::X));
        assert_eq!(dims.first_axis_not_multiple_of(0), Some(Axis3::X));
    }
}
