use crate::{Axis3, Point3i};

use core::ops::Range;
use itertools::{iproduct, ConsTuples, Product};
use serde::{Deserialize, Serialize};

/// A 3-dimensional extent. This is mathematically the Cartesian product of a half-closed interval `[a, b)` in each
/// dimension. You can also just think of it as an axis-aligned box with some shape and a minimum point.
///
/// A medium grid always lives in the extent with minimum `[0, 0, 0]` and shape `[width, height, depth]`. Sub-extents are used
/// to describe the blocks of a supervoxel grid.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Extent3i {
    /// The least point contained in the extent.
    pub minimum: Point3i,
    /// The length of each dimension.
    pub shape: Point3i,
}

impl Extent3i {
    /// The default representation of an extent as the minimum point and shape.
    #[inline]
    pub fn from_min_and_shape(minimum: Point3i, shape: Point3i) -> Self {
        Self { minimum, shape }
    }

    /// An alternative representation of an extent as the minimum point and least upper bound.
    #[inline]
    pub fn from_min_and_lub(minimum: Point3i, least_upper_bound: Point3i) -> Self {
        // We want to avoid negative shape components.
        let shape = (least_upper_bound - minimum).join(Point3i::ZERO);

        Self { minimum, shape }
    }

    /// The extent of a grid with the given dimensions, anchored at the origin.
    #[inline]
    pub fn from_dimensions(width: i32, height: i32, depth: i32) -> Self {
        Self::from_min_and_shape(Point3i::ZERO, Point3i([width, height, depth]))
    }

    /// Like `from_dimensions`, but for the unsigned dimensions found in serialized headers. Returns `None` if any dimension is
    /// zero or does not fit in an `i32`, or if the number of points does not fit in a `usize`.
    pub fn from_u32_dimensions(width: u32, height: u32, depth: u32) -> Option<Self> {
        let to_axis = |d: u32| i32::try_from(d).ok().filter(|d| *d > 0);

        let extent = Self::from_dimensions(to_axis(width)?, to_axis(height)?, to_axis(depth)?);
        extent.checked_num_points()?;

        Some(extent)
    }

    /// `(width, height, depth)` of the extent.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32, u32) {
        (
            self.shape.x() as u32,
            self.shape.y() as u32,
            self.shape.z() as u32,
        )
    }

    /// The number of points contained in the extent. Extents from `from_u32_dimensions` never overflow here; use
    /// `checked_num_points` for arbitrary shapes.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.shape.x() as usize * self.shape.y() as usize * self.shape.z() as usize
    }

    /// Like `num_points`, but `None` if the count overflows a `usize`.
    #[inline]
    pub fn checked_num_points(&self) -> Option<usize> {
        (self.shape.x() as usize)
            .checked_mul(self.shape.y() as usize)?
            .checked_mul(self.shape.z() as usize)
    }

    /// Returns `true` iff the number of points in the extent is 0.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_points() == 0
    }

    /// The least point `p` for which all points `q` in the extent satisfy `q < p`.
    #[inline]
    pub fn least_upper_bound(&self) -> Point3i {
        self.minimum + self.shape
    }

    /// Returns `true` iff the point `p` is contained in this extent.
    #[inline]
    pub fn contains(&self, p: Point3i) -> bool {
        let lub = self.least_upper_bound();

        self.minimum <= p && p < lub
    }

    /// Returns the extent containing only the points in both `self` and `other`.
    #[inline]
    pub fn intersection(&self, other: &Self) -> Self {
        let minimum = self.minimum.join(other.minimum);
        let lub = self.least_upper_bound().meet(other.least_upper_bound());

        Self::from_min_and_lub(minimum, lub)
    }

    /// Returns the first axis whose length is not a multiple of `block_size`, i.e. the axis that prevents this extent from
    /// being tiled by cubes of edge `block_size`.
    #[inline]
    pub fn untileable_axis(&self, block_size: i32) -> Option<Axis3> {
        self.shape.first_axis_not_multiple_of(block_size)
    }

    /// Iterate over all points in the extent, with X varying fastest and Z slowest.
    /// ```
    /// # use voxel_medium_core::prelude::*;
    /// #
    /// let extent = Extent3i::from_min_and_shape(Point3i([0, 0, 0]), Point3i([2, 2, 1]));
    /// let points = extent.iter_points().collect::<Vec<_>>();
    /// assert_eq!(points, vec![
    ///     Point3i([0, 0, 0]), Point3i([1, 0, 0]), Point3i([0, 1, 0]), Point3i([1, 1, 0])
    /// ]);
    /// ```
    #[inline]
    pub fn iter_points(&self) -> Extent3PointIter {
        let lub = self.least_upper_bound();

        Extent3PointIter {
            // iproduct is opposite of row-major order.
            product_iter: iproduct!(
                self.minimum.z()..lub.z(),
                self.minimum.y()..lub.y(),
                self.minimum.x()..lub.x()
            ),
        }
    }
}

type RangeProduct2 = Product<Range<i32>, Range<i32>>;
type RangeProduct3 = Product<RangeProduct2, Range<i32>>;

/// An iterator over all points in an `Extent3i`.
pub struct Extent3PointIter {
    product_iter: ConsTuples<RangeProduct3, ((i32, i32), i32)>,
}

impl Iterator for Extent3PointIter {
    type Item = Point3i;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.product_iter.next().map(|(z, y, x)| Point3i([x, y, z]))
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn row_major_extent_iter() {
        let extent = Extent3i::from_min_and_shape(Point3i([0, 0, 0]), Point3i([2, 2, 2]));

        let points: Vec<_> = extent.iter_points().collect();

        assert_eq!(
            points,
            vec![
                Point3i([0, 0, 0]),
                Point3i([1, 0, 0]),
                Point3i([0, 1, 0]),
                Point3i([1, 1, 0]),
                Point3i([0, 0, 1]),
                Point3i([1, 0, 1]),
                Point3i([0, 1, 1]),
                Point3i([1, 1, 1]),
            ]
        );
    }

    #[test]
    fn empty_intersection_is_empty() {
        let e1 = Extent3i::from_min_and_shape(Point3i::ZERO, Point3i::fill(2));
        let e2 = Extent3i::from_min_and_shape(Point3i::fill(3), Point3i::fill(2));

        // A naive implementation might say the shape is [-1, -1, -1].
        assert_eq!(e1.intersection(&e2).shape, Point3i::ZERO);
        assert!(e1.intersection(&e2).is_empty());
    }

    #[test]
    fn u32_dimensions_must_be_positive_and_fit() {
        assert_eq!(
            Extent3i::from_u32_dimensions(2, 3, 4),
            Some(Extent3i::from_dimensions(2, 3, 4))
        );
        assert_eq!(Extent3i::from_u32_dimensions(0, 3, 4), None);
        assert_eq!(Extent3i::from_u32_dimensions(2, u32::MAX, 4), None);
    }

    #[test]
    fn point_count_overflow_is_detected() {
        let max = i32::MAX as u32;

        assert_eq!(Extent3i::from_u32_dimensions(max, max, max), None);
        assert_eq!(
            Extent3i::from_dimensions(i32::MAX, i32::MAX, i32::MAX).checked_num_points(),
            None
        );
        assert_eq!(
            Extent3i::from_dimensions(2, 3, 4).checked_num_points(),
            Some(24)
        );
    }

    #[test]
    fn untileable_axis_names_first_offender() {
        let extent = Extent3i::from_dimensions(4, 4, 6);

        assert_eq!(extent.untileable_axis(2), None);
        assert_eq!(extent.untileable_axis(4), Some(Axis3::Z));
    }
}
