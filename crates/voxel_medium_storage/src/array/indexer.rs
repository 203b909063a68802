use voxel_medium_core::prelude::*;

/// The index of a value in the flat storage of an `Array3`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Stride(pub usize);

/// The canonical linearization shared by the in-memory grid, both binary formats, and the structured nesting:
///
/// ```text
/// stride = x + width * (y + height * z)
/// ```
///
/// X varies fastest, then Y, then Z.
pub struct Indexer3;

impl Indexer3 {
    /// `local` must be relative to the array minimum and in bounds of `shape`.
    #[inline]
    pub fn stride_from_local_point(shape: Point3i, local: Point3i) -> Stride {
        Stride(
            local.x() as usize
                + shape.x() as usize * (local.y() as usize + shape.y() as usize * local.z() as usize),
        )
    }

    /// Inverse of `stride_from_local_point`.
    #[inline]
    pub fn local_point_from_stride(shape: Point3i, stride: Stride) -> Point3i {
        let sx = shape.x() as usize;
        let sxy = sx * shape.y() as usize;
        let z = stride.0 / sxy;
        let rem = stride.0 % sxy;

        Point3i([(rem % sx) as i32, (rem / sx) as i32, z as i32])
    }

    /// Visits every point of `iter_extent` (in global coordinates) in canonical order, along with its stride in an array that
    /// occupies `array_extent`. The caller must ensure `iter_extent` is a subset of `array_extent`.
    #[inline]
    pub fn for_each_point_and_stride_unchecked(
        array_extent: &Extent3i,
        iter_extent: &Extent3i,
        mut f: impl FnMut(Point3i, Stride),
    ) {
        let iter_lub = iter_extent.least_upper_bound();
        let mut s = Array3ForEachState::new(array_extent.shape, iter_extent.minimum - array_extent.minimum);
        s.start_z();
        for z in iter_extent.minimum.z()..iter_lub.z() {
            s.start_y();
            for y in iter_extent.minimum.y()..iter_lub.y() {
                s.start_x();
                for x in iter_extent.minimum.x()..iter_lub.x() {
                    f(Point3i([x, y, z]), s.stride());
                    s.incr_x();
                }
                s.incr_y();
            }
            s.incr_z();
        }
    }
}

struct Array3ForEachState {
    y_stride: usize,
    z_stride: usize,
    x_start: usize,
    y_start: usize,
    z_start: usize,
    x_i: usize,
    y_i: usize,
    z_i: usize,
}

impl Array3ForEachState {
    fn new(array_shape: Point3i, index_min: Point3i) -> Self {
        let y_stride = array_shape.x() as usize;
        let z_stride = y_stride * array_shape.y() as usize;

        Self {
            y_stride,
            z_stride,
            x_start: index_min.x() as usize,
            y_start: y_stride * index_min.y() as usize,
            z_start: z_stride * index_min.z() as usize,
            x_i: 0,
            y_i: 0,
            z_i: 0,
        }
    }

    fn stride(&self) -> Stride {
        Stride(self.x_i)
    }

    fn start_z(&mut self) {
        self.z_i = self.z_start;
    }
    fn start_y(&mut self) {
        self.y_i = self.z_i + self.y_start;
    }
    fn start_x(&mut self) {
        self.x_i = self.y_i + self.x_start;
    }

    fn incr_x(&mut self) {
        self.x_i += 1;
    }
    fn incr_y(&mut self) {
        self.y_i += self.y_stride;
    }
    fn incr_z(&mut self) {
        self.z_i += self.z_stride;
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
    fn stride_matches_documented_formula() {
        let shape = Point3i([3, 4, 5]);

        for p in Extent3i::from_min_and_shape(Point3i::ZERO, shape).iter_points() {
            let expected = p.x() + 3 * (p.y() + 4 * p.z());
            let stride = Indexer3::stride_from_local_point(shape, p);
            assert_eq!(stride, Stride(expected as usize));
            assert_eq!(Indexer3::local_point_from_stride(shape, stride), p);
        }
    }

    #[test]
    fn sub_extent_visit_agrees_with_point_strides() {
        let array_extent = Extent3i::from_dimensions(4, 4, 4);
        let sub_extent = Extent3i::from_min_and_shape(Point3i([1, 2, 0]), Point3i([2, 2, 3]));

        let mut visited = Vec::new();
        Indexer3::for_each_point_and_stride_unchecked(&array_extent, &sub_extent, |p, s| {
            assert_eq!(s, Indexer3::stride_from_local_point(array_extent.shape, p));
            visited.push(p);
        });

        assert_eq!(visited, sub_extent.iter_points().collect::<Vec<_>>());
    }
}
