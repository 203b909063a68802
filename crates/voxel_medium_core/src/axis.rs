use core::fmt;

/// Either the X, Y, or Z axis.
///
/// For a medium grid, X spans the width, Y spans the height, and Z spans the depth.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Axis3 {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis3 {
    pub const ALL: [Axis3; 3] = [Axis3::X, Axis3::Y, Axis3::Z];

    /// The index for a point's component on this axis.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The name of the grid dimension along this axis, as it appears in the structured format.
    pub fn dimension_name(&self) -> &'static str {
        match self {
            Axis3::X => "width",
            Axis3::Y => "height",
            Axis3::Z => "depth",
        }
    }
}

impl fmt::Display for Axis3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dimension_name())
    }
}
