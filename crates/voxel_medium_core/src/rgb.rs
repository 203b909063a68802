use core::ops::{Add, Index};
use serde::{Deserialize, Serialize};

/// A spectral coefficient with one `f32` component per color channel.
///
/// Absorption, scattering, and emission coefficients are all stored this way. Serialized as a plain `[r, g, b]` triple.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    pub const ZERO: Self = Rgb([0.0; 3]);
    pub const NEG_INFINITY: Self = Rgb([f32::NEG_INFINITY; 3]);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Rgb([r, g, b])
    }

    #[inline]
    pub const fn splat(value: f32) -> Self {
        Rgb([value; 3])
    }

    #[inline]
    pub fn r(&self) -> f32 {
        self.0[0]
    }

    #[inline]
    pub fn g(&self) -> f32 {
        self.0[1]
    }

    #[inline]
    pub fn b(&self) -> f32 {
        self.0[2]
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(&self, other: Self) -> Self {
        Rgb([
            self.r().max(other.r()),
            self.g().max(other.g()),
            self.b().max(other.b()),
        ])
    }

    /// True iff every component is `+0.0`, bit for bit.
    #[inline]
    pub fn is_positive_zero(&self) -> bool {
        self.0.iter().all(|c| c.to_bits() == 0)
    }

    /// True iff `self[c] >= other[c]` for every channel `c`.
    #[inline]
    pub fn dominates(&self, other: &Self) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a >= b)
    }
}

impl From<[f32; 3]> for Rgb {
    #[inline]
    fn from(components: [f32; 3]) -> Self {
        Rgb(components)
    }
}

impl From<Rgb> for [f32; 3] {
    #[inline]
    fn from(rgb: Rgb) -> Self {
        rgb.0
    }
}

impl Add for Rgb {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Rgb([self.r() + rhs.r(), self.g() + rhs.g(), self.b() + rhs.b()])
    }
}

impl Index<usize> for Rgb {
    type Output = f32;

    #[inline]
    fn index(&self, channel: usize) -> &f32 {
        &self.0[channel]
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
    fn max_is_component_wise() {
        let a = Rgb::new(1.0, 0.0, 5.0);
        let b = Rgb::new(0.0, 2.0, 3.0);

        assert_eq!(a.max(b), Rgb::new(1.0, 2.0, 5.0));
        assert_eq!(Rgb::NEG_INFINITY.max(a), a);
        assert!(a.max(b).dominates(&a));
        assert!(a.max(b).dominates(&b));
        assert!(!a.dominates(&b));
    }

    #[test]
    fn negative_zero_is_not_positive_zero() {
        assert!(Rgb::ZERO.is_positive_zero());
        assert!(!Rgb::new(0.0, -0.0, 0.0).is_positive_zero());
    }
}
