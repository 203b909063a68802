use crate::Rgb;

use serde::{Deserialize, Serialize};

/// The optical properties of a single cell of a participating medium.
///
/// Extinction is never stored; see [`Voxel::sigma_t`].
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Voxel {
    /// Absorption coefficient.
    pub sigma_a: Rgb,
    /// Scattering coefficient.
    pub sigma_s: Rgb,
    /// Emitted radiance. Zero for media that don't emit.
    #[serde(default)]
    pub emission: Rgb,
}

impl Voxel {
    pub const EMPTY: Self = Voxel {
        sigma_a: Rgb::ZERO,
        sigma_s: Rgb::ZERO,
        emission: Rgb::ZERO,
    };

    /// A non-emissive voxel.
    #[inline]
    pub const fn new(sigma_a: Rgb, sigma_s: Rgb) -> Self {
        Self {
            sigma_a,
            sigma_s,
            emission: Rgb::ZERO,
        }
    }

    #[inline]
    pub const fn with_emission(self, emission: Rgb) -> Self {
        Self { emission, ..self }
    }

    /// The extinction coefficient, `sigma_a + sigma_s` per channel.
    #[inline]
    pub fn sigma_t(&self) -> Rgb {
        self.sigma_a + self.sigma_s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extinction_is_sum_per_channel() {
        let v = Voxel::new(Rgb::new(1.0, 0.0, 0.5), Rgb::new(0.0, 1.0, 0.25));

        assert_eq!(v.sigma_t(), Rgb::new(1.0, 1.0, 0.75));
        assert_eq!(v.emission, Rgb::ZERO);
    }
}
