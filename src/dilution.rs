//! Arithmetic of serial dilutions and plating volumes.
//!
//! Plating a whole culture is impossible: the sample is first diluted by a known
//! factor and only a small volume of the dilution is plated. The
//! [DilutionVolumeFactor] is the single scalar that connects the true population
//! of the culture with the expected colony count on the plate:
//!
//! ```text
//! factor = sample_volume / (dilution_factor * original_volume)
//!
//! expected colonies on the plate = true population * factor
//! ```
//!
//! For example, diluting a 1 mL culture `10^4` times and plating 0.1 mL of the
//! dilution gives `factor = 0.1 / (10^4 * 1) = 10^-5`: the plate shows, on
//! avarage, 1 colony for every 100 000 cells in the culture.

use crate::errors::AssayError;

/// The fraction of the original population that is expected to end up on the
/// plate. See the [module documentation](crate::dilution) for the exact formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DilutionVolumeFactor {
    factor: f64,
}

impl DilutionVolumeFactor {
    /// Creates a new [DilutionVolumeFactor].
    ///
    ///  - `dilution_factor`: how many times the culture was diluted (`10^4`
    ///    means 10 000 times). Must be finite and stricly positive.
    ///  - `original_volume`: volume of the culture the dilution started from.
    ///    Must be finite and stricly positive.
    ///  - `sample_volume`: volume of the dilution that was plated. Must be
    ///    finite and stricly positive.
    ///
    /// Otherwise (or if the resulting factor itself degenerates to `0.0` or
    /// infinity) an [AssayError::InvalidInput] is returned.
    pub fn new(
        dilution_factor: f64,
        original_volume: f64,
        sample_volume: f64,
    ) -> Result<DilutionVolumeFactor, AssayError> {
        #[allow(clippy::nonminimal_bool)]
        if !dilution_factor.is_finite() || !(0.0 < dilution_factor) {
            return Err(AssayError::InvalidInput {
                argument: "dilution_factor",
                value: dilution_factor,
            });
        }

        #[allow(clippy::nonminimal_bool)]
        if !original_volume.is_finite() || !(0.0 < original_volume) {
            return Err(AssayError::InvalidInput {
                argument: "original_volume",
                value: original_volume,
            });
        }

        #[allow(clippy::nonminimal_bool)]
        if !sample_volume.is_finite() || !(0.0 < sample_volume) {
            return Err(AssayError::InvalidInput {
                argument: "sample_volume",
                value: sample_volume,
            });
        }

        let factor: f64 = sample_volume / (dilution_factor * original_volume);

        #[allow(clippy::nonminimal_bool)]
        if !factor.is_finite() || !(0.0 < factor) {
            // extreme inputs can underflow the division to 0.0 or overflow it
            return Err(AssayError::InvalidInput {
                argument: "dilution volume factor",
                value: factor,
            });
        }

        return Ok(DilutionVolumeFactor { factor });
    }

    /// Returns the factor itself.
    #[must_use]
    pub const fn get(&self) -> f64 {
        return self.factor;
    }

    /// The expected colony count on the plate if the true population of the
    /// culture is `true_count`. This is the `lambda` of the Poisson sampling
    /// distribution of the plate.
    #[must_use]
    pub fn expected_sample_mean(&self, true_count: u64) -> f64 {
        return true_count as f64 * self.factor;
    }

    /// The population that would produce `observed_count` colonies under a
    /// perfect, noiseless sampling: `floor(observed_count / factor)`.
    ///
    /// This is only a point estimate. It is used as the anchor of the scan in
    /// [infer_population](crate::inference::infer_population), wich recovers the
    /// full distribution of plausible populations around it.
    #[must_use]
    pub fn perfect_point_estimate(&self, observed_count: u64) -> u64 {
        return (observed_count as f64 / self.factor).floor() as u64;
    }
}
