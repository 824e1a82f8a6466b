//! The trait that defines the interface of the discrete distributions of this
//! crate.
//!
//! The only distribution the assay pipeline really needs is the
//! [Poisson](crate::distributions::Poisson::Poisson) one, but the interface is
//! kept generic: the deafult implementations only assume a [DiscreteDomain]
//! and a [pmf](DiscreteDistribution::pmf), so other counting distributions can
//! reuse them directly.

use rand::Rng;

use crate::configuration;
use crate::domain::DiscreteDomain;

pub trait DiscreteDistribution {
    //Requiered method:

    /// Evaluates the [PMF](https://en.wikipedia.org/wiki/Probability_mass_function)
    /// (Probability Mass Function) of the distribution at point x.
    /// The function should not be evaluated outside the domain (because it
    /// should return 0.0 anyway).
    fn pmf(&self, x: f64) -> f64;

    /// Returns a reference to the pmf domain, wich indicates at wich points the
    /// pmf can be evaluated. The returned domain should be constant and not change.
    fn get_domain(&self) -> &DiscreteDomain;

    // Provided methods:
    // Manual implementation for a specific distribution is recommended.

    /// Evaluates the [CDF](https://en.wikipedia.org/wiki/Cumulative_distribution_function)
    /// (Cumulative Distribution Function): `P(X <= x)`, **both** inclusive.
    /// If the function is evaluated outside the domain of the pmf, it will
    /// return either `0.0` or `1.0`. **Panicks** if `x` is a NaN.
    ///
    /// Note that the deafult implemetation walks the domain accumulating the pmf
    /// and may be expensive.
    fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            panic!("Tried to evaluate the cdf with a NaN value. \n");
        }

        let aux: [f64; 1] = [x];
        let aux_2: Vec<f64> = self.cdf_multiple(&aux);
        return aux_2[0];
    }

    /// Samples the distribution at random.
    ///
    /// The deafult method is [Inverse transform sampling](https://en.wikipedia.org/wiki/Inverse_transform_sampling):
    /// generate a random uniform number and evaluate the inverse cdf function
    /// (the [DiscreteDistribution::quantile] function) there.
    ///
    /// The method [DiscreteDistribution::sample_multiple] is more effitient for
    /// multiple sampling.
    fn sample(&self) -> f64 {
        let aux: Vec<f64> = self.sample_multiple(1);
        return aux[0];
    }

    /// Evaluates the [quantile function](https://en.wikipedia.org/wiki/Quantile_function):
    /// the smallest value of the domain whose cdf reaches `x`.
    ///  - if `x <= 0.0`, the minimum of the domain will be returned.
    ///  - if `1.0 <= x`, the maximum of the domain will be returned (this may
    ///    be positive infinity).
    ///  - **Panicks** if `x` is a NaN.
    ///
    /// The quantile function is the inverse function of [DiscreteDistribution::cdf].
    /// If you are considering calling this function multiple times, use
    /// [DiscreteDistribution::quantile_multiple] for better performance.
    fn quantile(&self, x: f64) -> f64 {
        if x.is_nan() {
            // x is not valid
            panic!("Tried to evaluate the quantile function with a NaN value. \n");
        }

        let value: [f64; 1] = [x];
        let quantile_vec: Vec<f64> = self.quantile_multiple(&value);
        return quantile_vec[0];
    }

    // Multiple variants.
    // They are the same as the normal functions, but if they are overriden they may
    // provide a computational advantage.

    /// cdf_multiple allows to evaluate the [DiscreteDistribution::cdf] at multiple
    /// points. It may provide a computational advantage.
    ///
    /// If an effitient [DiscreteDistribution::cdf] has been implemented, it can be
    /// replaced for:
    ///
    /// ```ignore
    /// fn cdf_multiple(&self, points: &[f64]) -> Vec<f64> {
    ///     points.iter().map(|x| self.cdf(*x)).collect::<Vec<f64>>()
    /// }
    /// ```
    fn cdf_multiple(&self, points: &[f64]) -> Vec<f64> {
        if points.is_empty() {
            return Vec::new();
        }

        // panic if NAN is found
        for point in points {
            if point.is_nan() {
                panic!("Found NaN in `cdf_multiple`. \n");
            }
        }

        let mut ret: Vec<f64> = vec![0.0; points.len()];
        let domain: &DiscreteDomain = self.get_domain();
        let bounds: (f64, f64) = domain.get_bounds();
        // ^both domain variants are bounded below, so the walk can always start
        // at bounds.0 and go upwards.

        let mut sorted_indicies: Vec<usize> = (0..points.len()).into_iter().collect::<Vec<usize>>();

        sorted_indicies.sort_unstable_by(|&i, &j| {
            let a: f64 = points[i];
            let b: f64 = points[j];
            a.partial_cmp(&b).unwrap()
        });

        let mut idx_iter: std::vec::IntoIter<usize> = sorted_indicies.into_iter();
        let mut current_index: usize = idx_iter.next().unwrap();
        // ^unwrap is safe

        let mut current_cdf_point: f64 = points[current_index];

        let mut accumulator: f64 = 0.0;

        // serve the points that fall below the domain
        while current_cdf_point < bounds.0 {
            ret[current_index] = 0.0;
            match idx_iter.next() {
                Some(v) => current_index = v,
                None => return ret,
            }
            current_cdf_point = points[current_index];
        }

        for x in domain.iter() {
            // `x` has just passed the point: the accumulator contains all the
            // mass up to and including the point itself.
            while current_cdf_point < x {
                ret[current_index] = accumulator;
                match idx_iter.next() {
                    Some(v) => current_index = v,
                    None => return ret,
                }
                current_cdf_point = points[current_index];
            }

            accumulator += self.pmf(x);
        }

        // If we reach this point it means that the domain is finite and the
        // remaining values are at or beyond bounds.1

        ret[current_index] = 1.0;
        for idx in idx_iter {
            ret[idx] = 1.0;
        }

        return ret;
    }

    /// [DiscreteDistribution::sample_multiple] allows to evaluate the
    /// [DiscreteDistribution::sample] at multiple points. It may provide a
    /// computational advantage in comparasion to [DiscreteDistribution::sample].
    ///
    /// The deafult implementation uses the
    /// [DiscreteDistribution::quantile_multiple] function, wich may be expensive.
    ///
    /// If an effitient [DiscreteDistribution::sample] has been implemented, it can
    /// be replaced for:
    ///
    /// ```ignore
    /// fn sample_multiple(&self, n: usize) -> Vec<f64> {
    ///     (0..n).map(|_| self.sample()).collect::<Vec<f64>>()
    /// }
    /// ```
    fn sample_multiple(&self, n: usize) -> Vec<f64> {
        let mut rng: rand::prelude::ThreadRng = rand::rng();
        let rand_quantiles: Vec<f64> = (0..n).map(|_| rng.random::<f64>()).collect::<Vec<f64>>();

        let ret: Vec<f64> = self.quantile_multiple(&rand_quantiles);

        return ret;
    }

    /// quantile_multiple acts the same as [DiscreteDistribution::quantile] but on
    /// multiple points. It provides a computational advantage over calling the
    /// normal [DiscreteDistribution::quantile] multiple times.
    ///
    /// **Panicks** if there is any NaN in points. If a value in points is less
    /// (or equal) to 0, the minimum value in the domain will be returned. If a
    /// value in points is greater (or equal) to 1, the maximum value in the
    /// domain will be returned (possibly positive infinity).
    fn quantile_multiple(&self, points: &[f64]) -> Vec<f64> {
        if points.is_empty() {
            return Vec::new();
        }

        // panic if NAN is found
        for point in points {
            if point.is_nan() {
                panic!("Found NaN in `quantile_multiple`. \n");
            }
        }

        let mut ret: Vec<f64> = vec![0.0; points.len()];
        let domain: &DiscreteDomain = self.get_domain();
        let bounds: (f64, f64) = domain.get_bounds();

        let mut sorted_indicies: Vec<usize> = (0..points.len()).into_iter().collect::<Vec<usize>>();

        sorted_indicies.sort_unstable_by(|&i, &j| {
            let a: f64 = points[i];
            let b: f64 = points[j];
            a.partial_cmp(&b).unwrap()
        });

        let mut idx_iter: std::vec::IntoIter<usize> = sorted_indicies.into_iter();
        let mut current_index: usize = idx_iter.next().unwrap();
        // ^unwrap is safe

        let mut current_quantile_point: f64 = points[current_index];

        let mut accumulator: f64 = 0.0;

        while current_quantile_point <= 0.0 {
            ret[current_index] = bounds.0;
            match idx_iter.next() {
                Some(v) => current_index = v,
                None => return ret,
            }
            current_quantile_point = points[current_index];
        }

        for x in domain.iter() {
            accumulator += self.pmf(x);

            // The check against 1.0 is the exit for the quantile points that the
            // accumulator can never reach on an unbounded domain: they are served
            // with bounds.1 instead of walking forever.
            while current_quantile_point <= accumulator || 1.0 <= current_quantile_point {
                ret[current_index] = if 1.0 <= current_quantile_point {
                    bounds.1
                } else {
                    x
                };
                match idx_iter.next() {
                    Some(v) => current_index = v,
                    None => return ret,
                }
                current_quantile_point = points[current_index];
            }
        }

        // If we reach this point it means that the domain is finite and the
        // remaining quantile points are beyond the accumulated mass

        ret[current_index] = bounds.1;
        for idx in idx_iter {
            ret[idx] = bounds.1;
        }

        return ret;
    }

    /// Returns the 2 sided, equal tailed interval that contains `confidence` of
    /// the probability mass of the distribution: the quantiles at
    /// `(1 - confidence) / 2` and `(1 + confidence) / 2`. Both endpoints are
    /// included.
    ///
    /// `confidence` should belong to `(0.0, 1.0)`; for values outside it the
    /// endpoints degenerate to the bounds of the domain. **Panicks** if
    /// `confidence` is a NaN.
    fn interval(&self, confidence: f64) -> (f64, f64) {
        if confidence.is_nan() {
            panic!("Tried to evaluate `interval` with a NaN confidence. \n");
        }

        let lower_tail: f64 = 0.5 * (1.0 - confidence);
        let quantiles: Vec<f64> = self.quantile_multiple(&[lower_tail, 1.0 - lower_tail]);

        return (quantiles[0], quantiles[1]);
    }

    // Statistics

    /// Returns the [expected value](https://en.wikipedia.org/wiki/Expected_value)
    /// of the distribution if it exists.
    ///
    /// If the domain is very large or infinite, only the first
    /// [configuration::MOMENT_MAXIMUM_STEPS] values are visited.
    fn expected_value(&self) -> Option<f64> {
        let max_steps: u64 = configuration::MOMENT_MAXIMUM_STEPS;

        let mut accumulator: f64 = 0.0;
        let mut i: u64 = 0;
        for x in self.get_domain().iter() {
            if max_steps <= i {
                break;
            }
            accumulator += x * self.pmf(x);
            i += 1;
        }

        return Some(accumulator);
    }

    /// Returns the [variance](https://en.wikipedia.org/wiki/Variance) of
    /// the distribution if it exists.
    ///
    /// If the domain is very large or infinite, only the first
    /// [configuration::MOMENT_MAXIMUM_STEPS] values are visited.
    fn variance(&self) -> Option<f64> {
        let mean: f64 = self.expected_value()?;
        let max_steps: u64 = configuration::MOMENT_MAXIMUM_STEPS;

        let mut accumulator: f64 = 0.0;
        let mut i: u64 = 0;
        for x in self.get_domain().iter() {
            if max_steps <= i {
                break;
            }
            accumulator += (x - mean) * (x - mean) * self.pmf(x);
            i += 1;
        }

        return Some(accumulator);
    }

    /// Returns the [mode](https://en.wikipedia.org/wiki/Mode_(statistics))
    /// of the distribution.
    ///
    /// If the distribution is very large or infinite, it only checks the first
    /// [configuration::MOMENT_MAXIMUM_STEPS] values.
    ///
    /// Panics if the domain contains no values.
    fn mode(&self) -> f64 {
        let max_steps: u64 = configuration::MOMENT_MAXIMUM_STEPS;

        let domain: &DiscreteDomain = self.get_domain();
        let mut domain_iter: crate::domain::DiscreteDomainIterator<'_> = domain.iter();
        let mut i: u64 = 0;
        let (mut max, mut max_value) = match domain_iter.next() {
            Some(v) => (v, self.pmf(v)),
            None => panic!("Attempted to compute the mode of a distribution with empty domain. (Domain contains no elements)"),
        };

        for point in domain_iter {
            if max_steps <= i {
                break;
            }

            let mass: f64 = self.pmf(point);
            if max_value < mass {
                max = point;
                max_value = mass;
            }

            i += 1;
        }

        return max;
    }
}
