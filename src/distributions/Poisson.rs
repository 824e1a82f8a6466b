//! # Poisson distribution
//!
//! The [Poisson distribution](https://en.wikipedia.org/wiki/Poisson_distribution)
//! is a discrete distribution that counts the number of events that happen in a
//! given time with a given rate.
//!
//! The poisson distribution has a single parameter: the rate `lambda`. Lambda
//! represents the avarage number of events that happen in a given amount of time.
//!
//! In this crate the Poisson distribution models the plating process: if a large
//! population is diluted and a small volume of it is plated, the colony count on
//! the plate is (aproximately) Poisson distributed with
//! `lambda = population * dilution_volume_factor`. The population inference in
//! [crate::inference] is built entirely on top of this distribution.

use rand::Rng;

use crate::{
    distribution_trait::DiscreteDistribution, domain::DiscreteDomain, errors::AssayError,
    euclid::ln_gamma,
};

pub const POISSON_DOMAIN: DiscreteDomain = DiscreteDomain::From(0);

#[derive(Debug, Clone, PartialEq)]
pub struct Poisson {
    lambda: f64,
}

impl Poisson {
    /// Creates a new [Poisson] distribution.
    ///
    ///  - `lambda` indicates rate. And must fullfill:
    ///      - Must be finite (no `+-inf` nor NaNs)
    ///      - `0.0 < lambda`
    ///
    /// Otherwise an [AssayError::InvalidInput] will be returned.
    pub const fn new(lambda: f64) -> Result<Poisson, AssayError> {
        if !lambda.is_finite() {
            return Err(AssayError::InvalidInput {
                argument: "lambda",
                value: lambda,
            });
        }

        if lambda <= 0.0 {
            return Err(AssayError::InvalidInput {
                argument: "lambda",
                value: lambda,
            });
        }

        return Ok(Poisson { lambda });
    }

    /// Returns the value of `lambda`
    #[must_use]
    pub const fn get_lambda(&self) -> f64 {
        return self.lambda;
    }
}

impl DiscreteDistribution for Poisson {
    fn pmf(&self, mut x: f64) -> f64 {
        /* Usual definition:
         > P(x | lambda) = exp(-lambda) * lambda^x / x!

        But for better precision, we will use the following alternative equivalent:

         > P(x | lambda) = exp( x * ln(lambda) - lambda - ln(Gamma(x + 1)) )

        Also we will round `x` down to the nearest integer.

        */

        x = x.floor();

        if x < 0.0 {
            // outside the domain
            return 0.0;
        }

        let ln_gamma: f64 = ln_gamma(x + 1.0);
        let inner_exp: f64 = x * self.lambda.ln() - self.lambda - ln_gamma;

        return inner_exp.exp();
    }

    fn get_domain(&self) -> &DiscreteDomain {
        return &POISSON_DOMAIN;
    }

    // use default cdf, sample and quantile

    fn cdf_multiple(&self, points: &[f64]) -> Vec<f64> {
        /*
               Plan:
           We will use the deafult implementation as base and we will
           make some ajustments to improve performance.
           The main optimitzation is the computation of `ln_factorial`:
           instead of recomputing `ln(Gamma(x + 1))` each time (wich can be
           very expensive), we use the previous value to compute the next one
           with `ln(x!) = ln((x-1)!) + ln(x)`.

           The infinite query points are served with `1.0` directly: the
           domain is unbounded, so the walk can never pass them and would
           not terminate.
        */
        if points.is_empty() {
            return Vec::new();
        }

        // panic if NAN is found
        for point in points {
            if point.is_nan() {
                std::panic!("Found NaN in `cdf_multiple` of Poisson. \n");
            }
        }

        let mut ret: Vec<f64> = std::vec![0.0; points.len()];
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

        let mut current_cdf_point: f64 = points[current_index];

        let mut accumulator: f64 = 0.0;

        while current_cdf_point < bounds.0 {
            ret[current_index] = 0.0;
            match idx_iter.next() {
                Some(v) => current_index = v,
                None => return ret,
            }
            current_cdf_point = points[current_index];
        }

        let ln_lambda: f64 = self.lambda.ln();
        let mut ln_factorial: f64 = 0.0;
        let mut x: f64 = 0.0;
        loop {
            while current_cdf_point < x || current_cdf_point == f64::INFINITY {
                ret[current_index] = if current_cdf_point == f64::INFINITY {
                    1.0
                } else {
                    accumulator
                };
                match idx_iter.next() {
                    Some(v) => current_index = v,
                    None => return ret,
                }
                current_cdf_point = points[current_index];
            }

            let inner_exp: f64 = x * ln_lambda - self.lambda - ln_factorial;
            let pmf: f64 = inner_exp.exp();

            accumulator += pmf;
            x += 1.0;
            ln_factorial += x.ln();
        }
    }

    fn sample_multiple(&self, n: usize) -> Vec<f64> {
        /*
            Source method:
            https://en.wikipedia.org/wiki/Poisson_distribution#Random_variate_generation

            The method is aprox. O(lambda), wich means that it is very fast for
            small lambdas but very slow for higher ones.

            Todo: search a better algorithm for bigger lambdas.

        */
        let mut rng: rand::prelude::ThreadRng = rand::rng();
        let mut ret: Vec<f64> = Vec::new();
        ret.reserve_exact(n);

        let limit: f64 = (-self.lambda).exp();
        let mut p: f64;
        let mut k: f64;

        for _ in 0..n {
            p = 1.0;
            k = 0.0;
            loop {
                k += 1.0;
                let u: f64 = rng.random();
                p = p * u;

                if p <= limit {
                    break;
                }
            }
            ret.push(k - 1.0);
        }

        return ret;
    }

    fn quantile_multiple(&self, points: &[f64]) -> Vec<f64> {
        /*
                Plan:
            Same plan as in [Poisson::cdf_multiple]: walk the domain once for all
            the quantile points, computing `ln_factorial` incrementally.

            The quantile points at or above `1.0` are served with infinity
            directly: the domain is unbounded, so the accumulator may never
            reach them and the walk would not terminate.
        */

        if points.is_empty() {
            return Vec::new();
        }

        // panic if NAN is found
        for point in points {
            if point.is_nan() {
                std::panic!("Found NaN in `quantile_multiple` for Poisson. \n");
            }
        }

        let mut ret: Vec<f64> = std::vec![0.0; points.len()];
        // let bounds: (f64, f64) = domain.get_bounds();
        // We already know: `bounds = (0.0, inf)`

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

        while current_quantile_point < 0.0 {
            ret[current_index] = 0.0;
            match idx_iter.next() {
                Some(v) => current_index = v,
                None => return ret,
            }
            current_quantile_point = points[current_index];
        }

        let ln_lambda: f64 = self.lambda.ln();
        let mut ln_factorial: f64 = 0.0;
        let mut x: f64 = 0.0;
        loop {
            let inner_exp: f64 = x * ln_lambda - self.lambda - ln_factorial;
            let pmf: f64 = inner_exp.exp();

            accumulator += pmf;

            while current_quantile_point <= accumulator || 1.0 <= current_quantile_point {
                ret[current_index] = if 1.0 <= current_quantile_point {
                    f64::INFINITY
                } else {
                    x
                };
                match idx_iter.next() {
                    Some(v) => current_index = v,
                    None => return ret,
                }
                current_quantile_point = points[current_index];
            }

            x += 1.0;
            ln_factorial += x.ln();
        }
    }

    fn expected_value(&self) -> Option<f64> {
        return Some(self.lambda);
    }

    fn variance(&self) -> Option<f64> {
        return Some(self.lambda);
    }

    fn mode(&self) -> f64 {
        return self.lambda.floor();
    }
}
