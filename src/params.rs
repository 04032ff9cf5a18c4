/// Parameter sets for quotient ring arithmetic, noise sampling and prime search
///
/// Ring parameters describe the ring R_q = Z_q[X]/(f(X)) in which all RLWE
/// ring elements live. Coefficients are stored in ascending order: index `i`
/// holds the coefficient of X^i, so X^4 + 1 is written `[1, 0, 0, 0, 1]`.

use crate::error::{Result, RlweError};

/// Default mean of the discrete Gaussian error distribution
pub const DEFAULT_GAUSSIAN_MEAN: f64 = 0.0;

/// Default standard deviation of the discrete Gaussian error distribution
pub const DEFAULT_GAUSSIAN_STD_DEV: f64 = 2.0;

/// Checks that `q` is a usable coefficient modulus (q >= 1)
pub(crate) fn validate_modulus(q: i64) -> Result<()> {
    if q < 1 {
        return Err(RlweError::InvalidModulus { modulus: q });
    }
    Ok(())
}

/// Validates a modulus polynomial and strips its trailing zero coefficients
///
/// # Arguments
/// * `poly_modulus` - Coefficients of f in ascending order
///
/// # Returns
/// * `Result<&[i64]>` - The coefficients up to and including the leading one
///
/// f must be monic (leading coefficient exactly 1) and of degree at least 1.
pub(crate) fn normalize_poly_modulus(poly_modulus: &[i64]) -> Result<&[i64]> {
    let leading = match poly_modulus.iter().rposition(|&c| c != 0) {
        Some(index) => index,
        None => {
            return Err(RlweError::DegreeMismatch(
                "modulus polynomial is zero".to_string(),
            ))
        }
    };

    if leading == 0 {
        return Err(RlweError::DegreeMismatch(
            "modulus polynomial must have degree at least 1".to_string(),
        ));
    }

    if poly_modulus[leading] != 1 {
        return Err(RlweError::DegreeMismatch(format!(
            "modulus polynomial is not monic: leading coefficient {}",
            poly_modulus[leading]
        )));
    }

    Ok(&poly_modulus[..=leading])
}

/// Parameters of the quotient ring Z_q[X]/(f(X))
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingParams {
    /// Coefficient modulus q (not required to be prime)
    modulus: i64,

    /// Monic modulus polynomial f, ascending order, no trailing zeros
    poly_modulus: Vec<i64>,
}

impl RingParams {
    /// Creates ring parameters after validating q and f
    ///
    /// # Arguments
    /// * `modulus` - Coefficient modulus q, must be at least 1
    /// * `poly_modulus` - Monic modulus polynomial f of degree at least 1
    ///
    /// # Returns
    /// * `Result<Self>` - Validated parameters or `InvalidModulus` / `DegreeMismatch`
    pub fn new(modulus: i64, poly_modulus: &[i64]) -> Result<Self> {
        validate_modulus(modulus)?;
        let poly_modulus = normalize_poly_modulus(poly_modulus)?.to_vec();

        Ok(Self {
            modulus,
            poly_modulus,
        })
    }

    /// Parameters for the power-of-two cyclotomic ring Z_q[X]/(X^d + 1)
    pub fn cyclotomic(degree: usize, modulus: i64) -> Result<Self> {
        if degree < 1 {
            return Err(RlweError::InvalidDegree { degree });
        }
        validate_modulus(modulus)?;

        let mut poly_modulus = vec![0i64; degree + 1];
        poly_modulus[0] = 1;
        poly_modulus[degree] = 1;

        Ok(Self {
            modulus,
            poly_modulus,
        })
    }

    /// Ring degree d = deg(f); every reduced element has exactly d coefficients
    pub fn degree(&self) -> usize {
        self.poly_modulus.len() - 1
    }

    pub fn modulus(&self) -> i64 {
        self.modulus
    }

    pub fn poly_modulus(&self) -> &[i64] {
        &self.poly_modulus
    }

    /// Whether f is X^d + 1, which enables negacyclic reduction
    pub fn is_negacyclic(&self) -> bool {
        is_negacyclic(&self.poly_modulus)
    }
}

/// Whether a normalized modulus polynomial has the form X^d + 1
pub(crate) fn is_negacyclic(poly_modulus: &[i64]) -> bool {
    let degree = poly_modulus.len() - 1;
    poly_modulus[0] == 1
        && poly_modulus[degree] == 1
        && poly_modulus[1..degree].iter().all(|&c| c == 0)
}

/// Parameters of the discrete Gaussian used for error and secret terms
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaussianParams {
    /// Mean of the underlying normal distribution
    pub mean: f64,
    /// Standard deviation of the underlying normal distribution
    pub std_dev: f64,
}

impl GaussianParams {
    pub fn new(mean: f64, std_dev: f64) -> Result<Self> {
        let params = Self { mean, std_dev };
        params.validate()?;
        Ok(params)
    }

    /// Rejects non-finite parameters and negative standard deviations
    pub fn validate(&self) -> Result<()> {
        if !self.mean.is_finite() {
            return Err(RlweError::InvalidArgument(format!(
                "Gaussian mean must be finite, got {}",
                self.mean
            )));
        }
        if !self.std_dev.is_finite() || self.std_dev < 0.0 {
            return Err(RlweError::InvalidArgument(format!(
                "Gaussian standard deviation must be finite and non-negative, got {}",
                self.std_dev
            )));
        }
        Ok(())
    }
}

impl Default for GaussianParams {
    fn default() -> Self {
        Self {
            mean: DEFAULT_GAUSSIAN_MEAN,
            std_dev: DEFAULT_GAUSSIAN_STD_DEV,
        }
    }
}

/// Controls for the Sophie Germain / safe prime search loop
///
/// The default search is unbounded and uses only the exact primality test.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrimeSearchConfig {
    /// Maximum number of candidate primes drawn before giving up
    pub max_attempts: Option<usize>,

    /// Miller-Rabin rounds used to discard 2p + 1 before the exact test.
    /// Candidates that survive are still confirmed deterministically.
    pub prefilter_rounds: Option<u32>,
}

impl PrimeSearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_prefilter_rounds(mut self, rounds: u32) -> Self {
        self.prefilter_rounds = Some(rounds);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_params_validation() {
        let params = RingParams::new(17, &[1, 0, 0, 0, 1]).unwrap();
        assert_eq!(params.degree(), 4);
        assert_eq!(params.modulus(), 17);
        assert!(params.is_negacyclic());

        // Trailing zeros do not count towards the degree
        let params = RingParams::new(17, &[2, 0, 1, 0, 0]).unwrap();
        assert_eq!(params.degree(), 2);
        assert_eq!(params.poly_modulus(), &[2, 0, 1]);
        assert!(!params.is_negacyclic());

        assert_eq!(
            RingParams::new(0, &[1, 1]),
            Err(RlweError::InvalidModulus { modulus: 0 })
        );
        assert_eq!(
            RingParams::new(-5, &[1, 1]),
            Err(RlweError::InvalidModulus { modulus: -5 })
        );
        assert!(matches!(
            RingParams::new(17, &[3]),
            Err(RlweError::DegreeMismatch(_))
        ));
        assert!(matches!(
            RingParams::new(17, &[1, 0, 2]),
            Err(RlweError::DegreeMismatch(_))
        ));
        assert!(matches!(
            RingParams::new(17, &[]),
            Err(RlweError::DegreeMismatch(_))
        ));
        assert!(matches!(
            RingParams::new(17, &[0, 0]),
            Err(RlweError::DegreeMismatch(_))
        ));
    }

    #[test]
    fn test_cyclotomic_params() {
        let params = RingParams::cyclotomic(8, 97).unwrap();
        assert_eq!(params.degree(), 8);
        assert_eq!(params.poly_modulus(), &[1, 0, 0, 0, 0, 0, 0, 0, 1]);
        assert!(params.is_negacyclic());

        // X + 1 is the degree one cyclotomic case
        let params = RingParams::cyclotomic(1, 5).unwrap();
        assert_eq!(params.poly_modulus(), &[1, 1]);
        assert!(params.is_negacyclic());

        assert_eq!(
            RingParams::cyclotomic(0, 97),
            Err(RlweError::InvalidDegree { degree: 0 })
        );
    }

    #[test]
    fn test_gaussian_params() {
        let params = GaussianParams::default();
        assert_eq!(params.mean, 0.0);
        assert_eq!(params.std_dev, 2.0);
        assert!(params.validate().is_ok());

        assert!(GaussianParams::new(0.0, 0.0).is_ok());
        assert!(GaussianParams::new(0.0, -1.0).is_err());
        assert!(GaussianParams::new(f64::NAN, 1.0).is_err());
        assert!(GaussianParams::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_prime_search_config_builder() {
        let config = PrimeSearchConfig::new();
        assert_eq!(config.max_attempts, None);
        assert_eq!(config.prefilter_rounds, None);

        let config = config.with_max_attempts(10).with_prefilter_rounds(8);
        assert_eq!(config.max_attempts, Some(10));
        assert_eq!(config.prefilter_rounds, Some(8));
    }
}
