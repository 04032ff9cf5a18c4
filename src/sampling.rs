/// Random ring element generation
///
/// Samplers for the three coefficient distributions an RLWE scheme draws
/// from: binary (secrets), uniform over Z_q (public elements) and a discrete
/// approximation of the normal distribution (errors). All randomness comes
/// from the caller-supplied generator, so a seeded generator reproduces the
/// same polynomials.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Result, RlweError};
use crate::params::{validate_modulus, GaussianParams};
use crate::ring::QuotientRing;

fn validate_degree(degree: usize) -> Result<()> {
    if degree < 1 {
        return Err(RlweError::InvalidDegree { degree });
    }
    Ok(())
}

/// Samples `degree` coefficients independently and uniformly from {0, 1}
pub fn sample_binary<R: Rng + ?Sized>(degree: usize, rng: &mut R) -> Result<Vec<i64>> {
    validate_degree(degree)?;
    Ok((0..degree).map(|_| rng.gen_range(0..2)).collect())
}

/// Samples `degree` coefficients independently and uniformly from [0, q)
pub fn sample_uniform<R: Rng + ?Sized>(degree: usize, q: i64, rng: &mut R) -> Result<Vec<i64>> {
    validate_degree(degree)?;
    validate_modulus(q)?;
    Ok((0..degree).map(|_| rng.gen_range(0..q)).collect())
}

/// Samples `degree` coefficients from Normal(mean, std_dev), reduced into [0, q)
///
/// # Arguments
/// * `degree` - Number of coefficients, at least 1
/// * `q` - Coefficient modulus, at least 1
/// * `mean` - Mean of the normal distribution
/// * `std_dev` - Standard deviation, finite and non-negative
/// * `rng` - Randomness source
///
/// # Rounding
/// Each real sample is converted to an integer by truncation toward zero,
/// not by rounding to nearest: 2.7 becomes 2 and -2.7 becomes -2. The
/// integer is then reduced modulo q, so -2 is stored as q - 2.
pub fn sample_gaussian<R: Rng + ?Sized>(
    degree: usize,
    q: i64,
    mean: f64,
    std_dev: f64,
    rng: &mut R,
) -> Result<Vec<i64>> {
    validate_degree(degree)?;
    validate_modulus(q)?;
    GaussianParams { mean, std_dev }.validate()?;

    let normal = Normal::new(mean, std_dev).map_err(|e| {
        RlweError::InvalidArgument(format!("Invalid Gaussian parameters: {}", e))
    })?;

    Ok((0..degree)
        .map(|_| (normal.sample(&mut *rng) as i64).rem_euclid(q))
        .collect())
}

/// A sampled secret polynomial whose coefficients are wiped on drop
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretPolynomial {
    coefficients: Vec<i64>,
}

impl SecretPolynomial {
    pub fn new(coefficients: Vec<i64>) -> Self {
        Self { coefficients }
    }

    /// Binary secret with coefficients in {0, 1}
    pub fn binary<R: Rng + ?Sized>(ring: &QuotientRing, rng: &mut R) -> Result<Self> {
        Ok(Self::new(sample_binary(ring.degree(), rng)?))
    }

    /// Secret drawn from the discrete Gaussian of `params`
    pub fn gaussian<R: Rng + ?Sized>(
        ring: &QuotientRing,
        params: &GaussianParams,
        rng: &mut R,
    ) -> Result<Self> {
        Ok(Self::new(ring.sample_gaussian(params, rng)?))
    }

    pub fn coefficients(&self) -> &[i64] {
        &self.coefficients
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }
}

impl std::fmt::Debug for SecretPolynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretPolynomial")
            .field("len", &self.coefficients.len())
            .finish_non_exhaustive()
    }
}

impl QuotientRing {
    /// Element with coefficients uniform in {0, 1}
    pub fn sample_binary<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<i64>> {
        sample_binary(self.degree(), rng)
    }

    /// Element with coefficients uniform in [0, q)
    pub fn sample_uniform<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<i64>> {
        sample_uniform(self.degree(), self.modulus(), rng)
    }

    /// Error element drawn from the discrete Gaussian of `params`
    pub fn sample_gaussian<R: Rng + ?Sized>(
        &self,
        params: &GaussianParams,
        rng: &mut R,
    ) -> Result<Vec<i64>> {
        sample_gaussian(self.degree(), self.modulus(), params.mean, params.std_dev, rng)
    }
}
