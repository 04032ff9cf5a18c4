/// Arithmetic in the polynomial quotient ring R_q = Z_q[X]/(f(X))
///
/// f is any monic polynomial of degree d >= 1 and q any modulus >= 1; q does
/// not need to be prime. Polynomials are coefficient slices in ascending order
/// (index `i` holds the coefficient of X^i) and may be longer or shorter than
/// d on input. Every result has exactly d coefficients, each in [0, q).
///
/// Reduction modulo f is exact polynomial long division over Z_q. Because f is
/// monic no inverses are needed, and reducing coefficients modulo q before the
/// division gives the same residue as dividing over Z first. For the
/// cyclotomic case f = X^d + 1 the negacyclic rule X^(d+k) = -X^k is used
/// instead, which agrees with the long division (see the tests below).

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::trace;

use crate::error::Result;
use crate::params::{is_negacyclic, normalize_poly_modulus, validate_modulus, RingParams};

/// Output length above which convolution coefficients are computed in parallel
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 512;

/// Reduces an integer into [0, q)
#[inline]
fn mod_q(value: i128, q: i64) -> i64 {
    value.rem_euclid(q as i128) as i64
}

/// Reduces `a` modulo f, then every coefficient modulo q
///
/// # Arguments
/// * `a` - Input polynomial of any length
/// * `q` - Coefficient modulus, at least 1
/// * `f` - Monic modulus polynomial of degree d >= 1
///
/// # Returns
/// * `Result<Vec<i64>>` - Exactly d coefficients in [0, q)
///
/// # Errors
/// `InvalidModulus` if q < 1, `DegreeMismatch` if f is constant or not monic.
pub fn reduce(a: &[i64], q: i64, f: &[i64]) -> Result<Vec<i64>> {
    validate_modulus(q)?;
    let f = normalize_poly_modulus(f)?;
    let coeffs = a.iter().map(|&c| mod_q(c as i128, q)).collect();
    Ok(reduce_residues(coeffs, q, f))
}

/// Coefficient-wise sum of `a` and `b` followed by [`reduce`]
///
/// Missing high-degree coefficients of the shorter operand count as zero.
pub fn add(a: &[i64], b: &[i64], q: i64, f: &[i64]) -> Result<Vec<i64>> {
    validate_modulus(q)?;
    let f = normalize_poly_modulus(f)?;
    Ok(reduce_residues(add_coefficients(a, b, q), q, f))
}

/// Coefficient-wise difference `a - b` followed by [`reduce`]
pub fn sub(a: &[i64], b: &[i64], q: i64, f: &[i64]) -> Result<Vec<i64>> {
    validate_modulus(q)?;
    let f = normalize_poly_modulus(f)?;
    Ok(reduce_residues(sub_coefficients(a, b, q), q, f))
}

/// Additive inverse of `a` in the ring
pub fn neg(a: &[i64], q: i64, f: &[i64]) -> Result<Vec<i64>> {
    sub(&[], a, q, f)
}

/// Multiplies every coefficient of `a` by `scalar`, then reduces
pub fn scalar_mul(a: &[i64], scalar: i64, q: i64, f: &[i64]) -> Result<Vec<i64>> {
    validate_modulus(q)?;
    let f = normalize_poly_modulus(f)?;
    Ok(reduce_residues(scale_coefficients(a, scalar, q), q, f))
}

/// Full convolution of `a` and `b` followed by [`reduce`]
///
/// Uses the O(len(a) * len(b)) schoolbook convolution. The result is exactly
/// the integer product reduced modulo f and q, independent of the
/// coefficient magnitudes of the inputs.
pub fn multiply(a: &[i64], b: &[i64], q: i64, f: &[i64]) -> Result<Vec<i64>> {
    validate_modulus(q)?;
    let f = normalize_poly_modulus(f)?;
    Ok(reduce_residues(convolve(a, b, q), q, f))
}

fn add_coefficients(a: &[i64], b: &[i64], q: i64) -> Vec<i64> {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0) as i128;
            let y = b.get(i).copied().unwrap_or(0) as i128;
            mod_q(x + y, q)
        })
        .collect()
}

fn sub_coefficients(a: &[i64], b: &[i64], q: i64) -> Vec<i64> {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0) as i128;
            let y = b.get(i).copied().unwrap_or(0) as i128;
            mod_q(x - y, q)
        })
        .collect()
}

fn scale_coefficients(a: &[i64], scalar: i64, q: i64) -> Vec<i64> {
    let scalar = mod_q(scalar as i128, q) as i128;
    a.iter()
        .map(|&c| mod_q(mod_q(c as i128, q) as i128 * scalar, q))
        .collect()
}

/// Convolution of `a` and `b` with every coefficient taken modulo q
///
/// Operands are first brought into [0, q) so that each partial product fits in
/// an i128 and is reduced before accumulation.
fn convolve(a: &[i64], b: &[i64], q: i64) -> Vec<i64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let a: Vec<i64> = a.iter().map(|&c| mod_q(c as i128, q)).collect();
    let b: Vec<i64> = b.iter().map(|&c| mod_q(c as i128, q)).collect();
    let out_len = a.len() + b.len() - 1;

    let coefficient = |k: usize| -> i64 {
        let start = k.saturating_sub(b.len() - 1);
        let end = k.min(a.len() - 1);
        let mut acc: i128 = 0;
        for i in start..=end {
            acc = (acc + (a[i] as i128 * b[k - i] as i128) % q as i128) % q as i128;
        }
        acc as i64
    };

    #[cfg(feature = "parallel")]
    {
        if out_len >= PARALLEL_THRESHOLD {
            return (0..out_len).into_par_iter().map(coefficient).collect();
        }
    }

    (0..out_len).map(coefficient).collect()
}

/// Reduces coefficients already in [0, q) modulo a normalized f
fn reduce_residues(coeffs: Vec<i64>, q: i64, f: &[i64]) -> Vec<i64> {
    if is_negacyclic(f) {
        trace!(degree = f.len() - 1, len = coeffs.len(), "negacyclic reduction");
        negacyclic_reduce(coeffs, q, f.len() - 1)
    } else {
        trace!(degree = f.len() - 1, len = coeffs.len(), "long division reduction");
        long_division_reduce(coeffs, q, f)
    }
}

/// Remainder of long division by a monic f, computed over Z_q
fn long_division_reduce(mut coeffs: Vec<i64>, q: i64, f: &[i64]) -> Vec<i64> {
    let degree = f.len() - 1;
    let f: Vec<i64> = f.iter().map(|&c| mod_q(c as i128, q)).collect();

    if coeffs.len() < degree {
        coeffs.resize(degree, 0);
    }

    for top in (degree..coeffs.len()).rev() {
        let lead = coeffs[top];
        if lead == 0 {
            continue;
        }
        // Subtract lead * X^(top - d) * f; the leading term cancels exactly
        let shift = top - degree;
        for (j, &fj) in f[..degree].iter().enumerate() {
            let term = lead as i128 * fj as i128;
            coeffs[shift + j] = mod_q(coeffs[shift + j] as i128 - term, q);
        }
        coeffs[top] = 0;
    }

    coeffs.truncate(degree);
    coeffs
}

/// Reduction modulo X^d + 1 using X^(d+k) = -X^k
fn negacyclic_reduce(coeffs: Vec<i64>, q: i64, degree: usize) -> Vec<i64> {
    let mut result = vec![0i64; degree];
    for (i, &c) in coeffs.iter().enumerate() {
        let k = i % degree;
        let folded = if (i / degree) % 2 == 0 {
            result[k] as i128 + c as i128
        } else {
            result[k] as i128 - c as i128
        };
        result[k] = mod_q(folded, q);
    }
    result
}

/// The quotient ring Z_q[X]/(f(X)) for a fixed, pre-validated (q, f)
///
/// Equivalent to calling the free functions with the same q and f, without
/// validating f on every call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuotientRing {
    params: RingParams,
}

impl QuotientRing {
    pub fn new(params: RingParams) -> Self {
        Self { params }
    }

    /// The ring Z_q[X]/(X^d + 1)
    pub fn cyclotomic(degree: usize, modulus: i64) -> Result<Self> {
        Ok(Self::new(RingParams::cyclotomic(degree, modulus)?))
    }

    pub fn params(&self) -> &RingParams {
        &self.params
    }

    pub fn degree(&self) -> usize {
        self.params.degree()
    }

    pub fn modulus(&self) -> i64 {
        self.params.modulus()
    }

    pub fn zero(&self) -> Vec<i64> {
        vec![0; self.degree()]
    }

    pub fn one(&self) -> Vec<i64> {
        self.reduce(&[1])
    }

    pub fn reduce(&self, a: &[i64]) -> Vec<i64> {
        let q = self.modulus();
        let coeffs = a.iter().map(|&c| mod_q(c as i128, q)).collect();
        reduce_residues(coeffs, q, self.params.poly_modulus())
    }

    pub fn add(&self, a: &[i64], b: &[i64]) -> Vec<i64> {
        let q = self.modulus();
        reduce_residues(add_coefficients(a, b, q), q, self.params.poly_modulus())
    }

    pub fn sub(&self, a: &[i64], b: &[i64]) -> Vec<i64> {
        let q = self.modulus();
        reduce_residues(sub_coefficients(a, b, q), q, self.params.poly_modulus())
    }

    pub fn neg(&self, a: &[i64]) -> Vec<i64> {
        self.sub(&[], a)
    }

    pub fn scalar_mul(&self, a: &[i64], scalar: i64) -> Vec<i64> {
        let q = self.modulus();
        reduce_residues(scale_coefficients(a, scalar, q), q, self.params.poly_modulus())
    }

    pub fn multiply(&self, a: &[i64], b: &[i64]) -> Vec<i64> {
        let q = self.modulus();
        reduce_residues(convolve(a, b, q), q, self.params.poly_modulus())
    }
}
