/// Modular exponentiation and primality testing
///
/// Three primality tests are provided at different trust levels:
/// - [`is_prime_deterministic`]: exact 6k ± 1 trial division, O(sqrt(p))
/// - [`is_fermat_prime`]: probable-prime test, fooled by Carmichael numbers
/// - [`is_miller_rabin_prime`]: probable-prime test with error at most 4^(-k)
///
/// Only the first one certifies primality. The other two report "probably
/// prime" and are never used implicitly by the prime generators.

use rand::Rng;

use crate::error::{Result, RlweError};

/// Modular multiplication with a 128-bit intermediate product
#[inline]
pub fn mul_mod(a: u64, b: u64, modulus: u64) -> u64 {
    ((a as u128 * b as u128) % modulus as u128) as u64
}

/// Integer square root, floor(sqrt(n))
pub fn isqrt(n: u64) -> u64 {
    let mut root = (n as f64).sqrt() as u64;
    while root as u128 * root as u128 > n as u128 {
        root -= 1;
    }
    while (root as u128 + 1) * (root as u128 + 1) <= n as u128 {
        root += 1;
    }
    root
}

/// Right-to-left binary modular exponentiation, a^b mod m
///
/// # Arguments
/// * `base` - Base a
/// * `exponent` - Exponent b, b = 0 yields 1
/// * `modulus` - Modulus m
///
/// # Errors
/// `InvalidModulus` for m = 0 and `DegenerateModulus` for m = 1.
pub fn powmod(base: u64, exponent: u64, modulus: u64) -> Result<u64> {
    if modulus == 0 {
        return Err(RlweError::InvalidModulus { modulus: 0 });
    }
    if modulus == 1 {
        return Err(RlweError::DegenerateModulus);
    }

    let mut base = base % modulus;
    if base == 1 {
        return Ok(1);
    }

    let mut exponent = exponent;
    let mut result = 1u64;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = mul_mod(result, base, modulus);
        }
        base = mul_mod(base, base, modulus);
        exponent >>= 1;
    }

    Ok(result)
}

/// Exact primality test by trial division over candidates 6k ± 1
///
/// Every prime above 3 is of the form 6k ± 1, so after ruling out 2 and 3
/// only those divisors up to floor(sqrt(p)) are tried. Returns false for
/// 0 and 1.
pub fn is_prime_deterministic(p: u64) -> bool {
    if p <= 3 {
        return p > 1;
    }
    if p % 2 == 0 || p % 3 == 0 {
        return false;
    }

    let limit = isqrt(p);
    let mut i = 5u64;
    while i <= limit {
        if p % i == 0 || p % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }

    true
}

fn validate_primality_input(p: u64, iterations: u32) -> Result<()> {
    if p < 2 {
        return Err(RlweError::InvalidArgument(format!(
            "primality test input must be at least 2, got {}",
            p
        )));
    }
    if iterations == 0 {
        return Err(RlweError::InvalidArgument(
            "primality test needs at least one iteration".to_string(),
        ));
    }
    Ok(())
}

/// Fermat probable-prime test
///
/// Draws `iterations` bases a uniformly from [2, p - 1] and checks
/// a^(p-1) = 1 mod p. A false result proves p composite; a true result only
/// means "probably prime". Carmichael numbers such as 561 satisfy the
/// congruence for every base coprime to them, so this test gives no error
/// bound for them.
///
/// # Errors
/// `InvalidArgument` if p < 2 or `iterations` is 0.
pub fn is_fermat_prime<R: Rng + ?Sized>(p: u64, iterations: u32, rng: &mut R) -> Result<bool> {
    validate_primality_input(p, iterations)?;
    // No base exists in [2, p - 1]
    if p == 2 {
        return Ok(true);
    }

    for _ in 0..iterations {
        let a = rng.gen_range(2..=p - 1);
        if powmod(a, p - 1, p)? != 1 {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Miller-Rabin probable-prime test
///
/// Writes p - 1 = 2^s * d with d odd and, for each of `iterations` random
/// bases a in [2, p - 1], accepts the base if a^d = 1 or a^(d * 2^j) = p - 1
/// for some 0 <= j < s. A composite survives all rounds with probability at
/// most 4^(-iterations). Inputs below 4 are decided exactly.
///
/// # Errors
/// `InvalidArgument` if p < 2 or `iterations` is 0.
pub fn is_miller_rabin_prime<R: Rng + ?Sized>(
    p: u64,
    iterations: u32,
    rng: &mut R,
) -> Result<bool> {
    validate_primality_input(p, iterations)?;
    if p < 4 {
        return Ok(true);
    }
    if p % 2 == 0 {
        return Ok(false);
    }

    let mut s = 0u32;
    let mut d = p - 1;
    while d % 2 == 0 {
        s += 1;
        d /= 2;
    }

    'witness: for _ in 0..iterations {
        let a = rng.gen_range(2..=p - 1);
        let mut x = powmod(a, d, p)?;
        if x == 1 {
            continue;
        }

        for _ in 0..s {
            if x == p - 1 {
                continue 'witness;
            }
            x = mul_mod(x, x, p);
        }

        return Ok(false);
    }

    Ok(true)
}
