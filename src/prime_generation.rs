/// Prime search, generation and factorization
///
/// These routines pick cryptographic moduli: random primes of a given bit
/// length, Sophie Germain primes p (2p + 1 also prime), safe primes
/// 2p + 1, and small trial-division factorizations. Every value returned
/// by a generator has passed [`is_prime_deterministic`]; Miller-Rabin is only
/// consulted when the caller asks for it through
/// [`PrimeSearchConfig::prefilter_rounds`], and then only to discard
/// candidates early.

use rand::Rng;
use tracing::{debug, trace, warn};

use crate::error::{Result, RlweError};
use crate::number_theory::{is_miller_rabin_prime, is_prime_deterministic};
use crate::params::PrimeSearchConfig;

/// Largest bit length accepted by [`get_prime`]; the draw range [2^(b-1), 2^b] must fit in a u64
pub const MAX_PRIME_BITS: u32 = 63;

fn checked_step(value: u64, step: u64) -> Result<u64> {
    value.checked_add(step).ok_or_else(|| {
        RlweError::InvalidArgument(format!("no prime above {} fits in 64 bits", value))
    })
}

/// Smallest prime strictly greater than `n`
///
/// Walks only the candidates 6k + 5 and 6k + 1 (in increasing order) after
/// aligning `n` to that lattice, testing each with the exact test.
///
/// # Errors
/// `InvalidArgument` if the search would pass `u64::MAX`.
pub fn next_prime(n: u64) -> Result<u64> {
    if n == 0 {
        return Ok(2);
    }
    if n < 3 {
        return Ok(n + 1);
    }

    // p is aligned to 6k + 5; p + 2 is the following 6k + 1
    let mut p = match n % 6 {
        0 => {
            let candidate = checked_step(n, 1)?;
            if is_prime_deterministic(candidate) {
                return Ok(candidate);
            }
            checked_step(n, 5)?
        }
        5 => {
            let candidate = checked_step(n, 2)?;
            if is_prime_deterministic(candidate) {
                return Ok(candidate);
            }
            checked_step(n, 6)?
        }
        r => checked_step(n, 5 - r)?,
    };

    loop {
        if is_prime_deterministic(p) {
            return Ok(p);
        }
        let candidate = checked_step(p, 2)?;
        if is_prime_deterministic(candidate) {
            return Ok(candidate);
        }
        p = checked_step(p, 6)?;
    }
}

/// Random prime of roughly `bits` bits
///
/// Draws n uniformly from [2^(bits-1), 2^bits] and returns `next_prime(n)`.
/// The result has `bits` bits, or `bits + 1` when the search crosses 2^bits.
///
/// # Errors
/// `InvalidArgument` unless 2 <= bits <= 63.
pub fn get_prime<R: Rng + ?Sized>(bits: u32, rng: &mut R) -> Result<u64> {
    if !(2..=MAX_PRIME_BITS).contains(&bits) {
        return Err(RlweError::InvalidArgument(format!(
            "prime bit length must be in [2, {}], got {}",
            MAX_PRIME_BITS, bits
        )));
    }

    let low = 1u64 << (bits - 1);
    let high = 1u64 << bits;
    let n = rng.gen_range(low..=high);
    let p = next_prime(n)?;
    trace!(bits, start = n, prime = p, "generated prime");
    Ok(p)
}

/// Draws primes p of `bits - 1` bits until 2p + 1 is prime; returns (p, 2p + 1)
fn search_germain_pair<R: Rng + ?Sized>(
    bits: u32,
    config: &PrimeSearchConfig,
    rng: &mut R,
) -> Result<(u64, u64)> {
    if !(3..=MAX_PRIME_BITS).contains(&bits) {
        return Err(RlweError::InvalidArgument(format!(
            "Sophie Germain search bit length must be in [3, {}], got {}",
            MAX_PRIME_BITS, bits
        )));
    }

    let mut attempts = 0usize;
    loop {
        if let Some(max_attempts) = config.max_attempts {
            if attempts >= max_attempts {
                warn!(bits, attempts, "Sophie Germain search exhausted");
                return Err(RlweError::SearchExhausted { attempts });
            }
        }
        attempts += 1;

        let p = get_prime(bits - 1, rng)?;
        let safe = p
            .checked_mul(2)
            .and_then(|doubled| doubled.checked_add(1))
            .ok_or_else(|| RlweError::InvalidArgument(format!("2 * {} + 1 overflows", p)))?;

        if let Some(rounds) = config.prefilter_rounds {
            if !is_miller_rabin_prime(safe, rounds, rng)? {
                continue;
            }
        }

        if is_prime_deterministic(safe) {
            debug!(bits, attempts, p, safe, "found Sophie Germain prime");
            return Ok((p, safe));
        }
    }
}

/// Sophie Germain prime p, drawn via `get_prime(bits - 1)`, with 2p + 1 prime
///
/// The search is unbounded; see [`get_sophie_germain_prime_with`] for a cap.
pub fn get_sophie_germain_prime<R: Rng + ?Sized>(bits: u32, rng: &mut R) -> Result<u64> {
    get_sophie_germain_prime_with(bits, &PrimeSearchConfig::default(), rng)
}

/// [`get_sophie_germain_prime`] with explicit search controls
///
/// # Errors
/// `InvalidArgument` unless 3 <= bits <= 63, `SearchExhausted` once
/// `config.max_attempts` candidates have been rejected.
pub fn get_sophie_germain_prime_with<R: Rng + ?Sized>(
    bits: u32,
    config: &PrimeSearchConfig,
    rng: &mut R,
) -> Result<u64> {
    search_germain_pair(bits, config, rng).map(|(p, _)| p)
}

/// Safe prime 2p + 1 where p is a Sophie Germain prime of `bits - 1` bits
pub fn gen_safe_prime<R: Rng + ?Sized>(bits: u32, rng: &mut R) -> Result<u64> {
    gen_safe_prime_with(bits, &PrimeSearchConfig::default(), rng)
}

/// [`gen_safe_prime`] with explicit search controls
pub fn gen_safe_prime_with<R: Rng + ?Sized>(
    bits: u32,
    config: &PrimeSearchConfig,
    rng: &mut R,
) -> Result<u64> {
    search_germain_pair(bits, config, rng).map(|(_, safe)| safe)
}

/// Prime factorization by trial division, in non-decreasing order with multiplicity
///
/// Trial divisors step through the primes with [`next_prime`]. Once p^2
/// exceeds the remaining cofactor that cofactor is prime and is appended
/// directly. `factor(1)` is empty.
///
/// # Errors
/// `InvalidArgument` for n = 0.
pub fn factor(n: u64) -> Result<Vec<u64>> {
    if n == 0 {
        return Err(RlweError::InvalidArgument(
            "cannot factor zero".to_string(),
        ));
    }

    let mut remaining = n;
    let mut factors = Vec::new();
    let mut p = 2u64;
    while remaining != 1 {
        if p as u128 * p as u128 > remaining as u128 {
            factors.push(remaining);
            break;
        }
        while remaining % p == 0 {
            factors.push(p);
            remaining /= p;
        }
        p = next_prime(p)?;
    }

    Ok(factors)
}
