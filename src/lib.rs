pub mod error;
pub mod number_theory;
pub mod params;
pub mod prime_generation;
pub mod ring;
pub mod sampling;

#[cfg(test)]
mod integration_tests;

pub use error::{Result, RlweError};
pub use number_theory::{
    is_fermat_prime, is_miller_rabin_prime, is_prime_deterministic, isqrt, mul_mod, powmod,
};
pub use params::{GaussianParams, PrimeSearchConfig, RingParams};
pub use prime_generation::{
    factor, gen_safe_prime, gen_safe_prime_with, get_prime, get_sophie_germain_prime,
    get_sophie_germain_prime_with, next_prime, MAX_PRIME_BITS,
};
pub use ring::{add, multiply, neg, reduce, scalar_mul, sub, QuotientRing};
pub use sampling::{sample_binary, sample_gaussian, sample_uniform, SecretPolynomial};
