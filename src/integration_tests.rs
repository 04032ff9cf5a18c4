/// End-to-end checks that pick parameters with the prime utilities and then
/// compute in the resulting ring, the way a caller of this crate would.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::*;

#[test]
fn test_number_theory_walkthrough() {
    let mut rng = ChaCha20Rng::seed_from_u64(0xD1CE);

    for _ in 0..25 {
        let n = rng.gen_range(2..=100_000u64);
        let b = rng.gen_range(2..=40u32);

        let factors = factor(n).unwrap();
        assert_eq!(factors.iter().product::<u64>(), n);

        // Fermat congruence with base 2 holds for every odd prime
        let fermat_2 = powmod(2, n - 1, n).unwrap();
        let exact = is_prime_deterministic(n);
        if exact && n > 2 {
            assert_eq!(fermat_2, 1);
        }

        // Neither probabilistic test ever rejects a prime
        if exact {
            assert!(is_fermat_prime(n, 16, &mut rng).unwrap());
            assert!(is_miller_rabin_prime(n, 5, &mut rng).unwrap());
        }
        assert_eq!(exact, factors.len() == 1);

        let p = next_prime(n).unwrap();
        assert!(is_prime_deterministic(p));

        let p = get_prime(b, &mut rng).unwrap();
        assert!(is_prime_deterministic(p));

        let bits = b.min(22) + 1;
        let p = get_sophie_germain_prime(bits, &mut rng).unwrap();
        assert!(is_prime_deterministic(p) && is_prime_deterministic(2 * p + 1));

        let sp = gen_safe_prime(bits, &mut rng).unwrap();
        assert!(is_prime_deterministic(sp) && is_prime_deterministic((sp - 1) / 2));
    }
}

#[test]
fn test_rlwe_sample_with_generated_modulus() {
    let mut rng = ChaCha20Rng::seed_from_u64(2718);
    let q = get_prime(30, &mut rng).unwrap() as i64;
    let ring = QuotientRing::cyclotomic(64, q).unwrap();

    let a = ring.sample_uniform(&mut rng).unwrap();
    let s = SecretPolynomial::binary(&ring, &mut rng).unwrap();
    let e = ring.sample_gaussian(&GaussianParams::default(), &mut rng).unwrap();

    // b = a * s + e, and b - a * s recovers the error exactly
    let a_s = ring.multiply(&a, s.coefficients());
    let b = ring.add(&a_s, &e);
    assert_eq!(ring.sub(&b, &a_s), e);

    // The free functions agree with the ring context
    let f = ring.params().poly_modulus().to_vec();
    assert_eq!(multiply(&a, s.coefficients(), q, &f).unwrap(), a_s);
    assert_eq!(add(&a_s, &e, q, &f).unwrap(), b);
}

#[test]
fn test_safe_prime_modulus_ring() {
    let mut rng = ChaCha20Rng::seed_from_u64(161);
    let q = gen_safe_prime(20, &mut rng).unwrap() as i64;
    let f = [1, 0, 0, 0, 0, 0, 0, 0, 1];

    let a = sample_uniform(8, q, &mut rng).unwrap();
    let b = sample_gaussian(8, q, 0.0, 2.0, &mut rng).unwrap();
    let product = multiply(&a, &b, q, &f).unwrap();
    assert_eq!(product.len(), 8);
    assert!(product.iter().all(|&c| (0..q).contains(&c)));
    assert_eq!(product, multiply(&b, &a, q, &f).unwrap());
}
