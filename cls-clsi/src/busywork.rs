//! Verifiable, non-optimizable CPU busy-work.
//!
//! Consumes at least a target amount of wall-clock time by iterating a
//! key derivation where each round's output is the next round's input.
//! The chain cannot be short-circuited by the optimizer, and the final
//! key doubles as a proof-of-work digest.

use cls_common::CompileError;
use hmac::Hmac;
use md5::Md5;
use std::time::{Duration, Instant};

/// Digest length in bytes. The hex form is twice this.
pub const DIGEST_LEN: usize = 16;

/// Fixed salt for every derivation round.
const SALT: &[u8] = b"salt";

/// Run busy-work rounds until at least `target` wall-clock time has
/// elapsed, starting from the first 16 bytes of `seed` (zero-padded if
/// shorter). Always performs at least one round, so `target` of zero
/// still derives once. Over-run is bounded by the duration of a single
/// round; there is no hard upper bound.
///
/// Synchronous and CPU-bound: callers on an async runtime must isolate
/// this on the blocking pool.
pub fn run(seed: &[u8], target: Duration, iterations: u32) -> Result<[u8; DIGEST_LEN], CompileError> {
    let deadline = Instant::now() + target;

    let mut key = [0u8; DIGEST_LEN];
    let prefix = seed.len().min(DIGEST_LEN);
    key[..prefix].copy_from_slice(&seed[..prefix]);

    loop {
        let mut next = [0u8; DIGEST_LEN];
        pbkdf2::pbkdf2::<Hmac<Md5>>(&key, SALT, iterations, &mut next)
            .map_err(|e| CompileError::BusyWork(e.to_string()))?;
        key = next;

        if Instant::now() >= deadline {
            return Ok(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cheap rounds keep the tests fast; the contract is independent of
    // the iteration count.
    const TEST_ITERATIONS: u32 = 10;

    #[test]
    fn zero_target_runs_exactly_one_round() {
        let start = Instant::now();
        let a = run(b"seed", Duration::ZERO, TEST_ITERATIONS).unwrap();
        let b = run(b"seed", Duration::ZERO, TEST_ITERATIONS).unwrap();
        // One round is deterministic for a fixed seed and cost.
        assert_eq!(a, b);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn never_returns_before_the_deadline() {
        let target = Duration::from_millis(50);
        let start = Instant::now();
        run(b"seed", target, TEST_ITERATIONS).unwrap();
        assert!(start.elapsed() >= target);
    }

    #[test]
    fn different_seeds_give_different_digests() {
        let a = run(b"seed-a", Duration::ZERO, TEST_ITERATIONS).unwrap();
        let b = run(b"seed-b", Duration::ZERO, TEST_ITERATIONS).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn short_seed_is_zero_padded() {
        // A 3-byte seed and the same seed explicitly padded to 16
        // bytes must start the chain from the same key.
        let short = run(b"abc", Duration::ZERO, TEST_ITERATIONS).unwrap();
        let mut padded = [0u8; DIGEST_LEN];
        padded[..3].copy_from_slice(b"abc");
        let long = run(&padded, Duration::ZERO, TEST_ITERATIONS).unwrap();
        assert_eq!(short, long);
    }

    #[test]
    fn seed_longer_than_digest_is_truncated() {
        let a = run(b"0123456789abcdefEXTRA", Duration::ZERO, TEST_ITERATIONS).unwrap();
        let b = run(b"0123456789abcdefOTHER", Duration::ZERO, TEST_ITERATIONS).unwrap();
        assert_eq!(a, b);
    }
}
