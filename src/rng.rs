//! Randomness capability injected into selection and formatting.
//!
//! The secure source is a ChaCha-based `StdRng` seeded from the operating
//! system. A weak, time-seeded fallback exists only behind an explicit
//! opt-in ([`RngPolicy::allow_weak`]) and always reports itself through
//! [`RandomSource::is_secure`].

use rand::rngs::{SmallRng, StdRng};
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{PassphraseError, Result};

/// Environment variable opting in to the weak fallback generator.
pub const ALLOW_WEAK_RNG_ENV: &str = "PWD_ALLOW_WEAK_RNG";

/// Shown to the user whenever output came from the weak generator.
pub const WEAK_RNG_WARNING: &str = "WARNING: System does not support a cryptographically secure \
     random number generator. Continuing with less-secure generator.";

/// Uniform choice over finite collections.
pub trait RandomSource {
    /// Returns an index uniformly distributed in `0..len`. `len` must be > 0.
    fn pick(&mut self, len: usize) -> usize;

    /// Fair coin flip.
    fn flip(&mut self) -> bool {
        self.pick(2) == 0
    }

    /// `false` when backed by a generator unfit for secrets.
    fn is_secure(&self) -> bool;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }

    fn flip(&mut self) -> bool {
        (**self).flip()
    }

    fn is_secure(&self) -> bool {
        (**self).is_secure()
    }
}

/// Whether falling back to a weak generator is acceptable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RngPolicy {
    pub allow_weak: bool,
}

impl RngPolicy {
    /// Reads the policy from `PWD_ALLOW_WEAK_RNG`.
    ///
    /// Any non-empty value other than `0` or `false` opts in.
    pub fn from_env() -> Self {
        let allow_weak = std::env::var(ALLOW_WEAK_RNG_ENV)
            .map(|v| {
                let v = v.trim();
                !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false")
            })
            .unwrap_or(false);
        Self { allow_weak }
    }

    /// Combines the environment policy with an explicit flag.
    pub fn with_flag(self, allow_weak: bool) -> Self {
        Self {
            allow_weak: self.allow_weak || allow_weak,
        }
    }
}

/// Process randomness, secure unless explicitly downgraded.
#[derive(Debug)]
pub enum SystemRandom {
    Secure(StdRng),
    Weak(SmallRng),
}

impl SystemRandom {
    /// Seeds a generator from the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`PassphraseError::InsecureRandomUnavailable`] when the OS
    /// source fails and `policy` does not allow the weak fallback.
    pub fn acquire(policy: RngPolicy) -> Result<Self> {
        match StdRng::try_from_os_rng() {
            Ok(rng) => Ok(SystemRandom::Secure(rng)),
            Err(e) => Self::fallback(policy, e.to_string()),
        }
    }

    pub(crate) fn fallback(policy: RngPolicy, reason: String) -> Result<Self> {
        if !policy.allow_weak {
            #[cfg(feature = "tracing")]
            tracing::error!("Secure random source unavailable: {}", reason);
            return Err(PassphraseError::InsecureRandomUnavailable(reason));
        }

        #[cfg(feature = "tracing")]
        tracing::warn!("{} ({})", WEAK_RNG_WARNING, reason);

        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
            ^ u64::from(std::process::id());
        Ok(SystemRandom::Weak(SmallRng::seed_from_u64(seed)))
    }
}

impl RandomSource for SystemRandom {
    fn pick(&mut self, len: usize) -> usize {
        match self {
            SystemRandom::Secure(rng) => rng.random_range(0..len),
            SystemRandom::Weak(rng) => rng.random_range(0..len),
        }
    }

    fn flip(&mut self) -> bool {
        match self {
            SystemRandom::Secure(rng) => rng.random_bool(0.5),
            SystemRandom::Weak(rng) => rng.random_bool(0.5),
        }
    }

    fn is_secure(&self) -> bool {
        matches!(self, SystemRandom::Secure(_))
    }
}

/// Replays a fixed script of indices, wrapping each into range.
#[cfg(test)]
pub(crate) struct ScriptedRandom {
    script: Vec<usize>,
    next: usize,
}

#[cfg(test)]
impl ScriptedRandom {
    pub(crate) fn new(script: &[usize]) -> Self {
        Self {
            script: script.to_vec(),
            next: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn pick(&mut self, len: usize) -> usize {
        let value = self.script[self.next % self.script.len()];
        self.next += 1;
        value % len
    }

    fn is_secure(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value); }
    }

    fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key); }
    }

    #[test]
    fn test_acquire_is_secure() {
        let rng = SystemRandom::acquire(RngPolicy::default()).expect("OS rng available");
        assert!(rng.is_secure());
    }

    #[test]
    fn test_pick_stays_in_range() {
        let mut rng = SystemRandom::acquire(RngPolicy::default()).unwrap();
        for len in 1..50 {
            assert!(rng.pick(len) < len);
        }
        assert_eq!(rng.pick(1), 0);
    }

    #[test]
    fn test_fallback_refused_without_opt_in() {
        let result = SystemRandom::fallback(RngPolicy::default(), "no entropy".to_string());
        match result {
            Err(PassphraseError::InsecureRandomUnavailable(reason)) => {
                assert_eq!(reason, "no entropy")
            }
            _ => panic!("Expected InsecureRandomUnavailable"),
        }
    }

    #[test]
    fn test_fallback_allowed_is_flagged_weak() {
        let mut rng = SystemRandom::fallback(RngPolicy { allow_weak: true }, "no entropy".into())
            .expect("weak fallback allowed");
        assert!(!rng.is_secure());
        assert!(rng.pick(10) < 10);
    }

    #[test]
    #[serial]
    fn test_policy_from_env() {
        remove_env(ALLOW_WEAK_RNG_ENV);
        assert!(!RngPolicy::from_env().allow_weak);

        set_env(ALLOW_WEAK_RNG_ENV, "1");
        assert!(RngPolicy::from_env().allow_weak);

        set_env(ALLOW_WEAK_RNG_ENV, "false");
        assert!(!RngPolicy::from_env().allow_weak);

        set_env(ALLOW_WEAK_RNG_ENV, "0");
        assert!(!RngPolicy::from_env().allow_weak);

        remove_env(ALLOW_WEAK_RNG_ENV);
    }

    #[test]
    fn test_policy_with_flag() {
        assert!(RngPolicy::default().with_flag(true).allow_weak);
        assert!(RngPolicy { allow_weak: true }.with_flag(false).allow_weak);
        assert!(!RngPolicy::default().with_flag(false).allow_weak);
    }
}
