//! Session RNG plumbing: domain-separated streams with draw counters.

use hmac::{Hmac, Mac};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sha2::Sha256;
use std::cell::{RefCell, RefMut};

/// Deterministic bundle of RNG streams segregated by game domain.
///
/// Pack draws and quiz rewards consume independent streams, so opening an
/// extra pack can never shift which cards a later quiz pays out for the
/// same user seed.
#[derive(Debug, Clone)]
pub struct RngStreams {
    pack: RefCell<CountingRng<SmallRng>>,
    quiz: RefCell<CountingRng<SmallRng>>,
}

impl RngStreams {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        let pack = CountingRng::new(derive_stream_seed(seed, b"pack"));
        let quiz = CountingRng::new(derive_stream_seed(seed, b"quiz"));
        Self {
            pack: RefCell::new(pack),
            quiz: RefCell::new(quiz),
        }
    }

    /// Construct the bundle from OS entropy for a non-reproducible session.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            pack: RefCell::new(CountingRng::fresh()),
            quiz: RefCell::new(CountingRng::fresh()),
        }
    }

    /// Access the pack-opening RNG stream.
    #[must_use]
    pub fn pack(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.pack.borrow_mut()
    }

    /// Access the quiz-reward RNG stream.
    #[must_use]
    pub fn quiz(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.quiz.borrow_mut()
    }
}

impl Default for RngStreams {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<SmallRng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            draws: 0,
        }
    }

    fn fresh() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
            draws: 0,
        }
    }
}

impl<R: rand::RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: rand::RngCore> rand::RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()).expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let seed_bytes: [u8; 8] = digest[..8].try_into().expect("digest slice length");
    u64::from_le_bytes(seed_bytes)
}
