//! RNG module - item pools without immediate repetition
//!
//! Every mini-game presents items from a static catalog. [`ItemPool`] draws
//! uniformly at random from the items not yet presented; once every item has
//! been shown, the pool is refilled from the full catalog so a session never
//! stalls on exhaustion.
//!
//! Also provides a simple LCG so sessions are reproducible from a seed.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max).
    ///
    /// Uses the high bits of the LCG output; the low bits of a power-of-two
    /// modulus LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Uniform float in [0, 1).
    pub fn next_unit(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current RNG state (seeds a replacement session with the same stream).
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Candidate items not yet presented in the current session.
#[derive(Debug, Clone)]
pub struct ItemPool<T> {
    catalog: Vec<T>,
    remaining: Vec<T>,
    rng: SimpleRng,
    refills: u32,
}

impl<T: Clone> ItemPool<T> {
    /// Create a full pool over `catalog`.
    pub fn new(catalog: impl Into<Vec<T>>, seed: u32) -> Self {
        let catalog = catalog.into();
        Self {
            remaining: catalog.clone(),
            catalog,
            rng: SimpleRng::new(seed),
            refills: 0,
        }
    }

    /// Make every catalog item eligible again.
    pub fn refill(&mut self) {
        self.remaining.clear();
        self.remaining.extend(self.catalog.iter().cloned());
        self.refills = self.refills.wrapping_add(1);
    }

    /// Draw one item uniformly from the remaining pool.
    ///
    /// An empty pool is refilled from the catalog first. Returns `None` only
    /// when the catalog itself is empty.
    pub fn draw(&mut self) -> Option<T> {
        if self.remaining.is_empty() {
            if self.catalog.is_empty() {
                return None;
            }
            log::debug!("item pool exhausted, refilling {} items", self.catalog.len());
            self.refill();
        }
        let idx = self.rng.next_range(self.remaining.len() as u32) as usize;
        Some(self.remaining.swap_remove(idx))
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn catalog(&self) -> &[T] {
        &self.catalog
    }

    /// Number of refills since creation (the initial fill is not counted).
    pub fn refills(&self) -> u32 {
        self.refills
    }

    pub fn rng_mut(&mut self) -> &mut SimpleRng {
        &mut self.rng
    }
}
