//! Deterministic seeded shuffle for the "random" sort mode.

/// Fisher–Yates shuffle driven by a seeded linear-congruential generator.
///
/// The same list contents and seed always yield the same permutation; the
/// input is never mutated. The externally-held seed is a float in
/// `[0, 1)` and is scaled by 1000 before seeding the generator, which
/// keeps the source's fractional entropy inside the LCG's integer domain.
#[must_use]
pub fn shuffle<T: Clone>(items: &[T], seed: f64) -> Vec<T> {
    let mut shuffled = items.to_vec();
    let mut rng = Lcg::new(seed * 1000.0);
    for i in (1..shuffled.len()).rev() {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let j = (rng.next() * (i as f64 + 1.0)).floor() as usize;
        shuffled.swap(i, j);
    }
    shuffled
}

/// The classic `(s * 9301 + 49297) mod 233280` generator, run over `f64`
/// so a fractional seed keeps contributing to the sequence.
struct Lcg {
    state: f64,
}

impl Lcg {
    fn new(state: f64) -> Self {
        Self { state }
    }

    /// Next draw in `[0, 1)`.
    fn next(&mut self) -> f64 {
        self.state = (self.state * 9301.0 + 49297.0) % 233_280.0;
        self.state / 233_280.0
    }
}
