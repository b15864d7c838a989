use rand::Rng;
use rand::seq::SliceRandom;

/// One prompt of a choice game: the stimulus to find and the options shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub target: usize,
    pub candidates: Vec<usize>,
}

impl Round {
    /// Position of the target among the shown candidates
    pub fn target_position(&self) -> usize {
        self.candidates
            .iter()
            .position(|&c| c == self.target)
            .unwrap_or(0)
    }
}

/// Draws a target from `0..pool_size` and fills up to `count` distinct candidates
///
/// The target is drawn first, extras are rejection-sampled against the ones
/// already chosen, then the whole set is shuffled. `count` is clamped to the
/// pool size.
pub fn generate_round<R: Rng + ?Sized>(rng: &mut R, pool_size: usize, count: usize) -> Round {
    let count = count.clamp(1, pool_size.max(1));
    let target = rng.gen_range(0..pool_size.max(1));
    let mut candidates = Vec::with_capacity(count);
    candidates.push(target);

    while candidates.len() < count {
        let drawn = rng.gen_range(0..pool_size);
        if !candidates.contains(&drawn) {
            candidates.push(drawn);
        }
    }

    candidates.shuffle(rng);
    Round { target, candidates }
}
