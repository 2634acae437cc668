//! Tie-break strategies for intent selection.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks among equally ranked intents. Only consulted with two or more
/// candidates.
pub trait IntentChooser: Send {
    fn choose(&mut self, candidates: usize) -> usize;
}

/// Reproducible choice: the same seed replays the same picks.
#[derive(Debug, Clone)]
pub struct SeededChooser {
    rng: StdRng,
}

impl SeededChooser {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(u64::from(seed)),
        }
    }
}

impl IntentChooser for SeededChooser {
    fn choose(&mut self, candidates: usize) -> usize {
        if candidates <= 1 {
            return 0;
        }
        self.rng.gen_range(0..candidates)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomChooser;

impl IntentChooser for RandomChooser {
    fn choose(&mut self, candidates: usize) -> usize {
        if candidates <= 1 {
            return 0;
        }
        rand::thread_rng().gen_range(0..candidates)
    }
}

/// Always the first tied intent in declaration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstChooser;

impl IntentChooser for FirstChooser {
    fn choose(&mut self, _candidates: usize) -> usize {
        0
    }
}
