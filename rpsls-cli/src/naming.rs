//! Computer opponent names

use rand::seq::SliceRandom;
use rand::Rng;

/// Names the computer plays under
pub const COMPUTER_NAMES: [&str; 5] = ["R2D2", "Hal", "Chappie", "Sonny", "Number 5"];

/// Pick a computer name at random, never the human's own name
pub fn computer_name<R: Rng>(rng: &mut R, human_name: &str) -> &'static str {
    let human_name = human_name.trim();
    let candidates: Vec<&'static str> = COMPUTER_NAMES
        .iter()
        .copied()
        .filter(|name| *name != human_name)
        .collect();

    // At most one name is excluded, so candidates is never empty
    candidates.choose(rng).copied().unwrap_or(COMPUTER_NAMES[0])
}
