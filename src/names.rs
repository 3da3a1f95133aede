//! Display-name generation
//!
//! Produces a fresh display name per connection. Names are unique-enough for
//! chat display; collisions are tolerated, not an error.

use rand::seq::SliceRandom;
use rand::Rng;

const ADJECTIVES: &[&str] = &[
    "amber", "bold", "brisk", "calm", "clever", "eager", "fuzzy", "gentle",
    "jolly", "keen", "lively", "merry", "nimble", "quiet", "rapid", "sly",
    "sunny", "swift", "vivid", "witty",
];

const ANIMALS: &[&str] = &[
    "badger", "crane", "dolphin", "falcon", "gecko", "heron", "ibex",
    "jackal", "koala", "lynx", "marten", "newt", "otter", "panda", "raven",
    "seal", "tapir", "viper", "walrus", "yak",
];

/// Display-name generator
///
/// Stateless; every call draws a fresh adjective-animal pair plus a
/// two-digit suffix from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameGenerator;

impl NameGenerator {
    /// Create a new name generator
    pub fn new() -> Self {
        Self
    }

    /// Generate a display name, e.g. `brisk_otter42`
    pub fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        // choose() is None only on an empty slice; both lists are non-empty
        let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("plain");
        let animal = ANIMALS.choose(&mut rng).copied().unwrap_or("cat");
        format!("{}_{}{:02}", adjective, animal, rng.gen_range(0..100))
    }
}
