//! Shared test doubles for the Scavenge hunt platform.

mod clock;
mod rng;
mod store;

pub use clock::FixedClock;
pub use rng::{MockRng, SequenceRng};
pub use store::FailingHuntStore;
