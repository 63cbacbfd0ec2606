// handlers/mod.rs - Handler tiers
//
// Public (no auth) → Protected (bearer token required)
pub mod public;    // Tier 1: service info and health
pub mod protected; // Tier 2: the log resource

pub use public::*;
pub use protected::*;
