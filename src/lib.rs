// ============================================
// src/lib.rs
// Content sequencer for Spanish practice drills
// ============================================

pub mod cli;
pub mod drills;
pub mod error;
pub mod filter;
pub mod loader;
pub mod logging;
pub mod questions;
pub mod rng;
pub mod sampler;
pub mod session;
pub mod verbs;

pub use error::{ContentError, SequencerError, SequencerResult};
pub use filter::{Combo, ComboPools, ConstraintFilter, DEFAULT_MAX_ATTEMPTS, Rule, RuleSet};
pub use rng::RandomSource;
pub use sampler::NonRepeatingSampler;
pub use session::{Draw, Session};
