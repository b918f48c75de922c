//! # fasim
//!
//! A finite automata simulator.
//!
//! This library provides functionality to:
//! - Build deterministic and non-deterministic automata, with or without epsilon transitions,
//!   over free form state labels
//! - Compute epsilon closures of sets of states
//! - Decide whether an automaton accepts a string, by subset simulation or, for deterministic
//!   automata, by following a single path
//! - Validate automata built from untrusted input and drive the construction interactively
//! - Print, export and visualize the automaton

// Re-export the modules
pub mod automaton;
pub mod builder;
pub mod demo;
pub mod dfa;
pub mod fa;
pub mod nfa;
pub mod session;
pub mod visualizer;

// Re-export commonly used types and functions for convenience
pub use automaton::Automaton;
pub use builder::{BuildError, Builder};
pub use fa::{Symbol, FA};
pub use nfa::TraceStep;
pub use session::Session;
pub use visualizer::visualize;
