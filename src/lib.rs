#[macro_use]
mod macros;

pub mod config;
pub mod constants;
pub mod error;
pub mod grid;
pub mod network;
pub mod population;
pub mod random;
pub mod reproduce;
pub mod scenario;
pub mod serialize;

pub use config::Config;
pub use error::{EdgeError, MutationError, NeatError};
pub use grid::{Grid, InputSampler};
pub use network::{Actions, Edge, Network, Node, NodeKind, Weight};
pub use population::Population;
pub use scenario::{evolve, EvolutionHooks, EvolutionTarget, Hook, Outcome, Scenario, Stats};
pub use serialize::Persist;
