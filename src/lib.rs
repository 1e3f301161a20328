//! Constrained perfect phylogeny search over red-black graphs.
//!
//! A species/character 0-1 matrix becomes a [`State`] whose red-black graph
//! links species to the characters they exhibit. Realizing characters one at
//! a time either certifies a perfect phylogeny (every species eliminated) or,
//! once the backtracking [`SearchEngine`] exhausts every order its
//! [`Strategy`] proposes, proves none exists.
//! Run the Criterion benchmarks with `cargo bench`.

pub mod bench_utils;
pub mod bfs;
pub mod cleanup;
pub mod cli;
pub mod errors;
pub mod graph;
pub mod instance;
pub mod persist;
pub mod realize;
pub mod replay;
pub mod safety;
pub mod search;
pub mod state;
pub mod strategy;

pub use crate::errors::PhylogenyError;
pub use crate::graph::{AdjacencyGraph, GraphPrimitives};
pub use crate::instance::{Matrix, build_initial_state};
pub use crate::realize::{Realization, realize_character};
pub use crate::search::{SearchConfig, SearchEngine, SearchOutcome, Solution};
pub use crate::state::{CharacterId, CharacterState, Outcome, SpeciesId, State};
pub use crate::strategy::{Strategy, StrategyKind};
