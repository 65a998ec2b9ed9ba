//! Core of a stochastic fire-spread cellular automaton on a square grid.
//!
//! Main components:
//! - [`rules`] — pure grid operations: neighbor counting, the probabilistic
//!   transition, toggling, randomizing and clearing.
//! - [`engine`] — [`engine::SimulationEngine`], owning the grid pair and
//!   the generation counter.
//! - [`grid`] — the co-indexed square buffers (cells, ages, neighbor counts).
//! - [`config`] — step parameters and reference constants.
//! - [`error`] — parameter validation errors.
//! - [`types`] — shared type aliases.

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod rules;
pub mod types;
