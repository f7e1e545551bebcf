//! Fitness evaluation for stack-machine genomes.
//!
//! [`score`] runs every genome over the cases of a regression task on a
//! small bounded stack machine and returns one fitness in (0, 1] per genome.
//! Faulty genomes never raise; they score at a fixed floor.

pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod types;

pub use engines::evaluation::{score, FitnessEvaluator, Outcome};
pub use error::{FitnessError, Result};
pub use types::{Genome, Instruction, Opcode, TestCase};
