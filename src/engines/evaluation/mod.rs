pub mod executor;
pub mod fitness;

pub use executor::{run, Fault, Outcome, REGISTER_COUNT};
pub use fitness::{score, FitnessEvaluator};
