pub mod genome;
pub mod operators;
pub mod hall_of_fame;
pub mod evolution_engine;
pub mod progress;

pub use genome::{random_genome, random_instruction};
pub use hall_of_fame::{HallOfFame, EliteGenome};
pub use evolution_engine::{
    EvolutionEngine, EvolutionReport, GenerationStats, ProgressCallback, RunState,
};
pub use progress::{ChannelProgressCallback, LogProgressCallback, ProgressMessage};
