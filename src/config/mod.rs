pub mod traits;
pub mod vm;
pub mod scoring;
pub mod evolution;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use traits::ConfigSection;
pub use vm::VmConfig;
pub use scoring::ScoringConfig;
pub use evolution::EvolutionConfig;
