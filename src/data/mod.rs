pub mod cache;
pub mod tasks;

pub use cache::CaseCache;
pub use tasks::{cases, resolve, TaskDefinition, DEFAULT_TASK};
