//! Fixed regression tasks.
//!
//! Each task maps an identifier to an ordered list of integer inputs paired
//! with a reference function. The table is append-only: existing entries
//! must never change, because scores are compared across requests and
//! process restarts.

use crate::types::TestCase;

/// Task used for unknown or empty identifiers.
pub const DEFAULT_TASK: &str = "poly2";

#[derive(Debug, Clone, Copy)]
pub struct TaskDefinition {
    pub name: &'static str,
    /// Inclusive integer input range.
    pub domain: (i32, i32),
    pub reference: fn(f64) -> f64,
}

impl TaskDefinition {
    pub fn cases(&self) -> Vec<TestCase> {
        let (lo, hi) = self.domain;
        (lo..=hi)
            .map(|x| {
                let input = f64::from(x);
                TestCase {
                    input,
                    expected: (self.reference)(input),
                }
            })
            .collect()
    }
}

static TASKS: &[TaskDefinition] = &[TaskDefinition {
    name: DEFAULT_TASK,
    domain: (-5, 5),
    reference: poly2,
}];

/// `x^2 + 3x + 2`
pub fn poly2(x: f64) -> f64 {
    x * x + 3.0 * x + 2.0
}

pub fn lookup(task: &str) -> Option<&'static TaskDefinition> {
    TASKS.iter().find(|def| def.name == task)
}

/// Resolve a task identifier, falling back to [`DEFAULT_TASK`].
pub fn resolve(task: &str) -> &'static TaskDefinition {
    match lookup(task) {
        Some(def) => def,
        None => {
            log::debug!("unknown task {:?}, using {}", task, DEFAULT_TASK);
            default_task()
        }
    }
}

pub fn cases(task: &str) -> Vec<TestCase> {
    resolve(task).cases()
}

pub fn known_tasks() -> impl Iterator<Item = &'static str> {
    TASKS.iter().map(|def| def.name)
}

fn default_task() -> &'static TaskDefinition {
    // DEFAULT_TASK is the first table entry.
    &TASKS[0]
}
