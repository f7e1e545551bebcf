use crate::{
    config::{ScoringConfig, VmConfig},
    data::{tasks, CaseCache},
    engines::evaluation::executor::{self, Outcome},
    types::{Genome, ScoreRequest, ScoreResponse, TestCase},
};
use rayon::prelude::*;
use std::sync::Arc;

/// Map a mean absolute error onto (0, 1]. Zero error scores exactly 1.
pub fn fitness_from_error(mean_absolute_error: f64) -> f64 {
    1.0 / (1.0 + mean_absolute_error)
}

/// Mean of `|actual - expected|`, or `None` for empty input.
///
/// Kept as a running mean so that large finite errors never accumulate
/// into an infinite sum.
pub fn mean_absolute_error<I>(pairs: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (mean, count) = pairs
        .into_iter()
        .fold((0.0, 0usize), |(mean, count), (actual, expected)| {
            let count = count + 1;
            let error = (actual - expected).abs();
            (mean + (error - mean) / count as f64, count)
        });
    (count > 0).then_some(mean)
}

/// Scores genomes against task cases.
pub struct FitnessEvaluator {
    vm: VmConfig,
    scoring: ScoringConfig,
    cache: CaseCache,
}

impl FitnessEvaluator {
    pub fn new(vm: VmConfig, scoring: ScoringConfig) -> Self {
        let cache = CaseCache::new(scoring.cache_capacity);
        Self { vm, scoring, cache }
    }

    pub fn floor_fitness(&self) -> f64 {
        self.scoring.floor_fitness
    }

    /// Case set for `task`, after the unknown-task fallback.
    pub fn cases(&self, task: &str) -> Arc<[TestCase]> {
        let definition = tasks::resolve(task);
        self.cache
            .get_or_insert_with(definition.name, || definition.cases())
    }

    /// Fitness of one genome over `cases`.
    ///
    /// The first rejected case fixes the result at the floor and skips the
    /// remaining cases.
    pub fn evaluate(&self, genome: &Genome, cases: &[TestCase]) -> f64 {
        let mut pairs = Vec::with_capacity(cases.len());
        for case in cases {
            match executor::run(genome, case.input, &self.vm) {
                Outcome::Valid(output) => pairs.push((output, case.expected)),
                Outcome::Invalid(fault) => {
                    log::trace!(
                        "genome rejected at input {}: {} [{}]",
                        case.input,
                        fault,
                        genome.to_listing()
                    );
                    return self.scoring.floor_fitness;
                }
            }
        }

        match mean_absolute_error(pairs) {
            Some(error) => fitness_from_error(error),
            None => self.empty_case_fitness(),
        }
    }

    /// One fitness per genome, in input order.
    pub fn score(&self, task: &str, genomes: &[Genome]) -> Vec<f64> {
        let cases = self.cases(task);
        let fitness: Vec<f64> = if self.scoring.parallel {
            genomes
                .par_iter()
                .map(|genome| self.evaluate(genome, &cases))
                .collect()
        } else {
            genomes
                .iter()
                .map(|genome| self.evaluate(genome, &cases))
                .collect()
        };

        log::debug!(
            "scored {} genomes on task {:?} ({} cases, {} at floor)",
            fitness.len(),
            task,
            cases.len(),
            fitness.iter().filter(|&&f| f == self.scoring.floor_fitness).count()
        );
        fitness
    }

    pub fn score_request(&self, request: &ScoreRequest) -> ScoreResponse {
        ScoreResponse {
            fitness: self.score(&request.task, &request.genomes),
        }
    }

    /// With no cases the mean error is treated as infinite. `1 / (1 + inf)`
    /// would be zero, so the result is the next representable value above
    /// the floor instead.
    fn empty_case_fitness(&self) -> f64 {
        let floor = self.scoring.floor_fitness;
        f64::from_bits(floor.to_bits() + 1)
    }
}

impl Default for FitnessEvaluator {
    fn default() -> Self {
        Self::new(VmConfig::default(), ScoringConfig::default())
    }
}

/// Score `genomes` on `task` with the default configuration.
pub fn score(task: &str, genomes: &[Genome]) -> Vec<f64> {
    FitnessEvaluator::default().score(task, genomes)
}
