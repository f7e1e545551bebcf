use crate::config::{ConfigSection, EvolutionConfig};
use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::generation::{
    genome::random_genome,
    hall_of_fame::{EliteGenome, HallOfFame},
    operators::{crossover, mutate, tournament_selection, VariationLimits},
};
use crate::error::{FitnessError, Result};
use crate::types::Genome;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, hall_of_fame_size: usize);
}

/// Snapshot of a run after its latest scored generation.
#[derive(Debug, Clone, Serialize)]
pub struct RunState {
    pub task: String,
    pub generation: usize,
    pub population_size: usize,
    pub best_fitness: f64,
    pub best_genome: Genome,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    /// Genomes scored above the floor. Rejected genomes sit exactly on it.
    pub above_floor_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvolutionReport {
    pub state: RunState,
    pub hall_of_fame: Vec<EliteGenome>,
    pub history: Vec<GenerationStats>,
}

/// Generational search over stack-machine genomes.
///
/// The initial population is scored on construction. Each [`step`](Self::step)
/// keeps the top `elitism_count` genomes unchanged and fills the rest with
/// tournament-selected offspring, optionally recombined and mutated.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    evaluator: FitnessEvaluator,
    hall_of_fame: HallOfFame,
    rng: StdRng,
    generation: usize,
    population: Vec<Genome>,
    fitness: Vec<f64>,
    best_genome: Genome,
    best_fitness: f64,
    history: Vec<GenerationStats>,
}

impl EvolutionEngine {
    pub fn new(config: EvolutionConfig, evaluator: FitnessEvaluator) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let population = (0..config.population_size)
            .map(|_| {
                random_genome(
                    config.min_genome_len..=config.max_genome_len,
                    config.constant_range,
                    &mut rng,
                )
            })
            .collect();

        let hall_of_fame = HallOfFame::new(config.hall_of_fame_size);

        let mut engine = Self {
            config,
            evaluator,
            hall_of_fame,
            rng,
            generation: 0,
            population,
            fitness: Vec::new(),
            best_genome: Genome::default(),
            best_fitness: 0.0,
            history: Vec::new(),
        };
        engine.evaluate_population()?;

        log::info!(
            "run created task={} pop={} best_fitness={:.6}",
            engine.config.task,
            engine.config.population_size,
            engine.best_fitness
        );
        Ok(engine)
    }

    /// Breed, score and adopt the next generation.
    pub fn step(&mut self) -> Result<RunState> {
        let next_population = self.create_next_generation();
        if next_population.len() != self.config.population_size {
            return Err(FitnessError::Evolution(
                "population size mismatch".to_string(),
            ));
        }

        self.population = next_population;
        self.generation += 1;
        self.evaluate_population()?;

        log::debug!(
            "generation step gen={} best_fitness={:.6}",
            self.generation,
            self.best_fitness
        );
        Ok(self.state())
    }

    pub fn advance(&mut self, steps: usize) -> Result<RunState> {
        if steps == 0 {
            return Err(FitnessError::Evolution("no steps executed".to_string()));
        }
        for _ in 0..steps {
            self.step()?;
        }
        Ok(self.state())
    }

    /// Run until `generations` generations (including the initial one) are scored.
    pub fn run<C: ProgressCallback>(&mut self, mut callback: C) -> Result<EvolutionReport> {
        if self.generation == 0 {
            callback.on_generation_start(0);
            callback.on_generation_complete(0, self.best_fitness, self.hall_of_fame.len());
        }

        while self.generation + 1 < self.config.generations {
            callback.on_generation_start(self.generation + 1);
            self.step()?;
            callback.on_generation_complete(
                self.generation,
                self.best_fitness,
                self.hall_of_fame.len(),
            );
        }

        Ok(self.report())
    }

    pub fn state(&self) -> RunState {
        RunState {
            task: self.config.task.clone(),
            generation: self.generation,
            population_size: self.population.len(),
            best_fitness: self.best_fitness,
            best_genome: self.best_genome.clone(),
        }
    }

    pub fn report(&self) -> EvolutionReport {
        EvolutionReport {
            state: self.state(),
            hall_of_fame: self.hall_of_fame.get_all().to_vec(),
            history: self.history.clone(),
        }
    }

    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    pub fn get_hall_of_fame(&self) -> &HallOfFame {
        &self.hall_of_fame
    }

    fn limits(&self) -> VariationLimits {
        VariationLimits {
            constant_range: self.config.constant_range,
            max_len: self.config.abs_max_genome_len,
        }
    }

    fn evaluate_population(&mut self) -> Result<()> {
        let fitness = self.evaluator.score(&self.config.task, &self.population);
        if fitness.len() != self.population.len() {
            return Err(FitnessError::Evolution(
                "fitness count does not match population".to_string(),
            ));
        }

        if let Some((idx, best)) = best_index(&fitness) {
            self.best_fitness = best;
            self.best_genome = self.population[idx].clone();
        }

        for (genome, &score) in self.population.iter().zip(&fitness) {
            self.hall_of_fame
                .try_add(EliteGenome::new(genome.clone(), score, self.generation));
        }

        let floor = self.evaluator.floor_fitness();
        self.history.push(GenerationStats {
            generation: self.generation,
            best_fitness: self.best_fitness,
            mean_fitness: fitness.iter().sum::<f64>() / fitness.len() as f64,
            above_floor_count: fitness.iter().filter(|&&f| f > floor).count(),
        });
        self.fitness = fitness;
        Ok(())
    }

    fn create_next_generation(&mut self) -> Vec<Genome> {
        let population_size = self.config.population_size;
        let limits = self.limits();
        let mut next_generation = Vec::with_capacity(population_size);

        // Elitism: copy top performers
        let mut ranked: Vec<usize> = (0..self.population.len()).collect();
        ranked.sort_by(|&a, &b| {
            self.fitness[b]
                .partial_cmp(&self.fitness[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for &idx in ranked.iter().take(self.config.elitism_count) {
            next_generation.push(self.population[idx].clone());
        }

        while next_generation.len() < population_size {
            if self.rng.gen::<f64>() < self.config.crossover_rate {
                let parent1 = self.select_parent();
                let parent2 = self.select_parent();
                let (mut child1, mut child2) = crossover(
                    &self.population[parent1],
                    &self.population[parent2],
                    limits,
                    &mut self.rng,
                );

                self.maybe_mutate(&mut child1, limits);
                self.maybe_mutate(&mut child2, limits);

                next_generation.push(child1);
                if next_generation.len() < population_size {
                    next_generation.push(child2);
                }
            } else {
                let parent = self.select_parent();
                let mut child = self.population[parent].clone();
                self.maybe_mutate(&mut child, limits);
                next_generation.push(child);
            }
        }

        next_generation
    }

    fn select_parent(&mut self) -> usize {
        tournament_selection(&self.fitness, self.config.tournament_size, &mut self.rng)
    }

    fn maybe_mutate(&mut self, genome: &mut Genome, limits: VariationLimits) {
        if self.rng.gen::<f64>() < self.config.mutation_rate {
            mutate(genome, limits, &mut self.rng);
        }
    }
}

fn best_index(fitness: &[f64]) -> Option<(usize, f64)> {
    fitness
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, &f)| (i, f))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(seed: u64) -> EvolutionConfig {
        EvolutionConfig {
            population_size: 30,
            generations: 5,
            seed: Some(seed),
            ..EvolutionConfig::default()
        }
    }

    #[test]
    fn test_best_index() {
        assert_eq!(best_index(&[0.1, 0.7, 0.3]), Some((1, 0.7)));
        assert_eq!(best_index(&[]), None);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = EvolutionConfig {
            population_size: 0,
            ..EvolutionConfig::default()
        };
        assert!(EvolutionEngine::new(config, FitnessEvaluator::default()).is_err());
    }

    #[test]
    fn test_step_keeps_population_size() {
        let mut engine = EvolutionEngine::new(small_config(1), FitnessEvaluator::default()).unwrap();
        let state = engine.step().unwrap();
        assert_eq!(state.generation, 1);
        assert_eq!(state.population_size, 30);
        assert_eq!(engine.fitness().len(), 30);
        assert_eq!(engine.history().len(), 2);
    }

    #[test]
    fn test_history_counts_genomes_above_floor() {
        let engine = EvolutionEngine::new(small_config(4), FitnessEvaluator::default()).unwrap();
        let floor = FitnessEvaluator::default().floor_fitness();
        let expected = engine.fitness().iter().filter(|&&f| f > floor).count();

        let stats = engine.history()[0];
        assert_eq!(stats.generation, 0);
        assert_eq!(stats.above_floor_count, expected);
        assert!(stats.above_floor_count <= 30);
    }

    #[test]
    fn test_advance_requires_steps() {
        let mut engine = EvolutionEngine::new(small_config(2), FitnessEvaluator::default()).unwrap();
        assert!(engine.advance(0).is_err());
        assert_eq!(engine.advance(3).unwrap().generation, 3);
    }
}
