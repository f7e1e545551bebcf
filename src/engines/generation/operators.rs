use crate::engines::generation::genome::random_instruction;
use crate::types::{Genome, Opcode};
use rand::Rng;

/// Bounds applied by the variation operators.
#[derive(Debug, Clone, Copy)]
pub struct VariationLimits {
    pub constant_range: f64,
    pub max_len: usize,
}

/// Tournament selection: index of the best of K random candidates
pub fn tournament_selection<R: Rng>(
    fitness: &[f64],
    tournament_size: usize,
    rng: &mut R,
) -> usize {
    let mut best_idx = rng.gen_range(0..fitness.len());
    let mut best_fitness = fitness[best_idx];

    for _ in 1..tournament_size {
        let idx = rng.gen_range(0..fitness.len());
        if fitness[idx] > best_fitness {
            best_idx = idx;
            best_fitness = fitness[idx];
        }
    }

    best_idx
}

/// Single-point crossover: swap instruction tails at a shared cut point
pub fn crossover<R: Rng>(
    parent1: &Genome,
    parent2: &Genome,
    limits: VariationLimits,
    rng: &mut R,
) -> (Genome, Genome) {
    let len = parent1.len().min(parent2.len());
    if len <= 1 {
        return (parent1.clone(), parent2.clone());
    }

    let point = rng.gen_range(1..len);

    let splice = |head: &Genome, tail: &Genome| {
        let mut instructions = head.instructions[..point].to_vec();
        instructions.extend_from_slice(&tail.instructions[point..]);
        instructions.truncate(limits.max_len);
        Genome::new(instructions)
    };

    (splice(parent1, parent2), splice(parent2, parent1))
}

/// Apply one randomly chosen structural mutation.
///
/// The genome never ends up empty or longer than `limits.max_len`.
pub fn mutate<R: Rng>(genome: &mut Genome, limits: VariationLimits, rng: &mut R) {
    if genome.is_empty() {
        genome
            .instructions
            .push(random_instruction(limits.constant_range, rng));
        return;
    }

    match rng.gen_range(0..4) {
        0 => point_mutate(genome, limits, rng),
        1 => tweak_constant(genome, limits, rng),
        2 => insert_instruction(genome, limits, rng),
        _ => delete_instruction(genome, rng),
    }

    if genome.is_empty() {
        genome
            .instructions
            .push(random_instruction(limits.constant_range, rng));
    }
    genome.instructions.truncate(limits.max_len);
}

fn point_mutate<R: Rng>(genome: &mut Genome, limits: VariationLimits, rng: &mut R) {
    let idx = rng.gen_range(0..genome.len());
    genome.instructions[idx] = random_instruction(limits.constant_range, rng);
}

/// Nudge one PUSH constant by U(-1, 1), falling back to a point mutation.
fn tweak_constant<R: Rng>(genome: &mut Genome, limits: VariationLimits, rng: &mut R) {
    let push_indices: Vec<usize> = genome
        .instructions
        .iter()
        .enumerate()
        .filter_map(|(i, instr)| (instr.op == Opcode::Push).then_some(i))
        .collect();
    if push_indices.is_empty() {
        point_mutate(genome, limits, rng);
        return;
    }

    let idx = push_indices[rng.gen_range(0..push_indices.len())];
    let noise = rng.gen_range(-1.0..1.0);
    let instr = &mut genome.instructions[idx];
    let value = instr.arg.unwrap_or(0.0) + noise;
    instr.arg = Some(value.clamp(-limits.constant_range, limits.constant_range));
}

fn insert_instruction<R: Rng>(genome: &mut Genome, limits: VariationLimits, rng: &mut R) {
    if genome.len() >= limits.max_len {
        point_mutate(genome, limits, rng);
        return;
    }
    let idx = rng.gen_range(0..=genome.len());
    genome
        .instructions
        .insert(idx, random_instruction(limits.constant_range, rng));
}

fn delete_instruction<R: Rng>(genome: &mut Genome, rng: &mut R) {
    if genome.len() <= 1 {
        return;
    }
    let idx = rng.gen_range(0..genome.len());
    genome.instructions.remove(idx);
}
