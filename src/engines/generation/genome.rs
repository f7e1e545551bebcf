//! Random genome construction.
//!
//! Opcodes are drawn uniformly from the executable instruction set. PUSH
//! receives a constant in `[-constant_range, constant_range)`, LOAD and
//! STORE a valid register index; every other opcode has no operand. The
//! result is not guaranteed to execute cleanly: genomes that underflow or
//! divide by zero are simply scored at the floor.

use crate::engines::evaluation::REGISTER_COUNT;
use crate::types::{Genome, Instruction, Opcode};
use rand::Rng;
use std::ops::RangeInclusive;

pub fn random_instruction<R: Rng>(constant_range: f64, rng: &mut R) -> Instruction {
    let op = Opcode::ALL[rng.gen_range(0..Opcode::ALL.len())].clone();
    let arg = match op {
        Opcode::Push => Some(rng.gen_range(-constant_range..constant_range)),
        Opcode::Load | Opcode::Store => Some(rng.gen_range(0..REGISTER_COUNT) as f64),
        _ => None,
    };
    Instruction::new(op, arg)
}

pub fn random_genome<R: Rng>(
    lengths: RangeInclusive<usize>,
    constant_range: f64,
    rng: &mut R,
) -> Genome {
    let len = rng.gen_range(lengths);
    Genome::new(
        (0..len)
            .map(|_| random_instruction(constant_range, rng))
            .collect(),
    )
}
