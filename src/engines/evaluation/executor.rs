//! Bounded stack machine for genome execution.
//!
//! A run starts with register 0 holding the input, the other registers at
//! zero and an empty operand stack. Instructions execute in order until the
//! program ends, a `HALT` is reached or the step budget runs out. Any fault
//! aborts the run and no partial output is reported.

use crate::config::VmConfig;
use crate::types::{Genome, Instruction, Opcode};
use thiserror::Error;

pub const REGISTER_COUNT: usize = 4;

/// Reason a run was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    #[error("unknown opcode")]
    UnknownOpcode,

    #[error("PUSH without operand")]
    MissingOperand,

    #[error("invalid register index")]
    InvalidRegister,

    #[error("stack underflow")]
    StackUnderflow,

    #[error("division by near-zero")]
    DivisionByNearZero,

    #[error("non-finite output")]
    NonFiniteOutput,

    #[error("step budget exhausted")]
    StepBudgetExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Valid(f64),
    Invalid(Fault),
}

/// Maps an operand to a register index. Only the exact values 0, 1, 2 and 3
/// are accepted.
pub fn register_index(arg: Option<f64>) -> Result<usize, Fault> {
    let value = arg.ok_or(Fault::InvalidRegister)?;
    (0..REGISTER_COUNT)
        .find(|&idx| idx as f64 == value)
        .ok_or(Fault::InvalidRegister)
}

/// Execute `genome` once with `input` seeded into register 0.
pub fn run(genome: &Genome, input: f64, config: &VmConfig) -> Outcome {
    let mut machine = Machine::new(input, config);
    match machine.execute(&genome.instructions) {
        Ok(value) => Outcome::Valid(value),
        Err(fault) => Outcome::Invalid(fault),
    }
}

enum Flow {
    Continue,
    Halt,
}

struct Machine<'a> {
    registers: [f64; REGISTER_COUNT],
    stack: Vec<f64>,
    pc: usize,
    steps: usize,
    config: &'a VmConfig,
}

impl<'a> Machine<'a> {
    fn new(input: f64, config: &'a VmConfig) -> Self {
        let mut registers = [0.0; REGISTER_COUNT];
        registers[0] = input;
        Self {
            registers,
            stack: Vec::new(),
            pc: 0,
            steps: 0,
            config,
        }
    }

    fn execute(&mut self, program: &[Instruction]) -> Result<f64, Fault> {
        while let Some(instr) = program.get(self.pc) {
            if self.steps >= self.config.max_steps {
                return Err(Fault::StepBudgetExhausted);
            }
            self.steps += 1;

            match self.step(instr)? {
                Flow::Continue => self.pc += 1,
                Flow::Halt => break,
            }
        }

        self.output()
    }

    fn step(&mut self, instr: &Instruction) -> Result<Flow, Fault> {
        match &instr.op {
            Opcode::Push => {
                let value = instr.arg.ok_or(Fault::MissingOperand)?;
                self.stack.push(value);
            }
            Opcode::Load => {
                let idx = register_index(instr.arg)?;
                self.stack.push(self.registers[idx]);
            }
            Opcode::Store => {
                let idx = register_index(instr.arg)?;
                self.registers[idx] = self.pop()?;
            }
            Opcode::Add => {
                let (a, b) = self.pop_two()?;
                self.stack.push(a + b);
            }
            Opcode::Sub => {
                let (a, b) = self.pop_two()?;
                self.stack.push(a - b);
            }
            Opcode::Mul => {
                let (a, b) = self.pop_two()?;
                self.stack.push(a * b);
            }
            Opcode::Div => {
                let (a, b) = self.pop_two()?;
                if b.abs() < self.config.div_epsilon {
                    return Err(Fault::DivisionByNearZero);
                }
                self.stack.push(a / b);
            }
            Opcode::Dup => {
                let top = *self.stack.last().ok_or(Fault::StackUnderflow)?;
                self.stack.push(top);
            }
            Opcode::Swap => {
                let len = self.stack.len();
                if len < 2 {
                    return Err(Fault::StackUnderflow);
                }
                self.stack.swap(len - 1, len - 2);
            }
            Opcode::Pop => {
                self.pop()?;
            }
            Opcode::Halt => return Ok(Flow::Halt),
            Opcode::Nop => {}
            Opcode::Unknown(_) => return Err(Fault::UnknownOpcode),
        }
        Ok(Flow::Continue)
    }

    fn pop(&mut self) -> Result<f64, Fault> {
        self.stack.pop().ok_or(Fault::StackUnderflow)
    }

    /// Pops `b` then `a`, returning `(a, b)`.
    fn pop_two(&mut self) -> Result<(f64, f64), Fault> {
        if self.stack.len() < 2 {
            return Err(Fault::StackUnderflow);
        }
        let b = self.pop()?;
        let a = self.pop()?;
        Ok((a, b))
    }

    fn output(&self) -> Result<f64, Fault> {
        let value = self.stack.last().copied().unwrap_or(self.registers[0]);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Fault::NonFiniteOutput)
        }
    }
}
