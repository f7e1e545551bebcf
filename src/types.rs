use serde::{Deserialize, Serialize};
use std::fmt;

/// Operation executed by the stack machine.
///
/// The wire form is the upper-case mnemonic. Names outside the instruction
/// set are kept as `Unknown` so that a malformed genome still decodes and is
/// rejected at execution time instead of failing the whole request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Opcode {
    Push,
    Load,
    Store,
    Add,
    Sub,
    Mul,
    Div,
    Dup,
    Swap,
    Pop,
    Halt,
    Nop,
    Unknown(String),
}

impl Opcode {
    /// Every executable opcode, in mnemonic order.
    pub const ALL: [Opcode; 12] = [
        Opcode::Push,
        Opcode::Load,
        Opcode::Store,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Dup,
        Opcode::Swap,
        Opcode::Pop,
        Opcode::Halt,
        Opcode::Nop,
    ];

    pub fn parse(name: &str) -> Self {
        match name {
            "PUSH" => Opcode::Push,
            "LOAD" => Opcode::Load,
            "STORE" => Opcode::Store,
            "ADD" => Opcode::Add,
            "SUB" => Opcode::Sub,
            "MUL" => Opcode::Mul,
            "DIV" => Opcode::Div,
            "DUP" => Opcode::Dup,
            "SWAP" => Opcode::Swap,
            "POP" => Opcode::Pop,
            "HALT" => Opcode::Halt,
            "NOP" => Opcode::Nop,
            other => Opcode::Unknown(other.to_string()),
        }
    }

    pub fn mnemonic(&self) -> &str {
        match self {
            Opcode::Push => "PUSH",
            Opcode::Load => "LOAD",
            Opcode::Store => "STORE",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Dup => "DUP",
            Opcode::Swap => "SWAP",
            Opcode::Pop => "POP",
            Opcode::Halt => "HALT",
            Opcode::Nop => "NOP",
            Opcode::Unknown(name) => name,
        }
    }
}

impl From<String> for Opcode {
    fn from(name: String) -> Self {
        Opcode::parse(&name)
    }
}

impl From<Opcode> for String {
    fn from(op: Opcode) -> Self {
        match op {
            Opcode::Unknown(name) => name,
            known => known.mnemonic().to_string(),
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub op: Opcode,
    #[serde(default)]
    pub arg: Option<f64>,
}

impl Instruction {
    pub fn new(op: Opcode, arg: Option<f64>) -> Self {
        Self { op, arg }
    }

    pub fn bare(op: Opcode) -> Self {
        Self { op, arg: None }
    }

    pub fn with_arg(op: Opcode, arg: f64) -> Self {
        Self { op, arg: Some(arg) }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arg {
            Some(arg) => write!(f, "{} {}", self.op, arg),
            None => write!(f, "{}", self.op),
        }
    }
}

/// Program evaluated by the stack machine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub instructions: Vec<Instruction>,
}

impl Genome {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Short human-readable listing, e.g. `PUSH 5; LOAD 0; MUL`.
    pub fn to_listing(&self) -> String {
        self.instructions
            .iter()
            .map(|instr| instr.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl From<Vec<Instruction>> for Genome {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }
}

/// One (input, expected output) sample of a task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: f64,
    pub expected: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub task: String,
    pub genomes: Vec<Genome>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub fitness: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
