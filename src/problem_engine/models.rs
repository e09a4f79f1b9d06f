use std::fmt;
use serde::{Deserialize, Serialize};

use crate::problem_engine::config::GeneratorConfig;

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Equation,
}

impl Operation {
    /// Printed operator sign. Equations have none of their own.
    pub fn sign(self) -> &'static str {
        match self {
            Operation::Addition       => "+",
            Operation::Subtraction    => "-",
            Operation::Multiplication => "×",
            Operation::Equation       => "=",
        }
    }

    /// Apply the operation to two operands, if it is a binary arithmetic one.
    pub fn apply(self, a: i32, b: i32) -> Option<i32> {
        match self {
            Operation::Addition       => a.checked_add(b),
            Operation::Subtraction    => a.checked_sub(b),
            Operation::Multiplication => a.checked_mul(b),
            Operation::Equation       => None,
        }
    }

    /// The operation a student most often confuses this one with.
    pub fn confusable(self) -> Option<Operation> {
        match self {
            Operation::Addition       => Some(Operation::Subtraction),
            Operation::Subtraction    => Some(Operation::Addition),
            Operation::Multiplication => Some(Operation::Addition),
            Operation::Equation       => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Addition       => write!(f, "addition"),
            Operation::Subtraction    => write!(f, "subtraction"),
            Operation::Multiplication => write!(f, "multiplication"),
            Operation::Equation       => write!(f, "equation"),
        }
    }
}

// ---------------------------------------------------------------------------
// Base problem record
// ---------------------------------------------------------------------------

/// A single multiple-choice arithmetic question.
///
/// `options` always holds four distinct strings and `options[correct_index]`
/// is the correct one. For every family except decomposition that string is
/// `correct_answer.to_string()`; decomposition options are rewritten
/// expressions whose value is `correct_answer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MathProblem {
    pub expression: String,
    pub operation: Operation,
    pub operand1: i32,
    pub operand2: i32,
    pub correct_answer: i32,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub difficulty: f64,
}

impl MathProblem {
    /// The option string the student must pick.
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiplicationProblem {
    #[serde(flatten)]
    pub problem: MathProblem,
    pub max_multiplier: i32,
}

// ---------------------------------------------------------------------------
// Equations ("find x")
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EquationType {
    Simple,
    WithParentheses,
    WithMultiplication,
}

impl fmt::Display for EquationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquationType::Simple             => write!(f, "simple"),
            EquationType::WithParentheses    => write!(f, "with parentheses"),
            EquationType::WithMultiplication => write!(f, "with multiplication"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquationProblem {
    #[serde(flatten)]
    pub problem: MathProblem,
    pub x_value: i32,
    pub equation_type: EquationType,
}

// ---------------------------------------------------------------------------
// Whole-and-parts equations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WholePartType {
    UnknownAddend,
    UnknownSubtrahend,
    UnknownMinuend,
}

impl WholePartType {
    pub const ALL: [WholePartType; 3] = [
        WholePartType::UnknownAddend,
        WholePartType::UnknownSubtrahend,
        WholePartType::UnknownMinuend,
    ];
}

impl fmt::Display for WholePartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WholePartType::UnknownAddend     => write!(f, "unknown addend"),
            WholePartType::UnknownSubtrahend => write!(f, "unknown subtrahend"),
            WholePartType::UnknownMinuend    => write!(f, "unknown minuend"),
        }
    }
}

/// How much visual scaffolding the UI shows: 1 = full bar model, 3 = none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SupportLevel {
    Full,
    Partial,
    Minimal,
}

impl From<SupportLevel> for u8 {
    fn from(level: SupportLevel) -> u8 {
        match level {
            SupportLevel::Full    => 1,
            SupportLevel::Partial => 2,
            SupportLevel::Minimal => 3,
        }
    }
}

impl TryFrom<u8> for SupportLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SupportLevel::Full),
            2 => Ok(SupportLevel::Partial),
            3 => Ok(SupportLevel::Minimal),
            other => Err(format!("support level must be 1, 2 or 3 (got {other})")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WholePartProblem {
    #[serde(flatten)]
    pub problem: MathProblem,
    pub equation_type: WholePartType,
    pub whole: i32,
    pub known_part: i32,
    pub unknown_part: i32,
    pub operation_sign: char,
    pub support_level: SupportLevel,
}

/// Optional knobs for the whole-part generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WholePartOptions {
    pub max_number: Option<i32>,
    pub equation_types: Option<Vec<WholePartType>>,
    pub support_level: Option<SupportLevel>,
}

// ---------------------------------------------------------------------------
// Column subtraction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSubtractionProblem {
    /// List key for the UI, e.g. "CS-1A2B3C4D".
    pub id: String,
    #[serde(flatten)]
    pub problem: MathProblem,
    pub minuend: i32,
    pub subtrahend: i32,
    pub result: i32,
    pub needs_borrowing: bool,
    pub has_zero_in_units: bool,
}

// ---------------------------------------------------------------------------
// First-grade decomposition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstGradeDecompositionProblem {
    pub target_number: i32,
    pub correct_decomposition: (i32, i32),
    pub options: Vec<String>,
    pub correct_index: usize,
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProblemKind {
    Counting,
    Decomposition,
    FirstGradeDecomposition,
    Multiplication,
    Equation,
    EquationWholePart,
    ColumnSubtraction,
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProblemKind::Counting                => "Counting",
            ProblemKind::Decomposition           => "Decomposition",
            ProblemKind::FirstGradeDecomposition => "First-Grade Decomposition",
            ProblemKind::Multiplication          => "Multiplication",
            ProblemKind::Equation                => "Equation",
            ProblemKind::EquationWholePart       => "Whole-and-Parts Equation",
            ProblemKind::ColumnSubtraction       => "Column Subtraction",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemRequest {
    pub kind: ProblemKind,
    /// Accumulated score; drives level lookup for level-based families.
    pub score: i32,
    /// Explicit difficulty band for whole-part and column subtraction.
    pub difficulty: i32,
    /// Upper bound override (counting, decomposition, multiplication, whole-part).
    pub max_number: Option<i32>,
    /// The previous equation's answer, avoided on a best-effort basis.
    pub previous_x: Option<i32>,
    pub rng_seed: Option<u64>,
    #[serde(default)]
    pub config: GeneratorConfig,
}

impl ProblemRequest {
    /// Request with defaults: score 0, difficulty 1, no overrides, entropy seed.
    pub fn new(kind: ProblemKind) -> Self {
        ProblemRequest {
            kind,
            score: 0,
            difficulty: 1,
            max_number: None,
            previous_x: None,
            rng_seed: None,
            config: GeneratorConfig::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_score(mut self, score: i32) -> Self {
        self.score = score;
        self
    }

    pub fn with_difficulty(mut self, difficulty: i32) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_max_number(mut self, max_number: i32) -> Self {
        self.max_number = Some(max_number);
        self
    }
}

/// Output of [`generate_problem`](crate::generate_problem), one variant per family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GeneratedProblem {
    Counting(MathProblem),
    Decomposition(MathProblem),
    FirstGradeDecomposition(FirstGradeDecompositionProblem),
    Multiplication(MultiplicationProblem),
    Equation(EquationProblem),
    EquationWholePart(WholePartProblem),
    ColumnSubtraction(ColumnSubtractionProblem),
}

impl GeneratedProblem {
    pub fn kind(&self) -> ProblemKind {
        match self {
            GeneratedProblem::Counting(_)                => ProblemKind::Counting,
            GeneratedProblem::Decomposition(_)           => ProblemKind::Decomposition,
            GeneratedProblem::FirstGradeDecomposition(_) => ProblemKind::FirstGradeDecomposition,
            GeneratedProblem::Multiplication(_)          => ProblemKind::Multiplication,
            GeneratedProblem::Equation(_)                => ProblemKind::Equation,
            GeneratedProblem::EquationWholePart(_)       => ProblemKind::EquationWholePart,
            GeneratedProblem::ColumnSubtraction(_)       => ProblemKind::ColumnSubtraction,
        }
    }

    /// The prompt shown to the student.
    pub fn expression(&self) -> String {
        match self {
            GeneratedProblem::FirstGradeDecomposition(p) => {
                format!("{} = ? + ?", p.target_number)
            }
            other => other.base().map(|b| b.expression.clone()).unwrap_or_default(),
        }
    }

    /// The shared base record, for every family that carries one.
    pub fn base(&self) -> Option<&MathProblem> {
        match self {
            GeneratedProblem::Counting(p) | GeneratedProblem::Decomposition(p) => Some(p),
            GeneratedProblem::Multiplication(p)    => Some(&p.problem),
            GeneratedProblem::Equation(p)          => Some(&p.problem),
            GeneratedProblem::EquationWholePart(p) => Some(&p.problem),
            GeneratedProblem::ColumnSubtraction(p) => Some(&p.problem),
            GeneratedProblem::FirstGradeDecomposition(_) => None,
        }
    }

    /// Options in display order, plus the index of the correct one.
    pub fn options(&self) -> (&[String], usize) {
        if let GeneratedProblem::FirstGradeDecomposition(p) = self {
            return (p.options.as_slice(), p.correct_index);
        }
        match self.base() {
            Some(b) => (b.options.as_slice(), b.correct_index),
            None => (<&[String]>::default(), 0),
        }
    }
}
