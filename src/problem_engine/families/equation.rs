//! "Find x" equations.
//!
//! Three sub-styles unlock with the equation levels: `x + a = b`,
//! bracketed forms such as `x + (a - b) = c`, and `n × x = r`. The answer
//! returned is re-derived from the printed expression by [`solve_for_x`], so
//! what the student reads and what the checker expects can never drift apart.

use crate::problem_engine::{
    config::GeneratorConfig,
    distractors::{
        generate_distractors, half_or_double, last_digit, proximity, wrong_operation,
        DistractorContext, Strategy,
    },
    helpers::{assemble_numeric, math_problem},
    levels::get_equations_level_config,
    models::{EquationProblem, EquationType, Operation},
    random::RandomSource,
};

const MAX_X_FACTOR: i32 = 10;

struct Built {
    expression: String,
    x: i32,
    equation_type: EquationType,
    /// Operands whose confusable combination is a tempting wrong answer.
    hint: (Operation, i32, i32),
}

fn build_simple<R: RandomSource>(rng: &mut R, max: i32) -> Built {
    let a = rng.int_in(1, max - 1);
    let b = rng.int_in(a, max);
    let expression = if rng.chance(0.5) {
        format!("x + {a} = {b}")
    } else {
        format!("{a} + x = {b}")
    };
    Built {
        expression,
        x: b - a,
        equation_type: EquationType::Simple,
        hint: (Operation::Subtraction, b, a),
    }
}

fn build_with_parentheses<R: RandomSource>(rng: &mut R, max: i32) -> Built {
    let x = rng.int_in(1, (max / 2).max(1));
    if rng.chance(0.5) {
        let d = rng.int_in(1, max - x);
        let b = rng.int_in(1, max - d);
        let a = b + d;
        let c = x + d;
        Built {
            expression: format!("x + ({a} - {b}) = {c}"),
            x,
            equation_type: EquationType::WithParentheses,
            hint: (Operation::Subtraction, c, d),
        }
    } else {
        let a = rng.int_in(1, max - x);
        let b = rng.int_in(1, a + x - 1);
        let c = a + x - b;
        Built {
            expression: format!("({a} + x) - {b} = {c}"),
            x,
            equation_type: EquationType::WithParentheses,
            hint: (Operation::Subtraction, c + b, a),
        }
    }
}

fn build_with_multiplication<R: RandomSource>(rng: &mut R, max: i32) -> Built {
    let n = rng.int_in(1, MAX_X_FACTOR.min(max / 10).max(1));
    let x = rng.int_in(1, MAX_X_FACTOR);
    let result = n * x;
    let expression = if rng.chance(0.5) {
        format!("{n} × x = {result}")
    } else {
        format!("x × {n} = {result}")
    };
    Built {
        expression,
        x,
        equation_type: EquationType::WithMultiplication,
        hint: (Operation::Subtraction, result, n),
    }
}

fn build<R: RandomSource>(rng: &mut R, styles: &[EquationType], max: i32) -> Built {
    match rng.pick(styles).copied().unwrap_or(EquationType::Simple) {
        EquationType::Simple             => build_simple(rng, max),
        EquationType::WithParentheses    => build_with_parentheses(rng, max),
        EquationType::WithMultiplication => build_with_multiplication(rng, max),
    }
}

/// A "find x" equation for the level `score` unlocks.
///
/// When `previous_x` is given, the equation is redrawn up to
/// `config.repeat_avoidance_attempts` times to avoid asking for the same `x`
/// twice in a row. A repeat is accepted once those redraws are spent.
pub fn generate_equation<R: RandomSource>(
    rng: &mut R,
    config: &GeneratorConfig,
    score: i32,
    previous_x: Option<i32>,
) -> EquationProblem {
    let level = get_equations_level_config(score);
    let max = level.max_number.max(10);

    let mut built = build(rng, level.equation_types, max);
    for _ in 0..config.repeat_avoidance_attempts {
        if previous_x != Some(built.x) {
            break;
        }
        built = build(rng, level.equation_types, max);
    }

    let x = match solve_for_x(&built.expression) {
        Some(solved) if solved == built.x => solved,
        Some(solved) => {
            log::warn!("equation: '{}' solves to {solved}, not {}", built.expression, built.x);
            solved
        }
        None => {
            log::warn!("equation: could not re-derive x from '{}'", built.expression);
            built.x
        }
    };

    let (hint_op, hint_a, hint_b) = built.hint;
    let ceiling = match built.equation_type {
        EquationType::WithMultiplication => 2 * MAX_X_FACTOR,
        _ => max,
    };
    let ctx = DistractorContext::new(x, 0, ceiling)
        .with_operands(hint_op, hint_a, hint_b)
        .with_spread(2, 5);
    let strategies: [Strategy<R>; 4] = [proximity, wrong_operation, half_or_double, last_digit];
    let wrong = generate_distractors(rng, ctx, &strategies, config.distractor_attempts);
    let (options, correct_index) = assemble_numeric(rng, x, &wrong);

    EquationProblem {
        problem: math_problem(
            built.expression,
            Operation::Equation, 0, 0, x, options, correct_index, level.complexity,
        ),
        x_value: x,
        equation_type: built.equation_type,
    }
}

// ---------------------------------------------------------------------------
// Re-derivation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Num(i64),
    X,
    Plus,
    Minus,
    Times,
    Open,
    Close,
}

fn tokenize(text: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' => {
                chars.next();
            }
            '0'..='9' => {
                let mut value: i64 = 0;
                while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
                    value = value.checked_mul(10)?.checked_add(d as i64)?;
                    chars.next();
                }
                tokens.push(Token::Num(value));
            }
            'x' | 'X' => { chars.next(); tokens.push(Token::X); }
            '+' => { chars.next(); tokens.push(Token::Plus); }
            '-' | '−' => { chars.next(); tokens.push(Token::Minus); }
            '×' | '*' => { chars.next(); tokens.push(Token::Times); }
            '(' => { chars.next(); tokens.push(Token::Open); }
            ')' => { chars.next(); tokens.push(Token::Close); }
            _ => return None,
        }
    }
    Some(tokens)
}

/// `coef * x + constant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Linear {
    coef: i64,
    constant: i64,
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token> {
        let t = self.peek();
        self.pos += 1;
        t
    }

    fn expr(&mut self) -> Option<Linear> {
        let mut acc = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.bump();
            let rhs = self.term()?;
            let sign = if op == Token::Plus { 1 } else { -1 };
            acc = Linear {
                coef: acc.coef.checked_add(sign * rhs.coef)?,
                constant: acc.constant.checked_add(sign * rhs.constant)?,
            };
        }
        Some(acc)
    }

    fn term(&mut self) -> Option<Linear> {
        let mut acc = self.factor()?;
        while self.peek() == Some(Token::Times) {
            self.bump();
            let rhs = self.factor()?;
            acc = match (acc.coef, rhs.coef) {
                (0, _) => Linear {
                    coef: rhs.coef.checked_mul(acc.constant)?,
                    constant: rhs.constant.checked_mul(acc.constant)?,
                },
                (_, 0) => Linear {
                    coef: acc.coef.checked_mul(rhs.constant)?,
                    constant: acc.constant.checked_mul(rhs.constant)?,
                },
                // x × x is not linear
                _ => return None,
            };
        }
        Some(acc)
    }

    fn factor(&mut self) -> Option<Linear> {
        match self.bump()? {
            Token::Num(n) => Some(Linear { coef: 0, constant: n }),
            Token::X => Some(Linear { coef: 1, constant: 0 }),
            Token::Minus => {
                let inner = self.factor()?;
                Some(Linear { coef: -inner.coef, constant: -inner.constant })
            }
            Token::Open => {
                let inner = self.expr()?;
                (self.bump()? == Token::Close).then_some(inner)
            }
            _ => None,
        }
    }

    fn side(tokens: Vec<Token>) -> Option<Linear> {
        let mut parser = Parser { tokens, pos: 0 };
        let value = parser.expr()?;
        (parser.pos == parser.tokens.len()).then_some(value)
    }
}

/// Solve a printed linear equation in one unknown, e.g. `"(7 + x) - 3 = 9"` -> 5.
///
/// Returns `None` for anything that is not `lhs = rhs` with a unique integer
/// solution.
pub fn solve_for_x(expression: &str) -> Option<i32> {
    let (lhs, rhs) = expression.split_once('=')?;
    let left = Parser::side(tokenize(lhs)?)?;
    let right = Parser::side(tokenize(rhs)?)?;
    let coef = left.coef - right.coef;
    let constant = right.constant - left.constant;
    if coef == 0 || constant % coef != 0 {
        return None;
    }
    i32::try_from(constant / coef).ok()
}
