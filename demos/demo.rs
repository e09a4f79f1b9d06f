//! Tour of every problem family.
//!
//! Run with: `cargo run --example demo`
//!
//! 1. **Minimal API**: `ProblemRequest::new(kind)` with everything else
//!    defaulted (score 0, difficulty 1, entropy).
//! 2. **All families**: one problem per family with a fixed seed, so the
//!    output is reproducible.
//! 3. **Equation levels**: the same seed at increasing scores, showing the
//!    level table unlocking brackets and multiplication.
//! 4. **Column subtraction battery**: the fixed diagnostic mix.
//!
//! Set `RUST_LOG=debug` to see the generator's fallback and padding logs.

use math_drill_gen::{
    families::column_subtraction::build_column_subtraction_battery,
    generate_problem,
    levels::{get_equations_level_config, get_next_equations_level},
    GeneratedProblem, GeneratorConfig, ProblemKind, ProblemRequest,
};
use rand::{rngs::StdRng, SeedableRng};

fn print_problem(problem: &GeneratedProblem) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  [{}]", problem.kind());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    match problem {
        GeneratedProblem::EquationWholePart(p) => println!(
            "  whole {}  known {}  type: {}  support: {}",
            p.whole, p.known_part, p.equation_type, u8::from(p.support_level)
        ),
        GeneratedProblem::ColumnSubtraction(p) => println!(
            "  id {}  borrowing: {}  zero units: {}",
            p.id, p.needs_borrowing, p.has_zero_in_units
        ),
        GeneratedProblem::Equation(p) => println!("  type: {}  x = {}", p.equation_type, p.x_value),
        GeneratedProblem::Multiplication(p) => println!("  table up to {}", p.max_multiplier),
        _ => {}
    }
    println!("  Q: {}", problem.expression());
    let (options, correct) = problem.options();
    for (i, option) in options.iter().enumerate() {
        let marker = if i == correct { "✓" } else { " " };
        println!("  [{}] {marker} {option}", (b'A' + i as u8) as char);
    }
    println!();
}

fn main() {
    env_logger::init();

    // ── Minimal API ──────────────────────────────────────────────────────────
    println!();
    println!("══ Minimal API: ProblemRequest::new() ══");
    println!();
    let p = generate_problem(ProblemRequest::new(ProblemKind::Counting));
    println!("  Counting with entropy: {}", p.expression());
    println!();

    // ── All families ─────────────────────────────────────────────────────────
    println!();
    println!("══ All families (fixed seeds) ══");
    println!();
    let requests = [
        ProblemRequest::new(ProblemKind::Counting).with_max_number(20).with_seed(1001),
        ProblemRequest::new(ProblemKind::Decomposition).with_seed(2002),
        ProblemRequest::new(ProblemKind::FirstGradeDecomposition).with_seed(3003),
        ProblemRequest::new(ProblemKind::Multiplication).with_score(120).with_seed(4004),
        ProblemRequest::new(ProblemKind::Equation).with_score(260).with_seed(5005),
        ProblemRequest::new(ProblemKind::EquationWholePart).with_difficulty(2).with_seed(6006),
        ProblemRequest::new(ProblemKind::ColumnSubtraction).with_difficulty(3).with_seed(7007),
    ];
    for request in requests {
        print_problem(&generate_problem(request));
    }

    // ── Equation levels ──────────────────────────────────────────────────────
    println!();
    println!("══ Equation levels: seed=42 at rising scores ══");
    println!();
    for score in [0, 100, 250, 400] {
        let level = get_equations_level_config(score);
        let request = ProblemRequest::new(ProblemKind::Equation).with_score(score).with_seed(42);
        let problem = generate_problem(request);
        let next = match get_next_equations_level(score) {
            Some(n) => format!("next level in {} points", n.score_needed),
            None => "top level".to_string(),
        };
        println!("  score {score:>3}  level {}  {:<28} {next}", level.level, problem.expression());
    }
    println!();

    // ── Column subtraction battery ───────────────────────────────────────────
    println!();
    println!("══ Column subtraction battery ══");
    println!();
    let mut rng = StdRng::seed_from_u64(8080);
    for p in build_column_subtraction_battery(&mut rng, &GeneratorConfig::default()) {
        let tag = match (p.needs_borrowing, p.has_zero_in_units) {
            (_, true) => "zero units",
            (true, false) => "borrow",
            (false, false) => "plain",
        };
        println!("  {}  {:>2} - {:>2} = {:>2}  ({tag})", p.id, p.minuend, p.subtrahend, p.result);
    }
}
