use gpfitness::config::{ScoringConfig, VmConfig};
use gpfitness::data::tasks;
use gpfitness::engines::evaluation::fitness::{fitness_from_error, mean_absolute_error};
use gpfitness::engines::evaluation::FitnessEvaluator;
use gpfitness::types::{Genome, Instruction, Opcode, ScoreRequest};
use gpfitness::score;

const FLOOR: f64 = 1e-9;

fn push(value: f64) -> Instruction {
    Instruction::with_arg(Opcode::Push, value)
}

fn load(register: f64) -> Instruction {
    Instruction::with_arg(Opcode::Load, register)
}

fn op(opcode: Opcode) -> Instruction {
    Instruction::bare(opcode)
}

/// x*x + 3x + 2 built from register 0.
fn exact_poly2() -> Genome {
    Genome::new(vec![
        load(0.0),
        load(0.0),
        op(Opcode::Mul),
        load(0.0),
        push(3.0),
        op(Opcode::Mul),
        op(Opcode::Add),
        push(2.0),
        op(Opcode::Add),
    ])
}

#[test]
fn test_constant_genome_on_poly2() {
    let fitness = score("poly2", &[Genome::new(vec![push(5.0)])]);

    // |5 - f(x)| over x = -5..=5 sums to 109.
    let expected = 1.0 / (1.0 + 109.0 / 11.0);
    assert_eq!(fitness.len(), 1);
    assert!((fitness[0] - expected).abs() < 1e-12, "got {}", fitness[0]);
}

#[test]
fn test_exact_polynomial_scores_one() {
    let fitness = score("poly2", &[exact_poly2()]);
    assert_eq!(fitness, vec![1.0]);
}

#[test]
fn test_pop_on_empty_stack_scores_floor() {
    let fitness = score("poly2", &[Genome::new(vec![op(Opcode::Pop)])]);
    assert_eq!(fitness, vec![FLOOR]);
}

#[test]
fn test_invalid_genomes_score_exactly_floor() {
    let genomes = vec![
        Genome::new(vec![op(Opcode::Add)]),
        Genome::new(vec![Instruction::bare(Opcode::Push)]),
        Genome::new(vec![load(9.0)]),
        Genome::new(vec![Instruction::bare(Opcode::Unknown("JMP".to_string()))]),
        Genome::new(vec![push(1.0), push(0.0), op(Opcode::Div)]),
    ];
    assert_eq!(score("poly2", &genomes), vec![FLOOR; 5]);
}

#[test]
fn test_empty_genome_returns_input() {
    // Output is x, so the error is |x - f(x)| = |x^2 + 2x + 2|.
    let cases = tasks::cases("poly2");
    let mae = mean_absolute_error(cases.iter().map(|c| (c.input, c.expected))).unwrap();
    let fitness = score("poly2", &[Genome::default()]);
    assert_eq!(fitness, vec![fitness_from_error(mae)]);
}

#[test]
fn test_unknown_task_uses_poly2_cases() {
    assert_eq!(tasks::cases("nonexistent"), tasks::cases("poly2"));

    let genomes = vec![Genome::new(vec![push(5.0)]), exact_poly2()];
    assert_eq!(score("nonexistent", &genomes), score("poly2", &genomes));
}

#[test]
fn test_output_order_matches_input() {
    let genomes = vec![
        exact_poly2(),
        Genome::new(vec![op(Opcode::Pop)]),
        Genome::new(vec![push(5.0)]),
    ];
    let fitness = score("poly2", &genomes);
    assert_eq!(fitness.len(), 3);
    assert_eq!(fitness[0], 1.0);
    assert_eq!(fitness[1], FLOOR);
    assert!(fitness[2] > FLOOR && fitness[2] < 1.0);
}

#[test]
fn test_lower_error_scores_higher() {
    // Constants closer to the case mean have lower absolute error here.
    let near = Genome::new(vec![push(5.0)]);
    let far = Genome::new(vec![push(-50.0)]);
    let fitness = score("poly2", &[near, far]);
    assert!(fitness[0] > fitness[1]);

    for (e1, e2) in [(0.0, 0.1), (0.5, 3.0), (10.0, 1e6)] {
        assert!(fitness_from_error(e1) > fitness_from_error(e2));
    }
}

#[test]
fn test_huge_finite_outputs_stay_positive_and_ordered() {
    let fitness = score(
        "poly2",
        &[Genome::new(vec![push(1e308)]), Genome::new(vec![push(1.5e308)])],
    );
    assert!(fitness[0] > 0.0, "got {:?}", fitness);
    assert!(fitness[1] > 0.0, "got {:?}", fitness);
    assert!(fitness[0] > fitness[1], "got {:?}", fitness);
}

#[test]
fn test_parallel_matches_sequential() {
    let genomes: Vec<Genome> = (0..64)
        .map(|i| {
            let mut g = exact_poly2();
            g.instructions.push(push(i as f64));
            g.instructions.push(op(Opcode::Sub));
            g
        })
        .collect();

    let parallel = FitnessEvaluator::new(VmConfig::default(), ScoringConfig::default());
    let sequential = FitnessEvaluator::new(
        VmConfig::default(),
        ScoringConfig {
            parallel: false,
            ..ScoringConfig::default()
        },
    );
    assert_eq!(
        parallel.score("poly2", &genomes),
        sequential.score("poly2", &genomes)
    );
}

#[test]
fn test_configured_floor_and_budget() {
    let evaluator = FitnessEvaluator::new(
        VmConfig::with_max_steps(3),
        ScoringConfig {
            floor_fitness: 1e-6,
            ..ScoringConfig::default()
        },
    );
    // Nine instructions exceed a budget of three.
    assert_eq!(evaluator.score("poly2", &[exact_poly2()]), vec![1e-6]);
}

#[test]
fn test_score_request_from_json() {
    let request: ScoreRequest = serde_json::from_str(
        r#"{
            "task": "poly2",
            "genomes": [
                {"instructions": [{"op": "PUSH", "arg": 5.0}]},
                {"instructions": [{"op": "POP", "arg": null}]},
                {"instructions": [{"op": "BOGUS"}]},
                {"instructions": []}
            ]
        }"#,
    )
    .unwrap();

    let response = FitnessEvaluator::default().score_request(&request);
    assert_eq!(response.fitness.len(), 4);
    assert_eq!(response.fitness[1], FLOOR);
    assert_eq!(response.fitness[2], FLOOR);
    assert!(response.fitness.iter().all(|f| *f > 0.0 && *f <= 1.0));
}
