use evogene::{
    math, Alterer, Arity, Chromosome, EvogeneError, Gene, GenerationMethod, Genotype, Op, Program,
    ProgramChromosomeFactory, SubtreeCrossover, TreeNode,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn op_set() -> (Vec<Op<f64>>, Vec<Op<f64>>) {
    (
        vec![math::add(), math::sub(), math::mul(), math::div()],
        vec![
            Op::var("x", 0),
            Op::var("y", 1),
            Op::constant("1.0", 1.0),
            Op::constant("2.0", 2.0),
        ],
    )
}

/// add(mul(x, x), sub(y, 1.0)) == x^2 + y - 1
fn sample_program() -> Program<f64> {
    let x1 = TreeNode::leaf(Op::var("x", 0)).unwrap();
    let x2 = TreeNode::leaf(Op::var("x", 0)).unwrap();
    let y = TreeNode::leaf(Op::var("y", 1)).unwrap();
    let one = TreeNode::leaf(Op::constant("1.0", 1.0)).unwrap();
    let square = TreeNode::new(math::mul(), vec![x1, x2]).unwrap();
    let offset = TreeNode::new(math::sub(), vec![y, one]).unwrap();
    TreeNode::new(math::add(), vec![square, offset]).unwrap()
}

#[test]
fn test_program_evaluation() {
    let program = sample_program();
    assert_eq!(program.eval(&[3.0, 5.0]).unwrap(), 13.0);
    assert_eq!(program.eval(&[0.0, 1.0]).unwrap(), 0.0);
}

#[test]
fn test_arity_invariant_everywhere() {
    let program = sample_program();
    assert!(program.verify());
    for node in program.nodes() {
        assert_eq!(node.children().len(), node.value().arity());
    }
}

#[test]
fn test_depth_first_round_trip() {
    let program = sample_program();
    let rebuilt = TreeNode::from_top_down(program.flatten()).unwrap();
    assert_eq!(rebuilt, program);
    assert_eq!(rebuilt.eval(&[3.0, 5.0]).unwrap(), 13.0);
}

#[test]
fn test_malformed_node_list_raises_structural_error() {
    // add/2 followed by a single terminal: total arity doesn't match size.
    let values = vec![math::add(), Op::constant("1.0", 1.0)];
    let err = TreeNode::from_top_down(values).unwrap_err();
    match err {
        EvogeneError::StructuralInvariant(msg) => assert!(msg.contains("arity")),
        other => panic!("expected structural invariant error, got: {}", other),
    }
}

#[test]
fn test_metrics_recompute_after_replacement() {
    let program = sample_program();
    assert_eq!(program.height(), 2);
    assert_eq!(program.size(), 7);

    // Replace the sub(y, 1.0) subtree with a single constant.
    let replacement = TreeNode::leaf(Op::constant("2.0", 2.0)).unwrap();
    let edited = program
        .replace_first(&replacement, |n| n.value().name() == "sub")
        .unwrap();
    assert_eq!(edited.size(), 5);
    assert_eq!(edited.height(), 2);
    assert!(edited.verify());
    assert_eq!(edited.eval(&[3.0, 0.0]).unwrap(), 11.0);
}

#[test]
fn test_generated_programs_evaluate() {
    let mut rng = StdRng::seed_from_u64(42);
    let (functions, terminals) = op_set();
    let factory = ProgramChromosomeFactory::new(2, functions, terminals, 6)
        .unwrap()
        .method(GenerationMethod::Grow);
    let chromosome = factory.make(&mut rng).unwrap();
    assert!(chromosome.verify());
    for gene in chromosome.genes() {
        let result = gene.value().eval(&[1.5, -2.0]).unwrap();
        assert!(result.is_finite());
    }
}

#[test]
fn test_subtree_crossover_respects_max_depth_seven() {
    let mut rng = StdRng::seed_from_u64(42);
    let (functions, terminals) = op_set();
    let factory = ProgramChromosomeFactory::new(1, functions, terminals, 7)
        .unwrap()
        .method(GenerationMethod::Full);
    let pop = vec![
        Genotype::new(vec![factory.make(&mut rng).unwrap()]),
        Genotype::new(vec![factory.make(&mut rng).unwrap()]),
    ];

    let crossover = SubtreeCrossover::new(1.0, 1.0, 7).unwrap();
    for seed in 0..20 {
        let mut run_rng = StdRng::seed_from_u64(seed);
        let (altered, count) = crossover
            .alter(pop.clone(), 0, &mut run_rng)
            .unwrap()
            .into_parts();
        if count == 0 {
            // Reverted pair: both parents must be structurally unchanged.
            assert_eq!(altered, pop);
        }
        for genotype in &altered {
            for chromosome in genotype.iter() {
                for gene in chromosome.genes() {
                    assert!(gene.value().height() <= 7);
                    assert!(gene.value().verify());
                }
            }
        }
    }
}

#[test]
fn test_program_gene_mutation_regrows_within_bounds() {
    let mut rng = StdRng::seed_from_u64(42);
    let (functions, terminals) = op_set();
    let factory = ProgramChromosomeFactory::new(1, functions, terminals, 5).unwrap();
    let chromosome = factory.make(&mut rng).unwrap();
    let gene = &chromosome.genes()[0];
    for _ in 0..25 {
        let mutated = gene.mutate(&mut rng);
        assert!(mutated.verify());
        assert!(mutated.tree().height() <= 5);
    }
}

#[test]
fn test_formula_rendering() {
    assert_eq!(
        sample_program().to_formula(),
        "add(mul(x, x), sub(y, 1.0))"
    );
}
