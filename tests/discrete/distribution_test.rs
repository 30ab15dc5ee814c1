// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::test_helpers::generate_discrete_variable;
use approx::assert_abs_diff_eq;
use condmi::estimators::approaches::DiscreteDistribution;
use ndarray::{Array1, array};
use rstest::rstest;

#[rstest]
#[case(vec![generate_discrete_variable(100, 4, 7)])]
#[case(vec![
    generate_discrete_variable(250, 3, 8),
    generate_discrete_variable(250, 5, 9),
])]
#[case(vec![
    generate_discrete_variable(64, 2, 10),
    generate_discrete_variable(64, 2, 11),
    generate_discrete_variable(64, 6, 12),
])]
fn test_masses_sum_to_one(#[case] data: Vec<Array1<f64>>) {
    let dist = DiscreteDistribution::from_variables(&data);
    assert_abs_diff_eq!(dist.total_mass(), 1.0, epsilon = 1e-9);
    assert_eq!(dist.variables(), &Vec::from_iter(0..data.len())[..]);
}

#[test]
fn test_dense_probability_counts_exact_matches() {
    let dist = DiscreteDistribution::from_variables(&[
        array![1.0, 2.0, 1.0, 1.0],
        array![0.0, 0.0, 1.0, 0.0],
    ]);

    assert_abs_diff_eq!(dist.probability(&[1.0, 0.0]), 0.5);
    assert_abs_diff_eq!(dist.probability(&[2.0, 0.0]), 0.25);
    assert_abs_diff_eq!(dist.probability(&[1.0, 1.0]), 0.25);
    assert_eq!(dist.probability(&[2.0, 1.0]), 0.0); // never observed
    assert_eq!(dist.support_size(), 3);
}

#[test]
fn test_matching_has_no_tolerance() {
    let dist = DiscreteDistribution::from_variables(&[array![1.0, 2.0]]);

    // A nearby value is a different event, not an approximate match.
    assert_eq!(dist.probability(&[1.0 + 1e-12]), 0.0);
    assert_abs_diff_eq!(dist.probability(&[1.0]), 0.5);
}

#[test]
fn test_signed_zero_matches_positive_zero() {
    let dist = DiscreteDistribution::from_variables(&[array![0.0, 1.0]]);
    assert_abs_diff_eq!(dist.probability(&[-0.0]), 0.5);
}

#[test]
fn test_sparse_assignment_sums_matching_events() {
    let dist = DiscreteDistribution::from_variables(&[
        generate_discrete_variable(120, 3, 21),
        generate_discrete_variable(120, 2, 22),
    ]);
    let marginal = dist.marginal(&[0]);

    for value in 0..3 {
        let value = value as f64;
        let sparse = dist.probability_of(&[(0, value)]);
        let dense_sum: f64 = dist
            .events()
            .filter(|(event, _)| event[0] == value)
            .map(|(_, mass)| mass)
            .sum();

        assert_abs_diff_eq!(sparse, dense_sum, epsilon = 1e-12);
        assert_abs_diff_eq!(sparse, marginal.probability(&[value]), epsilon = 1e-12);
    }
}

#[test]
fn test_sparse_assignment_with_unknown_variable_matches_nothing() {
    let dist = DiscreteDistribution::from_variables(&[array![1.0, 2.0]]);
    assert_eq!(dist.probability_of(&[(5, 1.0)]), 0.0);
    assert_eq!(dist.probability_of(&[(0, 1.0), (5, 1.0)]), 0.0);
}

#[test]
fn test_marginalization_consistency() {
    let joint = DiscreteDistribution::from_variables(&[
        generate_discrete_variable(80, 2, 31),
        generate_discrete_variable(80, 3, 32),
        generate_discrete_variable(80, 2, 33),
    ]);

    // Caller-given order is preserved, including reordering.
    let keep = [2usize, 0];
    let marginal = joint.marginal(&keep);
    assert_eq!(marginal.variables(), &keep);
    assert_abs_diff_eq!(marginal.total_mass(), 1.0, epsilon = 1e-9);

    // Every projected event carries exactly the joint mass summed over the
    // dropped variable.
    for (event, mass) in marginal.events() {
        let assignment: Vec<(usize, f64)> =
            keep.iter().copied().zip(event.iter().copied()).collect();
        assert_abs_diff_eq!(mass, joint.probability_of(&assignment), epsilon = 1e-12);
    }
}

#[test]
fn test_conditional_renormalizes() {
    let dist = DiscreteDistribution::from_variables(&[
        array![1.0, 1.0, 2.0, 2.0], // var 0
        array![5.0, 5.0, 5.0, 7.0], // var 1
    ]);

    let cond = dist.conditional(&[(1, 5.0)]);
    assert_eq!(cond.variables(), &[0]);
    assert_abs_diff_eq!(cond.total_mass(), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(cond.probability(&[1.0]), 2.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(cond.probability(&[2.0]), 1.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn test_unsatisfiable_condition_is_denormalized_not_an_error() {
    let dist = DiscreteDistribution::from_variables(&[
        array![1.0, 1.0, 2.0, 2.0],
        array![5.0, 5.0, 5.0, 7.0],
    ]);

    let cond = dist.conditional(&[(1, 9.0)]);
    assert_eq!(cond.variables(), &[0]);
    assert_eq!(cond.support_size(), 0);
    assert_eq!(cond.total_mass(), 0.0);

    // Conditioning on a variable the distribution does not carry is
    // unsatisfiable in the same way.
    let cond = dist.conditional(&[(9, 5.0)]);
    assert_eq!(cond.variables(), &[0, 1]);
    assert_eq!(cond.total_mass(), 0.0);
}

#[test]
fn test_sorted_events_have_a_stable_order() {
    let data = [
        generate_discrete_variable(150, 4, 41),
        generate_discrete_variable(150, 3, 42),
    ];

    // Two independently built maps over the same samples agree event for
    // event once sorted, so order-sensitive accumulation is repeatable.
    let first = DiscreteDistribution::from_variables(&data);
    let second = DiscreteDistribution::from_variables(&data);
    assert_eq!(first.events_sorted(), second.events_sorted());

    let sorted = first.events_sorted();
    assert_eq!(sorted.len(), first.support_size());
    let total: f64 = sorted.iter().map(|(_, mass)| mass).sum();
    assert_abs_diff_eq!(total, 1.0, epsilon = 1e-9);
}

#[test]
fn test_joint_assigns_ids_across_groups() {
    let xs = vec![array![1.0, 2.0, 1.0]];
    let ys = vec![array![3.0, 3.0, 4.0], array![0.0, 1.0, 0.0]];
    let zs = vec![array![7.0, 7.0, 7.0]];

    let joint = DiscreteDistribution::joint(&[&xs, &ys, &zs]);
    assert_eq!(joint.variables(), &[0, 1, 2, 3]);
    assert_abs_diff_eq!(joint.total_mass(), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(joint.probability(&[1.0, 3.0, 0.0, 7.0]), 1.0 / 3.0);
}
