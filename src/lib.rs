// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # condmi
//!
//! Discrete conditional mutual information $I(X;Y|Z)$ with an empirical
//! permutation-test p-value, for aligned, already-discretized sample
//! sequences.
//!
//! ## Quick Start
//!
//! ```rust
//! use condmi::estimators::mutual_information::MutualInformation;
//! use condmi::estimators::traits::Estimator;
//! use ndarray::array;
//!
//! let xs = vec![array![1.0, 2.0, 1.0, 2.0]];
//! let ys = vec![array![1.0, 1.0, 2.0, 2.0]];
//! let zs = vec![array![0.0, 0.0, 0.0, 0.0]];
//!
//! let estimator = MutualInformation::new_cmi_discrete(&xs, &ys, &zs).unwrap();
//!
//! // p_samples == 0 skips the permutation test; the p-value slot carries
//! // the -1.0 sentinel in that case.
//! let (cmi, p_value) = estimator.calculate(0);
//! assert!(cmi.abs() < 1e-12);
//! assert_eq!(p_value, -1.0);
//!
//! // With permutations, the p-value is the fraction of Y-shuffled
//! // recomputations whose CMI reaches the observed one.
//! let (_cmi, p_value) = estimator.calculate(100);
//! assert!((0.0..=1.0).contains(&p_value));
//! ```
//!
//! ## Approach
//!
//! Inputs are assumed pre-discretized: events are matched by exact value
//! equality, with no binning, kernel, or tolerance involved. The estimator
//! builds the empirical joint distribution over X∪Y∪Z, derives the XZ, YZ,
//! and Z marginals from it, and sums
//! $P(e) \cdot \log( P_Z \cdot P(e) / (P_{XZ} \cdot P_{YZ}) )$ over the
//! observed joint events. Significance comes from independently shuffling
//! each Y variable and counting how often chance association alone matches
//! the observed value.
//!
//! Execution is single-threaded and synchronous. The permutation driver is
//! seeded (fixed default, `with_seed` to override) so runs are reproducible.
//!
//! ## C ABI
//!
//! The [`ffi`] module exposes the allocate/populate/compute/free lifecycle
//! for host processes loading this crate as a shared library.

pub mod estimators;
pub mod ffi;
