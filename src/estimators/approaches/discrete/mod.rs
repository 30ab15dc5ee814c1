// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Discrete estimators module: the empirical-distribution CMI estimator and
// its permutation-test driver.

pub mod distribution;

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::estimators::approaches::discrete::distribution::DiscreteDistribution;
use crate::estimators::errors::{GroupId, ValidationError};
use crate::estimators::traits::Estimator;
use crate::estimators::utils::slicing::{concat, split};

/// The four distributions the CMI formula draws from, plus the variable-id
/// bookkeeping needed to slice joint events back into X/Y/Z parts.
struct DistributionSet {
    joint: DiscreteDistribution,
    xz: DiscreteDistribution,
    yz: DiscreteDistribution,
    z: DiscreteDistribution,
    x_count: usize,
    y_count: usize,
    yz_ids: Vec<usize>,
}

impl DistributionSet {
    /// Build all four distributions from the raw groups. Variable ids are
    /// assigned by concatenation order X, Y, Z; XZ and YZ are marginals of
    /// the joint, and Z is a further marginal of XZ.
    fn build(xs: &[Array1<f64>], ys: &[Array1<f64>], zs: &[Array1<f64>]) -> Self {
        let x_count = xs.len();
        let y_count = ys.len();
        let var_count = x_count + y_count + zs.len();

        let x_ids: Vec<usize> = (0..x_count).collect();
        let y_ids: Vec<usize> = (x_count..x_count + y_count).collect();
        let z_ids: Vec<usize> = (x_count + y_count..var_count).collect();

        let joint = DiscreteDistribution::joint(&[xs, ys, zs]);
        let xz = joint.marginal(&concat(&x_ids, &z_ids));
        let yz_ids = concat(&y_ids, &z_ids);
        let yz = joint.marginal(&yz_ids);
        let z = xz.marginal(&z_ids);

        Self {
            joint,
            xz,
            yz,
            z,
            x_count,
            y_count,
            yz_ids,
        }
    }

    /// Rebuild the Y-dependent distributions for a permutation iteration.
    /// XZ and Z do not depend on the Y samples and stay as built.
    fn rebuild_with_ys(&mut self, xs: &[Array1<f64>], ys: &[Array1<f64>], zs: &[Array1<f64>]) {
        self.joint = DiscreteDistribution::joint(&[xs, ys, zs]);
        self.yz = self.joint.marginal(&self.yz_ids);
    }

    /// I(X;Y|Z) over the current distributions, in nats, or divided by
    /// `ln(base)` when a base is given.
    ///
    /// Only stored joint events are iterated, so the logarithm never sees a
    /// zero numerator; a zero XZ or YZ mass for an observed joint event
    /// would mean the marginals were derived inconsistently.
    fn cmi(&self, base: Option<f64>) -> f64 {
        let ln_base = base.map(f64::ln);
        let mut cmi = 0.0;

        // Sorted event order so the sum is bitwise repeatable across runs.
        for (xyz_event, xyz_p) in self.joint.events_sorted() {
            let (x_event, yz_event) = split(xyz_event, self.x_count);
            let (_, z_event) = split(yz_event, self.y_count);
            let xz_event = concat(x_event, z_event);

            let z_p = self.z.probability(z_event);
            let xz_p = self.xz.probability(&xz_event);
            let yz_p = self.yz.probability(yz_event);
            debug_assert!(
                xz_p > 0.0 && yz_p > 0.0,
                "marginal mass missing for an observed joint event"
            );

            let mut term = xyz_p * (z_p * xyz_p / (xz_p * yz_p)).ln();
            if let Some(ln_base) = ln_base {
                term /= ln_base;
            }
            cmi += term;
        }

        cmi
    }
}

/// Fisher–Yates shuffle through indexed swaps. An owned `Array1` carries no
/// type-level contiguity guarantee, so this avoids the fallible slice view.
fn shuffle_in_place(values: &mut Array1<f64>, rng: &mut StdRng) {
    for i in (1..values.len()).rev() {
        let j = rng.gen_range(0..=i);
        values.swap(i, j);
    }
}

fn verify_group(
    group: GroupId,
    vars: &[Array1<f64>],
    expected: Option<usize>,
) -> Result<usize, ValidationError> {
    let first = vars.first().ok_or(ValidationError::EmptyGroup { group })?;
    let expected = expected.unwrap_or_else(|| first.len());

    for (index, var) in vars.iter().enumerate() {
        if var.len() != expected {
            return Err(ValidationError::LengthMismatch {
                group,
                index,
                expected,
                actual: var.len(),
            });
        }
    }

    Ok(expected)
}

/// A discrete conditional mutual information estimator: $I(X;Y|Z)$.
///
/// Owns the three sample groups; the joint, XZ, YZ, and Z distributions are
/// rebuilt from scratch on every [`Estimator::calculate`] call and on every
/// permutation iteration, so repeated invocations are independent.
///
/// The permutation test shuffles each Y variable on its own (not a joint
/// permutation of aligned Y-tuples), destroying its association with X and
/// Z while preserving its marginal distribution. The RNG is seeded with
/// [`Self::DEFAULT_SEED`] unless overridden via [`Self::with_seed`], so
/// results are reproducible by default.
#[derive(Debug)]
pub struct ConditionalMutualInformation {
    xs: Vec<Array1<f64>>,
    ys: Vec<Array1<f64>>,
    zs: Vec<Array1<f64>>,
    base: Option<f64>,
    seed: u64,
}

impl ConditionalMutualInformation {
    /// Sentinel returned in the p-value slot when `p_samples == 0`.
    ///
    /// Deliberately outside the valid p-value range `[0, 1]` so a skipped
    /// permutation test can never be mistaken for a significant one.
    pub const NO_P_VALUE: f64 = -1.0;

    /// Default seed for the permutation driver's RNG.
    pub const DEFAULT_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

    /// Construct an estimator from three sample groups, one `Array1<f64>`
    /// per variable.
    ///
    /// # Errors
    ///
    /// * [`ValidationError::EmptyGroup`] if a group has no variables
    /// * [`ValidationError::LengthMismatch`] if sample counts disagree
    ///   within or across groups
    /// * [`ValidationError::ZeroLengthSamples`] if the common length is 0
    pub fn new(
        xs: &[Array1<f64>],
        ys: &[Array1<f64>],
        zs: &[Array1<f64>],
    ) -> Result<Self, ValidationError> {
        let sample_len = verify_group(GroupId::X, xs, None)?;
        verify_group(GroupId::Y, ys, Some(sample_len))?;
        verify_group(GroupId::Z, zs, Some(sample_len))?;
        if sample_len == 0 {
            return Err(ValidationError::ZeroLengthSamples);
        }

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            zs: zs.to_vec(),
            base: None,
            seed: Self::DEFAULT_SEED,
        })
    }

    /// Report the CMI in units of `log base` instead of nats.
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = Some(base);
        self
    }

    /// Use `seed` for the permutation driver's RNG instead of
    /// [`Self::DEFAULT_SEED`].
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Estimator for ConditionalMutualInformation {
    /// Calculate the CMI and its empirical p-value.
    ///
    /// The p-value is the fraction of `p_samples` Y-shuffled recomputations
    /// whose CMI is at least as large as the observed one; with
    /// `p_samples == 0` the slot carries [`Self::NO_P_VALUE`] and the CMI
    /// is identical to what any `p_samples > 0` call would report.
    fn calculate(&self, p_samples: usize) -> (f64, f64) {
        let mut dists = DistributionSet::build(&self.xs, &self.ys, &self.zs);
        let cmi = dists.cmi(self.base);

        if p_samples == 0 {
            return (cmi, Self::NO_P_VALUE);
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut ys_shuffled = self.ys.clone();
        let mut at_least_as_large = 0usize;

        for _ in 0..p_samples {
            for y in &mut ys_shuffled {
                shuffle_in_place(y, &mut rng);
            }

            dists.rebuild_with_ys(&self.xs, &ys_shuffled, &self.zs);
            if dists.cmi(self.base) >= cmi {
                at_least_as_large += 1;
            }
        }

        (cmi, at_least_as_large as f64 / p_samples as f64)
    }
}
