// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Shared contract for estimators that produce a global value together with
/// an empirical significance for it.
///
/// Estimator variants differ only in configuration (e.g. whether a log base
/// is applied), so callers can hold any of them behind this one interface.
pub trait Estimator {
    /// Compute the measure and its permutation-test p-value.
    ///
    /// `p_samples` is the number of permutation iterations used to build the
    /// null distribution. With `p_samples == 0` the permutation test is
    /// skipped entirely and the p-value slot carries the estimator's
    /// documented no-p-value sentinel instead of a probability.
    ///
    /// Each invocation is independent and side-effect-free on the input
    /// samples; the distributions involved are rebuilt from scratch.
    fn calculate(&self, p_samples: usize) -> (f64, f64);
}
