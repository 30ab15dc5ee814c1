use ndarray::Array1;

use crate::estimators::approaches::discrete::ConditionalMutualInformation;
use crate::estimators::errors::ValidationError;

/// Mutual information estimation methods for discretized data.
///
/// This struct provides static methods for creating conditional mutual
/// information estimators from raw sample groups.
pub struct MutualInformation;

impl MutualInformation {
    /// Creates a discrete conditional mutual information estimator
    /// $I(X;Y|Z)$ reporting in nats.
    ///
    /// # Arguments
    ///
    /// * `xs`, `ys` - Sample groups whose dependence is measured; one
    ///   `Array1<f64>` per variable, all of one common length
    /// * `zs` - Sample group the mutual information is conditional upon
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if any group is empty, the sample
    /// counts disagree, or the common length is zero.
    pub fn new_cmi_discrete(
        xs: &[Array1<f64>],
        ys: &[Array1<f64>],
        zs: &[Array1<f64>],
    ) -> Result<ConditionalMutualInformation, ValidationError> {
        ConditionalMutualInformation::new(xs, ys, zs)
    }

    /// Creates a discrete conditional mutual information estimator
    /// reporting in units of `log base` instead of nats.
    ///
    /// The value is the natural-log estimate divided by `ln(base)`; passing
    /// Euler's constant is equivalent to [`Self::new_cmi_discrete`].
    pub fn new_cmi_discrete_with_base(
        xs: &[Array1<f64>],
        ys: &[Array1<f64>],
        zs: &[Array1<f64>],
        base: f64,
    ) -> Result<ConditionalMutualInformation, ValidationError> {
        Ok(ConditionalMutualInformation::new(xs, ys, zs)?.with_base(base))
    }
}
