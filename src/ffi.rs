//! C ABI for driving the estimator from a host process.
//!
//! Lifecycle: [`condmi_group_new`] to allocate an empty sample group,
//! [`condmi_group_append`] once per variable, [`condmi_calculate`] to
//! compute, [`condmi_group_free`] to release. All entry points are
//! null-checked; [`condmi_calculate`] reports validation failures through
//! its status code and leaves the output slots untouched on error.
//!
//! Groups remain usable after a calculation, so the same inputs can be
//! computed against repeatedly before being freed.

use std::slice;

use ndarray::Array1;

use crate::estimators::approaches::discrete::ConditionalMutualInformation;
use crate::estimators::errors::ValidationError;
use crate::estimators::traits::Estimator;

/// Opaque, heap-allocated ordered container of sample sequences.
///
/// Host code only ever holds a pointer to it; the layout is not part of the
/// ABI.
pub struct SampleGroup {
    variables: Vec<Array1<f64>>,
}

/// Status codes returned by the fallible entry points.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CondmiStatus {
    Ok = 0,
    /// A required pointer argument was null.
    NullPointer = 1,
    /// One of the sample groups has no variables.
    EmptyGroup = 2,
    /// Sample counts disagree within or across groups.
    LengthMismatch = 3,
    /// The common sample length is zero.
    ZeroLengthSamples = 4,
}

impl From<&ValidationError> for CondmiStatus {
    fn from(err: &ValidationError) -> Self {
        match err {
            ValidationError::EmptyGroup { .. } => CondmiStatus::EmptyGroup,
            ValidationError::LengthMismatch { .. } => CondmiStatus::LengthMismatch,
            ValidationError::ZeroLengthSamples => CondmiStatus::ZeroLengthSamples,
        }
    }
}

/// Allocate an empty sample group. The caller owns the returned handle and
/// must release it with [`condmi_group_free`].
#[unsafe(no_mangle)]
pub extern "C" fn condmi_group_new() -> *mut SampleGroup {
    Box::into_raw(Box::new(SampleGroup {
        variables: Vec::new(),
    }))
}

/// Append one variable of `len` values to `group`. The values are copied;
/// the caller keeps ownership of `values`.
///
/// # Safety
///
/// `group` must be a live handle from [`condmi_group_new`], and `values`
/// must point to `len` readable `f64`s (it may be null when `len` is 0).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn condmi_group_append(
    group: *mut SampleGroup,
    values: *const f64,
    len: usize,
) -> CondmiStatus {
    if group.is_null() || (values.is_null() && len > 0) {
        return CondmiStatus::NullPointer;
    }

    let group = unsafe { &mut *group };
    let values: &[f64] = if len == 0 {
        &[]
    } else {
        unsafe { slice::from_raw_parts(values, len) }
    };
    group.variables.push(Array1::from(values.to_vec()));

    CondmiStatus::Ok
}

/// Release all memory owned by `group`. The handle must not be used
/// afterward. A null handle is a no-op.
///
/// # Safety
///
/// `group` must be null or a live handle from [`condmi_group_new`] that has
/// not been freed before.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn condmi_group_free(group: *mut SampleGroup) {
    if group.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(group) });
}

/// Validate the three groups, compute I(X;Y|Z) in units of `log base`, and
/// write the value and permutation-test p-value through the out-pointers.
///
/// Pass Euler's constant as `base` for nats. With `p_samples == 0` the
/// p-value slot receives [`ConditionalMutualInformation::NO_P_VALUE`]
/// (`-1.0`). On a nonzero status nothing is written.
///
/// # Safety
///
/// `xs`, `ys`, `zs` must be live handles from [`condmi_group_new`];
/// `cmi_value` and `p_value` must be valid for writing one `f64` each.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn condmi_calculate(
    xs: *const SampleGroup,
    ys: *const SampleGroup,
    zs: *const SampleGroup,
    p_samples: usize,
    base: f64,
    cmi_value: *mut f64,
    p_value: *mut f64,
) -> CondmiStatus {
    if xs.is_null()
        || ys.is_null()
        || zs.is_null()
        || cmi_value.is_null()
        || p_value.is_null()
    {
        return CondmiStatus::NullPointer;
    }

    let (xs, ys, zs) = unsafe { (&*xs, &*ys, &*zs) };
    let estimator =
        match ConditionalMutualInformation::new(&xs.variables, &ys.variables, &zs.variables) {
            Ok(estimator) => estimator.with_base(base),
            Err(err) => return CondmiStatus::from(&err),
        };

    let (cmi, p) = estimator.calculate(p_samples);
    unsafe {
        *cmi_value = cmi;
        *p_value = p;
    }

    CondmiStatus::Ok
}
