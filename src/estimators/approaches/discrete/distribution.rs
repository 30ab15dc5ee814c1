use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use ndarray::Array1;

/// Canonical bit key for one event coordinate. `-0.0` maps to `0.0` so the
/// key agrees with IEEE `==` on signed zeros; a NaN coordinate equals
/// itself by bit pattern, which keeps hashing and equality consistent for
/// map keys.
#[inline]
fn value_key(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

/// Exact value equality used for event matching. No tolerance: inputs are
/// assumed discretized upstream, and epsilon matching would silently change
/// the distribution's semantics.
#[inline]
fn value_eq(a: f64, b: f64) -> bool {
    value_key(a) == value_key(b)
}

/// A fixed-length joint outcome, one value per variable, usable as a map
/// key through structural hashing over the full coordinate sequence.
#[derive(Debug, Clone)]
struct Event(Box<[f64]>);

impl Event {
    fn values(&self) -> &[f64] {
        &self.0
    }
}

impl From<&[f64]> for Event {
    fn from(values: &[f64]) -> Self {
        Event(values.into())
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(other.0.iter())
                .all(|(&a, &b)| value_eq(a, b))
    }
}

impl Eq for Event {}

impl Hash for Event {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.0.len());
        for &value in self.0.iter() {
            state.write_u64(value_key(value));
        }
    }
}

/// Empirical joint probability mass function over a fixed, ordered set of
/// variables, keyed by exact-match events.
///
/// Every stored mass is a multiple of `1/N` for the N samples the
/// distribution was built from; masses sum to 1 unless the distribution is
/// the explicitly denormalized result of an unsatisfiable condition.
#[derive(Debug, Clone, Default)]
pub struct DiscreteDistribution {
    /// Ordered variable ids (e.g. X_4, X_5 -> [4, 5]).
    variables: Vec<usize>,
    /// Mapping from variable id to its position within event vectors.
    variable_idx: HashMap<usize, usize>,
    /// Mapping from event to probability mass.
    probabilities: HashMap<Event, f64>,
}

impl DiscreteDistribution {
    fn over(variables: Vec<usize>) -> Self {
        let variable_idx = variables
            .iter()
            .copied()
            .enumerate()
            .map(|(idx, id)| (id, idx))
            .collect();
        Self {
            variables,
            variable_idx,
            probabilities: HashMap::new(),
        }
    }

    fn accumulate(&mut self, vars: &[&Array1<f64>]) {
        let Some(first) = vars.first() else {
            return;
        };
        let size = first.len();
        debug_assert!(size > 0, "sample sequences must be non-empty");
        debug_assert!(vars.iter().all(|v| v.len() == size));

        let sample_mass = 1.0 / size as f64;
        let mut event = vec![0.0; vars.len()]; // reused each iteration
        for sample_idx in 0..size {
            for (slot, var) in event.iter_mut().zip(vars) {
                *slot = var[sample_idx];
            }
            *self
                .probabilities
                .entry(Event::from(event.as_slice()))
                .or_insert(0.0) += sample_mass;
        }
    }

    /// Build the empirical joint distribution of `data`. The index of each
    /// sequence becomes the id of the corresponding random variable.
    ///
    /// All sequences must share one common length N > 0 (validated by the
    /// estimator before any distribution is built); each of the N samples
    /// contributes mass `1/N` to the event formed by taking its value from
    /// every variable.
    pub fn from_variables(data: &[Array1<f64>]) -> Self {
        let refs: Vec<&Array1<f64>> = data.iter().collect();
        let mut dist = Self::over((0..data.len()).collect());
        dist.accumulate(&refs);
        dist
    }

    /// Build the joint distribution over several groups concatenated in
    /// order; variable ids are assigned globally across the concatenation.
    ///
    /// This is the rebuild entry point the permutation driver uses between
    /// iterations, so distributions are never mutated behind their API.
    pub fn joint(groups: &[&[Array1<f64>]]) -> Self {
        let refs: Vec<&Array1<f64>> = groups.iter().flat_map(|g| g.iter()).collect();
        let mut dist = Self::over((0..refs.len()).collect());
        dist.accumulate(&refs);
        dist
    }

    /// The ordered variable ids of this distribution.
    pub fn variables(&self) -> &[usize] {
        &self.variables
    }

    /// Number of distinct observed events.
    pub fn support_size(&self) -> usize {
        self.probabilities.len()
    }

    /// Sum of all stored masses: 1.0 for a normalized distribution, 0.0 for
    /// the denormalized result of an unsatisfiable condition.
    pub fn total_mass(&self) -> f64 {
        self.probabilities.values().sum()
    }

    /// Iterate over `(event, mass)` pairs in arbitrary order. Events are in
    /// this distribution's variable order; only nonzero masses are stored.
    pub fn events(&self) -> impl Iterator<Item = (&[f64], f64)> {
        self.probabilities.iter().map(|(e, &p)| (e.values(), p))
    }

    /// The `(event, mass)` pairs in a deterministic order, sorted by the
    /// events' coordinate bit keys.
    ///
    /// Map iteration order varies between map instances, and floating-point
    /// accumulation is order-sensitive in the low bits; summing over this
    /// ordering instead makes repeated runs bitwise identical.
    pub fn events_sorted(&self) -> Vec<(&[f64], f64)> {
        let mut events: Vec<(&[f64], f64)> = self.events().collect();
        events.sort_unstable_by(|(a, _), (b, _)| {
            a.iter()
                .map(|&v| value_key(v))
                .cmp(b.iter().map(|&v| value_key(v)))
        });
        events
    }

    /// Mass of a dense event (one value per variable, in this
    /// distribution's variable order), or 0.0 if it was never observed.
    pub fn probability(&self, event: &[f64]) -> f64 {
        self.probabilities
            .get(&Event::from(event))
            .copied()
            .unwrap_or(0.0)
    }

    /// Summed mass of every stored event whose projection onto the assigned
    /// variables matches a sparse `(variable id, value)` assignment exactly.
    ///
    /// Linear scan over the support; no indexing is needed at this scale.
    /// An assignment naming a variable this distribution does not carry can
    /// match nothing and yields 0.0.
    pub fn probability_of(&self, assignment: &[(usize, f64)]) -> f64 {
        let mut constraints = Vec::with_capacity(assignment.len());
        for &(var_id, value) in assignment {
            match self.variable_idx.get(&var_id) {
                Some(&idx) => constraints.push((idx, value)),
                None => return 0.0,
            }
        }

        self.probabilities
            .iter()
            .filter(|(event, _)| {
                constraints
                    .iter()
                    .all(|&(idx, value)| value_eq(event.values()[idx], value))
            })
            .map(|(_, &mass)| mass)
            .sum()
    }

    /// Marginal distribution over exactly `keep`, in the caller's order.
    /// Events colliding after projection have their masses summed.
    ///
    /// # Panics
    ///
    /// Panics if `keep` names a variable id this distribution does not
    /// carry.
    pub fn marginal(&self, keep: &[usize]) -> Self {
        let mut dist = Self::over(keep.to_vec());

        let mut projected = vec![0.0; keep.len()];
        for (event, &mass) in &self.probabilities {
            for (slot, var_id) in projected.iter_mut().zip(keep) {
                *slot = event.values()[self.variable_idx[var_id]];
            }
            *dist
                .probabilities
                .entry(Event::from(projected.as_slice()))
                .or_insert(0.0) += mass;
        }

        dist
    }

    /// Conditional distribution over the variables not named in
    /// `condition`, restricted to stored outcomes satisfying the condition
    /// exactly, with masses renormalized to sum to 1.
    ///
    /// If no stored outcome satisfies the condition the result keeps the
    /// correct variable set but has zero total mass; normalization is
    /// skipped rather than dividing by zero. Conditioning on a variable id
    /// the distribution does not carry is unsatisfiable for the same
    /// reason.
    pub fn conditional(&self, condition: &[(usize, f64)]) -> Self {
        let kept: Vec<usize> = self
            .variables
            .iter()
            .copied()
            .filter(|id| condition.iter().all(|&(cond_id, _)| cond_id != *id))
            .collect();
        let mut dist = Self::over(kept);

        let mut constraints = Vec::with_capacity(condition.len());
        for &(var_id, value) in condition {
            match self.variable_idx.get(&var_id) {
                Some(&idx) => constraints.push((idx, value)),
                None => return dist,
            }
        }

        let mut mass_sum = 0.0;
        let mut projected = vec![0.0; dist.variables.len()];
        for (event, &mass) in &self.probabilities {
            if !constraints
                .iter()
                .all(|&(idx, value)| value_eq(event.values()[idx], value))
            {
                continue;
            }

            for (slot, var_id) in projected.iter_mut().zip(&dist.variables) {
                *slot = event.values()[self.variable_idx[var_id]];
            }

            mass_sum += mass;
            *dist
                .probabilities
                .entry(Event::from(projected.as_slice()))
                .or_insert(0.0) += mass;
        }

        if mass_sum > 0.0 {
            for mass in dist.probabilities.values_mut() {
                *mass /= mass_sum;
            }
        }

        dist
    }
}
