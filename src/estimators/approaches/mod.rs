pub mod discrete;

// Unified re-exports so tests and users can import
// condmi::estimators::approaches::* ergonomically.
pub use discrete::ConditionalMutualInformation;
pub use discrete::distribution::DiscreteDistribution;
