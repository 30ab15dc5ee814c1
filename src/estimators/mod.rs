pub mod approaches;
pub mod errors;
pub mod mutual_information;
pub mod traits;
pub mod utils;

pub use errors::{GroupId, ValidationError};
pub use traits::Estimator;
