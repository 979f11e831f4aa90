mod configuration_error;
mod constraint_operation_error;
mod propagation_status;
mod random;
mod solution;
mod trail;

pub use configuration_error::ConfigurationError;
pub use constraint_operation_error::ConstraintOperationError;
pub use propagation_status::*;
pub use random::Random;
pub use solution::Solution;
pub(crate) use trail::Trail;

#[cfg(test)]
pub(crate) mod tests {
    pub(crate) use super::random::tests::TestRandom;
}
