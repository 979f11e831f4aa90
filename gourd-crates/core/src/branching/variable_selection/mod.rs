//! Provides the [`VariableSelector`] trait which is required for variable selectors to implement;
//! the main method in this trait is [`VariableSelector::select_variable`].
//!
//! Implementations are provided for the common policies: input order, smallest domain, largest
//! degree, smallest domain over degree, accumulated failure count (optionally over domain size)
//! and random selection.

mod accumulated_failure_count;
mod afc;
mod input_order;
mod max_degree;
mod min_domain_size;
mod min_size_over_afc;
mod min_size_over_degree;
mod random_selection;
mod variable_selector;

pub use accumulated_failure_count::AccumulatedFailureCount;
pub use accumulated_failure_count::Decay;
pub use afc::Afc;
pub use input_order::InputOrder;
pub use max_degree::MaxDegree;
pub use min_domain_size::MinDomainSize;
pub use min_size_over_afc::MinSizeOverAfc;
pub use min_size_over_degree::MinSizeOverDegree;
pub use random_selection::RandomSelection;
pub use variable_selector::VariableSelector;
