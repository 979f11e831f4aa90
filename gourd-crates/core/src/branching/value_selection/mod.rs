//! Provides the [`ValueSelector`] trait which is required for value selectors to implement; the
//! main method in this trait is [`ValueSelector::select_value`].
//!
//! The selected value is a [`Predicate`](crate::engine::predicate::Predicate) which is posted in
//! the first branch; its negation is posted in the second branch.

mod in_domain_max;
mod in_domain_min;
mod in_domain_random;
mod in_domain_split;
mod value_selector;

pub use in_domain_max::InDomainMax;
pub use in_domain_min::InDomainMin;
pub use in_domain_random::InDomainRandom;
pub use in_domain_split::InDomainSplit;
pub use value_selector::ValueSelector;
