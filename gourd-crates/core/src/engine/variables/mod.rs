//! A variable is a view onto a domain in the [`DomainStore`](crate::engine::DomainStore). It either
//! forwards the domain unaltered ([`DomainId`]) or shifts every value by a constant
//! ([`OffsetView`]).

mod domain_id;
mod integer_variable;
mod offset_view;
mod transformable_variable;

pub use domain_id::DomainId;
pub use integer_variable::IntegerVariable;
pub use offset_view::DomainValues;
pub use offset_view::OffsetView;
pub use transformable_variable::TransformableVariable;
