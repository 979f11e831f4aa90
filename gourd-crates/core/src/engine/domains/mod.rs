mod domain;
mod domain_events;
mod domain_store;

pub use domain::Domain;
pub use domain::DomainIterator;
pub use domain_events::DomainEvent;
pub use domain_events::DomainEvents;
pub use domain_store::Checkpoint;
pub use domain_store::DomainStore;
