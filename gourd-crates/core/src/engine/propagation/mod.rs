//! The machinery which runs propagators to a fixpoint: identifiers, priorities, the queue of
//! propagators waiting to run, and the context through which a propagator narrows domains.

mod propagation_context;
mod propagator_id;
mod propagator_queue;

pub(crate) use propagation_context::PropagationContext;
pub use propagator_id::PropagatorId;
pub(crate) use propagator_queue::PropagatorQueue;

/// The order in which enqueued propagators run. Cheap propagators have a higher priority, so
/// that they run before the expensive ones.
#[derive(Default, Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Priority {
    High = 0,
    Medium = 1,
    Low = 2,
    #[default]
    VeryLow = 3,
}

impl Priority {
    pub(crate) const NUM_LEVELS: u32 = 4;
}
