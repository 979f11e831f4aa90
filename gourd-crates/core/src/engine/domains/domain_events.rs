use enumset::enum_set;
use enumset::EnumSet;
use enumset::EnumSetType;

/// The ways in which a domain can be narrowed.
#[derive(Debug, EnumSetType, Hash)]
pub enum DomainEvent {
    /// The domain became a singleton.
    Assign,
    /// The lower-bound increased.
    LowerBound,
    /// The upper-bound decreased.
    UpperBound,
    /// A value was removed, possibly in the interior of the domain.
    Removal,
}

/// A set of [`DomainEvent`]s a propagator subscribes to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DomainEvents {
    events: EnumSet<DomainEvent>,
}

impl DomainEvents {
    /// Only assignment to a single value.
    pub const ASSIGN: DomainEvents = DomainEvents::new(enum_set!(DomainEvent::Assign));
    /// Lower and upper bound tightening (including assignment).
    pub const BOUNDS: DomainEvents = DomainEvents::new(enum_set!(
        DomainEvent::Assign | DomainEvent::LowerBound | DomainEvent::UpperBound
    ));
    /// Every change to the domain.
    pub const ANY: DomainEvents = DomainEvents::new(enum_set!(
        DomainEvent::Assign
            | DomainEvent::LowerBound
            | DomainEvent::UpperBound
            | DomainEvent::Removal
    ));

    pub const fn new(events: EnumSet<DomainEvent>) -> DomainEvents {
        DomainEvents { events }
    }

    pub fn get_events(&self) -> EnumSet<DomainEvent> {
        self.events
    }
}
