use enumset::EnumSet;

use crate::basic_types::ConstraintOperationError;
use crate::basic_types::EmptyDomain;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::domains::Domain;
use crate::engine::domains::DomainEvent;
use crate::engine::variables::DomainId;
use crate::gourd_assert_simple;

/// A marker for a state of the [`DomainStore`] which can be returned to with
/// [`DomainStore::restore_to`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Checkpoint(usize);

impl Checkpoint {
    pub fn depth(self) -> usize {
        self.0
    }
}

/// Owns the domain of every variable.
///
/// Every narrowing is recorded on a trail, which allows returning to earlier states with
/// checkpoints. Checkpoints follow stack discipline: restoring a checkpoint discards every
/// checkpoint taken after it, as well as the checkpoint itself.
///
/// A domain is never empty. An operation which would remove the last value of a domain returns
/// [`EmptyDomain`] and leaves the domain untouched.
#[derive(Clone, Debug, Default)]
pub struct DomainStore {
    domains: KeyedVec<DomainId, Domain>,
    /// The values removed from each domain, to be reinserted on restore
    trail: Trail<(DomainId, i32)>,
    /// The events since the last time they were drained
    events: Vec<(DomainId, EnumSet<DomainEvent>)>,
}

impl DomainStore {
    /// Creates a new domain `[lower_bound, upper_bound]`.
    ///
    /// Panics if the interval is empty; see [`DomainStore::try_grow`].
    pub fn grow(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.try_grow(lower_bound, upper_bound)
            .unwrap_or_else(|error| panic!("{error}"))
    }

    pub fn try_grow(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
    ) -> Result<DomainId, ConstraintOperationError> {
        let domain = Domain::new(lower_bound, upper_bound).ok_or(
            ConstraintOperationError::EmptyDomain {
                lower_bound,
                upper_bound,
            },
        )?;
        Ok(self.domains.push(domain))
    }

    /// Creates a new domain containing exactly the given values.
    pub fn try_grow_sparse(
        &mut self,
        values: &[i32],
    ) -> Result<DomainId, ConstraintOperationError> {
        let domain =
            Domain::from_values(values).ok_or(ConstraintOperationError::EmptySparseDomain)?;
        Ok(self.domains.push(domain))
    }

    pub fn num_domains(&self) -> usize {
        self.domains.len()
    }

    pub fn domain_ids(&self) -> impl Iterator<Item = DomainId> {
        self.domains.keys()
    }

    pub fn has_domain(&self, domain_id: DomainId) -> bool {
        domain_id.index() < self.domains.len()
    }

    pub fn domain(&self, domain_id: DomainId) -> &Domain {
        &self.domains[domain_id]
    }

    pub fn lower_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].lower_bound()
    }

    pub fn upper_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].upper_bound()
    }

    pub fn size(&self, domain_id: DomainId) -> usize {
        self.domains[domain_id].size()
    }

    pub fn contains(&self, domain_id: DomainId, value: i32) -> bool {
        self.domains[domain_id].contains(value)
    }

    pub fn is_fixed(&self, domain_id: DomainId) -> bool {
        self.domains[domain_id].is_fixed()
    }

    pub fn fixed_value(&self, domain_id: DomainId) -> Option<i32> {
        self.domains[domain_id].fixed_value()
    }

    /// Whether every domain is a singleton.
    pub fn is_assigned(&self) -> bool {
        self.domains.iter().all(Domain::is_fixed)
    }

    /// Removes `value` from the domain. Returns whether the domain changed.
    pub fn remove(&mut self, domain_id: DomainId, value: i32) -> Result<bool, EmptyDomain> {
        let domain = &mut self.domains[domain_id];
        if !domain.contains(value) {
            return Ok(false);
        }
        if domain.is_fixed() {
            return Err(EmptyDomain);
        }

        let mut events = EnumSet::only(DomainEvent::Removal);
        if value == domain.lower_bound() {
            events |= DomainEvent::LowerBound;
        }
        if value == domain.upper_bound() {
            events |= DomainEvent::UpperBound;
        }

        domain.remove(value);
        if domain.is_fixed() {
            events |= DomainEvent::Assign;
        }

        self.trail.push((domain_id, value));
        self.events.push((domain_id, events));

        Ok(true)
    }

    /// Removes every value smaller than `bound`.
    pub fn set_lower_bound(&mut self, domain_id: DomainId, bound: i32) -> Result<bool, EmptyDomain> {
        if bound <= self.lower_bound(domain_id) {
            return Ok(false);
        }
        if bound > self.upper_bound(domain_id) {
            return Err(EmptyDomain);
        }

        while self.lower_bound(domain_id) < bound {
            let _ = self.remove(domain_id, self.lower_bound(domain_id))?;
        }
        Ok(true)
    }

    /// Removes every value larger than `bound`.
    pub fn set_upper_bound(&mut self, domain_id: DomainId, bound: i32) -> Result<bool, EmptyDomain> {
        if bound >= self.upper_bound(domain_id) {
            return Ok(false);
        }
        if bound < self.lower_bound(domain_id) {
            return Err(EmptyDomain);
        }

        while self.upper_bound(domain_id) > bound {
            let _ = self.remove(domain_id, self.upper_bound(domain_id))?;
        }
        Ok(true)
    }

    /// Removes every value other than `value`.
    pub fn assign(&mut self, domain_id: DomainId, value: i32) -> Result<bool, EmptyDomain> {
        self.retain(domain_id, |candidate| candidate == value)
    }

    /// Keeps only the values for which `keep` holds. Fails without changing anything if no value
    /// would remain.
    pub fn retain(
        &mut self,
        domain_id: DomainId,
        keep: impl Fn(i32) -> bool,
    ) -> Result<bool, EmptyDomain> {
        let domain = &self.domains[domain_id];
        let (kept, removed): (Vec<i32>, Vec<i32>) = domain.iter().partition(|value| keep(*value));
        if kept.is_empty() {
            return Err(EmptyDomain);
        }

        for &value in &removed {
            let _ = self.remove(domain_id, value)?;
        }
        Ok(!removed.is_empty())
    }

    /// Marks the current state so that it can be returned to.
    pub fn checkpoint(&mut self) -> Checkpoint {
        let checkpoint = Checkpoint(self.trail.level());
        self.trail.new_checkpoint();
        checkpoint
    }

    /// The number of checkpoints which have not been restored.
    pub fn checkpoint_depth(&self) -> usize {
        self.trail.level()
    }

    /// Undoes every change made since `checkpoint` was taken, and discards that checkpoint and
    /// all later ones.
    pub fn restore_to(&mut self, checkpoint: Checkpoint) {
        gourd_assert_simple!(
            checkpoint.0 < self.trail.level(),
            "Checkpoint {} was already restored",
            checkpoint.0
        );

        for (domain_id, value) in self.trail.synchronise(checkpoint.0) {
            self.domains[domain_id].insert(value);
        }
        self.events.clear();
    }

    /// The events recorded since the previous call, per domain in the order of occurrence.
    pub(crate) fn drain_events(&mut self) -> std::vec::Drain<'_, (DomainId, EnumSet<DomainEvent>)> {
        self.events.drain(..)
    }

    pub(crate) fn num_pending_events(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(store: &DomainStore) -> Vec<Vec<i32>> {
        store
            .domain_ids()
            .map(|domain| store.domain(domain).iter().collect())
            .collect()
    }

    #[test]
    fn empty_interval_cannot_be_created() {
        let mut store = DomainStore::default();

        assert_eq!(
            Err(ConstraintOperationError::EmptyDomain {
                lower_bound: 5,
                upper_bound: 4
            }),
            store.try_grow(5, 4)
        );
        assert_eq!(
            Err(ConstraintOperationError::EmptySparseDomain),
            store.try_grow_sparse(&[])
        );
    }

    #[test]
    fn removing_last_value_fails_without_change() {
        let mut store = DomainStore::default();
        let x = store.grow(3, 3);

        assert_eq!(Err(EmptyDomain), store.remove(x, 3));
        assert_eq!(Some(3), store.fixed_value(x));
    }

    #[test]
    fn removing_absent_value_is_no_change() {
        let mut store = DomainStore::default();
        let x = store.grow(0, 3);

        assert_eq!(Ok(false), store.remove(x, 7));
        assert_eq!(0, store.drain_events().count());
    }

    #[test]
    fn bound_tightening_is_rejected_when_crossing_other_bound() {
        let mut store = DomainStore::default();
        let x = store.grow(0, 3);

        assert_eq!(Err(EmptyDomain), store.set_lower_bound(x, 4));
        assert_eq!(Err(EmptyDomain), store.set_upper_bound(x, -1));
        assert_eq!(4, store.size(x));
    }

    #[test]
    fn assigning_absent_value_fails_without_change() {
        let mut store = DomainStore::default();
        let x = store.try_grow_sparse(&[1, 3, 5]).unwrap();

        assert_eq!(Err(EmptyDomain), store.assign(x, 2));
        assert_eq!(3, store.size(x));
        assert_eq!(Ok(true), store.assign(x, 3));
        assert_eq!(Some(3), store.fixed_value(x));
    }

    #[test]
    fn events_describe_the_change() {
        let mut store = DomainStore::default();
        let x = store.grow(0, 2);

        let _ = store.remove(x, 1).unwrap();
        let _ = store.remove(x, 0).unwrap();

        let events = store.drain_events().collect::<Vec<_>>();
        assert_eq!(
            vec![
                (x, EnumSet::only(DomainEvent::Removal)),
                (
                    x,
                    DomainEvent::Removal | DomainEvent::LowerBound | DomainEvent::Assign
                ),
            ],
            events
        );
    }

    #[test]
    fn restore_returns_to_checkpointed_state() {
        let mut store = DomainStore::default();
        let x = store.grow(0, 9);
        let y = store.try_grow_sparse(&[2, 4, 6]).unwrap();

        let _ = store.remove(x, 5).unwrap();
        let before = snapshot(&store);

        let checkpoint = store.checkpoint();
        let _ = store.set_lower_bound(x, 3).unwrap();
        let _ = store.set_upper_bound(x, 7).unwrap();
        let _ = store.assign(y, 4).unwrap();
        assert_ne!(before, snapshot(&store));

        store.restore_to(checkpoint);

        assert_eq!(before, snapshot(&store));
        assert_eq!(0, store.checkpoint_depth());
    }

    #[test]
    fn trail_grows_with_the_removals_not_with_the_domain() {
        let mut store = DomainStore::default();
        let x = store.grow(0, 99_999);
        let _ = store.grow(0, 99_999);

        let checkpoint = store.checkpoint();
        let _ = store.remove(x, 5).unwrap();
        let _ = store.remove(x, 70_000).unwrap();
        assert_eq!(2, store.trail.len());

        store.restore_to(checkpoint);
        assert!(store.trail.is_empty());
        assert_eq!(100_000, store.size(x));
    }

    #[test]
    fn restore_discards_later_checkpoints() {
        let mut store = DomainStore::default();
        let x = store.grow(0, 9);

        let outer = store.checkpoint();
        let _ = store.remove(x, 0).unwrap();
        let _inner = store.checkpoint();
        let _ = store.remove(x, 9).unwrap();
        assert_eq!(2, store.checkpoint_depth());

        store.restore_to(outer);

        assert_eq!(0, store.checkpoint_depth());
        assert_eq!(10, store.size(x));
    }

    #[test]
    fn nested_restore_only_undoes_inner_changes() {
        let mut store = DomainStore::default();
        let x = store.grow(0, 9);

        let _outer = store.checkpoint();
        let _ = store.remove(x, 0).unwrap();
        let inner = store.checkpoint();
        let _ = store.remove(x, 9).unwrap();

        store.restore_to(inner);

        assert_eq!(1, store.checkpoint_depth());
        assert!(!store.contains(x, 0));
        assert!(store.contains(x, 9));
    }
}
