use std::sync::Arc;

use enumset::EnumSet;
use log::trace;

use crate::basic_types::ConstraintOperationError;
use crate::basic_types::EmptyDomain;
use crate::basic_types::PropagationStatus;
use crate::basic_types::Solution;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::engine::domains::Checkpoint;
use crate::engine::domains::DomainEvent;
use crate::engine::domains::DomainStore;
use crate::engine::predicate::Predicate;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagatorId;
use crate::engine::propagation::PropagatorQueue;
use crate::engine::variables::DomainId;
use crate::gourd_assert_moderate;
use crate::propagators::Propagator;

/// The propagation state of a [`Space`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SpaceState {
    /// No propagator can narrow any domain.
    #[default]
    Stable,
    /// Some domains changed since the last fixpoint; propagators are waiting to run.
    Propagating,
    /// A propagator detected that the domains admit no solution.
    Failed,
}

#[derive(Clone, Copy, Debug)]
struct Watcher {
    propagator: PropagatorId,
    events: EnumSet<DomainEvent>,
}

/// The propagators of a problem together with the domains they watch. It is set up while the
/// problem is constructed and is read-only during search, so spaces share it.
#[derive(Clone, Debug, Default)]
struct PropagatorStore {
    propagators: KeyedVec<PropagatorId, Propagator>,
    watch_lists: KeyedVec<DomainId, Vec<Watcher>>,
}

/// The complete mutable state of one search branch: the domains of all variables and which
/// propagators are still active.
///
/// Propagators which are entailed by the domains are deactivated; deactivation is undone when a
/// checkpoint from before it is restored. Cloning a space yields an independent branch which
/// shares only the (immutable) propagators.
#[derive(Clone, Debug, Default)]
pub struct Space {
    store: DomainStore,
    propagators: Arc<PropagatorStore>,
    is_entailed: KeyedVec<PropagatorId, bool>,
    /// The propagators deactivated at each checkpoint level
    entailment_trail: Trail<PropagatorId>,
    /// The state of the space when each open checkpoint was taken
    checkpoint_states: Vec<SpaceState>,
    queue: PropagatorQueue,
    state: SpaceState,
    failed_propagator: Option<PropagatorId>,
    num_propagations: u64,
}

impl Space {
    pub fn new_variable(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
    ) -> Result<DomainId, ConstraintOperationError> {
        let domain_id = self.store.try_grow(lower_bound, upper_bound)?;
        self.register_domain(domain_id);
        Ok(domain_id)
    }

    pub fn new_sparse_variable(
        &mut self,
        values: &[i32],
    ) -> Result<DomainId, ConstraintOperationError> {
        let domain_id = self.store.try_grow_sparse(values)?;
        self.register_domain(domain_id);
        Ok(domain_id)
    }

    fn register_domain(&mut self, domain_id: DomainId) {
        Arc::make_mut(&mut self.propagators)
            .watch_lists
            .accomodate(domain_id, Vec::new());
    }

    /// Adds a propagator which is run during the next call to [`Space::propagate`].
    pub fn add_propagator(
        &mut self,
        propagator: impl Into<Propagator>,
    ) -> Result<PropagatorId, ConstraintOperationError> {
        let propagator = propagator.into();
        let scope = propagator.scope();
        if let Some(&unknown) = scope.iter().find(|&&domain| !self.store.has_domain(domain)) {
            return Err(ConstraintOperationError::UnknownVariable(unknown));
        }

        let events = propagator.events().get_events();
        let priority = propagator.priority();

        let store = Arc::make_mut(&mut self.propagators);
        let propagator_id = store.propagators.push(propagator);
        for domain in scope {
            store.watch_lists[domain].push(Watcher {
                propagator: propagator_id,
                events,
            });
        }

        let _ = self.is_entailed.push(false);
        self.queue.enqueue_propagator(propagator_id, priority);
        if self.state == SpaceState::Stable {
            self.state = SpaceState::Propagating;
        }

        Ok(propagator_id)
    }

    /// Narrows a domain such that `predicate` holds, e.g. a branching decision. The consequences
    /// are propagated by the next call to [`Space::propagate`].
    pub fn post(&mut self, predicate: Predicate) -> Result<(), EmptyDomain> {
        if self.state == SpaceState::Failed {
            return Err(EmptyDomain);
        }

        match predicate.apply(&mut self.store) {
            Ok(true) => {
                self.state = SpaceState::Propagating;
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(EmptyDomain) => {
                self.state = SpaceState::Failed;
                Err(EmptyDomain)
            }
        }
    }

    /// Runs the active propagators until none of them can narrow a domain any further, or until
    /// one of them fails.
    pub fn propagate(&mut self) -> PropagationStatus {
        if self.state == SpaceState::Failed {
            return PropagationStatus::Failed;
        }

        let propagators = Arc::clone(&self.propagators);
        self.enqueue_watchers(&propagators);

        let mut status = PropagationStatus::NoChange;
        while let Some(propagator_id) = self.queue.pop() {
            if self.is_entailed[propagator_id] {
                continue;
            }

            let propagator = &propagators.propagators[propagator_id];
            self.num_propagations += 1;

            let mut context = PropagationContext::new(&mut self.store);
            let result = propagator.propagate_with(&mut context);
            let has_changed = context.num_changes() > 0;

            if result.is_err() {
                trace!("{} ({propagator_id}) failed", propagator.name());
                self.state = SpaceState::Failed;
                self.failed_propagator = Some(propagator_id);
                self.queue.clear();
                self.store.drain_events().for_each(drop);
                return PropagationStatus::Failed;
            }

            if has_changed {
                status = PropagationStatus::Changed;
                self.enqueue_watchers(&propagators);
            }

            if propagator.is_entailed(&self.store) {
                self.is_entailed[propagator_id] = true;
                self.entailment_trail.push(propagator_id);
            }
        }

        self.state = SpaceState::Stable;
        status
    }

    fn enqueue_watchers(&mut self, propagators: &PropagatorStore) {
        for (domain, events) in self.store.drain_events() {
            for watcher in &propagators.watch_lists[domain] {
                if watcher.events.is_disjoint(events) || self.is_entailed[watcher.propagator] {
                    continue;
                }
                self.queue.enqueue_propagator(
                    watcher.propagator,
                    propagators.propagators[watcher.propagator].priority(),
                );
            }
        }
    }

    /// Marks the current state so that it can be returned to with [`Space::restore_to`].
    pub fn checkpoint(&mut self) -> Checkpoint {
        gourd_assert_moderate!(self.store.checkpoint_depth() == self.entailment_trail.level());

        self.checkpoint_states.push(self.state);
        self.entailment_trail.new_checkpoint();
        self.store.checkpoint()
    }

    /// Undoes every change since `checkpoint` was taken, including deactivated propagators and
    /// failure. Later checkpoints are discarded along with it.
    pub fn restore_to(&mut self, checkpoint: Checkpoint) {
        self.store.restore_to(checkpoint);
        for propagator_id in self.entailment_trail.synchronise(checkpoint.depth()) {
            self.is_entailed[propagator_id] = false;
        }

        self.queue.clear();
        self.failed_propagator = None;
        self.state = self.checkpoint_states[checkpoint.depth()];
        self.checkpoint_states.truncate(checkpoint.depth());

        if self.state == SpaceState::Propagating {
            for propagator_id in self.propagators.propagators.keys() {
                if !self.is_entailed[propagator_id] {
                    self.queue.enqueue_propagator(
                        propagator_id,
                        self.propagators.propagators[propagator_id].priority(),
                    );
                }
            }
        }
    }

    pub fn state(&self) -> SpaceState {
        self.state
    }

    pub fn is_failed(&self) -> bool {
        self.state == SpaceState::Failed
    }

    /// Whether every variable is fixed.
    pub fn is_assigned(&self) -> bool {
        self.store.is_assigned()
    }

    /// The current assignment, if every variable is fixed.
    pub fn solution(&self) -> Option<Solution> {
        self.is_assigned().then(|| Solution::from_store(&self.store))
    }

    /// Checks every propagator against the solution.
    pub fn is_solution(&self, solution: &Solution) -> bool {
        self.propagators
            .propagators
            .iter()
            .all(|propagator| propagator.is_satisfied(solution))
    }

    pub fn domains(&self) -> &DomainStore {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn domains_mut(&mut self) -> &mut DomainStore {
        &mut self.store
    }

    pub fn num_variables(&self) -> usize {
        self.store.num_domains()
    }

    pub fn num_propagators(&self) -> usize {
        self.propagators.propagators.len()
    }

    pub fn propagator(&self, propagator_id: PropagatorId) -> &Propagator {
        &self.propagators.propagators[propagator_id]
    }

    pub fn is_propagator_active(&self, propagator_id: PropagatorId) -> bool {
        !self.is_entailed[propagator_id]
    }

    /// The active propagators which have `domain_id` in their scope.
    pub fn active_propagators_of(
        &self,
        domain_id: DomainId,
    ) -> impl Iterator<Item = PropagatorId> + '_ {
        self.propagators.watch_lists[domain_id]
            .iter()
            .map(|watcher| watcher.propagator)
            .filter(|&propagator_id| !self.is_entailed[propagator_id])
    }

    /// The number of active propagators which have `domain_id` in their scope.
    pub fn degree(&self, domain_id: DomainId) -> usize {
        self.active_propagators_of(domain_id).count()
    }

    /// The propagator which caused the most recent failure.
    pub fn failed_propagator(&self) -> Option<PropagatorId> {
        self.failed_propagator
    }

    /// The number of propagator invocations over the lifetime of the space.
    pub fn num_propagations(&self) -> u64 {
        self.num_propagations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::variables::TransformableVariable;
    use crate::propagators::AllDifferentConsistency;
    use crate::propagators::AllDifferentPropagator;
    use crate::propagators::NotEqualPropagator;

    fn domain_sizes(space: &Space) -> Vec<usize> {
        space
            .domains()
            .domain_ids()
            .map(|domain| space.domains().size(domain))
            .collect()
    }

    #[test]
    fn unknown_variables_are_rejected() {
        let mut other = Space::default();
        let _ = other.new_variable(0, 1).unwrap();
        let foreign = other.new_variable(0, 1).unwrap();

        let mut space = Space::default();
        let x = space.new_variable(0, 1).unwrap();

        assert_eq!(
            Err(ConstraintOperationError::UnknownVariable(foreign)),
            space.add_propagator(NotEqualPropagator::new(x, foreign))
        );
    }

    #[test]
    fn propagation_reaches_a_fixpoint() {
        let mut space = Space::default();
        let x = space.new_variable(1, 1).unwrap();
        let y = space.new_variable(1, 2).unwrap();
        let z = space.new_variable(1, 3).unwrap();
        let _ = space.add_propagator(NotEqualPropagator::new(x, y)).unwrap();
        let _ = space.add_propagator(NotEqualPropagator::new(y, z)).unwrap();
        let _ = space.add_propagator(NotEqualPropagator::new(x, z)).unwrap();

        assert_eq!(PropagationStatus::Changed, space.propagate());
        assert_eq!(SpaceState::Stable, space.state());
        assert!(space.is_assigned());
        assert_eq!(Some(3), space.domains().fixed_value(z));
    }

    #[test]
    fn second_propagation_is_no_change() {
        let mut space = Space::default();
        let vars = (0..4)
            .map(|_| space.new_variable(0, 3).unwrap())
            .collect::<Vec<_>>();
        let _ = space
            .add_propagator(AllDifferentPropagator::new(
                vars.clone(),
                AllDifferentConsistency::Domain,
            ))
            .unwrap();
        space.post(Predicate::Equal {
            domain_id: vars[0],
            value: 2,
        })
        .unwrap();

        assert_eq!(PropagationStatus::Changed, space.propagate());
        assert_eq!(PropagationStatus::NoChange, space.propagate());
    }

    #[test]
    fn domains_do_not_grow_during_propagation() {
        let mut space = Space::default();
        let queens = (0..6)
            .map(|_| space.new_variable(0, 5).unwrap())
            .collect::<Vec<_>>();
        for (i, &a) in queens.iter().enumerate() {
            for (j, &b) in queens.iter().enumerate().skip(i + 1) {
                let distance = (j - i) as i32;
                let _ = space.add_propagator(NotEqualPropagator::new(a, b)).unwrap();
                let _ = space
                    .add_propagator(NotEqualPropagator::new(a, b.offset(distance)))
                    .unwrap();
                let _ = space
                    .add_propagator(NotEqualPropagator::new(a, b.offset(-distance)))
                    .unwrap();
            }
        }

        let before = domain_sizes(&space);
        space.post(Predicate::Equal {
            domain_id: queens[0],
            value: 1,
        })
        .unwrap();
        let _ = space.propagate();
        let after = domain_sizes(&space);

        assert!(before.iter().zip(&after).all(|(before, after)| after <= before));
    }

    #[test]
    fn failure_is_recorded_and_undone_by_restore() {
        let mut space = Space::default();
        let x = space.new_variable(0, 1).unwrap();
        let y = space.new_variable(0, 1).unwrap();
        let z = space.new_variable(0, 1).unwrap();
        let propagator = space
            .add_propagator(AllDifferentPropagator::new(
                [x, y],
                AllDifferentConsistency::Value,
            ))
            .unwrap();
        let _ = space.add_propagator(NotEqualPropagator::new(y, z)).unwrap();
        assert_eq!(PropagationStatus::NoChange, space.propagate());

        let checkpoint = space.checkpoint();
        space.post(Predicate::Equal { domain_id: x, value: 0 }).unwrap();
        space.post(Predicate::Equal { domain_id: z, value: 1 }).unwrap();

        assert_eq!(PropagationStatus::Failed, space.propagate());
        assert!(space.is_failed());
        assert!(space.failed_propagator().is_some());

        space.restore_to(checkpoint);

        assert_eq!(SpaceState::Stable, space.state());
        assert!(space.is_propagator_active(propagator));
        assert_eq!(vec![2, 2, 2], domain_sizes(&space));
    }

    #[test]
    fn entailed_propagators_do_not_count_towards_degree() {
        let mut space = Space::default();
        let x = space.new_variable(0, 5).unwrap();
        let y = space.new_variable(0, 5).unwrap();
        let _ = space.add_propagator(NotEqualPropagator::new(x, y)).unwrap();
        assert_eq!(PropagationStatus::NoChange, space.propagate());
        assert_eq!(1, space.degree(x));

        let checkpoint = space.checkpoint();
        space.post(Predicate::LowerBound { domain_id: y, value: 3 }).unwrap();
        space.post(Predicate::Equal { domain_id: x, value: 1 }).unwrap();
        let _ = space.propagate();

        assert_eq!(0, space.degree(x));

        space.restore_to(checkpoint);
        assert_eq!(1, space.degree(x));
    }

    #[test]
    fn clones_do_not_share_domains() {
        let mut space = Space::default();
        let x = space.new_variable(0, 5).unwrap();

        let mut branch = space.clone();
        branch.post(Predicate::Equal { domain_id: x, value: 3 }).unwrap();

        assert_eq!(6, space.domains().size(x));
        assert_eq!(Some(3), branch.domains().fixed_value(x));
    }
}
