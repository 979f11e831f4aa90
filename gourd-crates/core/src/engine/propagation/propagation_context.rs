use crate::basic_types::PropagationStatusCP;
use crate::engine::domains::DomainStore;
use crate::engine::variables::DomainValues;
use crate::engine::variables::IntegerVariable;

/// The view of the domains handed to a propagator while it runs. Reads go straight to the store;
/// narrowings report [`EmptyDomain`](crate::basic_types::EmptyDomain) so that the propagator can
/// bail out with `?`.
#[derive(Debug)]
pub(crate) struct PropagationContext<'a> {
    store: &'a mut DomainStore,
    num_changes: usize,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(store: &'a mut DomainStore) -> Self {
        PropagationContext {
            store,
            num_changes: 0,
        }
    }

    /// The number of narrowing operations which changed a domain through this context.
    pub(crate) fn num_changes(&self) -> usize {
        self.num_changes
    }

    fn record(&mut self, changed: bool) -> PropagationStatusCP {
        if changed {
            self.num_changes += 1;
        }
        Ok(())
    }

    pub(crate) fn store(&self) -> &DomainStore {
        self.store
    }

    pub(crate) fn lower_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.lower_bound(self.store)
    }

    pub(crate) fn upper_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.upper_bound(self.store)
    }

    pub(crate) fn contains<Var: IntegerVariable>(&self, var: &Var, value: i32) -> bool {
        var.contains(self.store, value)
    }

    pub(crate) fn size<Var: IntegerVariable>(&self, var: &Var) -> usize {
        var.size(self.store)
    }

    pub(crate) fn fixed_value<Var: IntegerVariable>(&self, var: &Var) -> Option<i32> {
        var.fixed_value(self.store)
    }

    pub(crate) fn iterate_domain<Var: IntegerVariable>(&self, var: &Var) -> DomainValues<'_> {
        var.iterate_domain(self.store)
    }

    pub(crate) fn remove<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        value: i32,
    ) -> PropagationStatusCP {
        let changed = var.remove(self.store, value)?;
        self.record(changed)
    }

    pub(crate) fn set_lower_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> PropagationStatusCP {
        let changed = var.set_lower_bound(self.store, bound)?;
        self.record(changed)
    }

    pub(crate) fn set_upper_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> PropagationStatusCP {
        let changed = var.set_upper_bound(self.store, bound)?;
        self.record(changed)
    }

    pub(crate) fn assign<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        value: i32,
    ) -> PropagationStatusCP {
        let changed = var.assign(self.store, value)?;
        self.record(changed)
    }
}
