use std::fmt::Debug;

use crate::basic_types::EmptyDomain;
use crate::basic_types::Solution;
use crate::engine::variables::DomainId;
use crate::engine::variables::DomainValues;
use crate::engine::variables::OffsetView;
use crate::engine::DomainStore;

/// The behaviour shared by every integer variable, read and written through the
/// [`DomainStore`]. All operations are expressed in terms of the values of the variable, any
/// translation to the underlying domain is taken care of by the implementation.
///
/// Every variable can be expressed as an [`OffsetView`], which is the form in which propagators
/// store their scope.
pub trait IntegerVariable: Copy + Debug {
    /// The variable as an offset view over its domain.
    fn view(&self) -> OffsetView;

    /// The value of this variable in the given solution.
    fn solution_value(&self, solution: &Solution) -> i32;

    fn domain_id(&self) -> DomainId {
        self.view().domain()
    }

    fn lower_bound(&self, store: &DomainStore) -> i32 {
        self.view().lower_bound(store)
    }

    fn upper_bound(&self, store: &DomainStore) -> i32 {
        self.view().upper_bound(store)
    }

    fn contains(&self, store: &DomainStore, value: i32) -> bool {
        self.view().contains(store, value)
    }

    fn size(&self, store: &DomainStore) -> usize {
        store.size(self.domain_id())
    }

    fn is_fixed(&self, store: &DomainStore) -> bool {
        store.is_fixed(self.domain_id())
    }

    /// The value of the variable if its domain is a singleton.
    fn fixed_value(&self, store: &DomainStore) -> Option<i32> {
        self.view().fixed_value(store)
    }

    /// The values of the domain in increasing order.
    fn iterate_domain<'a>(&self, store: &'a DomainStore) -> DomainValues<'a> {
        self.view().iterate_domain(store)
    }

    /// Removes `value`; returns whether the domain changed.
    fn remove(&self, store: &mut DomainStore, value: i32) -> Result<bool, EmptyDomain> {
        self.view().remove(store, value)
    }

    fn set_lower_bound(&self, store: &mut DomainStore, bound: i32) -> Result<bool, EmptyDomain> {
        self.view().set_lower_bound(store, bound)
    }

    fn set_upper_bound(&self, store: &mut DomainStore, bound: i32) -> Result<bool, EmptyDomain> {
        self.view().set_upper_bound(store, bound)
    }

    fn assign(&self, store: &mut DomainStore, value: i32) -> Result<bool, EmptyDomain> {
        self.view().assign(store, value)
    }
}
