use crate::basic_types::EmptyDomain;
use crate::basic_types::Solution;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::TransformableVariable;
use crate::engine::domains::DomainIterator;
use crate::engine::DomainStore;

/// Models `y = x + offset` by expressing the domain of `y` as a shift of the domain of `x`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct OffsetView {
    domain: DomainId,
    offset: i32,
}

impl OffsetView {
    pub fn new(domain: DomainId, offset: i32) -> Self {
        OffsetView { domain, offset }
    }

    pub fn domain(&self) -> DomainId {
        self.domain
    }

    pub fn offset_value(&self) -> i32 {
        self.offset
    }

    /// Maps a value of the view to a value of the domain, or `None` if it does not fit an `i32`
    /// and can therefore not be part of the domain.
    fn invert(&self, value: i32) -> Option<i32> {
        value.checked_sub(self.offset)
    }

    /// Like [`OffsetView::invert`], but saturating; used for bounds.
    fn invert_saturating(&self, value: i32) -> i32 {
        value.saturating_sub(self.offset)
    }

    fn map(&self, value: i32) -> i32 {
        value + self.offset
    }

    pub(crate) fn lower_bound(&self, store: &DomainStore) -> i32 {
        self.map(store.lower_bound(self.domain))
    }

    pub(crate) fn upper_bound(&self, store: &DomainStore) -> i32 {
        self.map(store.upper_bound(self.domain))
    }

    pub(crate) fn contains(&self, store: &DomainStore, value: i32) -> bool {
        self.invert(value)
            .is_some_and(|inner| store.contains(self.domain, inner))
    }

    pub(crate) fn fixed_value(&self, store: &DomainStore) -> Option<i32> {
        store.fixed_value(self.domain).map(|value| self.map(value))
    }

    pub(crate) fn iterate_domain<'a>(&self, store: &'a DomainStore) -> DomainValues<'a> {
        DomainValues {
            values: store.domain(self.domain).iter(),
            offset: self.offset,
        }
    }

    pub(crate) fn remove(&self, store: &mut DomainStore, value: i32) -> Result<bool, EmptyDomain> {
        match self.invert(value) {
            Some(inner) => store.remove(self.domain, inner),
            None => Ok(false),
        }
    }

    pub(crate) fn set_lower_bound(
        &self,
        store: &mut DomainStore,
        bound: i32,
    ) -> Result<bool, EmptyDomain> {
        store.set_lower_bound(self.domain, self.invert_saturating(bound))
    }

    pub(crate) fn set_upper_bound(
        &self,
        store: &mut DomainStore,
        bound: i32,
    ) -> Result<bool, EmptyDomain> {
        store.set_upper_bound(self.domain, self.invert_saturating(bound))
    }

    pub(crate) fn assign(&self, store: &mut DomainStore, value: i32) -> Result<bool, EmptyDomain> {
        match self.invert(value) {
            Some(inner) => store.assign(self.domain, inner),
            None => Err(EmptyDomain),
        }
    }
}

/// The values of a variable in increasing order.
#[derive(Debug)]
pub struct DomainValues<'a> {
    values: DomainIterator<'a>,
    offset: i32,
}

impl Iterator for DomainValues<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        self.values.next().map(|value| value + self.offset)
    }
}

impl IntegerVariable for OffsetView {
    fn view(&self) -> OffsetView {
        *self
    }

    fn solution_value(&self, solution: &Solution) -> i32 {
        self.map(solution.value_of_domain(self.domain))
    }
}

impl TransformableVariable for OffsetView {
    fn offset(&self, offset: i32) -> OffsetView {
        OffsetView::new(self.domain, self.offset + offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_shifted_by_the_offset() {
        let mut store = DomainStore::default();
        let x = store.grow(1, 5);
        let view = x.offset(-3);

        assert_eq!(-2, view.lower_bound(&store));
        assert_eq!(2, view.upper_bound(&store));
        assert!(view.contains(&store, 0));
        assert!(!view.contains(&store, 3));
    }

    #[test]
    fn removing_through_view_removes_shifted_value() {
        let mut store = DomainStore::default();
        let x = store.grow(1, 5);
        let view = x.offset(10);

        assert_eq!(Ok(true), view.remove(&mut store, 13));
        assert!(!store.contains(x, 3));
        assert_eq!(Ok(false), view.remove(&mut store, 3));
    }

    #[test]
    fn bounds_tightened_through_view_are_mapped_back() {
        let mut store = DomainStore::default();
        let x = store.grow(0, 9);
        let view = x.offset(2).offset(3);

        assert_eq!(Ok(true), view.set_lower_bound(&mut store, 8));
        assert_eq!(Ok(true), view.set_upper_bound(&mut store, 10));

        assert_eq!(3, store.lower_bound(x));
        assert_eq!(5, store.upper_bound(x));
    }

    #[test]
    fn extreme_values_are_never_contained() {
        let mut store = DomainStore::default();
        let x = store.grow(0, 3);
        let view = x.offset(-1);

        assert!(!view.contains(&store, i32::MAX));
        assert_eq!(Ok(false), view.remove(&mut store, i32::MAX));
        assert_eq!(Err(EmptyDomain), view.assign(&mut store, i32::MAX));
    }
}
