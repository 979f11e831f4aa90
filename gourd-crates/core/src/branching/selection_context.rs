use crate::basic_types::Random;
use crate::engine::propagation::PropagatorId;
use crate::engine::variables::DomainId;
use crate::engine::variables::DomainValues;
use crate::engine::variables::IntegerVariable;
use crate::engine::Space;

/// The read-only view of the search state handed to branchers, together with the random
/// generator of the solver.
#[derive(Debug)]
pub struct SelectionContext<'a> {
    space: &'a Space,
    random: &'a mut dyn Random,
}

impl<'a> SelectionContext<'a> {
    pub fn new(space: &'a Space, random: &'a mut dyn Random) -> Self {
        SelectionContext { space, random }
    }

    pub fn random(&mut self) -> &mut dyn Random {
        self.random
    }

    pub fn is_fixed(&self, var: DomainId) -> bool {
        var.is_fixed(self.space.domains())
    }

    pub fn size(&self, var: DomainId) -> usize {
        var.size(self.space.domains())
    }

    pub fn lower_bound(&self, var: DomainId) -> i32 {
        var.lower_bound(self.space.domains())
    }

    pub fn upper_bound(&self, var: DomainId) -> i32 {
        var.upper_bound(self.space.domains())
    }

    pub fn contains(&self, var: DomainId, value: i32) -> bool {
        var.contains(self.space.domains(), value)
    }

    pub fn domain_values(&self, var: DomainId) -> DomainValues<'_> {
        var.iterate_domain(self.space.domains())
    }

    /// The number of active propagators which have `var` in their scope.
    pub fn degree(&self, var: DomainId) -> usize {
        self.space.degree(var)
    }

    pub fn active_propagators_of(&self, var: DomainId) -> impl Iterator<Item = PropagatorId> + '_ {
        self.space.active_propagators_of(var)
    }

    pub fn num_propagators(&self) -> usize {
        self.space.num_propagators()
    }

    /// A space with a variable for each of the given bounds, to construct contexts in tests.
    #[cfg(test)]
    pub(crate) fn create_for_testing(bounds: &[(i32, i32)]) -> Space {
        let mut space = Space::default();
        for &(lower_bound, upper_bound) in bounds {
            let _ = space
                .new_variable(lower_bound, upper_bound)
                .expect("Test domains should be non-empty");
        }
        space
    }
}
