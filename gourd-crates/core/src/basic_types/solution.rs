use crate::containers::StorageKey;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::DomainStore;
use crate::gourd_assert_simple;

/// A complete assignment of values to every domain of the problem.
///
/// A solution is detached from the solver: it stays valid after the search moves on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Solution {
    values: Box<[i32]>,
}

impl Solution {
    /// Captures the values of a store in which every domain is fixed.
    pub(crate) fn from_store(store: &DomainStore) -> Self {
        let values = store
            .domain_ids()
            .map(|domain| {
                gourd_assert_simple!(
                    store.is_fixed(domain),
                    "Cannot create a solution while {domain} is unfixed"
                );
                store.lower_bound(domain)
            })
            .collect();

        Solution { values }
    }

    #[cfg(test)]
    pub(crate) fn new(values: Vec<i32>) -> Self {
        Solution {
            values: values.into_boxed_slice(),
        }
    }

    pub fn num_domains(&self) -> usize {
        self.values.len()
    }

    pub fn get_integer_value<Var: IntegerVariable>(&self, var: Var) -> i32 {
        var.solution_value(self)
    }

    pub(crate) fn value_of_domain(&self, domain: DomainId) -> i32 {
        self.values[domain.index()]
    }

    /// The values indexed by domain, in order of creation.
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// The value of every domain, in order of creation.
    pub fn iter(&self) -> impl Iterator<Item = (DomainId, i32)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(index, value)| (DomainId::create_from_index(index), *value))
    }
}
