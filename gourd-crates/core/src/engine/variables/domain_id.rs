use std::fmt::Display;

use crate::basic_types::Solution;
use crate::containers::StorageKey;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::OffsetView;
use crate::engine::variables::TransformableVariable;

/// A handle to a domain in the [`DomainStore`](crate::engine::DomainStore).
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct DomainId {
    id: u32,
}

impl DomainId {
    pub(crate) fn new(id: u32) -> Self {
        DomainId { id }
    }

    pub fn id(&self) -> u32 {
        self.id
    }
}

impl IntegerVariable for DomainId {
    fn view(&self) -> OffsetView {
        OffsetView::new(*self, 0)
    }

    fn solution_value(&self, solution: &Solution) -> i32 {
        solution.value_of_domain(*self)
    }
}

impl TransformableVariable for DomainId {
    fn offset(&self, offset: i32) -> OffsetView {
        OffsetView::new(*self, offset)
    }
}

impl StorageKey for DomainId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        DomainId { id: index as u32 }
    }
}

impl Display for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}
