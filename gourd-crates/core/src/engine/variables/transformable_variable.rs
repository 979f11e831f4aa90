use crate::engine::variables::OffsetView;

/// Variables which can be shifted by a constant without introducing a new domain.
pub trait TransformableVariable {
    /// The view `self + offset`.
    fn offset(&self, offset: i32) -> OffsetView;
}
