use super::Direction;
use super::TieBreaker;
use crate::basic_types::Random;

/// A tie breaker which selects the first variable it receives with the best score according to
/// the provided [`Direction`].
///
/// For example, with [`Direction::Minimum`], if `x2` with score 5 is considered before `x1` with
/// score 5, then `x2` is selected.
#[derive(Debug)]
pub struct InOrderTieBreaker<Var, Value> {
    selected: Option<(Var, Value)>,
    direction: Direction,
}

impl<Var, Value> InOrderTieBreaker<Var, Value> {
    pub fn new(direction: Direction) -> Self {
        Self {
            selected: None,
            direction,
        }
    }
}

impl<Var: Copy, Value: PartialOrd> TieBreaker<Var, Value> for InOrderTieBreaker<Var, Value> {
    fn consider(&mut self, variable: Var, value: Value) {
        match &self.selected {
            Some((_, selected_value)) if !self.direction.improves(&value, selected_value) => {}
            _ => self.selected = Some((variable, value)),
        }
    }

    fn select(&mut self, _random: &mut dyn Random) -> Option<Var> {
        self.selected.take().map(|(variable, _)| variable)
    }

    fn get_direction(&self) -> Direction {
        self.direction
    }
}
