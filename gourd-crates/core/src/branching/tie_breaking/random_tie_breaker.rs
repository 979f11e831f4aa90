use super::Direction;
use super::TieBreaker;
use crate::basic_types::Random;

/// A tie breaker which selects uniformly at random among the variables with the best score
/// according to the [`Direction`].
///
/// The tied candidates are collected while considering; a better score discards the candidates
/// collected so far.
#[derive(Debug)]
pub struct RandomTieBreaker<Var, Value> {
    candidates: Vec<Var>,
    best_value: Option<Value>,
    direction: Direction,
}

impl<Var, Value> RandomTieBreaker<Var, Value> {
    pub fn new(direction: Direction) -> Self {
        Self {
            candidates: Vec::new(),
            best_value: None,
            direction,
        }
    }
}

impl<Var: Copy, Value: PartialOrd> TieBreaker<Var, Value> for RandomTieBreaker<Var, Value> {
    fn consider(&mut self, variable: Var, value: Value) {
        match &self.best_value {
            Some(best) if self.direction.improves(&value, best) => {
                self.candidates.clear();
                self.candidates.push(variable);
                self.best_value = Some(value);
            }
            Some(best) if value == *best => self.candidates.push(variable),
            Some(_) => {}
            None => {
                self.candidates.push(variable);
                self.best_value = Some(value);
            }
        }
    }

    fn select(&mut self, random: &mut dyn Random) -> Option<Var> {
        self.best_value = None;
        let selected = match self.candidates.len() {
            0 => None,
            1 => Some(self.candidates[0]),
            num_candidates => {
                Some(self.candidates[random.generate_usize_in_range(0..num_candidates)])
            }
        };
        self.candidates.clear();
        selected
    }

    fn get_direction(&self) -> Direction {
        self.direction
    }
}
