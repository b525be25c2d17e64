use crate::engine::normalize::chars_match;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Untouched,
    Current,
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub correct: usize,
    pub errors: usize,
}

impl Tally {
    fn record(&mut self, state: CellState) {
        match state {
            CellState::Correct => self.correct += 1,
            CellState::Incorrect => self.errors += 1,
            _ => {}
        }
    }
}

pub fn score_char(expected: char, typed: char) -> CellState {
    if chars_match(typed, expected) {
        CellState::Correct
    } else {
        CellState::Incorrect
    }
}

/// Scores the typed characters at indices `from..typed.len()` that fall
/// inside the target, leaving earlier cells alone.
pub fn mark_new(cells: &mut [CellState], target: &[char], typed: &[char], from: usize) -> Tally {
    let mut tally = Tally::default();
    let end = typed.len().min(target.len());
    for idx in from.min(end)..end {
        let state = score_char(target[idx], typed[idx]);
        cells[idx] = state;
        tally.record(state);
    }
    tally
}

/// Clears every cell from `typed.len()` onward and rescores the typed prefix
/// from scratch.
pub fn rescore(cells: &mut [CellState], target: &[char], typed: &[char]) -> Tally {
    let end = typed.len().min(target.len());
    for cell in &mut cells[end..] {
        *cell = CellState::Untouched;
    }
    mark_new(cells, target, typed, 0)
}
