use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::engine::scoring::compute_wpm;
use crate::generator::passage::Passage;
use crate::session::input::{self, CellState};
use crate::session::result::SessionStats;
use crate::session::timer::Ticker;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading,
    Ready,
    Running,
    Finished,
}

/// All mutable state of one practice run over a fixed passage. A restart
/// replaces the whole value.
pub struct Session {
    passage: Passage,
    cells: Vec<CellState>,
    cursor: Option<usize>,
    typed_len: usize,
    stats: SessionStats,
    state: SessionState,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
    ticker: Ticker,
}

impl Session {
    /// A session over an empty passage stays `Idle` and accepts no input.
    pub fn start(passage: Passage) -> Self {
        let mut cells = vec![CellState::Untouched; passage.len()];
        let cursor = if cells.is_empty() {
            None
        } else {
            cells[0] = CellState::Current;
            Some(0)
        };
        let state = if passage.is_empty() {
            SessionState::Idle
        } else {
            SessionState::Ready
        };

        Self {
            passage,
            cells,
            cursor,
            typed_len: 0,
            stats: SessionStats::default(),
            state,
            started_at: None,
            finished_at: None,
            ticker: Ticker::default(),
        }
    }

    pub fn passage(&self) -> &Passage {
        &self.passage
    }

    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn typed_len(&self) -> usize {
        self.typed_len
    }

    pub fn accepts_input(&self) -> bool {
        matches!(self.state, SessionState::Ready | SessionState::Running)
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    pub fn timer_running(&self) -> bool {
        self.ticker.is_armed()
    }

    pub fn progress(&self) -> f64 {
        if self.passage.is_empty() {
            return 0.0;
        }
        self.typed_len.min(self.passage.len()) as f64 / self.passage.len() as f64
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.duration_since(start),
            (Some(start), None) => now.saturating_duration_since(start),
            _ => Duration::ZERO,
        }
    }

    pub fn on_input(&mut self, typed: &str) {
        self.on_input_at(typed, Instant::now());
    }

    /// Re-aligns the session with the full text typed so far.
    pub fn on_input_at(&mut self, typed: &str, now: Instant) {
        if !self.accepts_input() {
            return;
        }

        if self.started_at.is_none() {
            self.started_at = Some(now);
            self.ticker.arm(now);
            self.state = SessionState::Running;
            debug!(chars = self.passage.len(), "session timer started");
        }

        let typed: Vec<char> = typed.chars().collect();
        let target = self.passage.chars();
        let new_len = typed.len();

        if new_len > self.typed_len {
            let tally = input::mark_new(&mut self.cells, target, &typed, self.typed_len);
            self.stats.correct += tally.correct;
            self.stats.errors += tally.errors;
        } else {
            // Deletions (and same-length edits) can touch any earlier cell,
            // so counts are rebuilt rather than decremented.
            let tally = input::rescore(&mut self.cells, target, &typed);
            self.stats.correct = tally.correct;
            self.stats.errors = tally.errors;
        }
        self.typed_len = new_len;
        self.move_cursor(new_len);

        if new_len == self.passage.len() {
            self.finish(now);
        }
    }

    pub fn on_tick(&mut self) -> bool {
        self.on_tick_at(Instant::now())
    }

    /// Refreshes the elapsed seconds and live WPM when a tick is due.
    pub fn on_tick_at(&mut self, now: Instant) -> bool {
        if self.ticker.poll(now) == 0 {
            return false;
        }
        let elapsed = self.elapsed(now);
        self.stats.elapsed_secs = elapsed.as_secs();
        self.stats.wpm = compute_wpm(self.stats.correct, elapsed);
        true
    }

    fn move_cursor(&mut self, idx: usize) {
        if let Some(prev) = self.cursor.take() {
            if self.cells.get(prev) == Some(&CellState::Current) {
                self.cells[prev] = CellState::Untouched;
            }
        }
        if idx < self.cells.len() {
            self.cells[idx] = CellState::Current;
            self.cursor = Some(idx);
        }
    }

    fn finish(&mut self, now: Instant) {
        self.ticker.cancel();
        self.finished_at = Some(now);
        let elapsed = self.elapsed(now);
        self.stats.elapsed_secs = elapsed.as_secs();
        self.stats.wpm = compute_wpm(self.stats.correct, elapsed);
        self.state = SessionState::Finished;
        info!(
            correct = self.stats.correct,
            errors = self.stats.errors,
            elapsed_secs = self.stats.elapsed_secs,
            wpm = self.stats.wpm,
            "session finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(text: &str) -> Session {
        Session::start(Passage::new(text))
    }

    fn current_count(session: &Session) -> usize {
        session
            .cells()
            .iter()
            .filter(|c| **c == CellState::Current)
            .count()
    }

    #[test]
    fn test_start_marks_first_cell_current() {
        let s = session("سلام");
        assert_eq!(s.state(), SessionState::Ready);
        assert_eq!(s.cells()[0], CellState::Current);
        assert!(s.cells()[1..].iter().all(|c| *c == CellState::Untouched));
        assert_eq!(s.stats(), SessionStats::default());
        assert!(!s.timer_running());
    }

    #[test]
    fn test_empty_passage_never_starts() {
        let mut s = session("");
        assert_eq!(s.state(), SessionState::Idle);
        assert!(!s.accepts_input());
        s.on_input("ا");
        assert_eq!(s.state(), SessionState::Idle);
        assert!(!s.timer_running());
        assert!(s.cells().is_empty());
    }

    #[test]
    fn test_first_input_starts_timer() {
        let mut s = session("سلام");
        s.on_input("س");
        assert_eq!(s.state(), SessionState::Running);
        assert!(s.timer_running());
        assert_eq!(s.cursor(), Some(1));
        assert_eq!(s.cells()[0], CellState::Correct);
        assert_eq!(s.cells()[1], CellState::Current);
    }

    #[test]
    fn test_wrong_char_is_incorrect() {
        let mut s = session("سلام");
        s.on_input("ش");
        assert_eq!(s.cells()[0], CellState::Incorrect);
        assert_eq!(s.stats().errors, 1);
        assert_eq!(s.stats().correct, 0);
    }

    #[test]
    fn test_equivalent_letters_count_as_correct() {
        let mut s = session("أمة");
        s.on_input("1مه");
        assert_eq!(s.stats().correct, 3);
        assert_eq!(s.stats().errors, 0);
        assert!(s.is_finished());
    }

    #[test]
    fn test_deletion_matches_fresh_typing() {
        let mut edited = session("ابجد");
        edited.on_input("ا");
        edited.on_input("اب");
        edited.on_input("ابت");
        edited.on_input("اب");
        edited.on_input("ا");
        edited.on_input("اد");

        let mut fresh = session("ابجد");
        fresh.on_input("ا");
        fresh.on_input("اد");

        assert_eq!(edited.cells(), fresh.cells());
        assert_eq!(edited.stats().correct, fresh.stats().correct);
        assert_eq!(edited.stats().errors, fresh.stats().errors);
        assert_eq!(edited.stats().errors, 1);
    }

    #[test]
    fn test_delete_everything_resets_counts() {
        let mut s = session("ابجد");
        s.on_input("اخ");
        s.on_input("");
        assert_eq!(s.stats().correct, 0);
        assert_eq!(s.stats().errors, 0);
        assert_eq!(s.cells()[0], CellState::Current);
        assert!(s.cells()[1..].iter().all(|c| *c == CellState::Untouched));
        assert_eq!(s.state(), SessionState::Running);
    }

    #[test]
    fn test_at_most_one_current_cell() {
        let mut s = session("ابجد هوز");
        for typed in ["ا", "اب", "ا", "اخج", "", "ابجد ه"] {
            s.on_input(typed);
            assert!(current_count(&s) <= 1, "after {typed:?}");
            assert_eq!(s.cells().len(), s.passage().len());
        }
        assert_eq!(current_count(&s), 1);
    }

    #[test]
    fn test_finishes_only_at_full_length_despite_errors() {
        let mut s = session("ابج");
        s.on_input("خ");
        s.on_input("خخ");
        assert_eq!(s.state(), SessionState::Running);
        s.on_input("خخخ");
        assert_eq!(s.state(), SessionState::Finished);
        assert_eq!(s.stats().errors, 3);
        assert!(!s.timer_running());
        assert!(!s.accepts_input());
        assert_eq!(s.cursor(), None);
        assert_eq!(current_count(&s), 0);
    }

    #[test]
    fn test_input_after_finish_is_ignored() {
        let mut s = session("اب");
        s.on_input("اب");
        s.on_input("ا");
        assert!(s.is_finished());
        assert_eq!(s.stats().correct, 2);
    }

    #[test]
    fn test_overlong_input_does_not_panic_or_finish() {
        let mut s = session("اب");
        s.on_input("ا");
        s.on_input("ابجد");
        assert_eq!(s.stats().correct, 2);
        assert_eq!(s.state(), SessionState::Running);
        s.on_input("اب");
        assert_eq!(s.state(), SessionState::Finished);
    }

    #[test]
    fn test_ticks_update_elapsed_seconds() {
        let t0 = Instant::now();
        let mut s = session("ابجد");
        s.on_input_at("ا", t0);
        assert!(!s.on_tick_at(t0 + Duration::from_millis(900)));
        assert!(s.on_tick_at(t0 + Duration::from_millis(1000)));
        assert_eq!(s.stats().elapsed_secs, 1);
        assert!(s.on_tick_at(t0 + Duration::from_millis(3500)));
        assert_eq!(s.stats().elapsed_secs, 3);
    }

    #[test]
    fn test_no_ticks_before_first_input() {
        let mut s = session("ابجد");
        assert!(!s.on_tick_at(Instant::now() + Duration::from_secs(5)));
        assert_eq!(s.stats().elapsed_secs, 0);
    }

    #[test]
    fn test_instant_completion_has_zero_wpm() {
        let t0 = Instant::now();
        let mut s = session("ا");
        s.on_input_at("ا", t0);
        assert!(s.is_finished());
        assert_eq!(s.stats().elapsed_secs, 0);
        assert_eq!(s.stats().wpm, 0);
    }

    #[test]
    fn test_one_minute_run_with_one_substitution() {
        let t0 = Instant::now();
        let mut s = session("ابجد");
        s.on_input_at("ا", t0);
        s.on_input_at("اب", t0 + Duration::from_secs(20));
        s.on_input_at("ابخ", t0 + Duration::from_secs(40));
        s.on_input_at("ابخد", t0 + Duration::from_secs(60));

        let stats = s.stats();
        assert_eq!(stats.correct, 3);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.elapsed_secs, 60);
        assert_eq!(stats.wpm, 1);
        assert_eq!(s.state(), SessionState::Finished);
        assert_eq!(s.cells()[2], CellState::Incorrect);
    }
}
