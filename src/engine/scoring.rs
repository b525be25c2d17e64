use std::time::Duration;

/// Characters per conventional "word" in typing-speed metrics.
pub const CHARS_PER_WORD: f64 = 5.0;

/// `round((correct / 5) / minutes)`, or 0 when no time has elapsed.
pub fn compute_wpm(correct_chars: usize, elapsed: Duration) -> u32 {
    if elapsed.is_zero() {
        return 0;
    }
    let minutes = elapsed.as_secs_f64() / 60.0;
    let wpm = (correct_chars as f64 / CHARS_PER_WORD) / minutes;
    if wpm.is_finite() { wpm.round() as u32 } else { 0 }
}
