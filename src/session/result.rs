/// Live and final numbers of one session. Reset to zero at session start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub elapsed_secs: u64,
    pub correct: usize,
    pub errors: usize,
    pub wpm: u32,
}

impl SessionStats {
    pub fn typed(&self) -> usize {
        self.correct + self.errors
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.typed();
        if total == 0 {
            return 100.0;
        }
        (self.correct as f64 / total as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_starts_at_100() {
        assert_eq!(SessionStats::default().accuracy(), 100.0);
    }

    #[test]
    fn test_accuracy_ratio() {
        let stats = SessionStats {
            correct: 3,
            errors: 1,
            ..Default::default()
        };
        assert_eq!(stats.typed(), 4);
        assert_eq!(stats.accuracy(), 75.0);
    }
}
