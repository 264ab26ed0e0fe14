/// Per-position progress for one embed run.
///
/// `total` is fixed when extraction finishes and counts cell positions, not
/// unique URLs; `completed` only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn start(total: usize) -> Self {
        Self {
            completed: 0,
            total,
        }
    }

    pub fn advance(&mut self) {
        self.completed += 1;
    }

    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::Progress;

    #[test]
    fn advances_to_completion() {
        let mut progress = Progress::start(2);
        assert!(!progress.is_done());
        progress.advance();
        progress.advance();
        assert_eq!(progress, Progress { completed: 2, total: 2 });
        assert!(progress.is_done());
    }

    #[test]
    fn empty_run_is_immediately_done() {
        assert!(Progress::start(0).is_done());
    }
}
