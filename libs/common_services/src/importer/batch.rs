use serde::{Deserialize, Serialize};

/// Progress state of a foreground import, advanced one item at a time by
/// `step`. Pure data so a tick can be unit tested without simulating the
/// HTTP round trips that drive it in production.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchState {
    remaining: Vec<String>,
    processed: usize,
    total: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchProgress {
    pub processed: usize,
    pub total: usize,
    /// Fraction of completed work; the caller keeps ticking until this
    /// reaches 1.0.
    pub finished: f64,
    pub message: String,
}

impl BatchState {
    #[must_use]
    pub fn new(items: Vec<String>) -> Self {
        Self {
            total: items.len(),
            remaining: items,
            processed: 0,
        }
    }

    /// The next item to process together with the state after processing it,
    /// or `None` when the batch is complete.
    #[must_use]
    pub fn step(&self) -> Option<(String, Self)> {
        let (next, rest) = self.remaining.split_first()?;
        Some((
            next.clone(),
            Self {
                remaining: rest.to_vec(),
                processed: self.processed + 1,
                total: self.total,
            },
        ))
    }

    #[must_use]
    pub fn progress(&self) -> BatchProgress {
        #[allow(clippy::cast_precision_loss)]
        let finished = if self.total == 0 {
            1.0
        } else {
            self.processed as f64 / self.total as f64
        };
        BatchProgress {
            processed: self.processed,
            total: self.total,
            finished,
            message: format!(
                "Now processing item {} of {}",
                self.processed, self.total
            ),
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.remaining.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// The status message shown once the whole batch has been processed.
    #[must_use]
    pub fn completion_report(&self) -> String {
        format!("Imported {} photos", self.processed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processes_one_item_per_step_until_done() {
        let ids: Vec<String> = (1..=5).map(|i| format!("item-{i}")).collect();
        let mut state = BatchState::new(ids.clone());
        let mut seen = Vec::new();

        for expected_processed in 1..=5 {
            let (item, next) = state.step().expect("batch ended early");
            seen.push(item);
            assert_eq!(next.processed, expected_processed);
            #[allow(clippy::cast_precision_loss)]
            let expected_fraction = expected_processed as f64 / 5.0;
            assert!((next.progress().finished - expected_fraction).abs() < f64::EPSILON);
            state = next;
        }

        assert_eq!(seen, ids);
        assert!(state.is_done());
        assert!(state.step().is_none());
        assert_eq!(state.completion_report(), "Imported 5 photos");
    }

    #[test]
    fn progress_message_counts_from_one() {
        let state = BatchState::new(vec!["a".into(), "b".into()]);
        let (_, after_first) = state.step().unwrap();

        assert_eq!(after_first.progress().message, "Now processing item 1 of 2");
    }

    #[test]
    fn empty_batch_is_immediately_done() {
        let state = BatchState::new(Vec::new());

        assert!(state.is_done());
        assert!(state.step().is_none());
        assert!((state.progress().finished - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn state_round_trips_through_json() {
        let state = BatchState::new(vec!["x".into(), "y".into()]);
        let (_, advanced) = state.step().unwrap();

        let json = serde_json::to_string(&advanced).unwrap();
        let restored: BatchState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, advanced);
    }
}
