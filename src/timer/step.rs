//! Step and step sequence types

use serde::{Deserialize, Serialize};

/// One timed instruction within a brew recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// 1-based position within the sequence
    pub ordinal: u32,
    pub label: String,
    pub duration_seconds: u64,
}

impl Step {
    pub fn new(label: impl Into<String>, duration_seconds: u64) -> Self {
        Self {
            ordinal: 0,
            label: label.into(),
            duration_seconds,
        }
    }
}

/// Ordered steps belonging to one recipe, keyed by a stable identifier
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSequence {
    id: String,
    steps: Vec<Step>,
}

impl StepSequence {
    /// Build a sequence, renumbering ordinals densely from 1
    pub fn new(id: impl Into<String>, steps: Vec<Step>) -> Self {
        let steps = steps
            .into_iter()
            .zip(1u32..)
            .map(|(step, ordinal)| Step { ordinal, ..step })
            .collect();

        Self {
            id: id.into(),
            steps,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Sum of all step durations, saturating at `u64::MAX`
    pub fn total_duration(&self) -> u64 {
        self.steps
            .iter()
            .map(|s| s.duration_seconds)
            .fold(0, u64::saturating_add)
    }

    /// Sum of the durations of every step strictly before `index`
    pub fn duration_before(&self, index: usize) -> u64 {
        self.steps
            .iter()
            .take(index)
            .map(|s| s.duration_seconds)
            .fold(0, u64::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_are_dense_and_one_based() {
        let mut bloom = Step::new("Bloom", 30);
        bloom.ordinal = 7;
        let seq = StepSequence::new("v60", vec![bloom, Step::new("Pour", 60), Step::new("Drain", 45)]);

        let ordinals: Vec<u32> = seq.steps().iter().map(|s| s.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3]);
    }

    #[test]
    fn totals_and_prefix_sums() {
        let seq = StepSequence::new("v60", vec![Step::new("Bloom", 30), Step::new("Pour", 60), Step::new("Drain", 45)]);

        assert_eq!(seq.total_duration(), 135);
        assert_eq!(seq.duration_before(0), 0);
        assert_eq!(seq.duration_before(2), 90);
        assert_eq!(seq.duration_before(10), 135);
    }

    #[test]
    fn oversized_durations_saturate() {
        let seq = StepSequence::new("huge", vec![Step::new("Soak", u64::MAX), Step::new("Pour", 1)]);

        assert_eq!(seq.total_duration(), u64::MAX);
        assert_eq!(seq.duration_before(1), u64::MAX);
        assert_eq!(seq.duration_before(2), u64::MAX);
    }

    #[test]
    fn empty_sequence_is_valid() {
        let seq = StepSequence::new("empty", Vec::new());
        assert!(seq.is_empty());
        assert_eq!(seq.total_duration(), 0);
        assert!(seq.get(0).is_none());
    }
}
