use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Evaluation outcome of an individual; empty until an evaluator fills it in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fitness {
    pub values: Option<Vec<f64>>,
    pub start_time: Option<DateTime<Utc>>,
    /// Evaluation wall time in seconds.
    pub time: Option<f64>,
}

impl Fitness {
    pub fn is_evaluated(&self) -> bool {
        self.values.is_some()
    }

    pub fn record(&mut self, values: Vec<f64>, start_time: DateTime<Utc>, seconds: f64) {
        self.values = Some(values);
        self.start_time = Some(start_time);
        self.time = Some(seconds);
    }

    pub fn reset(&mut self) {
        *self = Fitness::default();
    }
}

impl fmt::Display for Fitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.values, self.time) {
            (Some(values), Some(time)) => write!(f, "{:?} ({:.3}s)", values, time),
            (Some(values), None) => write!(f, "{:?}", values),
            (None, _) => write!(f, "None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_reset() {
        let mut fitness = Fitness::default();
        assert!(!fitness.is_evaluated());
        assert_eq!(fitness.to_string(), "None");

        fitness.record(vec![0.9, -3.0], Utc::now(), 1.5);
        assert!(fitness.is_evaluated());
        assert_eq!(fitness.to_string(), "[0.9, -3.0] (1.500s)");

        fitness.reset();
        assert_eq!(fitness, Fitness::default());
    }
}
