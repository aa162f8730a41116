//! Result interpreter: turns a raw probability vector into a labeled
//! prediction with an application category and reward points.

use std::fmt;

use crate::error::PipelineError;
use crate::taxonomy::{WasteCategory, WasteClass};

/// Default minimum confidence for the CLI's `uncertain` fallback.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

// ---------------------------------------------------------------------------
// Prediction record
// ---------------------------------------------------------------------------

/// A fully interpreted model output. Immutable once built; never persisted.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Argmax class from the model's native label set.
    pub class: WasteClass,
    /// The maximum probability itself, not re-normalized.
    pub confidence: f32,
    /// Application-facing category after remapping.
    pub category: WasteCategory,
    /// Reward points for the category.
    pub points: u32,
    /// Per-class probabilities in model output order.
    pub scores: Vec<(WasteClass, f32)>,
}

impl Prediction {
    /// Applies the confidence threshold used by the standalone prediction
    /// CLI. The HTTP endpoints deliberately skip this and always report the
    /// argmax class; the two entry points have distinct decision modes.
    pub fn verdict(&self, threshold: f32) -> Verdict {
        if self.confidence >= threshold {
            Verdict::Confident(self.class)
        } else {
            Verdict::Uncertain
        }
    }
}

/// Outcome of threshold-based interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Confident(WasteClass),
    Uncertain,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Confident(class) => f.write_str(class.name()),
            Verdict::Uncertain => f.write_str("uncertain"),
        }
    }
}

// ---------------------------------------------------------------------------
// Interpretation
// ---------------------------------------------------------------------------

/// Interprets a six-way probability vector.
///
/// The predicted class is a hard argmax; ties break to the lowest index
/// because only a strictly greater score displaces the current best.
pub fn interpret(scores: &[f32]) -> Result<Prediction, PipelineError> {
    if scores.len() != WasteClass::ALL.len() {
        return Err(PipelineError::Prediction(format!(
            "model returned {} scores, expected {}",
            scores.len(),
            WasteClass::ALL.len()
        )));
    }

    let mut best = 0;
    for (i, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = i;
        }
    }

    let class = WasteClass::ALL[best];
    let category = class.category();
    Ok(Prediction {
        class,
        confidence: scores[best],
        category,
        points: category.points(),
        scores: WasteClass::ALL.iter().copied().zip(scores.iter().copied()).collect(),
    })
}

/// Rounds to two decimal places for percentage output.
pub fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_ties_break_to_lowest_index() {
        let prediction = interpret(&[0.2, 0.2, 0.2, 0.2, 0.1, 0.1]).unwrap();
        assert_eq!(prediction.class, WasteClass::Cardboard);
        assert_eq!(prediction.confidence, 0.2);
    }

    #[test]
    fn confidence_is_the_raw_maximum() {
        let prediction = interpret(&[0.05, 0.7, 0.05, 0.1, 0.05, 0.05]).unwrap();
        assert_eq!(prediction.class, WasteClass::Glass);
        assert_eq!(prediction.confidence, 0.7);
        assert_eq!(prediction.category, WasteCategory::Glass);
        assert_eq!(prediction.points, 15);
    }

    #[test]
    fn trash_prediction_maps_to_general() {
        let prediction = interpret(&[0.0, 0.0, 0.0, 0.0, 0.1, 0.9]).unwrap();
        assert_eq!(prediction.class, WasteClass::Trash);
        assert_eq!(prediction.category, WasteCategory::General);
        assert_eq!(prediction.points, 5);
    }

    #[test]
    fn wrong_vector_length_is_a_prediction_error() {
        let err = interpret(&[0.5, 0.5]).unwrap_err();
        assert!(matches!(err, PipelineError::Prediction(_)));
    }

    #[test]
    fn verdict_falls_back_to_uncertain_below_threshold() {
        let prediction = interpret(&[0.4, 0.2, 0.1, 0.1, 0.1, 0.1]).unwrap();
        assert_eq!(prediction.verdict(DEFAULT_THRESHOLD), Verdict::Uncertain);
        assert_eq!(prediction.verdict(DEFAULT_THRESHOLD).to_string(), "uncertain");

        let prediction = interpret(&[0.6, 0.1, 0.1, 0.1, 0.05, 0.05]).unwrap();
        assert_eq!(
            prediction.verdict(DEFAULT_THRESHOLD),
            Verdict::Confident(WasteClass::Cardboard)
        );
    }

    #[test]
    fn verdict_keeps_the_class_at_exactly_the_threshold() {
        let prediction = interpret(&[0.5, 0.1, 0.1, 0.1, 0.1, 0.1]).unwrap();
        assert_eq!(
            prediction.verdict(DEFAULT_THRESHOLD),
            Verdict::Confident(WasteClass::Cardboard)
        );
    }

    #[test]
    fn percentage_scores_sum_to_about_one_hundred() {
        let prediction = interpret(&[0.31, 0.13, 0.09, 0.22, 0.17, 0.08]).unwrap();
        let total: f32 = prediction
            .scores
            .iter()
            .map(|(_, score)| round2(score * 100.0))
            .sum();
        assert!((total - 100.0).abs() < 0.1, "total was {}", total);
    }

    #[test]
    fn round2_keeps_two_decimal_places() {
        assert_eq!(round2(87.6543), 87.65);
        assert_eq!(round2(33.333), 33.33);
    }
}
