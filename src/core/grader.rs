use crate::core::{OutcomeFlag, Record, ScorePair, Threshold};
use crate::utils::error::{EtlError, Result};

/// Grades one pair. `None` when nothing was possible (zero denominator).
///
/// The threshold is inclusive and ratios above 1.0 (bonus points) compare
/// as-is.
pub fn grade_pair(pair: ScorePair, threshold: Threshold) -> Option<OutcomeFlag> {
    if pair.denominator == 0.0 {
        return None;
    }

    let ratio = pair.numerator / pair.denominator;
    if ratio >= threshold.ratio() {
        Some(OutcomeFlag::Met)
    } else {
        Some(OutcomeFlag::NotMet)
    }
}

/// One flag per score pair, in record order. Any zero denominator fails the
/// whole record.
pub fn grade(record: &Record, threshold: Threshold) -> Result<Vec<OutcomeFlag>> {
    record
        .scores
        .iter()
        .map(|pair| {
            grade_pair(*pair, threshold).ok_or_else(|| EtlError::InvalidScore {
                line: record.line,
                scores: record.raw_scores.clone(),
            })
        })
        .collect()
}
