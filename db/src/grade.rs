//! Grade statistics recomputed from stored check rows.
//!
//! Nothing derived is persisted: completion counts, percentage and the 0-6
//! score are recomputed from the encoded grades on every read.

use crate::list_codec;

/// Display band for a 0-6 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    /// Band cutpoints: >= 5.5 high, >= 4.0 medium, otherwise low.
    pub fn for_score(score: f64) -> Self {
        if score >= 5.5 {
            ScoreBand::High
        } else if score >= 4.0 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }
}

/// Statistics derived from one check's grade list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckStats {
    pub total: usize,
    pub completed: usize,
    pub percentage: f64,
    /// Score on a 0-6 scale, rounded to one decimal place.
    pub score: f64,
    pub band: ScoreBand,
}

impl CheckStats {
    pub fn from_grades(grades: &[i64]) -> Self {
        let total = grades.len();
        let completed = grades.iter().filter(|&&g| g == 1).count();
        let percentage = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        let score = (percentage / 100.0 * 6.0 * 10.0).round() / 10.0;

        CheckStats {
            total,
            completed,
            percentage,
            score,
            band: ScoreBand::for_score(score),
        }
    }

    pub fn from_encoded(grades: &str) -> Self {
        Self::from_grades(&list_codec::decode(grades))
    }

    pub fn failed(&self) -> usize {
        self.total - self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_of_three_scores_four_medium() {
        let stats = CheckStats::from_grades(&[1, 0, 1]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.failed(), 1);
        assert!((stats.percentage - 66.666_666).abs() < 0.001);
        assert_eq!(stats.score, 4.0);
        assert_eq!(stats.band, ScoreBand::Medium);
    }

    #[test]
    fn all_passed_scores_six_high() {
        let stats = CheckStats::from_grades(&[1, 1, 1, 1]);
        assert_eq!(stats.percentage, 100.0);
        assert_eq!(stats.score, 6.0);
        assert_eq!(stats.band, ScoreBand::High);
    }

    #[test]
    fn all_failed_scores_zero_low() {
        let stats = CheckStats::from_grades(&[0, 0]);
        assert_eq!(stats.score, 0.0);
        assert_eq!(stats.band, ScoreBand::Low);
    }

    #[test]
    fn band_cutpoints_are_exact() {
        assert_eq!(ScoreBand::for_score(5.5), ScoreBand::High);
        assert_eq!(ScoreBand::for_score(5.4), ScoreBand::Medium);
        assert_eq!(ScoreBand::for_score(4.0), ScoreBand::Medium);
        assert_eq!(ScoreBand::for_score(3.9), ScoreBand::Low);
    }

    #[test]
    fn empty_grades_degrade_to_zero() {
        let stats = CheckStats::from_encoded("");
        assert_eq!(stats.total, 0);
        assert_eq!(stats.percentage, 0.0);
        assert_eq!(stats.band, ScoreBand::Low);
    }

    #[test]
    fn band_name_renders_lowercase() {
        assert_eq!(ScoreBand::High.to_string(), "high");
    }
}
