//! Ranking domain model.
//!
//! # Responsibility
//! - Represent one observer's rating of one subject's skill.
//! - Hold the summary statistics computed over a set of rankings.
//!
//! # Invariants
//! - A ranking references a persisted subject, observer and skill.
//! - `value` is conventionally 1..=10 but is not constrained here.
//! - Averages are truncated toward zero, never rounded.

use crate::model::person::{Person, PersonId};
use crate::model::skill::{Skill, SkillId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned ranking identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankingId(pub i64);

impl Display for RankingId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted ranking with its referenced records hydrated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    pub id: RankingId,
    pub subject: Person,
    pub observer: Person,
    pub skill: Skill,
    pub value: i32,
}

/// Unsaved ranking draft, linking already persisted records by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRanking {
    pub subject_id: PersonId,
    pub observer_id: PersonId,
    pub skill_id: SkillId,
    pub value: i32,
}

/// Count/sum/min/max over a set of ranking values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingSummary {
    pub count: u64,
    pub sum: i64,
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl RankingSummary {
    /// Builds a summary in a single pass.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        values.into_iter().fold(Self::default(), |mut acc, value| {
            acc.count += 1;
            acc.sum += i64::from(value);
            acc.min = Some(acc.min.map_or(value, |min| min.min(value)));
            acc.max = Some(acc.max.map_or(value, |max| max.max(value)));
            acc
        })
    }

    /// Mean truncated toward zero, `None` for an empty set.
    pub fn average(&self) -> Option<i32> {
        if self.count == 0 {
            return None;
        }
        let mean = self.sum / i64::try_from(self.count).ok()?;
        // The mean lies between `min` and `max`, so it fits in i32.
        i32::try_from(mean).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::RankingSummary;

    #[test]
    fn empty_summary_has_no_average() {
        let summary = RankingSummary::from_values(Vec::new());
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average(), None);
        assert_eq!(summary.min, None);
    }

    #[test]
    fn average_truncates_instead_of_rounding() {
        let summary = RankingSummary::from_values([7, 8]);
        assert_eq!(summary.sum, 15);
        assert_eq!(summary.average(), Some(7));
    }

    #[test]
    fn negative_average_truncates_toward_zero() {
        let summary = RankingSummary::from_values([-7, -8]);
        assert_eq!(summary.average(), Some(-7));
    }

    #[test]
    fn tracks_min_and_max() {
        let summary = RankingSummary::from_values([6, 9, 7]);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.min, Some(6));
        assert_eq!(summary.max, Some(9));
        assert_eq!(summary.average(), Some(7));
    }

    #[test]
    fn sum_does_not_overflow_for_extreme_values() {
        let summary = RankingSummary::from_values([i32::MAX, i32::MAX]);
        assert_eq!(summary.average(), Some(i32::MAX));
    }
}
