use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use derive_more::{AsRef, Deref, Display};

use crate::{PlanID, estimated_calories, parse_or_zero};

/// Maximum number of sessions retained in the history.
pub const HISTORY_LIMIT: usize = 120;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub trait HistoryRepository {
    fn load_history(&self) -> History;
    fn append_session(&self, record: SessionRecord) -> SessionKey;
}

/// Key of a stored session in the form `{date}_{plan}_{epoch millis}`.
///
/// Keys are ordered as plain strings. As the date comes first, this order is
/// chronological by day and by timestamp within a day.
#[derive(AsRef, Deref, Display, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionKey(String);

impl SessionKey {
    #[must_use]
    pub fn new(date: NaiveDate, plan: PlanID, timestamp_millis: i64) -> Self {
        Self(format!(
            "{}_{plan}_{timestamp_millis}",
            date.format(DATE_FORMAT)
        ))
    }

    #[must_use]
    pub fn for_record(record: &SessionRecord) -> Self {
        Self::new(
            record.date.date_naive(),
            record.plan,
            record.date.timestamp_millis(),
        )
    }

    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        self.0
            .get(..10)
            .and_then(|date| NaiveDate::parse_from_str(date, DATE_FORMAT).ok())
    }

    #[must_use]
    pub fn plan(&self) -> Option<PlanID> {
        self.0.split('_').nth(1).and_then(|plan| plan.parse().ok())
    }

    #[must_use]
    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.0.starts_with(&date.format(DATE_FORMAT).to_string())
    }
}

impl TryFrom<&str> for SessionKey {
    type Error = SessionKeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut parts = value.splitn(3, '_');

        let date = parts
            .next()
            .and_then(|date| NaiveDate::parse_from_str(date, DATE_FORMAT).ok())
            .ok_or_else(|| SessionKeyError::InvalidDate(value.to_string()))?;
        let plan = parts
            .next()
            .and_then(|plan| plan.parse::<PlanID>().ok())
            .ok_or_else(|| SessionKeyError::InvalidPlan(value.to_string()))?;
        let timestamp = parts
            .next()
            .and_then(|timestamp| timestamp.parse::<i64>().ok())
            .ok_or_else(|| SessionKeyError::InvalidTimestamp(value.to_string()))?;

        Ok(Self::new(date, plan, timestamp))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionKeyError {
    #[error("invalid date in session key {0}")]
    InvalidDate(String),
    #[error("invalid plan in session key {0}")]
    InvalidPlan(String),
    #[error("invalid timestamp in session key {0}")]
    InvalidTimestamp(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub date: DateTime<Utc>,
    pub plan: PlanID,
    pub duration: i64,
    pub total_weight_moved: i64,
    pub exercises: Vec<ExerciseRecord>,
}

impl SessionRecord {
    #[must_use]
    pub fn exercise(&self, exercise_id: &str) -> Option<&ExerciseRecord> {
        self.exercises.iter().find(|e| e.exercise_id == exercise_id)
    }

    #[must_use]
    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    #[must_use]
    pub fn estimated_calories(&self) -> i64 {
        estimated_calories(self.duration)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseRecord {
    pub exercise_id: String,
    pub exercise_name: String,
    pub sets: Vec<SetRecord>,
}

impl ExerciseRecord {
    /// Heaviest weight of all recorded sets, `None` if no set was recorded.
    #[must_use]
    pub fn max_weight(&self) -> Option<f32> {
        self.sets.iter().map(SetRecord::weight_value).reduce(f32::max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetRecord {
    pub weight: String,
    pub reps: String,
}

impl SetRecord {
    #[must_use]
    pub fn weight_value(&self) -> f32 {
        parse_or_zero(&self.weight)
    }

    #[must_use]
    pub fn reps_value(&self) -> f32 {
        parse_or_zero(&self.reps)
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.weight_value() * self.reps_value()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct History(BTreeMap<SessionKey, SessionRecord>);

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: SessionKey, record: SessionRecord) {
        self.0.insert(key, record);
    }

    /// Add a record under its derived key and evict the oldest sessions beyond [`HISTORY_LIMIT`].
    pub fn append(&mut self, record: SessionRecord) -> SessionKey {
        let key = SessionKey::for_record(&record);
        self.insert(key.clone(), record);
        self.prune(HISTORY_LIMIT);
        key
    }

    pub fn prune(&mut self, limit: usize) {
        while self.0.len() > limit {
            self.0.pop_first();
        }
    }

    #[must_use]
    pub fn get(&self, key: &SessionKey) -> Option<&SessionRecord> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &SessionKey> {
        self.0.keys()
    }

    pub fn sessions(&self) -> impl Iterator<Item = &SessionRecord> {
        self.0.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SessionKey, &SessionRecord)> {
        self.0.iter()
    }
}

impl FromIterator<(SessionKey, SessionRecord)> for History {
    fn from_iter<T: IntoIterator<Item = (SessionKey, SessionRecord)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for History {
    type Item = (SessionKey, SessionRecord);
    type IntoIter = std::collections::btree_map::IntoIter<SessionKey, SessionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
