use std::{collections::BTreeMap, str::FromStr};

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize};
use soma_domain as domain;

use crate::{Backend, KEY_HISTORY, Store};

impl<B: Backend> domain::HistoryRepository for Store<B> {
    fn load_history(&self) -> domain::History {
        let Some(stored) = self.read::<BTreeMap<String, serde_json::Value>>(KEY_HISTORY) else {
            return domain::History::new();
        };
        stored
            .into_iter()
            .filter_map(|(key, value)| match decode(&key, value) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!("skipping session {key}: {err}");
                    None
                }
            })
            .collect()
    }

    fn append_session(&self, record: domain::SessionRecord) -> domain::SessionKey {
        let mut history = self.load_history();
        let key = history.append(record);
        let stored = history
            .iter()
            .map(|(key, record)| (key.to_string(), Session::from(record)))
            .collect::<BTreeMap<_, _>>();
        if self.write(KEY_HISTORY, &stored) {
            debug!("stored {} sessions", stored.len());
        }
        key
    }
}

fn decode(
    key: &str,
    value: serde_json::Value,
) -> Result<(domain::SessionKey, domain::SessionRecord), SessionError> {
    let key = domain::SessionKey::try_from(key)?;
    let session = serde_json::from_value::<Session>(value)
        .map_err(|err| SessionError::Invalid(err.to_string()))?;
    Ok((key, domain::SessionRecord::try_from(session)?))
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Key(#[from] domain::SessionKeyError),
    #[error("invalid session: {0}")]
    Invalid(String),
    #[error("invalid day type: {0}")]
    DayType(#[from] strum::ParseError),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub date: DateTime<Utc>,
    pub day_type: String,
    pub duration: i64,
    pub total_kg: i64,
    pub exercises: Vec<Exercise>,
}

impl From<domain::SessionRecord> for Session {
    fn from(value: domain::SessionRecord) -> Self {
        Self::from(&value)
    }
}

impl From<&domain::SessionRecord> for Session {
    fn from(value: &domain::SessionRecord) -> Self {
        Self {
            date: value.date,
            day_type: value.plan.to_string(),
            duration: value.duration,
            total_kg: value.total_weight_moved,
            exercises: value.exercises.iter().map(Exercise::from).collect(),
        }
    }
}

impl TryFrom<Session> for domain::SessionRecord {
    type Error = SessionError;

    fn try_from(value: Session) -> Result<Self, Self::Error> {
        Ok(Self {
            date: value.date,
            plan: domain::PlanID::from_str(&value.day_type)?,
            duration: value.duration,
            total_weight_moved: value.total_kg,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::ExerciseRecord::from)
                .collect(),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub sets: Vec<Set>,
}

impl From<&domain::ExerciseRecord> for Exercise {
    fn from(value: &domain::ExerciseRecord) -> Self {
        Self {
            id: value.exercise_id.clone(),
            name: value.exercise_name.clone(),
            sets: value
                .sets
                .iter()
                .map(|set| Set {
                    kg: set.weight.clone(),
                    reps: set.reps.clone(),
                })
                .collect(),
        }
    }
}

impl From<Exercise> for domain::ExerciseRecord {
    fn from(value: Exercise) -> Self {
        Self {
            exercise_id: value.id,
            exercise_name: value.name,
            sets: value
                .sets
                .into_iter()
                .map(|set| domain::SetRecord {
                    weight: set.kg,
                    reps: set.reps,
                })
                .collect(),
        }
    }
}

/// Set as entered by the user. Numbers are accepted in place of text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Set {
    #[serde(deserialize_with = "text")]
    pub kg: String,
    #[serde(deserialize_with = "text")]
    pub reps: String,
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        String(String),
        Number(serde_json::Number),
    }

    Ok(match Text::deserialize(deserializer)? {
        Text::String(value) => value,
        Text::Number(value) => value.to_string(),
    })
}
