use chrono::{DateTime, Utc};
use log::debug;

use crate::{
    ExerciseDefinition, ExerciseRecord, PlanID, SessionRecord, SetRecord, WorkoutError,
    WorkoutPlan, parse_or_zero,
};

/// One set as entered by the user.
///
/// Weight and reps are kept as text so that partial input (e.g. `"1."`) survives
/// editing. They are only interpreted as numbers when totals are calculated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetEntry {
    pub weight: String,
    pub reps: String,
    pub completed: bool,
}

impl SetEntry {
    #[must_use]
    pub fn from_definition(exercise: &ExerciseDefinition) -> Self {
        Self {
            weight: exercise.weight.to_string(),
            reps: exercise.reps.to_string(),
            completed: false,
        }
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        parse_or_zero(&self.weight) * parse_or_zero(&self.reps)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetField {
    Weight(String),
    Reps(String),
    Completed(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Listing,
    Tracking(usize),
}

/// State of a workout in progress.
///
/// A workout starts in [`View::Listing`] with every exercise seeded from the
/// plan defaults. It ends either with [`Workout::finish`], which turns it into
/// a [`SessionRecord`], or with [`Workout::cancel`].
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    plan: &'static WorkoutPlan,
    elapsed: u32,
    current: usize,
    sets: Vec<Vec<SetEntry>>,
    view: View,
}

impl Workout {
    #[must_use]
    pub fn new(plan: PlanID) -> Self {
        let plan = plan.plan();
        Self {
            plan,
            elapsed: 0,
            current: 0,
            sets: plan
                .exercises
                .iter()
                .map(|exercise| {
                    (0..exercise.sets.max(1))
                        .map(|_| SetEntry::from_definition(exercise))
                        .collect()
                })
                .collect(),
            view: View::Listing,
        }
    }

    #[must_use]
    pub fn plan(&self) -> &'static WorkoutPlan {
        self.plan
    }

    #[must_use]
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn current_exercise_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_exercise(&self) -> &'static ExerciseDefinition {
        &self.plan.exercises[self.current]
    }

    #[must_use]
    pub fn sets(&self, exercise: usize) -> Option<&[SetEntry]> {
        self.sets.get(exercise).map(Vec::as_slice)
    }

    pub fn tick(&mut self) {
        self.elapsed = self.elapsed.saturating_add(1);
    }

    pub fn select_exercise(&mut self, exercise: usize) -> Result<(), WorkoutError> {
        if exercise >= self.sets.len() {
            return Err(WorkoutError::InvalidExercise(exercise));
        }
        self.current = exercise;
        self.view = View::Tracking(exercise);
        Ok(())
    }

    pub fn back(&mut self) {
        self.view = View::Listing;
    }

    /// Track the next exercise. Has no effect when not tracking or at the last exercise.
    pub fn next_exercise(&mut self) {
        if let View::Tracking(i) = self.view {
            if !self.is_last_exercise(i) {
                self.current = i + 1;
                self.view = View::Tracking(i + 1);
            }
        }
    }

    /// Track the previous exercise. Has no effect when not tracking or at the first exercise.
    pub fn previous_exercise(&mut self) {
        if let View::Tracking(i) = self.view {
            if i > 0 {
                self.current = i - 1;
                self.view = View::Tracking(i - 1);
            }
        }
    }

    #[must_use]
    pub fn is_last_exercise(&self, exercise: usize) -> bool {
        exercise + 1 >= self.sets.len()
    }

    pub fn set_field(
        &mut self,
        exercise: usize,
        set: usize,
        field: SetField,
    ) -> Result<(), WorkoutError> {
        let entry = self
            .sets_mut(exercise)?
            .get_mut(set)
            .ok_or(WorkoutError::InvalidSet(exercise, set))?;
        match field {
            SetField::Weight(weight) => entry.weight = weight,
            SetField::Reps(reps) => entry.reps = reps,
            SetField::Completed(completed) => entry.completed = completed,
        }
        Ok(())
    }

    /// Append a set with the values of the last set of the exercise.
    pub fn add_set(&mut self, exercise: usize) -> Result<(), WorkoutError> {
        let plan = self.plan;
        let sets = self.sets_mut(exercise)?;
        let set = match sets.last() {
            Some(last) => SetEntry {
                completed: false,
                ..last.clone()
            },
            None => SetEntry::from_definition(&plan.exercises[exercise]),
        };
        sets.push(set);
        Ok(())
    }

    /// Remove a set. The last remaining set of an exercise is never removed.
    pub fn remove_set(&mut self, exercise: usize, set: usize) -> Result<(), WorkoutError> {
        let sets = self.sets_mut(exercise)?;
        if set >= sets.len() {
            return Err(WorkoutError::InvalidSet(exercise, set));
        }
        if sets.len() > 1 {
            sets.remove(set);
        }
        Ok(())
    }

    fn sets_mut(&mut self, exercise: usize) -> Result<&mut Vec<SetEntry>, WorkoutError> {
        if !matches!(self.view, View::Tracking(_)) {
            return Err(WorkoutError::NotTracking);
        }
        self.sets
            .get_mut(exercise)
            .ok_or(WorkoutError::InvalidExercise(exercise))
    }

    #[must_use]
    pub fn completed_sets(&self) -> usize {
        self.sets.iter().flatten().filter(|s| s.completed).count()
    }

    #[must_use]
    pub fn total_sets(&self) -> usize {
        self.sets.iter().map(Vec::len).sum()
    }

    /// Share of completed sets in the range 0.0 to 1.0.
    #[must_use]
    pub fn progress(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let progress = self.completed_sets() as f32 / self.total_sets().max(1) as f32;
        progress
    }

    /// Whether every exercise has at least one completed set.
    #[must_use]
    pub fn all_done(&self) -> bool {
        self.sets.iter().all(|sets| sets.iter().any(|s| s.completed))
    }

    /// Sum of weight × reps of all completed sets, rounded to whole kilograms.
    #[must_use]
    pub fn total_weight_moved(&self) -> i64 {
        let total = self
            .sets
            .iter()
            .flatten()
            .filter(|s| s.completed)
            .map(SetEntry::volume)
            .sum::<f32>();
        #[allow(clippy::cast_possible_truncation)]
        let total = total.round() as i64;
        total
    }

    #[must_use]
    pub fn finish(self, now: DateTime<Utc>) -> SessionRecord {
        let total_weight_moved = self.total_weight_moved();
        SessionRecord {
            date: now,
            plan: self.plan.id,
            duration: i64::from(self.elapsed),
            total_weight_moved,
            exercises: self
                .plan
                .exercises
                .iter()
                .zip(self.sets)
                .map(|(exercise, sets)| ExerciseRecord {
                    exercise_id: exercise.id.to_string(),
                    exercise_name: exercise.name.to_string(),
                    sets: sets
                        .into_iter()
                        .filter(|s| s.completed)
                        .map(|s| SetRecord {
                            weight: s.weight,
                            reps: s.reps,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    pub fn cancel(self) {
        debug!(
            "discarding workout of plan {} after {} s",
            self.plan.id, self.elapsed
        );
    }
}
