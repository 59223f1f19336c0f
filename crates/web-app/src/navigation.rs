use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, warn};
use soma_domain::{
    self as domain, CalendarDay, ExerciseDefinition, ExerciseRecord, HistoryService, Overview,
    PlanID, SessionKey, SessionRecord, SetField, TrendPoint,
};

use crate::{OngoingWorkout, Settings};

/// Number of past sessions listed on the exercise screen.
pub const EXERCISE_LOG_LIMIT: usize = 12;

/// Number of sessions listed on the home screen.
pub const RECENT_SESSIONS: usize = 3;

pub enum Screen<H> {
    Home,
    Workout(OngoingWorkout<H>),
    Summary(SessionRecord),
    Exercise {
        plan: PlanID,
        exercise: &'static ExerciseDefinition,
    },
    History,
}

impl<H> Screen<H> {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Workout(_) => "workout",
            Screen::Summary(_) => "summary",
            Screen::Exercise { .. } => "exercise",
            Screen::History => "history",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    StartWorkout(PlanID),
    FinishWorkout,
    CancelWorkout,
    CloseSummary,
    ViewExercise { plan: PlanID, exercise_id: String },
    ViewHistory,
    Back,
    SelectExercise(usize),
    BackToList,
    NextExercise,
    PreviousExercise,
    SetField {
        exercise: usize,
        set: usize,
        field: SetField,
    },
    AddSet(usize),
    RemoveSet {
        exercise: usize,
        set: usize,
    },
    Tick,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SaveSession(SessionRecord),
}

pub struct Transition<H> {
    pub screen: Screen<H>,
    pub effect: Option<Effect>,
}

impl<H> From<Screen<H>> for Transition<H> {
    fn from(screen: Screen<H>) -> Self {
        Self {
            screen,
            effect: None,
        }
    }
}

/// Determine the screen that follows on an action.
///
/// Actions that do not apply to the current screen leave it unchanged. A
/// ticker is only started when a workout begins. Finishing a workout moves to
/// the summary and requests the session to be saved.
pub fn transition<H>(
    screen: Screen<H>,
    action: Action,
    now: DateTime<Utc>,
    start_ticker: impl FnOnce() -> H,
) -> Transition<H> {
    match (screen, action) {
        (Screen::Home, Action::StartWorkout(plan)) => {
            Screen::Workout(OngoingWorkout::start(plan, start_ticker())).into()
        }
        (Screen::Home, Action::ViewExercise { plan, exercise_id }) => {
            match plan.plan().exercise(&exercise_id) {
                Some(exercise) => Screen::Exercise { plan, exercise }.into(),
                None => {
                    warn!("plan {plan} has no exercise {exercise_id}");
                    Screen::Home.into()
                }
            }
        }
        (Screen::Home, Action::ViewHistory) => Screen::History.into(),
        (Screen::Workout(ongoing), Action::FinishWorkout) => {
            let record = ongoing.finish(now);
            Transition {
                screen: Screen::Summary(record.clone()),
                effect: Some(Effect::SaveSession(record)),
            }
        }
        (Screen::Workout(ongoing), Action::CancelWorkout) => {
            ongoing.cancel();
            Screen::Home.into()
        }
        (Screen::Workout(mut ongoing), action) => {
            update_workout(&mut ongoing, action);
            Screen::Workout(ongoing).into()
        }
        (Screen::Summary(_), Action::CloseSummary | Action::Back)
        | (Screen::Exercise { .. } | Screen::History, Action::Back) => Screen::Home.into(),
        (screen, action) => {
            debug!("ignoring {action:?} on {} screen", screen.name());
            screen.into()
        }
    }
}

fn update_workout<H>(ongoing: &mut OngoingWorkout<H>, action: Action) {
    let result = match action {
        Action::Tick => {
            ongoing.tick();
            Ok(())
        }
        Action::SelectExercise(exercise) => ongoing.workout_mut().select_exercise(exercise),
        Action::BackToList => {
            ongoing.workout_mut().back();
            Ok(())
        }
        Action::NextExercise => {
            ongoing.workout_mut().next_exercise();
            Ok(())
        }
        Action::PreviousExercise => {
            ongoing.workout_mut().previous_exercise();
            Ok(())
        }
        Action::SetField {
            exercise,
            set,
            field,
        } => ongoing.workout_mut().set_field(exercise, set, field),
        Action::AddSet(exercise) => ongoing.workout_mut().add_set(exercise),
        Action::RemoveSet { exercise, set } => ongoing.workout_mut().remove_set(exercise, set),
        action => {
            debug!("ignoring {action:?} during workout");
            Ok(())
        }
    };
    if let Err(err) = result {
        warn!("failed to update workout: {err}");
    }
}

/// Progression of an exercise as shown on the exercise screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub series: Vec<TrendPoint>,
    pub delta: Option<f32>,
    pub latest: Option<TrendPoint>,
    pub log: Vec<(SessionRecord, ExerciseRecord)>,
}

/// Root controller owning the current screen.
pub struct App<S, H> {
    service: S,
    settings: Settings,
    screen: Screen<H>,
}

impl<S: HistoryService, H> App<S, H> {
    pub fn new(service: S, settings: Settings) -> Self {
        Self {
            service,
            settings,
            screen: Screen::Home,
        }
    }

    #[must_use]
    pub fn screen(&self) -> &Screen<H> {
        &self.screen
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Apply an action and carry out the resulting effect.
    ///
    /// Returns the key of the saved session if the action finished a workout.
    pub fn dispatch(
        &mut self,
        action: Action,
        now: DateTime<Utc>,
        start_ticker: impl FnOnce() -> H,
    ) -> Option<SessionKey> {
        let screen = std::mem::replace(&mut self.screen, Screen::Home);
        let Transition { screen, effect } = transition(screen, action, now, start_ticker);
        self.screen = screen;
        match effect {
            Some(Effect::SaveSession(record)) => Some(self.service.save_session(record)),
            None => None,
        }
    }

    #[must_use]
    pub fn overview(&self, today: NaiveDate) -> Overview {
        self.service.overview(today)
    }

    #[must_use]
    pub fn calendar(&self, today: NaiveDate) -> Vec<[CalendarDay; 7]> {
        domain::calendar(
            &self.service.get_history(),
            today,
            self.settings.calendar_weeks(),
        )
    }

    #[must_use]
    pub fn recent_sessions(&self, limit: usize) -> Vec<SessionRecord> {
        domain::sessions_newest_first(&self.service.get_history())
            .into_iter()
            .take(limit)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn last_session(&self, plan: PlanID) -> Option<SessionRecord> {
        domain::last_session(&self.service.get_history(), plan).cloned()
    }

    #[must_use]
    pub fn progress(&self, plan: PlanID, exercise_id: &str) -> Progress {
        let history = self.service.get_history();
        let series = domain::trend(&history, plan, exercise_id);
        Progress {
            delta: domain::trend_delta(&series),
            latest: series.last().copied(),
            log: domain::exercise_log(&history, plan, exercise_id, EXERCISE_LOG_LIMIT)
                .into_iter()
                .map(|(session, exercise)| (session.clone(), exercise.clone()))
                .collect(),
            series,
        }
    }
}
