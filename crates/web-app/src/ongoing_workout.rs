use chrono::{DateTime, Utc};
use gloo_timers::callback::Interval;
use log::debug;
use soma_domain::{PlanID, SessionRecord, Workout};

pub const TICK_INTERVAL_MS: u32 = 1000;

/// A workout together with the timer that drives its clock.
///
/// The ticker handle is held for as long as the workout is ongoing. Dropping
/// the handle stops the timer, so finishing, cancelling or dropping the
/// ongoing workout always releases it.
pub struct OngoingWorkout<H> {
    workout: Workout,
    ticker: Option<H>,
}

impl<H> OngoingWorkout<H> {
    pub fn start(plan: PlanID, ticker: H) -> Self {
        debug!("starting workout of plan {plan}");
        Self {
            workout: Workout::new(plan),
            ticker: Some(ticker),
        }
    }

    #[must_use]
    pub fn workout(&self) -> &Workout {
        &self.workout
    }

    pub fn workout_mut(&mut self) -> &mut Workout {
        &mut self.workout
    }

    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn tick(&mut self) {
        if self.is_ticking() {
            self.workout.tick();
        }
    }

    #[must_use]
    pub fn finish(mut self, now: DateTime<Utc>) -> SessionRecord {
        self.ticker = None;
        self.workout.finish(now)
    }

    pub fn cancel(mut self) {
        self.ticker = None;
        self.workout.cancel();
    }
}

/// Call `callback` once per second until the returned handle is dropped.
pub fn every_second(callback: impl FnMut() + 'static) -> Interval {
    Interval::new(TICK_INTERVAL_MS, callback)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{cell::Cell, rc::Rc};

    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use soma_domain::SetField;

    use super::*;

    /// Ticker handle that records whether it has been released.
    pub struct FakeTicker(pub Rc<Cell<bool>>);

    impl Drop for FakeTicker {
        fn drop(&mut self) {
            self.0.set(true);
        }
    }

    pub fn fake_ticker() -> (FakeTicker, Rc<Cell<bool>>) {
        let released = Rc::new(Cell::new(false));
        (FakeTicker(released.clone()), released)
    }

    #[test]
    fn test_ongoing_workout_tick() {
        let (ticker, released) = fake_ticker();
        let mut ongoing = OngoingWorkout::start(PlanID::B, ticker);

        ongoing.tick();
        ongoing.tick();

        assert_eq!(ongoing.workout().elapsed(), 2);
        assert!(ongoing.is_ticking());
        assert!(!released.get());
    }

    #[test]
    fn test_ongoing_workout_finish_releases_ticker() {
        let (ticker, released) = fake_ticker();
        let mut ongoing = OngoingWorkout::start(PlanID::A, ticker);
        ongoing.tick();
        ongoing.workout_mut().select_exercise(0).unwrap();
        ongoing
            .workout_mut()
            .set_field(0, 0, SetField::Completed(true))
            .unwrap();

        let record = ongoing.finish(Utc.with_ymd_and_hms(2024, 3, 1, 18, 30, 0).unwrap());

        assert!(released.get());
        assert_eq!(record.plan, PlanID::A);
        assert_eq!(record.duration, 1);
        assert_eq!(record.total_sets(), 1);
    }

    #[test]
    fn test_ongoing_workout_cancel_releases_ticker() {
        let (ticker, released) = fake_ticker();
        let ongoing = OngoingWorkout::start(PlanID::A, ticker);

        ongoing.cancel();

        assert!(released.get());
    }

    #[test]
    fn test_ongoing_workout_drop_releases_ticker() {
        let (ticker, released) = fake_ticker();
        let ongoing = OngoingWorkout::start(PlanID::B, ticker);

        drop(ongoing);

        assert!(released.get());
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    mod wasm {
        use std::{cell::Cell, rc::Rc};

        use gloo_timers::future::TimeoutFuture;
        use pretty_assertions::assert_eq;
        use soma_domain::PlanID;
        use wasm_bindgen_test::wasm_bindgen_test;

        use super::super::*;

        #[wasm_bindgen_test]
        async fn test_every_second_stops_when_dropped() {
            let ticks = Rc::new(Cell::new(0));
            let interval = every_second({
                let ticks = ticks.clone();
                move || ticks.set(ticks.get() + 1)
            });

            TimeoutFuture::new(TICK_INTERVAL_MS * 2 + TICK_INTERVAL_MS / 2).await;
            assert!(ticks.get() >= 1);

            drop(interval);
            let stopped_at = ticks.get();
            TimeoutFuture::new(TICK_INTERVAL_MS * 2).await;

            assert_eq!(ticks.get(), stopped_at);
        }

        #[wasm_bindgen_test]
        async fn test_finish_stops_ticker() {
            let ticks = Rc::new(Cell::new(0));
            let ongoing = OngoingWorkout::start(
                PlanID::A,
                every_second({
                    let ticks = ticks.clone();
                    move || ticks.set(ticks.get() + 1)
                }),
            );

            TimeoutFuture::new(TICK_INTERVAL_MS + TICK_INTERVAL_MS / 2).await;
            let record = ongoing.finish(chrono::Utc::now());
            let stopped_at = ticks.get();
            TimeoutFuture::new(TICK_INTERVAL_MS * 2).await;

            assert!(stopped_at >= 1);
            assert_eq!(ticks.get(), stopped_at);
            assert_eq!(record.plan, PlanID::A);
        }
    }
}
