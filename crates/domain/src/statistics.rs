use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};

use crate::{ExerciseRecord, History, PlanID, SessionRecord};

/// Number of days looked at when determining the current streak.
pub const STREAK_MAX_DAYS: u64 = 366;

/// Rough energy expenditure used for the calorie estimate.
pub const KCAL_PER_MINUTE: f64 = 6.0;

/// Number of consecutive days with at least one session, counted backward from `today`.
///
/// A day without a session ends the streak, except for `today` itself: a
/// streak that ended yesterday is still current until the day is over.
#[must_use]
pub fn streak(history: &History, today: NaiveDate) -> u32 {
    let days = history
        .sessions()
        .map(|s| s.date.date_naive())
        .collect::<BTreeSet<_>>();
    let mut streak = 0;

    for offset in 0..STREAK_MAX_DAYS {
        let Some(day) = today.checked_sub_days(Days::new(offset)) else {
            break;
        };
        if days.contains(&day) {
            streak += 1;
        } else if offset > 0 {
            break;
        }
    }

    streak
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub plan: Option<PlanID>,
    pub is_today: bool,
    pub is_future: bool,
}

/// Days of the last `weeks` weeks (starting on Monday, including the current
/// week) with the plan trained on each day.
///
/// If sessions of both plans took place on the same day, plan A is reported.
#[must_use]
pub fn calendar(history: &History, today: NaiveDate, weeks: u32) -> Vec<[CalendarDay; 7]> {
    if weeks == 0 {
        return vec![];
    }

    let Some(start) = today
        .checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_monday())))
        .and_then(|monday| monday.checked_sub_days(Days::new(7 * u64::from(weeks - 1))))
    else {
        return vec![];
    };
    if start
        .checked_add_days(Days::new(7 * u64::from(weeks) - 1))
        .is_none()
    {
        return vec![];
    }

    (0..u64::from(weeks))
        .map(|week| {
            std::array::from_fn(|day| {
                let date = start + Days::new(week * 7 + day as u64);
                CalendarDay {
                    date,
                    plan: plan_on(history, date),
                    is_today: date == today,
                    is_future: date > today,
                }
            })
        })
        .collect()
}

fn plan_on(history: &History, date: NaiveDate) -> Option<PlanID> {
    let mut result = None;
    for plan in history
        .keys()
        .filter(|key| key.is_on(date))
        .filter_map(crate::SessionKey::plan)
    {
        if plan == PlanID::A {
            return Some(plan);
        }
        result = Some(plan);
    }
    result
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub date: DateTime<Utc>,
    pub weight: f32,
}

/// Heaviest completed weight of an exercise per session of a plan, in chronological order.
///
/// Sessions without a completed set of the exercise are left out.
#[must_use]
pub fn trend(history: &History, plan: PlanID, exercise_id: &str) -> Vec<TrendPoint> {
    let mut sessions = history
        .sessions()
        .filter(|s| s.plan == plan)
        .collect::<Vec<_>>();
    sessions.sort_by_key(|s| s.date);
    sessions
        .into_iter()
        .filter_map(|s| {
            Some(TrendPoint {
                date: s.date,
                weight: s.exercise(exercise_id)?.max_weight()?,
            })
        })
        .collect()
}

/// Change between the last two points of a trend.
#[must_use]
pub fn trend_delta(series: &[TrendPoint]) -> Option<f32> {
    match series {
        [.., previous, last] => Some(last.weight - previous.weight),
        _ => None,
    }
}

#[must_use]
pub fn total_weight_moved<'a>(sessions: impl IntoIterator<Item = &'a SessionRecord>) -> i64 {
    sessions.into_iter().map(|s| s.total_weight_moved).sum()
}

/// Total weight moved in metric tons.
#[must_use]
pub fn tonnage<'a>(sessions: impl IntoIterator<Item = &'a SessionRecord>) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let kg = total_weight_moved(sessions) as f64;
    kg / 1000.0
}

/// Rough calorie estimate based on a fixed rate per minute.
#[must_use]
pub fn estimated_calories(duration: i64) -> i64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    let kcal = (duration as f64 / 60.0 * KCAL_PER_MINUTE).round() as i64;
    kcal
}

#[must_use]
pub fn sessions_newest_first(history: &History) -> Vec<&SessionRecord> {
    let mut sessions = history.sessions().collect::<Vec<_>>();
    sessions.sort_by(|a, b| b.date.cmp(&a.date));
    sessions
}

#[must_use]
pub fn last_session(history: &History, plan: PlanID) -> Option<&SessionRecord> {
    history
        .sessions()
        .filter(|s| s.plan == plan)
        .max_by_key(|s| s.date)
}

/// Most recent sessions of a plan in which the exercise has completed sets, newest first.
#[must_use]
pub fn exercise_log<'a>(
    history: &'a History,
    plan: PlanID,
    exercise_id: &str,
    limit: usize,
) -> Vec<(&'a SessionRecord, &'a ExerciseRecord)> {
    sessions_newest_first(history)
        .into_iter()
        .filter(|s| s.plan == plan)
        .filter_map(|s| {
            s.exercise(exercise_id)
                .filter(|e| !e.sets.is_empty())
                .map(|e| (s, e))
        })
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{SessionKey, SetRecord};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn session(
        date: DateTime<Utc>,
        plan: PlanID,
        total_weight_moved: i64,
        sets: &[(&str, &str)],
    ) -> SessionRecord {
        SessionRecord {
            date,
            plan,
            duration: 2400,
            total_weight_moved,
            exercises: vec![ExerciseRecord {
                exercise_id: "press_pecho".to_string(),
                exercise_name: "Press de Pecho".to_string(),
                sets: sets
                    .iter()
                    .map(|(weight, reps)| SetRecord {
                        weight: (*weight).to_string(),
                        reps: (*reps).to_string(),
                    })
                    .collect(),
            }],
        }
    }

    fn history(sessions: Vec<SessionRecord>) -> History {
        sessions
            .into_iter()
            .map(|s| (SessionKey::for_record(&s), s))
            .collect()
    }

    fn three_days_of_a() -> History {
        history(vec![
            session(at(2024, 3, 4, 18), PlanID::A, 100, &[("15", "12")]),
            session(at(2024, 3, 5, 18), PlanID::A, 150, &[("15", "12")]),
            session(at(2024, 3, 6, 18), PlanID::A, 200, &[("15", "12")]),
        ])
    }

    #[test]
    fn test_streak_and_calendar_after_three_consecutive_days() {
        let history = three_days_of_a();
        let today = date(2024, 3, 7);

        assert_eq!(streak(&history, today), 3);

        let days = calendar(&history, today, 10)
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();
        for d in [date(2024, 3, 4), date(2024, 3, 5), date(2024, 3, 6)] {
            assert_eq!(
                days.iter().find(|day| day.date == d).and_then(|day| day.plan),
                Some(PlanID::A)
            );
        }
        assert_eq!(total_weight_moved(history.sessions()), 450);
    }

    #[rstest]
    #[case::session_today(date(2024, 3, 6), 3)]
    #[case::no_session_today(date(2024, 3, 7), 3)]
    #[case::gap_yesterday(date(2024, 3, 8), 0)]
    #[case::before_first_session(date(2024, 3, 3), 0)]
    #[case::within_sessions(date(2024, 3, 5), 2)]
    fn test_streak(#[case] today: NaiveDate, #[case] expected: u32) {
        assert_eq!(streak(&three_days_of_a(), today), expected);
    }

    #[test]
    fn test_streak_counts_days_not_sessions() {
        let history = history(vec![
            session(at(2024, 3, 5, 8), PlanID::A, 100, &[]),
            session(at(2024, 3, 5, 18), PlanID::B, 100, &[]),
            session(at(2024, 3, 6, 8), PlanID::B, 100, &[]),
        ]);
        assert_eq!(streak(&history, date(2024, 3, 6)), 2);
    }

    #[test]
    fn test_streak_is_bounded() {
        let today = date(2024, 12, 31);
        let history = history(
            (0..400)
                .map(|i| {
                    session(
                        at(2024, 12, 31, 12) - Duration::days(i),
                        PlanID::A,
                        100,
                        &[],
                    )
                })
                .collect(),
        );
        assert_eq!(streak(&history, today), 366);
    }

    #[test]
    fn test_streak_empty_history() {
        assert_eq!(streak(&History::new(), date(2024, 3, 7)), 0);
    }

    #[test]
    fn test_calendar_layout() {
        // 2024-03-07 is a Thursday
        let today = date(2024, 3, 7);
        let weeks = calendar(&History::new(), today, 3);

        assert_eq!(weeks.len(), 3);
        assert_eq!(weeks[0][0].date, date(2024, 2, 19));
        assert_eq!(weeks[2][6].date, date(2024, 3, 10));
        assert!(weeks.iter().all(|w| w[0].date.weekday() == chrono::Weekday::Mon));
        assert!(weeks[2][3].is_today);
        assert!(!weeks[2][3].is_future);
        assert!(weeks[2][4].is_future);
        assert_eq!(
            weeks.iter().flatten().filter(|d| d.is_today).count(),
            1
        );
        assert!(weeks.iter().flatten().all(|d| d.plan.is_none()));
    }

    #[test]
    fn test_calendar_on_monday() {
        let today = date(2024, 3, 4);
        let weeks = calendar(&History::new(), today, 1);
        assert_eq!(weeks[0][0].date, today);
        assert!(weeks[0][0].is_today);
    }

    #[test]
    fn test_calendar_no_weeks() {
        assert_eq!(calendar(&three_days_of_a(), date(2024, 3, 7), 0), Vec::<[CalendarDay; 7]>::new());
    }

    #[rstest]
    #[case(date(2024, 3, 3), u32::MAX)]
    #[case(NaiveDate::MIN, 2)]
    fn test_calendar_out_of_range(#[case] today: NaiveDate, #[case] weeks: u32) {
        assert_eq!(calendar(&History::new(), today, weeks), Vec::<[CalendarDay; 7]>::new());
    }

    #[rstest]
    #[case::plan_a_wins(&[PlanID::B, PlanID::A], Some(PlanID::A))]
    #[case::plan_a_only(&[PlanID::A], Some(PlanID::A))]
    #[case::plan_b_only(&[PlanID::B, PlanID::B], Some(PlanID::B))]
    #[case::rest_day(&[], None)]
    fn test_calendar_plan_per_day(#[case] plans: &[PlanID], #[case] expected: Option<PlanID>) {
        let history = history(
            plans
                .iter()
                .enumerate()
                .map(|(i, plan)| session(at(2024, 3, 5, 8 + i as u32), *plan, 100, &[]))
                .collect(),
        );
        let weeks = calendar(&history, date(2024, 3, 7), 1);
        assert_eq!(weeks[0][1].date, date(2024, 3, 5));
        assert_eq!(weeks[0][1].plan, expected);
        assert_eq!(weeks[0][0].plan, None);
    }

    #[test]
    fn test_trend_delta_after_weight_increase() {
        let history = history(vec![
            session(at(2024, 3, 4, 18), PlanID::A, 180, &[("15", "12")]),
            session(at(2024, 3, 6, 18), PlanID::A, 175, &[("17.5", "10")]),
        ]);
        let series = trend(&history, PlanID::A, "press_pecho");

        assert_eq!(
            series,
            vec![
                TrendPoint {
                    date: at(2024, 3, 4, 18),
                    weight: 15.0
                },
                TrendPoint {
                    date: at(2024, 3, 6, 18),
                    weight: 17.5
                },
            ]
        );
        assert_eq!(trend_delta(&series), Some(2.5));
    }

    #[test]
    fn test_trend() {
        let history = history(vec![
            session(at(2024, 3, 8, 18), PlanID::A, 0, &[("20", "8"), ("22,5", "6")]),
            session(at(2024, 3, 9, 18), PlanID::A, 0, &[("25kg", "5")]),
            session(at(2024, 3, 4, 18), PlanID::A, 0, &[("15", "12"), ("x", "12")]),
            session(at(2024, 3, 5, 18), PlanID::B, 0, &[("50", "12")]),
            session(at(2024, 3, 6, 18), PlanID::A, 0, &[]),
        ]);
        let series = trend(&history, PlanID::A, "press_pecho");

        assert_eq!(
            series.iter().map(|p| p.weight).collect::<Vec<_>>(),
            vec![15.0, 22.0, 25.0]
        );
        assert!(series.windows(2).all(|w| w[0].date <= w[1].date));
        assert!(series.len() <= history.sessions().filter(|s| s.plan == PlanID::A).count());
        assert_eq!(trend(&history, PlanID::A, "copa_triceps"), vec![]);
    }

    #[rstest]
    #[case(&[], None)]
    #[case(&[10.0], None)]
    #[case(&[10.0, 12.5], Some(2.5))]
    #[case(&[10.0, 12.5, 10.0], Some(-2.5))]
    #[case(&[10.0, 10.0], Some(0.0))]
    fn test_trend_delta(#[case] weights: &[f32], #[case] expected: Option<f32>) {
        let series = weights
            .iter()
            .map(|weight| TrendPoint {
                date: at(2024, 3, 4, 18),
                weight: *weight,
            })
            .collect::<Vec<_>>();
        assert_eq!(trend_delta(&series), expected);
    }

    #[test]
    fn test_tonnage() {
        assert_eq!(tonnage(three_days_of_a().sessions()), 0.45);
        assert_eq!(tonnage(History::new().sessions()), 0.0);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(5, 1)]
    #[case(4, 0)]
    #[case(125, 13)]
    #[case(2400, 240)]
    fn test_estimated_calories(#[case] duration: i64, #[case] expected: i64) {
        assert_eq!(estimated_calories(duration), expected);
    }

    #[test]
    fn test_sessions_newest_first_and_last_session() {
        let history = history(vec![
            session(at(2024, 3, 4, 18), PlanID::A, 1, &[]),
            session(at(2024, 3, 6, 18), PlanID::B, 2, &[]),
            session(at(2024, 3, 5, 18), PlanID::A, 3, &[]),
        ]);

        assert_eq!(
            sessions_newest_first(&history)
                .iter()
                .map(|s| s.total_weight_moved)
                .collect::<Vec<_>>(),
            vec![2, 3, 1]
        );
        assert_eq!(
            last_session(&history, PlanID::A).map(|s| s.total_weight_moved),
            Some(3)
        );
        assert_eq!(
            last_session(&History::new(), PlanID::B).map(|s| s.total_weight_moved),
            None
        );
    }

    #[test]
    fn test_exercise_log() {
        let history = history(vec![
            session(at(2024, 3, 4, 18), PlanID::A, 1, &[("15", "12")]),
            session(at(2024, 3, 5, 18), PlanID::A, 2, &[]),
            session(at(2024, 3, 6, 18), PlanID::A, 3, &[("17.5", "10")]),
            session(at(2024, 3, 7, 18), PlanID::B, 4, &[("20", "10")]),
            session(at(2024, 3, 8, 18), PlanID::A, 5, &[("17.5", "12")]),
        ]);

        assert_eq!(
            exercise_log(&history, PlanID::A, "press_pecho", 12)
                .iter()
                .map(|(s, _)| s.total_weight_moved)
                .collect::<Vec<_>>(),
            vec![5, 3, 1]
        );
        assert_eq!(
            exercise_log(&history, PlanID::A, "press_pecho", 2)
                .iter()
                .map(|(_, e)| e.sets[0].weight.as_str())
                .collect::<Vec<_>>(),
            vec!["17.5", "17.5"]
        );
    }
}
