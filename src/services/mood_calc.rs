//! Pure mood analytics over a user's journal entries.
//!
//! Scores live on a 0-10 scale. Estimators that need a minimum amount of data
//! return [`Reading::NoData`] instead of a zero so callers can tell "nothing
//! logged" apart from a genuine zero; the persisted snapshot flattens `NoData`
//! to the type's default.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use std::collections::HashSet;

use crate::models::metrics::{MoodTrend, WeeklyMoodPoint};
use crate::models::mood_entry::{AssessmentResponse, MoodEntry};

const MIN_ENTRIES_FOR_CONSISTENCY: usize = 3;
const CONSISTENCY_WINDOW_DAYS: i64 = 30;
const MIN_ENTRIES_FOR_TREND: usize = 5;
const STABLE_SLOPE: f64 = 0.2;
const ASSESSMENT_SCALE_MAX: f64 = 5.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading<T> {
    NoData,
    Value(T),
}

impl<T> Reading<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Reading::NoData => None,
            Reading::Value(v) => Some(v),
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Reading::NoData)
    }
}

impl<T: Default> Reading<T> {
    pub fn or_default(self) -> T {
        self.value().unwrap_or_default()
    }
}

/// Clamp into [0, 10]. NaN maps to 0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 10.0)
}

/// Base score for an emotion label, case-insensitive. Unknown labels are
/// treated as neutral.
pub fn emotion_base_score(emotion: &str) -> f64 {
    match emotion.to_lowercase().as_str() {
        "joyful" => 9.0,
        "happy" => 8.0,
        "content" => 7.0,
        "calm" => 6.0,
        "neutral" => 5.0,
        "tired" => 4.0,
        "sad" => 3.0,
        "anxious" => 2.0,
        "angry" => 1.0,
        _ => 5.0,
    }
}

pub fn mood_score(emotion: &str, assessment_average: f64) -> f64 {
    let combined = emotion_base_score(emotion) * 0.6 + assessment_average * 0.4;
    clamp_score(combined)
}

/// Score for a new entry that arrived without one. The assessment average
/// covers every response; with no responses the emotion's base score stands in.
pub fn score_new_entry(emotion: &str, responses: &[AssessmentResponse]) -> f64 {
    let assessment_average = mean(responses.iter().map(|r| r.score))
        .unwrap_or_else(|| emotion_base_score(emotion));
    mood_score(emotion, assessment_average)
}

fn is_stress_question(question_type: &str) -> bool {
    question_type == "stress" || question_type == "anxiety"
}

pub fn stress_level<'a, I>(responses: I) -> Reading<f64>
where
    I: IntoIterator<Item = &'a AssessmentResponse>,
{
    let average = mean(
        responses
            .into_iter()
            .filter(|r| is_stress_question(&r.question_type))
            .map(|r| r.score),
    );

    match average {
        Some(avg) => Reading::Value(clamp_score(avg / ASSESSMENT_SCALE_MAX * 10.0)),
        None => Reading::NoData,
    }
}

/// Share of the trailing 30 days (ending at `now`) with at least one entry,
/// on a 0-10 scale. Several entries on one calendar day count once.
pub fn consistency_at(entries: &[MoodEntry], now: DateTime<Utc>) -> Reading<f64> {
    if entries.len() < MIN_ENTRIES_FOR_CONSISTENCY {
        return Reading::NoData;
    }

    let window_start = now - Duration::days(CONSISTENCY_WINDOW_DAYS);
    let days: HashSet<NaiveDate> = entries
        .iter()
        .filter(|e| e.created_at >= window_start)
        .map(|e| e.created_at.date_naive())
        .collect();

    if days.is_empty() {
        return Reading::NoData;
    }

    let ratio = days.len() as f64 / CONSISTENCY_WINDOW_DAYS as f64;
    Reading::Value(clamp_score(ratio * 10.0))
}

/// Week-of-year as `ceil((days_since_jan1 + weekday(Jan 1) + 1) / 7)` with
/// Sunday = 0, where `days_since_jan1` is fractional (time of day included).
/// Any time after midnight therefore rolls Saturday into the next week, and
/// the count restarts at New Year.
pub fn week_number(at: DateTime<Utc>) -> u32 {
    let day_of_year = at.ordinal0();
    let jan1_weekday = (at.weekday().num_days_from_sunday() + 7 - day_of_year % 7) % 7;
    let millis_into_day = f64::from(at.num_seconds_from_midnight()) * 1000.0
        + f64::from(at.nanosecond() / 1_000_000);
    let days_since_jan1 = f64::from(day_of_year) + millis_into_day / MILLIS_PER_DAY;
    ((days_since_jan1 + f64::from(jan1_weekday) + 1.0) / 7.0).ceil() as u32
}

/// Averages of consecutive runs of entries sharing a week number. Expects
/// chronological order; a bucket closes only when the next entry's week
/// number differs.
fn weekly_averages(chronological: &[&MoodEntry]) -> Vec<f64> {
    let mut averages = Vec::new();
    let mut run: Vec<f64> = Vec::new();
    let mut current_week: Option<u32> = None;

    for entry in chronological {
        let week = week_number(entry.created_at);
        if current_week.is_some_and(|w| w != week) {
            averages.extend(mean(run.drain(..)));
        }
        current_week = Some(week);
        run.push(entry.mood_score);
    }
    averages.extend(mean(run.drain(..)));

    averages
}

/// Least-squares slope of `values` against their index.
fn slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let Some(mean_y) = mean(values.iter().copied()) else {
        return 0.0;
    };

    let (numerator, denominator) =
        values
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(num, den), (i, y)| {
                let dx = i as f64 - mean_x;
                (num + dx * (y - mean_y), den + dx * dx)
            });

    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Direction of the weekly mood averages. `entries` must be newest first, as
/// the store returns them.
pub fn mood_trend(entries: &[MoodEntry]) -> Reading<MoodTrend> {
    if entries.len() < MIN_ENTRIES_FOR_TREND {
        return Reading::NoData;
    }

    let chronological: Vec<&MoodEntry> = entries.iter().rev().collect();
    let averages = weekly_averages(&chronological);
    if averages.len() < 2 {
        return Reading::NoData;
    }

    let slope = slope(&averages);
    let trend = if slope.abs() < STABLE_SLOPE {
        MoodTrend::Stable
    } else if slope > 0.0 {
        MoodTrend::Improving
    } else {
        MoodTrend::Declining
    };
    Reading::Value(trend)
}

/// Per-week averages for charting. Entries are grouped by week number (not by
/// run) and weeks appear in the order first seen.
pub fn weekly_breakdown(entries: &[MoodEntry]) -> Vec<WeeklyMoodPoint> {
    let mut weeks: Vec<(u32, Vec<f64>)> = Vec::new();
    for entry in entries {
        let week = week_number(entry.created_at);
        match weeks.iter_mut().find(|(w, _)| *w == week) {
            Some((_, scores)) => scores.push(entry.mood_score),
            None => weeks.push((week, vec![entry.mood_score])),
        }
    }

    weeks
        .into_iter()
        .map(|(week, scores)| {
            let average = mean(scores.iter().copied()).unwrap_or_default();
            WeeklyMoodPoint {
                week: format!("Week {}", week),
                average_score: (average * 100.0).round() / 100.0,
                entries_count: scores.len(),
            }
        })
        .collect()
}

fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
