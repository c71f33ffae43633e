use std::collections::HashMap;

use chrono::NaiveDate;

use crate::{ExerciseSession, Name, ReadError, WorkoutSessions};

#[allow(async_fn_in_trait)]
pub trait StatisticsService {
    /// Aggregate statistics over the trailing `period_days` days ending
    /// today (inclusive).
    async fn get_global_stats(&self, period_days: u32) -> Result<GlobalStats, ReadError>;
    /// Per-exercise statistics over the user's entire history, ordered
    /// descending by total sets.
    async fn get_exercises_list(&self) -> Result<Vec<ExerciseStats>, ReadError>;
    /// Progression and rest-time analysis for the exercises matching
    /// `pattern` (case-insensitive, `%`/`_` wildcards).
    async fn get_exercise_detail(&self, pattern: &str) -> Result<ExerciseDetail, ReadError>;
}

/// Estimated one-rep max after Epley: `weight * (1 + reps / 30)`, rounded to
/// one decimal place. A single rep at a weight is that weight; non-positive
/// input yields the "no lift" sentinel 0.
///
/// The single authoritative implementation. All statistics call this.
#[must_use]
pub fn estimate_one_rep_max(weight: f32, reps: u32) -> f32 {
    if weight <= 0.0 || reps == 0 {
        return 0.0;
    }
    if reps == 1 {
        return weight;
    }
    #[allow(clippy::cast_precision_loss)]
    let estimate = weight * (1.0 + reps as f32 / 30.0);
    round_to_tenth(estimate)
}

fn round_to_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_to_int(value: f32) -> u32 {
    value.round() as u32
}

#[allow(clippy::cast_precision_loss)]
fn mean_rounded(values: &[u32]) -> Option<u32> {
    if values.is_empty() {
        None
    } else {
        Some(round_to_int(
            values.iter().sum::<u32>() as f32 / values.len() as f32,
        ))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlobalStats {
    pub total_workouts: u32,
    pub total_sets: u32,
    pub total_reps: u32,
    /// Sum of `reps * weight` over all main sets, rounded to the nearest
    /// integer. Dropset entries do not contribute.
    pub total_volume: u32,
    pub most_worked_exercise: Option<MostWorkedExercise>,
    pub average_workouts_per_week: f32,
    pub period_days: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MostWorkedExercise {
    /// Normalized (lowercased, trimmed) exercise name.
    pub name: String,
    /// Number of exercise records, one per occurrence in a workout, not per
    /// set.
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseStats {
    /// Display name of the first record encountered for this group.
    pub name: Name,
    pub total_sets: u32,
    pub total_volume: f32,
    pub max_weight: f32,
    pub last_performed: NaiveDate,
    /// Best `estimate_one_rep_max` over all sets, `None` if no valid set
    /// was ever recorded.
    pub estimated_one_rep_max: Option<f32>,
    pub avg_rest_time: Option<u32>,
    pub rest_time_data_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseDetail {
    pub name: Name,
    /// One point per session with at least one set, ascending by date.
    pub progress: Vec<ProgressPoint>,
    pub best_performance: Option<BestPerformance>,
    pub last_session: Option<LastSession>,
    pub estimated_one_rep_max: Option<f32>,
    pub avg_rest_time: Option<u32>,
    /// One point per session that recorded rest times, ascending by date.
    pub rest_time_evolution: Vec<RestTimePoint>,
    /// Average rest time per 5 kg weight bucket. Buckets with fewer than
    /// two contributing sets are dropped as statistically insignificant.
    pub rest_time_correlation: Vec<RestTimeBucket>,
    /// Whether enough rest-time data exists (five or more sets) for the
    /// rest-time views to be shown at all.
    pub has_rest_time_data: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressPoint {
    pub date: NaiveDate,
    pub max_weight: f32,
    pub volume: u32,
    pub workout_name: Name,
    pub avg_rest_time: Option<u32>,
    pub estimated_one_rep_max: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BestPerformance {
    pub weight: f32,
    pub reps: u32,
    pub date: NaiveDate,
    pub estimated_one_rep_max: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LastSession {
    pub date: NaiveDate,
    pub workout_name: Name,
    pub sets: Vec<LastSessionSet>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LastSessionSet {
    pub reps: u32,
    pub weight: f32,
    pub rest_time: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestTimePoint {
    pub date: NaiveDate,
    pub avg_rest_time: u32,
    pub avg_weight: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestTimeBucket {
    /// Weight rounded to the nearest 5 kg.
    pub weight: u32,
    pub avg_rest_time: u32,
    pub count: u32,
}

/// Reduce a window of workouts to the dashboard totals. `workouts` is
/// stable-sorted by date before reduction so that the first-encountered
/// tie-break of the most-worked exercise is reproducible regardless of
/// fetch order.
#[must_use]
pub fn global_stats(workouts: &[WorkoutSessions], period_days: u32) -> GlobalStats {
    if workouts.is_empty() {
        return GlobalStats {
            total_workouts: 0,
            total_sets: 0,
            total_reps: 0,
            total_volume: 0,
            most_worked_exercise: None,
            average_workouts_per_week: 0.0,
            period_days,
        };
    }

    let mut sorted = workouts.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|w| w.workout.date);

    let mut total_sets = 0;
    let mut total_reps = 0;
    let mut total_volume = 0.0;
    let mut occurrences: HashMap<String, u32> = HashMap::new();
    let mut most_worked_exercise: Option<MostWorkedExercise> = None;

    for workout in &sorted {
        for session in &workout.sessions {
            let name = session.exercise.name.normalized();
            let count = occurrences.entry(name.clone()).or_insert(0);
            *count += 1;
            if most_worked_exercise
                .as_ref()
                .is_none_or(|most_worked| *count > most_worked.count)
            {
                most_worked_exercise = Some(MostWorkedExercise {
                    name,
                    count: *count,
                });
            }

            for (reps, weight) in session.filled_sets() {
                total_sets += 1;
                total_reps += reps;
                #[allow(clippy::cast_precision_loss)]
                {
                    total_volume += reps as f32 * weight;
                }
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let average_workouts_per_week = round_to_tenth(workouts.len() as f32 / (period_days as f32 / 7.0));

    let total_workouts = u32::try_from(workouts.len()).unwrap_or(u32::MAX);

    GlobalStats {
        total_workouts,
        total_sets,
        total_reps,
        total_volume: round_to_int(total_volume),
        most_worked_exercise,
        average_workouts_per_week,
        period_days,
    }
}

struct ExerciseGroup {
    name: Name,
    total_sets: u32,
    total_volume: f32,
    max_weight: f32,
    last_performed: NaiveDate,
    best_one_rep_max: f32,
    rest_times: Vec<u32>,
}

/// Reduce the entire exercise history to one statistics row per
/// case-insensitively grouped exercise name.
#[must_use]
pub fn exercise_stats(sessions: &[ExerciseSession]) -> Vec<ExerciseStats> {
    let mut order = Vec::new();
    let mut groups: HashMap<String, ExerciseGroup> = HashMap::new();

    for session in sessions {
        let key = session.exercise.name.normalized();
        let group = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            ExerciseGroup {
                name: session.exercise.name.clone(),
                total_sets: 0,
                total_volume: 0.0,
                max_weight: 0.0,
                last_performed: session.date,
                best_one_rep_max: 0.0,
                rest_times: Vec::new(),
            }
        });

        group.last_performed = group.last_performed.max(session.date);

        for (reps, weight) in session.filled_sets() {
            group.total_sets += 1;
            #[allow(clippy::cast_precision_loss)]
            {
                group.total_volume += reps as f32 * weight;
            }
            group.max_weight = group.max_weight.max(weight);
            group.best_one_rep_max = group
                .best_one_rep_max
                .max(estimate_one_rep_max(weight, reps));
        }
        group.rest_times.extend(session.rest_times());
    }

    let mut result = order
        .into_iter()
        .map(|key| {
            let group = &groups[&key];
            ExerciseStats {
                name: group.name.clone(),
                total_sets: group.total_sets,
                total_volume: group.total_volume,
                max_weight: group.max_weight,
                last_performed: group.last_performed,
                estimated_one_rep_max: (group.best_one_rep_max > 0.0)
                    .then_some(group.best_one_rep_max),
                avg_rest_time: mean_rounded(&group.rest_times),
                rest_time_data_count: u32::try_from(group.rest_times.len()).unwrap_or(u32::MAX),
            }
        })
        .collect::<Vec<_>>();
    result.sort_by(|a, b| b.total_sets.cmp(&a.total_sets));
    result
}

/// Reduce all sessions of a single exercise to its detail view. Sessions
/// are stable-sorted by date; sessions without sets contribute nothing.
/// Returns `None` when `sessions` is empty (exercise not found).
#[must_use]
pub fn exercise_detail(sessions: &[ExerciseSession]) -> Option<ExerciseDetail> {
    if sessions.is_empty() {
        return None;
    }

    let mut sorted = sessions.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|s| s.date);

    let mut progress = Vec::new();
    let mut best_performance: Option<BestPerformance> = None;
    let mut last_session = None;
    let mut best_one_rep_max = 0.0_f32;
    let mut all_rest_times = Vec::new();
    let mut rest_time_evolution = Vec::new();
    let mut buckets: HashMap<u32, Vec<u32>> = HashMap::new();

    for session in &sorted {
        if session.sets.is_empty() {
            continue;
        }

        let mut max_weight = 0.0_f32;
        let mut volume = 0.0;
        let mut session_one_rep_max = 0.0_f32;
        let session_rest_times = session.rest_times();

        for set in &session.sets {
            let reps = set.reps.map_or(0, u32::from);
            let weight = set.weight.map_or(0.0, f32::from);

            max_weight = max_weight.max(weight);
            #[allow(clippy::cast_precision_loss)]
            {
                volume += reps as f32 * weight;
            }

            let one_rep_max = estimate_one_rep_max(weight, reps);
            session_one_rep_max = session_one_rep_max.max(one_rep_max);
            best_one_rep_max = best_one_rep_max.max(one_rep_max);

            if let Some(rest_time) = set.rest_time.map(u32::from).filter(|t| *t > 0) {
                all_rest_times.push(rest_time);
                buckets
                    .entry(round_to_int(weight / 5.0) * 5)
                    .or_default()
                    .push(rest_time);
            }

            // Strictly greater, so the earliest achiever of the best
            // estimate keeps the record.
            if best_performance
                .as_ref()
                .is_none_or(|best| one_rep_max > best.estimated_one_rep_max)
            {
                best_performance = Some(BestPerformance {
                    weight,
                    reps,
                    date: session.date,
                    estimated_one_rep_max: one_rep_max,
                });
            }
        }

        let avg_rest_time = mean_rounded(&session_rest_times);

        progress.push(ProgressPoint {
            date: session.date,
            max_weight,
            volume: round_to_int(volume),
            workout_name: session.workout_name.clone(),
            avg_rest_time,
            estimated_one_rep_max: (session_one_rep_max > 0.0).then_some(session_one_rep_max),
        });

        if let Some(avg_rest_time) = avg_rest_time {
            rest_time_evolution.push(RestTimePoint {
                date: session.date,
                avg_rest_time,
                avg_weight: session.avg_weight().map_or(0, round_to_int),
            });
        }

        let mut sets = session.sets.clone();
        sets.sort_by_key(|s| s.position);
        last_session = Some(LastSession {
            date: session.date,
            workout_name: session.workout_name.clone(),
            sets: sets
                .into_iter()
                .map(|s| LastSessionSet {
                    reps: s.reps.map_or(0, u32::from),
                    weight: s.weight.map_or(0.0, f32::from),
                    rest_time: s.rest_time.map(u32::from).filter(|t| *t > 0),
                })
                .collect(),
        });
    }

    let mut rest_time_correlation = buckets
        .into_iter()
        .filter(|(_, times)| times.len() >= 2)
        .map(|(weight, times)| RestTimeBucket {
            weight,
            avg_rest_time: mean_rounded(&times).unwrap_or(0),
            count: u32::try_from(times.len()).unwrap_or(u32::MAX),
        })
        .collect::<Vec<_>>();
    rest_time_correlation.sort_by_key(|bucket| bucket.weight);

    Some(ExerciseDetail {
        name: sorted[0].exercise.name.clone(),
        progress,
        best_performance,
        last_session,
        estimated_one_rep_max: (best_one_rep_max > 0.0).then_some(best_one_rep_max),
        avg_rest_time: mean_rounded(&all_rest_times),
        rest_time_evolution,
        rest_time_correlation,
        has_rest_time_data: all_rest_times.len() >= 5,
    })
}
