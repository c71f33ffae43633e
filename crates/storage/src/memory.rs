use std::cell::RefCell;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use liftlog_domain as domain;
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Single-process storage backend holding the entity tree in id-indexed
/// arenas with parent-id back-references. Rows carry a creation sequence
/// number; reads return records in creation order, children ordered by
/// position with creation order breaking ties.
///
/// Intended for a single-threaded cooperative runtime. All operations
/// complete without suspending, so a caller abandoning an await leaves the
/// store consistent.
pub struct InMemory {
    state: RefCell<State>,
}

#[derive(Default)]
struct State {
    users: BTreeMap<Uuid, UserRow>,
    workouts: BTreeMap<Uuid, WorkoutRow>,
    exercises: BTreeMap<Uuid, ExerciseRow>,
    sets: BTreeMap<Uuid, SetRow>,
    dropset_entries: BTreeMap<Uuid, DropsetEntryRow>,
    session: Option<Uuid>,
    seq: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct UserRow {
    id: Uuid,
    name: String,
    seq: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct WorkoutRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    date: NaiveDate,
    notes: String,
    seq: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct ExerciseRow {
    id: Uuid,
    workout_id: Uuid,
    name: String,
    position: u32,
    notes: String,
    seq: u64,
}

/// Raw set row. `reps`, `weight` and `rest_time` are unconstrained here;
/// values outside the domain ranges surface as absent when converted.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct SetRow {
    id: Uuid,
    exercise_id: Uuid,
    position: u32,
    reps: Option<u32>,
    weight: Option<f32>,
    rest_time: Option<u32>,
    is_dropset: bool,
    seq: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct DropsetEntryRow {
    id: Uuid,
    set_id: Uuid,
    position: u32,
    reps: Option<u32>,
    weight: Option<f32>,
    seq: u64,
}

#[derive(Serialize, Deserialize, Default)]
struct Snapshot {
    users: Vec<UserRow>,
    workouts: Vec<WorkoutRow>,
    exercises: Vec<ExerciseRow>,
    sets: Vec<SetRow>,
    dropset_entries: Vec<DropsetEntryRow>,
}

#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Format(#[from] serde_json::Error),
    #[error("invalid name in snapshot: {0}")]
    Name(#[from] domain::NameError),
}

impl UserRow {
    fn to_domain(&self) -> Result<domain::User, domain::StorageError> {
        Ok(domain::User {
            id: self.id.into(),
            name: name(&self.name)?,
        })
    }
}

impl WorkoutRow {
    fn to_domain(&self) -> Result<domain::Workout, domain::StorageError> {
        Ok(domain::Workout {
            id: self.id.into(),
            user_id: self.user_id.into(),
            name: name(&self.name)?,
            date: self.date,
            notes: self.notes.clone(),
        })
    }
}

impl ExerciseRow {
    fn to_domain(&self) -> Result<domain::Exercise, domain::StorageError> {
        Ok(domain::Exercise {
            id: self.id.into(),
            workout_id: self.workout_id.into(),
            name: name(&self.name)?,
            position: self.position,
            notes: self.notes.clone(),
        })
    }
}

impl SetRow {
    fn to_domain(&self) -> domain::Set {
        domain::Set {
            id: self.id.into(),
            exercise_id: self.exercise_id.into(),
            position: self.position,
            reps: self.reps.and_then(|reps| domain::Reps::new(reps).ok()),
            weight: self.weight.and_then(|weight| domain::Weight::new(weight).ok()),
            rest_time: self
                .rest_time
                .and_then(|rest_time| domain::RestTime::new(rest_time).ok()),
            is_dropset: self.is_dropset,
        }
    }
}

impl DropsetEntryRow {
    fn to_domain(&self) -> domain::DropsetEntry {
        domain::DropsetEntry {
            id: self.id.into(),
            set_id: self.set_id.into(),
            position: self.position,
            reps: self.reps.and_then(|reps| domain::Reps::new(reps).ok()),
            weight: self.weight.and_then(|weight| domain::Weight::new(weight).ok()),
        }
    }
}

fn name(value: &str) -> Result<domain::Name, domain::StorageError> {
    domain::Name::new(value).map_err(|err| domain::StorageError::Other(Box::new(err)))
}

/// Case-insensitive SQL `LIKE` match. `%` matches any sequence, `_` a
/// single character; a pattern without wildcards is an equality test.
fn ilike(pattern: &str, value: &str) -> bool {
    fn matches(pattern: &[char], value: &[char]) -> bool {
        match pattern.split_first() {
            None => value.is_empty(),
            Some((&'%', rest)) => (0..=value.len()).any(|i| matches(rest, &value[i..])),
            Some((&'_', rest)) => value.split_first().is_some_and(|(_, v)| matches(rest, v)),
            Some((&c, rest)) => value
                .split_first()
                .is_some_and(|(&v, rest_value)| v == c && matches(rest, rest_value)),
        }
    }

    let pattern = pattern.to_lowercase().chars().collect::<Vec<_>>();
    let value = value.to_lowercase().chars().collect::<Vec<_>>();
    matches(&pattern, &value)
}

impl State {
    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn exercises_of(&self, workout_id: Uuid) -> Vec<&ExerciseRow> {
        let mut rows = self
            .exercises
            .values()
            .filter(|e| e.workout_id == workout_id)
            .collect::<Vec<_>>();
        rows.sort_by_key(|e| (e.position, e.seq));
        rows
    }

    fn sets_of(&self, exercise_id: Uuid) -> Vec<&SetRow> {
        let mut rows = self
            .sets
            .values()
            .filter(|s| s.exercise_id == exercise_id)
            .collect::<Vec<_>>();
        rows.sort_by_key(|s| (s.position, s.seq));
        rows
    }

    fn dropsets_of(&self, set_id: Uuid) -> Vec<&DropsetEntryRow> {
        let mut rows = self
            .dropset_entries
            .values()
            .filter(|d| d.set_id == set_id)
            .collect::<Vec<_>>();
        rows.sort_by_key(|d| (d.position, d.seq));
        rows
    }

    fn set_with_dropsets(&self, row: &SetRow) -> domain::SetWithDropsets {
        domain::SetWithDropsets {
            set: row.to_domain(),
            dropsets: self
                .dropsets_of(row.id)
                .into_iter()
                .map(DropsetEntryRow::to_domain)
                .collect(),
        }
    }

    fn exercise_session(
        &self,
        exercise: &ExerciseRow,
        workout: &WorkoutRow,
    ) -> Result<domain::ExerciseSession, domain::StorageError> {
        Ok(domain::ExerciseSession {
            exercise: exercise.to_domain()?,
            workout_name: name(&workout.name)?,
            date: workout.date,
            sets: self
                .sets_of(exercise.id)
                .into_iter()
                .map(SetRow::to_domain)
                .collect(),
        })
    }

    fn delete_exercise_tree(&mut self, exercise_id: Uuid) {
        let set_ids = self
            .sets
            .values()
            .filter(|s| s.exercise_id == exercise_id)
            .map(|s| s.id)
            .collect::<Vec<_>>();
        for set_id in set_ids {
            self.delete_set_tree(set_id);
        }
        self.exercises.remove(&exercise_id);
    }

    fn delete_set_tree(&mut self, set_id: Uuid) {
        self.dropset_entries.retain(|_, d| d.set_id != set_id);
        self.sets.remove(&set_id);
    }
}

impl InMemory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RefCell::new(State::default()),
        }
    }

    /// Register a user. The store has no user management beyond this; the
    /// session operations refer to users created here or loaded from a
    /// snapshot.
    pub fn add_user(&self, name: domain::Name) -> domain::User {
        let mut state = self.state.borrow_mut();
        let id = Uuid::new_v4();
        let seq = state.next_seq();
        state.users.insert(
            id,
            UserRow {
                id,
                name: name.to_string(),
                seq,
            },
        );
        domain::User {
            id: id.into(),
            name,
        }
    }

    /// Load a store from a JSON snapshot produced by [`to_json`].
    /// Names are validated; the session is not part of a snapshot.
    ///
    /// [`to_json`]: InMemory::to_json
    pub fn from_json(data: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(data)?;
        for user in &snapshot.users {
            domain::Name::new(&user.name)?;
        }
        for workout in &snapshot.workouts {
            domain::Name::new(&workout.name)?;
        }
        for exercise in &snapshot.exercises {
            domain::Name::new(&exercise.name)?;
        }

        let mut state = State {
            seq: snapshot
                .users
                .iter()
                .map(|u| u.seq)
                .chain(snapshot.workouts.iter().map(|w| w.seq))
                .chain(snapshot.exercises.iter().map(|e| e.seq))
                .chain(snapshot.sets.iter().map(|s| s.seq))
                .chain(snapshot.dropset_entries.iter().map(|d| d.seq))
                .max()
                .unwrap_or(0),
            ..State::default()
        };
        state.users = snapshot.users.into_iter().map(|u| (u.id, u)).collect();
        state.workouts = snapshot.workouts.into_iter().map(|w| (w.id, w)).collect();
        state.exercises = snapshot.exercises.into_iter().map(|e| (e.id, e)).collect();
        state.sets = snapshot.sets.into_iter().map(|s| (s.id, s)).collect();
        state.dropset_entries = snapshot
            .dropset_entries
            .into_iter()
            .map(|d| (d.id, d))
            .collect();

        Ok(Self {
            state: RefCell::new(state),
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let state = self.state.borrow();
        serde_json::to_string(&Snapshot {
            users: state.users.values().cloned().collect(),
            workouts: state.workouts.values().cloned().collect(),
            exercises: state.exercises.values().cloned().collect(),
            sets: state.sets.values().cloned().collect(),
            dropset_entries: state.dropset_entries.values().cloned().collect(),
        })
    }
}

impl Default for InMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl domain::SessionRepository for InMemory {
    fn current_user(&self) -> Option<domain::User> {
        let state = self.state.borrow();
        let id = state.session?;
        state.users.get(&id).and_then(|u| u.to_domain().ok())
    }

    async fn request_session(&self, user_id: domain::UserID) -> Result<domain::User, domain::ReadError> {
        let mut state = self.state.borrow_mut();
        let user = state
            .users
            .get(&*user_id)
            .ok_or(domain::ReadError::NotFound)?
            .to_domain()?;
        state.session = Some(*user_id);
        debug!("session opened for user {}", *user_id);
        Ok(user)
    }

    async fn delete_session(&self) -> Result<(), domain::DeleteError> {
        self.state.borrow_mut().session = None;
        Ok(())
    }
}

impl domain::WorkoutRepository for InMemory {
    async fn read_workouts(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::Workout>, domain::ReadError> {
        let state = self.state.borrow();
        let mut rows = state
            .workouts
            .values()
            .filter(|w| w.user_id == *user_id)
            .collect::<Vec<_>>();
        rows.sort_by_key(|w| w.seq);
        Ok(rows
            .into_iter()
            .map(WorkoutRow::to_domain)
            .collect::<Result<_, _>>()?)
    }

    async fn read_workouts_between(
        &self,
        user_id: domain::UserID,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<domain::Workout>, domain::ReadError> {
        let state = self.state.borrow();
        let mut rows = state
            .workouts
            .values()
            .filter(|w| w.user_id == *user_id && (first..=last).contains(&w.date))
            .collect::<Vec<_>>();
        rows.sort_by_key(|w| w.seq);
        Ok(rows
            .into_iter()
            .map(WorkoutRow::to_domain)
            .collect::<Result<_, _>>()?)
    }

    async fn read_workout(
        &self,
        user_id: domain::UserID,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutWithExercises, domain::ReadError> {
        let state = self.state.borrow();
        let row = state
            .workouts
            .get(&*id)
            .filter(|w| w.user_id == *user_id)
            .ok_or(domain::ReadError::NotFound)?;
        let exercises = state
            .exercises_of(row.id)
            .into_iter()
            .map(|e| {
                Ok(domain::ExerciseWithSets {
                    exercise: e.to_domain()?,
                    sets: state
                        .sets_of(e.id)
                        .into_iter()
                        .map(|s| state.set_with_dropsets(s))
                        .collect(),
                })
            })
            .collect::<Result<_, domain::StorageError>>()?;
        Ok(domain::WorkoutWithExercises {
            workout: row.to_domain()?,
            exercises,
        })
    }

    async fn read_workouts_with_exercises_since(
        &self,
        user_id: domain::UserID,
        start: NaiveDate,
    ) -> Result<Vec<domain::WorkoutSessions>, domain::ReadError> {
        let state = self.state.borrow();
        let mut rows = state
            .workouts
            .values()
            .filter(|w| w.user_id == *user_id && w.date >= start)
            .collect::<Vec<_>>();
        rows.sort_by_key(|w| w.seq);
        Ok(rows
            .into_iter()
            .map(|workout| {
                Ok(domain::WorkoutSessions {
                    workout: workout.to_domain()?,
                    sessions: state
                        .exercises_of(workout.id)
                        .into_iter()
                        .map(|e| state.exercise_session(e, workout))
                        .collect::<Result<_, _>>()?,
                })
            })
            .collect::<Result<_, domain::StorageError>>()?)
    }

    async fn read_exercise_sessions(
        &self,
        user_id: domain::UserID,
        pattern: Option<&str>,
    ) -> Result<Vec<domain::ExerciseSession>, domain::ReadError> {
        let state = self.state.borrow();
        let mut rows = state
            .exercises
            .values()
            .filter(|e| pattern.is_none_or(|p| ilike(p, &e.name)))
            .filter_map(|e| {
                state
                    .workouts
                    .get(&e.workout_id)
                    .filter(|w| w.user_id == *user_id)
                    .map(|w| (e, w))
            })
            .collect::<Vec<_>>();
        rows.sort_by_key(|(e, _)| e.seq);
        Ok(rows
            .into_iter()
            .map(|(e, w)| state.exercise_session(e, w))
            .collect::<Result<_, _>>()?)
    }

    async fn create_workout(
        &self,
        user_id: domain::UserID,
        name: domain::Name,
        date: NaiveDate,
        notes: String,
    ) -> Result<domain::Workout, domain::CreateError> {
        let mut state = self.state.borrow_mut();
        if !state.users.contains_key(&*user_id) {
            return Err(domain::CreateError::NotFound);
        }
        let id = Uuid::new_v4();
        let seq = state.next_seq();
        let row = WorkoutRow {
            id,
            user_id: *user_id,
            name: name.to_string(),
            date,
            notes,
            seq,
        };
        let workout = row.to_domain()?;
        state.workouts.insert(id, row);
        Ok(workout)
    }

    async fn modify_workout(
        &self,
        id: domain::WorkoutID,
        name: Option<domain::Name>,
        notes: Option<String>,
    ) -> Result<domain::Workout, domain::UpdateError> {
        let mut state = self.state.borrow_mut();
        let row = state
            .workouts
            .get_mut(&*id)
            .ok_or(domain::UpdateError::NotFound)?;
        if let Some(name) = name {
            row.name = name.to_string();
        }
        if let Some(notes) = notes {
            row.notes = notes;
        }
        Ok(row.to_domain()?)
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        let mut state = self.state.borrow_mut();
        if state.workouts.remove(&*id).is_none() {
            return Err(domain::DeleteError::NotFound);
        }
        let exercise_ids = state
            .exercises
            .values()
            .filter(|e| e.workout_id == *id)
            .map(|e| e.id)
            .collect::<Vec<_>>();
        for exercise_id in exercise_ids {
            state.delete_exercise_tree(exercise_id);
        }
        Ok(id)
    }

    async fn duplicate_workout(
        &self,
        user_id: domain::UserID,
        source: domain::WorkoutID,
        date: NaiveDate,
        name: Option<domain::Name>,
    ) -> Result<domain::WorkoutID, domain::CreateError> {
        let mut state = self.state.borrow_mut();
        // Ownership is checked before the first insert so that a failed
        // duplication leaves no rows behind.
        let source_row = state
            .workouts
            .get(&*source)
            .filter(|w| w.user_id == *user_id)
            .cloned()
            .ok_or(domain::CreateError::NotFound)?;

        let workout_id = Uuid::new_v4();
        let seq = state.next_seq();
        state.workouts.insert(
            workout_id,
            WorkoutRow {
                id: workout_id,
                user_id: source_row.user_id,
                name: name.map_or(source_row.name.clone(), |n| n.to_string()),
                date,
                notes: source_row.notes.clone(),
                seq,
            },
        );

        let mut copied_exercises = 0;
        let mut copied_sets = 0;
        let source_exercises = state
            .exercises_of(source_row.id)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();
        for source_exercise in source_exercises {
            let exercise_id = Uuid::new_v4();
            let seq = state.next_seq();
            state.exercises.insert(
                exercise_id,
                ExerciseRow {
                    id: exercise_id,
                    workout_id,
                    name: source_exercise.name.clone(),
                    position: source_exercise.position,
                    notes: source_exercise.notes.clone(),
                    seq,
                },
            );
            copied_exercises += 1;

            let source_sets = state
                .sets_of(source_exercise.id)
                .into_iter()
                .cloned()
                .collect::<Vec<_>>();
            for source_set in source_sets {
                let set_id = Uuid::new_v4();
                let seq = state.next_seq();
                state.sets.insert(
                    set_id,
                    SetRow {
                        id: set_id,
                        exercise_id,
                        seq,
                        ..source_set
                    },
                );
                copied_sets += 1;

                let source_dropsets = state
                    .dropsets_of(source_set.id)
                    .into_iter()
                    .cloned()
                    .collect::<Vec<_>>();
                for source_dropset in source_dropsets {
                    let dropset_id = Uuid::new_v4();
                    let seq = state.next_seq();
                    state.dropset_entries.insert(
                        dropset_id,
                        DropsetEntryRow {
                            id: dropset_id,
                            set_id,
                            seq,
                            ..source_dropset
                        },
                    );
                }
            }
        }

        debug!(
            "duplicated workout {} to {workout_id} ({copied_exercises} exercises, {copied_sets} sets)",
            *source
        );
        Ok(workout_id.into())
    }
}

impl domain::ExerciseRepository for InMemory {
    async fn create_exercise(
        &self,
        workout_id: domain::WorkoutID,
        name: domain::Name,
        position: u32,
        notes: String,
    ) -> Result<domain::Exercise, domain::CreateError> {
        let mut state = self.state.borrow_mut();
        if !state.workouts.contains_key(&*workout_id) {
            return Err(domain::CreateError::NotFound);
        }
        let id = Uuid::new_v4();
        let seq = state.next_seq();
        let row = ExerciseRow {
            id,
            workout_id: *workout_id,
            name: name.to_string(),
            position,
            notes,
            seq,
        };
        let exercise = row.to_domain()?;
        state.exercises.insert(id, row);
        Ok(exercise)
    }

    async fn replace_exercise(
        &self,
        exercise: domain::Exercise,
    ) -> Result<domain::Exercise, domain::UpdateError> {
        let mut state = self.state.borrow_mut();
        if !state.workouts.contains_key(&*exercise.workout_id) {
            return Err(domain::UpdateError::NotFound);
        }
        let row = state
            .exercises
            .get_mut(&*exercise.id)
            .ok_or(domain::UpdateError::NotFound)?;
        row.workout_id = *exercise.workout_id;
        row.name = exercise.name.to_string();
        row.position = exercise.position;
        row.notes = exercise.notes.clone();
        Ok(exercise)
    }

    async fn delete_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<domain::ExerciseID, domain::DeleteError> {
        let mut state = self.state.borrow_mut();
        if !state.exercises.contains_key(&*id) {
            return Err(domain::DeleteError::NotFound);
        }
        state.delete_exercise_tree(*id);
        Ok(id)
    }

    async fn reorder_exercises(
        &self,
        positions: Vec<(domain::ExerciseID, u32)>,
    ) -> Result<(), domain::UpdateError> {
        let mut state = self.state.borrow_mut();
        // All ids are checked before the first write so that a partial
        // reorder cannot be observed.
        if positions
            .iter()
            .any(|(id, _)| !state.exercises.contains_key(&**id))
        {
            return Err(domain::UpdateError::NotFound);
        }
        for (id, position) in positions {
            if let Some(row) = state.exercises.get_mut(&*id) {
                row.position = position;
            }
        }
        Ok(())
    }
}

impl domain::SetRepository for InMemory {
    async fn create_set(
        &self,
        exercise_id: domain::ExerciseID,
        set: domain::NewSet,
    ) -> Result<domain::Set, domain::CreateError> {
        let mut state = self.state.borrow_mut();
        insert_set(&mut state, exercise_id, set)
    }

    async fn create_sets(
        &self,
        exercise_id: domain::ExerciseID,
        sets: Vec<domain::NewSet>,
    ) -> Result<Vec<domain::Set>, domain::CreateError> {
        let mut state = self.state.borrow_mut();
        if !state.exercises.contains_key(&*exercise_id) {
            return Err(domain::CreateError::NotFound);
        }
        sets.into_iter()
            .map(|set| insert_set(&mut state, exercise_id, set))
            .collect()
    }

    async fn replace_set(&self, set: domain::Set) -> Result<domain::Set, domain::UpdateError> {
        let mut state = self.state.borrow_mut();
        if !state.exercises.contains_key(&*set.exercise_id) {
            return Err(domain::UpdateError::NotFound);
        }
        let row = state
            .sets
            .get_mut(&*set.id)
            .ok_or(domain::UpdateError::NotFound)?;
        row.exercise_id = *set.exercise_id;
        row.position = set.position;
        row.reps = set.reps.map(u32::from);
        row.weight = set.weight.map(f32::from);
        row.rest_time = set.rest_time.map(u32::from);
        row.is_dropset = set.is_dropset;
        Ok(set)
    }

    async fn delete_set(&self, id: domain::SetID) -> Result<domain::SetID, domain::DeleteError> {
        let mut state = self.state.borrow_mut();
        if !state.sets.contains_key(&*id) {
            return Err(domain::DeleteError::NotFound);
        }
        state.delete_set_tree(*id);
        Ok(id)
    }

    async fn create_dropset_entries(
        &self,
        set_id: domain::SetID,
        entries: Vec<domain::NewDropsetEntry>,
    ) -> Result<Vec<domain::DropsetEntry>, domain::CreateError> {
        let mut state = self.state.borrow_mut();
        if !state.sets.contains_key(&*set_id) {
            return Err(domain::CreateError::NotFound);
        }
        Ok(entries
            .into_iter()
            .map(|entry| {
                let id = Uuid::new_v4();
                let seq = state.next_seq();
                let row = DropsetEntryRow {
                    id,
                    set_id: *set_id,
                    position: entry.position,
                    reps: Some(entry.reps.into()),
                    weight: Some(entry.weight.into()),
                    seq,
                };
                let entry = row.to_domain();
                state.dropset_entries.insert(id, row);
                entry
            })
            .collect())
    }

    async fn delete_dropset_entry(
        &self,
        id: domain::DropsetEntryID,
    ) -> Result<domain::DropsetEntryID, domain::DeleteError> {
        let mut state = self.state.borrow_mut();
        if state.dropset_entries.remove(&*id).is_none() {
            return Err(domain::DeleteError::NotFound);
        }
        Ok(id)
    }
}

fn insert_set(
    state: &mut State,
    exercise_id: domain::ExerciseID,
    set: domain::NewSet,
) -> Result<domain::Set, domain::CreateError> {
    if !state.exercises.contains_key(&*exercise_id) {
        return Err(domain::CreateError::NotFound);
    }
    let id = Uuid::new_v4();
    let seq = state.next_seq();
    let row = SetRow {
        id,
        exercise_id: *exercise_id,
        position: set.position,
        reps: Some(set.reps.into()),
        weight: Some(set.weight.into()),
        rest_time: set.rest_time.map(u32::from),
        is_dropset: set.is_dropset,
        seq,
    };
    let set = row.to_domain();
    state.sets.insert(id, row);
    Ok(set)
}
