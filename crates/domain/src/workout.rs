use chrono::NaiveDate;
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, ExerciseSession, ExerciseWithSets, Name, ReadError, UpdateError,
    UserID,
};

/// Storage collaborator for the workout tree. Reads scoped to a user return
/// records in creation order; nested children (exercises, sets, dropset
/// entries) are ordered by position, ties broken by creation order. The
/// documented tie-break rules of the statistics views depend on this
/// ordering contract.
#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self, user_id: UserID) -> Result<Vec<Workout>, ReadError>;
    async fn read_workouts_between(
        &self,
        user_id: UserID,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<Workout>, ReadError>;
    async fn read_workout(
        &self,
        user_id: UserID,
        id: WorkoutID,
    ) -> Result<WorkoutWithExercises, ReadError>;
    /// Workouts with `date >= start`, eagerly joined to exercises and sets.
    /// Dropset entries are not fetched; the global statistics exclude them.
    async fn read_workouts_with_exercises_since(
        &self,
        user_id: UserID,
        start: NaiveDate,
    ) -> Result<Vec<WorkoutSessions>, ReadError>;
    /// Exercise records joined to their parent workout and sets. `pattern`
    /// filters by name with case-insensitive `ILIKE` semantics (`%` and `_`
    /// wildcards, no wildcard means case-insensitive equality); `None`
    /// returns the user's entire history.
    async fn read_exercise_sessions(
        &self,
        user_id: UserID,
        pattern: Option<&str>,
    ) -> Result<Vec<ExerciseSession>, ReadError>;
    async fn create_workout(
        &self,
        user_id: UserID,
        name: Name,
        date: NaiveDate,
        notes: String,
    ) -> Result<Workout, CreateError>;
    async fn modify_workout(
        &self,
        id: WorkoutID,
        name: Option<Name>,
        notes: Option<String>,
    ) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
    /// Atomic server-side deep copy of a workout graph to a new date. Either
    /// the whole new graph exists afterwards or nothing was written. A
    /// missing or foreign-owned source fails with `CreateError::NotFound`.
    async fn duplicate_workout(
        &self,
        user_id: UserID,
        source: WorkoutID,
        date: NaiveDate,
        name: Option<Name>,
    ) -> Result<WorkoutID, CreateError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn get_workouts_between(
        &self,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<Workout>, ReadError>;
    async fn get_workout(&self, id: WorkoutID) -> Result<WorkoutWithExercises, ReadError>;
    async fn create_workout(
        &self,
        name: Name,
        date: NaiveDate,
        notes: String,
    ) -> Result<Workout, CreateError>;
    async fn modify_workout(
        &self,
        id: WorkoutID,
        name: Option<Name>,
        notes: Option<String>,
    ) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
    async fn duplicate_workout(
        &self,
        source: WorkoutID,
        date: NaiveDate,
        name: Option<Name>,
    ) -> Result<WorkoutID, CreateError>;
}

/// The `date` is calendar identity: statistics bucket by it, and it cannot
/// be modified after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub user_id: UserID,
    pub name: Name,
    pub date: NaiveDate,
    pub notes: String,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// A workout joined to its full exercise/set/dropset tree.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutWithExercises {
    pub workout: Workout,
    pub exercises: Vec<ExerciseWithSets>,
}

impl WorkoutWithExercises {
    /// Total volume of the workout including dropset entries.
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.exercises.iter().map(ExerciseWithSets::volume).sum()
    }
}

/// A workout's exercise sessions as fetched for the global statistics:
/// exercises and their sets, without dropset entries.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSessions {
    pub workout: Workout,
    pub sessions: Vec<ExerciseSession>,
}
