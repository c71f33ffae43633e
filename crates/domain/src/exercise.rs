use chrono::NaiveDate;
use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, DeleteError, Name, Set, SetWithDropsets, UpdateError, WorkoutID};

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn create_exercise(
        &self,
        workout_id: WorkoutID,
        name: Name,
        position: u32,
        notes: String,
    ) -> Result<Exercise, CreateError>;
    async fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;
    async fn reorder_exercises(&self, positions: Vec<(ExerciseID, u32)>)
    -> Result<(), UpdateError>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn create_exercise(
        &self,
        workout_id: WorkoutID,
        name: Name,
        position: u32,
        notes: String,
    ) -> Result<Exercise, CreateError>;
    async fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;
    async fn reorder_exercises(&self, positions: Vec<(ExerciseID, u32)>)
    -> Result<(), UpdateError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub workout_id: WorkoutID,
    pub name: Name,
    pub position: u32,
    pub notes: String,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// An exercise joined to its sets and dropset entries, as part of a full
/// workout tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseWithSets {
    pub exercise: Exercise,
    pub sets: Vec<SetWithDropsets>,
}

impl ExerciseWithSets {
    /// Total volume including dropset entries.
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.sets.iter().map(SetWithDropsets::volume).sum()
    }
}

/// One occurrence of an exercise within one workout, joined to the parent
/// workout's name and date. This is the unit of the per-exercise statistics
/// ("session" in the statistics views). Dropset entries are not part of this
/// shape; per-exercise statistics only consider main sets.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSession {
    pub exercise: Exercise,
    pub workout_name: Name,
    pub date: NaiveDate,
    pub sets: Vec<Set>,
}

impl ExerciseSession {
    /// Average weight of the sets with a positive weight, unrounded.
    /// Used as context for the rest-time correlation views.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_weight(&self) -> Option<f32> {
        let weights = self
            .sets
            .iter()
            .filter_map(|s| s.weight.map(f32::from))
            .filter(|w| *w > 0.0)
            .collect::<Vec<_>>();
        if weights.is_empty() {
            None
        } else {
            Some(weights.iter().sum::<f32>() / weights.len() as f32)
        }
    }

    /// Rest times of the sets that recorded a positive rest time, in set
    /// iteration order.
    #[must_use]
    pub fn rest_times(&self) -> Vec<u32> {
        self.sets
            .iter()
            .filter_map(|s| s.rest_time.map(u32::from))
            .filter(|t| *t > 0)
            .collect()
    }

    /// Reps and weight of each set with absent values filled with zero.
    /// The explicit default-fill step that keeps statistics total over
    /// incomplete legacy rows.
    #[must_use]
    pub fn filled_sets(&self) -> Vec<(u32, f32)> {
        self.sets
            .iter()
            .map(|s| {
                (
                    s.reps.map_or(0, u32::from),
                    s.weight.map_or(0.0, f32::from),
                )
            })
            .collect()
    }
}
