#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod exercise;
pub mod name;
pub mod service;
pub mod session;
pub mod set;
pub mod statistics;
pub mod user;
pub mod workout;

pub use error::{CreateError, DeleteError, ReadError, StorageError, UpdateError};
pub use exercise::{
    Exercise, ExerciseID, ExerciseRepository, ExerciseService, ExerciseSession, ExerciseWithSets,
};
pub use name::{Name, NameError};
pub use service::Service;
pub use session::{SessionRepository, SessionService};
pub use set::{
    DropsetEntry, DropsetEntryID, NewDropsetEntry, NewSet, Reps, RepsError, RestTime,
    RestTimeError, Set, SetID, SetRepository, SetService, SetWithDropsets, Weight, WeightError,
};
pub use statistics::{
    BestPerformance, ExerciseDetail, ExerciseStats, GlobalStats, LastSession, LastSessionSet,
    MostWorkedExercise, ProgressPoint, RestTimeBucket, RestTimePoint, StatisticsService,
    estimate_one_rep_max,
};
pub use user::{User, UserID};
pub use workout::{
    Workout, WorkoutID, WorkoutRepository, WorkoutService, WorkoutSessions, WorkoutWithExercises,
};
