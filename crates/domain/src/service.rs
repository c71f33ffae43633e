use chrono::{Days, Local, NaiveDate};
use log::{debug, error};

use crate::{
    CreateError, DeleteError, DropsetEntry, DropsetEntryID, Exercise, ExerciseDetail, ExerciseID,
    ExerciseRepository, ExerciseService, ExerciseStats, GlobalStats, Name, NewDropsetEntry, NewSet,
    ReadError, SessionRepository, SessionService, Set, SetID, SetRepository, SetService,
    StatisticsService, StorageError, UpdateError, User, UserID, Workout, WorkoutID,
    WorkoutRepository, WorkoutService, WorkoutWithExercises, statistics,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: SessionRepository> Service<R> {
    /// Owner of the current session, checked before any storage access.
    fn session_user_id(&self) -> Result<UserID, StorageError> {
        self.repository
            .current_user()
            .map(|user| user.id)
            .ok_or(StorageError::NoSession)
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: SessionRepository> SessionService for Service<R> {
    fn current_user(&self) -> Option<User> {
        self.repository.current_user()
    }

    async fn request_session(&self, user_id: UserID) -> Result<User, ReadError> {
        log_on_error!(
            self.repository.request_session(user_id),
            ReadError,
            "request",
            "session"
        )
    }

    async fn delete_session(&self) -> Result<(), DeleteError> {
        log_on_error!(
            self.repository.delete_session(),
            DeleteError,
            "delete",
            "session"
        )
    }
}

impl<R: WorkoutRepository + SessionRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        let user_id = self.session_user_id()?;
        log_on_error!(
            self.repository.read_workouts(user_id),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn get_workouts_between(
        &self,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<Workout>, ReadError> {
        let user_id = self.session_user_id()?;
        log_on_error!(
            self.repository.read_workouts_between(user_id, first, last),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn get_workout(&self, id: WorkoutID) -> Result<WorkoutWithExercises, ReadError> {
        let user_id = self.session_user_id()?;
        log_on_error!(
            self.repository.read_workout(user_id, id),
            ReadError,
            "get",
            "workout"
        )
    }

    async fn create_workout(
        &self,
        name: Name,
        date: NaiveDate,
        notes: String,
    ) -> Result<Workout, CreateError> {
        let user_id = self.session_user_id()?;
        log_on_error!(
            self.repository.create_workout(user_id, name, date, notes),
            CreateError,
            "create",
            "workout"
        )
    }

    async fn modify_workout(
        &self,
        id: WorkoutID,
        name: Option<Name>,
        notes: Option<String>,
    ) -> Result<Workout, UpdateError> {
        self.session_user_id()?;
        log_on_error!(
            self.repository.modify_workout(id, name, notes),
            UpdateError,
            "modify",
            "workout"
        )
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        self.session_user_id()?;
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }

    async fn duplicate_workout(
        &self,
        source: WorkoutID,
        date: NaiveDate,
        name: Option<Name>,
    ) -> Result<WorkoutID, CreateError> {
        let user_id = self.session_user_id()?;
        log_on_error!(
            self.repository.duplicate_workout(user_id, source, date, name),
            CreateError,
            "duplicate",
            "workout"
        )
    }
}

impl<R: ExerciseRepository + SessionRepository> ExerciseService for Service<R> {
    async fn create_exercise(
        &self,
        workout_id: WorkoutID,
        name: Name,
        position: u32,
        notes: String,
    ) -> Result<Exercise, CreateError> {
        self.session_user_id()?;
        log_on_error!(
            self.repository
                .create_exercise(workout_id, name, position, notes),
            CreateError,
            "create",
            "exercise"
        )
    }

    async fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError> {
        self.session_user_id()?;
        log_on_error!(
            self.repository.replace_exercise(exercise),
            UpdateError,
            "replace",
            "exercise"
        )
    }

    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError> {
        self.session_user_id()?;
        log_on_error!(
            self.repository.delete_exercise(id),
            DeleteError,
            "delete",
            "exercise"
        )
    }

    async fn reorder_exercises(
        &self,
        positions: Vec<(ExerciseID, u32)>,
    ) -> Result<(), UpdateError> {
        self.session_user_id()?;
        log_on_error!(
            self.repository.reorder_exercises(positions),
            UpdateError,
            "reorder",
            "exercises"
        )
    }
}

impl<R: SetRepository + SessionRepository> SetService for Service<R> {
    async fn create_set(&self, exercise_id: ExerciseID, set: NewSet) -> Result<Set, CreateError> {
        self.session_user_id()?;
        log_on_error!(
            self.repository.create_set(exercise_id, set),
            CreateError,
            "create",
            "set"
        )
    }

    async fn create_sets(
        &self,
        exercise_id: ExerciseID,
        sets: Vec<NewSet>,
    ) -> Result<Vec<Set>, CreateError> {
        self.session_user_id()?;
        log_on_error!(
            self.repository.create_sets(exercise_id, sets),
            CreateError,
            "create",
            "sets"
        )
    }

    async fn replace_set(&self, set: Set) -> Result<Set, UpdateError> {
        self.session_user_id()?;
        log_on_error!(self.repository.replace_set(set), UpdateError, "replace", "set")
    }

    async fn delete_set(&self, id: SetID) -> Result<SetID, DeleteError> {
        self.session_user_id()?;
        log_on_error!(self.repository.delete_set(id), DeleteError, "delete", "set")
    }

    async fn create_dropset_entries(
        &self,
        set_id: SetID,
        entries: Vec<NewDropsetEntry>,
    ) -> Result<Vec<DropsetEntry>, CreateError> {
        self.session_user_id()?;
        log_on_error!(
            self.repository.create_dropset_entries(set_id, entries),
            CreateError,
            "create",
            "dropset entries"
        )
    }

    async fn delete_dropset_entry(
        &self,
        id: DropsetEntryID,
    ) -> Result<DropsetEntryID, DeleteError> {
        self.session_user_id()?;
        log_on_error!(
            self.repository.delete_dropset_entry(id),
            DeleteError,
            "delete",
            "dropset entry"
        )
    }
}

impl<R: WorkoutRepository + SessionRepository> StatisticsService for Service<R> {
    async fn get_global_stats(&self, period_days: u32) -> Result<GlobalStats, ReadError> {
        let user_id = self.session_user_id()?;
        let start = Local::now().date_naive() - Days::new(u64::from(period_days));
        let workouts = log_on_error!(
            self.repository
                .read_workouts_with_exercises_since(user_id, start),
            ReadError,
            "get",
            "global statistics"
        )?;
        Ok(statistics::global_stats(&workouts, period_days))
    }

    async fn get_exercises_list(&self) -> Result<Vec<ExerciseStats>, ReadError> {
        let user_id = self.session_user_id()?;
        let sessions = log_on_error!(
            self.repository.read_exercise_sessions(user_id, None),
            ReadError,
            "get",
            "exercise statistics"
        )?;
        Ok(statistics::exercise_stats(&sessions))
    }

    async fn get_exercise_detail(&self, pattern: &str) -> Result<ExerciseDetail, ReadError> {
        let user_id = self.session_user_id()?;
        let sessions = log_on_error!(
            self.repository.read_exercise_sessions(user_id, Some(pattern)),
            ReadError,
            "get",
            "exercise detail"
        )?;
        statistics::exercise_detail(&sessions).ok_or(ReadError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{ExerciseSession, WorkoutSessions};

    use super::*;

    struct FakeRepository {
        user: Option<User>,
        sessions: Vec<ExerciseSession>,
    }

    impl SessionRepository for FakeRepository {
        fn current_user(&self) -> Option<User> {
            self.user.clone()
        }

        async fn request_session(&self, _: UserID) -> Result<User, ReadError> {
            self.user.clone().ok_or(ReadError::NotFound)
        }

        async fn delete_session(&self) -> Result<(), DeleteError> {
            Ok(())
        }
    }

    impl WorkoutRepository for FakeRepository {
        async fn read_workouts(&self, _: UserID) -> Result<Vec<Workout>, ReadError> {
            Ok(vec![])
        }

        async fn read_workouts_between(
            &self,
            _: UserID,
            _: NaiveDate,
            _: NaiveDate,
        ) -> Result<Vec<Workout>, ReadError> {
            Ok(vec![])
        }

        async fn read_workout(
            &self,
            _: UserID,
            _: WorkoutID,
        ) -> Result<WorkoutWithExercises, ReadError> {
            Err(ReadError::NotFound)
        }

        async fn read_workouts_with_exercises_since(
            &self,
            _: UserID,
            _: NaiveDate,
        ) -> Result<Vec<WorkoutSessions>, ReadError> {
            Ok(vec![])
        }

        async fn read_exercise_sessions(
            &self,
            _: UserID,
            _: Option<&str>,
        ) -> Result<Vec<ExerciseSession>, ReadError> {
            Ok(self.sessions.clone())
        }

        async fn create_workout(
            &self,
            _: UserID,
            _: Name,
            _: NaiveDate,
            _: String,
        ) -> Result<Workout, CreateError> {
            unimplemented!()
        }

        async fn modify_workout(
            &self,
            _: WorkoutID,
            _: Option<Name>,
            _: Option<String>,
        ) -> Result<Workout, UpdateError> {
            unimplemented!()
        }

        async fn delete_workout(&self, _: WorkoutID) -> Result<WorkoutID, DeleteError> {
            unimplemented!()
        }

        async fn duplicate_workout(
            &self,
            _: UserID,
            _: WorkoutID,
            _: NaiveDate,
            _: Option<Name>,
        ) -> Result<WorkoutID, CreateError> {
            unimplemented!()
        }
    }

    fn unauthenticated() -> Service<FakeRepository> {
        Service::new(FakeRepository {
            user: None,
            sessions: vec![],
        })
    }

    fn authenticated() -> Service<FakeRepository> {
        Service::new(FakeRepository {
            user: Some(User {
                id: 1.into(),
                name: Name::new("Alice").unwrap(),
            }),
            sessions: vec![],
        })
    }

    #[tokio::test]
    async fn test_statistics_require_session() {
        let service = unauthenticated();
        assert!(matches!(
            service.get_global_stats(30).await,
            Err(ReadError::Storage(StorageError::NoSession))
        ));
        assert!(matches!(
            service.get_exercises_list().await,
            Err(ReadError::Storage(StorageError::NoSession))
        ));
        assert!(matches!(
            service.get_exercise_detail("Squat").await,
            Err(ReadError::Storage(StorageError::NoSession))
        ));
    }

    #[tokio::test]
    async fn test_workouts_require_session() {
        let service = unauthenticated();
        assert!(matches!(
            service.get_workouts().await,
            Err(ReadError::Storage(StorageError::NoSession))
        ));
        assert!(matches!(
            service
                .duplicate_workout(WorkoutID::nil(), NaiveDate::MAX, None)
                .await,
            Err(CreateError::Storage(StorageError::NoSession))
        ));
    }

    #[tokio::test]
    async fn test_get_global_stats_empty_history() {
        let stats = authenticated().get_global_stats(30).await.unwrap();
        assert_eq!(stats.total_workouts, 0);
        assert_eq!(stats.average_workouts_per_week, 0.0);
        assert_eq!(stats.period_days, 30);
    }

    #[tokio::test]
    async fn test_get_exercise_detail_not_found() {
        assert!(matches!(
            authenticated().get_exercise_detail("Squat").await,
            Err(ReadError::NotFound)
        ));
    }
}
