use crate::{DeleteError, ReadError, User, UserID};

/// Access to the current user context. `current_user` is synchronous by
/// design: every engine operation checks it before contacting storage and
/// must be able to fail fast without I/O.
#[allow(async_fn_in_trait)]
pub trait SessionRepository {
    fn current_user(&self) -> Option<User>;
    async fn request_session(&self, user_id: UserID) -> Result<User, ReadError>;
    async fn delete_session(&self) -> Result<(), DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait SessionService {
    fn current_user(&self) -> Option<User>;
    async fn request_session(&self, user_id: UserID) -> Result<User, ReadError>;
    async fn delete_session(&self) -> Result<(), DeleteError>;
}
