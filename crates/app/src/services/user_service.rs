//! User service: registering and looking up guests and hosts.

use hearth_domain::error::{HearthError, NotFoundError};
use hearth_domain::id::UserId;
use hearth_domain::user::User;

use crate::ports::UserRepository;

pub struct UserService<R> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a user after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    pub async fn create_user(&self, user: User) -> Result<User, HearthError> {
        user.validate()?;
        let user = self.repo.create(user).await?;
        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Look up a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::NotFound`] when no user with `id` exists.
    pub async fn get_user(&self, id: UserId) -> Result<User, HearthError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "User",
                id: id.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::InMemoryUserRepo;
    use hearth_domain::error::ValidationError;

    #[tokio::test]
    async fn should_create_and_fetch_user() {
        let svc = UserService::new(InMemoryUserRepo::default());
        let user = User::new("Grace", "grace@example.com").unwrap();
        let id = user.id;

        svc.create_user(user).await.unwrap();

        let fetched = svc.get_user(id).await.unwrap();
        assert_eq!(fetched.email, "grace@example.com");
    }

    #[tokio::test]
    async fn should_reject_user_with_invalid_email() {
        let svc = UserService::new(InMemoryUserRepo::default());
        let mut user = User::new("Grace", "grace@example.com").unwrap();
        user.email = "nope".to_string();

        let result = svc.create_user(user).await;
        assert!(matches!(
            result,
            Err(HearthError::Validation(ValidationError::InvalidEmail))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_user_missing() {
        let svc = UserService::new(InMemoryUserRepo::default());
        let result = svc.get_user(UserId::new()).await;
        assert!(matches!(result, Err(HearthError::NotFound(_))));
    }
}
