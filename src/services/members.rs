//! Member management by librarians

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{parse_record_id, AddMemberRequest, NewUser, Role, UpdateMemberRequest, User},
    repository::Repository,
};

use super::auth::hash_password;

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a user with the member role
    pub async fn add_member(&self, request: AddMemberRequest) -> AppResult<User> {
        request.validate()?;

        if self
            .repository
            .users
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let user = self
            .repository
            .users
            .insert(NewUser {
                username: request.username,
                password: hash_password(&request.password).await?,
                role: Role::Member,
            })
            .await?;

        tracing::info!(id = %user.id, "Member added");
        Ok(user)
    }

    /// Overwrite a user's username and secret by record id
    pub async fn update_member(&self, request: UpdateMemberRequest) -> AppResult<()> {
        request.validate()?;
        let id = parse_record_id(&request.record_id, "Member")?;
        let password = hash_password(&request.password).await?;

        if !self
            .repository
            .users
            .update_credentials(id, &request.username, &password)
            .await?
        {
            return Err(AppError::NotFound("Member not found".to_string()));
        }

        tracing::info!(id = %id, "Member updated");
        Ok(())
    }

    pub async fn delete_member(&self, record_id: &str) -> AppResult<()> {
        let id = parse_record_id(record_id, "Member")?;

        if !self.repository.users.delete(id).await? {
            return Err(AppError::NotFound("Member not found".to_string()));
        }

        tracing::info!(id = %id, "Member deleted");
        Ok(())
    }

    /// Every user record, librarians included
    pub async fn list_members(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    /// Current record of the named user
    pub async fn get_member(&self, username: &str) -> AppResult<User> {
        self.repository
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(username: &str) -> AddMemberRequest {
        AddMemberRequest {
            username: username.to_string(),
            password: "pw".to_string(),
        }
    }

    #[tokio::test]
    async fn test_added_users_are_members() {
        let members = MembersService::new(Repository::in_memory());
        let user = members.add_member(add("carol")).await.unwrap();
        assert_eq!(user.role, Role::Member);

        assert!(matches!(
            members.add_member(add("carol")).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let members = MembersService::new(Repository::in_memory());
        let user = members.add_member(add("carol")).await.unwrap();

        members
            .update_member(UpdateMemberRequest {
                username: "caroline".to_string(),
                password: "new".to_string(),
                record_id: user.id.to_string(),
            })
            .await
            .unwrap();

        let renamed = members.get_member("caroline").await.unwrap();
        assert_eq!(renamed.id, user.id);
        assert!(matches!(members.get_member("carol").await, Err(AppError::NotFound(_))));

        members.delete_member(&user.id.to_string()).await.unwrap();
        assert!(members.list_members().await.unwrap().is_empty());
        assert!(matches!(
            members.delete_member(&user.id.to_string()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_record_ids_are_not_found() {
        let members = MembersService::new(Repository::in_memory());

        let result = members
            .update_member(UpdateMemberRequest {
                username: "x".to_string(),
                password: "y".to_string(),
                record_id: uuid::Uuid::new_v4().to_string(),
            })
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        assert!(matches!(
            members.delete_member("not-an-id").await,
            Err(AppError::NotFound(_))
        ));
    }
}
