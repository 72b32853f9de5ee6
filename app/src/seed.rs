use crate::accounts::create_user;
use crate::config::AdminSeed;
use crate::credentials::hash_password;
use crate::dto::CredentialsDto;
use crate::entities::{prelude::*, users};
use crate::error::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};
use tracing::info;

/// Create the configured administrator, or promote and re-key an existing
/// account with the same email. Returns the admin's user id.
pub async fn seed_admin<C: ConnectionTrait>(db: &C, seed: &AdminSeed) -> Result<i32> {
    let email = seed.email.trim().to_lowercase();

    let existing_user = Users::find()
        .filter(users::Column::Email.eq(&email))
        .one(db)
        .await?;

    if let Some(existing) = existing_user {
        info!("Found existing user with email: {}", email);

        let mut user_active: users::ActiveModel = existing.into_active_model();
        user_active.is_staff = Set(true);
        user_active.password_hash = Set(hash_password(&seed.password)?);

        let updated_user = user_active.update(db).await?;
        info!("Promoted user {} to administrator", updated_user.id);
        return Ok(updated_user.id);
    }

    let user = create_user(
        db,
        CredentialsDto {
            email,
            password: seed.password.clone(),
        },
        true,
    )
    .await?;
    info!("Created administrator with ID: {}", user.id);
    Ok(user.id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::accounts::{obtain_token_impl, register_impl};
    use crate::db::connect_and_migrate;

    fn seed(password: &str) -> AdminSeed {
        AdminSeed {
            email: "Admin@Airport.test".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_seed_creates_admin() {
        let db = connect_and_migrate("sqlite::memory:").await.unwrap();
        let id = seed_admin(&db, &seed("adminpass")).await.unwrap();

        let user = Users::find_by_id(id).one(&db).await.unwrap().unwrap();
        assert!(user.is_staff);
        assert_eq!(user.email, "admin@airport.test");
    }

    #[tokio::test]
    async fn test_seed_is_idempotent_and_promotes() {
        let db = connect_and_migrate("sqlite::memory:").await.unwrap();
        let registered = register_impl(
            &db,
            CredentialsDto {
                email: "admin@airport.test".to_string(),
                password: "oldpass".to_string(),
            },
        )
        .await
        .unwrap();
        assert!(!registered.is_staff);

        let first = seed_admin(&db, &seed("adminpass")).await.unwrap();
        let second = seed_admin(&db, &seed("adminpass")).await.unwrap();
        assert_eq!(first, registered.id);
        assert_eq!(second, registered.id);
        assert_eq!(Users::find().all(&db).await.unwrap().len(), 1);

        let login = obtain_token_impl(
            &db,
            CredentialsDto {
                email: "admin@airport.test".to_string(),
                password: "adminpass".to_string(),
            },
        )
        .await;
        assert!(login.is_ok());
    }
}
