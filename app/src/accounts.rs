//! User registration, login and bearer-token lookup.

use crate::credentials::{generate_token, hash_password, verify_password};
use crate::dto::{CredentialsDto, TokenDto, UserDto, UserPatchDto};
use crate::entities::{auth_tokens, prelude::*, users};
use crate::error::{BookingError, FieldErrors, Result};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
};
use tracing::{info, warn};

const MIN_PASSWORD_LEN: usize = 5;

pub fn user_to_dto(user: users::Model) -> UserDto {
    UserDto {
        id: user.id,
        email: user.email,
        is_staff: user.is_staff,
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid {
        errors.add("email", "Enter a valid email address.");
    }
}

fn check_password(errors: &mut FieldErrors, password: &str) {
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            "password",
            format!("Ensure this field has at least {MIN_PASSWORD_LEN} characters."),
        );
    }
}

async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<users::Model>> {
    Ok(Users::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await?)
}

/// Create a user. `is_staff` is only set by seeding, never by the public API.
pub async fn create_user<C: ConnectionTrait>(
    db: &C,
    form: CredentialsDto,
    is_staff: bool,
) -> Result<users::Model> {
    let email = normalize_email(&form.email);

    let mut errors = FieldErrors::new();
    check_email(&mut errors, &email);
    check_password(&mut errors, &form.password);
    errors.into_result()?;

    if find_by_email(db, &email).await?.is_some() {
        return Err(BookingError::Conflict(
            "user with this email already exists.".to_string(),
        ));
    }

    let user = users::ActiveModel {
        email: Set(email),
        password_hash: Set(hash_password(&form.password)?),
        is_staff: Set(is_staff),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(user_id = user.id, is_staff, "Created user");
    Ok(user)
}

pub async fn register_impl<C: ConnectionTrait>(db: &C, form: CredentialsDto) -> Result<UserDto> {
    create_user(db, form, false).await.map(user_to_dto)
}

/// Exchange credentials for a fresh bearer token.
pub async fn obtain_token_impl<C: ConnectionTrait>(
    db: &C,
    form: CredentialsDto,
) -> Result<TokenDto> {
    let email = normalize_email(&form.email);
    let user = find_by_email(db, &email)
        .await?
        .filter(|user| verify_password(&form.password, &user.password_hash));

    let Some(user) = user else {
        warn!("Rejected login attempt");
        return Err(BookingError::field(
            "non_field_errors",
            "Unable to log in with provided credentials.",
        ));
    };

    let token = auth_tokens::ActiveModel {
        token: Set(generate_token()),
        user_id: Set(user.id),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await?;

    Ok(TokenDto { token: token.token })
}

/// Resolve a bearer token to its user.
pub async fn authenticate<C: ConnectionTrait>(db: &C, token: &str) -> Result<users::Model> {
    AuthTokens::find_by_id(token.to_string())
        .find_also_related(Users)
        .one(db)
        .await?
        .and_then(|(_, user)| user)
        .ok_or_else(|| BookingError::Unauthorized("Invalid token.".to_string()))
}

pub async fn update_user_impl<C: ConnectionTrait>(
    db: &C,
    user: users::Model,
    form: UserPatchDto,
) -> Result<UserDto> {
    let email = form.email.as_deref().map(normalize_email);

    let mut errors = FieldErrors::new();
    if let Some(email) = &email {
        check_email(&mut errors, email);
    }
    if let Some(password) = &form.password {
        check_password(&mut errors, password);
    }
    errors.into_result()?;

    let user_id = user.id;
    let mut active: users::ActiveModel = user.into();
    if let Some(email) = email {
        active.email = Set(email);
    }
    if let Some(password) = form.password {
        active.password_hash = Set(hash_password(&password)?);
    }

    let updated = active.update(db).await?;
    info!(user_id, "Updated user");
    Ok(user_to_dto(updated))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::connect_and_migrate;
    use sea_orm::DatabaseConnection;

    async fn setup_test_db() -> DatabaseConnection {
        connect_and_migrate("sqlite::memory:").await.unwrap()
    }

    fn creds(email: &str, password: &str) -> CredentialsDto {
        CredentialsDto {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_login_authenticate() {
        let db = setup_test_db().await;

        let user = register_impl(&db, creds("Test@Example.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(user.email, "test@example.com");
        assert!(!user.is_staff);

        let token = obtain_token_impl(&db, creds("test@example.com", "secret1"))
            .await
            .unwrap();
        let resolved = authenticate(&db, &token.token).await.unwrap();
        assert_eq!(resolved.id, user.id);
    }

    #[tokio::test]
    async fn test_register_rejects_bad_input() {
        let db = setup_test_db().await;
        let err = register_impl(&db, creds("nope", "123")).await.unwrap_err();
        let BookingError::Validation(fields) = err else {
            unreachable!("expected validation error");
        };
        assert!(fields.get("email").is_some());
        assert!(fields.get("password").is_some());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let db = setup_test_db().await;
        register_impl(&db, creds("a@b.c", "secret1")).await.unwrap();
        let err = register_impl(&db, creds("A@B.C", "secret2")).await.unwrap_err();
        assert!(matches!(err, BookingError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let db = setup_test_db().await;
        register_impl(&db, creds("a@b.c", "secret1")).await.unwrap();
        let err = obtain_token_impl(&db, creds("a@b.c", "secret2"))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let db = setup_test_db().await;
        let err = authenticate(&db, "missing").await.unwrap_err();
        assert!(matches!(err, BookingError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_update_password() {
        let db = setup_test_db().await;
        let user = create_user(&db, creds("a@b.c", "secret1"), false)
            .await
            .unwrap();
        update_user_impl(
            &db,
            user,
            UserPatchDto {
                email: None,
                password: Some("newsecret".to_string()),
            },
        )
        .await
        .unwrap();

        assert!(obtain_token_impl(&db, creds("a@b.c", "secret1")).await.is_err());
        assert!(obtain_token_impl(&db, creds("a@b.c", "newsecret")).await.is_ok());
    }
}
