use async_graphql::{Context, ErrorExtensions, InputObject, Object, Result, SimpleObject};

use super::context::{authenticator, pool, require_auth};
use crate::auth::{TokenData, MIN_PASSWORD_LEN};
use crate::error::ApiError;
use crate::models::{NewUser, User, UserView};
use crate::repository;

#[derive(InputObject)]
pub struct SignupInput {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

#[derive(InputObject)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, SimpleObject)]
#[graphql(rename_fields = "snake_case")]
pub struct AuthPayload {
    pub token: String,
    pub refresh_token: String,
    pub user: UserView,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn session_for(ctx: &Context<'_>, user: User) -> Result<AuthPayload> {
    let identity =
        TokenData { id: user.id, is_admin: user.is_admin, email: user.email.clone(), name: user.name.clone() };
    let tokens = authenticator(ctx)?.issue_tokens(&identity).map_err(|err| {
        tracing::error!(error = %err, user_id = user.id, "failed to issue tokens");
        err.extend()
    })?;
    Ok(AuthPayload { token: tokens.token, refresh_token: tokens.refresh_token, user: user.into() })
}

#[derive(Default)]
pub struct AuthQuery;

#[Object(rename_fields = "snake_case")]
impl AuthQuery {
    /// The authenticated user, or null if the account no longer exists.
    async fn me(&self, ctx: &Context<'_>) -> Result<Option<UserView>> {
        let viewer = require_auth(ctx)?;
        match repository::find_by_id::<User>(pool(ctx)?, viewer.id).await {
            Ok(user) => Ok(user.map(UserView::from)),
            Err(error) => {
                tracing::warn!(%error, user_id = viewer.id, "failed to load current user");
                Ok(None)
            }
        }
    }
}

#[derive(Default)]
pub struct AuthMutation;

#[Object(rename_fields = "snake_case")]
impl AuthMutation {
    async fn signup(&self, ctx: &Context<'_>, input: SignupInput) -> Result<AuthPayload> {
        let email = normalize_email(&input.email);
        if email.is_empty() || input.password.is_empty() {
            return Err(ApiError::SignupIncomplete.extend());
        }
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::PasswordTooShort { min: MIN_PASSWORD_LEN }.extend());
        }
        let name = input.name.map(|name| name.trim().to_owned()).filter(|name| !name.is_empty());

        let password_hash = authenticator(ctx)?.hash_password(input.password).await.map_err(|err| {
            tracing::error!(error = %err, "password hashing failed");
            ApiError::SignupFailed.extend()
        })?;

        let user = repository::create_user(pool(ctx)?, NewUser { email, password_hash, name })
            .await
            .map_err(|err| match err {
                ApiError::EmailAlreadyExists => err.extend(),
                other => {
                    tracing::error!(error = %other, "error creating user");
                    ApiError::SignupFailed.extend()
                }
            })?;

        tracing::info!(user_id = user.id, "user signed up");
        session_for(ctx, user)
    }

    async fn login(&self, ctx: &Context<'_>, input: LoginInput) -> Result<AuthPayload> {
        let email = normalize_email(&input.email);
        if email.is_empty() || input.password.is_empty() {
            return Err(ApiError::LoginIncomplete.extend());
        }

        let user = repository::find_user_by_email(pool(ctx)?, &email)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "error finding user by email");
                ApiError::LoginFailed.extend()
            })?
            .ok_or_else(|| ApiError::InvalidCredentials.extend())?;

        let valid = authenticator(ctx)?
            .verify_password(input.password, user.password_hash.clone())
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "password verification failed");
                ApiError::LoginFailed.extend()
            })?;
        if !valid {
            return Err(ApiError::InvalidCredentials.extend());
        }

        session_for(ctx, user)
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_email;

    #[test]
    fn emails_are_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
        assert_eq!(normalize_email("   "), "");
    }
}
