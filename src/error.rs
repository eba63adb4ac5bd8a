//! API-level errors and their GraphQL representation.
//!
//! Every variant carries a stable numeric `error_code` (1xxxx common, 2xxxx auth, 4xxxx account),
//! an HTTP-like status and a GraphQL `code` extension. Resolvers convert with
//! [`ErrorExtensions::extend`] so that clients see both codes.

use async_graphql::ErrorExtensions;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A read against the row store failed.
    #[error("Failed to fetch {entity}")]
    Fetch {
        entity: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("Database operation failed")]
    Database(#[from] sqlx::Error),

    #[error("Email and password are required")]
    SignupIncomplete,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("An account with this email already exists")]
    EmailAlreadyExists,

    #[error("Signup failed")]
    SignupFailed,

    #[error("Email and password are required")]
    LoginIncomplete,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Login failed")]
    LoginFailed,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid authentication token")]
    InvalidAuthToken,

    #[error("Authentication token has expired")]
    TokenExpired,

    #[error("Internal server error")]
    Internal(#[source] BoxError),
}

impl ApiError {
    /// Wraps a store failure, logging the underlying cause.
    pub fn fetch<E>(entity: &'static str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        tracing::error!(error = %source, entity, "error fetching from store");
        ApiError::Fetch { entity, source: Box::new(source) }
    }

    pub fn internal<E>(source: E) -> Self
    where
        E: Into<BoxError>,
    {
        ApiError::Internal(source.into())
    }

    /// Value of the GraphQL `code` extension.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::SignupIncomplete
            | ApiError::PasswordTooShort { .. }
            | ApiError::EmailAlreadyExists => "BAD_USER_INPUT",
            ApiError::LoginIncomplete
            | ApiError::InvalidCredentials
            | ApiError::Unauthorized
            | ApiError::InvalidAuthToken
            | ApiError::TokenExpired => "UNAUTHORIZED",
            ApiError::Fetch { .. }
            | ApiError::Database(_)
            | ApiError::SignupFailed
            | ApiError::LoginFailed
            | ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn error_code(&self) -> u32 {
        match self {
            ApiError::Fetch { .. } | ApiError::Database(_) => 10001,
            ApiError::SignupIncomplete => 10002,
            ApiError::Internal(_) | ApiError::SignupFailed | ApiError::LoginFailed => 10005,
            ApiError::InvalidAuthToken => 20002,
            ApiError::TokenExpired => 20003,
            ApiError::LoginIncomplete | ApiError::Unauthorized => 20005,
            ApiError::PasswordTooShort { .. } => 20012,
            ApiError::EmailAlreadyExists => 40001,
            ApiError::InvalidCredentials => 40004,
        }
    }

    pub fn status(&self) -> u16 {
        match self.code() {
            "BAD_USER_INPUT" => 400,
            "UNAUTHORIZED" => 401,
            _ => 500,
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, ext| {
            ext.set("code", self.code());
            ext.set("errorCode", self.error_code());
            ext.set("statusCode", self.status());
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_failures_hide_the_cause() {
        let err = ApiError::fetch("party", sqlx::Error::PoolTimedOut);
        assert_eq!(err.to_string(), "Failed to fetch party");
        assert_eq!(err.code(), "INTERNAL_SERVER_ERROR");
        assert_eq!(err.status(), 500);
    }

    #[test]
    fn extensions_carry_both_codes() {
        let gql = ApiError::PasswordTooShort { min: 8 }.extend();
        assert_eq!(gql.message, "Password must be at least 8 characters");

        let ext = serde_json::to_value(gql.extensions.expect("extensions")).expect("serialize");
        assert_eq!(ext["code"], "BAD_USER_INPUT");
        assert_eq!(ext["errorCode"], 20012);
        assert_eq!(ext["statusCode"], 400);
    }
}
