//! Account registration and login.

use chrono::Utc;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::TokenService;
use crate::error::AppError;
use crate::storage::{commit, AccountsStore, Database, ProfileRecord, UserRecord};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Register a new account and its default profile as one atomic unit.
pub fn register(
    db: &mut Database,
    email: &str,
    password: &str,
    display_name: Option<&str>,
) -> Result<UserRecord, AppError> {
    if email.trim().is_empty() {
        return Err(AppError::Validation("email must not be empty".to_string()));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let password_hash = hash_password(password).map_err(|e| AppError::Internal(e.to_string()))?;

    let tx = db.transaction()?;
    let store = AccountsStore::new(&tx);

    if store.get_user_by_email(email)?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let now = Utc::now();
    let user = UserRecord {
        id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        password_hash,
        display_name: display_name.map(str::to_string),
        created_at: now,
    };
    store.insert_user(&user)?;

    store.insert_profile(&ProfileRecord {
        user_id: user.id.clone(),
        display_name: user.display_name.clone(),
        bio: Some(String::new()),
        pace: Some("casual".to_string()),
        bike_type: Some("road".to_string()),
        looking_for: Some("friends".to_string()),
        home_base: Some(String::new()),
        updated_at: now,
    })?;

    commit(tx)?;
    tracing::info!("registered new account {}", user.id);

    Ok(user)
}

/// Validate credentials and issue an access token.
///
/// Unknown email and wrong password fail identically so callers cannot
/// enumerate accounts.
pub fn login(
    db: &mut Database,
    tokens: &TokenService,
    email: &str,
    password: &str,
) -> Result<String, AppError> {
    let tx = db.transaction()?;
    let user = AccountsStore::new(&tx).get_user_by_email(email)?;
    commit(tx)?;

    let user = user.ok_or_else(invalid_credentials)?;
    if !verify_password(password, &user.password_hash) {
        return Err(invalid_credentials());
    }

    tokens
        .issue(&user.id)
        .map_err(|e| AppError::Internal(e.to_string()))
}

fn invalid_credentials() -> AppError {
    AppError::Unauthenticated("Invalid credentials".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::AccountsStore;

    fn test_db() -> Database {
        Database::open_in_memory().expect("Failed to create database")
    }

    fn tokens() -> TokenService {
        TokenService::new("test-secret", 60)
    }

    #[test]
    fn test_register_creates_user_and_default_profile() {
        let mut db = test_db();
        let user = register(&mut db, "rider@example.com", "password1", Some("Rider"))
            .expect("Failed to register");

        let store = AccountsStore::new(db.connection());
        let profile = store
            .get_profile(&user.id)
            .expect("Failed to get profile")
            .expect("Profile not found");
        assert_eq!(profile.bio.as_deref(), Some(""));
        assert_eq!(profile.pace.as_deref(), Some("casual"));
        assert_eq!(profile.bike_type.as_deref(), Some("road"));
        assert_eq!(profile.looking_for.as_deref(), Some("friends"));
        assert_eq!(profile.home_base.as_deref(), Some(""));
        assert_eq!(profile.display_name.as_deref(), Some("Rider"));
    }

    #[test]
    fn test_register_duplicate_email_is_conflict_with_no_profile_row() {
        let mut db = test_db();
        register(&mut db, "rider@example.com", "password1", None).expect("Failed to register");

        let result = register(&mut db, "rider@example.com", "password2", None);
        assert!(matches!(result, Err(AppError::Conflict(_))));

        let profiles: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM profiles", [], |row| row.get(0))
            .unwrap();
        assert_eq!(profiles, 1);
    }

    #[test]
    fn test_register_rejects_short_password() {
        let mut db = test_db();
        let result = register(&mut db, "rider@example.com", "short", None);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_register_rejects_empty_email() {
        let mut db = test_db();
        let result = register(&mut db, "  ", "password1", None);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_login_token_decodes_to_subject() {
        let mut db = test_db();
        let tokens = tokens();
        let user = register(&mut db, "rider@example.com", "password1", None)
            .expect("Failed to register");

        let token =
            login(&mut db, &tokens, "rider@example.com", "password1").expect("Failed to login");
        let claims = tokens.decode(&token).expect("Failed to decode token");
        assert_eq!(claims.sub, user.id);
    }

    #[test]
    fn test_login_failure_modes_are_indistinguishable() {
        let mut db = test_db();
        let tokens = tokens();
        register(&mut db, "rider@example.com", "password1", None).expect("Failed to register");

        let wrong_password = login(&mut db, &tokens, "rider@example.com", "password2");
        let unknown_email = login(&mut db, &tokens, "nobody@example.com", "password1");

        let a = match wrong_password {
            Err(AppError::Unauthenticated(msg)) => msg,
            other => panic!("unexpected result: {other:?}"),
        };
        let b = match unknown_email {
            Err(AppError::Unauthenticated(msg)) => msg,
            other => panic!("unexpected result: {other:?}"),
        };
        assert_eq!(a, b);
    }
}
