//! Rider profile reads and partial updates.

use chrono::Utc;

use crate::error::AppError;
use crate::storage::{commit, AccountsStore, Database, ProfileChanges, ProfileRecord, UserRecord};

/// Get a profile by user id. Any authenticated caller may view any profile.
pub fn get_profile(db: &mut Database, user_id: &str) -> Result<ProfileRecord, AppError> {
    let tx = db.transaction()?;
    let profile = AccountsStore::new(&tx)
        .get_profile(user_id)?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
    commit(tx)?;
    Ok(profile)
}

/// Apply a partial update to the caller's profile, creating the row with
/// exactly the supplied fields when missing. A supplied `display_name` is
/// mirrored onto the users row in the same transaction.
pub fn update_my_profile(
    db: &mut Database,
    user: &UserRecord,
    changes: &ProfileChanges,
) -> Result<ProfileRecord, AppError> {
    let now = Utc::now();
    let tx = db.transaction()?;
    let store = AccountsStore::new(&tx);

    if store.get_profile(&user.id)?.is_some() {
        store.update_profile_fields(&user.id, changes, now)?;
    } else {
        store.insert_profile(&ProfileRecord {
            user_id: user.id.clone(),
            display_name: changes.display_name.clone(),
            bio: changes.bio.clone(),
            pace: changes.pace.clone(),
            bike_type: changes.bike_type.clone(),
            looking_for: changes.looking_for.clone(),
            home_base: changes.home_base.clone(),
            updated_at: now,
        })?;
    }

    if let Some(display_name) = &changes.display_name {
        store.set_user_display_name(&user.id, display_name)?;
    }

    let profile = store
        .get_profile(&user.id)?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
    commit(tx)?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::accounts;

    fn setup() -> (Database, UserRecord) {
        let mut db = Database::open_in_memory().expect("Failed to create database");
        let user = accounts::register(&mut db, "rider@example.com", "password1", Some("Rider"))
            .expect("Failed to register");
        (db, user)
    }

    #[test]
    fn test_get_profile_missing_is_not_found() {
        let (mut db, _) = setup();
        assert!(matches!(
            get_profile(&mut db, "no-such-user"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_partial_update_leaves_other_fields_alone() {
        let (mut db, user) = setup();

        let updated = update_my_profile(
            &mut db,
            &user,
            &ProfileChanges {
                bio: Some("Alpine passes by preference".to_string()),
                ..Default::default()
            },
        )
        .expect("Failed to update profile");

        assert_eq!(updated.bio.as_deref(), Some("Alpine passes by preference"));
        assert_eq!(updated.pace.as_deref(), Some("casual"));
        assert_eq!(updated.bike_type.as_deref(), Some("road"));
        assert_eq!(updated.looking_for.as_deref(), Some("friends"));
        assert_eq!(updated.display_name.as_deref(), Some("Rider"));

        // display_name was not supplied, so the users row keeps its value.
        let stored = AccountsStore::new(db.connection())
            .get_user(&user.id)
            .unwrap()
            .unwrap();
        assert_eq!(stored.display_name.as_deref(), Some("Rider"));
    }

    #[test]
    fn test_supplied_display_name_is_mirrored_to_user_row() {
        let (mut db, user) = setup();

        update_my_profile(
            &mut db,
            &user,
            &ProfileChanges {
                display_name: Some("Col Hunter".to_string()),
                ..Default::default()
            },
        )
        .expect("Failed to update profile");

        let stored = AccountsStore::new(db.connection())
            .get_user(&user.id)
            .unwrap()
            .unwrap();
        assert_eq!(stored.display_name.as_deref(), Some("Col Hunter"));
    }

    #[test]
    fn test_update_creates_missing_row_with_exactly_supplied_fields() {
        let (mut db, user) = setup();
        db.connection()
            .execute("DELETE FROM profiles WHERE user_id = ?1", [&user.id])
            .expect("Failed to delete profile");

        let profile = update_my_profile(
            &mut db,
            &user,
            &ProfileChanges {
                pace: Some("fast".to_string()),
                ..Default::default()
            },
        )
        .expect("Failed to update profile");

        assert_eq!(profile.pace.as_deref(), Some("fast"));
        assert_eq!(profile.bio, None);
        assert_eq!(profile.bike_type, None);
        assert_eq!(profile.home_base, None);
    }
}
