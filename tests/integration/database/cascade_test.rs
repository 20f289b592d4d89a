//! Account/profile consistency at the storage level

use pretty_assertions::assert_eq;

use crate::common::{row_counts, TestDatabase};
use userauths::backend::auth::accounts::{create_account, update_account, AccountUpdate, NewAccount};
use userauths::backend::auth::profiles::get_profile_by_user_id;
use userauths::backend::auth::users::delete_user;

fn account(email: &str) -> NewAccount {
    NewAccount {
        email: email.to_string(),
        password_hash: "not-a-real-hash".to_string(),
        first_name: "Cas".to_string(),
        last_name: "Cade".to_string(),
        username: None,
    }
}

#[tokio::test]
async fn test_deleting_account_removes_profile() {
    let db = TestDatabase::new().await;
    let (user, _) = create_account(db.pool(), account("gone@example.com")).await.unwrap();
    let (keep, _) = create_account(db.pool(), account("kept@example.com")).await.unwrap();

    assert!(delete_user(db.pool(), user.id).await.unwrap());

    assert!(get_profile_by_user_id(db.pool(), user.id).await.unwrap().is_none());
    assert!(get_profile_by_user_id(db.pool(), keep.id).await.unwrap().is_some());
    assert_eq!(row_counts(db.pool()).await, (1, 1));
}

#[tokio::test]
async fn test_profile_name_tracks_account_across_writes() {
    let db = TestDatabase::new().await;
    let (user, profile) = create_account(db.pool(), account("track@example.com")).await.unwrap();
    assert_eq!(profile.full_name, user.full_name);

    for (first, last) in [("Ana", "Lyst"), ("", "Solo"), ("", "")] {
        let (user, profile) = update_account(
            db.pool(),
            user.id,
            AccountUpdate {
                first_name: Some(first.to_string()),
                last_name: Some(last.to_string()),
                about: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(profile.full_name, user.full_name);
    }

    let profile = get_profile_by_user_id(db.pool(), user.id).await.unwrap().unwrap();
    assert_eq!(profile.full_name, "track");
}

#[tokio::test]
async fn test_full_names_need_not_be_unique() {
    let db = TestDatabase::new().await;
    let (a, _) = create_account(db.pool(), account("one@example.com")).await.unwrap();
    let (b, _) = create_account(db.pool(), account("two@example.com")).await.unwrap();

    assert_eq!(a.full_name, b.full_name);
    assert_eq!(row_counts(db.pool()).await, (2, 2));
}
