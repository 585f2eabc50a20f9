//! End-to-end sign-in against the local provider and an on-disk store.

use siwa_auth_methods::development::LocalProfile;
use siwa_auth_methods::{LocalIdentityProvider, SignInConfig, SignInService};
use siwa_crypto::sha256_hex;
use siwa_identity_core::{CredentialUpsertService, IdentityCore, UpsertOutcome};
use siwa_storage::RocksDbStorage;
use std::sync::Arc;

fn profile(user: &str) -> LocalProfile {
    LocalProfile {
        user: user.to_string(),
        given_name: Some("Alice".to_string()),
        family_name: Some("Smith".to_string()),
        email: "alice@example.com".to_string(),
        hide_email: true,
    }
}

#[tokio::test]
async fn test_sign_in_flow_with_rocksdb() {
    let temp_dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(RocksDbStorage::open(temp_dir.path()).unwrap());
    let core = Arc::new(CredentialUpsertService::new(storage));
    let provider = Arc::new(LocalIdentityProvider::new(
        profile("001234.flow.0001"),
        "com.example.app",
    ));
    let service = SignInService::new(Arc::clone(&provider), Arc::clone(&core), SignInConfig::default());

    // First sign-in: provider shares name and email, record is created
    let first = service.sign_in().await.unwrap();
    assert_eq!(first.upsert, UpsertOutcome::Created);

    let claims = first.claims.as_ref().unwrap();
    assert_eq!(claims.nonce.as_deref(), Some(sha256_hex(&first.payload.raw_nonce).as_str()));
    assert_eq!(claims.sub.as_deref(), Some("001234.flow.0001"));

    let record = core.get_user("001234.flow.0001").await.unwrap();
    assert_eq!(record.display_name, "Alice Smith");
    assert_eq!(record.email_relay, provider.token_email());
    assert!(record.email_relay.ends_with("@privaterelay.appleid.com"));

    // Second sign-in: no name shared, record untouched
    let second = service.sign_in().await.unwrap();
    assert_eq!(second.upsert, UpsertOutcome::AlreadyExists);
    assert!(second.payload.full_name.is_none());
    assert_ne!(first.payload.raw_nonce, second.payload.raw_nonce);

    let users = core.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].display_name, "Alice Smith");
}

#[tokio::test]
async fn test_concurrent_first_sign_ins_store_one_record() {
    let temp_dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(RocksDbStorage::open(temp_dir.path()).unwrap());
    let core = Arc::new(CredentialUpsertService::new(storage));
    let provider = Arc::new(LocalIdentityProvider::new(
        profile("001234.race.0001"),
        "com.example.app",
    ));
    let service = Arc::new(SignInService::new(provider, Arc::clone(&core), SignInConfig::default()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.sign_in().await })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap().upsert == UpsertOutcome::Created {
            created += 1;
        }
    }

    assert_eq!(created, 1);
    assert_eq!(core.list_users().await.unwrap().len(), 1);
}
