use cinema_auth_types::token::{JwtSigner, TokenError, TokenSigner};
use cinema_catalog::domain::repository::{Storage, UserRepository};
use cinema_catalog::error::CatalogServiceError;
use cinema_catalog::infra::memory::MemoryStorage;
use cinema_catalog::usecase::auth::{AuthenticateUseCase, CreateUserUseCase};
use cinema_domain::role::Role;

const SECRET: &str = "integration-secret";

async fn seed_user(storage: &MemoryStorage, email: &str, password: &str, role: Role) {
    CreateUserUseCase {
        users: storage.users(),
    }
    .execute(email, password, role)
    .await
    .unwrap();
}

#[tokio::test]
async fn should_grant_admin_token_both_roles() {
    let storage = MemoryStorage::new();
    seed_user(&storage, "root@cinema.test", "s3cret", Role::Admin).await;
    let signer = JwtSigner::new(SECRET, 3600);

    let token = AuthenticateUseCase {
        users: storage.users(),
        tokens: signer.clone(),
    }
    .execute("root@cinema.test", "s3cret")
    .await
    .unwrap();

    assert_eq!(signer.validate(&token, Role::User).unwrap().role, Role::Admin);
    assert_eq!(
        signer.validate(&token, Role::Admin).unwrap().email,
        "root@cinema.test"
    );
}

#[tokio::test]
async fn should_deny_admin_access_to_user_token() {
    let storage = MemoryStorage::new();
    seed_user(&storage, "viewer@cinema.test", "pw", Role::User).await;
    let signer = JwtSigner::new(SECRET, 3600);

    let token = AuthenticateUseCase {
        users: storage.users(),
        tokens: signer.clone(),
    }
    .execute("viewer@cinema.test", "pw")
    .await
    .unwrap();

    assert!(signer.validate(&token, Role::User).is_ok());
    assert!(matches!(
        signer.validate(&token, Role::Admin),
        Err(TokenError::PermissionDenied)
    ));
}

#[tokio::test]
async fn should_reject_bad_credentials() {
    let storage = MemoryStorage::new();
    seed_user(&storage, "viewer@cinema.test", "pw", Role::User).await;
    let uc = AuthenticateUseCase {
        users: storage.users(),
        tokens: JwtSigner::new(SECRET, 3600),
    };

    assert!(matches!(
        uc.execute("viewer@cinema.test", "wrong").await,
        Err(CatalogServiceError::InvalidCredentials)
    ));
    assert!(matches!(
        uc.execute("nobody@cinema.test", "pw").await,
        Err(CatalogServiceError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn should_not_store_plain_password() {
    let storage = MemoryStorage::new();
    seed_user(&storage, "viewer@cinema.test", "pw", Role::User).await;

    let user = storage
        .users()
        .find_by_email("viewer@cinema.test")
        .await
        .unwrap()
        .unwrap();
    assert_ne!(user.password_hash, "pw");
    assert_eq!(user.role, Role::User);
}

#[tokio::test]
async fn should_refuse_duplicate_email() {
    let storage = MemoryStorage::new();
    seed_user(&storage, "viewer@cinema.test", "pw", Role::User).await;

    let result = CreateUserUseCase {
        users: storage.users(),
    }
    .execute("viewer@cinema.test", "other", Role::Admin)
    .await;
    assert!(result.is_err());
}
