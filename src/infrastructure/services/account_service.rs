//! Account service - signup, deletion and session lifecycle
//!
//! Coordinates the identity provider and the profile store. Every adapter
//! failure is caught here and turned into an [`OperationResult`] carrying a
//! user-facing message; raw errors only reach the logs.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::account::{
    translate, AccountErrorKind, AccountFailure, CookieContext, IdentityError, IdentityId,
    IdentityProvider, OperationResult, ProfileStore, ProfileStoreError, SessionCookie,
    SessionUser, UserProfile, SESSION_COOKIE_NAME, SESSION_MAX_AGE_SECS,
};
use crate::domain::validation::{DeleteProfileRequest, SignInRequest, SignupRequest};
use crate::infrastructure::observability::{record_account_operation, record_compensation};

pub const PROFILE_CREATION_FAILED: &str =
    "A server error occurred while creating your profile. Please try again.";
pub const ACCOUNT_NOT_FOUND: &str = "No user found with that email address.";
pub const SESSION_CREATION_FAILED: &str =
    "Failed to create a session on the server. Please check server logs for details.";
pub const STORE_FAILED: &str = "A database operation failed. Please try again.";

pub struct AccountService {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileStore>,
}

impl AccountService {
    pub fn new(identity: Arc<dyn IdentityProvider>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { identity, profiles }
    }

    /// Create an identity and its profile. A profile write failure deletes
    /// the freshly created identity before reporting.
    pub async fn signup(&self, request: &SignupRequest) -> OperationResult {
        let identity = match self
            .identity
            .create_identity(&request.email, &request.password)
            .await
        {
            Ok(identity) => identity,
            Err(e) => return finish("signup", identity_failure(&e).into()),
        };

        let profile = UserProfile::new(identity.id.clone(), identity.email.clone());
        if let Err(e) = self.profiles.create_profile(&profile).await {
            error!(uid = %identity.id, error = %e, "Failed to create profile during signup");
            self.rollback_identity(&identity.id).await;

            return finish(
                "signup",
                OperationResult::failure(AccountErrorKind::ProfileCreation, PROFILE_CREATION_FAILED),
            );
        }

        info!(uid = %identity.id, "Account created");
        finish("signup", OperationResult::Success)
    }

    async fn rollback_identity(&self, id: &IdentityId) {
        match self.identity.delete_identity(id).await {
            Ok(()) => {
                warn!(uid = %id, "Rolled back identity after profile creation failure");
                record_compensation(true);
            }
            Err(e) => {
                error!(
                    uid = %id,
                    code = e.code(),
                    error = %e,
                    "Failed to roll back identity; it now has no profile"
                );
                record_compensation(false);
            }
        }
    }

    /// Delete the profile and identity registered under an email, then drop
    /// the session cookie
    pub async fn delete_profile(
        &self,
        request: &DeleteProfileRequest,
        cookies: &mut dyn CookieContext,
    ) -> OperationResult {
        let identity = match self.identity.find_identity_by_email(&request.email).await {
            Ok(identity) => identity,
            Err(IdentityError::NotFound) => {
                return finish(
                    "delete_profile",
                    OperationResult::failure(AccountErrorKind::AccountNotFound, ACCOUNT_NOT_FOUND),
                );
            }
            Err(e) => return finish("delete_profile", identity_failure(&e).into()),
        };

        if let Err(e) = self.profiles.delete_profile(&identity.id).await {
            error!(uid = %identity.id, error = %e, "Failed to delete profile; deleting identity anyway");
        }

        if let Err(e) = self.identity.delete_identity(&identity.id).await {
            return finish("delete_profile", identity_failure(&e).into());
        }

        cookies.remove(SESSION_COOKIE_NAME);

        info!(uid = %identity.id, "Account deleted");
        finish("delete_profile", OperationResult::Success)
    }

    /// Exchange an id token for a five-day session cookie
    pub async fn create_session(
        &self,
        id_token: &str,
        cookies: &mut dyn CookieContext,
    ) -> OperationResult {
        let ttl = chrono::Duration::seconds(SESSION_MAX_AGE_SECS);

        match self.identity.issue_session(id_token, ttl).await {
            Ok(token) => {
                cookies.set(SessionCookie::session(token));
                debug!("Session cookie issued");
                finish("create_session", OperationResult::Success)
            }
            Err(e) => {
                error!(code = e.code(), error = %e, "Failed to create session cookie");
                finish(
                    "create_session",
                    OperationResult::failure(AccountErrorKind::Session, SESSION_CREATION_FAILED),
                )
            }
        }
    }

    /// The signed-in user, or `None` when the cookie is absent or fails
    /// verification for any reason
    pub async fn current_user(&self, cookies: &dyn CookieContext) -> Option<SessionUser> {
        let token = cookies.get(SESSION_COOKIE_NAME)?;

        match self.identity.verify_session(&token).await {
            Ok(user) => Some(user),
            Err(e) => {
                debug!(code = e.code(), error = %e, "Session cookie rejected");
                None
            }
        }
    }

    /// Expire the session cookie, present or not
    pub fn sign_out(&self, cookies: &mut dyn CookieContext) -> OperationResult {
        cookies.expire(SESSION_COOKIE_NAME);
        finish("sign_out", OperationResult::Success)
    }

    /// Check a password and return an id token for [`Self::create_session`]
    pub async fn sign_in(&self, request: &SignInRequest) -> Result<String, AccountFailure> {
        match self
            .identity
            .sign_in_with_password(&request.email, &request.password)
            .await
        {
            Ok(id_token) => {
                record_account_operation("sign_in", "success");
                Ok(id_token)
            }
            Err(e) => {
                let failure = identity_failure(&e);
                record_account_operation("sign_in", failure.kind.as_str());
                Err(failure)
            }
        }
    }

    pub async fn profile(&self, uid: &IdentityId) -> Result<Option<UserProfile>, AccountFailure> {
        self.profiles.get_profile(uid).await.map_err(|e| {
            error!(uid = %uid, error = %e, "Failed to read profile");
            AccountFailure::new(AccountErrorKind::Store, STORE_FAILED)
        })
    }

    /// Readiness of the profile store
    pub async fn check_ready(&self) -> Result<(), ProfileStoreError> {
        self.profiles.health_check().await
    }
}

fn identity_failure(error: &IdentityError) -> AccountFailure {
    warn!(code = error.code(), "Identity provider rejected the request");
    AccountFailure::new(AccountErrorKind::Identity, translate(error.code(), Some(error)))
}

fn finish(operation: &'static str, result: OperationResult) -> OperationResult {
    let outcome = result.failure_kind().map_or("success", |kind| kind.as_str());
    record_account_operation(operation, outcome);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{
        InMemoryCookies, MockIdentityProvider, MockProfileStore, UserIdentity,
    };
    use crate::infrastructure::identity::{
        Argon2Hasher, InMemoryIdentityRepository, LocalIdentityProvider, TokenSigner,
    };
    use crate::infrastructure::profile::InMemoryProfileStore;

    fn service(identity: MockIdentityProvider, profiles: MockProfileStore) -> AccountService {
        AccountService::new(Arc::new(identity), Arc::new(profiles))
    }

    fn signup_request() -> SignupRequest {
        SignupRequest {
            email: "a@b.com".to_string(),
            password: "Aa1!aaaa".to_string(),
        }
    }

    fn identity(uid: &str) -> UserIdentity {
        UserIdentity::new(IdentityId::new(uid), "a@b.com")
    }

    #[tokio::test]
    async fn test_signup_success() {
        let mut identity_provider = MockIdentityProvider::new();
        identity_provider
            .expect_create_identity()
            .withf(|email, password| email == "a@b.com" && password == "Aa1!aaaa")
            .times(1)
            .returning(|_, _| Ok(identity("uid-1")));
        identity_provider.expect_delete_identity().never();

        let mut profiles = MockProfileStore::new();
        profiles
            .expect_create_profile()
            .withf(|profile| profile.uid.as_str() == "uid-1" && profile.email == "a@b.com")
            .times(1)
            .returning(|_| Ok(()));

        let result = service(identity_provider, profiles)
            .signup(&signup_request())
            .await;

        assert_eq!(result, OperationResult::Success);
    }

    #[tokio::test]
    async fn test_signup_identity_failure_skips_profile() {
        let mut identity_provider = MockIdentityProvider::new();
        identity_provider
            .expect_create_identity()
            .times(1)
            .returning(|_, _| Err(IdentityError::EmailAlreadyExists));

        let mut profiles = MockProfileStore::new();
        profiles.expect_create_profile().never();

        let result = service(identity_provider, profiles)
            .signup(&signup_request())
            .await;

        assert_eq!(
            result,
            OperationResult::failure(
                AccountErrorKind::Identity,
                "An account with this email address already exists."
            )
        );
    }

    #[tokio::test]
    async fn test_signup_profile_failure_rolls_back_identity_once() {
        let mut identity_provider = MockIdentityProvider::new();
        identity_provider
            .expect_create_identity()
            .returning(|_, _| Ok(identity("uid-1")));
        identity_provider
            .expect_delete_identity()
            .withf(|id| id.as_str() == "uid-1")
            .times(1)
            .returning(|_| Ok(()));

        let mut profiles = MockProfileStore::new();
        profiles
            .expect_create_profile()
            .times(1)
            .returning(|_| Err(ProfileStoreError::new("connection reset")));

        let result = service(identity_provider, profiles)
            .signup(&signup_request())
            .await;

        assert_eq!(
            result,
            OperationResult::failure(AccountErrorKind::ProfileCreation, PROFILE_CREATION_FAILED)
        );
    }

    #[tokio::test]
    async fn test_signup_failed_rollback_keeps_original_outcome() {
        let mut identity_provider = MockIdentityProvider::new();
        identity_provider
            .expect_create_identity()
            .returning(|_, _| Ok(identity("uid-1")));
        identity_provider
            .expect_delete_identity()
            .times(1)
            .returning(|_| Err(IdentityError::provider("auth/internal-error", "unavailable")));

        let mut profiles = MockProfileStore::new();
        profiles
            .expect_create_profile()
            .returning(|_| Err(ProfileStoreError::new("connection reset")));

        let result = service(identity_provider, profiles)
            .signup(&signup_request())
            .await;

        assert_eq!(result.failure_kind(), Some(AccountErrorKind::ProfileCreation));
        assert_eq!(result.message(), Some(PROFILE_CREATION_FAILED));
    }

    fn delete_request() -> DeleteProfileRequest {
        DeleteProfileRequest {
            email: "a@b.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_delete_profile_unknown_email() {
        let mut identity_provider = MockIdentityProvider::new();
        identity_provider
            .expect_find_identity_by_email()
            .times(1)
            .returning(|_| Err(IdentityError::NotFound));
        identity_provider.expect_delete_identity().never();

        let mut profiles = MockProfileStore::new();
        profiles.expect_delete_profile().never();

        let mut cookies = InMemoryCookies::new().with_cookie("session", "token");
        let result = service(identity_provider, profiles)
            .delete_profile(&delete_request(), &mut cookies)
            .await;

        assert_eq!(
            result,
            OperationResult::failure(AccountErrorKind::AccountNotFound, ACCOUNT_NOT_FOUND)
        );
        assert!(cookies.removed.is_empty());
    }

    #[tokio::test]
    async fn test_delete_profile_success_removes_cookie() {
        let mut identity_provider = MockIdentityProvider::new();
        identity_provider
            .expect_find_identity_by_email()
            .withf(|email| email == "a@b.com")
            .returning(|_| Ok(identity("uid-1")));
        identity_provider
            .expect_delete_identity()
            .withf(|id| id.as_str() == "uid-1")
            .times(1)
            .returning(|_| Ok(()));

        let mut profiles = MockProfileStore::new();
        profiles
            .expect_delete_profile()
            .withf(|uid| uid.as_str() == "uid-1")
            .times(1)
            .returning(|_| Ok(()));

        let mut cookies = InMemoryCookies::new().with_cookie("session", "token");
        let result = service(identity_provider, profiles)
            .delete_profile(&delete_request(), &mut cookies)
            .await;

        assert!(result.is_success());
        assert_eq!(cookies.removed, ["session"]);
    }

    #[tokio::test]
    async fn test_delete_profile_continues_after_store_failure() {
        let mut identity_provider = MockIdentityProvider::new();
        identity_provider
            .expect_find_identity_by_email()
            .returning(|_| Ok(identity("uid-1")));
        identity_provider
            .expect_delete_identity()
            .times(1)
            .returning(|_| Ok(()));

        let mut profiles = MockProfileStore::new();
        profiles
            .expect_delete_profile()
            .returning(|_| Err(ProfileStoreError::new("timeout")));

        let mut cookies = InMemoryCookies::new();
        let result = service(identity_provider, profiles)
            .delete_profile(&delete_request(), &mut cookies)
            .await;

        assert!(result.is_success());
        assert!(cookies.removed.is_empty());
    }

    #[tokio::test]
    async fn test_delete_profile_identity_delete_failure() {
        let mut identity_provider = MockIdentityProvider::new();
        identity_provider
            .expect_find_identity_by_email()
            .returning(|_| Ok(identity("uid-1")));
        identity_provider
            .expect_delete_identity()
            .returning(|_| Err(IdentityError::RequiresRecentLogin));

        let mut profiles = MockProfileStore::new();
        profiles.expect_delete_profile().returning(|_| Ok(()));

        let mut cookies = InMemoryCookies::new().with_cookie("session", "token");
        let result = service(identity_provider, profiles)
            .delete_profile(&delete_request(), &mut cookies)
            .await;

        assert_eq!(result.failure_kind(), Some(AccountErrorKind::Identity));
        assert_eq!(
            result.message(),
            Some("This is a sensitive operation. Please sign out and sign back in to continue.")
        );
        assert!(cookies.removed.is_empty());
    }

    #[tokio::test]
    async fn test_create_session_sets_cookie() {
        let mut identity_provider = MockIdentityProvider::new();
        identity_provider
            .expect_issue_session()
            .withf(|token, ttl| token == "id-token" && *ttl == chrono::Duration::days(5))
            .times(1)
            .returning(|_, _| Ok("session-token".to_string()));

        let mut cookies = InMemoryCookies::new();
        let result = service(identity_provider, MockProfileStore::new())
            .create_session("id-token", &mut cookies)
            .await;

        assert!(result.is_success());
        assert_eq!(cookies.written, [SessionCookie::session("session-token")]);
    }

    #[tokio::test]
    async fn test_create_session_failure_hides_provider_error() {
        let mut identity_provider = MockIdentityProvider::new();
        identity_provider
            .expect_issue_session()
            .returning(|_, _| Err(IdentityError::InvalidToken("signature mismatch".into())));

        let mut cookies = InMemoryCookies::new();
        let result = service(identity_provider, MockProfileStore::new())
            .create_session("bad", &mut cookies)
            .await;

        assert_eq!(
            result,
            OperationResult::failure(AccountErrorKind::Session, SESSION_CREATION_FAILED)
        );
        assert!(cookies.written.is_empty());
    }

    #[tokio::test]
    async fn test_current_user_without_cookie() {
        let mut identity_provider = MockIdentityProvider::new();
        identity_provider.expect_verify_session().never();

        let user = service(identity_provider, MockProfileStore::new())
            .current_user(&InMemoryCookies::new())
            .await;

        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_current_user_rejected_cookie() {
        let mut identity_provider = MockIdentityProvider::new();
        identity_provider
            .expect_verify_session()
            .returning(|_| Err(IdentityError::Revoked));

        let cookies = InMemoryCookies::new().with_cookie("session", "revoked");
        let user = service(identity_provider, MockProfileStore::new())
            .current_user(&cookies)
            .await;

        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_sign_out_is_always_success() {
        let accounts = service(MockIdentityProvider::new(), MockProfileStore::new());

        let mut cookies = InMemoryCookies::new();
        assert!(accounts.sign_out(&mut cookies).is_success());
        assert_eq!(cookies.removed, ["session"]);

        let mut cookies = InMemoryCookies::new().with_cookie("session", "token");
        assert!(accounts.sign_out(&mut cookies).is_success());
        assert_eq!(cookies.removed, ["session"]);
    }

    #[tokio::test]
    async fn test_sign_in_translates_errors() {
        let mut identity_provider = MockIdentityProvider::new();
        identity_provider
            .expect_sign_in_with_password()
            .returning(|_, _| Err(IdentityError::InvalidCredential));

        let failure = service(identity_provider, MockProfileStore::new())
            .sign_in(&SignInRequest {
                email: "a@b.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(failure.kind, AccountErrorKind::Identity);
        assert_eq!(failure.message, "Incorrect email or password. Please try again.");
    }

    #[tokio::test]
    async fn test_profile_store_failure_is_generic() {
        let mut profiles = MockProfileStore::new();
        profiles
            .expect_get_profile()
            .returning(|_| Err(ProfileStoreError::new("relation \"users\" does not exist")));

        let failure = service(MockIdentityProvider::new(), profiles)
            .profile(&IdentityId::new("uid-1"))
            .await
            .unwrap_err();

        assert_eq!(failure, AccountFailure::new(AccountErrorKind::Store, STORE_FAILED));
    }

    #[tokio::test]
    async fn test_full_lifecycle_with_local_provider() {
        let identity_provider = LocalIdentityProvider::new(
            Arc::new(InMemoryIdentityRepository::new()),
            Arc::new(Argon2Hasher::new()),
            TokenSigner::new("test-secret", "proteus"),
            chrono::Duration::hours(1),
        );
        let profiles = Arc::new(InMemoryProfileStore::new());
        let accounts = AccountService::new(Arc::new(identity_provider), profiles.clone());

        assert!(accounts.signup(&signup_request()).await.is_success());
        assert_eq!(profiles.len().await, 1);

        let id_token = accounts
            .sign_in(&SignInRequest {
                email: "a@b.com".to_string(),
                password: "Aa1!aaaa".to_string(),
            })
            .await
            .unwrap();

        let mut cookies = InMemoryCookies::new();
        assert!(accounts.create_session(&id_token, &mut cookies).await.is_success());

        let user = accounts.current_user(&cookies).await.unwrap();
        assert_eq!(user.email, "a@b.com");

        let profile = accounts.profile(&user.id).await.unwrap().unwrap();
        assert_eq!(profile.uid, user.id);

        assert!(accounts
            .delete_profile(&delete_request(), &mut cookies)
            .await
            .is_success());
        assert_eq!(profiles.len().await, 0);
        assert!(accounts.current_user(&cookies).await.is_none());
    }
}
