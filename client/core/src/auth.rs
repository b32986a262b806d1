//! Account Sign-In and Sign-Up
//!
//! Form models, client-side validation and the two flows that turn a form
//! into an [`AuthSession`]. Validation runs before any request is made, and
//! every failure comes back as an [`AuthError`] whose `Display` is ready to
//! show to the user.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::backend::{AuthBackend, BackendError, BearerToken, LoginRequest, SignupRequest, User};

/// Shown when a failed login carries no server message
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your credentials.";

/// Shown when a failed signup carries no server message
pub const SIGNUP_FAILED_MESSAGE: &str = "Signup failed. Please try again.";

const MIN_USERNAME_CHARS: usize = 3;
const MIN_PASSWORD_CHARS: usize = 8;

/// Form problems caught before anything is sent
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty
    #[error("Please fill in all fields")]
    MissingFields,
    /// Username shorter than three characters
    #[error("Username must be at least 3 characters long")]
    UsernameTooShort,
    /// Email without an `@`
    #[error("Please enter a valid email address")]
    InvalidEmail,
    /// Confirmation differs from password
    #[error("Passwords do not match")]
    PasswordMismatch,
    /// Password shorter than eight characters
    #[error("Password must be at least 8 characters long")]
    PasswordTooShort,
}

/// Why a sign-in or sign-up attempt failed
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The form was rejected locally
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The service refused or could not be reached
    #[error("{message}")]
    Backend {
        /// User-facing message
        message: String,
        /// Underlying backend failure
        #[source]
        source: BackendError,
    },
}

impl AuthError {
    fn from_backend(source: BackendError, fallback: &str) -> Self {
        let message = source.detail().unwrap_or(fallback).to_string();
        Self::Backend { message, source }
    }
}

/// A signed-in account and its credential
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthSession {
    /// Account details
    pub user: User,
    /// Credential for chat requests
    pub token: BearerToken,
}

impl AuthSession {
    /// Account name
    #[must_use]
    pub fn username(&self) -> &str {
        &self.user.username
    }
}

/// Login form contents
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Account name as typed
    pub username: String,
    /// Password as typed
    pub password: String,
}

impl LoginForm {
    /// Build a filled-in form
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Whether every field has something in it
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }

    /// Check the form and build the request body
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] if a field is empty.
    pub fn to_request(&self) -> Result<LoginRequest, ValidationError> {
        if !self.can_submit() {
            return Err(ValidationError::MissingFields);
        }
        Ok(LoginRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Signup form contents
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    /// Requested account name as typed
    pub username: String,
    /// Contact address as typed
    pub email: String,
    /// Password as typed
    pub password: String,
    /// Password confirmation as typed
    pub confirm_password: String,
}

impl SignupForm {
    /// Whether every field has something in it
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.username.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.password.is_empty()
            && !self.confirm_password.is_empty()
    }

    /// Strength of the password typed so far
    #[must_use]
    pub fn strength(&self) -> Option<PasswordStrength> {
        password_strength(&self.password)
    }

    /// Check the form and build the request body
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, in field order.
    pub fn to_request(&self) -> Result<SignupRequest, ValidationError> {
        if !self.can_submit() {
            return Err(ValidationError::MissingFields);
        }
        validate_signup(self)?;
        Ok(SignupRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

impl fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Check a signup form, reporting only the first problem
///
/// Checks run in order: username length, email shape, password match,
/// password length.
///
/// # Errors
///
/// Returns the first failing [`ValidationError`].
pub fn validate_signup(form: &SignupForm) -> Result<(), ValidationError> {
    if form.username.trim().chars().count() < MIN_USERNAME_CHARS {
        return Err(ValidationError::UsernameTooShort);
    }
    if !form.email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    if form.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// A property a good password has
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordCriterion {
    /// Eight characters or more
    MinLength,
    /// An ASCII uppercase letter
    Uppercase,
    /// An ASCII lowercase letter
    Lowercase,
    /// An ASCII digit
    Digit,
}

impl PasswordCriterion {
    /// All criteria, in display order
    pub const ALL: [Self; 4] = [Self::MinLength, Self::Uppercase, Self::Lowercase, Self::Digit];

    fn is_met(self, password: &str) -> bool {
        match self {
            Self::MinLength => password.chars().count() >= MIN_PASSWORD_CHARS,
            Self::Uppercase => password.chars().any(|c| c.is_ascii_uppercase()),
            Self::Lowercase => password.chars().any(|c| c.is_ascii_lowercase()),
            Self::Digit => password.chars().any(|c| c.is_ascii_digit()),
        }
    }

    /// What is missing, phrased for the strength meter
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::MinLength => "at least 8 characters",
            Self::Uppercase => "one uppercase letter",
            Self::Lowercase => "one lowercase letter",
            Self::Digit => "one number",
        }
    }
}

/// Strength meter reading
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PasswordStrength {
    /// Every criterion met
    Strong,
    /// One or two criteria missing
    Weak {
        /// Unmet criteria
        missing: Vec<PasswordCriterion>,
    },
    /// Three or more criteria missing
    VeryWeak {
        /// Unmet criteria
        missing: Vec<PasswordCriterion>,
    },
}

impl PasswordStrength {
    /// Unmet criteria, empty when strong
    #[must_use]
    pub fn missing(&self) -> &[PasswordCriterion] {
        match self {
            Self::Strong => &[],
            Self::Weak { missing } | Self::VeryWeak { missing } => missing,
        }
    }
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (label, missing) = match self {
            Self::Strong => return f.write_str("Strong password ✓"),
            Self::Weak { missing } => ("Weak", missing),
            Self::VeryWeak { missing } => ("Very weak", missing),
        };
        let needs: Vec<&str> = missing.iter().map(|c| c.description()).collect();
        write!(f, "{label} - needs {}", needs.join(", "))
    }
}

/// Rate a password; `None` for an empty one
#[must_use]
pub fn password_strength(password: &str) -> Option<PasswordStrength> {
    if password.is_empty() {
        return None;
    }
    let missing: Vec<PasswordCriterion> = PasswordCriterion::ALL
        .into_iter()
        .filter(|c| !c.is_met(password))
        .collect();

    Some(match missing.len() {
        0 => PasswordStrength::Strong,
        1 | 2 => PasswordStrength::Weak { missing },
        _ => PasswordStrength::VeryWeak { missing },
    })
}

/// Sign in with an existing account
///
/// # Errors
///
/// Returns [`AuthError::Validation`] for an incomplete form, or
/// [`AuthError::Backend`] carrying the server's message (or a generic one).
pub async fn login<A>(backend: &A, form: &LoginForm) -> Result<AuthSession, AuthError>
where
    A: AuthBackend + ?Sized,
{
    let request = form.to_request()?;
    debug!(username = %request.username, "Signing in");

    match backend.login(&request).await {
        Ok(success) => {
            info!(username = %success.user.username, "Signed in");
            Ok(AuthSession {
                user: success.user,
                token: success.token,
            })
        }
        Err(e) => {
            warn!(error = %e, "Login failed");
            Err(AuthError::from_backend(e, LOGIN_FAILED_MESSAGE))
        }
    }
}

/// Create an account and sign in with it
///
/// # Errors
///
/// Returns [`AuthError::Validation`] for the first form problem found, or
/// [`AuthError::Backend`] carrying the server's message (or a generic one).
pub async fn signup<A>(backend: &A, form: &SignupForm) -> Result<AuthSession, AuthError>
where
    A: AuthBackend + ?Sized,
{
    let request = form.to_request()?;
    debug!(username = %request.username, "Creating account");

    match backend.signup(&request).await {
        Ok(success) => {
            info!(username = %success.user.username, "Account created");
            Ok(AuthSession {
                user: success.user,
                token: success.token,
            })
        }
        Err(e) => {
            warn!(error = %e, "Signup failed");
            Err(AuthError::from_backend(e, SIGNUP_FAILED_MESSAGE))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::AuthSuccess;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    fn signup_form(username: &str, email: &str, password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    /// Records requests and replays a canned outcome
    struct ScriptedAuth {
        outcome: Result<AuthSuccess, BackendError>,
        logins: Mutex<Vec<LoginRequest>>,
        signups: Mutex<Vec<SignupRequest>>,
    }

    impl ScriptedAuth {
        fn new(outcome: Result<AuthSuccess, BackendError>) -> Self {
            Self {
                outcome,
                logins: Mutex::new(Vec::new()),
                signups: Mutex::new(Vec::new()),
            }
        }

        fn accepting(username: &str) -> Self {
            Self::new(Ok(AuthSuccess {
                status: "success".into(),
                user: User {
                    username: username.into(),
                    email: format!("{username}@example.com"),
                },
                token: BearerToken::new("tok"),
                message: None,
            }))
        }
    }

    #[async_trait]
    impl AuthBackend for ScriptedAuth {
        async fn login(&self, request: &LoginRequest) -> Result<AuthSuccess, BackendError> {
            self.logins.lock().unwrap().push(request.clone());
            self.outcome.clone()
        }

        async fn signup(&self, request: &SignupRequest) -> Result<AuthSuccess, BackendError> {
            self.signups.lock().unwrap().push(request.clone());
            self.outcome.clone()
        }
    }

    #[test]
    fn test_validate_signup_order() {
        assert_eq!(
            validate_signup(&signup_form("ab", "bad", "x", "y")),
            Err(ValidationError::UsernameTooShort)
        );
        assert_eq!(
            validate_signup(&signup_form("abc", "bad", "x", "y")),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_signup(&signup_form("abc", "a@b", "x", "y")),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            validate_signup(&signup_form("abc", "a@b", "short", "short")),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(
            validate_signup(&signup_form("abc", "a@b", "longenough", "longenough")),
            Ok(())
        );
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::UsernameTooShort.to_string(),
            "Username must be at least 3 characters long"
        );
        assert_eq!(
            AuthError::from(ValidationError::PasswordMismatch).to_string(),
            "Passwords do not match"
        );
    }

    #[test]
    fn test_password_strength() {
        assert_eq!(password_strength(""), None);
        assert_eq!(password_strength("Abcdefg1"), Some(PasswordStrength::Strong));

        let weak = password_strength("abcdefgh").unwrap();
        assert_eq!(
            weak.missing(),
            &[PasswordCriterion::Uppercase, PasswordCriterion::Digit]
        );
        assert_eq!(
            weak.to_string(),
            "Weak - needs one uppercase letter, one number"
        );

        let very_weak = password_strength("abc").unwrap();
        assert!(matches!(very_weak, PasswordStrength::VeryWeak { .. }));
        assert_eq!(
            very_weak.to_string(),
            "Very weak - needs at least 8 characters, one uppercase letter, one number"
        );
        assert_eq!(
            PasswordStrength::Strong.to_string(),
            "Strong password ✓"
        );
    }

    #[test]
    fn test_form_debug_hides_password() {
        let form = LoginForm::new("alice", "hunter22");
        assert!(!format!("{form:?}").contains("hunter22"));
    }

    #[tokio::test]
    async fn test_login_trims_username_and_keeps_password() {
        let backend = ScriptedAuth::accepting("alice");
        let session = login(&backend, &LoginForm::new("  alice ", " pass word "))
            .await
            .unwrap();

        assert_eq!(session.username(), "alice");
        assert_eq!(session.token.as_str(), "tok");
        let sent = backend.logins.lock().unwrap();
        assert_eq!(sent[0].username, "alice");
        assert_eq!(sent[0].password, " pass word ");
    }

    #[tokio::test]
    async fn test_login_incomplete_form_sends_nothing() {
        let backend = ScriptedAuth::accepting("alice");
        let result = login(&backend, &LoginForm::new("alice", "")).await;
        assert_eq!(
            result,
            Err(AuthError::Validation(ValidationError::MissingFields))
        );
        assert!(backend.logins.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_login_surfaces_server_detail() {
        let backend = ScriptedAuth::new(Err(BackendError::Status {
            status: 401,
            detail: Some("Incorrect username or password".into()),
        }));
        let error = login(&backend, &LoginForm::new("alice", "wrong"))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "Incorrect username or password");
    }

    #[tokio::test]
    async fn test_login_generic_message_without_detail() {
        let backend = ScriptedAuth::new(Err(BackendError::Network("refused".into())));
        let error = login(&backend, &LoginForm::new("alice", "pw"))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), LOGIN_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_signup_validation_blocks_request() {
        let backend = ScriptedAuth::accepting("bob");
        let result = signup(&backend, &signup_form("bob", "bob.example.com", "Passw0rd!", "Passw0rd!")).await;
        assert_eq!(
            result,
            Err(AuthError::Validation(ValidationError::InvalidEmail))
        );
        assert!(backend.signups.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_signup_success() {
        let backend = ScriptedAuth::accepting("bob");
        let form = signup_form(" bob ", " bob@example.com ", "Passw0rd!", "Passw0rd!");
        let session = signup(&backend, &form).await.unwrap();
        assert_eq!(session.username(), "bob");

        let sent = backend.signups.lock().unwrap();
        assert_eq!(sent[0].username, "bob");
        assert_eq!(sent[0].email, "bob@example.com");
    }

    #[tokio::test]
    async fn test_signup_rejected_uses_generic_message() {
        let backend = ScriptedAuth::new(Err(BackendError::Rejected("error".into())));
        let form = signup_form("bob", "bob@example.com", "Passw0rd!", "Passw0rd!");
        let error = signup(&backend, &form).await.unwrap_err();
        assert_eq!(error.to_string(), SIGNUP_FAILED_MESSAGE);
    }
}
