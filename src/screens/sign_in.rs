//! Sign-In Screen
//!
//! Email/password and federated sign-in. Provider errors are kept as a list
//! of messages for the form to render.

use std::ops::{Deref, DerefMut};

use crate::auth::{FederatedProvider, IdentityProvider, SignInStatus};
use crate::domain::DomainError;

/// Result of a sign-in action, for the shell to decide where to navigate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// Session is active
    SignedIn { session_id: String },
    /// Provider wants more steps before a session exists
    Incomplete(SignInStatus),
    /// Errors were recorded on the screen
    Failed,
}

#[derive(Debug, Default)]
pub struct SignInScreen {
    pub identifier: String,
    pub secret: String,
    is_signing_in: bool,
    errors: Vec<String>,
}

impl SignInScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_signing_in(&self) -> bool {
        self.is_signing_in
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn can_submit(&self) -> bool {
        !self.is_signing_in && !self.identifier.trim().is_empty() && !self.secret.is_empty()
    }

    /// Sign in with the identifier and secret typed into the form.
    /// Nothing is sent while a field is empty.
    pub async fn submit(&mut self, provider: &dyn IdentityProvider) -> SignInOutcome {
        if !self.can_submit() {
            return self.fail(DomainError::Validation(
                "Enter your email and password".to_string(),
            ));
        }

        let mut screen = SigningIn::begin(self);
        let result = provider.sign_in(screen.identifier.trim(), &screen.secret).await;
        let outcome = match result {
            Ok(attempt) if attempt.status == SignInStatus::Complete => match attempt.session_id {
                Some(session_id) => screen.activate(provider, session_id).await,
                None => screen.fail(DomainError::ExternalAuth(vec![
                    "Sign-in completed without a session".to_string(),
                ])),
            },
            Ok(attempt) => {
                log::warn!("Sign-in not complete: {:?}", attempt.status);
                SignInOutcome::Incomplete(attempt.status)
            }
            Err(e) => screen.fail(e),
        };
        outcome
    }

    /// Sign in through a federated provider
    pub async fn sign_in_with(
        &mut self,
        provider: &dyn IdentityProvider,
        federated: FederatedProvider,
    ) -> SignInOutcome {
        let mut screen = SigningIn::begin(self);
        let result = provider.start_federated_sign_in(federated).await;
        let outcome = match result {
            Ok(result) => match result.session_id {
                Some(session_id) => screen.activate(provider, session_id).await,
                None => {
                    log::info!("{} sign-in needs further steps", federated.strategy());
                    SignInOutcome::Incomplete(SignInStatus::NeedsFurtherSteps)
                }
            },
            Err(e) => screen.fail(e),
        };
        outcome
    }

    async fn activate(&mut self, provider: &dyn IdentityProvider, session_id: String) -> SignInOutcome {
        match provider.set_active(&session_id).await {
            Ok(()) => {
                log::info!("Signed in, session {}", session_id);
                self.secret.clear();
                SignInOutcome::SignedIn { session_id }
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, error: DomainError) -> SignInOutcome {
        log::warn!("Sign-in failed: {}", error);
        self.errors = error.messages();
        SignInOutcome::Failed
    }
}

/// Busy marker for one sign-in attempt. The flag is cleared on drop, so a
/// cancelled attempt leaves the form usable.
struct SigningIn<'a> {
    screen: &'a mut SignInScreen,
}

impl<'a> SigningIn<'a> {
    fn begin(screen: &'a mut SignInScreen) -> Self {
        screen.errors.clear();
        screen.is_signing_in = true;
        Self { screen }
    }
}

impl Deref for SigningIn<'_> {
    type Target = SignInScreen;

    fn deref(&self) -> &SignInScreen {
        self.screen
    }
}

impl DerefMut for SigningIn<'_> {
    fn deref_mut(&mut self) -> &mut SignInScreen {
        self.screen
    }
}

impl Drop for SigningIn<'_> {
    fn drop(&mut self) {
        self.screen.is_signing_in = false;
    }
}
