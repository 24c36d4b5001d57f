//! Identity Boundary
//!
//! The identity provider is an external collaborator. The core only needs
//! password sign-in, federated sign-in and a way to activate the resulting
//! session; everything else about sessions stays on the provider's side.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::DomainResult;

/// Status reported by a password sign-in attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignInStatus {
    Complete,
    NeedsFirstFactor,
    NeedsSecondFactor,
    NeedsNewPassword,
    /// No session yet and the provider did not say which step is missing
    NeedsFurtherSteps,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInAttempt {
    pub status: SignInStatus,
    /// Present once `status` is `Complete`
    pub session_id: Option<String>,
}

/// Federated (OAuth) identity providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FederatedProvider {
    Google,
    Apple,
    GitHub,
}

impl FederatedProvider {
    pub fn strategy(&self) -> &'static str {
        match self {
            FederatedProvider::Google => "oauth_google",
            FederatedProvider::Apple => "oauth_apple",
            FederatedProvider::GitHub => "oauth_github",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FederatedSignIn {
    /// Missing when the provider needs more steps (e.g. MFA)
    pub session_id: Option<String>,
}

/// Client side of the identity provider.
///
/// Failures are reported as `DomainError::ExternalAuth` carrying the
/// provider's messages.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, identifier: &str, secret: &str) -> DomainResult<SignInAttempt>;

    async fn start_federated_sign_in(&self, provider: FederatedProvider) -> DomainResult<FederatedSignIn>;

    /// Make `session_id` the active session for this device
    async fn set_active(&self, session_id: &str) -> DomainResult<()>;
}
