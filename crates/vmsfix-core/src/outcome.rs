// ── Tagged call outcomes ──
//
// Fixture setup is best-effort: under the lenient policy a failed RPC does
// not abort the test, but the caller must still be able to tell success
// from failure. `Outcome` carries that distinction for lists and mutations;
// `Creation` adds the client-minted identifier for create calls.

use std::fmt;

use crate::error::CoreError;
use crate::model::EntityKind;

/// Why an RPC call did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Fully qualified RPC method (or REST path) that failed.
    pub method: String,
    pub reason: String,
    /// HTTP status code, if the server answered.
    pub status: Option<u16>,
}

impl Failure {
    pub(crate) fn from_api(method: &str, err: &vmsfix_api::Error) -> Self {
        Self {
            method: method.to_owned(),
            reason: err.to_string(),
            status: err.status(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (HTTP {status}): {}", self.method, self.reason),
            None => write!(f, "{}: {}", self.method, self.reason),
        }
    }
}

/// Result of a list or mutation call under the lenient policy.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Outcome<T> {
    Success(T),
    Failure(Failure),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The success value, discarding the failure.
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(v) => Some(v),
            Self::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(f) => Some(f),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(v) => Outcome::Success(f(v)),
            Self::Failure(e) => Outcome::Failure(e),
        }
    }

    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            Self::Success(v) => Ok(v),
            Self::Failure(f) => Err(f),
        }
    }
}

/// Result of a create call.
///
/// The identifier is minted client-side before the request is sent, so it
/// exists even when the server never confirmed the entity. `Unconfirmed`
/// is that inconsistent state made explicit.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Creation<I> {
    Confirmed(I),
    Unconfirmed { minted: I, failure: Failure },
}

impl<I> Creation<I> {
    pub(crate) fn from_outcome(minted: I, outcome: Outcome<()>) -> Self {
        match outcome {
            Outcome::Success(()) => Self::Confirmed(minted),
            Outcome::Failure(failure) => Self::Unconfirmed { minted, failure },
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }

    /// The minted identifier, confirmed or not.
    pub fn minted(&self) -> &I {
        match self {
            Self::Confirmed(id) | Self::Unconfirmed { minted: id, .. } => id,
        }
    }

    /// The identifier only if the server confirmed the creation.
    pub fn confirmed(&self) -> Option<&I> {
        match self {
            Self::Confirmed(id) => Some(id),
            Self::Unconfirmed { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Confirmed(_) => None,
            Self::Unconfirmed { failure, .. } => Some(failure),
        }
    }
}

impl<I: fmt::Display> Creation<I> {
    /// Demand confirmation, turning `Unconfirmed` into an error.
    pub fn require(self, kind: EntityKind) -> Result<I, CoreError> {
        match self {
            Self::Confirmed(id) => Ok(id),
            Self::Unconfirmed { minted, failure } => Err(CoreError::Unconfirmed {
                kind,
                id: minted.to_string(),
                reason: failure.to_string(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn failure() -> Failure {
        Failure {
            method: "axxonsoft.bl.groups.GroupManager.ChangeGroups".into(),
            reason: "boom".into(),
            status: Some(500),
        }
    }

    #[test]
    fn unconfirmed_creation_keeps_minted_id() {
        let creation = Creation::from_outcome(7, Outcome::Failure(failure()));
        assert!(!creation.is_confirmed());
        assert_eq!(*creation.minted(), 7);
        assert_eq!(creation.confirmed(), None);
        assert_eq!(creation.failure().and_then(|f| f.status), Some(500));
    }

    #[test]
    fn require_turns_unconfirmed_into_error() {
        let creation = Creation::from_outcome(7, Outcome::Failure(failure()));
        let err = creation.require(EntityKind::Groups).unwrap_err();
        assert!(matches!(err, CoreError::Unconfirmed { ref id, .. } if id == "7"));

        let ok = Creation::from_outcome(8, Outcome::Success(()));
        assert_eq!(ok.require(EntityKind::Groups).unwrap(), 8);
    }

    #[test]
    fn failure_display_includes_status() {
        assert_eq!(
            failure().to_string(),
            "axxonsoft.bl.groups.GroupManager.ChangeGroups (HTTP 500): boom"
        );
    }
}
