use crate::dto::auth::Identity;

/// Authentication state of the session store.
///
/// The session itself is persisted by the remote authority through the
/// ambient credential; this phase only mirrors the last confirmed answer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No confirmed session.
    #[default]
    Unauthenticated,
    /// A session is active for the given identity.
    Authenticated(Identity),
}

impl SessionPhase {
    /// True while an identity is present.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionPhase::Authenticated(_))
    }

    /// The active identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionPhase::Authenticated(identity) => Some(identity),
            SessionPhase::Unauthenticated => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dto::auth::UserId;

    use super::*;

    #[test]
    fn initial_phase_is_unauthenticated() {
        let phase = SessionPhase::default();
        assert!(!phase.is_authenticated());
        assert!(phase.identity().is_none());
    }

    #[test]
    fn authenticated_phase_exposes_the_identity() {
        let phase = SessionPhase::Authenticated(Identity {
            id: UserId::new("u-1"),
            username: "ada".into(),
        });

        assert!(phase.is_authenticated());
        assert_eq!(phase.identity().unwrap().username, "ada");
    }
}
