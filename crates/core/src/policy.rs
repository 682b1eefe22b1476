//! Ownership-based access policy.
//!
//! Every mutating operation on a question, answer, comment or attachment is
//! gated on ownership. The check returns an [`Access`] value instead of an
//! error so that each caller decides how a denial is surfaced (the workflows
//! treat it as a no-op, the HTTP layer answers `403`).

use crate::types::DbId;

/// Outcome of a capability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Authorized,
    Denied,
}

impl Access {
    pub fn is_authorized(self) -> bool {
        matches!(self, Access::Authorized)
    }
}

/// Only the owner of a record may modify it.
///
/// `actor` is `None` for anonymous callers, who are always denied.
pub fn authorize_owner(actor: Option<DbId>, owner_id: DbId) -> Access {
    match actor {
        Some(user_id) if user_id == owner_id => Access::Authorized,
        _ => Access::Denied,
    }
}

/// Voting is the inverse of ownership: authors may not vote for their own
/// question or answer.
pub fn authorize_vote(actor: DbId, owner_id: DbId) -> Access {
    if actor == owner_id {
        Access::Denied
    } else {
        Access::Authorized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_is_authorized() {
        assert_eq!(authorize_owner(Some(7), 7), Access::Authorized);
    }

    #[test]
    fn other_user_is_denied() {
        assert_eq!(authorize_owner(Some(8), 7), Access::Denied);
    }

    #[test]
    fn anonymous_is_denied() {
        assert_eq!(authorize_owner(None, 7), Access::Denied);
        assert!(!authorize_owner(None, 7).is_authorized());
    }

    #[test]
    fn author_cannot_vote_for_own_entity() {
        assert_eq!(authorize_vote(3, 3), Access::Denied);
        assert_eq!(authorize_vote(4, 3), Access::Authorized);
    }
}
