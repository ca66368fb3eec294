//! Authentication types for JWT tokens.
//!
//! Actor identity and role travel in token claims; every workflow call
//! takes them as explicit parameters from here on, never from ambient
//! state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (actor ID).
    pub sub: Uuid,
    /// The actor's role in the export chain.
    pub role: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for an actor.
    #[must_use]
    pub fn new(actor_id: Uuid, role: &str, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: actor_id,
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the actor ID from claims.
    #[must_use]
    pub const fn actor_id(&self) -> Uuid {
        self.sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_new() {
        let id = Uuid::new_v4();
        let claims = Claims::new(id, "national-bank", Utc::now() + chrono::Duration::minutes(15));
        assert_eq!(claims.actor_id(), id);
        assert_eq!(claims.role, "national-bank");
        assert!(claims.exp > claims.iat);
    }
}
