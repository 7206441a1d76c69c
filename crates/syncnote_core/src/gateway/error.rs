//! Gateway error taxonomy.
//!
//! # Responsibility
//! - Classify remote call failures for session-level routing.
//!
//! # Invariants
//! - `NotFound` is reserved for mutations against ids the gateway no
//!   longer holds; transport and policy failures use their own variants.

use crate::model::note::NoteId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failure reported by a gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The call was made without an authenticated session.
    Unauthorized,
    /// Mutation target does not exist in the gateway's store.
    NotFound(NoteId),
    /// Network or delivery failure between client and gateway.
    Transport(String),
    /// Gateway refused the request for a service-side reason.
    Rejected {
        code: String,
        message: String,
    },
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "gateway call requires an authenticated session"),
            Self::NotFound(id) => write!(f, "note not found in gateway store: {id}"),
            Self::Transport(detail) => write!(f, "gateway transport failure: {detail}"),
            Self::Rejected { code, message } => {
                write!(f, "gateway rejected request ({code}): {message}")
            }
        }
    }
}

impl Error for GatewayError {}

#[cfg(test)]
mod tests {
    use super::GatewayError;
    use uuid::Uuid;

    #[test]
    fn display_carries_code_and_id_details() {
        let id = Uuid::new_v4();
        assert!(GatewayError::NotFound(id).to_string().contains(&id.to_string()));
        let rejected = GatewayError::Rejected {
            code: "throttled".to_string(),
            message: "try again".to_string(),
        };
        assert!(rejected.to_string().contains("throttled"));
        assert!(GatewayError::Unauthorized
            .to_string()
            .contains("authenticated"));
    }
}
