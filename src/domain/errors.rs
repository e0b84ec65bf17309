use thiserror::Error;

use super::order::OrderStatus;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Order with ID '{0}' was not found.")]
    OrderNotFound(String),

    /// The stored version moved on between load and update.
    #[error("Order with ID '{id}' was modified concurrently (expected version {expected_version}).")]
    Conflict { id: String, expected_version: i32 },

    #[error("Order with ID '{id}' cannot be cancelled from status {from}.")]
    InvalidTransition { id: String, from: OrderStatus },

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_is_exact() {
        let err = DomainError::OrderNotFound("unknown-id".to_string());
        assert_eq!(err.to_string(), "Order with ID 'unknown-id' was not found.");
    }

    #[test]
    fn invalid_transition_names_the_status() {
        let err = DomainError::InvalidTransition {
            id: "abc".to_string(),
            from: OrderStatus::Rejected,
        };
        assert_eq!(
            err.to_string(),
            "Order with ID 'abc' cannot be cancelled from status REJECTED."
        );
    }
}
