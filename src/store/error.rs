//! Store-specific error types.

use super::timer::TimerPhase;

/// Errors returned when an action cannot be applied. The state is left
/// untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// No project with the given id
    #[error("Project not found: {id}")]
    ProjectNotFound { id: String },

    /// No raw material with the given id
    #[error("Raw material not found: {id}")]
    RawMaterialNotFound { id: String },

    /// No item with the given id
    #[error("Item not found: {id}")]
    ItemNotFound { id: String },

    /// A record with this id already exists
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    /// Timer action not allowed in the current phase
    #[error("Cannot {action} while the timer is {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: TimerPhase,
    },

    /// Quantity or cost out of range
    #[error("Invalid {field}: {value} (must not be negative)")]
    InvalidQuantity { field: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let error = StoreError::ProjectNotFound {
            id: "abc".to_string(),
        };
        assert!(error.to_string().contains("Project not found"));
        assert!(error.to_string().contains("abc"));

        let error = StoreError::InvalidTransition {
            action: "pause",
            phase: TimerPhase::Idle,
        };
        assert_eq!(error.to_string(), "Cannot pause while the timer is idle");

        let error = StoreError::InvalidQuantity {
            field: "quantity",
            value: -2.0,
        };
        assert!(error.to_string().contains("-2"));

        let error = StoreError::DuplicateId {
            kind: "item",
            id: "7".to_string(),
        };
        assert!(error.to_string().contains("Duplicate item id: 7"));
    }
}
