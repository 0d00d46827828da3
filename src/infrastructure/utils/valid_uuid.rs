use uuid::Uuid;

use crate::errors::AppError;

/// Parses a path identifier, rejecting anything that is not a UUID
pub fn valid_uuid(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id.trim())
        .map_err(|_| AppError::InvalidInput(format!("'{}' is not a valid identifier", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_hyphenated_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(valid_uuid(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn rejects_numeric_ids() {
        assert!(matches!(valid_uuid("42"), Err(AppError::InvalidInput(_))));
    }
}
