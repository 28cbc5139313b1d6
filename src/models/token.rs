//! Cancellation token for public bookings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One-per-booking code handed to public customers so they can cancel
/// their reservation without an account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CancellationToken {
    pub id: i32,
    pub booking_id: i32,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

/// Generate a fresh cancellation code: 8 uppercase hex characters.
pub fn generate_code() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_shape() {
        let code = generate_code();
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(code, code.to_uppercase());
    }

    #[test]
    fn codes_are_unique_enough() {
        let a = generate_code();
        let b = generate_code();
        assert_ne!(a, b);
    }
}
