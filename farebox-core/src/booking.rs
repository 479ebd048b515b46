use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::inventory::ItemKind;

/// An immutable record of a completed reservation. Seat-mode bookings are
/// one row per seat with quantity 1; ticket-mode bookings are a single row
/// carrying the requested quantity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub item_id: Uuid,
    pub item_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub quantity: i32,
    pub seat_number: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Reservation request as submitted by the client. Exactly one of
/// `quantity` and `selectedSeats` is expected.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub quantity: Option<i32>,
    pub selected_seats: Option<Vec<i32>>,
}

/// The admitted shape of a reservation after input validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingMode {
    Tickets(i32),
    Seats(Vec<i32>),
}

impl BookingMode {
    /// Total capacity units the reservation will claim.
    pub fn quantity(&self) -> i32 {
        match self {
            BookingMode::Tickets(n) => *n,
            BookingMode::Seats(seats) => seats.len() as i32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("first and last name must each be longer than 1 character")]
    NameTooShort,
    #[error("email must be longer than 3 characters and contain '@'")]
    EmailMalformed,
    #[error("at least 1 ticket must be requested")]
    QuantityOutOfRange,
    #[error("a ticket quantity or seat selection is required")]
    MissingBookingMode,
    #[error("provide either a ticket quantity or a seat selection, not both")]
    AmbiguousBookingMode,
    #[error("seat numbers must be positive and distinct")]
    BadSeatSelection,
    #[error("item name is required")]
    NameRequired,
    #[error("capacity must be at least 1")]
    CapacityOutOfRange,
}

impl BookingRequest {
    /// Checks request shape before any database access. Returns the
    /// admitted booking mode; any failure means no side effects occurred.
    pub fn validate(&self) -> Result<BookingMode, ValidationError> {
        if self.first_name.len() <= 1 || self.last_name.len() <= 1 {
            return Err(ValidationError::NameTooShort);
        }
        if self.email.len() <= 3 || !self.email.contains('@') {
            return Err(ValidationError::EmailMalformed);
        }

        let seats = self.selected_seats.as_deref().unwrap_or(&[]);
        match self.quantity {
            Some(_) if !seats.is_empty() => Err(ValidationError::AmbiguousBookingMode),
            Some(quantity) if quantity < 1 => Err(ValidationError::QuantityOutOfRange),
            Some(quantity) => Ok(BookingMode::Tickets(quantity)),
            None if seats.is_empty() => Err(ValidationError::MissingBookingMode),
            None => {
                if seats.iter().any(|&n| n < 1) {
                    return Err(ValidationError::BadSeatSelection);
                }
                let distinct: HashSet<i32> = seats.iter().copied().collect();
                if distinct.len() != seats.len() {
                    return Err(ValidationError::BadSeatSelection);
                }
                Ok(BookingMode::Seats(seats.to_vec()))
            }
        }
    }
}

/// Payload for creating a new inventory item. Remaining capacity starts
/// equal to `capacity`; seated items get seat units 1..=capacity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub kind: ItemKind,
    pub capacity: i32,
}

impl CreateItemRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if self.capacity < 1 {
            return Err(ValidationError::CapacityOutOfRange);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(quantity: Option<i32>, seats: Option<Vec<i32>>) -> BookingRequest {
        BookingRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            quantity,
            selected_seats: seats,
        }
    }

    #[test]
    fn accepts_ticket_quantity() {
        let mode = request(Some(3), None).validate().unwrap();
        assert_eq!(mode, BookingMode::Tickets(3));
        assert_eq!(mode.quantity(), 3);
    }

    #[test]
    fn accepts_seat_selection() {
        let mode = request(None, Some(vec![5, 6, 7])).validate().unwrap();
        assert_eq!(mode, BookingMode::Seats(vec![5, 6, 7]));
        assert_eq!(mode.quantity(), 3);
    }

    #[test]
    fn rejects_short_names() {
        let mut req = request(Some(1), None);
        req.first_name = "A".to_string();
        assert_eq!(req.validate(), Err(ValidationError::NameTooShort));
    }

    #[test]
    fn rejects_email_without_at_sign() {
        let mut req = request(Some(1), None);
        req.email = "ada.example.com".to_string();
        assert_eq!(req.validate(), Err(ValidationError::EmailMalformed));
    }

    #[test]
    fn rejects_too_short_email() {
        let mut req = request(Some(1), None);
        req.email = "a@b".to_string();
        assert_eq!(req.validate(), Err(ValidationError::EmailMalformed));
    }

    #[test]
    fn rejects_zero_quantity() {
        assert_eq!(
            request(Some(0), None).validate(),
            Err(ValidationError::QuantityOutOfRange)
        );
    }

    #[test]
    fn rejects_request_with_neither_mode() {
        assert_eq!(
            request(None, None).validate(),
            Err(ValidationError::MissingBookingMode)
        );
        assert_eq!(
            request(None, Some(vec![])).validate(),
            Err(ValidationError::MissingBookingMode)
        );
    }

    #[test]
    fn rejects_request_with_both_modes() {
        assert_eq!(
            request(Some(2), Some(vec![1, 2])).validate(),
            Err(ValidationError::AmbiguousBookingMode)
        );
    }

    #[test]
    fn rejects_duplicate_or_nonpositive_seats() {
        assert_eq!(
            request(None, Some(vec![4, 4])).validate(),
            Err(ValidationError::BadSeatSelection)
        );
        assert_eq!(
            request(None, Some(vec![0])).validate(),
            Err(ValidationError::BadSeatSelection)
        );
    }

    #[test]
    fn create_item_requires_name_and_capacity() {
        let mut req = CreateItemRequest {
            name: "Spring Conference".to_string(),
            description: None,
            location: None,
            starts_at: None,
            kind: ItemKind::Ticketed,
            capacity: 100,
        };
        assert!(req.validate().is_ok());

        req.capacity = 0;
        assert_eq!(req.validate(), Err(ValidationError::CapacityOutOfRange));

        req.capacity = 10;
        req.name = "  ".to_string();
        assert_eq!(req.validate(), Err(ValidationError::NameRequired));
    }
}
