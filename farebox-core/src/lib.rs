pub mod booking;
pub mod inventory;

pub use booking::{Booking, BookingMode, BookingRequest, CreateItemRequest, ValidationError};
pub use inventory::{InventoryItem, ItemKind, SeatStatus, SeatUnit};
