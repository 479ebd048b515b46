use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// How capacity on an item is sold: individually numbered seats, or a
/// plain ticket count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Seated,
    Ticketed,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Seated => "seated",
            ItemKind::Ticketed => "ticketed",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown item kind: {0}")]
pub struct ParseItemKindError(pub String);

impl FromStr for ItemKind {
    type Err = ParseItemKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seated" => Ok(ItemKind::Seated),
            "ticketed" => Ok(ItemKind::Ticketed),
            other => Err(ParseItemKindError(other.to_string())),
        }
    }
}

/// A sellable unit of capacity: a bus run or a conference.
///
/// `remaining` is mutated only by committed reservations and never drops
/// below zero or exceeds `total_capacity`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub kind: ItemKind,
    pub total_capacity: i32,
    pub remaining: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Booked,
}

impl SeatStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatStatus::Available => "available",
            SeatStatus::Booked => "booked",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown seat status: {0}")]
pub struct ParseSeatStatusError(pub String);

impl FromStr for SeatStatus {
    type Err = ParseSeatStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(SeatStatus::Available),
            "booked" => Ok(SeatStatus::Booked),
            other => Err(ParseSeatStatusError(other.to_string())),
        }
    }
}

/// An individually addressable seat belonging to one seated item.
///
/// Status is Booked iff exactly one booking references the seat.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatUnit {
    pub id: Uuid,
    pub item_id: Uuid,
    pub seat_number: i32,
    pub status: SeatStatus,
    pub booking_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_kind_round_trips_through_text() {
        assert_eq!("seated".parse::<ItemKind>().unwrap(), ItemKind::Seated);
        assert_eq!("ticketed".parse::<ItemKind>().unwrap(), ItemKind::Ticketed);
        assert_eq!(ItemKind::Seated.as_str(), "seated");
        assert!("bus".parse::<ItemKind>().is_err());
    }

    #[test]
    fn seat_status_round_trips_through_text() {
        assert_eq!("available".parse::<SeatStatus>().unwrap(), SeatStatus::Available);
        assert_eq!("booked".parse::<SeatStatus>().unwrap(), SeatStatus::Booked);
        assert!("held".parse::<SeatStatus>().is_err());
    }

    #[test]
    fn item_serializes_with_camel_case_fields() {
        let item = InventoryItem {
            id: Uuid::new_v4(),
            name: "Morning Run".to_string(),
            description: None,
            location: None,
            starts_at: None,
            kind: ItemKind::Seated,
            total_capacity: 50,
            remaining: 48,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["totalCapacity"], 50);
        assert_eq!(json["remaining"], 48);
        assert_eq!(json["kind"], "seated");
    }
}
