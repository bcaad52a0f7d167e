use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::ids::OrderId;

/// A booking as submitted by a caller, before the store assigns an id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewOrder {
    pub apartment_number: i64,
    pub pet_name: String,
    pub pet_breed: String,
    #[serde(deserialize_with = "crate::time::deserialize_walk_time")]
    pub walk_time: NaiveDateTime,
}

/// A persisted pet-walk booking. Write-once: never updated or deleted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub apartment_number: i64,
    pub pet_name: String,
    pub pet_breed: String,
    pub walk_time: NaiveDateTime,
}

impl Order {
    pub fn from_new(id: OrderId, candidate: NewOrder) -> Self {
        Self {
            id,
            apartment_number: candidate.apartment_number,
            pet_name: candidate.pet_name,
            pet_breed: candidate.pet_breed,
            walk_time: candidate.walk_time,
        }
    }
}
