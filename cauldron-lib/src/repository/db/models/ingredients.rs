use agdb::{DbElement, DbId};

use crate::repository::entities::{Quantity, Uid};

// Field names are the storage contract; keep them stable for existing data.
#[derive(Debug, Clone, DbElement, PartialEq, PartialOrd)]
pub(crate) struct IngredientModel {
    db_id: Option<DbId>,
    uid: u64,
    /// A human friendly display name
    title: String,
    quantity: u64,
    notes: String,
    bought: bool,
}

impl IngredientModel {
    pub fn new(uid: Uid, title: &str, quantity: Quantity, notes: &str) -> Self {
        Self {
            db_id: None,
            uid: uid.0,
            title: title.to_string(),
            quantity: quantity.into(),
            notes: notes.to_string(),
            bought: false,
        }
    }
}
