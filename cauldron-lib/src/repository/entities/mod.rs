//! Core domain entities for Cauldron.
//!
//! These types represent the ingredients managed by the system. They provide
//! a unified interface for inspecting and mutating these elements, handling
//! all necessary operations behind the scenes.

use std::fmt::Debug;

use agdb::{DbValue, QueryBuilder};
use thiserror::Error;

use crate::repository::db::Db;

mod entity_id;
mod ingredient;
mod quantity;

pub use ingredient::Ingredient;
pub use quantity::Quantity;

pub(crate) use entity_id::{EntityId, Uid};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Internal database error {0}")]
    Internal(#[from] agdb::DbError),
    #[error("This EntityId refers to a model that has been deleted")]
    RemovedEntity,
    #[error("An ingredient needs a title before it can be saved")]
    EmptyTitle,
    #[error("Quantity must be between 1 and 5, got {0}")]
    InvalidQuantity(u64),
}

pub(crate) fn get_field<T>(db: &Db, id: EntityId, field: &str) -> Result<T>
where
    T: TryFrom<DbValue>,
    T::Error: Debug,
{
    let db_id = id.db_id(db)?;
    let value = db
        .read()
        .exec(QueryBuilder::select().values(field).ids(db_id).query())?
        .elements
        .pop()
        .expect("successful queries should not be empty")
        .values
        .pop()
        .expect("successful queries should not be empty")
        .value;

    Ok(T::try_from(value).expect("conversion from a `DbValue` must succeed"))
}

pub(crate) fn set_field<T>(db: &Db, id: EntityId, field: &str, value: T) -> Result<()>
where
    T: Into<DbValue>,
{
    let db_id = id.db_id(db)?;
    db.write().exec_mut(
        QueryBuilder::insert()
            .values([[(field, value).into()]])
            .ids(db_id)
            .query(),
    )?;

    Ok(())
}
