use std::sync::Arc;

use parking_lot::RwLock;

use crate::repository::{
    config::{Cfg, CoreConfig},
    db::Db,
    entities::Result,
};

mod db;

pub mod config;
pub mod entities;
pub mod watch;

pub use entities::{Ingredient, Quantity};
pub use watch::{Change, Subscription};

/// Central access point for all persistent data.
///
/// The [`Repository`] bundles the database and configuration handles behind a
/// single, consistent interface for reading and writing the shopping list.
/// Components receive a clone of it instead of reaching for shared global
/// state.
#[derive(Clone, Debug)]
pub struct Repository {
    pub(crate) db: Db,
    pub(crate) cfg: Cfg,
}

impl Repository {
    pub fn new() -> Self {
        Self {
            db: Db::new(),
            cfg: Arc::new(RwLock::new(CoreConfig::load())),
        }
    }

    /// Persist a new ingredient. It starts out unbought.
    pub fn add_ingredient(&self, title: &str, quantity: Quantity, notes: &str) -> Result<Ingredient> {
        Ingredient::add(&self.db, title, quantity, notes)
    }

    /// All persisted ingredients, in insertion order.
    pub fn ingredients(&self) -> Result<Vec<Ingredient>> {
        Ingredient::list(&self.db)
    }

    /// Look up an ingredient by its stable identifier.
    pub fn find_ingredient(&self, uid: u64) -> Result<Option<Ingredient>> {
        Ok(self.ingredients()?.into_iter().find(|i| i.uid() == uid))
    }

    /// Register an observer for committed changes to the ingredient collection.
    pub fn subscribe(&self) -> Subscription {
        self.db.subscribe()
    }

    /// The quantity a freshly opened editor starts from.
    pub fn default_quantity(&self) -> Quantity {
        self.cfg.read().default_quantity
    }

    #[cfg(test)]
    /// Return a mock version of a [`Repository`] with an in-memory database and default
    /// configuration.
    pub(crate) fn mock() -> Self {
        Self {
            db: Db::in_memory(),
            cfg: Arc::new(RwLock::new(CoreConfig::mock())),
        }
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}
