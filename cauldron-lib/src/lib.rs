//! Backend library for Cauldron, a small shopping list manager for potion
//! ingredients.
//!
//! All persistent state lives in an embedded database wrapped by
//! [`Repository`]. Frontends drive the headless controllers in
//! [`components`] and render whatever state those expose.

pub mod components;
pub mod fs;
pub mod repository;

pub use repository::Repository;
pub use repository::entities::{Error, Result};
