//! Frontend-agnostic controllers for the shopping list.
//!
//! Each component folds a `Message` into its state and hands the frontend an
//! `Action` describing what to do next. Frontends stay thin: they translate
//! gestures into messages and render whatever the component exposes.

pub mod editor;
pub mod list;

pub use editor::IngredientEditor;
pub use list::IngredientList;
