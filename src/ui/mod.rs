//! Text presentation layer.
//!
//! Controllers produce state, [`viewmodel`] turns it into display-ready text,
//! [`render`] lays that out as aligned tables with optional colour from
//! [`theme`]. [`format`] holds the cell-level formatting rules.
//!
//! # Modules
//!
//! - [`format`]: number grouping, timestamps, placeholders, status colours
//! - [`theme`]: palette and ANSI escapes
//! - [`viewmodel`]: table and form view models per screen
//! - [`render`]: view model to text

pub mod format;
pub mod render;
pub mod theme;
pub mod viewmodel;

pub use render::{render_form, render_nav, render_table};
pub use theme::Theme;
pub use viewmodel::{Cell, FormView, TableView, Tabular};
