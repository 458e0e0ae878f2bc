//! Sortable table engine
//!
//! Keeps table rows in an arena, sorts the body on a background worker thread
//! without blocking the caller, and keeps a host document's row order in step
//! with the sorted model.
//!
//! # Example
//!
//! ```ignore
//! use tabula_lib::dom::MemoryHost;
//! use tabula_lib::interaction::Modifiers;
//! use tabula_lib::model::{RowDefinition, TableDefinition};
//! use tabula_lib::{Table, TableServices};
//!
//! let definition = TableDefinition::new("users", ["name", "age"])
//!     .body_row(RowDefinition::new().cell("name", "Bob").cell("age", 31))
//!     .body_row(RowDefinition::new().cell("name", "Alice").cell("age", 27));
//!
//! let table = Table::new(definition, MemoryHost::new(), TableServices::default())?;
//! table.mount().await?;
//! table.on_header_activate("name", Modifiers::NONE).await?;
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod interaction;
pub mod model;
pub mod persist;
pub mod render;
pub mod sort;
pub mod store;

mod table;

pub use config::EngineConfig;
pub use error::*;
pub use table::*;
