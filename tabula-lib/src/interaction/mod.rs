//! User interaction: header sort toggling, row navigation and drag input.
//!
//! The types here are host-neutral. The host translates its native events
//! into them and calls the matching [`Table`](crate::Table) handler.

mod events;
mod header;
mod navigation;

pub use events::*;
pub use header::*;
pub use navigation::*;
