//! Table data model
//!
//! Cell values, rows, column flags, sort specifications, and the serde
//! definitions a table is built from.

mod column;
mod definition;
mod row;
mod spec;
mod value;

pub use column::*;
pub use definition::*;
pub use row::*;
pub use spec::*;
pub use value::*;
