//! In-memory relational engine for the ledger store
//!
//! The engine owns every physical table of one database image. It knows
//! nothing about durability: serialization produces an opaque payload that
//! the durability layer frames and the store layer persists.
//!
//! - [`schema`]: pure synthesis of table schemas from declarative
//!   field-descriptor lists
//! - [`table`]: one physical table (columns, rows, monotonic id counter)
//! - [`engine`]: the whole-image container with reconcile and
//!   (de)serialization

pub mod engine;
pub mod schema;
pub mod table;

pub use engine::Engine;
pub use schema::{synthesize, Column, TableSchema};
pub use table::Table;
