//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO for patches: `Option` fields for
//!   non-nullable columns, [`patch::Patch`] fields where an explicit JSON
//!   `null` must clear the column
//! - A list-parameters struct (filters, search, ordering, pagination)
//! - Any string-coded enums belonging to the entity

pub mod block;
pub mod block_task;
pub mod patch;
pub mod progress;
pub mod project;
pub mod student;
pub mod tag;
pub mod task;
pub mod topic;
pub mod user;
