//! HTTP request handlers, one module per resource.
//!
//! Handlers are thin: they extract inputs, call the matching repository, and
//! map missing rows to 404. Database constraint violations surface through
//! `AppError`'s sqlx classification (unique conflicts as 409, bad references
//! as 400).

pub mod block_tasks;
pub mod blocks;
pub mod progress;
pub mod projects;
pub mod students;
pub mod tags;
pub mod tasks;
pub mod topics;
pub mod users;
