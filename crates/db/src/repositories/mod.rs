//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. Parent deletes execute their
//! cascade / set-null policy as explicit ordered statements inside one
//! transaction (the schema declares no `ON DELETE` actions).

pub mod block_repo;
pub mod block_task_repo;
pub mod progress_repo;
pub mod project_repo;
pub mod student_repo;
pub mod tag_repo;
pub mod task_repo;
pub mod topic_repo;
pub mod user_repo;

pub use block_repo::BlockRepo;
pub use block_task_repo::BlockTaskRepo;
pub use progress_repo::ProgressRepo;
pub use project_repo::ProjectRepo;
pub use student_repo::StudentRepo;
pub use tag_repo::TagRepo;
pub use task_repo::TaskRepo;
pub use topic_repo::TopicRepo;
pub use user_repo::UserRepo;
