//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod answer_repo;
pub mod attachment_repo;
pub mod comment_repo;
pub mod job_repo;
mod polymorphic;
pub mod question_repo;
pub mod session_repo;
pub mod subscription_repo;
pub mod user_repo;
pub mod vote_repo;

pub use answer_repo::AnswerRepo;
pub use attachment_repo::AttachmentRepo;
pub use comment_repo::CommentRepo;
pub use job_repo::JobRepo;
pub use question_repo::QuestionRepo;
pub use session_repo::SessionRepo;
pub use subscription_repo::SubscriptionRepo;
pub use user_repo::UserRepo;
pub use vote_repo::VoteRepo;
