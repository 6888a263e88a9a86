//! Review command handlers.

mod create_review;
mod delete_review;
mod respond_to_review;
mod update_review;

pub use create_review::{CreateReviewCommand, CreateReviewHandler, CreateReviewResult};
pub use delete_review::{DeleteReviewCommand, DeleteReviewHandler};
pub use respond_to_review::{RespondToReviewCommand, RespondToReviewHandler};
pub use update_review::{UpdateReviewCommand, UpdateReviewHandler};
