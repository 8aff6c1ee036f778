pub mod moderate_comment;
pub mod review_comments;
