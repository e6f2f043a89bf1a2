pub mod attachments;
pub mod catalog;
pub mod job;
