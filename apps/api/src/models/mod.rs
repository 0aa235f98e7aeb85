pub mod submission;
pub mod usecase;
