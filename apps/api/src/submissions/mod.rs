// Submission persistence and the read-side views over it (user history, admin summary).
// Model-calling handlers only write through `WorkshopStore`; reads live in handlers.rs.

pub mod handlers;
pub mod memory;
pub mod postgres;
pub mod store;
