pub mod fts;
pub mod label;
pub mod mailbox;
pub mod message;
pub mod relative_date;
pub mod session;
pub mod thread;
