pub mod structs;
pub mod file;


pub use structs::FileParams;
pub use file::{FileModule, Outcome, FAIL_SENTINEL, MSG_CREATED, MSG_EXISTS};
