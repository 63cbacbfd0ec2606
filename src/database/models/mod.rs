pub mod log;
pub mod user;

pub use log::{Log, LogRow, NewLog, Owner};
pub use user::User;
