pub mod agent;
pub mod chat_session;
pub mod office_hours;

pub use agent::*;
pub use chat_session::*;
pub use office_hours::*;
