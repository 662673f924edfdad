//! Session command and query handlers.

mod create_session;
mod get_session;
mod reset_session;

pub use create_session::CreateSessionHandler;
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use reset_session::{ResetSessionCommand, ResetSessionHandler};
