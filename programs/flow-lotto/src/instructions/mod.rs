pub mod buy_tickets;
pub mod close_session;
pub mod create_session;

pub use buy_tickets::*;
pub use close_session::*;
pub use create_session::*;
