pub use session::*;
pub use summary::*;
pub use ticket_status::*;
pub use wallet::*;

pub mod session;
pub mod summary;
pub mod ticket_status;
pub mod wallet;
