//! Domain value objects

mod language;
mod session_id;

pub use language::Language;
pub use session_id::SessionId;
