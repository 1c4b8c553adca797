pub mod session_store;

pub use session_store::{Flash, FlashKind, Session, SessionId, SessionStore};
