//! Chat: client-side conversation state and the transports that drive it.

pub mod session;
pub mod transport;

pub use session::{ChatSession, ChatTurn, Role};
pub use transport::{AssistantTransport, DirectTransport, ProxyTransport};
