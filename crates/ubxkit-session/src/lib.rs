//! Session driver for UBX receiver conversations.
//!
//! A [`Session`] owns the receive buffer and the request/response
//! accounting for one connection; it is a Sans-IO state machine driven by
//! [`SessionEvent`]s and answering with [`SessionAction`]s. The optional
//! `transport` feature provides the tokio TCP bridge the CLI uses.

pub mod buffer;
pub mod error;
pub mod session;
#[cfg(feature = "transport")]
pub mod transport;

pub use buffer::{RECV_CAPACITY, RecvBuffer};
pub use error::{Result, SessionError};
pub use session::{Session, SessionAction, SessionEvent, SessionState};
