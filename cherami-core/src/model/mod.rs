//! Wire records exchanged with the backend.
//!
//! - [`CircleEntry`]: one row of a user's circle list
//! - [`FeedEntry`]: one message in a profile feed
//! - [`JoinRequest`], [`NewMessage`], [`LoginRequest`]: request bodies
//! - [`ResponseText`], [`LoginResponse`]: acknowledgement bodies

mod account;
mod circle;
mod feed;

pub use account::{LoginRequest, LoginResponse, ResponseText};
pub use circle::{CircleEntry, JoinRequest};
pub use feed::{FeedEntry, NewMessage, TIME_SEPARATOR};
