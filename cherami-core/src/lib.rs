//! Cherami Core Library
//!
//! Client-side core for Cherami, a social network built around circles.
//! Screens read the session token, call the REST backend, parse the reply
//! into records and bind them into lists, presenting a modal or toast when
//! something goes wrong.
//!
//! [`CheramiCore`] is the entry point. The [`screen`] controllers sit on top
//! of it and tie every request to the lifetime of the screen that made it.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![deny(unsafe_code)]

mod api;
pub mod config;
mod error;
pub mod model;
pub mod parser;
pub mod remote;
pub mod scope;
pub mod screen;
pub mod session;
pub mod view;

pub use api::CheramiCore;
pub use error::{CoreError, Result};
