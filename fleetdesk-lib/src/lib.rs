//! Session-scoped fleet management logic.
//!
//! The heart of the crate is the [`Roster`] view-model: an owned, in-memory
//! collection of driver records that derives filtered, sorted and paginated
//! views and exposes the only mutation surface over those records. Around it
//! sit the company directory, the driver shift clock and the [`Session`]
//! that ties a login role to a freshly seeded roster.

use thiserror::Error;

pub mod auth;
pub mod config;
pub mod fleet;
pub mod fs;
pub mod roster;
pub mod seed;
pub mod session;
pub mod shift;

pub use roster::Roster;
pub use session::Session;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Roster(#[from] roster::Error),
    #[error(transparent)]
    Fleet(#[from] fleet::Error),
    #[error(transparent)]
    Session(#[from] session::Error),
    #[error(transparent)]
    Config(#[from] config::Error),
}
