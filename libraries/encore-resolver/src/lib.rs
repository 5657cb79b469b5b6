//! Encore - Track Resolution
//!
//! Stateless pipeline that turns a user query into playable tracks.
//!
//! Two paths:
//! - **Playlist links**: every item is searched as `"{title} {artist}"` on the
//!   playlist tier; the first candidate per item is kept, items without a match are dropped.
//! - **Everything else**: a single track, found by walking the search tiers in fixed
//!   priority order and keeping the first candidate of the first tier that has one.
//!
//! An empty result is a normal outcome; callers map it to a "no results" message.
//! Resolution holds no locks, so any number of resolutions can run at once.
//!
//! # Example
//!
//! ```rust,no_run
//! use encore_core::{RequesterId, SearchProvider};
//! use encore_resolver::Resolver;
//! use std::sync::Arc;
//!
//! # async fn demo(search: Arc<dyn SearchProvider>) -> encore_resolver::Result<()> {
//! let resolver = Resolver::new(search);
//! let tracks = resolver.resolve("never gonna give you up", RequesterId::new(1)).await?;
//! if tracks.is_empty() {
//!     println!("no playable results");
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod resolver;

pub use error::{ResolveError, Result};
pub use resolver::{QueryKind, Resolver};
