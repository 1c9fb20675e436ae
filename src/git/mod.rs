//! Access to the tags of a repository and its remote.
//!
//! [`TagRepository`] is all the driver knows about version control.
//! [`GitRepository`] backs it with `git2` and the `git` executable,
//! [`MemoryRepository`] keeps everything in memory for tests.

pub mod memory;
pub mod repository;

pub use memory::{Failure, MemoryRepository};
pub use repository::GitRepository;

use git2::Oid;

use crate::error::Result;

pub trait TagRepository {
    /// Names of all local tags, in no particular order
    fn list_tags(&self) -> Result<Vec<String>>;

    fn tag_exists(&self, name: &str) -> Result<bool>;

    /// Commit the new tag should point at
    fn head(&self) -> Result<Oid>;

    /// Creates tag `name` at `target`.
    ///
    /// Fails with [`Error::TagAlreadyExists`](crate::Error::TagAlreadyExists)
    /// when the name is taken.
    fn create_tag(&mut self, name: &str, target: Oid) -> Result<()>;

    /// Publishes a local tag to the remote
    fn push_tag(&mut self, name: &str) -> Result<()>;

    /// Brings all remote tags into the local repository
    fn fetch_tags(&mut self) -> Result<()>;
}
