use std::collections::{BTreeMap, BTreeSet};

use git2::Oid;

use crate::error::{Error, Result};
use crate::git::TagRepository;

/// Which network operation a [`MemoryRepository`] should refuse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Network,
    Auth,
}

impl Failure {
    fn into_error(self, operation: &str) -> Error {
        match self {
            Failure::Network => Error::Network(format!("{} failed", operation)),
            Failure::Auth => Error::Auth(format!("{} rejected", operation)),
        }
    }
}

/// Repository kept entirely in memory
pub struct MemoryRepository {
    head: Oid,
    tags: BTreeMap<String, Oid>,
    remote_tags: BTreeSet<String>,
    pushed: Vec<String>,
    fetches: usize,
    fetch_failure: Option<Failure>,
    push_failure: Option<Failure>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        MemoryRepository {
            head: Oid::zero(),
            tags: BTreeMap::new(),
            remote_tags: BTreeSet::new(),
            pushed: Vec::new(),
            fetches: 0,
            fetch_failure: None,
            push_failure: None,
        }
    }

    /// Adds local tags pointing at the head commit
    pub fn with_tags<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let head = self.head;
        self.tags
            .extend(names.into_iter().map(|name| (name.into(), head)));
        self
    }

    /// Adds tags that only exist on the remote until fetched
    pub fn with_remote_tags<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remote_tags.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_head(mut self, head: Oid) -> Self {
        self.head = head;
        self
    }

    pub fn failing_fetch(mut self, failure: Failure) -> Self {
        self.fetch_failure = Some(failure);
        self
    }

    pub fn failing_push(mut self, failure: Failure) -> Self {
        self.push_failure = Some(failure);
        self
    }

    pub fn tag_target(&self, name: &str) -> Option<Oid> {
        self.tags.get(name).copied()
    }

    pub fn pushed(&self) -> &[String] {
        &self.pushed
    }

    pub fn fetches(&self) -> usize {
        self.fetches
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TagRepository for MemoryRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.keys().cloned().collect())
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        Ok(self.tags.contains_key(name))
    }

    fn head(&self) -> Result<Oid> {
        Ok(self.head)
    }

    fn create_tag(&mut self, name: &str, target: Oid) -> Result<()> {
        if self.tag_exists(name)? {
            return Err(Error::TagAlreadyExists(name.to_string()));
        }
        self.tags.insert(name.to_string(), target);
        Ok(())
    }

    fn push_tag(&mut self, name: &str) -> Result<()> {
        if let Some(failure) = self.push_failure {
            return Err(failure.into_error("push"));
        }
        if !self.tags.contains_key(name) {
            return Err(Error::Network(format!("src refspec {} does not match any", name)));
        }
        self.remote_tags.insert(name.to_string());
        self.pushed.push(name.to_string());
        Ok(())
    }

    fn fetch_tags(&mut self) -> Result<()> {
        if let Some(failure) = self.fetch_failure {
            return Err(failure.into_error("fetch"));
        }
        self.fetches += 1;
        let head = self.head;
        for name in &self.remote_tags {
            self.tags.entry(name.clone()).or_insert(head);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fetch_merges_remote_tags() {
        let mut repo = MemoryRepository::new()
            .with_tags(["0.1.0"])
            .with_remote_tags(["0.2.0"]);
        assert!(!repo.tag_exists("0.2.0").unwrap());

        repo.fetch_tags().unwrap();

        assert_eq!(repo.list_tags().unwrap(), vec!["0.1.0", "0.2.0"]);
        assert_eq!(repo.fetches(), 1);
    }

    #[test]
    fn create_then_push() {
        let head = Oid::from_bytes(&[7; 20]).unwrap();
        let mut repo = MemoryRepository::new().with_head(head);

        repo.create_tag("1.0.0", repo.head().unwrap()).unwrap();
        repo.push_tag("1.0.0").unwrap();

        assert_eq!(repo.tag_target("1.0.0"), Some(head));
        assert_eq!(repo.pushed(), ["1.0.0".to_string()]);
        assert!(matches!(
            repo.create_tag("1.0.0", head),
            Err(Error::TagAlreadyExists(_))
        ));
    }

    #[test]
    fn pushing_unknown_tag_fails() {
        let mut repo = MemoryRepository::new();
        assert!(matches!(repo.push_tag("9.9.9"), Err(Error::Network(_))));
    }

    #[test]
    fn injected_failures() {
        let mut repo = MemoryRepository::new()
            .with_tags(["1.0.0"])
            .failing_fetch(Failure::Network)
            .failing_push(Failure::Auth);
        assert!(matches!(repo.fetch_tags(), Err(Error::Network(_))));
        assert!(matches!(repo.push_tag("1.0.0"), Err(Error::Auth(_))));
    }
}
