use std::path::Path;
use std::process::Command;

use git2::{ErrorCode, Oid, Repository};
use log::{debug, info};

use crate::error::{Error, Result};
use crate::git::TagRepository;

/// Messages git prints when the remote refuses our credentials
const AUTH_FAILURES: &[&str] = &[
    "authentication failed",
    "permission denied",
    "could not read username",
    "could not read password",
    "access denied",
];

/// Local repository opened through `git2`; network operations go through
/// the `git` executable so the user's credential setup applies.
pub struct GitRepository {
    repo: Repository,
    remote: String,
}

impl GitRepository {
    /// Opens the repository containing `path`
    pub fn open<P: AsRef<Path>>(path: P, remote: impl Into<String>) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(GitRepository {
            repo,
            remote: remote.into(),
        })
    }

    pub fn from_git2(repo: Repository, remote: impl Into<String>) -> Self {
        GitRepository {
            repo,
            remote: remote.into(),
        }
    }

    fn run_git(&self, args: &[&str]) -> Result<()> {
        let dir = self.repo.workdir().unwrap_or_else(|| self.repo.path());
        debug!("running git {} in {}", args.join(" "), dir.display());
        let output = Command::new("git").current_dir(dir).args(args).output()?;
        if output.status.success() {
            debug!("{}", String::from_utf8_lossy(&output.stdout).trim_end());
            Ok(())
        } else {
            Err(classify_failure(&String::from_utf8_lossy(&output.stderr)))
        }
    }
}

impl TagRepository for GitRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self
            .repo
            .tag_names(None)?
            .iter()
            .flatten()
            .map(String::from)
            .collect())
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        match self.repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(_) => Ok(true),
            Err(err) if err.code() == ErrorCode::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn head(&self) -> Result<Oid> {
        Ok(self.repo.head()?.peel_to_commit()?.id())
    }

    fn create_tag(&mut self, name: &str, target: Oid) -> Result<()> {
        if self.tag_exists(name)? {
            return Err(Error::TagAlreadyExists(name.to_string()));
        }
        let object = self.repo.find_object(target, None)?;
        self.repo
            .tag(name, &object, &self.repo.signature()?, name, false)?;
        info!("created tag {} at {:.7}", name, target);
        Ok(())
    }

    fn push_tag(&mut self, name: &str) -> Result<()> {
        info!("pushing {} to {}", name, self.remote);
        let refspec = format!("refs/tags/{0}:refs/tags/{0}", name);
        self.run_git(&["push", self.remote.as_str(), refspec.as_str()])
    }

    fn fetch_tags(&mut self) -> Result<()> {
        info!("fetching tags from {}", self.remote);
        self.run_git(&["fetch", self.remote.as_str(), "--tags"])
    }
}

/// Maps git's stderr to an authentication or a generic network error
fn classify_failure(stderr: &str) -> Error {
    let message = stderr.trim().to_string();
    let lowered = message.to_lowercase();
    if AUTH_FAILURES.iter().any(|needle| lowered.contains(needle)) {
        Error::Auth(message)
    } else {
        Error::Network(message)
    }
}
