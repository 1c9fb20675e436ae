pub mod bump;
pub mod config;
pub mod driver;
pub mod error;
pub mod git;
pub mod prompt;
pub mod tags;
pub mod version;

pub use bump::{bump, BumpLevel};
pub use config::Config;
pub use driver::{Driver, Outcome, Stage};
pub use error::{Error, Result};
pub use version::{PreRelease, Version};

use git::GitRepository;
use prompt::TerminalPrompter;

/// Runs against the git repository at `config.dir`, asking on the terminal
pub fn run(config: Config) -> Result<Outcome> {
    let repo = GitRepository::open(&config.dir, config.remote.as_str())?;
    Driver::new(repo, TerminalPrompter::default(), config).run()
}
