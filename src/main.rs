use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::error;

use bump::{BumpLevel, Config};

#[derive(Parser, Debug)]
#[clap(
    name = "bump",
    about = "Compute the next semantic version from git tags, then tag and push it"
)]
struct Args {
    /// Level to bump without asking: major, minor, patch, candidate (rc), promote or noop
    level: Option<String>,

    /// Turn the bumped version into a release candidate (not with candidate or promote)
    #[clap(long)]
    rc: bool,

    /// Create the tag without asking
    #[clap(long)]
    tag: bool,

    /// Do not create a tag
    #[clap(long, conflicts_with = "tag")]
    no_tag: bool,

    /// Push the tag without asking
    #[clap(long)]
    push: bool,

    /// Do not push the tag
    #[clap(long, conflicts_with = "push")]
    no_push: bool,

    /// Do not fetch tags from the remote first
    #[clap(long)]
    no_fetch: bool,

    /// Directory inside the repository
    #[clap(short = 'C', long, default_value = ".")]
    dir: PathBuf,

    /// Remote to fetch from and push to
    #[clap(long, default_value = "origin")]
    remote: String,

    /// Text in front of the version in tag names, e.g. "v"
    #[clap(long, default_value = "")]
    prefix: String,

    /// Log debug output
    #[clap(long)]
    verbose: bool,

    /// Print version information
    #[clap(short, long, action = clap::ArgAction::SetTrue)]
    version: bool,
}

impl Args {
    fn into_config(self) -> Result<Config> {
        let level = self
            .level
            .as_deref()
            .map(BumpLevel::parse)
            .transpose()?;
        if let Some(level @ (BumpLevel::Candidate | BumpLevel::Promote)) = level {
            if self.rc {
                bail!("--rc cannot be combined with the {} level", level);
            }
        }
        Ok(Config {
            dir: self.dir,
            remote: self.remote,
            tag_prefix: self.prefix,
            fetch: !self.no_fetch,
            level,
            candidate: self.rc,
            tag: switch(self.tag, self.no_tag),
            push: switch(self.push, self.no_push),
        })
    }
}

fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    if args.version {
        println!("bump {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if let Err(err) = try_main(args) {
        error!("{}", err);
        for (i, cause) in err.chain().skip(1).enumerate() {
            error!("  {}: {}", i + 1, cause);
        }
        std::process::exit(1);
    }
}

fn try_main(args: Args) -> Result<()> {
    let config = args.into_config()?;
    let dir = config.dir.clone();
    let outcome =
        bump::run(config).with_context(|| format!("failed to bump {}", dir.display()))?;
    println!("{}", outcome.version);
    Ok(())
}
