use console::{Style, Term};
use log::{debug, info};

use crate::bump::{bump, BumpLevel};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::git::TagRepository;
use crate::prompt::{confirm, Prompter};
use crate::tags::TagSet;
use crate::version::Version;

/// Where a run currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    LevelChosen,
    CandidateDecided,
    Tagged,
    Pushed,
    Done,
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub previous: Version,
    pub version: Version,
    pub tag: String,
    pub tagged: bool,
    pub pushed: bool,
}

/// Walks one run from reading tags to pushing the new one
pub struct Driver<R, P> {
    repo: R,
    prompter: P,
    config: Config,
}

struct Run {
    stage: Stage,
    latest: Version,
    next: Version,
    /// The level question already settled the candidate question
    candidate_settled: bool,
    tagged: bool,
    pushed: bool,
}

impl<R: TagRepository, P: Prompter> Driver<R, P> {
    pub fn new(repo: R, prompter: P, config: Config) -> Self {
        Driver {
            repo,
            prompter,
            config,
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn into_parts(self) -> (R, P) {
        (self.repo, self.prompter)
    }

    pub fn run(&mut self) -> Result<Outcome> {
        let mut run = Run {
            stage: Stage::Start,
            latest: Version::zero(),
            next: Version::zero(),
            candidate_settled: false,
            tagged: false,
            pushed: false,
        };
        while run.stage != Stage::Done {
            let stage = self.step(&mut run)?;
            debug!("{:?} -> {:?} ({})", run.stage, stage, run.next);
            run.stage = stage;
        }
        Ok(Outcome {
            tag: self.config.tag_name(&run.next),
            previous: run.latest,
            version: run.next,
            tagged: run.tagged,
            pushed: run.pushed,
        })
    }

    fn step(&mut self, run: &mut Run) -> Result<Stage> {
        match run.stage {
            Stage::Start => {
                run.latest = self.latest_version()?;
                run.next = self.choose_level(run)?;
                Ok(Stage::LevelChosen)
            }
            Stage::LevelChosen => {
                if !run.candidate_settled {
                    let level = self.candidate_level(&run.next)?;
                    run.next = bump(&run.next, level);
                }
                Ok(Stage::CandidateDecided)
            }
            Stage::CandidateDecided => {
                if !self.decide(self.config.tag, true, "Would you like to tag", &run.next)? {
                    return Ok(Stage::Done);
                }
                let name = self.config.tag_name(&run.next);
                let head = self.repo.head()?;
                self.repo.create_tag(&name, head)?;
                run.tagged = true;
                announce("Tagged version:", &name)?;
                Ok(Stage::Tagged)
            }
            Stage::Tagged => {
                if !self.decide(self.config.push, false, "Would you like to push", &run.next)? {
                    return Ok(Stage::Done);
                }
                let name = self.config.tag_name(&run.next);
                self.repo.push_tag(&name)?;
                run.pushed = true;
                announce("Pushed version:", &name)?;
                Ok(Stage::Pushed)
            }
            Stage::Pushed | Stage::Done => Ok(Stage::Done),
        }
    }

    fn latest_version(&mut self) -> Result<Version> {
        if self.config.fetch {
            self.repo.fetch_tags()?;
        }
        let tags = TagSet::from_names(self.repo.list_tags()?, &self.config.tag_prefix);
        let latest = tags.latest();
        info!("latest version is {} ({} version tags)", latest, tags.len());
        self.print_summary(&tags)?;
        Ok(latest)
    }

    fn choose_level(&mut self, run: &mut Run) -> Result<Version> {
        let latest = &run.latest;
        if let Some(level) = self.config.level {
            return Ok(bump(latest, level));
        }
        if latest.is_candidate() {
            let answer = self.prompter.ask(
                &format!(
                    "Current tag: {} - would you like to promote or bump [B/p]",
                    self.config.tag_name(latest)
                ),
                "b",
            )?;
            let level = match answer.trim().to_lowercase().as_str() {
                "p" | "promote" => BumpLevel::Promote,
                _ => BumpLevel::Candidate,
            };
            run.candidate_settled = true;
            return Ok(bump(latest, level));
        }
        let answer = self.prompter.ask(
            &format!(
                "Current tag: {} - how would you like to bump [major/minor/PATCH]",
                self.config.tag_name(latest)
            ),
            "patch",
        )?;
        Ok(bump(latest, BumpLevel::parse(&answer)?))
    }

    fn candidate_level(&mut self, next: &Version) -> Result<BumpLevel> {
        if self.config.candidate {
            return Ok(BumpLevel::Candidate);
        }
        if !self.config.interactive() {
            return Ok(BumpLevel::Noop);
        }
        let question = format!(
            "Next version: {} - would you release as a candidate first",
            self.config.tag_name(next)
        );
        if confirm(&mut self.prompter, &question, true)? {
            Ok(BumpLevel::Candidate)
        } else {
            Ok(BumpLevel::Noop)
        }
    }

    /// Uses the configured answer, asks when interactive, else `fallback`
    fn decide(
        &mut self,
        configured: Option<bool>,
        fallback: bool,
        question: &str,
        version: &Version,
    ) -> Result<bool> {
        if let Some(answer) = configured {
            return Ok(answer);
        }
        if !self.config.interactive() {
            return Ok(fallback);
        }
        let question = format!("{} {}", question, self.config.tag_name(version));
        confirm(&mut self.prompter, &question, true)
    }

    /// Prints latest tags to stderr
    fn print_summary(&self, tags: &TagSet) -> Result<()> {
        let term = Term::stderr();
        let tag_style = Style::new().yellow().bold();
        let mut lines = vec!["Latest tags:".to_string()];
        match tags.latest_release() {
            Some(version) => lines.push(format!(
                " {} release",
                tag_style.apply_to(format!("{: <14}", self.config.tag_name(version)))
            )),
            None => lines.push(" (no release yet)".to_string()),
        }
        for version in tags.pending_candidates() {
            lines.push(format!(
                " {} candidate",
                tag_style.apply_to(format!("{: <14}", self.config.tag_name(version)))
            ));
        }
        for line in lines {
            term.write_line(&line)?;
        }
        Ok(())
    }
}

fn announce(action: &str, tag: &str) -> Result<()> {
    let style = Style::new().green().bold().for_stderr();
    Term::stderr().write_line(&format!("{} {}", action, style.apply_to(tag)))?;
    Ok(())
}
