use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::str::FromStr;

use semver::{Prerelease, Version as Semver};

use crate::error::{Error, Result};

/// Label given to a release that becomes a candidate for the first time
const INITIAL_PRERELEASE: &str = "rc.0";

/// Pre-release label split into its text prefix and trailing counter.
///
/// `rc.9` is stored as (`rc.`, 9) and `beta` as (`beta`, none). Fields are
/// private so the split always comes from [`PreRelease::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreRelease {
    prefix: String,
    number: Option<u64>,
}

impl PreRelease {
    /// Splits a label at its trailing run of digits.
    ///
    /// A run starting with `0` only counts from its last zero, so `rc01`
    /// keeps printing as `rc01`.
    pub fn parse(label: &str) -> Self {
        let re = lazy_regex::regex!(r"^(.*?)(0|[1-9][0-9]*)$");
        let split = re.captures(label).and_then(|cap| {
            let number = cap[2].parse::<u64>().ok()?;
            Some((cap[1].to_string(), number))
        });
        match split {
            Some((prefix, number)) => PreRelease {
                prefix,
                number: Some(number),
            },
            None => PreRelease {
                prefix: label.to_string(),
                number: None,
            },
        }
    }

    pub fn initial() -> Self {
        Self::parse(INITIAL_PRERELEASE)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn number(&self) -> Option<u64> {
        self.number
    }

    /// Increments the trailing counter. A label without one gains `.0`.
    pub fn increment(&self) -> Self {
        match self.number {
            Some(number) => PreRelease {
                prefix: self.prefix.clone(),
                number: Some(number.saturating_add(1)),
            },
            None => PreRelease {
                prefix: format!("{}.", self.prefix),
                number: Some(0),
            },
        }
    }
}

impl Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)?;
        if let Some(number) = self.number {
            write!(f, "{}", number)?;
        }
        Ok(())
    }
}

impl Ord for PreRelease {
    fn cmp(&self, other: &Self) -> Ordering {
        let (ours, theirs) = (self.to_string(), other.to_string());
        match (Prerelease::new(&ours), Prerelease::new(&theirs)) {
            (Ok(ours), Ok(theirs)) => ours.cmp(&theirs),
            _ => ours.cmp(&theirs),
        }
    }
}

impl PartialOrd for PreRelease {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Semantic version as read from, and written to, a tag name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Option<PreRelease>,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre: None,
        }
    }

    /// Version assumed when a repository has no version tags yet
    pub fn zero() -> Self {
        Self::new(0, 0, 0)
    }

    /// Parses `MAJOR.MINOR.PATCH[-PRERELEASE]`
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || Error::InvalidVersionFormat(text.to_string());
        let semver = Semver::parse(text).map_err(|_| invalid())?;
        if !semver.build.is_empty() {
            return Err(invalid());
        }
        let pre = match semver.pre.as_str() {
            "" => None,
            label => Some(PreRelease::parse(label)),
        };
        Ok(Version {
            major: semver.major,
            minor: semver.minor,
            patch: semver.patch,
            pre,
        })
    }

    pub fn is_candidate(&self) -> bool {
        self.pre.is_some()
    }

    pub fn with_pre(mut self, pre: Option<PreRelease>) -> Self {
        self.pre = pre;
        self
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::zero()
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        Self::parse(text)
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| match (&self.pre, &other.pre) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(ours), Some(theirs)) => ours.cmp(theirs),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
