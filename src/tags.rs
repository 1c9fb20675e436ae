use std::collections::BTreeSet;

use log::debug;

use crate::version::Version;

/// Versions found among a repository's tag names
#[derive(Debug, Clone, Default)]
pub struct TagSet {
    versions: BTreeSet<Version>,
}

impl TagSet {
    /// Builds the set from tag names, stripping `prefix` first.
    ///
    /// Names without the prefix or that do not parse are skipped.
    pub fn from_names<I, S>(names: I, prefix: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let versions = names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref();
                let parsed = name
                    .strip_prefix(prefix)
                    .and_then(|text| Version::parse(text).ok());
                if parsed.is_none() {
                    debug!("skipping tag {}", name);
                }
                parsed
            })
            .collect();
        TagSet { versions }
    }

    /// Highest version, or `0.0.0` when there are none
    pub fn latest(&self) -> Version {
        self.versions.iter().next_back().cloned().unwrap_or_default()
    }

    pub fn latest_release(&self) -> Option<&Version> {
        self.versions
            .iter()
            .rev()
            .find(|version| !version.is_candidate())
    }

    /// Candidates newer than the latest release
    pub fn pending_candidates(&self) -> impl Iterator<Item = &Version> {
        let floor = self.latest_release().cloned().unwrap_or_default();
        self.versions
            .iter()
            .filter(move |version| version.is_candidate() && **version > floor)
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.versions.contains(version)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}
