use std::path::PathBuf;

use crate::bump::BumpLevel;

/// Everything a run needs to know up front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory inside the repository
    pub dir: PathBuf,
    pub remote: String,
    /// Text in front of the version in tag names, e.g. `v`
    pub tag_prefix: String,
    pub fetch: bool,
    /// Level to apply without asking. Unset means interactive.
    pub level: Option<BumpLevel>,
    /// Turn the result into a candidate without asking
    pub candidate: bool,
    /// Unset means ask, or tag when not interactive
    pub tag: Option<bool>,
    /// Unset means ask, or skip pushing when not interactive
    pub push: Option<bool>,
}

impl Config {
    pub fn interactive(&self) -> bool {
        self.level.is_none()
    }

    pub fn tag_name(&self, version: &impl std::fmt::Display) -> String {
        format!("{}{}", self.tag_prefix, version)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dir: PathBuf::from("."),
            remote: "origin".to_string(),
            tag_prefix: String::new(),
            fetch: true,
            level: None,
            candidate: false,
            tag: None,
            push: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Version;

    #[test]
    fn defaults_to_interactive_with_fetch() {
        let config = Config::default();
        assert!(config.interactive());
        assert!(config.fetch);
        assert_eq!(config.remote, "origin");
    }

    #[test]
    fn tag_name_carries_prefix() {
        let config = Config {
            tag_prefix: "v".to_string(),
            level: Some(BumpLevel::Patch),
            ..Config::default()
        };
        assert!(!config.interactive());
        assert_eq!(config.tag_name(&Version::new(1, 2, 3)), "v1.2.3");
    }
}
