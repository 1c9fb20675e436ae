use std::str::FromStr;

use strum_macros::{Display, EnumString, EnumVariantNames};

use crate::error::{Error, Result};
use crate::version::{PreRelease, Version};

/// How a version moves forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumVariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum BumpLevel {
    Major,
    Minor,
    Patch,
    #[strum(to_string = "candidate", serialize = "rc")]
    Candidate,
    Promote,
    Noop,
}

impl BumpLevel {
    /// Parses a level name, ignoring case and surrounding whitespace
    pub fn parse(text: &str) -> Result<Self> {
        BumpLevel::from_str(&text.trim().to_lowercase())
            .map_err(|_| Error::InvalidLevel(text.to_string()))
    }
}

/// Computes the version following `version` at `level`.
///
/// `Candidate` and `Promote` leave the numeric fields alone; bumping a number
/// and starting a candidate are two separate calls.
pub fn bump(version: &Version, level: BumpLevel) -> Version {
    let mut next = version.clone();
    match level {
        BumpLevel::Major => {
            next.major = next.major.saturating_add(1);
            next.minor = 0;
            next.patch = 0;
            next.pre = None;
        }
        BumpLevel::Minor => {
            next.minor = next.minor.saturating_add(1);
            next.patch = 0;
            next.pre = None;
        }
        BumpLevel::Patch => {
            next.patch = next.patch.saturating_add(1);
            next.pre = None;
        }
        BumpLevel::Promote => {
            next.pre = None;
        }
        BumpLevel::Candidate => {
            next.pre = Some(match &version.pre {
                Some(pre) => pre.increment(),
                None => PreRelease::initial(),
            });
        }
        BumpLevel::Noop => {}
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn bumped(input: &str, level: &str) -> String {
        let version = Version::parse(input).unwrap();
        bump(&version, BumpLevel::parse(level).unwrap()).to_string()
    }

    #[test]
    fn bumps_reference_scenarios() {
        let cases = [
            ("0.1.1", "patch", "0.1.2"),
            ("0.1.1", "minor", "0.2.0"),
            ("0.5.2", "major", "1.0.0"),
            ("0.1.1-rc.0", "patch", "0.1.2"),
            ("0.1.1-rc.10", "minor", "0.2.0"),
            ("0.5.2-rc.20", "major", "1.0.0"),
            ("0.1.1-rc.0", "candidate", "0.1.1-rc.1"),
            ("0.1.1", "candidate", "0.1.1-rc.0"),
            ("0.5.2-rc.20", "noop", "0.5.2-rc.20"),
        ];
        for (input, level, expected) in cases {
            assert_eq!(bumped(input, level), expected, "{} at {}", input, level);
        }
    }

    #[test]
    fn candidate_keeps_label_prefix() {
        assert_eq!(bumped("1.0.0-rc.9", "candidate"), "1.0.0-rc.10");
        assert_eq!(bumped("1.0.0-alpha1", "candidate"), "1.0.0-alpha2");
        assert_eq!(bumped("1.0.0-beta", "candidate"), "1.0.0-beta.0");
        assert_eq!(bumped("1.0.0-rc9", "candidate"), "1.0.0-rc10");
    }

    #[test]
    fn promote_clears_prerelease_only() {
        assert_eq!(bumped("2.3.4-rc.7", "promote"), "2.3.4");
        assert_eq!(bumped("2.3.4", "promote"), "2.3.4");
    }

    #[test]
    fn numeric_bump_then_candidate() {
        let released = Version::parse("0.4.9").unwrap();
        let next = bump(&bump(&released, BumpLevel::Minor), BumpLevel::Candidate);
        assert_eq!(next.to_string(), "0.5.0-rc.0");
    }

    #[test]
    fn parses_level_names() {
        assert_eq!(BumpLevel::parse("major").unwrap(), BumpLevel::Major);
        assert_eq!(BumpLevel::parse(" Minor ").unwrap(), BumpLevel::Minor);
        assert_eq!(BumpLevel::parse("PATCH").unwrap(), BumpLevel::Patch);
        assert_eq!(BumpLevel::parse("rc").unwrap(), BumpLevel::Candidate);
        assert_eq!(BumpLevel::parse("candidate").unwrap(), BumpLevel::Candidate);
        assert_eq!(BumpLevel::parse("promote").unwrap(), BumpLevel::Promote);
        assert_eq!(BumpLevel::parse("noop").unwrap(), BumpLevel::Noop);
        assert_eq!(BumpLevel::Candidate.to_string(), "candidate");
    }

    #[test]
    fn rejects_unknown_level() {
        match BumpLevel::parse("huge") {
            Err(Error::InvalidLevel(level)) => assert_eq!(level, "huge"),
            other => panic!("expected InvalidLevel, got {:?}", other),
        }
        assert!(BumpLevel::parse("").is_err());
    }

    fn any_version() -> impl Strategy<Value = Version> {
        (
            0u64..1_000,
            0u64..1_000,
            0u64..1_000,
            proptest::option::of("(rc|alpha|beta)(\\.(0|[1-9][0-9]{0,3})|[0-9]{0,3})"),
        )
            .prop_map(|(major, minor, patch, label)| {
                Version::new(major, minor, patch).with_pre(label.as_deref().map(PreRelease::parse))
            })
    }

    proptest! {
        #[test]
        fn noop_is_identity(version in any_version()) {
            prop_assert_eq!(bump(&version, BumpLevel::Noop), version);
        }

        #[test]
        fn major_resets_lower_fields(version in any_version()) {
            let next = bump(&version, BumpLevel::Major);
            prop_assert_eq!(next.major, version.major + 1);
            prop_assert_eq!(next.minor, 0);
            prop_assert_eq!(next.patch, 0);
            prop_assert!(next.pre.is_none());
        }

        #[test]
        fn promote_never_leaves_a_candidate(version in any_version()) {
            prop_assert!(!bump(&version, BumpLevel::Promote).is_candidate());
        }

        #[test]
        fn candidate_always_yields_a_candidate(version in any_version()) {
            let next = bump(&version, BumpLevel::Candidate);
            prop_assert!(next.is_candidate());
            prop_assert_ne!(&next, &version);
            // rc9 -> rc10 compares as text, so only dotted counters must order after
            let dotted = version.pre.as_ref().map_or(true, |pre| pre.prefix().ends_with('.'));
            if dotted {
                prop_assert!(next > version);
            }
        }

        #[test]
        fn numeric_levels_move_forward(version in any_version()) {
            for level in [BumpLevel::Major, BumpLevel::Minor, BumpLevel::Patch] {
                prop_assert!(bump(&version, level) > version);
            }
        }
    }
}
