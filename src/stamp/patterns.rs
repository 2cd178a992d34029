use regex::Regex;
use std::collections::BTreeMap;

use crate::stamp::defaults::{GENERAL_DEFAULTS, LEGACY_EXTRA_DEFAULTS};
use crate::stamp::error::StampError;

pub const GENERAL: &str = "general";
pub const LEGACY: &str = "legacy";

// Train names: legacy "yyyy.<number>" / "yyyy.R<number>", current "yyyy.K<number>[.<number>]...".
const GENERAL_TRAIN: &str = r"\d{4}\.(R|K)?\d+[\d.]*";
// Older gamelet kernel builds only ever produced R trains.
const LEGACY_TRAIN: &str = r"\d{4}\.R+\d+";

// Candidate names have the format "<name>_RC<number>".
const RC_NUMBER: &str = r"_RC(\d+)$";

/// Uncompiled regex sources and defaults for one resolver flavour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSpec {
    pub kokoro_release_train: String,
    pub rapid_release_train: String,
    pub scm_branch_release_train: String,
    pub rapid_rc_number: String,
    pub defaults: BTreeMap<String, String>,
}

impl PatternSpec {
    fn for_train(train: &str, defaults: BTreeMap<String, String>) -> Self {
        Self {
            kokoro_release_train: format!("({train})/release"),
            rapid_release_train: format!(r"({train})_RC\d+$"),
            scm_branch_release_train: format!("^release/gamelet/({train})"),
            rapid_rc_number: RC_NUMBER.to_string(),
            defaults,
        }
    }

    pub fn general() -> Self {
        Self::for_train(GENERAL_TRAIN, owned(GENERAL_DEFAULTS))
    }

    pub fn legacy() -> Self {
        let mut defaults = owned(GENERAL_DEFAULTS);
        defaults.extend(owned(LEGACY_EXTRA_DEFAULTS));
        Self::for_train(LEGACY_TRAIN, defaults)
    }

    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            GENERAL => Some(Self::general()),
            LEGACY => Some(Self::legacy()),
            _ => None,
        }
    }

    pub fn compile(&self) -> Result<PatternSet, StampError> {
        Ok(PatternSet {
            kokoro_release_train: compile_one("kokoro_release_train", &self.kokoro_release_train)?,
            rapid_release_train: compile_one("rapid_release_train", &self.rapid_release_train)?,
            scm_branch_release_train: compile_one(
                "scm_branch_release_train",
                &self.scm_branch_release_train,
            )?,
            rapid_rc_number: compile_one("rapid_rc_number", &self.rapid_rc_number)?,
            defaults: self.defaults.clone(),
        })
    }
}

/// Compiled form of [`PatternSpec`], ready for the resolver.
#[derive(Debug, Clone)]
pub struct PatternSet {
    pub kokoro_release_train: Regex,
    pub rapid_release_train: Regex,
    pub scm_branch_release_train: Regex,
    pub rapid_rc_number: Regex,
    pub defaults: BTreeMap<String, String>,
}

impl PatternSet {
    pub fn general() -> Result<Self, StampError> {
        PatternSpec::general().compile()
    }

    pub fn legacy() -> Result<Self, StampError> {
        PatternSpec::legacy().compile()
    }
}

/// Returns capture group 1 of the leftmost match, if any.
pub fn first_group<'h>(re: &Regex, haystack: &'h str) -> Option<&'h str> {
    re.captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

fn compile_one(name: &'static str, src: &str) -> Result<Regex, StampError> {
    let re = Regex::new(src).map_err(|source| StampError::Pattern { name, source })?;
    if re.captures_len() < 2 {
        return Err(StampError::PatternMissingGroup(name));
    }
    Ok(re)
}

fn owned(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_kokoro_pattern_accepts_k_trains_with_dot_groups() {
        let set = PatternSet::general().unwrap();
        assert_eq!(
            first_group(&set.kokoro_release_train, "foo/2024.K17/release/bar"),
            Some("2024.K17")
        );
        assert_eq!(
            first_group(&set.kokoro_release_train, "prod/2023.K5.1.2/release"),
            Some("2023.K5.1.2")
        );
        assert_eq!(
            first_group(&set.kokoro_release_train, "x/2019.42/release"),
            Some("2019.42")
        );
    }

    #[test]
    fn legacy_kokoro_pattern_rejects_k_and_dot_groups() {
        let set = PatternSet::legacy().unwrap();
        assert_eq!(first_group(&set.kokoro_release_train, "foo/2024.K17/release"), None);
        assert_eq!(first_group(&set.kokoro_release_train, "foo/2019.42/release"), None);
        assert_eq!(
            first_group(&set.kokoro_release_train, "foo/2020.R3/release"),
            Some("2020.R3")
        );
        // The dotted suffix is not part of a legacy train, so "/release" must follow the digits.
        assert_eq!(first_group(&set.kokoro_release_train, "foo/2020.R3.1/release"), None);
    }

    #[test]
    fn rapid_patterns_are_end_anchored() {
        let set = PatternSet::general().unwrap();
        assert_eq!(first_group(&set.rapid_rc_number, "mybuild_RC42"), Some("42"));
        assert_eq!(first_group(&set.rapid_rc_number, "mybuild_RC42_extra"), None);
        assert_eq!(
            first_group(&set.rapid_release_train, "gamelet_2024.K3_RC07"),
            Some("2024.K3")
        );
        assert_eq!(first_group(&set.rapid_release_train, "gamelet_2024.K3_RC07x"), None);
    }

    #[test]
    fn scm_branch_pattern_is_start_anchored() {
        let set = PatternSet::general().unwrap();
        assert_eq!(
            first_group(&set.scm_branch_release_train, "release/gamelet/2022.R12"),
            Some("2022.R12")
        );
        assert_eq!(
            first_group(&set.scm_branch_release_train, "user/release/gamelet/2022.R12"),
            None
        );
    }

    #[test]
    fn legacy_defaults_add_scm_status() {
        let general = PatternSpec::general();
        let legacy = PatternSpec::legacy();
        assert_eq!(general.defaults.len(), 13);
        assert_eq!(legacy.defaults.len(), 14);
        assert_eq!(legacy.defaults.get("STABLE_BUILD_SCM_STATUS").map(String::as_str), Some(""));
        assert!(!general.defaults.contains_key("STABLE_BUILD_SCM_STATUS"));
    }

    #[test]
    fn compile_rejects_bad_regex_and_missing_group() {
        let mut spec = PatternSpec::general();
        spec.rapid_rc_number = "(".to_string();
        assert!(matches!(
            spec.compile(),
            Err(StampError::Pattern { name: "rapid_rc_number", .. })
        ));
        spec.rapid_rc_number = r"_RC\d+$".to_string();
        assert!(matches!(
            spec.compile(),
            Err(StampError::PatternMissingGroup("rapid_rc_number"))
        ));
    }

    #[test]
    fn builtin_lookup() {
        assert_eq!(PatternSpec::builtin("general"), Some(PatternSpec::general()));
        assert_eq!(PatternSpec::builtin("legacy"), Some(PatternSpec::legacy()));
        assert_eq!(PatternSpec::builtin("nope"), None);
    }
}
