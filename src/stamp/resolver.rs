use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::stamp::defaults::{
    BUILD_TIMESTAMP, BUILD_TIMESTAMP_FMT, STABLE_BUILD_SCM_BRANCH, STABLE_KOKORO_JOB_NAME,
    STABLE_RAPID_CANDIDATE_NAME, STABLE_RELEASE_CANDIDATE_NUMBER, STABLE_RELEASE_TRAIN,
    VARS_PLACEHOLDER,
};
use crate::stamp::error::StampError;
use crate::stamp::format::{render_template, serialize_vars, VarFormat};
use crate::stamp::patterns::{first_group, PatternSet};
use crate::stamp::status::{parse_status, StatusLine};
use crate::stamp::timestamp::format_build_timestamp;

/// Final variable mapping. Iteration order is the serialization order.
pub type VarMap = BTreeMap<String, String>;

/// Turns workspace status lines into the finished variable mapping.
#[derive(Debug, Clone)]
pub struct Resolver {
    patterns: PatternSet,
}

impl Resolver {
    pub fn new(patterns: PatternSet) -> Self {
        Self { patterns }
    }

    /// Resolves `(path, content)` pairs in the given order. Every file is
    /// parsed before anything is derived, so a malformed line anywhere fails
    /// the whole run.
    pub fn resolve<'a, I>(&self, sources: I) -> Result<VarMap, StampError>
    where
        I: IntoIterator<Item = (&'a Path, &'a str)>,
    {
        let mut parsed: Vec<StatusLine<'a>> = Vec::new();
        for (path, content) in sources {
            let lines = parse_status(path, content)?;
            debug!(path = %path.display(), lines = lines.len(), "parsed status file");
            parsed.extend(lines);
        }
        let vars = apply_status(self.seed(), parsed)?;
        self.derive(vars)
    }

    pub fn seed(&self) -> VarMap {
        self.patterns.defaults.clone()
    }

    /// Release train / RC number extraction followed by timestamp formatting.
    /// Later train matches win: kokoro job, then rapid candidate, then branch.
    pub fn derive(&self, mut vars: VarMap) -> Result<VarMap, StampError> {
        let p = &self.patterns;

        if let Some(train) = non_empty(&vars, STABLE_KOKORO_JOB_NAME)
            .and_then(|job| first_group(&p.kokoro_release_train, job))
            .map(str::to_string)
        {
            debug!(%train, "release train from kokoro job name");
            vars.insert(STABLE_RELEASE_TRAIN.to_string(), train);
        }

        if let Some(candidate) = non_empty(&vars, STABLE_RAPID_CANDIDATE_NAME).map(str::to_string) {
            if let Some(rc) = first_group(&p.rapid_rc_number, &candidate) {
                debug!(rc, "release candidate number from rapid candidate");
                vars.insert(STABLE_RELEASE_CANDIDATE_NUMBER.to_string(), rc.to_string());
            }
            if let Some(train) = first_group(&p.rapid_release_train, &candidate) {
                debug!(train, "release train from rapid candidate");
                vars.insert(STABLE_RELEASE_TRAIN.to_string(), train.to_string());
            }
        }

        if let Some(train) = non_empty(&vars, STABLE_BUILD_SCM_BRANCH)
            .and_then(|branch| first_group(&p.scm_branch_release_train, branch))
            .map(str::to_string)
        {
            debug!(%train, "release train from scm branch");
            vars.insert(STABLE_RELEASE_TRAIN.to_string(), train);
        }

        let raw = vars.get(BUILD_TIMESTAMP).map(String::as_str).unwrap_or("0");
        let formatted = format_build_timestamp(raw)?;
        vars.insert(BUILD_TIMESTAMP_FMT.to_string(), formatted);

        Ok(vars)
    }
}

/// Later lines overwrite earlier ones; unknown keys are added. The template
/// block name cannot be used as a key.
pub fn apply_status<'a, I>(mut vars: VarMap, lines: I) -> Result<VarMap, StampError>
where
    I: IntoIterator<Item = StatusLine<'a>>,
{
    for line in lines {
        if line.key == VARS_PLACEHOLDER {
            return Err(StampError::ReservedKey(line.key.to_string()));
        }
        vars.insert(line.key.to_string(), line.value.to_string());
    }
    Ok(vars)
}

/// Serializes `vars` through `format` and substitutes the result into `template`.
pub fn render(template: &str, format: &VarFormat, vars: &VarMap) -> Result<String, StampError> {
    let block = serialize_vars(format, vars);
    render_template(template, &block, vars)
}

fn non_empty<'m>(vars: &'m VarMap, key: &str) -> Option<&'m str> {
    vars.get(key).map(String::as_str).filter(|v| !v.is_empty())
}
