// Variable names the resolver reads or derives.
pub const BUILD_TIMESTAMP: &str = "BUILD_TIMESTAMP";
pub const BUILD_TIMESTAMP_FMT: &str = "BUILD_TIMESTAMP_FMT";
pub const STABLE_BUILD_SCM_BRANCH: &str = "STABLE_BUILD_SCM_BRANCH";
pub const STABLE_KOKORO_JOB_NAME: &str = "STABLE_KOKORO_JOB_NAME";
pub const STABLE_RAPID_CANDIDATE_NAME: &str = "STABLE_RAPID_CANDIDATE_NAME";
pub const STABLE_RELEASE_CANDIDATE_NUMBER: &str = "STABLE_RELEASE_CANDIDATE_NUMBER";
pub const STABLE_RELEASE_TRAIN: &str = "STABLE_RELEASE_TRAIN";

/// Placeholder name of the serialized variable block in templates.
pub const VARS_PLACEHOLDER: &str = "vars";

/// Keys every output carries even when no status file mentions them.
pub const GENERAL_DEFAULTS: &[(&str, &str)] = &[
    ("BUILD_EMBED_LABEL", ""),
    ("BUILD_HOST", ""),
    (BUILD_TIMESTAMP, "0"),
    ("BUILD_USER", ""),
    (STABLE_BUILD_SCM_BRANCH, ""),
    ("STABLE_BUILD_SCM_REVISION", ""),
    ("STABLE_KOKORO_BUILD_ID", ""),
    ("STABLE_KOKORO_BUILD_NUMBER", "0"),
    (STABLE_KOKORO_JOB_NAME, ""),
    ("STABLE_KOKORO_JOB_TYPE", ""),
    (STABLE_RAPID_CANDIDATE_NAME, ""),
    (STABLE_RELEASE_CANDIDATE_NUMBER, "0"),
    (STABLE_RELEASE_TRAIN, "0000.0"),
];

/// Added on top of [`GENERAL_DEFAULTS`] by the legacy gamelet kernel set.
pub const LEGACY_EXTRA_DEFAULTS: &[(&str, &str)] = &[("STABLE_BUILD_SCM_STATUS", "")];
