use thiserror::Error;

/// Faults that stop a run or a file. Declined matches are not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LintError {
    /// A rule that needs a type service was enabled without one.
    #[error(
        "rule `{rule}` requires type information, but type-aware analysis is disabled; enable `typeAware` or turn the rule off"
    )]
    TypeInformationRequired { rule: String },

    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    #[error("unknown preset `{0}`")]
    UnknownPreset(String),

    /// The file has syntax errors; no findings are reported for it.
    #[error("{file}:{line}:{column}: {message}")]
    Parse {
        file: String,
        line: u32,
        column: u32,
        message: String,
    },
}
