use crate::ast::NodeKind;
use crate::frontend::InputFormat;
use crate::prune::COMMENT_KINDS;
use serde::Deserialize;
use std::fmt;

/// Settings read from `solq.toml`.
///
/// ```toml
/// [parse]
/// format = "auto"        # "auto" | "solidity" | "json"
///
/// [prune]
/// kinds = ["Comment", "LineComment", "BlockComment"]
/// ```
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct SolqConfig {
    #[serde(default)]
    pub parse: ParseSettings,
    #[serde(default)]
    pub prune: PruneSettings,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ParseSettings {
    #[serde(default)]
    pub format: InputFormat,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct PruneSettings {
    /// Node kinds removed before comparison, by type name.
    #[serde(default = "default_prune_kinds")]
    pub kinds: Vec<String>,
}

impl Default for PruneSettings {
    fn default() -> Self {
        Self {
            kinds: default_prune_kinds(),
        }
    }
}

fn default_prune_kinds() -> Vec<String> {
    COMMENT_KINDS.iter().map(|k| k.as_str().to_string()).collect()
}

impl SolqConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        for (index, kind) in self.prune.kinds.iter().enumerate() {
            if kind.trim().is_empty() {
                issues.push(ValidationIssue::EmptyKind { index });
            } else if kind.trim() != kind {
                issues.push(ValidationIssue::PaddedKind { kind: kind.clone() });
            }
        }

        if self.prune.kinds.iter().any(|k| k == "SourceUnit") {
            issues.push(ValidationIssue::RootKind);
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    /// Kinds to prune, mapped onto the node model.
    pub fn prune_kinds(&self) -> Vec<NodeKind> {
        self.prune
            .kinds
            .iter()
            .map(|k| NodeKind::from_type_name(k))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone)]
pub enum ValidationIssue {
    EmptyKind { index: usize },
    PaddedKind { kind: String },
    RootKind,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyKind { index } => {
                write!(f, "prune.kinds[{index}] is empty")
            }
            ValidationIssue::PaddedKind { kind } => {
                write!(f, "prune kind '{kind}' has surrounding whitespace")
            }
            ValidationIssue::RootKind => {
                write!(f, "prune kind 'SourceUnit' would remove the whole tree")
            }
        }
    }
}
