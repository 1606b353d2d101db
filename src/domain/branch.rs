use regex::Regex;

use crate::error::{ReleaseHooksError, Result};

const VERSION_PLACEHOLDER: &str = "{version}";

/// Branch naming pattern (e.g., "v{version}", "d{version}")
#[derive(Debug, Clone)]
pub struct VersionPattern {
    pub pattern: String,
    regex: Regex,
}

impl VersionPattern {
    /// Compile a pattern. Everything except `{version}` is matched literally.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if !pattern.contains(VERSION_PLACEHOLDER) {
            return Err(ReleaseHooksError::config(format!(
                "Pattern '{}' must contain {{version}} placeholder",
                pattern
            )));
        }

        // Escape everything, then swap the escaped placeholder for a capture group
        let escaped = regex::escape(&pattern);
        let regex_pattern =
            escaped.replacen(r"\{version\}", r"([0-9]+\.[0-9]+\.[0-9]+)", 1);
        let regex = Regex::new(&format!("^{}$", regex_pattern)).map_err(|e| {
            ReleaseHooksError::config(format!("Invalid pattern '{}': {}", pattern, e))
        })?;

        Ok(VersionPattern { pattern, regex })
    }

    /// Returns the version captured from `name`, if it matches.
    pub fn capture(&self, name: &str) -> Option<String> {
        self.regex
            .captures(name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// The three naming rules a pushed branch is judged against.
#[derive(Debug, Clone)]
pub struct BranchPatterns {
    pub tag: VersionPattern,
    pub version_branch: VersionPattern,
    pub master: String,
}

impl BranchPatterns {
    pub fn new(tag: &str, version_branch: &str, master: &str) -> Result<Self> {
        if master.trim().is_empty() {
            return Err(ReleaseHooksError::config("master branch name cannot be empty"));
        }

        Ok(BranchPatterns {
            tag: VersionPattern::new(tag)?,
            version_branch: VersionPattern::new(version_branch)?,
            master: master.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    Tag,
    VersionBranch,
    Master,
    Other,
}

/// Metadata derived from the current branch name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchInfo {
    pub name: String,
    /// Version captured from a tag or version branch name
    pub version: Option<String>,
    pub is_tag: bool,
    pub is_version_branch: bool,
    pub is_master: bool,
}

impl BranchInfo {
    /// Classify a branch name. The tag pattern wins over the version branch pattern.
    pub fn classify(name: impl Into<String>, patterns: &BranchPatterns) -> Self {
        let name = name.into();

        if let Some(version) = patterns.tag.capture(&name) {
            return BranchInfo {
                name,
                version: Some(version),
                is_tag: true,
                is_version_branch: false,
                is_master: false,
            };
        }

        if let Some(version) = patterns.version_branch.capture(&name) {
            return BranchInfo {
                name,
                version: Some(version),
                is_tag: false,
                is_version_branch: true,
                is_master: false,
            };
        }

        let is_master = name == patterns.master;
        BranchInfo {
            name,
            version: None,
            is_tag: false,
            is_version_branch: false,
            is_master,
        }
    }

    pub fn kind(&self) -> BranchKind {
        if self.is_tag {
            BranchKind::Tag
        } else if self.is_version_branch {
            BranchKind::VersionBranch
        } else if self.is_master {
            BranchKind::Master
        } else {
            BranchKind::Other
        }
    }

    /// Tag or version branch
    pub fn is_release_candidate(&self) -> bool {
        self.is_tag || self.is_version_branch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(name: &str) -> BranchInfo {
        let patterns = BranchPatterns::new("v{version}", "d{version}", "master").unwrap();
        BranchInfo::classify(name, &patterns)
    }

    #[test]
    fn test_tag_branch() {
        let info = classify("v1.2.3");
        assert_eq!(info.kind(), BranchKind::Tag);
        assert_eq!(info.version.as_deref(), Some("1.2.3"));
        assert!(info.is_release_candidate());
    }

    #[test]
    fn test_tag_version_is_numeric_suffix() {
        for (name, version) in [("v0.0.1", "0.0.1"), ("v10.20.30", "10.20.30"), ("v01.2.3", "01.2.3")] {
            assert_eq!(classify(name).version.as_deref(), Some(version));
        }
    }

    #[test]
    fn test_version_branch() {
        let info = classify("d2.0.0");
        assert_eq!(info.kind(), BranchKind::VersionBranch);
        assert_eq!(info.version.as_deref(), Some("2.0.0"));
        assert!(!info.is_tag);
    }

    #[test]
    fn test_master_branch() {
        let info = classify("master");
        assert_eq!(info.kind(), BranchKind::Master);
        assert!(info.version.is_none());
        assert!(!info.is_release_candidate());
    }

    #[test]
    fn test_other_branches() {
        for name in ["main", "develop", "v1.2", "v1.2.3.4", "v1.2.3-rc1", "feature/v1.2.3", "V1.2.3"] {
            assert_eq!(classify(name).kind(), BranchKind::Other, "{}", name);
        }
    }

    #[test]
    fn test_non_ascii_digits_are_not_versions() {
        for name in ["v١.٢.٣", "d١.٢.٣", "v１.２.３"] {
            let info = classify(name);
            assert_eq!(info.kind(), BranchKind::Other, "{}", name);
            assert_eq!(info.version, None);
        }
    }

    #[test]
    fn test_custom_patterns() {
        let patterns = BranchPatterns::new("release-{version}", "dev/{version}", "main").unwrap();
        assert_eq!(
            BranchInfo::classify("release-1.0.0", &patterns).kind(),
            BranchKind::Tag
        );
        assert_eq!(
            BranchInfo::classify("dev/1.0.0", &patterns).kind(),
            BranchKind::VersionBranch
        );
        assert_eq!(BranchInfo::classify("main", &patterns).kind(), BranchKind::Master);
        assert_eq!(BranchInfo::classify("v1.0.0", &patterns).kind(), BranchKind::Other);
    }

    #[test]
    fn test_pattern_literal_characters_are_escaped() {
        let pattern = VersionPattern::new("v.{version}").unwrap();
        assert_eq!(pattern.capture("v.1.2.3").as_deref(), Some("1.2.3"));
        assert!(pattern.capture("vx1.2.3").is_none());
    }

    #[test]
    fn test_pattern_without_placeholder() {
        assert!(VersionPattern::new("release").is_err());
    }
}
