use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use htmlwhitelist::{AllowList, PolicyFlags, SanitizePolicy};
use serde::{Deserialize, Serialize};

/// JSON form of a [`SanitizePolicy`]:
///
/// ```json
/// {
///   "tags": { "a": ["href", "title"], "br": [] },
///   "allow_javascript_prefix": false,
///   "allow_querystring": true
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyFile {
    #[serde(default)]
    pub tags: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub allow_javascript_prefix: bool,
    #[serde(default)]
    pub allow_querystring: bool,
}

impl PolicyFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read policy file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse policy file {}", path.display()))
    }

    pub fn flags(&self) -> PolicyFlags {
        let mut flags = PolicyFlags::empty();
        flags.set(PolicyFlags::ALLOW_JAVASCRIPT_PREFIX, self.allow_javascript_prefix);
        flags.set(PolicyFlags::ALLOW_QUERYSTRING, self.allow_querystring);
        flags
    }
}

impl From<PolicyFile> for SanitizePolicy {
    fn from(file: PolicyFile) -> Self {
        let flags = file.flags();
        let allow_list: AllowList = file.tags.into_iter().collect();
        SanitizePolicy::new(allow_list, flags)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_policy_file() {
        let file = write_temp(
            r#"{"tags": {"a": ["href"], "br": []}, "allow_querystring": true}"#,
        );
        let policy_file = PolicyFile::load(file.path()).unwrap();
        assert!(!policy_file.allow_javascript_prefix);

        let policy = SanitizePolicy::from(policy_file);
        assert_eq!(policy.flags, PolicyFlags::ALLOW_QUERYSTRING);
        assert!(policy.allow_list.is_attribute_allowed("a", "href"));
        assert!(policy.allow_list.is_tag_allowed("br"));
    }

    #[test]
    fn test_empty_object_is_strictest_policy() {
        let file = write_temp("{}");
        let policy = SanitizePolicy::from(PolicyFile::load(file.path()).unwrap());
        assert!(policy.allow_list.is_empty());
        assert_eq!(policy.flags, PolicyFlags::empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let file = write_temp(r#"{"tags": {}, "allow_scripts": true}"#);
        let err = PolicyFile::load(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("allow_scripts"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PolicyFile::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read policy file"));
    }
}
