//! User directory: resolves user ids to display names.
//!
//! Accepts the workspace `users.json` export, either as a bare list of
//! profiles or wrapped in a `{"profile": [...]}` object.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::stats::UserCounts;
use crate::error::{ChatstatsError, Result};

/// One user of the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub real_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UsersFile {
    List(Vec<UserProfile>),
    Wrapped { profile: Vec<UserProfile> },
}

/// Lookup from user id to real name.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    names: HashMap<String, String>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_profiles(profiles: impl IntoIterator<Item = UserProfile>) -> Self {
        let names = profiles
            .into_iter()
            .filter_map(|p| p.real_name.map(|name| (p.id, name)))
            .collect();
        Self { names }
    }

    /// Parses a users export.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::Parse`] if the content is neither shape.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: UsersFile =
            serde_json::from_str(content).map_err(|e| ChatstatsError::users_parse(e, None))?;
        let profiles = match file {
            UsersFile::List(list) => list,
            UsersFile::Wrapped { profile } => profile,
        };
        Ok(Self::from_profiles(profiles))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content).map_err(|e| e.with_path(path))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// The real name for `id`, or `id` itself if unknown.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.name_of(id).unwrap_or(id)
    }

    /// Renames the keys of `counts` to display names, largest count first.
    ///
    /// Counts of ids sharing a display name are summed rather than letting
    /// one id's count replace another's, so no activity is dropped when two
    /// people have the same real name.
    pub fn map_counts(&self, counts: &UserCounts) -> Vec<(String, usize)> {
        let mut merged: HashMap<&str, usize> = HashMap::new();
        for (id, count) in counts {
            *merged.entry(self.display_name(id)).or_default() += count;
        }

        let mut named: Vec<(String, usize)> = merged
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        named.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        named
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_list() {
        let dir = UserDirectory::from_json_str(
            r#"[{"id": "U1", "real_name": "Ada"}, {"id": "U2", "real_name": "Grace", "tz": "UTC"}]"#,
        )
        .unwrap();
        assert_eq!(dir.len(), 2);
        assert_eq!(dir.name_of("U1"), Some("Ada"));
        assert_eq!(dir.display_name("U9"), "U9");
    }

    #[test]
    fn test_from_wrapped_profile() {
        let dir =
            UserDirectory::from_json_str(r#"{"profile": [{"id": "U1", "real_name": "Ada"}, {"id": "U3"}]}"#)
                .unwrap();
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.name_of("U3"), None);
    }

    #[test]
    fn test_invalid_users_file() {
        let err = UserDirectory::from_json_str(r#"{"members": 3}"#).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_from_path_attaches_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = UserDirectory::from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_map_counts() {
        let dir = UserDirectory::from_profiles(vec![
            UserProfile { id: "U1".into(), real_name: Some("Ada".into()) },
            UserProfile { id: "U2".into(), real_name: Some("Grace".into()) },
        ]);
        let counts: UserCounts = [("U1".to_string(), 1), ("U2".to_string(), 4), ("U7".to_string(), 2)]
            .into_iter()
            .collect();
        assert_eq!(
            dir.map_counts(&counts),
            vec![("Grace".to_string(), 4), ("U7".to_string(), 2), ("Ada".to_string(), 1)]
        );
    }

    #[test]
    fn test_map_counts_sums_shared_names() {
        let dir = UserDirectory::from_profiles(vec![
            UserProfile { id: "U1".into(), real_name: Some("Sam".into()) },
            UserProfile { id: "U2".into(), real_name: Some("Sam".into()) },
        ]);
        let counts: UserCounts = [("U1".to_string(), 3), ("U2".to_string(), 2)].into_iter().collect();
        assert_eq!(dir.map_counts(&counts), vec![("Sam".to_string(), 5)]);
    }
}
