//! Attributes shared by a package and each of its jobs
//!
//! [`CommonPackageConfig`] is the fully resolved attribute set.
//! [`CommonOverrides`] is the same set with every field optional, as written
//! in a document. A job's attributes are the package's attributes with the
//! job's overrides laid over them by [`CommonPackageConfig::overlay`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;
use crate::actions::{ActionCommand, ActionName};
use crate::aliases::PROD_DISTGIT_URL;
use crate::notifications::NotificationsConfig;
use crate::sync_files::SyncFilesConfig;

fn default_dist_git_namespace() -> String {
    "rpms".to_string()
}

fn default_spec_source_id() -> String {
    "Source0".to_string()
}

fn default_upstream_tag_template() -> String {
    "{version}".to_string()
}

fn default_current_version_command() -> Vec<String> {
    ["git", "describe", "--tags", "--match", "*"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Overridable attributes as written in a document; `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonOverrides {
    pub specfile_path: Option<String>,
    pub synced_files: Option<SyncFilesConfig>,
    pub dist_git_namespace: Option<String>,
    pub upstream_project_url: Option<String>,
    pub upstream_package_name: Option<String>,
    pub downstream_project_url: Option<String>,
    pub downstream_package_name: Option<String>,
    pub dist_git_base_url: Option<String>,
    pub create_tarball_command: Option<Vec<String>>,
    pub current_version_command: Option<Vec<String>>,
    pub actions: Option<BTreeMap<ActionName, ActionCommand>>,
    pub upstream_ref: Option<String>,
    pub allowed_gpg_keys: Option<Vec<String>>,
    pub create_pr: Option<bool>,
    pub spec_source_id: Option<String>,
    pub upstream_tag_template: Option<String>,
    pub patch_generation_ignore_paths: Option<Vec<String>>,
    pub notifications: Option<NotificationsConfig>,
}

impl CommonOverrides {
    /// Document keys naming an overridable attribute.
    pub const KEYS: [&'static str; 18] = [
        "specfile_path",
        "synced_files",
        "dist_git_namespace",
        "upstream_project_url",
        "upstream_package_name",
        "downstream_project_url",
        "downstream_package_name",
        "dist_git_base_url",
        "create_tarball_command",
        "current_version_command",
        "actions",
        "upstream_ref",
        "allowed_gpg_keys",
        "create_pr",
        "spec_source_id",
        "upstream_tag_template",
        "patch_generation_ignore_paths",
        "notifications",
    ];
}

/// Resolved attributes of a package or of one job.
///
/// `downstream_project_url` holds only an explicitly configured URL. When it
/// is unset, [`CommonPackageConfig::downstream_project_url`] derives the URL
/// on first use and keeps returning that first value, even if the namespace
/// or package name change later.
#[derive(Debug, Clone, Serialize)]
pub struct CommonPackageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specfile_path: Option<String>,
    pub synced_files: SyncFilesConfig,
    pub dist_git_namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_project_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downstream_project_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downstream_package_name: Option<String>,
    pub dist_git_base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_tarball_command: Option<Vec<String>>,
    pub current_version_command: Vec<String>,
    pub actions: BTreeMap<ActionName, ActionCommand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_gpg_keys: Option<Vec<String>>,
    pub create_pr: bool,
    pub spec_source_id: String,
    pub upstream_tag_template: String,
    pub patch_generation_ignore_paths: Vec<String>,
    pub notifications: NotificationsConfig,

    #[serde(skip)]
    derived_downstream_project_url: OnceLock<String>,
}

impl Default for CommonPackageConfig {
    fn default() -> Self {
        Self {
            specfile_path: None,
            synced_files: SyncFilesConfig::default(),
            dist_git_namespace: default_dist_git_namespace(),
            upstream_project_url: None,
            upstream_package_name: None,
            downstream_project_url: None,
            downstream_package_name: None,
            dist_git_base_url: PROD_DISTGIT_URL.to_string(),
            create_tarball_command: None,
            current_version_command: default_current_version_command(),
            actions: BTreeMap::new(),
            upstream_ref: None,
            allowed_gpg_keys: None,
            create_pr: true,
            spec_source_id: default_spec_source_id(),
            upstream_tag_template: default_upstream_tag_template(),
            patch_generation_ignore_paths: Vec::new(),
            notifications: NotificationsConfig::default(),
            derived_downstream_project_url: OnceLock::new(),
        }
    }
}

impl CommonPackageConfig {
    /// Package-level attributes: defaults with `overrides` applied.
    pub fn from_overrides(overrides: &CommonOverrides) -> Self {
        Self::default().overlay(overrides)
    }

    /// A copy of `self` where every attribute given in `overrides` replaces
    /// the inherited one wholesale.
    ///
    /// Nested values are never merged: a job listing one synced file gets
    /// exactly that one, not the package's list plus it. The result owns
    /// its values, so changing it never affects `self`. A derived downstream
    /// URL is not carried over; the copy derives its own from its own
    /// attributes.
    pub fn overlay(&self, overrides: &CommonOverrides) -> Self {
        fn pick<T: Clone>(given: &Option<T>, inherited: &T) -> T {
            given.as_ref().unwrap_or(inherited).clone()
        }
        fn pick_opt<T: Clone>(given: &Option<T>, inherited: &Option<T>) -> Option<T> {
            given.as_ref().or(inherited.as_ref()).cloned()
        }
        // An empty value given explicitly falls back to the built-in default.
        fn pick_or<T: Clone>(
            given: &Option<T>,
            inherited: &T,
            is_empty: fn(&T) -> bool,
            fallback: fn() -> T,
        ) -> T {
            match given {
                Some(value) if is_empty(value) => fallback(),
                Some(value) => value.clone(),
                None => inherited.clone(),
            }
        }

        Self {
            specfile_path: pick_opt(&overrides.specfile_path, &self.specfile_path),
            synced_files: pick(&overrides.synced_files, &self.synced_files),
            dist_git_namespace: pick_or(
                &overrides.dist_git_namespace,
                &self.dist_git_namespace,
                String::is_empty,
                default_dist_git_namespace,
            ),
            upstream_project_url: pick_opt(
                &overrides.upstream_project_url,
                &self.upstream_project_url,
            ),
            upstream_package_name: pick_opt(
                &overrides.upstream_package_name,
                &self.upstream_package_name,
            ),
            downstream_project_url: pick_opt(
                &overrides.downstream_project_url,
                &self.downstream_project_url,
            ),
            downstream_package_name: pick_opt(
                &overrides.downstream_package_name,
                &self.downstream_package_name,
            ),
            dist_git_base_url: pick_or(
                &overrides.dist_git_base_url,
                &self.dist_git_base_url,
                String::is_empty,
                || PROD_DISTGIT_URL.to_string(),
            ),
            create_tarball_command: pick_opt(
                &overrides.create_tarball_command,
                &self.create_tarball_command,
            ),
            current_version_command: pick_or(
                &overrides.current_version_command,
                &self.current_version_command,
                Vec::is_empty,
                default_current_version_command,
            ),
            actions: pick(&overrides.actions, &self.actions),
            upstream_ref: pick_opt(&overrides.upstream_ref, &self.upstream_ref),
            allowed_gpg_keys: pick_opt(&overrides.allowed_gpg_keys, &self.allowed_gpg_keys),
            create_pr: pick(&overrides.create_pr, &self.create_pr),
            spec_source_id: pick(&overrides.spec_source_id, &self.spec_source_id),
            upstream_tag_template: pick(
                &overrides.upstream_tag_template,
                &self.upstream_tag_template,
            ),
            patch_generation_ignore_paths: pick(
                &overrides.patch_generation_ignore_paths,
                &self.patch_generation_ignore_paths,
            ),
            notifications: pick(&overrides.notifications, &self.notifications),
            derived_downstream_project_url: OnceLock::new(),
        }
    }

    /// `{dist_git_base_url}{dist_git_namespace}/{downstream_package_name}.git`,
    /// computed from the current values on every call.
    ///
    /// An unset package name renders as `None`, which is what an unresolved
    /// configuration would point at.
    pub fn dist_git_package_url(&self) -> String {
        format!(
            "{}{}/{}.git",
            self.dist_git_base_url,
            self.dist_git_namespace,
            self.downstream_package_name.as_deref().unwrap_or("None"),
        )
    }

    /// The explicit downstream URL, or the dist-git URL as it was the first
    /// time this was called.
    pub fn downstream_project_url(&self) -> &str {
        match self.downstream_project_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => self
                .derived_downstream_project_url
                .get_or_init(|| self.dist_git_package_url()),
        }
    }

    /// What [`Self::downstream_project_url`] returns, without deriving and
    /// caching a value when none is cached yet.
    pub fn effective_downstream_project_url(&self) -> String {
        match self.downstream_project_url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => match self.derived_downstream_project_url.get() {
                Some(cached) => cached.clone(),
                None => self.dist_git_package_url(),
            },
        }
    }

    /// Whether the downstream URL has already been derived and cached.
    pub fn is_downstream_project_url_cached(&self) -> bool {
        self.derived_downstream_project_url.get().is_some()
    }

    /// Canonical serialized form, the basis of equality.
    pub fn canonical_form(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl PartialEq for CommonPackageConfig {
    fn eq(&self, other: &Self) -> bool {
        match (self.canonical_form(), other.canonical_form()) {
            (Ok(ours), Ok(theirs)) => ours == theirs,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync_files::SyncFilesItem;
    use pretty_assertions::assert_eq;

    fn package_level() -> CommonPackageConfig {
        CommonPackageConfig::from_overrides(&CommonOverrides {
            specfile_path: Some("foo.spec".into()),
            synced_files: Some(SyncFilesConfig::new(vec![SyncFilesItem::same_path(
                "README.md",
            )])),
            downstream_package_name: Some("foo".into()),
            create_pr: Some(false),
            ..Default::default()
        })
    }

    #[test]
    fn defaults() {
        let config = CommonPackageConfig::default();
        assert_eq!(config.dist_git_namespace, "rpms");
        assert_eq!(config.dist_git_base_url, PROD_DISTGIT_URL);
        assert!(config.create_pr);
        assert_eq!(config.spec_source_id, "Source0");
        assert_eq!(config.upstream_tag_template, "{version}");
        assert_eq!(
            config.current_version_command,
            vec!["git", "describe", "--tags", "--match", "*"]
        );
        assert!(config.notifications.pull_request.successful_build);
    }

    #[test]
    fn overlay_without_overrides_is_a_copy() {
        let base = package_level();
        let job = base.overlay(&CommonOverrides::default());
        assert_eq!(job, base);
    }

    #[test]
    fn overlay_replaces_collections_wholesale() {
        let base = package_level();
        let job = base.overlay(&CommonOverrides {
            synced_files: Some(SyncFilesConfig::new(vec![SyncFilesItem::same_path(
                "CHANGELOG.md",
            )])),
            ..Default::default()
        });

        assert_eq!(
            job.synced_files.files(),
            &[SyncFilesItem::same_path("CHANGELOG.md")]
        );
        assert!(!job.create_pr);
        assert_eq!(job.specfile_path.as_deref(), Some("foo.spec"));
    }

    #[test]
    fn overlay_copies_are_independent() {
        let base = package_level();
        let mut job = base.overlay(&CommonOverrides::default());
        job.synced_files.push(SyncFilesItem::same_path("extra"));
        job.actions
            .insert(ActionName::PreSync, ActionCommand::Single("true".into()));

        assert_eq!(base.synced_files.len(), 1);
        assert!(base.actions.is_empty());
    }

    #[test]
    fn dist_git_package_url_is_live() {
        let mut config = package_level();
        assert_eq!(
            config.dist_git_package_url(),
            "https://src.fedoraproject.org/rpms/foo.git"
        );
        config.dist_git_namespace = "modules".into();
        assert_eq!(
            config.dist_git_package_url(),
            "https://src.fedoraproject.org/modules/foo.git"
        );
    }

    #[test]
    fn derived_downstream_url_is_computed_once() {
        let mut config = package_level();
        assert!(!config.is_downstream_project_url_cached());

        let first = config.downstream_project_url().to_string();
        assert!(config.is_downstream_project_url_cached());

        config.downstream_package_name = Some("bar".into());
        config.dist_git_namespace = "tests".into();
        assert_eq!(config.downstream_project_url(), first);
        assert_ne!(config.dist_git_package_url(), first);
    }

    #[test]
    fn explicit_downstream_url_wins() {
        let mut config = package_level();
        config.downstream_project_url = Some("https://example.com/foo.git".into());
        assert_eq!(config.downstream_project_url(), "https://example.com/foo.git");
        assert!(!config.is_downstream_project_url_cached());
    }

    #[test]
    fn empty_dist_git_values_fall_back_to_defaults() {
        let config = package_level().overlay(&CommonOverrides {
            dist_git_namespace: Some(String::new()),
            dist_git_base_url: Some(String::new()),
            current_version_command: Some(Vec::new()),
            ..Default::default()
        });

        assert_eq!(config.dist_git_namespace, "rpms");
        assert_eq!(config.dist_git_base_url, PROD_DISTGIT_URL);
        assert_eq!(config.current_version_command, default_current_version_command());
        assert_eq!(
            config.dist_git_package_url(),
            "https://src.fedoraproject.org/rpms/foo.git"
        );
    }

    #[test]
    fn empty_override_ignores_inherited_value() {
        let base = package_level().overlay(&CommonOverrides {
            dist_git_namespace: Some("modules".into()),
            ..Default::default()
        });
        let job = base.overlay(&CommonOverrides {
            dist_git_namespace: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(job.dist_git_namespace, "rpms");
    }

    #[test]
    fn effective_url_does_not_cache() {
        let config = package_level();
        assert_eq!(
            config.effective_downstream_project_url(),
            "https://src.fedoraproject.org/rpms/foo.git"
        );
        assert!(!config.is_downstream_project_url_cached());
    }

    #[test]
    fn cache_does_not_affect_equality() {
        let a = package_level();
        let b = package_level();
        let _ = a.downstream_project_url();
        assert_eq!(a, b);
    }
}
