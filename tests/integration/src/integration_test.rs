//! End-to-end tests over the fixture repositories
//!
//! Exercises the complete flow: locate config -> resolve -> derived values,
//! for checkouts on disk and for committed git content, and hands a resolved
//! configuration to status collection.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use packit_config::{
    ActionCommand, ActionName, Error, JobConfigTriggerType, JobType, PackageConfig,
    get_local_package_config, get_package_config_from_repo,
};
use packit_fs::{NormalizedPath, io};
use packit_git::LocalGitProject;
use packit_status::{
    BodhiSource, CoprBuild, CoprSource, DistGitSource, KojiBuild, KojiSource, PullRequest,
    Status, StatusSources, UpdatePage,
};
use packit_test_utils::TestPackage;
use pretty_assertions::assert_eq;

/// Path to a fixture repository (relative to the workspace root).
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/repos")
        .join(name)
}

/// Copy the files of a fixture repository into a fresh temporary checkout.
fn checkout_of(name: &str) -> TestPackage {
    let dir = NormalizedPath::from(fixture(name));
    io::list_file_names(&dir)
        .unwrap()
        .into_iter()
        .fold(TestPackage::new(), |package, file| {
            let content = io::read_text(&dir.join(&file)).unwrap();
            package.with_file(&file, &content)
        })
}

fn load_fixture(name: &str, repo_name: Option<&str>) -> PackageConfig {
    get_local_package_config([fixture(name)], repo_name).expect("Fixture should load")
}

#[test]
fn test_ogr_fixture() {
    let config = load_fixture("ogr", None);

    assert_eq!(config.config_file_path.as_deref(), Some(".packit.yaml"));
    assert_eq!(config.specfile_path(), Some("python-ogr.spec"));
    assert_eq!(
        config.dist_git_package_url(),
        "https://src.fedoraproject.org/rpms/python-ogr.git"
    );
    assert_eq!(config.common.upstream_tag_template, "v{version}");
    assert!(matches!(
        config.common.actions.get(&ActionName::CreateArchive),
        Some(ActionCommand::Multiple(commands)) if commands.len() == 2
    ));

    let summary: Vec<(JobType, JobConfigTriggerType)> =
        config.jobs.iter().map(|job| (job.job_type, job.trigger)).collect();
    assert_eq!(
        summary,
        vec![
            (JobType::CoprBuild, JobConfigTriggerType::PullRequest),
            (JobType::Tests, JobConfigTriggerType::PullRequest),
            (JobType::ProposeDownstream, JobConfigTriggerType::Release),
            (JobType::CoprBuild, JobConfigTriggerType::Commit),
        ]
    );

    // Legacy nested metadata is read like top-level metadata.
    assert_eq!(config.jobs[0].metadata.targets, vec!["fedora-all"]);
    assert_eq!(config.jobs[3].metadata.owner.as_deref(), Some("packit"));
    assert_eq!(config.jobs[3].metadata.branch.as_deref(), Some("main"));

    assert!(config.common.create_pr);
    assert!(!config.jobs[2].common.create_pr);
    assert!(config.jobs.iter().all(|job| !job.common.notifications.pull_request.successful_build));

    // The spec file and the config itself are already synced.
    assert_eq!(config.common.synced_files.len(), 3);
    assert_eq!(config.get_all_files_to_sync(), config.common.synced_files);
}

#[test]
fn test_json_fixture_gets_default_jobs() {
    let config = load_fixture("json-config", Some("foo"));

    assert_eq!(config.config_file_path.as_deref(), Some("packit.json"));
    assert_eq!(config.jobs.len(), 3);
    assert!(config.jobs.iter().all(|job| !job.common.create_pr));

    let files: Vec<String> = config
        .get_all_files_to_sync()
        .iter()
        .map(|item| item.src.clone())
        .collect();
    assert_eq!(files, vec!["README.md", "foo.spec", "packit.json"]);
}

#[test]
fn test_spec_hint_fixture() {
    let config = load_fixture("spec-hint", Some("beer-repo"));

    assert_eq!(config.specfile_path(), Some("beer.spec"));
    assert_eq!(config.common.upstream_package_name.as_deref(), Some("beer"));
    assert_eq!(config.common.downstream_package_name.as_deref(), Some("beer-repo"));
    assert_eq!(
        config.downstream_project_url(),
        "https://src.fedoraproject.org/rpms/beer-repo.git"
    );

    // Synced by src only: the spec entry maps elsewhere, so the spec file
    // itself is still added.
    let srcs: Vec<String> = config
        .get_all_files_to_sync()
        .iter()
        .map(|item| item.src.clone())
        .collect();
    assert_eq!(srcs, vec!["packaging/beer.spec", "beer.spec", ".packit.yml"]);
}

#[test]
fn test_broken_fixture_is_a_parse_error() {
    let err = get_local_package_config([fixture("broken")], None).unwrap_err();
    assert!(matches!(err, Error::ConfigParse { .. }), "got: {err:?}");
}

#[test]
fn test_git_and_disk_agree() {
    let package = checkout_of("ogr");
    package.commit_all("import ogr fixture");
    let project = LocalGitProject::open(package.root()).unwrap();

    let from_git = get_package_config_from_repo(&project, "main")
        .unwrap()
        .expect("Config should be committed");
    let from_disk = get_local_package_config([package.root()], None).unwrap();

    assert_eq!(from_git, from_disk);
    assert_eq!(from_git, load_fixture("ogr", None));
}

#[test]
fn test_written_config_loads_back_equal() {
    let original = load_fixture("ogr", None);
    let yaml = serde_yaml::to_string(&original).unwrap();

    let package = TestPackage::new()
        .with_spec("python-ogr.spec")
        .with_file(".packit.yaml", &yaml);
    let reloaded = get_local_package_config([package.root()], None).unwrap();

    assert_eq!(reloaded, original);
}

// ==========================================================================
// Status over a resolved configuration
// ==========================================================================

#[derive(Default)]
struct RecordingServices {
    koji_package: Mutex<Option<String>>,
    bodhi_package: Mutex<Option<String>>,
}

#[async_trait]
impl DistGitSource for RecordingServices {
    async fn pull_requests(&self) -> packit_status::Result<Vec<PullRequest>> {
        Ok(Vec::new())
    }

    async fn branches(&self) -> packit_status::Result<Vec<String>> {
        Ok(vec!["rawhide".into()])
    }

    async fn spec_version(&self, _branch: &str) -> packit_status::Result<Option<String>> {
        Ok(Some("0.6.0".into()))
    }
}

#[async_trait]
impl KojiSource for RecordingServices {
    async fn completed_builds(
        &self,
        package: &str,
        _since: DateTime<Utc>,
    ) -> packit_status::Result<Vec<KojiBuild>> {
        *self.koji_package.lock().unwrap() = Some(package.into());
        Ok(vec![KojiBuild {
            nvr: format!("{package}-0.6.0-1.fc40"),
            completed_at: Utc::now(),
        }])
    }
}

#[async_trait]
impl BodhiSource for RecordingServices {
    async fn query_updates(&self, package: &str, _page: u32) -> packit_status::Result<UpdatePage> {
        *self.bodhi_package.lock().unwrap() = Some(package.into());
        Ok(UpdatePage::default())
    }
}

#[async_trait]
impl CoprSource for RecordingServices {
    async fn builds(&self, _limit: usize) -> packit_status::Result<Vec<CoprBuild>> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_status_uses_downstream_package_name() {
    let config = load_fixture("ogr", None);
    let services = RecordingServices::default();
    let status = Status::new(
        &config.common,
        StatusSources {
            dist_git: &services,
            upstream: None,
            koji: &services,
            bodhi: &services,
            copr: &services,
        },
    );

    let report = status.report().await.unwrap();

    assert_eq!(report.koji_builds["fc40"], "python-ogr-0.6.0-1.fc40");
    assert_eq!(report.dist_git_versions["rawhide"], "0.6.0");
    assert!(report.upstream_releases.is_empty());
    assert_eq!(services.koji_package.lock().unwrap().as_deref(), Some("python-ogr"));
    assert_eq!(services.bodhi_package.lock().unwrap().as_deref(), Some("python-ogr"));
}
