//! Tests for locating configs on disk and in git projects

use packit_config::{
    Error, JobType, LocalConfigLocator, get_local_package_config, get_package_config_from_repo,
    get_specfile_path_from_repo,
};
use packit_git::LocalGitProject;
use packit_test_utils::{TestPackage, git};

const CONFIG: &str = r#"
specfile_path: fedora/foo.spec
synced_files:
  - README.md
jobs:
  - job: copr_build
    trigger: pull_request
    targets: [fedora-rawhide-x86_64]
"#;

mod local_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_loads_hidden_yaml() {
        let package = TestPackage::new()
            .with_spec("fedora/foo.spec")
            .with_file(".packit.yaml", CONFIG);

        let config =
            get_local_package_config([package.root()], Some("foo")).expect("Should load config");

        assert_eq!(config.config_file_path.as_deref(), Some(".packit.yaml"));
        assert_eq!(config.specfile_path(), Some("fedora/foo.spec"));
        assert_eq!(config.common.upstream_package_name.as_deref(), Some("foo"));
        assert_eq!(config.jobs.len(), 1);
        assert_eq!(config.jobs[0].job_type, JobType::CoprBuild);
    }

    #[test]
    fn test_name_priority() {
        let package = TestPackage::new()
            .with_file("packit.json", r#"{"specfile_path": "json.spec"}"#)
            .with_file(".packit.yml", "specfile_path: yml.spec\n");

        let config = get_local_package_config([package.root()], None).expect("Should load");
        assert_eq!(config.config_file_path.as_deref(), Some(".packit.yml"));
        assert_eq!(config.specfile_path(), Some("yml.spec"));
    }

    #[test]
    fn test_json_config() {
        let package = TestPackage::new()
            .with_spec("foo.spec")
            .with_file("packit.json", r#"{"jobs": []}"#);

        let config = get_local_package_config([package.root()], None).expect("Should load");
        assert_eq!(config.config_file_path.as_deref(), Some("packit.json"));
        assert_eq!(config.specfile_path(), Some("foo.spec"));
        assert!(config.jobs.is_empty());
    }

    #[test]
    fn test_spec_found_in_searched_directory() {
        let package = TestPackage::new()
            .with_spec("b.spec")
            .with_spec("a.spec")
            .with_file(".packit.yaml", "jobs: []\n");

        let config = get_local_package_config([package.root()], None).expect("Should load");
        assert_eq!(config.specfile_path(), Some("a.spec"));
    }

    #[test]
    fn test_first_directory_with_config_wins() {
        let empty = TestPackage::new();
        let first = TestPackage::new().with_file(".packit.yaml", "specfile_path: first.spec\n");
        let second = TestPackage::new().with_file(".packit.yaml", "specfile_path: second.spec\n");

        let config = get_local_package_config([empty.root(), first.root(), second.root()], None)
            .expect("Should load");
        assert_eq!(config.specfile_path(), Some("first.spec"));
    }

    #[test]
    fn test_not_found() {
        let package = TestPackage::new().with_spec("foo.spec");

        let err = get_local_package_config([package.root()], None).unwrap_err();
        match err {
            Error::ConfigNotFound { searched } => {
                assert_eq!(searched.len(), 1);
                assert!(searched[0].ends_with(package.root().file_name().unwrap()));
            }
            other => panic!("Expected ConfigNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let package = TestPackage::new().with_file(".packit.yaml", "jobs: [unterminated\n");

        let err = get_local_package_config([package.root()], None).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }), "got: {err:?}");
    }

    #[test]
    fn test_missing_spec_everywhere() {
        let package = TestPackage::new().with_file(".packit.yaml", "jobs: []\n");

        let err = get_local_package_config([package.root()], None).unwrap_err();
        assert!(matches!(err, Error::MissingSpecFile), "got: {err:?}");
    }

    #[test]
    fn test_current_dir_searched_first() {
        let listed = TestPackage::new().with_file(".packit.yaml", "specfile_path: listed.spec\n");
        let cwd = TestPackage::new().with_file(".packit.yaml", "specfile_path: cwd.spec\n");

        let config = LocalConfigLocator::new([listed.root()])
            .with_current_dir(cwd.root())
            .try_local_dir_first(true)
            .locate()
            .expect("Should load");
        assert_eq!(config.specfile_path(), Some("cwd.spec"));

        let config = LocalConfigLocator::new([listed.root()])
            .with_current_dir(cwd.root())
            .try_local_dir_last(true)
            .locate()
            .expect("Should load");
        assert_eq!(config.specfile_path(), Some("listed.spec"));
    }
}

mod repo_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn committed_package() -> TestPackage {
        let package = TestPackage::new()
            .with_spec("fedora/foo.spec")
            .with_file(".packit.yaml", CONFIG);
        package.commit_all("initial import");
        package
    }

    #[test]
    fn test_loads_config_at_head() {
        let package = committed_package();
        let project = LocalGitProject::open(package.root()).expect("Should open repo");

        let config = get_package_config_from_repo(&project, "HEAD")
            .expect("Should load")
            .expect("Config should exist");

        assert_eq!(config.config_file_path.as_deref(), Some(".packit.yaml"));
        assert_eq!(config.specfile_path(), Some("fedora/foo.spec"));
        assert_eq!(
            config.common.downstream_package_name.as_deref(),
            package.root().file_name().and_then(|n| n.to_str())
        );
    }

    #[test]
    fn test_loads_config_at_tag() {
        let package = committed_package();
        let repo = package.commit_all("nothing new");
        git::tag_head(&repo, "0.1.0");

        let package = package.with_file(".packit.yaml", "specfile_path: fedora/foo.spec\njobs: []\n");
        package.commit_all("drop jobs");
        let project = LocalGitProject::open(package.root()).expect("Should open repo");

        let tagged = get_package_config_from_repo(&project, "0.1.0")
            .expect("Should load")
            .expect("Config should exist");
        let head = get_package_config_from_repo(&project, "HEAD")
            .expect("Should load")
            .expect("Config should exist");

        assert_eq!(tagged.jobs.len(), 1);
        assert!(head.jobs.is_empty());
    }

    #[test]
    fn test_missing_config_is_none() {
        let package = TestPackage::new().with_spec("foo.spec");
        package.commit_all("spec only");
        let project = LocalGitProject::open(package.root()).expect("Should open repo");

        let config = get_package_config_from_repo(&project, "HEAD").expect("Lookup should not fail");
        assert!(config.is_none());
    }

    #[test]
    fn test_uncommitted_config_is_invisible() {
        let package = TestPackage::new().with_spec("foo.spec");
        package.commit_all("spec only");
        let package = package.with_file(".packit.yaml", "jobs: []\n");
        let project = LocalGitProject::open(package.root()).expect("Should open repo");

        assert!(get_package_config_from_repo(&project, "HEAD").unwrap().is_none());
    }

    #[test]
    fn test_specfile_path_from_repo() {
        let package = committed_package();
        let project = LocalGitProject::open(package.root()).expect("Should open repo");

        let spec = get_specfile_path_from_repo(&project, None).expect("Should list files");
        assert_eq!(spec.as_deref(), Some("fedora/foo.spec"));
    }

    #[test]
    fn test_unknown_ref_is_an_error() {
        let package = committed_package();
        let project = LocalGitProject::open(package.root()).expect("Should open repo");

        let err = get_package_config_from_repo(&project, "no-such-branch").unwrap_err();
        assert!(matches!(err, Error::Git(_)), "got: {err:?}");
    }
}
