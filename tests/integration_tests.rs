//! Integration tests for depconflict
//!
//! These tests verify:
//! - The full pipeline from provider records to conflicts
//! - Site-packages discovery feeding the conflict check
//! - Snapshot loading in both formats
//! - Scheme selection and name normalization across the pipeline

use depconflict::aggregate::find_conflicts;
use depconflict::domain::{ConstraintSet, PackageRecord, Requirement};
use depconflict::graph::{PackageFilter, PackageGraph};
use depconflict::orchestrator::Orchestrator;
use depconflict::provider::{create_provider, PackageSource, TargetEnvironment};
use depconflict::validate::Validator;
use depconflict::version::{Pep440Scheme, SchemeKind, SemverScheme};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

fn package(name: &str, version: &str, requires: &[(&str, &str)]) -> PackageRecord {
    requires
        .iter()
        .fold(PackageRecord::new(name, version), |record, (dep, specs)| {
            record.with_requirement(Requirement::new(*dep, ConstraintSet::parse(specs).unwrap()))
        })
}

fn write_dist_info(site: &Path, dir_name: &str, metadata: &str) {
    let dir = site.join(dir_name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("METADATA"), metadata).unwrap();
}

mod pipeline {
    use super::*;

    /// Two requirers, one failing pair each
    #[test]
    fn test_two_conflicts_in_dependency_order() {
        let packages = vec![
            package("one", "1.0", &[]),
            package("two", "2.0", &[]),
            package("three", "3.0", &[("two", ">=3.0"), ("one", ">=2.0")]),
        ];

        let result = Orchestrator::new(Box::new(packages)).run().unwrap();
        let lines: Vec<String> = result
            .outcome
            .conflicts
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(lines, vec!["one(1.0) three(>=2.0)", "two(2.0) three(>=3.0)"]);
    }

    /// Same dependency, distinct requirers produce distinct conflicts
    #[test]
    fn test_distinct_requirers() {
        let packages = vec![
            package("lib", "1.5", &[]),
            package("alpha", "1.0", &[("lib", ">=2.0")]),
            package("beta", "1.0", &[("lib", "<1.0")]),
            package("gamma", "1.0", &[("lib", ">=1.0,<2.0")]),
        ];

        let graph = PackageGraph::from_packages(&packages);
        let outcome = find_conflicts(&Pep440Scheme, &graph.installed, &graph.requirements);

        let requirers: Vec<&str> = outcome.conflicts.iter().map(|c| c.requirer()).collect();
        assert_eq!(requirers, vec!["alpha", "beta"]);
        assert_eq!(outcome.checked_pairs, 3);
    }

    #[test]
    fn test_missing_dependency_is_not_a_conflict() {
        let packages = vec![package("app", "1.0", &[("absent", ">=1.0")])];
        let result = Orchestrator::new(Box::new(packages)).run().unwrap();
        assert!(result.outcome.is_clean());
        assert_eq!(result.outcome.checked_pairs, 0);
    }

    #[test]
    fn test_names_are_normalized_across_records() {
        let packages = vec![
            package("Zope.Interface", "5.0", &[]),
            package("app", "1.0", &[("zope-interface", ">=6.0")]),
        ];

        let result = Orchestrator::new(Box::new(packages)).run().unwrap();
        assert_eq!(result.outcome.conflicts.len(), 1);
        assert_eq!(
            result.outcome.conflicts[0].to_string(),
            "Zope.Interface(5.0) app(>=6.0)"
        );
    }

    #[test]
    fn test_filters_apply_to_dependencies() {
        let packages = vec![
            package("one", "1.0", &[]),
            package("two", "2.0", &[]),
            package("three", "3.0", &[("one", ">=2.0"), ("two", ">=3.0")]),
        ];

        let result = Orchestrator::new(Box::new(packages))
            .with_filter(PackageFilter::new().with_exclude(vec!["One".to_string()]))
            .run()
            .unwrap();
        assert_eq!(result.outcome.conflicts.len(), 1);
        assert_eq!(result.outcome.conflicts[0].dependency(), "two");
    }

    #[test]
    fn test_unverifiable_pair_does_not_hide_conflicts() {
        let packages = vec![
            package("one", "1.0", &[]),
            package("two", "2.0", &[]),
            package("three", "3.0", &[("one", ">=bogus!"), ("two", ">=3.0")]),
        ];

        let result = Orchestrator::new(Box::new(packages))
            .with_scheme(SchemeKind::Pep440)
            .run()
            .unwrap();
        assert_eq!(result.outcome.conflicts.len(), 1);
        assert_eq!(result.outcome.errors.len(), 1);
        assert_eq!(result.outcome.errors[0].dependency, "one");
    }
}

mod validation {
    use super::*;

    fn valid(installed: &str, specs: &str) -> bool {
        let constraints = ConstraintSet::parse(specs).unwrap();
        Validator::new(&Pep440Scheme)
            .is_valid(installed, &constraints)
            .unwrap()
    }

    #[test]
    fn test_range_and_exclusion_mix() {
        assert!(valid("2.5", ">=2.0,<3.0,!=2.4"));
        assert!(!valid("2.4", ">=2.0,<3.0,!=2.4"));
        assert!(!valid("3.0", ">=2.0,<3.0,!=2.4"));
    }

    #[test]
    fn test_exact_pins_are_string_matches() {
        assert!(valid("1.0", "==1.0"));
        assert!(!valid("1.0.0", "==1.0"));
        assert!(valid("1.0.0", ">=1.0,<=1.0"));
    }

    #[test]
    fn test_disjoint_ranges_are_alternatives() {
        assert!(valid("1.5", ">=1.0,<2.0,>=3.0,<4.0"));
        assert!(valid("3.5", ">=1.0,<2.0,>=3.0,<4.0"));
        assert!(!valid("2.5", ">=1.0,<2.0,>=3.0,<4.0"));
    }

    #[test]
    fn test_pre_releases_order_before_final() {
        assert!(!valid("2.0rc1", ">=2.0"));
        assert!(valid("2.0.post1", ">2.0"));
    }

    #[test]
    fn test_semver_scheme_pads_components() {
        let constraints = ConstraintSet::parse(">=1.2,<2").unwrap();
        let validator = Validator::new(&SemverScheme);
        assert!(validator.is_valid("v1.4.0", &constraints).unwrap());
        assert!(!validator.is_valid("2.0.0", &constraints).unwrap());
    }
}

mod site_packages {
    use super::*;

    #[test]
    fn test_site_packages_conflicts() {
        let temp = create_test_dir();
        let site = temp.path();
        write_dist_info(site, "urllib3-2.2.1.dist-info", "Name: urllib3\nVersion: 2.2.1\n");
        write_dist_info(site, "idna-3.6.dist-info", "Name: idna\nVersion: 3.6\n");
        write_dist_info(
            site,
            "botocore-1.29.0.dist-info",
            "Metadata-Version: 2.1\nName: botocore\nVersion: 1.29.0\n\
             Requires-Dist: urllib3 (<1.27,>=1.25.4) ; python_version < \"3.10\"\n\
             Requires-Dist: idna (>=2.5)\n\
             Requires-Dist: awscrt (==0.16.9) ; extra == 'crt'\n\
             \n\
             Long description with Requires-Dist: ignored (>=99)\n",
        );

        let target = TargetEnvironment::for_python("3.9").unwrap();
        let provider =
            create_provider(&PackageSource::Directories(vec![site.to_path_buf()]), Some(target));
        let result = Orchestrator::new(provider).run().unwrap();

        assert_eq!(result.packages, 3);
        assert_eq!(result.outcome.checked_pairs, 2);
        assert_eq!(result.outcome.conflicts.len(), 1);
        assert_eq!(
            result.outcome.conflicts[0].to_string(),
            "urllib3(2.2.1) botocore(<1.27,>=1.25.4)"
        );
    }

    fn write_numpy_pins(site: &Path, numpy: &str) {
        write_dist_info(
            site,
            &format!("numpy-{}.dist-info", numpy),
            &format!("Name: numpy\nVersion: {}\n", numpy),
        );
        write_dist_info(
            site,
            "pandas-2.2.0.dist-info",
            "Name: pandas\nVersion: 2.2.0\n\
             Requires-Dist: numpy>=1.22.4; python_version < \"3.11\"\n\
             Requires-Dist: numpy>=1.23.2; python_version == \"3.11\"\n\
             Requires-Dist: numpy>=1.26.0; python_version >= \"3.12\"\n",
        );
        write_dist_info(
            site,
            "legacy-1.0.dist-info",
            "Name: legacy\nVersion: 1.0\n\
             Requires-Dist: numpy<1.25; python_version<\"3.9\"\n\
             Requires-Dist: numpy>=1.26; python_version>=\"3.12\"\n",
        );
    }

    /// Per-interpreter requirement lines are not merged into one constraint set
    #[test]
    fn test_interpreter_specific_requirements() {
        let temp = create_test_dir();
        let site = temp.path().join("lib").join("python3.11").join("site-packages");
        write_numpy_pins(&site, "1.24.0");

        let provider = create_provider(&PackageSource::Directories(vec![site]), None);
        let result = Orchestrator::new(provider).run().unwrap();
        assert!(result.outcome.is_clean());
        assert_eq!(result.outcome.checked_pairs, 1);
    }

    #[test]
    fn test_interpreter_specific_requirements_newer_python() {
        let temp = create_test_dir();
        write_numpy_pins(temp.path(), "1.26.4");

        let target = TargetEnvironment::for_python("3.12").unwrap();
        let provider = create_provider(
            &PackageSource::Directories(vec![temp.path().to_path_buf()]),
            Some(target),
        );
        let result = Orchestrator::new(provider).run().unwrap();
        assert!(result.outcome.is_clean());
        assert_eq!(result.outcome.checked_pairs, 2);

        let target = TargetEnvironment::for_python("3.12").unwrap();
        write_dist_info(temp.path(), "numpy-1.26.4.dist-info", "Name: numpy\nVersion: 1.25.0\n");
        let provider = create_provider(
            &PackageSource::Directories(vec![temp.path().to_path_buf()]),
            Some(target),
        );
        let result = Orchestrator::new(provider).run().unwrap();
        assert_eq!(result.outcome.conflicts.len(), 2);
    }

    #[test]
    fn test_interpreter_specific_requirements_unknown_python() {
        let temp = create_test_dir();
        write_numpy_pins(temp.path(), "1.26.4");

        let provider =
            create_provider(&PackageSource::Directories(vec![temp.path().to_path_buf()]), None);
        let result = Orchestrator::new(provider).run().unwrap();
        assert!(result.outcome.is_clean());
        assert_eq!(result.outcome.checked_pairs, 0);
    }

    #[test]
    fn test_compatible_release_expansion() {
        let temp = create_test_dir();
        let site = temp.path();
        write_dist_info(site, "attrs-24.1.0.dist-info", "Name: attrs\nVersion: 24.1.0\n");
        write_dist_info(
            site,
            "app-1.0.dist-info",
            "Name: app\nVersion: 1.0\nRequires-Dist: attrs~=23.1\n",
        );

        let provider = create_provider(&PackageSource::Directories(vec![site.to_path_buf()]), None);
        let result = Orchestrator::new(provider).run().unwrap();

        assert_eq!(result.outcome.conflicts.len(), 1);
        assert_eq!(result.outcome.conflicts[0].installed_version(), "24.1.0");
    }

    #[test]
    fn test_multiple_directories() {
        let first = create_test_dir();
        let second = create_test_dir();
        write_dist_info(first.path(), "six-1.9.0.dist-info", "Name: six\nVersion: 1.9.0\n");
        write_dist_info(
            second.path(),
            "app-1.0.dist-info",
            "Name: app\nVersion: 1.0\nRequires-Dist: six>=1.10\n",
        );

        let provider = create_provider(&PackageSource::Directories(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]), None);
        let result = Orchestrator::new(provider).run().unwrap();
        assert_eq!(result.outcome.conflicts.len(), 1);
        assert_eq!(result.outcome.conflicts[0].dependency(), "six");
    }
}

mod snapshots {
    use super::*;

    #[test]
    fn test_toml_and_json_agree() {
        let temp = create_test_dir();
        let toml_path = temp.path().join("env.toml");
        let json_path = temp.path().join("env.json");

        fs::write(
            &toml_path,
            r#"
[[packages]]
name = "lib"
version = "1.5"

[[packages]]
name = "app"
version = "1.0"
requires = [{ name = "lib", specs = [[">=", "2.0"]] }]
"#,
        )
        .unwrap();
        fs::write(
            &json_path,
            r#"{"packages": [
                {"name": "lib", "version": "1.5"},
                {"name": "app", "version": "1.0",
                 "requires": [{"name": "lib", "specs": [[">=", "2.0"]]}]}
            ]}"#,
        )
        .unwrap();

        let from_toml = Orchestrator::new(create_provider(&PackageSource::Snapshot(toml_path), None))
            .run()
            .unwrap();
        let from_json = Orchestrator::new(create_provider(&PackageSource::Snapshot(json_path), None))
            .run()
            .unwrap();

        assert_eq!(from_toml.outcome.conflicts, from_json.outcome.conflicts);
        assert_eq!(from_toml.outcome.conflicts.len(), 1);
    }

    #[test]
    fn test_missing_snapshot_is_an_error() {
        let temp = create_test_dir();
        let provider = create_provider(&PackageSource::Snapshot(temp.path().join("none.toml")), None);
        assert!(Orchestrator::new(provider).run().is_err());
    }
}
