//! Tests for layered configuration resolution

use flavor_core::{
    ConfigSession, Error, Flavor, ResolveOptions, TypedValue, UndeclaredPolicy,
};
use flavor_fs::{DirectorySource, MemorySource, MountTable};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

const CONFIG_DEFAULTS: &str = r#"{
    "Default": [
        {
            "Flavor": [],
            "Variables": [
                { "key": "FullScreen", "type": "Bool", "value": true },
                { "key": "Plugins", "type": "String", "value": "SampleProject;TestPlugin" },
                { "key": "MainPlugin", "type": "String", "value": "SampleProject" }
            ]
        }
    ]
}"#;

const CONFIG_OVERRIDES: &str = r#"{
    "FullScreen": { "type": "Bool", "value": false }
}"#;

const PLATFORM_DEFAULTS: &str = r#"{
    "Default": [
        {
            "Flavor": ["Universal"],
            "Variables": [
                { "key": "Width", "type": "Int", "value": 1024 },
                { "key": "VSync", "type": "Bool", "value": true }
            ]
        },
        {
            "Flavor": ["Desktop"],
            "Variables": [{ "key": "Width", "type": "Int", "value": 1920 }]
        },
        {
            "Flavor": ["Mobile"],
            "Variables": [
                { "key": "Width", "type": "Int", "value": 720 },
                { "key": "VSync", "type": "Bool", "value": false }
            ]
        }
    ]
}"#;

fn mounted_files() -> MountTable {
    let mut memory = MemorySource::new();
    memory.add_file("ConfigDefaults.json", CONFIG_DEFAULTS);
    memory.add_file("ConfigOverrides.json", CONFIG_OVERRIDES);
    memory.add_file("PlatformDefaults.json", PLATFORM_DEFAULTS);
    memory.add_file("Broken.json", "{ not json");

    let mut files = MountTable::new();
    files.mount(memory);
    files
}

fn platform_session() -> ConfigSession {
    let mut session = ConfigSession::new();
    session.declare("Width", 640).set_overridable(true);
    session.declare("VSync", false);
    session.declare("Title", "App");
    session
}

mod declarations {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_declared_variables_return_defaults() {
        let session = platform_session();

        assert_eq!(session.get("Width"), TypedValue::Int(640));
        assert_eq!(session.get("VSync"), TypedValue::Bool(false));
        assert_eq!(session.get("Title"), TypedValue::from("App"));
    }

    #[test]
    fn test_undeclared_variable_is_empty() {
        let session = platform_session();
        assert_eq!(session.get("Height"), TypedValue::Empty);
    }

    #[test]
    fn test_set_undeclared_variable_fails_loudly() {
        let mut session = platform_session();
        let err = session.set("Height", 480).unwrap_err();
        assert!(matches!(err, Error::UnknownVariable { ref name } if name == "Height"));
    }

    #[test]
    fn test_set_ignores_overridable_flag() {
        let mut session = platform_session();
        session.set("VSync", true).unwrap();
        assert_eq!(session.get("VSync"), TypedValue::Bool(true));
    }
}

mod config_file_scenario {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_loaded_from_json_with_optional_overrides() {
        let files = mounted_files();
        let mut session = ConfigSession::with_options(
            ResolveOptions::default().with_undeclared(UndeclaredPolicy::Declare),
        );
        session.declare("FullScreen", true).set_overridable(true);

        assert_eq!(session.get("FullScreen"), TypedValue::Bool(true));
        assert_eq!(session.get("Plugins"), TypedValue::Empty);
        assert_eq!(session.get("MainPlugin"), TypedValue::Empty);

        session
            .load_defaults(&files, "memory://ConfigDefaults.json", &Flavor::universal())
            .unwrap();

        assert_eq!(session.get("FullScreen"), TypedValue::Bool(true));
        assert_eq!(
            session.get("Plugins"),
            TypedValue::from("SampleProject;TestPlugin")
        );
        assert_eq!(session.get("MainPlugin"), TypedValue::from("SampleProject"));

        session
            .load_overrides(&files, "memory://ConfigOverrides.json")
            .unwrap();

        assert_eq!(session.get("FullScreen"), TypedValue::Bool(false));
        assert_eq!(
            session.get("Plugins"),
            TypedValue::from("SampleProject;TestPlugin")
        );
        assert_eq!(session.get("MainPlugin"), TypedValue::from("SampleProject"));

        let changed = session.changed_variables(&Flavor::universal()).into_vec();
        assert_eq!(
            changed,
            vec![("FullScreen".to_string(), TypedValue::Bool(false))]
        );
    }

    #[test]
    fn test_ignore_policy_drops_undeclared_defaults() {
        let files = mounted_files();
        let mut session = ConfigSession::new();
        session.declare("FullScreen", true).set_overridable(true);

        let report = session
            .load_defaults(&files, "memory://ConfigDefaults.json", &Flavor::universal())
            .unwrap();
        assert_eq!(report.applied, 1);
        assert_eq!(report.skipped_undeclared, 2);
        assert_eq!(session.get("Plugins"), TypedValue::Empty);
        assert_eq!(session.get("MainPlugin"), TypedValue::Empty);

        session
            .load_overrides(&files, "memory://ConfigOverrides.json")
            .unwrap();

        let changed = session.changed_variables(&Flavor::universal()).into_vec();
        assert_eq!(
            changed,
            vec![("FullScreen".to_string(), TypedValue::Bool(false))]
        );
    }

    #[test]
    fn test_document_variables_are_not_overridable() {
        let mut session = ConfigSession::with_options(
            ResolveOptions::default().with_undeclared(UndeclaredPolicy::Declare),
        );
        session
            .load_defaults_bytes(CONFIG_DEFAULTS.as_bytes(), &Flavor::universal())
            .unwrap();

        let report = session
            .load_overrides_bytes(br#"{"Plugins": {"type": "String", "value": "Other"}}"#)
            .unwrap();

        assert_eq!(report.skipped_not_overridable, 1);
        assert_eq!(
            session.get("Plugins"),
            TypedValue::from("SampleProject;TestPlugin")
        );
    }

    #[test]
    fn test_document_can_mark_introduced_variable_overridable() {
        let mut session = ConfigSession::with_options(
            ResolveOptions::default().with_undeclared(UndeclaredPolicy::Declare),
        );
        session
            .load_defaults_bytes(
                br#"{"Default": [{"Flavor": [], "Variables": [
                    {"key": "Volume", "type": "Float", "value": 0.5, "overridable": true}
                ]}]}"#,
                &Flavor::universal(),
            )
            .unwrap();
        session
            .load_overrides_bytes(br#"{"Volume": {"type": "Float", "value": 0.25}}"#)
            .unwrap();

        assert_eq!(session.get("Volume"), TypedValue::Float(0.25));
    }
}

mod flavor_resolution {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    #[case("Universal", 1024, true)]
    #[case("Desktop", 1920, true)]
    #[case("Mobile", 720, false)]
    #[case("Console", 1024, true)]
    fn test_flavor_selects_entries(
        #[case] flavor: &str,
        #[case] width: i32,
        #[case] vsync: bool,
    ) {
        let files = mounted_files();
        let mut session = platform_session();

        session
            .load_defaults(&files, "memory://PlatformDefaults.json", &Flavor::new(flavor))
            .unwrap();

        assert_eq!(session.get("Width"), TypedValue::Int(width));
        assert_eq!(session.get("VSync"), TypedValue::Bool(vsync));
        assert_eq!(session.get("Title"), TypedValue::from("App"));
    }

    #[test]
    fn test_no_matching_entry_is_not_an_error() {
        let mut session = platform_session();
        let report = session
            .load_defaults_bytes(
                br#"{"Default": [{"Flavor": ["Mobile"], "Variables": [
                    {"key": "Width", "type": "Int", "value": 1}
                ]}]}"#,
                &Flavor::new("Desktop"),
            )
            .unwrap();

        assert_eq!(report.matched, 0);
        assert_eq!(session.get("Width"), TypedValue::Int(640));
    }

    #[test]
    fn test_defaults_apply_to_non_overridable_variables() {
        let mut session = platform_session();
        session
            .load_defaults_bytes(PLATFORM_DEFAULTS.as_bytes(), &Flavor::new("Mobile"))
            .unwrap();

        // VSync is not overridable but defaults always apply
        assert_eq!(session.get("VSync"), TypedValue::Bool(false));
    }

    #[test]
    fn test_second_defaults_document_layers_on_first() {
        let mut session = platform_session();
        let flavor = Flavor::new("Desktop");
        session
            .load_defaults_bytes(PLATFORM_DEFAULTS.as_bytes(), &flavor)
            .unwrap();
        session
            .load_defaults_bytes(
                br#"{"Default": [{"Flavor": ["Desktop"], "Variables": [
                    {"key": "Title", "type": "String", "value": "Desktop App"}
                ]}]}"#,
                &flavor,
            )
            .unwrap();

        assert_eq!(session.get("Width"), TypedValue::Int(1920));
        assert_eq!(session.get("Title"), TypedValue::from("Desktop App"));
        assert!(session.changed_variables(&flavor).is_empty());
    }
}

mod overrides {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_non_overridable_override_has_no_effect() {
        let mut session = platform_session();
        session
            .load_overrides_bytes(br#"{"VSync": {"type": "Bool", "value": true}}"#)
            .unwrap();

        assert_eq!(session.get("VSync"), TypedValue::Bool(false));
    }

    #[test]
    fn test_override_of_undeclared_variable_is_skipped() {
        let mut session = platform_session();
        let report = session
            .load_overrides_bytes(br#"{"Height": {"type": "Int", "value": 480}}"#)
            .unwrap();

        assert_eq!(report.skipped_undeclared, 1);
        assert!(!session.contains("Height"));
    }

    #[test]
    fn test_overrides_apply_after_flavor_defaults() {
        let files = mounted_files();
        let mut session = platform_session();
        let flavor = Flavor::new("Desktop");

        session
            .load_defaults(&files, "memory://PlatformDefaults.json", &flavor)
            .unwrap();
        session
            .load_overrides_bytes(br#"{"Width": {"type": "Int", "value": 2560}}"#)
            .unwrap();

        assert_eq!(session.get("Width"), TypedValue::Int(2560));
    }
}

mod changed_variables {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_right_after_defaults() {
        let files = mounted_files();
        let mut session = platform_session();
        let flavor = Flavor::new("Mobile");

        session
            .load_defaults(&files, "memory://PlatformDefaults.json", &flavor)
            .unwrap();

        assert!(session.changed_variables(&flavor).is_empty());
    }

    #[test]
    fn test_reports_only_the_overridden_variable() {
        let files = mounted_files();
        let mut session = platform_session();
        let flavor = Flavor::new("Desktop");

        session
            .load_defaults(&files, "memory://PlatformDefaults.json", &flavor)
            .unwrap();
        session
            .load_overrides_bytes(br#"{"Width": {"type": "Int", "value": 2560}}"#)
            .unwrap();

        let changed = session.changed_variables(&flavor);
        assert_eq!(changed.len(), 1);
        assert_eq!(changed.get("Width"), Some(&TypedValue::Int(2560)));
    }

    #[test]
    fn test_override_equal_to_default_is_not_a_change() {
        let mut session = platform_session();
        let flavor = Flavor::new("Desktop");
        session
            .load_defaults_bytes(PLATFORM_DEFAULTS.as_bytes(), &flavor)
            .unwrap();
        session
            .load_overrides_bytes(br#"{"Width": {"type": "Int", "value": 1920}}"#)
            .unwrap();

        assert!(session.changed_variables(&flavor).is_empty());
    }

    #[test]
    fn test_manual_set_is_reported() {
        let mut session = platform_session();
        session.set("Title", "Renamed").unwrap();

        let changed = session.changed_variables(&Flavor::universal());
        assert_eq!(
            changed.into_vec(),
            vec![("Title".to_string(), TypedValue::from("Renamed"))]
        );
    }

    #[test]
    fn test_diff_is_relative_to_requested_flavor() {
        let mut session = platform_session();
        session
            .load_defaults_bytes(PLATFORM_DEFAULTS.as_bytes(), &Flavor::new("Mobile"))
            .unwrap();

        // Mobile values compared against Desktop defaults
        let changed = session.changed_variables(&Flavor::new("Desktop"));
        let names: Vec<&str> = changed.names().collect();
        assert_eq!(names, vec!["Width", "VSync"]);
        assert_eq!(changed.get("Width"), Some(&TypedValue::Int(720)));
    }

    #[test]
    fn test_result_follows_declaration_order() {
        let mut session = platform_session();
        session.set("Title", "B").unwrap();
        session.set("Width", 1).unwrap();
        session.set("VSync", true).unwrap();

        let changed = session.changed_variables(&Flavor::universal());
        let names: Vec<&str> = changed.names().collect();
        assert_eq!(names, vec!["Width", "VSync", "Title"]);
    }

    #[test]
    fn test_baseline_is_independent_of_overrides() {
        let mut session = platform_session();
        let flavor = Flavor::new("Desktop");
        session
            .load_defaults_bytes(PLATFORM_DEFAULTS.as_bytes(), &flavor)
            .unwrap();
        session
            .load_overrides_bytes(br#"{"Width": {"type": "Int", "value": 2560}}"#)
            .unwrap();

        let baseline = session.baseline(&flavor);
        assert_eq!(baseline.get("Width"), TypedValue::Int(1920));
        assert_eq!(session.get("Width"), TypedValue::Int(2560));
    }
}

mod failures {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_source_is_unavailable() {
        let files = mounted_files();
        let mut session = platform_session();

        let err = session
            .load_defaults(&files, "memory://Missing.json", &Flavor::universal())
            .unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable(_)));
    }

    #[test]
    fn test_malformed_document_leaves_registry_untouched() {
        let files = mounted_files();
        let mut session = platform_session();

        let err = session
            .load_defaults(&files, "memory://Broken.json", &Flavor::universal())
            .unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));

        let err = session
            .load_overrides(&files, "memory://Broken.json")
            .unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));

        assert_eq!(session.get("Width"), TypedValue::Int(640));
        assert!(session.changed_variables(&Flavor::universal()).is_empty());
    }

    #[test]
    fn test_type_mismatch_is_a_parse_error() {
        let mut session = platform_session();
        let err = session
            .load_overrides_bytes(br#"{"Width": {"type": "Int", "value": "wide"}}"#)
            .unwrap_err();

        assert!(matches!(err, Error::Parse { .. }));
        assert_eq!(session.get("Width"), TypedValue::Int(640));
    }

    #[test]
    fn test_unknown_type_is_a_parse_error() {
        let mut session = platform_session();
        let err = session
            .load_defaults_bytes(
                br#"{"Default": [{"Flavor": [], "Variables": [
                    {"key": "Width", "type": "Color", "value": "red"}
                ]}]}"#,
                &Flavor::universal(),
            )
            .unwrap_err();

        assert!(err.to_string().contains("Color"), "got: {}", err);
    }

    #[rstest]
    #[case(r#""NaN 1""#)]
    #[case(r#""1 inf""#)]
    #[case("[1e39, 0]")]
    fn test_non_finite_vector_is_a_parse_error(#[case] payload: &str) {
        let mut session = ConfigSession::new();
        session.declare("Origin", TypedValue::Vector2([0.0, 0.0]));

        let document = format!(
            r#"{{"Default": [{{"Flavor": [], "Variables": [
                {{"key": "Origin", "type": "Vector2", "value": {}}}
            ]}}]}}"#,
            payload
        );
        let err = session
            .load_defaults_bytes(document.as_bytes(), &Flavor::universal())
            .unwrap_err();

        assert!(matches!(err, Error::Parse { .. }));
        assert_eq!(session.get("Origin"), TypedValue::Vector2([0.0, 0.0]));
        assert!(session.changed_variables(&Flavor::universal()).is_empty());
    }
}

mod directory_sources {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_loads_documents_from_disk() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("defaults.json"), PLATFORM_DEFAULTS).unwrap();
        fs::write(
            temp.path().join("overrides.json"),
            r#"{"Width": {"type": "Int", "value": 3840}}"#,
        )
        .unwrap();

        let mut files = MountTable::new();
        files.mount(DirectorySource::new(temp.path()));

        let mut session = platform_session();
        let flavor = Flavor::new("Desktop");
        session
            .load_defaults(&files, "defaults.json", &flavor)
            .unwrap();
        session
            .load_overrides(&files, "file://overrides.json")
            .unwrap();

        assert_eq!(session.get("Width"), TypedValue::Int(3840));
        assert_eq!(session.changed_variables(&flavor).len(), 1);
    }
}
