use std::fs;
use std::path::PathBuf;

use anim_export_cli::{run, CliArgs, Command};
use anim_export_core::{MissingClipPolicy, RootPolicy};
use clap::{CommandFactory, Parser};

fn parse(list: &[&str]) -> Result<CliArgs, clap::Error> {
    CliArgs::try_parse_from(std::iter::once("anim-export").chain(list.iter().copied()))
}

fn fixture(name: &str) -> String {
    anim_export_test_fixtures::scenes::path(name)
        .unwrap()
        .display()
        .to_string()
}

#[test]
fn parses_export_with_options() {
    let parsed = parse(&[
        "scene.json",
        "--from-fps",
        "30",
        "export",
        "Walk",
        "out/walk.anim",
        "--rename",
        "Walk=Run",
        "--skip",
        "Idle",
        "--strict",
    ])
    .unwrap();
    assert_eq!(parsed.scene, PathBuf::from("scene.json"));
    assert_eq!(
        parsed.command,
        Command::Export {
            clip: "Walk".into(),
            dest: PathBuf::from("out/walk.anim"),
        }
    );
    assert_eq!(parsed.from_fps, Some(30));
    assert_eq!(parsed.to_fps, None);
    assert_eq!(parsed.renames, vec![("Walk".to_string(), "Run".to_string())]);
    assert_eq!(parsed.skips, vec!["Idle".to_string()]);

    let cfg = parsed.export_config().unwrap();
    assert_eq!(cfg.original_fps, 30);
    assert_eq!(cfg.target_fps, 25);
    assert_eq!(cfg.missing_clip, MissingClipPolicy::Error);
    assert_eq!(cfg.root_policy, RootPolicy::FirstEntry);
}

#[test]
fn rejects_malformed_arguments() {
    assert!(parse(&[]).is_err());
    assert!(parse(&["scene.json"]).is_err());
    assert!(parse(&["scene.json", "explode"]).is_err());
    assert!(parse(&["scene.json", "export", "Walk"]).is_err());
    assert!(parse(&["scene.json", "list", "--to-fps"]).is_err());
    assert!(parse(&["scene.json", "list", "--to-fps", "fast"]).is_err());
    assert!(parse(&["scene.json", "list", "--rename", "NoEquals"]).is_err());
    assert!(parse(&["scene.json", "list", "--bogus"]).is_err());
    assert!(parse(&["scene.json", "list", "extra"]).is_err());
}

#[test]
fn command_definition_is_consistent() {
    CliArgs::command().debug_assert();
}

#[test]
fn help_is_handled_by_the_parser() {
    let err = parse(&["--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    let rendered = err.to_string();
    assert!(rendered.contains("export-all"));
    assert!(rendered.contains("--rename"));
}

#[test]
fn repeated_renames_and_skips_accumulate() {
    let parsed = parse(&[
        "scene.json",
        "--rename",
        "Walk=Run",
        "export-all",
        "out",
        "--rename",
        "Idle=Rest",
        "--skip",
        "T-Pose",
        "--skip",
        "Jump",
    ])
    .unwrap();
    assert_eq!(
        parsed.command,
        Command::ExportAll {
            dir: PathBuf::from("out")
        }
    );
    assert_eq!(
        parsed.renames,
        vec![
            ("Walk".to_string(), "Run".to_string()),
            ("Idle".to_string(), "Rest".to_string()),
        ]
    );
    assert_eq!(parsed.skips, vec!["T-Pose".to_string(), "Jump".to_string()]);
}

#[test]
fn list_prints_display_and_original_names() {
    let parsed = parse(&[&fixture("biped-clips"), "list"]).unwrap();
    let mut out = Vec::new();
    run(&parsed, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "0\tWalk\t(Armature|Walk)\n1\tIdle\t(Armature|Idle)\n2\tT-Pose\t(T-Pose)\n"
    );
}

#[test]
fn export_all_honours_rename_and_skip() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("clips");
    let parsed = parse(&[
        &fixture("biped-clips"),
        "export-all",
        dir.to_str().unwrap(),
        "--rename",
        "Walk=Run",
        "--skip",
        "T-Pose",
    ])
    .unwrap();
    let mut out = Vec::new();
    run(&parsed, &mut out).unwrap();

    assert!(dir.join("Run.anim").exists());
    assert!(dir.join("Idle.anim").exists());
    assert!(!dir.join("Walk.anim").exists());
    assert!(!dir.join("T-Pose.anim").exists());
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
}

#[test]
fn export_uses_settings_file_and_flag_overrides() {
    let tmp = tempfile::tempdir().unwrap();
    let settings = tmp.path().join("settings.json");
    fs::write(&settings, r#"{ "original_fps": 50, "target_fps": 25 }"#).unwrap();
    let dest = tmp.path().join("Wave.anim");

    let parsed = parse(&[
        &fixture("arm-wave"),
        "export",
        "Wave",
        dest.to_str().unwrap(),
        "--config",
        settings.to_str().unwrap(),
        "--to-fps",
        "50",
    ])
    .unwrap();
    let cfg = parsed.export_config().unwrap();
    assert_eq!((cfg.original_fps, cfg.target_fps), (50, 50));

    let mut out = Vec::new();
    run(&parsed, &mut out).unwrap();
    let text = fs::read_to_string(&dest).unwrap();
    assert!(text.contains("    24 90 linear linear 1 0 0;\n"));
}

#[test]
fn strict_export_of_unknown_clip_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("Nope.anim");
    let parsed = parse(&[
        &fixture("arm-wave"),
        "export",
        "Nope",
        dest.to_str().unwrap(),
        "--strict",
    ])
    .unwrap();
    let err = run(&parsed, &mut Vec::new()).unwrap_err();
    assert!(format!("{err:#}").contains("Nope"));
    assert!(!dest.exists());
}

#[test]
fn renaming_an_unknown_clip_is_an_error() {
    let parsed = parse(&[
        &fixture("arm-wave"),
        "list",
        "--rename",
        "Missing=Other",
    ])
    .unwrap();
    assert!(run(&parsed, &mut Vec::new()).is_err());
}
