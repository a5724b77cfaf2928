// Integration testing can be done either by calling library functions directly or by invoking your CLI as a subprocess.
use sprout::descriptor::{CssVariant, ProjectDescriptor};
use std::{
    fs,
    path::{Path, PathBuf},
};

fn template_root() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"))
}

fn descriptor(target_dir: &Path, with_demo: bool) -> ProjectDescriptor {
    ProjectDescriptor {
        project_name: "demo".into(),
        target_dir: target_dir.to_path_buf(),
        app_name: "Demo App".into(),
        source_subdir: "www".into(),
        template: "default".into(),
        typescript: false,
        css: CssVariant::Plain,
        platform: "mobile".into(),
        app_id: "com.example.demo".into(),
        target_name: "sim".into(),
        with_demo,
    }
}

#[test]
fn full_assembly_matches_the_published_layout() {
    let work = tempfile::tempdir().unwrap();
    let template_dir = template_root().join("default");

    sprout::project::create_app(&template_dir, &descriptor(work.path(), false), false).unwrap();

    let project = work.path().join("demo");
    for artifact in [
        "package.json",
        "project.config.json",
        ".gitignore",
        ".editorconfig",
        ".npmrc",
        "www/index.html",
        "www/index.css",
        "www/lib/sprout.min.js",
        "platforms/mobile/build.pri",
        "platforms/mobile/appconfig.xml",
        "platforms/mobile/app/main.cpp",
        "platforms/mobile/vendor/vendor.pri",
        "platforms/mobile/spm.json",
        "platforms/mobile/VERSION",
    ] {
        assert!(project.join(artifact).is_file(), "missing {artifact}");
    }

    // Without --demo the example tree stays behind.
    assert!(!project.join("www/app.js").exists());

    let pkg = fs::read_to_string(project.join("package.json")).unwrap();
    assert!(pkg.contains("\"name\": \"demo\""));
    assert!(!pkg.contains("{{"));
}

#[test]
fn demo_assembly_seeds_the_example_tree() {
    let work = tempfile::tempdir().unwrap();
    let template_dir = template_root().join("default");

    sprout::project::create_app(&template_dir, &descriptor(work.path(), true), false).unwrap();

    let project = work.path().join("demo");
    assert!(project.join("www/app.js").is_file());
    let entry = fs::read_to_string(project.join("www/index.html")).unwrap();
    assert!(entry.contains("sprout example"));
}

#[test]
fn create_rejects_an_unknown_template() {
    let work = tempfile::tempdir().unwrap();

    let mut cmd = assert_cmd::Command::cargo_bin("sprout").unwrap();
    cmd.arg("create")
        .arg("demo")
        .arg("--dir")
        .arg(work.path())
        .arg("--app-name")
        .arg("Demo App")
        .arg("--app-id")
        .arg("com.example.demo")
        .arg("--template")
        .arg("nope")
        .arg("--template-root")
        .arg(template_root());

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("no template registered"));

    assert!(!work.path().join("demo").exists());
}

#[test]
fn refresh_repairs_the_platform_core() {
    let work = tempfile::tempdir().unwrap();
    let template_dir = template_root().join("default");

    sprout::project::create_app(&template_dir, &descriptor(work.path(), false), false).unwrap();
    let project = work.path().join("demo");

    fs::write(project.join("platforms/mobile/VERSION"), "9.9.9\n").unwrap();

    let mut cmd = assert_cmd::Command::cargo_bin("sprout").unwrap();
    cmd.arg("refresh")
        .arg("--project-dir")
        .arg(&project)
        .arg("--template-root")
        .arg(template_root());

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("refreshed platform core"));

    assert_eq!(
        fs::read_to_string(project.join("platforms/mobile/VERSION")).unwrap(),
        "0.1.0\n"
    );
}

#[test]
fn page_renders_a_stylesheet_into_the_source_tree() {
    let work = tempfile::tempdir().unwrap();
    fs::create_dir_all(work.path().join("www")).unwrap();

    let mut cmd = assert_cmd::Command::cargo_bin("sprout").unwrap();
    cmd.arg("page")
        .arg("home")
        .arg("--project-dir")
        .arg(work.path())
        .arg("--template-root")
        .arg(template_root());

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("created file"));

    assert!(work.path().join("www/home.css").is_file());
}
