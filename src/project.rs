use crate::{
    copy,
    descriptor::{ProjectDescriptor, DEFAULT_SOURCE_DIR},
    errors::{FileOperation, IoError},
    manager::{self, PackageManager},
    paths::{self, PlatformPaths},
    process,
    template::{self, TemplateId},
};
use colored::Colorize;
use miette::Diagnostic;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tera::Context;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ProjectError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Fs(#[from] copy::FsError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Template(#[from] template::TemplateError),
}

/// Result of a successful assembly, consumed by the bootstrap step.
#[derive(Debug, Clone)]
pub struct CreatedProject {
    pub path: PathBuf,
    pub used_npmrc: bool,
    pub used_yarn_lock: bool,
}

fn step(message: &str) {
    println!("{}{}", "✔ ".green(), message.dimmed());
}

fn warn(message: &str) {
    println!("{}{}", "✖ ".red(), message.red());
}

fn ensure_dir(path: &Path) -> Result<(), IoError> {
    fs::create_dir_all(path)
        .map_err(|error| IoError::new(FileOperation::Mkdir, path.to_path_buf(), error))
}

/// Assembles a complete project tree from the template directory.
///
/// Stages run strictly in order and any filesystem or template failure aborts
/// immediately; nothing already written is rolled back. Version-control init
/// and dependency install are NOT part of assembly, see [`bootstrap`].
pub fn create_app(
    template_dir: &Path,
    desc: &ProjectDescriptor,
    prefer_yarn: bool,
) -> Result<CreatedProject, ProjectError> {
    log::debug!("template dir: {}", template_dir.display());

    let project_path = desc.project_path();
    let source_dir = project_path.join(&desc.source_subdir);
    let lib_dir = source_dir.join(paths::LIB_DIR);
    let platforms_dir = project_path.join(paths::PLATFORMS_DIR);

    log::debug!("project dir: {}", project_path.display());

    ensure_dir(&project_path)?;
    ensure_dir(&source_dir)?;
    ensure_dir(&lib_dir)?;
    ensure_dir(&platforms_dir)?;

    copy::copy_tree(&template_dir.join(paths::PLATFORMS_DIR), &platforms_dir)?;
    copy::copy_tree(&template_dir.join(paths::LIB_DIR), &lib_dir)?;

    let version = manager::pkg_version();

    let mut pkg_ctx = Context::new();
    pkg_ctx.insert("project_name", &desc.project_name);
    pkg_ctx.insert("description", &desc.app_name);
    pkg_ctx.insert("version", version);
    pkg_ctx.insert("template", &desc.template);
    pkg_ctx.insert("typescript", &desc.typescript);
    pkg_ctx.insert("css", desc.css.as_str());
    template::render(
        template_dir,
        &TemplateId::Pkg,
        &pkg_ctx,
        &project_path.join("package.json"),
    )?;

    let mut project_ctx = Context::new();
    project_ctx.insert("app_name", &desc.app_name);
    project_ctx.insert("project_name", &desc.project_name);
    project_ctx.insert("app_id", &desc.app_id);
    project_ctx.insert("web_path", &desc.source_subdir);
    project_ctx.insert("target", &desc.device_target());
    project_ctx.insert("target_simulator", &desc.simulator_target());
    template::render(
        template_dir,
        &TemplateId::ProjectConfig,
        &project_ctx,
        &project_path.join("project.config.json"),
    )?;

    let empty = Context::new();
    template::render(
        template_dir,
        &TemplateId::Gitignore,
        &empty,
        &project_path.join(".gitignore"),
    )?;
    template::render(
        template_dir,
        &TemplateId::Editorconfig,
        &empty,
        &project_path.join(".editorconfig"),
    )?;

    // Either the example tree or a rendered entry page, never both.
    if desc.with_demo {
        copy::copy_tree(&template_dir.join(paths::TEMPLATE_SOURCE_DIR), &source_dir)?;
    } else {
        template::render(
            template_dir,
            &TemplateId::IndexHtml,
            &empty,
            &source_dir.join("index.html"),
        )?;
    }

    template::render(
        template_dir,
        &TemplateId::Stylesheet,
        &empty,
        &source_dir.join(desc.css.entry_file()),
    )?;

    let platform_dir = platforms_dir.join(&desc.platform);

    let mut pri_ctx = Context::new();
    pri_ctx.insert("app_id", &desc.app_id);
    template::render(
        template_dir,
        &TemplateId::BuildPri,
        &pri_ctx,
        &platform_dir.join("build.pri"),
    )?;

    let mut appconfig_ctx = Context::new();
    appconfig_ctx.insert("app_name", &desc.app_name);
    appconfig_ctx.insert("project_name", &desc.project_name);
    appconfig_ctx.insert("app_id", &desc.app_id);
    template::render(
        template_dir,
        &TemplateId::AppConfig,
        &appconfig_ctx,
        &platform_dir.join("appconfig.xml"),
    )?;

    let used_npmrc = !prefer_yarn;
    if used_npmrc {
        template::render(
            template_dir,
            &TemplateId::Npmrc,
            &empty,
            &project_path.join(".npmrc"),
        )?;
    }

    let lockfile = TemplateId::YarnLock {
        version: version.to_string(),
    };
    let used_yarn_lock = prefer_yarn && lockfile.exists_in(template_dir);
    if used_yarn_lock {
        template::render(template_dir, &lockfile, &empty, &project_path.join("yarn.lock"))?;
    }

    announce(desc, used_npmrc, used_yarn_lock);

    Ok(CreatedProject {
        path: project_path,
        used_npmrc,
        used_yarn_lock,
    })
}

fn announce(desc: &ProjectDescriptor, used_npmrc: bool, used_yarn_lock: bool) {
    let name = &desc.project_name;

    step(&format!("created project: {name}"));
    step(&format!("created platforms dir: {name}/{}", paths::PLATFORMS_DIR));
    step(&format!(
        "copied platform skeleton: {name}/{}/{}",
        paths::PLATFORMS_DIR,
        desc.platform
    ));
    step(&format!("created source dir: {name}/{}", desc.source_subdir));
    if desc.with_demo {
        step(&format!("seeded example source: {name}/{}", desc.source_subdir));
    } else {
        step(&format!(
            "created file: {name}/{}/index.html",
            desc.source_subdir
        ));
    }
    step(&format!("created file: {name}/.editorconfig"));
    step(&format!("created file: {name}/.gitignore"));
    step(&format!("created file: {name}/package.json"));
    step(&format!("created file: {name}/project.config.json"));
    if used_npmrc {
        step(&format!("created file: {name}/.npmrc"));
    }
    if used_yarn_lock {
        step(&format!("created file: {name}/yarn.lock"));
    }
    println!();
}

/// How the post-assembly bootstrap ended. Failures here never invalidate the
/// assembled project directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Completed,
    InitFailed,
    InstallFailed,
}

/// Initializes version control, then installs dependencies. The install step
/// only runs when init succeeded; both failures are reported as warnings and
/// the user is told how to finish by hand.
pub fn bootstrap(project: &Path, project_name: &str, manager: PackageManager) -> BootstrapOutcome {
    println!("{}", format!("running 'git init' in {project_name}").cyan());

    match process::git_init(project) {
        Ok(output) => {
            step("initialized version control");
            log::debug!("git init: {}", output.stdout);
        }
        Err(error) => {
            warn(&format!("git init failed: {error}"));
            println!(
                "{}",
                format!(
                    "skipping dependency install; run '{}' inside {} manually",
                    manager.install_command(),
                    project_name
                )
                .dimmed()
            );
            return BootstrapOutcome::InitFailed;
        }
    }

    let command = manager.install_command();
    println!(
        "{}",
        format!("installing dependencies with '{command}', this may take a while...").cyan()
    );

    let outcome = match process::install(manager, project) {
        Ok(output) => {
            step("dependencies installed");
            log::debug!("{}: {}", command, output.stdout);
            BootstrapOutcome::Completed
        }
        Err(error) => {
            warn(&format!(
                "failed to install dependencies, please run '{command}' manually"
            ));
            log::debug!("{command}: {error}");
            BootstrapOutcome::InstallFailed
        }
    };

    println!(
        "{}",
        format!("project {project_name} created successfully!").green()
    );
    println!("{}", format!("cd {project_name} to get started").green());

    outcome
}

/// Force-overwrites the platform-native subtree of an existing project from
/// the template side: app/, vendor/, the package manifest, the version marker
/// and the prebuilt script bundle. Touches no project manifests and spawns no
/// processes; safe to repeat.
pub fn refresh_core(
    template_dir: &Path,
    project_dir: &Path,
    platform: &str,
) -> Result<(), ProjectError> {
    let paths = PlatformPaths::resolve(template_dir, project_dir, platform, DEFAULT_SOURCE_DIR);

    log::debug!("app path: {}", paths.app.template.display());
    log::debug!("project app dir: {}", paths.app.destination.display());
    log::debug!("version marker: {}", paths.version_marker.template.display());
    log::debug!("script bundle: {}", paths.script_bundle.template.display());

    ensure_dir(&paths.app.destination)?;

    copy::copy_tree(&paths.app.template, &paths.app.destination)?;
    copy::copy_file(
        &paths.version_marker.template,
        &paths.version_marker.destination,
    )?;
    copy::copy_file(
        &paths.script_bundle.template,
        &paths.script_bundle.destination,
    )?;
    copy::copy_tree(&paths.vendor.template, &paths.vendor.destination)?;
    copy::copy_file(
        &paths.spm_manifest.template,
        &paths.spm_manifest.destination,
    )?;

    step(&format!("refreshed platform core: {platform}"));

    Ok(())
}

/// Renders a fresh page stylesheet into the project's source tree.
pub fn create_page(
    template_dir: &Path,
    project_dir: &Path,
    source_subdir: &str,
    page: &str,
) -> Result<(), ProjectError> {
    let dest = project_dir.join(source_subdir).join(format!("{page}.css"));

    template::render(template_dir, &TemplateId::Stylesheet, &Context::new(), &dest)?;

    step(&format!("created file: {}", dest.display()));

    Ok(())
}
