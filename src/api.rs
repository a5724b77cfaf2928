use crate::{
    descriptor::ProjectDescriptor,
    manager, project,
    registry::{self, TemplateRegistry},
};
use std::path::Path;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum SproutError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Registry(#[from] registry::RegistryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Project(#[from] project::ProjectError),
}

/// Assembles a full project from the descriptor, then bootstraps it
/// (version-control init followed by dependency install).
///
/// # Errors
///
/// Returns a [`SproutError`] if:
///
/// - The template registry cannot be loaded or the template is unknown.
/// - A directory or file cannot be created, copied, or written.
/// - Tera fails to render one of the templated files.
///
/// Bootstrap failures are reported to the user as warnings and never surface
/// here; the assembled project directory stays usable either way.
pub fn create_project(
    template_root: &Path,
    descriptor: &ProjectDescriptor,
) -> Result<(), SproutError> {
    log::debug!("template root: {}", template_root.display());

    let registry = TemplateRegistry::load(template_root)?;
    let template_dir = registry.template_dir(&descriptor.template)?;

    let prefer_yarn = manager::should_use_yarn();
    let created = project::create_app(&template_dir, descriptor, prefer_yarn)?;

    let manager = manager::select(prefer_yarn, manager::should_use_cnpm());
    project::bootstrap(&created.path, &descriptor.project_name, manager);

    Ok(())
}

/// Repairs the platform-native subtree of an existing project directory.
///
/// # Errors
///
/// Returns a [`SproutError`] if the registry or template cannot be resolved,
/// or if any copy from the template side fails.
pub fn refresh_core(
    template_root: &Path,
    template: &str,
    project_dir: &Path,
    platform: &str,
) -> Result<(), SproutError> {
    let registry = TemplateRegistry::load(template_root)?;
    let template_dir = registry.template_dir(template)?;

    project::refresh_core(&template_dir, project_dir, platform)?;

    Ok(())
}

/// Renders a new page stylesheet into an existing project's source tree.
///
/// # Errors
///
/// Returns a [`SproutError`] if the registry or template cannot be resolved,
/// or if rendering fails.
pub fn create_page(
    template_root: &Path,
    template: &str,
    project_dir: &Path,
    source_subdir: &str,
    page: &str,
) -> Result<(), SproutError> {
    let registry = TemplateRegistry::load(template_root)?;
    let template_dir = registry.template_dir(template)?;

    project::create_page(&template_dir, project_dir, source_subdir, page)?;

    Ok(())
}
