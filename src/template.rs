use crate::errors::{FileOperation, IoError};
use miette::Diagnostic;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tera::{Context, Tera};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum TemplateError {
    #[error("I/O error within template domain")]
    #[diagnostic(code(sprout::template::io))]
    Io(#[from] IoError),

    #[error("template file not found: '{path}'")]
    #[diagnostic(
        code(sprout::template::not_found),
        help("Make sure the template root contains the bundled template files")
    )]
    NotFound { path: PathBuf },

    #[error("error occurred attempting to render template '{path}'")]
    #[diagnostic(
        code(sprout::template::render),
        help("A placeholder in the template has no matching value in the render context")
    )]
    Render {
        path: PathBuf,
        #[source]
        source: tera::Error,
    },
}

const TERA_FILE_EXTENSION: &str = "tera";

/// Logical names for the render-able files a template ships. Each maps to a
/// fixed relative path under the template directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateId {
    Pkg,
    ProjectConfig,
    Gitignore,
    Editorconfig,
    IndexHtml,
    Stylesheet,
    Npmrc,
    BuildPri,
    AppConfig,
    YarnLock { version: String },
}
impl TemplateId {
    pub fn relative_path(&self) -> PathBuf {
        let tera = |name: &str| PathBuf::from(format!("{name}.{TERA_FILE_EXTENSION}"));

        match self {
            Self::Pkg => tera("package.json"),
            Self::ProjectConfig => tera("project.config.json"),
            Self::Gitignore => tera("gitignore"),
            Self::Editorconfig => tera("editorconfig"),
            Self::IndexHtml => tera("index.html"),
            Self::Stylesheet => tera("index.css"),
            Self::Npmrc => tera("npmrc"),
            Self::BuildPri => Path::new("platformconfig").join(tera("build.pri")),
            Self::AppConfig => Path::new("platformconfig").join(tera("appconfig.xml")),
            // Lockfiles are versioned per release and carry no placeholders.
            Self::YarnLock { version } => {
                Path::new("yarn-lockfiles").join(format!("{version}-yarn.lock"))
            }
        }
    }

    pub fn exists_in(&self, template_dir: &Path) -> bool {
        template_dir.join(self.relative_path()).is_file()
    }
}

/// Renders the named template with `ctx` and writes the result to `dest`,
/// creating parent directories as needed. Re-rendering with the same context
/// overwrites deterministically.
pub fn render(
    template_dir: &Path,
    id: &TemplateId,
    ctx: &Context,
    dest: &Path,
) -> Result<(), TemplateError> {
    let source = template_dir.join(id.relative_path());
    if !source.is_file() {
        return Err(TemplateError::NotFound { path: source });
    }

    let content = fs::read_to_string(&source)
        .map_err(|error| IoError::new(FileOperation::Read, source.clone(), error))?;

    let rendered = Tera::one_off(&content, ctx, false).map_err(|error| TemplateError::Render {
        path: source.clone(),
        source: error,
    })?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .map_err(|error| IoError::new(FileOperation::Mkdir, parent.to_path_buf(), error))?;
    }

    fs::write(dest, rendered)
        .map_err(|error| IoError::new(FileOperation::Write, dest.to_path_buf(), error))?;

    log::debug!("rendered {} -> {}", source.display(), dest.display());

    Ok(())
}
