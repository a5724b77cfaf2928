use crate::errors::{FileOperation, IoError};
use indexmap::IndexMap;
use miette::Diagnostic;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const REGISTRY_FILE: &str = "templates.toml";

#[derive(Error, Debug, Diagnostic)]
pub enum RegistryError {
    #[error("I/O error within template registry")]
    #[diagnostic(code(sprout::registry::io))]
    Io(#[from] IoError),

    #[error("unable to parse template registry at '{path}'")]
    #[diagnostic(code(sprout::registry::parse_toml), help("Review templates.toml"))]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no template registered with name: {name}")]
    #[diagnostic(
        code(sprout::registry::unknown_template),
        help("templates.toml in the template root lists the available templates")
    )]
    UnknownTemplate { name: String },
}

#[derive(Debug, Deserialize, Clone)]
pub struct TemplateInfo {
    pub path: String,
}

/// The set of templates bundled under a template root, keyed by their logical
/// name. Loaded from `templates.toml` next to the template directories.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    pub root: PathBuf,
    pub templates: IndexMap<String, TemplateInfo>,
}
impl TemplateRegistry {
    pub fn load(root: &Path) -> Result<Self, RegistryError> {
        let manifest = root.join(REGISTRY_FILE);

        let content = fs::read_to_string(&manifest)
            .map_err(|error| IoError::new(FileOperation::Read, manifest.clone(), error))?;

        let templates = toml::from_str(&content).map_err(|error| RegistryError::ParseToml {
            path: manifest,
            source: error,
        })?;

        Ok(Self {
            root: root.to_path_buf(),
            templates,
        })
    }

    /// Resolves the directory a template's files live in.
    pub fn template_dir(&self, name: &str) -> Result<PathBuf, RegistryError> {
        let info = self
            .templates
            .get(name)
            .ok_or_else(|| RegistryError::UnknownTemplate {
                name: name.to_string(),
            })?;

        Ok(self.root.join(&info.path))
    }
}
