use std::path::PathBuf;

pub const DEFAULT_TEMPLATE: &str = "default";
pub const DEFAULT_SOURCE_DIR: &str = "www";
pub const DEFAULT_PLATFORM: &str = "mobile";
pub const DEFAULT_TARGET: &str = "generic";

/// Stylesheet flavor requested for the new project.
///
/// Every variant currently renders the same default `index.css` entry file; the
/// variant still selects the matching preprocessor packages in the generated
/// manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CssVariant {
    #[default]
    Plain,
    Scss,
    Less,
}
impl CssVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "css",
            Self::Scss => "scss",
            Self::Less => "less",
        }
    }

    pub fn entry_file(&self) -> &'static str {
        "index.css"
    }
}
impl From<&str> for CssVariant {
    fn from(value: &str) -> Self {
        match value {
            "scss" | "sass" => Self::Scss,
            "less" => Self::Less,
            _ => Self::Plain,
        }
    }
}

/// Everything one assembly run needs to know, collected up front from CLI flags
/// and prompts. Immutable once built.
#[derive(Debug, Clone)]
pub struct ProjectDescriptor {
    pub project_name: String,
    /// Directory the project directory is created under.
    pub target_dir: PathBuf,
    /// Human-readable application name, used as the manifest description.
    pub app_name: String,
    /// Name of the web source subdirectory, e.g. "www".
    pub source_subdir: String,
    pub template: String,
    pub typescript: bool,
    pub css: CssVariant,
    pub platform: String,
    /// Reverse-domain application identifier, e.g. "com.example.myapp".
    pub app_id: String,
    /// Suffix selecting the native toolchain target.
    pub target_name: String,
    pub with_demo: bool,
}
impl ProjectDescriptor {
    pub fn project_path(&self) -> PathBuf {
        self.target_dir.join(&self.project_name)
    }

    pub fn device_target(&self) -> String {
        format!("target-armv7hl-{}", self.target_name)
    }

    pub fn simulator_target(&self) -> String {
        format!("target-i686-{}", self.target_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_variant_parses_aliases() {
        assert_eq!(CssVariant::from("scss"), CssVariant::Scss);
        assert_eq!(CssVariant::from("sass"), CssVariant::Scss);
        assert_eq!(CssVariant::from("less"), CssVariant::Less);
        assert_eq!(CssVariant::from("css"), CssVariant::Plain);
        assert_eq!(CssVariant::from("anything-else"), CssVariant::Plain);
    }

    #[test]
    fn every_css_variant_maps_to_the_default_entry_file() {
        for variant in [CssVariant::Plain, CssVariant::Scss, CssVariant::Less] {
            assert_eq!(variant.entry_file(), "index.css");
        }
    }

    #[test]
    fn target_ids_compose_from_target_name() {
        let descriptor = ProjectDescriptor {
            project_name: "demo".into(),
            target_dir: PathBuf::from("."),
            app_name: "Demo".into(),
            source_subdir: DEFAULT_SOURCE_DIR.into(),
            template: DEFAULT_TEMPLATE.into(),
            typescript: false,
            css: CssVariant::Plain,
            platform: DEFAULT_PLATFORM.into(),
            app_id: "com.example.demo".into(),
            target_name: "xuan".into(),
            with_demo: false,
        };
        assert_eq!(descriptor.device_target(), "target-armv7hl-xuan");
        assert_eq!(descriptor.simulator_target(), "target-i686-xuan");
        assert_eq!(descriptor.project_path(), PathBuf::from("./demo"));
    }
}
