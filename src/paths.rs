use std::path::{Path, PathBuf};

pub const PLATFORMS_DIR: &str = "platforms";
pub const LIB_DIR: &str = "lib";
/// Name of the web source tree on the template side (demo tree included).
pub const TEMPLATE_SOURCE_DIR: &str = "www";
pub const SPM_MANIFEST: &str = "spm.json";
pub const VERSION_MARKER: &str = "VERSION";
pub const SCRIPT_BUNDLE: &str = "sprout.min.js";
pub const ENV_TEMPLATE_ROOT: &str = "SPROUT_TEMPLATE_ROOT";

/// Where the bundled templates live. An explicit flag wins, then the
/// environment variable, then the development checkout next to the manifest.
pub fn template_root(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    if let Ok(path) = std::env::var(ENV_TEMPLATE_ROOT) {
        return PathBuf::from(path);
    }
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"))
}

/// A template-side path and the destination it materializes at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPair {
    pub template: PathBuf,
    pub destination: PathBuf,
}
impl PathPair {
    fn resolve(template_dir: &Path, project_dir: &Path, relative: &Path) -> Self {
        Self {
            template: template_dir.join(relative),
            destination: project_dir.join(relative),
        }
    }
}

/// The platform-scoped locations touched by a core refresh. Both sides of each
/// pair share the same relative structure, so copying template to destination
/// always preserves layout.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    pub app: PathPair,
    pub vendor: PathPair,
    pub spm_manifest: PathPair,
    pub version_marker: PathPair,
    pub script_bundle: PathPair,
}
impl PlatformPaths {
    pub fn resolve(
        template_dir: &Path,
        project_dir: &Path,
        platform: &str,
        source_subdir: &str,
    ) -> Self {
        let platform_dir = Path::new(PLATFORMS_DIR).join(platform);
        let bundle = Path::new(source_subdir).join(LIB_DIR).join(SCRIPT_BUNDLE);

        Self {
            app: PathPair::resolve(template_dir, project_dir, &platform_dir.join("app")),
            vendor: PathPair::resolve(template_dir, project_dir, &platform_dir.join("vendor")),
            spm_manifest: PathPair::resolve(
                template_dir,
                project_dir,
                &platform_dir.join(SPM_MANIFEST),
            ),
            version_marker: PathPair::resolve(
                template_dir,
                project_dir,
                &platform_dir.join(VERSION_MARKER),
            ),
            script_bundle: PathPair::resolve(template_dir, project_dir, &bundle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_sides_share_relative_structure() {
        let template_dir = Path::new("/tpl/default");
        let project_dir = Path::new("/work/demo");
        let paths = PlatformPaths::resolve(template_dir, project_dir, "p1", "www");

        for pair in [
            &paths.app,
            &paths.vendor,
            &paths.spm_manifest,
            &paths.version_marker,
            &paths.script_bundle,
        ] {
            let template_rel = pair.template.strip_prefix(template_dir).unwrap();
            let destination_rel = pair.destination.strip_prefix(project_dir).unwrap();
            assert_eq!(template_rel, destination_rel);
        }
    }

    #[test]
    fn platform_paths_are_platform_scoped() {
        let paths = PlatformPaths::resolve(Path::new("/tpl"), Path::new("/dst"), "p1", "www");
        assert_eq!(paths.app.destination, PathBuf::from("/dst/platforms/p1/app"));
        assert_eq!(
            paths.version_marker.template,
            PathBuf::from("/tpl/platforms/p1/VERSION")
        );
        assert_eq!(
            paths.script_bundle.destination,
            PathBuf::from("/dst/www/lib/sprout.min.js")
        );
    }

    #[test]
    fn explicit_template_root_wins() {
        let explicit = PathBuf::from("/somewhere/else");
        assert_eq!(template_root(Some(explicit.clone())), explicit);
    }
}
