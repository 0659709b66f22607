//! Deployment collaborator seams.
//!
//! Archive scanning and manifest parsing are not this crate's work. The
//! registry resolves *where* a module lives from its deployment mode, then
//! hands the location to a [`ModuleSource`] — the collaborator that turns a
//! descriptor source into a populated [`ModuleDesc`].

use std::path::PathBuf;

use axon_core::ModuleDesc;

use crate::error::ConfigError;
use crate::registry::DeploymentMode;

/// Repository subfolder that holds module archives.
pub const MODULE_FOLDER: &str = "modules";

/// Registry parameter naming the module directory in descriptor-file mode.
pub const MODULE_DIR_PARAM: &str = "moduleDir";

/// A module's resolved descriptor source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleArchive {
    pub local_name: String,
    pub path: PathBuf,
}

/// Builds module descriptors from resolved archives.
///
/// Implementations parse the module's manifest and yield a populated
/// [`ModuleDesc`], including its handler rules. The registry consults the
/// source from `engage_module` when the requested module is not yet known.
pub trait ModuleSource: Send + Sync {
    /// Parses the archive into a module descriptor.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidModule`] if the descriptor is missing,
    /// unparseable or unnamed; [`ConfigError::AllocationFailure`] if the
    /// source runs out of resources while reading it.
    fn build_module(&self, archive: &ModuleArchive) -> Result<ModuleDesc, ConfigError>;
}

/// Resolves a module's on-disk location for the given deployment mode.
///
/// Repository mode joins the repository root with the fixed
/// [`MODULE_FOLDER`] convention; descriptor-file mode requires the
/// `moduleDir` parameter value. Only the path is computed here — existence
/// and traversal are the archive scanner's concern.
///
/// # Errors
///
/// [`ConfigError::InvalidModule`] when neither the deployment mode nor a
/// `moduleDir` parameter can produce a location.
pub fn locate_module_archive(
    mode: Option<&DeploymentMode>,
    module_dir: Option<&str>,
    local_name: &str,
) -> Result<ModuleArchive, ConfigError> {
    let path = match mode {
        Some(DeploymentMode::Repository(root)) => {
            root.join(MODULE_FOLDER).join(local_name)
        }
        Some(DeploymentMode::Descriptor(_)) | None => match module_dir {
            Some(dir) => PathBuf::from(dir).join(local_name),
            None => {
                return Err(ConfigError::InvalidModule {
                    name: local_name.to_string(),
                    reason: format!(
                        "no repository is configured and the {MODULE_DIR_PARAM} parameter is not set"
                    ),
                });
            }
        },
    };

    Ok(ModuleArchive {
        local_name: local_name.to_string(),
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_mode_uses_the_modules_subfolder() {
        let root = tempfile::tempdir().unwrap();
        let mode = DeploymentMode::Repository(root.path().to_path_buf());

        let archive = locate_module_archive(Some(&mode), None, "logging").unwrap();
        assert_eq!(archive.local_name, "logging");
        assert_eq!(archive.path, root.path().join("modules").join("logging"));
    }

    #[test]
    fn descriptor_mode_requires_the_module_dir_parameter() {
        let descriptor = tempfile::NamedTempFile::new().unwrap();
        let mode = DeploymentMode::Descriptor(descriptor.path().to_path_buf());

        let err = locate_module_archive(Some(&mode), None, "logging").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidModule { ref name, .. } if name == "logging"));

        let archive =
            locate_module_archive(Some(&mode), Some("/opt/axon/modules"), "logging").unwrap();
        assert_eq!(
            archive.path,
            PathBuf::from("/opt/axon/modules").join("logging")
        );
    }

    #[test]
    fn module_dir_parameter_works_without_a_mode() {
        let archive = locate_module_archive(None, Some("/srv/modules"), "security").unwrap();
        assert_eq!(archive.path, PathBuf::from("/srv/modules").join("security"));
    }
}
