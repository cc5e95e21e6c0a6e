//! Tool configuration stored in `cmdwrap.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::core::spec::DEFAULT_SHELL;
use crate::io::pipeline::TreeCopy;
use crate::io::process::Invoker;
use crate::tools::debian::{DpkgSourceExtract, PRISTINE_TAR, PristineTar, dch};
use crate::tools::git::Git;
use crate::tools::tar::Tar;
use crate::tools::{rm, zip};

/// Default config file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "cmdwrap.toml";

/// Which binaries back each tool wrapper.
///
/// Missing fields fall back to the names resolved through `PATH`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToolConfig {
    pub tar: String,
    pub git: String,
    pub rm: String,
    pub unzip: String,
    pub dch: String,
    pub dpkg_source: String,

    /// Absolute path; checked for executability when a wrapper is built.
    pub pristine_tar: PathBuf,

    /// Shell used for shell-interpreted invocations.
    pub shell: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            tar: "tar".to_string(),
            git: "git".to_string(),
            rm: "rm".to_string(),
            unzip: "unzip".to_string(),
            dch: "dch".to_string(),
            dpkg_source: "dpkg-source".to_string(),
            pristine_tar: PathBuf::from(PRISTINE_TAR),
            shell: DEFAULT_SHELL.to_string(),
        }
    }
}

impl ToolConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("tar", &self.tar),
            ("git", &self.git),
            ("rm", &self.rm),
            ("unzip", &self.unzip),
            ("dch", &self.dch),
            ("dpkg_source", &self.dpkg_source),
            ("shell", &self.shell),
        ] {
            if value.trim().is_empty() {
                return Err(anyhow!("{name} must be a non-empty program name"));
            }
        }
        if !self.pristine_tar.is_absolute() {
            return Err(anyhow!(
                "pristine_tar must be an absolute path, got {}",
                self.pristine_tar.display()
            ));
        }
        Ok(())
    }

    pub fn tar(&self) -> Tar {
        Tar::new(&self.tar)
    }

    pub fn git(&self) -> Git {
        Git::new(&self.git)
    }

    pub fn tree_copy(&self) -> TreeCopy {
        TreeCopy::with_tar(&self.tar)
    }

    pub fn remove_tree(&self, tree: &Path) -> Invoker {
        rm::remove_tree(&self.rm, tree)
    }

    pub fn unzip(&self, archive: &Path, dir: &Path) -> Invoker {
        zip::unpack(&self.unzip, archive, dir)
    }

    pub fn dch(&self, version: &str, msg: Option<&str>) -> Invoker {
        dch(&self.dch, version, msg)
    }

    pub fn dpkg_source(&self) -> DpkgSourceExtract {
        DpkgSourceExtract::new(&self.dpkg_source)
    }

    /// Fails unless the configured binary is an executable file.
    pub fn pristine_tar(&self) -> crate::Result<PristineTar> {
        PristineTar::new(&self.pristine_tar)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ToolConfig::default()`.
pub fn load_config(path: &Path) -> Result<ToolConfig> {
    if !path.exists() {
        let cfg = ToolConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ToolConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
