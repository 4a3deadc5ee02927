use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use n1ght_core::config::ToolsConfig;

/// Resolves tool executables the way installs are usually laid out: a
/// `*_HOME` variable first, then the bundled tools directory, then `PATH`.
#[derive(Debug, Clone)]
pub struct ToolLocator {
    tools_dir: PathBuf,
}

impl ToolLocator {
    pub fn new(tools_dir: impl Into<PathBuf>) -> Self {
        Self {
            tools_dir: tools_dir.into(),
        }
    }

    pub fn from_config(cfg: &ToolsConfig) -> Self {
        Self::new(&cfg.tools_dir)
    }

    /// Candidate paths in lookup order, before the `PATH` search.
    pub fn candidates(&self, env_home: Option<&Path>, sub_dir: &str, exe: &str) -> Vec<PathBuf> {
        let mut out = Vec::with_capacity(4);
        if let Some(home) = env_home {
            out.push(home.join("bin").join(exe));
            out.push(home.join(exe));
        }
        out.push(self.tools_dir.join(sub_dir).join("bin").join(exe));
        out.push(self.tools_dir.join(sub_dir).join(exe));
        out
    }

    pub fn locate(&self, env_var: &str, sub_dir: &str, base_name: &str) -> Result<PathBuf> {
        self.find(env_var, sub_dir, base_name, &exe_name(base_name))
    }

    fn find(&self, env_var: &str, sub_dir: &str, base_name: &str, exe: &str) -> Result<PathBuf> {
        let home = std::env::var_os(env_var)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        if let Some(found) = self
            .candidates(home.as_deref(), sub_dir, exe)
            .into_iter()
            .find(|p| p.is_file())
        {
            tracing::debug!(tool = base_name, path = %found.display(), "tool resolved");
            return Ok(found);
        }

        which::which(exe).map_err(|_| {
            anyhow!(
                "cannot find {exe}: set {env_var}, install it under {}, or put it on PATH",
                self.tools_dir.join(sub_dir).display()
            )
        })
    }

    pub fn java(&self, explicit: Option<&str>) -> Result<PathBuf> {
        match explicit {
            Some(p) => Ok(PathBuf::from(p)),
            None => self.locate("JAVA_HOME", "jdk", "java"),
        }
    }

    pub fn codeql(&self, explicit: Option<&str>) -> Result<PathBuf> {
        match explicit {
            Some(p) => Ok(PathBuf::from(p)),
            None => self.locate("CODEQL_HOME", "codeql", "codeql"),
        }
    }

    /// Ant ships as a shell script, `ant.bat` on Windows.
    pub fn ant(&self, explicit: Option<&str>) -> Result<PathBuf> {
        match explicit {
            Some(p) => Ok(PathBuf::from(p)),
            None => self.find("ANT_HOME", "ant", "ant", &script_name("ant")),
        }
    }
}

fn script_name(base: &str) -> String {
    if cfg!(windows) {
        format!("{base}.bat")
    } else {
        base.to_string()
    }
}

fn exe_name(base: &str) -> String {
    format!("{base}{}", std::env::consts::EXE_SUFFIX)
}
