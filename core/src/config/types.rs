use serde::{Deserialize, Serialize};

use crate::executor::types::ExecutionConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub executor: ExecutionConfig,

    #[serde(default)]
    pub runner: RunnerConfig,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub decompile: DecompileConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "n1ght_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_file() -> bool {
    false
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Upper bound on captured output per invocation; the tail is kept.
    #[serde(default = "default_capture_bytes")]
    pub capture_bytes: usize,
}

fn default_capture_bytes() -> usize {
    1024 * 1024
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            capture_bytes: default_capture_bytes(),
        }
    }
}

/// Where the external tools live. Explicit paths win over discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_tools_dir")]
    pub tools_dir: String,

    #[serde(default)]
    pub java: Option<String>,

    #[serde(default)]
    pub codeql: Option<String>,

    /// Ant runs the build that `codeql database create` traces.
    #[serde(default)]
    pub ant: Option<String>,

    #[serde(default = "default_procyon_jar")]
    pub procyon_jar: String,

    #[serde(default = "default_fernflower_jar")]
    pub fernflower_jar: String,
}

fn default_tools_dir() -> String {
    "./tools".to_string()
}

fn default_procyon_jar() -> String {
    "tools/procyon-decompiler-0.6.0.jar".to_string()
}

fn default_fernflower_jar() -> String {
    "tools/java-decompiler.jar".to_string()
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            tools_dir: default_tools_dir(),
            java: None,
            codeql: None,
            ant: None,
            procyon_jar: default_procyon_jar(),
            fernflower_jar: default_fernflower_jar(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecompileConfig {
    /// Primary decompiler: "procyon" or "fernflower". The other one is the fallback.
    #[serde(default = "default_decompiler")]
    pub decompiler: String,
}

fn default_decompiler() -> String {
    "procyon".to_string()
}

impl Default for DecompileConfig {
    fn default() -> Self {
        Self {
            decompiler: default_decompiler(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// `--threads` handed to every codeql invocation.
    #[serde(default = "default_scan_threads")]
    pub threads: u32,

    #[serde(default = "default_results_dir")]
    pub results_dir: String,
}

fn default_scan_threads() -> u32 {
    20
}

fn default_results_dir() -> String {
    "results".to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threads: default_scan_threads(),
            results_dir: default_results_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `--threads` for `codeql database create`; 0 lets codeql use every core.
    #[serde(default)]
    pub threads: u32,

    /// `--ram` in MB. Left to codeql when unset.
    #[serde(default)]
    pub ram_mb: Option<u32>,

    /// Tomcat install whose `lib` and `bin` jars go on the compile classpath.
    /// Falls back to `CATALINA_HOME`.
    #[serde(default)]
    pub tomcat_dir: Option<String>,
}
