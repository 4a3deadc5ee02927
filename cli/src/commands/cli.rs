use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use n1ght_plugins::tools::DecompilerKind;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamFormat {
    Text,
    Jsonl,
}

impl StreamFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamFormat::Text => "text",
            StreamFormat::Jsonl => "jsonl",
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decompiler {
    Procyon,
    Fernflower,
}

impl From<Decompiler> for DecompilerKind {
    fn from(d: Decompiler) -> Self {
        match d {
            Decompiler::Procyon => DecompilerKind::Procyon,
            Decompiler::Fernflower => DecompilerKind::Fernflower,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "codeql-n1ght",
    version,
    about = "Decompile Java dependencies and run CodeQL query batches"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of ~/.n1ght/config.toml or ./n1ght.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Run jobs on a worker pool instead of one at a time.
    #[arg(long, global = true)]
    pub concurrent: bool,

    /// Worker count for --concurrent. Must be at least 1.
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub max_concurrency: Option<i64>,

    #[arg(long, value_enum, default_value_t = StreamFormat::Text, global = true)]
    pub stream_format: StreamFormat,

    /// Show a progress bar on stderr (text output on a terminal only).
    #[arg(long, global = true)]
    pub progress: bool,

    /// Print job start lines and fallback warnings.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write the run summary as JSON to this file.
    #[arg(long, global = true)]
    pub summary_json: Option<PathBuf>,

    /// Max bytes of tool output kept per invocation.
    #[arg(long, global = true)]
    pub capture_bytes: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decompile the dependency jars of an extracted application.
    Decompile(DecompileArgs),
    /// Run every query under a directory against a CodeQL database.
    Scan(ScanArgs),
    /// Compile a decompiled source tree with Ant and capture it as a CodeQL database.
    Database(DatabaseArgs),
    /// Show where the external tools resolve to and their versions.
    Tools,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DecompileArgs {
    /// Root of the extracted jar/war; its BOOT-INF/lib, WEB-INF/lib or lib is used.
    #[arg(long)]
    pub input: PathBuf,

    /// Use this dependency directory instead of searching under --input.
    #[arg(long)]
    pub lib_dir: Option<PathBuf>,

    /// Directory receiving decompiled sources.
    #[arg(long, short, default_value = "src1")]
    pub output: PathBuf,

    /// Primary decompiler; the other one is the fallback.
    #[arg(long, value_enum)]
    pub decompiler: Option<Decompiler>,

    /// `all`, `none`, or comma-separated jar name globs (e.g. "fastjson-*,app-*").
    #[arg(long, default_value = "all")]
    pub deps: String,

    /// Extra argument passed to the decompiler. Can be given multiple times.
    #[arg(long = "decompiler-arg", allow_hyphen_values = true, action = clap::ArgAction::Append)]
    pub decompiler_args: Vec<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ScanArgs {
    /// CodeQL database directory.
    #[arg(long, default_value = "./lib")]
    pub db: PathBuf,

    /// Directory searched recursively for .ql files.
    #[arg(long, default_value = "./qlLibs")]
    pub ql: PathBuf,

    /// `--threads` for each codeql invocation.
    #[arg(long)]
    pub threads: Option<u32>,

    #[arg(long)]
    pub results_dir: Option<PathBuf>,

    /// Remove the database's cache and results before scanning.
    #[arg(long)]
    pub clean_cache: bool,

    /// Keep SARIF/BQRS files from earlier scans.
    #[arg(long)]
    pub keep_results: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DatabaseArgs {
    /// Directory holding the decompiled sources; build.xml is written here.
    #[arg(long, default_value = ".")]
    pub source_root: PathBuf,

    /// Source directory, relative to --source-root.
    #[arg(long, default_value = "src1")]
    pub src: String,

    /// Where the database is created. Overwritten if it exists.
    #[arg(long, default_value = "./lib")]
    pub db: PathBuf,

    /// Tomcat install whose lib/ and bin/ jars are put on the classpath.
    #[arg(long)]
    pub tomcat: Option<PathBuf>,

    /// Extra directory of jars for the classpath. Can be given multiple times.
    #[arg(long = "classpath", action = clap::ArgAction::Append)]
    pub classpath: Vec<PathBuf>,

    /// `--threads` for codeql; 0 means one per core.
    #[arg(long)]
    pub threads: Option<u32>,

    /// `--ram` for codeql, in MB.
    #[arg(long)]
    pub ram: Option<u32>,
}
