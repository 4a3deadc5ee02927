use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use n1ght_core::executor::Job;

use super::glob_sorted;

/// Dependency directories of an extracted Spring Boot jar, WAR, or plain
/// distribution, in lookup order.
pub const LIB_DIR_CANDIDATES: [&str; 3] = ["BOOT-INF/lib", "WEB-INF/lib", "lib"];

pub fn find_lib_dir(root: &Path) -> Option<PathBuf> {
    LIB_DIR_CANDIDATES
        .iter()
        .map(|rel| root.join(rel))
        .find(|p| p.is_dir())
}

pub fn discover_jars(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("dependency directory {} does not exist", dir.display());
    }
    glob_sorted(dir, "*.jar")
}

/// Which dependency jars get decompiled.
#[derive(Debug, Clone)]
pub enum DependencySelection {
    All,
    None,
    /// Jars whose file name matches any of the patterns.
    Matching(Vec<glob::Pattern>),
}

impl DependencySelection {
    /// `all`, `none`, or a comma-separated list of file name globs.
    pub fn parse(spec: &str) -> Result<Self> {
        match spec.trim() {
            "" | "none" => Ok(Self::None),
            "all" => Ok(Self::All),
            list => {
                let patterns = list
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| {
                        glob::Pattern::new(s).with_context(|| format!("bad dependency pattern {s:?}"))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self::Matching(patterns))
            }
        }
    }

    pub fn select(&self, jars: Vec<PathBuf>) -> Vec<PathBuf> {
        match self {
            Self::All => jars,
            Self::None => Vec::new(),
            Self::Matching(patterns) => jars
                .into_iter()
                .filter(|jar| {
                    let name = file_name(jar);
                    patterns.iter().any(|p| p.matches(&name))
                })
                .collect(),
        }
    }
}

/// One job per jar, all writing into `output`.
pub fn decompile_jobs(jars: &[PathBuf], output: &Path, extra_args: &[String]) -> Vec<Job> {
    jars.iter()
        .map(|jar| Job::new(file_name(jar), jar, output).with_args(extra_args.iter().cloned()))
        .collect()
}

fn file_name(p: &Path) -> String {
    p.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| p.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn touch(p: &Path) {
        std::fs::create_dir_all(p.parent().unwrap()).unwrap();
        std::fs::write(p, b"PK").unwrap();
    }

    #[test]
    fn boot_inf_wins_over_plain_lib() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("lib")).unwrap();
        std::fs::create_dir_all(dir.path().join("BOOT-INF/lib")).unwrap();

        assert_eq!(find_lib_dir(dir.path()), Some(dir.path().join("BOOT-INF/lib")));
    }

    #[test]
    fn no_lib_dir_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(find_lib_dir(dir.path()), None);
    }

    #[test]
    fn discovers_only_jars_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("zeta.jar"));
        touch(&dir.path().join("alpha.jar"));
        touch(&dir.path().join("notes.txt"));

        let jars = discover_jars(dir.path()).unwrap();
        let names: Vec<_> = jars.iter().map(|p| file_name(p)).collect();
        assert_eq!(names, vec!["alpha.jar", "zeta.jar"]);
    }

    #[test]
    fn selection_filters_by_pattern() {
        let jars = vec![
            PathBuf::from("lib/spring-core-5.3.jar"),
            PathBuf::from("lib/fastjson-1.2.24.jar"),
            PathBuf::from("lib/app-internal.jar"),
        ];
        let sel = DependencySelection::parse("fastjson-*, app-*").unwrap();
        let picked: Vec<_> = sel.select(jars.clone()).iter().map(|p| file_name(p)).collect();
        assert_eq!(picked, vec!["fastjson-1.2.24.jar", "app-internal.jar"]);

        assert_eq!(DependencySelection::parse("all").unwrap().select(jars.clone()).len(), 3);
        assert!(DependencySelection::parse("none").unwrap().select(jars).is_empty());
    }

    #[test]
    fn jobs_use_file_name_as_id() {
        let jobs = decompile_jobs(
            &[PathBuf::from("lib/a.jar")],
            Path::new("out/src1"),
            &["-ss".to_string()],
        );
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "a.jar");
        assert_eq!(jobs[0].output, PathBuf::from("out/src1"));
        assert_eq!(jobs[0].args, vec!["-ss"]);
    }
}
