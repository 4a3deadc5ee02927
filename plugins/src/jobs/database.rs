use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use super::glob_sorted;

/// Directory under the source root that holds compiled classes.
const BUILD_CLASSES_DIR: &str = "build_classes";

/// Ant project compiling `src_dir` into `build_classes` so codeql can trace
/// the javac calls. Every directory in `classpath_dirs` contributes its jars.
pub fn build_xml(src_dir: &str, classpath_dirs: &[PathBuf]) -> String {
    let mut filesets = String::new();
    for dir in classpath_dirs {
        filesets.push_str(&format!(
            "    <fileset dir=\"{}\">\n      <include name=\"*.jar\"/>\n    </fileset>\n",
            xml_escape(&dir.to_string_lossy())
        ));
    }

    format!(
        r#"<project name="n1ght" basedir="." default="build">
  <property name="src.dir" value="{src}"/>
  <property name="build.dir" value="{build}"/>
  <path id="master-classpath">
{filesets}  </path>
  <target name="build" description="Compile source tree java files">
    <mkdir dir="${{build.dir}}"/>
    <javac destdir="${{build.dir}}" source="8" target="8" fork="true" optimize="off" debug="on" failonerror="false" includeantruntime="false">
      <src path="${{src.dir}}"/>
      <classpath refid="master-classpath"/>
    </javac>
  </target>
</project>
"#,
        src = xml_escape(src_dir),
        build = BUILD_CLASSES_DIR,
    )
}

/// Jar directories of a Tomcat install, skipping ones that are missing.
pub fn tomcat_classpath(tomcat: &Path) -> Vec<PathBuf> {
    ["lib", "bin"]
        .iter()
        .map(|sub| tomcat.join(sub))
        .filter(|p| p.is_dir())
        .collect()
}

/// Write `build.xml` into `source_root`, replacing any previous one.
pub fn write_build_xml(source_root: &Path, src_dir: &str, classpath_dirs: &[PathBuf]) -> Result<PathBuf> {
    if !source_root.join(src_dir).is_dir() {
        bail!(
            "source directory {} does not exist",
            source_root.join(src_dir).display()
        );
    }
    let path = source_root.join("build.xml");
    std::fs::write(&path, build_xml(src_dir, classpath_dirs))
        .with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), classpath = classpath_dirs.len(), "build.xml written");
    Ok(path)
}

/// Delete sources javac cannot build as part of a flat source tree:
/// Kotlin files and `module-info.java`. Returns how many went.
pub fn remove_uncompilable_sources(src_dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for pattern in ["**/*.kt", "**/module-info.java"] {
        for file in glob_sorted(src_dir, pattern)? {
            std::fs::remove_file(&file).with_context(|| format!("remove {}", file.display()))?;
            tracing::debug!(path = %file.display(), "removed uncompilable source");
            removed += 1;
        }
    }
    if removed > 0 {
        tracing::info!(removed, src = %src_dir.display(), "dropped sources javac cannot build");
    }
    Ok(removed)
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_xml_lists_each_classpath_dir() {
        let xml = build_xml(
            "src1",
            &[PathBuf::from("/opt/tomcat/lib"), PathBuf::from("/opt/tomcat/bin")],
        );
        assert!(xml.contains(r#"<property name="src.dir" value="src1"/>"#));
        assert!(xml.contains(r#"<fileset dir="/opt/tomcat/lib">"#));
        assert!(xml.contains(r#"<fileset dir="/opt/tomcat/bin">"#));
        assert!(xml.contains(r#"<mkdir dir="${build.dir}"/>"#));
        assert!(xml.contains(r#"value="build_classes""#));
    }

    #[test]
    fn build_xml_escapes_paths() {
        let xml = build_xml("src1", &[PathBuf::from("/srv/a&b")]);
        assert!(xml.contains("/srv/a&amp;b"));
    }

    #[test]
    fn write_requires_the_source_tree() {
        let dir = tempfile::tempdir().unwrap();
        assert!(write_build_xml(dir.path(), "src1", &[]).is_err());

        std::fs::create_dir(dir.path().join("src1")).unwrap();
        let path = write_build_xml(dir.path(), "src1", &[]).unwrap();
        assert!(std::fs::read_to_string(path).unwrap().contains("<project"));
    }

    #[test]
    fn kotlin_and_module_info_are_removed() {
        let dir = tempfile::tempdir().unwrap();
        let keep = dir.path().join("com/acme/App.java");
        let kt = dir.path().join("com/acme/Util.kt");
        let module = dir.path().join("module-info.java");
        for f in [&keep, &kt, &module] {
            std::fs::create_dir_all(f.parent().unwrap()).unwrap();
            std::fs::write(f, b"x").unwrap();
        }

        assert_eq!(remove_uncompilable_sources(dir.path()).unwrap(), 2);
        assert!(keep.exists());
        assert!(!kt.exists());
        assert!(!module.exists());
    }

    #[test]
    fn tomcat_classpath_skips_missing_dirs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("lib")).unwrap();
        assert_eq!(tomcat_classpath(dir.path()), vec![dir.path().join("lib")]);
    }
}
