use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use clap::Parser;
use n1ght_cli::commands::cli::{Args, Commands, DatabaseArgs};
use n1ght_cli::commands::{database, decompile, scan};
use n1ght_core::config::AppConfig;
use n1ght_core::context::AppContext;
use n1ght_core::error::{CliError, ToolInvocationError};
use n1ght_core::runner::{ToolInvocation, ToolInvoker};

/// Fails any invocation whose arguments mention one of `reject`.
#[derive(Default)]
struct FakeInvoker {
    reject: Vec<String>,
    seen: Mutex<Vec<Vec<String>>>,
}

#[async_trait]
impl ToolInvoker for FakeInvoker {
    async fn invoke(&self, inv: &ToolInvocation) -> Result<String, ToolInvocationError> {
        self.seen.lock().unwrap().push(inv.args.clone());
        let joined = inv.args.join(" ");
        if self.reject.iter().any(|r| joined.contains(r.as_str())) {
            return Err(ToolInvocationError::NonZeroExit {
                program: inv.program.clone(),
                code: Some(1),
                output: format!("rejected: {joined}"),
            });
        }
        Ok("done".to_string())
    }
}

fn touch(p: &Path) {
    std::fs::create_dir_all(p.parent().unwrap()).unwrap();
    std::fs::write(p, b"x").unwrap();
}

fn config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.tools.java = Some("java".into());
    cfg.tools.codeql = Some("codeql".into());
    cfg.tools.ant = Some("ant".into());
    cfg
}

#[tokio::test]
async fn decompile_falls_back_per_jar() {
    let dir = tempfile::tempdir().unwrap();
    let app = dir.path().join("app");
    touch(&app.join("WEB-INF/lib/good.jar"));
    touch(&app.join("WEB-INF/lib/odd.jar"));
    let out = dir.path().join("src1");

    // Procyon chokes on odd.jar only.
    let odd = app.join("WEB-INF/lib/odd.jar");
    let invoker = Arc::new(FakeInvoker {
        reject: vec![format!("procyon-decompiler-0.6.0.jar {}", odd.display())],
        ..FakeInvoker::default()
    });
    let ctx = AppContext::with_invoker(config(), invoker.clone());

    let args = Args::try_parse_from([
        "codeql-n1ght",
        "--concurrent",
        "decompile",
        "--input",
        app.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
    ])
    .unwrap();
    let Commands::Decompile(d) = &args.command else {
        panic!("expected decompile");
    };

    let code = decompile::handle_decompile(d.clone(), &args, &ctx).await.unwrap();
    assert_eq!(code, 0);
    assert!(out.is_dir());
    // good: procyon; odd: procyon then fernflower.
    assert_eq!(invoker.seen.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn scan_reports_failures_through_exit_code_and_summary_file() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("db");
    std::fs::create_dir_all(&db).unwrap();
    let ql = dir.path().join("qlLibs");
    touch(&ql.join("java/Good.ql"));
    touch(&ql.join("java/Broken.ql"));
    let results = dir.path().join("results");
    let summary_path = dir.path().join("summary.json");

    let invoker = Arc::new(FakeInvoker {
        reject: vec!["Broken.ql".to_string()],
        ..FakeInvoker::default()
    });
    let ctx = AppContext::with_invoker(config(), invoker);

    let args = Args::try_parse_from([
        "codeql-n1ght",
        "--summary-json",
        summary_path.to_str().unwrap(),
        "scan",
        "--db",
        db.to_str().unwrap(),
        "--ql",
        ql.to_str().unwrap(),
        "--results-dir",
        results.to_str().unwrap(),
    ])
    .unwrap();
    let Commands::Scan(s) = &args.command else {
        panic!("expected scan");
    };

    let code = scan::handle_scan(s.clone(), &args, &ctx).await.unwrap();
    assert_eq!(code, 1);

    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary_path).unwrap()).unwrap();
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["failed"], 1);
    assert_eq!(summary["failures"][0]["job_id"], "java/Broken.ql");
}

#[tokio::test]
async fn zero_workers_is_rejected_before_scanning() {
    let dir = tempfile::tempdir().unwrap();
    let invoker = Arc::new(FakeInvoker::default());
    let ctx = AppContext::with_invoker(config(), invoker.clone());

    let args = Args::try_parse_from([
        "codeql-n1ght",
        "--concurrent",
        "--max-concurrency",
        "0",
        "scan",
        "--db",
        dir.path().to_str().unwrap(),
    ])
    .unwrap();
    let Commands::Scan(s) = &args.command else {
        panic!("expected scan");
    };

    let err = scan::handle_scan(s.clone(), &args, &ctx).await.unwrap_err();
    assert!(matches!(err, CliError::Executor(_)));
    assert_eq!(err.exit_code(), 11);
    assert!(invoker.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn negative_worker_count_is_rejected_before_decompiling() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("lib/a.jar"));
    let invoker = Arc::new(FakeInvoker::default());
    let ctx = AppContext::with_invoker(config(), invoker.clone());

    let args = Args::try_parse_from([
        "codeql-n1ght",
        "--concurrent",
        "--max-concurrency",
        "-1",
        "decompile",
        "--input",
        dir.path().to_str().unwrap(),
    ])
    .unwrap();
    let Commands::Decompile(d) = &args.command else {
        panic!("expected decompile");
    };

    let err = decompile::handle_decompile(d.clone(), &args, &ctx)
        .await
        .unwrap_err();
    assert_eq!(err.exit_code(), 11);
    assert!(invoker.seen.lock().unwrap().is_empty());
}

fn database_args(root: &Path, db: &Path) -> DatabaseArgs {
    let args = Args::try_parse_from([
        "codeql-n1ght",
        "database",
        "--source-root",
        root.to_str().unwrap(),
        "--db",
        db.to_str().unwrap(),
        "--classpath",
        root.join("jars").to_str().unwrap(),
    ])
    .unwrap();
    let Commands::Database(d) = args.command else {
        panic!("expected database");
    };
    d
}

#[tokio::test]
async fn database_writes_build_file_and_runs_codeql() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("createdabase");
    touch(&root.join("src1/com/acme/App.java"));
    touch(&root.join("src1/com/acme/Extra.kt"));
    let db = dir.path().join("lib");

    let invoker = Arc::new(FakeInvoker::default());
    let ctx = AppContext::with_invoker(config(), invoker.clone());
    let d = database_args(&root, &db);

    let code = database::handle_database(d, &ctx).await.unwrap();
    assert_eq!(code, 0);

    let xml = std::fs::read_to_string(root.join("build.xml")).unwrap();
    assert!(xml.contains(&format!("<fileset dir=\"{}\">", root.join("jars").display())));
    assert!(!root.join("src1/com/acme/Extra.kt").exists());

    let seen = invoker.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(&seen[0][..3], &["database", "create", db.to_str().unwrap()]);
    assert!(seen[0].contains(&"--command=ant -f build.xml".to_string()));
}

#[tokio::test]
async fn database_failure_is_a_command_error() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("createdabase");
    touch(&root.join("src1/App.java"));

    let invoker = Arc::new(FakeInvoker {
        reject: vec!["create".to_string()],
        ..FakeInvoker::default()
    });
    let ctx = AppContext::with_invoker(config(), invoker);
    let d = database_args(&root, &dir.path().join("lib"));

    let err = database::handle_database(d, &ctx).await.unwrap_err();
    assert_eq!(err.exit_code(), 20);
    assert!(err.to_string().contains("rejected"));
}
