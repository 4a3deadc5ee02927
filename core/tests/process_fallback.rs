#![cfg(unix)]

use std::sync::Arc;

use n1ght_core::api::{
    Dispatcher, ExecutionConfig, FallbackPair, Job, JobTool, ProcessInvoker, ToolInvocation,
    ToolVariant,
};

/// `sh -c <script>` with the job input exported as `$INPUT`.
struct ShellTool {
    name: &'static str,
    script: &'static str,
}

impl JobTool for ShellTool {
    fn name(&self) -> &str {
        self.name
    }

    fn invocation(&self, job: &Job) -> ToolInvocation {
        ToolInvocation::new("sh")
            .arg("-c")
            .arg(self.script)
            .env("INPUT", job.input.to_string_lossy())
    }
}

#[tokio::test]
async fn real_processes_fall_back_on_non_zero_exit() {
    let primary = ShellTool {
        name: "picky",
        script: r#"case "$INPUT" in *bad*) echo "cannot read $INPUT" >&2; exit 2;; *) echo "picky did $INPUT";; esac"#,
    };
    let secondary = ShellTool {
        name: "lenient",
        script: r#"echo "lenient did $INPUT""#,
    };
    let pair = FallbackPair::new(Arc::new(primary), Arc::new(secondary));
    let jobs = vec![
        Job::new("good", "good.jar", "out"),
        Job::new("bad", "bad.jar", "out"),
    ];

    let summary = Dispatcher::new(Arc::new(ProcessInvoker::default()))
        .run(jobs, pair, &ExecutionConfig::concurrent(2))
        .await
        .unwrap();

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.via_secondary, 1);
    let bad = summary.outcomes.iter().find(|o| o.job_id == "bad").unwrap();
    assert_eq!(bad.via, ToolVariant::Secondary);
    assert!(bad.output.contains("lenient did bad.jar"));
    assert!(bad.warning.as_deref().unwrap().contains("cannot read bad.jar"));
}

#[tokio::test]
async fn missing_binaries_fail_the_job_not_the_run() {
    struct Missing(&'static str);
    impl JobTool for Missing {
        fn name(&self) -> &str {
            self.0
        }
        fn invocation(&self, _job: &Job) -> ToolInvocation {
            ToolInvocation::new(format!("/nonexistent/{}", self.0))
        }
    }

    let pair = FallbackPair::new(Arc::new(Missing("procyon")), Arc::new(Missing("fernflower")));
    let summary = Dispatcher::new(Arc::new(ProcessInvoker::default()))
        .run(vec![Job::new("a", "a.jar", "out")], pair, &ExecutionConfig::serial())
        .await
        .unwrap();

    assert_eq!(summary.failed, 1);
    let detail = &summary.failures[0].error;
    assert!(detail.contains("procyon: failed to start"));
    assert!(detail.contains("fernflower: failed to start"));
}
