use crate::RotationWorld;
use cucumber::{given, then, when};
use scriptcue::config::{self, Config};
use scriptcue::run::RunOutcome;
use std::path::PathBuf;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OWNER: &str = "octo-org";
const REPO: &str = "scripts";
const TEMPLATE: &str = "Record a short walkthrough of the script.";

impl RotationWorld {
    async fn server(&mut self) -> &MockServer {
        if self.server.is_none() {
            self.server = Some(MockServer::start().await);
        }
        self.server.as_ref().expect("mock server was just started")
    }

    fn workdir(&mut self) -> PathBuf {
        self.workdir
            .get_or_insert_with(|| tempfile::tempdir().expect("Failed to create temp dir"))
            .path()
            .to_path_buf()
    }

    fn state_path(&mut self) -> PathBuf {
        self.workdir().join("state.txt")
    }

    async fn config(&mut self) -> Config {
        let dir = self.workdir();
        let template_path = dir.join("issue_template.txt");
        std::fs::write(&template_path, TEMPLATE).expect("Failed to write issue template");
        let base_url = self.server().await.uri();
        Config {
            owner: OWNER.to_string(),
            repo: REPO.to_string(),
            access_token: "acceptance-token".to_string(),
            api_base_url: base_url,
            scripts_dir: config::DEFAULT_SCRIPTS_DIR.to_string(),
            script_extension: config::DEFAULT_SCRIPT_EXTENSION.to_string(),
            template_file: template_path.to_string_lossy().into_owned(),
            state_file: dir.join("state.txt").to_string_lossy().into_owned(),
        }
    }

    async fn issue_requests(&mut self) -> Vec<serde_json::Value> {
        self.server()
            .await
            .received_requests()
            .await
            .expect("request recording is enabled")
            .iter()
            .filter(|request| request.method.as_str() == "POST")
            .map(|request| serde_json::from_slice(&request.body).expect("Issue body is JSON"))
            .collect()
    }
}

#[given(regex = r"^the repository lists (\d+) scripts?$")]
async fn given_repository_lists_scripts(world: &mut RotationWorld, count: usize) {
    let entries: Vec<serde_json::Value> = (1..=count)
        .map(|i| {
            serde_json::json!({
                "name": format!("script{i}.md"),
                "download_url": format!("https://raw.example/{OWNER}/{REPO}/scripts/english/script{i}.md"),
                "type": "file"
            })
        })
        .collect();
    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/contents/scripts/english")))
        .respond_with(ResponseTemplate::new(200).set_body_json(entries))
        .mount(world.server().await)
        .await;
}

#[given("the repository listing fails")]
async fn given_repository_listing_fails(world: &mut RotationWorld) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(world.server().await)
        .await;
}

#[given("no state file exists")]
async fn given_no_state_file(world: &mut RotationWorld) {
    let _ = std::fs::remove_file(world.state_path());
}

#[given(regex = r#"^the state file contains "(.*)"$"#)]
async fn given_state_file_contains(world: &mut RotationWorld, content: String) {
    std::fs::write(world.state_path(), content).expect("Failed to write state file");
}

#[given("issue creation succeeds")]
async fn given_issue_creation_succeeds(world: &mut RotationWorld) {
    Mock::given(method("POST"))
        .and(path(format!("/repos/{OWNER}/{REPO}/issues")))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "number": 1,
            "html_url": format!("https://github.com/{OWNER}/{REPO}/issues/1")
        })))
        .mount(world.server().await)
        .await;
}

#[given("issue creation fails")]
async fn given_issue_creation_fails(world: &mut RotationWorld) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(world.server().await)
        .await;
}

#[when("the rotation runs")]
async fn when_rotation_runs(world: &mut RotationWorld) {
    let config = world.config().await;
    let mut buffer: Vec<u8> = Vec::new();
    let writer_option: Option<&mut dyn std::io::Write> = Some(&mut buffer);

    let outcome = scriptcue::run::run(&config, writer_option)
        .await
        .expect("run should not fail");

    world.captured_output = buffer;
    world.outcome = Some(outcome);
}

#[then(regex = r"^an issue is created for script (\d+)$")]
async fn then_issue_created_for_script(world: &mut RotationWorld, script: usize) {
    let requests = world.issue_requests().await;
    let last = requests.last().expect("No issue was posted");
    assert_eq!(
        last["title"],
        format!("Create a Python video from the script #script{script}.md")
    );
    let body = last["body"].as_str().expect("Issue body is a string");
    assert!(body.contains(&format!("script{script}.md")), "body: {body}");
    assert!(body.ends_with(TEMPLATE), "body: {body}");
    assert!(
        matches!(world.outcome, Some(RunOutcome::Created { state_saved: true, .. })),
        "Unexpected outcome: {:?}",
        world.outcome
    );
}

#[then("no issue is created")]
async fn then_no_issue_created(world: &mut RotationWorld) {
    assert!(world.issue_requests().await.is_empty());
    assert_eq!(world.outcome, Some(RunOutcome::NoScripts));
}

#[then("the run reports a failed submission")]
async fn then_run_reports_failed_submission(world: &mut RotationWorld) {
    assert!(
        matches!(world.outcome, Some(RunOutcome::SubmissionFailed { .. })),
        "Unexpected outcome: {:?}",
        world.outcome
    );
}

#[then(regex = r#"^the state file contains "(.*)"$"#)]
async fn then_state_file_contains(world: &mut RotationWorld, expected: String) {
    let content = std::fs::read_to_string(world.state_path()).expect("State file is missing");
    assert_eq!(content, expected);
}

#[then(regex = r#"^the output should be "(.*)"$"#)]
async fn then_output_should_be(world: &mut RotationWorld, expected_output: String) {
    let output = String::from_utf8(world.captured_output.clone()).expect("Invalid UTF-8");
    assert_eq!(
        output.trim_end(),
        expected_output,
        "Expected output '{}', but got:\n---\n{}\n---",
        expected_output,
        output.trim_end()
    );
}
