use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

const WORKFLOWS: &str = r#"
arazzo: 1.0.1
info:
  title: Test
  version: 1.0.0
sourceDescriptions:
  - name: api
    type: openapi
    url: https://example.com/openapi.json
workflows:
  - workflowId: checkout
    dependsOn: [login]
    inputs:
      reference: $components.inputs.cart
    steps:
      - stepId: pay
        operationId: createPayment
        parameters:
          - reference: $components.parameters.auth
        outputs:
          receipt: $response.body#/id
  - workflowId: login
    summary: Sign in
    steps:
      - stepId: step1
        operationId: getToken
components:
  inputs:
    cart:
      type: object
      properties:
        cartId: { type: string, description: Cart to pay for }
  parameters:
    auth:
      name: Authorization
      in: header
      value: $inputs.token
"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_validate_command() {
    let tmp_dir = TempDir::new().unwrap();
    let path = write(&tmp_dir, "test.yaml", WORKFLOWS);

    let assert = Command::cargo_bin("arazzo")
        .unwrap()
        .args(["validate", &path])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("ok: valid Arazzo document (yaml)"), "{stdout}");
}

#[test]
fn test_validate_invalid_workflow() {
    let tmp_dir = TempDir::new().unwrap();
    let path = write(&tmp_dir, "invalid.yaml", "invalid: yaml: content");

    Command::cargo_bin("arazzo")
        .unwrap()
        .args(["validate", &path])
        .assert()
        .failure()
        .code(2); // VALIDATION_FAILED
}

#[test]
fn test_workflows_are_listed_in_dependency_order() {
    let tmp_dir = TempDir::new().unwrap();
    let path = write(&tmp_dir, "test.yaml", WORKFLOWS);

    let assert = Command::cargo_bin("arazzo")
        .unwrap()
        .args(["workflows", "--format", "json", &path])
        .assert()
        .success();
    let out: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(out["workflows"][0]["workflow_id"], "login");
    assert_eq!(out["workflows"][1]["workflow_id"], "checkout");
    assert_eq!(out["workflows"][1]["level"], 1);
    assert_eq!(out["levels"], serde_json::json!([["login"], ["checkout"]]));
}

#[test]
fn test_workflows_dot_format() {
    let tmp_dir = TempDir::new().unwrap();
    let path = write(&tmp_dir, "test.yaml", WORKFLOWS);

    let assert = Command::cargo_bin("arazzo")
        .unwrap()
        .args(["workflows", "--format", "dot", &path])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("digraph"));
    assert!(stdout.contains("\"login\" -> \"checkout\""));
}

#[test]
fn test_inspect_shows_resolved_inputs() {
    let tmp_dir = TempDir::new().unwrap();
    let path = write(&tmp_dir, "test.yaml", WORKFLOWS);

    let assert = Command::cargo_bin("arazzo")
        .unwrap()
        .args(["inspect", "--workflow", "checkout", "--format", "json", &path])
        .assert()
        .success();
    let out: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(out["depends_on"], serde_json::json!(["login"]));
    assert_eq!(out["inputs"][0]["name"], "cartId");
    assert_eq!(out["inputs"][0]["type"], "string");
    assert_eq!(out["steps"][0]["operation_id"], "createPayment");
    assert_eq!(out["steps"][0]["output_keys"], serde_json::json!(["receipt"]));
}

#[test]
fn test_inspect_requires_workflow_when_ambiguous() {
    let tmp_dir = TempDir::new().unwrap();
    let path = write(&tmp_dir, "test.yaml", WORKFLOWS);

    Command::cargo_bin("arazzo")
        .unwrap()
        .args(["inspect", &path])
        .assert()
        .code(2);
}

#[test]
fn test_inspect_reports_missing_workflows() {
    let tmp_dir = TempDir::new().unwrap();
    let doc = "arazzo: 1.0.1\ninfo: { title: t, version: v }\nworkflows: []\n";
    let path = write(&tmp_dir, "empty.yaml", doc);

    let assert = Command::cargo_bin("arazzo")
        .unwrap()
        .args(["inspect", &path])
        .assert()
        .code(2);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("no workflows found"), "{stderr}");
}

#[test]
fn test_resolve_lists_bindings() {
    let tmp_dir = TempDir::new().unwrap();
    let path = write(&tmp_dir, "test.yaml", WORKFLOWS);

    let assert = Command::cargo_bin("arazzo")
        .unwrap()
        .args(["resolve", "--format", "json", &path])
        .assert()
        .success();
    let out: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(
        out["resolved"],
        serde_json::json!([
            {
                "location": "$.workflows[0].inputs",
                "reference": "$components.inputs.cart",
                "section": "inputs"
            },
            {
                "location": "$.workflows[0].steps[0].parameters[0]",
                "reference": "$components.parameters.auth",
                "section": "parameters"
            }
        ])
    );
}
