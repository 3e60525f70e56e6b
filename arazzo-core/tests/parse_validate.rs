use arazzo_core::{parse_document_str, validate_document, DocumentFormat, ViolationKind};

fn minimal_valid_yaml() -> &'static str {
    r#"
arazzo: 1.0.1
info:
  title: Example
  version: 0.0.1
sourceDescriptions:
  - name: petStoreDescription
    url: https://example.com/openapi.yaml
    type: openapi
workflows:
  - workflowId: loginUser
    steps:
      - stepId: loginStep
        operationId: loginUser
"#
}

#[test]
fn parse_yaml_and_validate_ok() {
    let parsed = parse_document_str(minimal_valid_yaml(), DocumentFormat::Yaml).unwrap();
    validate_document(&parsed.document).unwrap();
}

#[test]
fn parse_auto_detects_yaml() {
    let parsed = parse_document_str(minimal_valid_yaml(), DocumentFormat::Auto).unwrap();
    assert_eq!(parsed.format, DocumentFormat::Yaml);
}

#[test]
fn parse_json_and_validate_ok() {
    let json = r#"
{
  "arazzo": "1.0.1",
  "info": { "title": "Example", "version": "0.0.1" },
  "sourceDescriptions": [
    { "name": "petStoreDescription", "url": "https://example.com/openapi.yaml", "type": "openapi" }
  ],
  "workflows": [
    {
      "workflowId": "loginUser",
      "steps": [
        { "stepId": "loginStep", "operationId": "loginUser" }
      ]
    }
  ]
}
"#;
    let parsed = parse_document_str(json, DocumentFormat::Json).unwrap();
    validate_document(&parsed.document).unwrap();
}

#[test]
fn parse_auto_detects_json() {
    let json = r#"{ "arazzo": "1.0.1", "info": { "title": "Example", "version": "0.0.1" }, "sourceDescriptions": [ { "name": "src1", "url": "https://example.com/openapi.yaml" } ], "workflows": [ { "workflowId": "w1", "steps": [ { "stepId": "s1", "operationId": "op1" } ] } ] }"#;
    let parsed = parse_document_str(json, DocumentFormat::Auto).unwrap();
    assert_eq!(parsed.format, DocumentFormat::Json);
}

#[test]
fn parse_auto_reports_yaml_error_for_yaml_looking_input() {
    let err = parse_document_str("not: [valid", DocumentFormat::Auto).unwrap_err();
    // Not JSON-looking, so the YAML error is the one reported.
    assert_eq!(err.format, DocumentFormat::Yaml);
    assert!(err.to_string().starts_with("failed to parse as YAML"));
}

#[test]
fn invalid_spec_version_is_rejected() {
    let bad = minimal_valid_yaml().replace("arazzo: 1.0.1", "arazzo: 2.0.0");
    let parsed = parse_document_str(&bad, DocumentFormat::Yaml).unwrap();
    let err = validate_document(&parsed.document).unwrap_err();
    assert!(err
        .of_kind(ViolationKind::Structure)
        .any(|v| v.path == "$.arazzo"));
}

#[test]
fn duplicate_workflow_ids_are_rejected() {
    let bad = r#"
arazzo: 1.0.1
info:
  title: Example
  version: 0.0.1
sourceDescriptions:
  - name: petStoreDescription
    url: https://example.com/openapi.yaml
workflows:
  - workflowId: w1
    steps:
      - stepId: s1
        operationId: op1
  - workflowId: w1
    steps:
      - stepId: s2
        operationId: op2
"#;
    let parsed = parse_document_str(bad, DocumentFormat::Yaml).unwrap();
    let err = validate_document(&parsed.document).unwrap_err();
    assert!(err
        .of_kind(ViolationKind::Uniqueness)
        .any(|v| v.path == "$.workflows[1].workflowId" && v.message.contains("\"w1\"")));
}

#[test]
fn step_must_target_exactly_one_of_operation_or_workflow() {
    let bad = r#"
arazzo: 1.0.1
info:
  title: Example
  version: 0.0.1
sourceDescriptions:
  - name: petStoreDescription
    url: https://example.com/openapi.yaml
workflows:
  - workflowId: w1
    steps:
      - stepId: s1
        operationId: op1
        workflowId: otherWorkflow
"#;
    let parsed = parse_document_str(bad, DocumentFormat::Yaml).unwrap();
    let err = validate_document(&parsed.document).unwrap_err();
    assert!(err
        .of_kind(ViolationKind::CallTarget)
        .any(|v| v.path.ends_with(".steps[0]")));
}

#[test]
fn operation_step_parameters_require_in() {
    let bad = r#"
arazzo: 1.0.1
info:
  title: Example
  version: 0.0.1
sourceDescriptions:
  - name: petStoreDescription
    url: https://example.com/openapi.yaml
workflows:
  - workflowId: w1
    steps:
      - stepId: s1
        operationId: op1
        parameters:
          - name: q
            value: 1
"#;
    let parsed = parse_document_str(bad, DocumentFormat::Yaml).unwrap();
    let err = validate_document(&parsed.document).unwrap_err();
    assert!(err
        .violations
        .iter()
        .any(|v| v.path.ends_with(".parameters[0].in")));
}

#[test]
fn goto_success_action_requires_step_or_workflow_id() {
    let bad = r#"
arazzo: 1.0.1
info:
  title: Example
  version: 0.0.1
sourceDescriptions:
  - name: petStoreDescription
    url: https://example.com/openapi.yaml
workflows:
  - workflowId: w1
    steps:
      - stepId: s1
        operationId: op1
        onSuccess:
          - name: next
            type: goto
"#;
    let parsed = parse_document_str(bad, DocumentFormat::Yaml).unwrap();
    let err = validate_document(&parsed.document).unwrap_err();
    assert!(err
        .violations
        .iter()
        .any(|v| v.message.contains("type=goto")));
}

#[test]
fn jsonpath_criterion_requires_context() {
    let bad = r#"
arazzo: 1.0.1
info:
  title: Example
  version: 0.0.1
sourceDescriptions:
  - name: petStoreDescription
    url: https://example.com/openapi.yaml
workflows:
  - workflowId: w1
    steps:
      - stepId: s1
        operationId: op1
        successCriteria:
          - condition: $[?count(@.pets) > 0]
            type: jsonpath
"#;
    let parsed = parse_document_str(bad, DocumentFormat::Yaml).unwrap();
    let err = validate_document(&parsed.document).unwrap_err();
    assert!(err
        .violations
        .iter()
        .any(|v| v.path.ends_with(".successCriteria[0].context")));
}

#[test]
fn components_keys_must_match_regex() {
    let bad = r#"
arazzo: 1.0.1
info:
  title: Example
  version: 0.0.1
sourceDescriptions:
  - name: petStoreDescription
    url: https://example.com/openapi.yaml
workflows:
  - workflowId: w1
    steps:
      - stepId: s1
        operationId: op1
components:
  parameters:
    "bad key!":
      name: q
      in: query
      value: 1
"#;
    let parsed = parse_document_str(bad, DocumentFormat::Yaml).unwrap();
    let err = validate_document(&parsed.document).unwrap_err();
    assert!(err
        .violations
        .iter()
        .any(|v| v.message.contains("map key must match")));
}

#[test]
fn invalid_runtime_expression_in_step_outputs_is_rejected() {
    let bad = r#"
arazzo: 1.0.1
info:
  title: Example
  version: 0.0.1
sourceDescriptions:
  - name: petStoreDescription
    url: https://example.com/openapi.yaml
workflows:
  - workflowId: w1
    steps:
      - stepId: s1
        operationId: op1
        outputs:
          x: $inputs..bad
"#;
    let parsed = parse_document_str(bad, DocumentFormat::Yaml).unwrap();
    let err = validate_document(&parsed.document).unwrap_err();
    assert!(err
        .violations
        .iter()
        .any(|v| v.path.ends_with(".steps[0].outputs.x")
            && v.message.contains("invalid runtime expression")));
}

#[test]
fn invalid_template_expression_in_operation_path_is_rejected() {
    let bad = r#"
arazzo: 1.0.1
info:
  title: Example
  version: 0.0.1
sourceDescriptions:
  - name: petStoreDescription
    url: https://example.com/openapi.yaml
workflows:
  - workflowId: w1
    steps:
      - stepId: s1
        operationPath: '{$sourceDescriptions..url}#/paths/~1pets/get'
"#;
    let parsed = parse_document_str(bad, DocumentFormat::Yaml).unwrap();
    let err = validate_document(&parsed.document).unwrap_err();
    assert!(err
        .violations
        .iter()
        .any(|v| v.path.ends_with(".steps[0].operationPath")
            && v.message.contains("invalid template expression")));
}

#[test]
fn invalid_embedded_expression_in_request_body_payload_is_rejected() {
    let bad = r#"
arazzo: 1.0.1
info:
  title: Example
  version: 0.0.1
sourceDescriptions:
  - name: petStoreDescription
    url: https://example.com/openapi.yaml
workflows:
  - workflowId: w1
    steps:
      - stepId: s1
        operationId: op1
        requestBody:
          contentType: application/json
          payload: '{\"petId\": \"{$inputs..pet_id}\"}'
"#;
    let parsed = parse_document_str(bad, DocumentFormat::Yaml).unwrap();
    let err = validate_document(&parsed.document).unwrap_err();
    assert!(err
        .violations
        .iter()
        .any(|v| v.path.ends_with(".steps[0].requestBody.payload")
            && v.message.contains("invalid expression inside value")));
}

fn with_workflows(workflows: &str) -> String {
    format!(
        r#"
arazzo: 1.0.1
info:
  title: Example
  version: 0.0.1
sourceDescriptions:
  - name: petStoreDescription
    url: https://example.com/openapi.yaml
workflows:
{workflows}"#
    )
}

fn violations(yaml: &str) -> Vec<arazzo_core::Violation> {
    let parsed = parse_document_str(yaml, DocumentFormat::Yaml).unwrap();
    validate_document(&parsed.document)
        .map(|()| Vec::new())
        .unwrap_or_else(|e| e.violations)
}

#[test]
fn depends_on_cycle_is_reported_once_with_full_path() {
    let doc = with_workflows(
        r#"
  - workflowId: a
    dependsOn: [b]
    steps:
      - stepId: s1
        operationId: op1
  - workflowId: b
    dependsOn: [a]
    steps:
      - stepId: s1
        operationId: op1
"#,
    );
    let cycles: Vec<_> = violations(&doc)
        .into_iter()
        .filter(|v| v.kind == ViolationKind::Cycle)
        .collect();
    assert_eq!(cycles.len(), 1, "{cycles:?}");
    assert_eq!(cycles[0].message, "dependsOn cycle: a -> b -> a");
    assert_eq!(cycles[0].path, "$.workflows[1].dependsOn");
}

#[test]
fn longer_cycle_reports_every_workflow_on_it() {
    let doc = with_workflows(
        r#"
  - workflowId: root
    dependsOn: [x]
    steps: [{ stepId: s, operationId: op }]
  - workflowId: x
    dependsOn: [y]
    steps: [{ stepId: s, operationId: op }]
  - workflowId: y
    dependsOn: [z]
    steps: [{ stepId: s, operationId: op }]
  - workflowId: z
    dependsOn: [x]
    steps: [{ stepId: s, operationId: op }]
"#,
    );
    let msgs: Vec<_> = violations(&doc)
        .into_iter()
        .filter(|v| v.kind == ViolationKind::Cycle)
        .map(|v| v.message)
        .collect();
    assert_eq!(msgs, vec!["dependsOn cycle: x -> y -> z -> x"]);
}

#[test]
fn self_dependency_is_a_cycle() {
    let doc = with_workflows(
        r#"
  - workflowId: a
    dependsOn: [a]
    steps: [{ stepId: s, operationId: op }]
"#,
    );
    assert!(violations(&doc)
        .iter()
        .any(|v| v.kind == ViolationKind::Cycle && v.message == "dependsOn cycle: a -> a"));
}

#[test]
fn depends_on_must_resolve() {
    let doc = with_workflows(
        r#"
  - workflowId: a
    dependsOn: [missing, '$sourceDescriptions.petStoreDescription.remote']
    steps: [{ stepId: s, operationId: op }]
"#,
    );
    let found = violations(&doc);
    assert_eq!(found.len(), 1, "{found:?}");
    assert_eq!(found[0].kind, ViolationKind::Reference);
    assert_eq!(found[0].path, "$.workflows[0].dependsOn[0]");
}

#[test]
fn depends_on_ids_match_exactly() {
    let doc = with_workflows(
        r#"
  - workflowId: a
    dependsOn: [' b']
    steps: [{ stepId: s, operationId: op }]
  - workflowId: b
    dependsOn: [a]
    steps: [{ stepId: s, operationId: op }]
"#,
    );
    let found = violations(&doc);
    assert_eq!(found.len(), 1, "{found:?}");
    assert_eq!(found[0].kind, ViolationKind::Reference);
    assert_eq!(found[0].path, "$.workflows[0].dependsOn[0]");
    assert!(found[0].message.contains("\" b\""), "{}", found[0].message);

    // The ordering agrees: the padded id is not an edge, so there is no cycle.
    let parsed = parse_document_str(&doc, DocumentFormat::Yaml).unwrap();
    let order = arazzo_core::workflow_order(&parsed.document).unwrap();
    assert_eq!(order.topo_order, vec!["a", "b"]);
}

#[test]
fn duplicate_workflow_edges_are_searched_for_cycles() {
    let doc = with_workflows(
        r#"
  - workflowId: a
    steps: [{ stepId: s, operationId: op }]
  - workflowId: a
    dependsOn: [x]
    steps: [{ stepId: s, operationId: op }]
  - workflowId: x
    dependsOn: [y]
    steps: [{ stepId: s, operationId: op }]
  - workflowId: y
    dependsOn: [x]
    steps: [{ stepId: s, operationId: op }]
"#,
    );
    let found = violations(&doc);
    let cycles: Vec<_> = found.iter().filter(|v| v.kind == ViolationKind::Cycle).collect();
    assert_eq!(cycles.len(), 1, "{found:?}");
    assert_eq!(cycles[0].message, "dependsOn cycle: x -> y -> x");
    assert_eq!(cycles[0].path, "$.workflows[3].dependsOn");
    assert!(found
        .iter()
        .any(|v| v.kind == ViolationKind::Uniqueness && v.path == "$.workflows[1].workflowId"));
}

#[test]
fn duplicate_step_id_names_step_and_workflow() {
    let doc = with_workflows(
        r#"
  - workflowId: w1
    steps:
      - stepId: step1
        operationId: op1
      - stepId: step1
        operationId: op2
"#,
    );
    let found = violations(&doc);
    let dup = found
        .iter()
        .find(|v| v.kind == ViolationKind::Uniqueness)
        .expect("uniqueness violation");
    assert_eq!(dup.path, "$.workflows[0].steps[1].stepId");
    assert!(dup.message.contains("step1") && dup.message.contains("w1"));
}

#[test]
fn step_without_call_target_is_rejected() {
    let doc = with_workflows(
        r#"
  - workflowId: w1
    steps:
      - stepId: s1
"#,
    );
    assert!(violations(&doc)
        .iter()
        .any(|v| v.kind == ViolationKind::CallTarget && v.path == "$.workflows[0].steps[0]"));
}

#[test]
fn step_workflow_call_target_must_resolve() {
    let doc = with_workflows(
        r#"
  - workflowId: w1
    steps:
      - stepId: s1
        workflowId: nowhere
"#,
    );
    assert!(violations(&doc).iter().any(|v| v.kind == ViolationKind::Reference
        && v.path == "$.workflows[0].steps[0].workflowId"));
}

#[test]
fn goto_targets_must_resolve() {
    let doc = with_workflows(
        r#"
  - workflowId: w1
    steps:
      - stepId: s1
        operationId: op1
        onSuccess:
          - name: toMissingStep
            type: goto
            stepId: nope
          - name: toStep
            type: goto
            stepId: s1
        onFailure:
          - name: toMissingWorkflow
            type: goto
            workflowId: nope
"#,
    );
    let refs: Vec<_> = violations(&doc)
        .into_iter()
        .filter(|v| v.kind == ViolationKind::Reference)
        .map(|v| v.path)
        .collect();
    assert_eq!(
        refs,
        vec![
            "$.workflows[0].steps[0].onSuccess[0].stepId",
            "$.workflows[0].steps[0].onFailure[0].workflowId",
        ]
    );
}

#[test]
fn action_type_and_target_must_agree() {
    let doc = with_workflows(
        r#"
  - workflowId: w1
    steps:
      - stepId: s1
        operationId: op1
        onFailure:
          - name: stop
            type: end
            stepId: s1
          - name: again
            type: retry
            retryAfter: -1
            retryLimit: -3
          - name: jump
            type: goto
            stepId: s1
            workflowId: w1
"#,
    );
    let actions: Vec<_> = violations(&doc)
        .into_iter()
        .filter(|v| v.kind == ViolationKind::Action)
        .map(|v| v.path)
        .collect();
    assert_eq!(
        actions,
        vec![
            "$.workflows[0].steps[0].onFailure[0]",
            "$.workflows[0].steps[0].onFailure[1].retryAfter",
            "$.workflows[0].steps[0].onFailure[1].retryLimit",
            "$.workflows[0].steps[0].onFailure[2]",
        ]
    );
}

#[test]
fn criterion_kinds_and_roots_are_checked() {
    let doc = with_workflows(
        r#"
  - workflowId: w1
    steps:
      - stepId: s1
        operationId: op1
        successCriteria:
          - condition: $statusCode == 200
          - context: $response.body
            condition: pets[0]
            type: jsonpath
          - context: $response.body
            condition: //pet
            type: { type: xpath, version: xpath-30 }
          - context: $response.body
            condition: pet
            type: xpath
          - condition: anything
            type: glob
          - condition: "  "
"#,
    );
    let criteria: Vec<_> = violations(&doc)
        .into_iter()
        .filter(|v| v.kind == ViolationKind::Criterion)
        .map(|v| v.path)
        .collect();
    assert_eq!(
        criteria,
        vec![
            "$.workflows[0].steps[0].successCriteria[1].condition",
            "$.workflows[0].steps[0].successCriteria[3].condition",
            "$.workflows[0].steps[0].successCriteria[4].type",
            "$.workflows[0].steps[0].successCriteria[5].condition",
        ]
    );
}

#[test]
fn unsupported_jsonpath_version_is_rejected() {
    let doc = with_workflows(
        r#"
  - workflowId: w1
    steps:
      - stepId: s1
        operationId: op1
        successCriteria:
          - context: $response.body
            condition: $.pets
            type:
              type: jsonpath
              version: rfc9535
"#,
    );
    assert!(violations(&doc).iter().any(|v| v.kind == ViolationKind::Criterion
        && v.path == "$.workflows[0].steps[0].successCriteria[0].type.version"));
}

#[test]
fn unknown_fields_must_be_extensions() {
    let doc = with_workflows(
        r#"
  - workflowId: w1
    x-owner: payments
    owner: payments
    steps:
      - stepId: s1
        operationId: op1
"#,
    );
    let found = violations(&doc);
    assert_eq!(found.len(), 1, "{found:?}");
    assert_eq!(found[0].kind, ViolationKind::Extension);
    assert_eq!(found[0].path, "$.workflows[0].owner");
}

#[test]
fn all_violations_are_reported_in_one_pass() {
    let doc = with_workflows(
        r#"
  - workflowId: w1
    steps:
      - stepId: s1
      - stepId: s1
        operationId: op1
        onSuccess:
          - name: next
            type: goto
"#,
    );
    let kinds: Vec<_> = violations(&doc).into_iter().map(|v| v.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ViolationKind::CallTarget,
            ViolationKind::Uniqueness,
            ViolationKind::Action,
        ]
    );
}
