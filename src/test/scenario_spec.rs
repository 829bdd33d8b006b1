use crate::node::NodeId;
use crate::scenario::{parse_coordinator, parse_messages, ScenarioError, ScenarioSpec};
use crate::sim::SimTime;

#[test]
fn coordinator_line_selects_sender_and_start_offset() {
    assert_eq!(
        parse_coordinator("0,12.5").expect("valid line"),
        (NodeId(0), SimTime::from_units_f64(12.5))
    );
    assert_eq!(
        parse_coordinator(" 1 , 0 ").expect("valid line"),
        (NodeId(1), SimTime::ZERO)
    );
}

#[test]
fn malformed_coordinator_lines_are_fatal() {
    for line in ["", "0", "2,5", "0;5", "0,minus", "0,-1"] {
        assert!(
            matches!(
                parse_coordinator(line),
                Err(ScenarioError::BadCoordinator { .. })
            ),
            "line {line:?} should be rejected"
        );
    }
}

#[test]
fn message_lines_split_into_fault_code_and_payload() {
    let text = "# a comment\n0000 Hello World\n1101 Bye , Bye\n\n";
    let records = parse_messages(text).expect("valid input");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].payload, "Hello World");
    assert_eq!(records[0].flags.code(), "0000");
    assert_eq!(records[1].payload, "Bye , Bye");
    assert!(records[1].flags.modify);
    assert!(records[1].flags.lose);
    assert!(!records[1].flags.duplicate);
    assert!(records[1].flags.delay);
}

#[test]
fn malformed_message_lines_are_fatal_with_line_numbers() {
    let err = parse_messages("0000 ok\nbad line\n").expect_err("must fail");
    match err {
        ScenarioError::BadMessageLine { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn scenario_json_applies_defaults_for_omitted_fields() {
    let spec: ScenarioSpec = serde_json::from_str(
        r#"
{
    "window_size": 4,
    "timeout": 5.0,
    "coordinator": "coordinator.txt",
    "inputs": ["input0.txt", "input1.txt"]
}
        "#,
    )
    .expect("parse scenario json");

    assert_eq!(spec.window_size, 4);
    assert_eq!(spec.timeout, 5.0);
    assert_eq!(spec.processing_delay, 1.0);
    assert_eq!(spec.transmission_delay, 0.0);
    assert_eq!(spec.error_delay, 0.0);
    assert_eq!(spec.duplicate_delay, 0.0);
    assert_eq!(spec.loss_probability, 0.0);
    assert_eq!(spec.seed, 0);
}
