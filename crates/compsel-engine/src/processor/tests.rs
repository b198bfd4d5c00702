//! Tests for the rule processor.

use super::*;
use crate::closure::ClosureRule;
use compsel_core::{InputType, RuleFailure, RuleInput};
use compsel_test::{
    ivy_metadata, maven_metadata, selection, ExecutionLog, MetadataSource, StubFailure, StubRule,
};
use std::error::Error as _;
use std::thread;

fn shared(rule: &Arc<StubRule>) -> Arc<dyn SelectionRule> {
    rule.clone()
}

fn accepting_with(name: &str, input_types: &[InputType]) -> StubRule {
    StubRule::accepting(name)
        .with_inputs(input_types.iter().copied())
}

fn reject_snapshots(
    selection: &mut ComponentSelection,
    _inputs: &[RuleInput<'_>],
) -> Result<(), RuleFailure> {
    if selection.candidate().version().ends_with("-SNAPSHOT") {
        selection.reject("snapshot");
    }
    Ok(())
}

#[test]
fn test_no_rules_accepts_without_fetch() {
    let source = MetadataSource::new(maven_metadata("1.0"));
    let mut selection = selection("1.0");

    ComponentSelectionRulesProcessor::new()
        .apply(&mut selection, &[], source.factory())
        .unwrap();

    assert!(!selection.is_rejected());
    assert_eq!(source.calls(), 0);
}

#[test]
fn test_input_free_rejection_skips_metadata_rules() {
    let r1 = Arc::new(StubRule::accepting("r1"));
    let r2 = Arc::new(StubRule::rejecting("r2", "too old"));
    let r3 = Arc::new(accepting_with("r3", &[InputType::FullMetadata]));
    let rules = vec![shared(&r1), shared(&r2), shared(&r3)];

    let source = MetadataSource::new(maven_metadata("1.0"));
    let mut selection = selection("1.0");
    ComponentSelectionRulesProcessor::new()
        .apply(&mut selection, &rules, source.factory())
        .unwrap();

    assert_eq!(selection.rejection_reason(), Some("too old"));
    assert_eq!(r1.calls(), 1);
    assert_eq!(r2.calls(), 1);
    assert_eq!(r3.calls(), 0);
    assert_eq!(source.calls(), 0);
}

#[test]
fn test_no_rule_runs_after_rejection() {
    let r1 = Arc::new(StubRule::rejecting("r1", "first"));
    let r2 = Arc::new(StubRule::rejecting("r2", "second"));
    let rules = vec![shared(&r1), shared(&r2)];

    let source = MetadataSource::new(maven_metadata("1.0"));
    let mut selection = selection("1.0");
    ComponentSelectionRulesProcessor::new()
        .apply(&mut selection, &rules, source.factory())
        .unwrap();

    assert_eq!(selection.rejection_reason(), Some("first"));
    assert_eq!(r2.calls(), 0);
}

#[test]
fn test_metadata_rule_rejection_stops_remaining_metadata_rules() {
    let r1 = StubRule::rejecting("r1", "bad status");
    let r1 = Arc::new(r1.with_inputs([InputType::ComponentMetadataView]));
    let r2 = Arc::new(accepting_with("r2", &[InputType::FullMetadata]));
    let rules = vec![shared(&r1), shared(&r2)];

    let source = MetadataSource::new(maven_metadata("1.0"));
    let mut selection = selection("1.0");
    ComponentSelectionRulesProcessor::new()
        .apply(&mut selection, &rules, source.factory())
        .unwrap();

    assert_eq!(selection.rejection_reason(), Some("bad status"));
    assert_eq!(r2.calls(), 0);
}

#[test]
fn test_input_free_rules_run_before_metadata_rules() {
    let log = ExecutionLog::new();
    let m1 = accepting_with("m1", &[InputType::FullMetadata]);
    let m2 = accepting_with("m2", &[InputType::ComponentMetadataView]);
    let rules: Vec<Arc<dyn SelectionRule>> = vec![
        Arc::new(m1.recording(&log)),
        Arc::new(StubRule::accepting("c1").recording(&log)),
        Arc::new(m2.recording(&log)),
        Arc::new(StubRule::accepting("c2").recording(&log)),
    ];

    let source = MetadataSource::new(maven_metadata("1.0"));
    let mut selection = selection("1.0");
    ComponentSelectionRulesProcessor::new()
        .apply(&mut selection, &rules, source.factory())
        .unwrap();

    assert!(!selection.is_rejected());
    assert_eq!(log.entries(), vec!["c1", "c2", "m1", "m2"]);
}

#[test]
fn test_factory_invoked_once_for_many_metadata_rules() {
    let m3_inputs = [InputType::IvyDescriptor, InputType::FullMetadata];
    let rules: Vec<Arc<dyn SelectionRule>> = vec![
        Arc::new(accepting_with("m1", &[InputType::FullMetadata])),
        Arc::new(accepting_with("m2", &[InputType::ComponentMetadataView])),
        Arc::new(accepting_with("m3", &m3_inputs)),
    ];

    let source = MetadataSource::new(ivy_metadata("1.0", Some("main")));
    let mut selection = selection("1.0");
    ComponentSelectionRulesProcessor::new()
        .apply(&mut selection, &rules, source.factory())
        .unwrap();

    assert_eq!(source.calls(), 1);
}

#[test]
fn test_ivy_rule_skipped_for_non_ivy_metadata() {
    let ivy_rule = StubRule::rejecting("ivy", "wrong branch");
    let ivy_rule = Arc::new(ivy_rule.with_inputs([InputType::IvyDescriptor]));
    let rules = vec![shared(&ivy_rule)];

    let source = MetadataSource::new(maven_metadata("1.0"));
    let mut selection = selection("1.0");
    ComponentSelectionRulesProcessor::new()
        .apply(&mut selection, &rules, source.factory())
        .unwrap();

    assert!(!selection.is_rejected());
    assert_eq!(ivy_rule.calls(), 0);
    assert_eq!(source.calls(), 1);
}

#[test]
fn test_ivy_rule_receives_inputs_in_declared_order() {
    let declared = [InputType::IvyDescriptor, InputType::ComponentMetadataView];
    let rule = Arc::new(accepting_with("ivy", &declared));
    let rules = vec![shared(&rule)];

    let source = MetadataSource::new(ivy_metadata("1.0", None));
    let mut selection = selection("1.0");
    ComponentSelectionRulesProcessor::new()
        .apply(&mut selection, &rules, source.factory())
        .unwrap();

    assert_eq!(rule.last_inputs(), Some(declared.to_vec()));
}

#[test]
fn test_inapplicable_rule_never_executes() {
    let cheap = Arc::new(StubRule::rejecting("cheap", "no").applicable(false));
    let costly = Arc::new(
        StubRule::rejecting("costly", "no")
            .with_inputs([InputType::FullMetadata])
            .applicable(false),
    );
    let rules = vec![shared(&cheap), shared(&costly)];

    let source = MetadataSource::new(maven_metadata("1.0"));
    let mut selection = selection("1.0");
    ComponentSelectionRulesProcessor::new()
        .apply(&mut selection, &rules, source.factory())
        .unwrap();

    assert!(!selection.is_rejected());
    assert_eq!(cheap.calls(), 0);
    assert_eq!(costly.calls(), 0);
    assert_eq!(source.calls(), 0);
}

#[test]
fn test_rule_failure_wrapped_as_user_code_error() {
    let failing = Arc::new(StubRule::failing("broken", "index out of range"));
    let after = Arc::new(StubRule::accepting("after"));
    let rules = vec![shared(&failing), shared(&after)];

    let source = MetadataSource::new(maven_metadata("1.0"));
    let mut selection = selection("1.0");
    let err = ComponentSelectionRulesProcessor::new()
        .apply(&mut selection, &rules, source.factory())
        .unwrap_err();

    assert!(err.is_user_code());
    assert_eq!(err.to_string(), compsel_core::USER_CODE_ERROR);
    let cause = err.source().unwrap();
    let cause = cause.downcast_ref::<StubFailure>().unwrap();
    assert_eq!(cause.message(), "index out of range");
    assert_eq!(after.calls(), 0);
}

#[test]
fn test_partial_rejection_kept_on_failure() {
    let rule = StubRule::rejecting_then_failing("half", "rejected first", "then failed");
    let rules = vec![shared(&Arc::new(rule))];

    let source = MetadataSource::new(maven_metadata("1.0"));
    let mut selection = selection("1.0");
    let err = ComponentSelectionRulesProcessor::new()
        .apply(&mut selection, &rules, source.factory())
        .unwrap_err();

    assert!(err.is_user_code());
    assert_eq!(selection.rejection_reason(), Some("rejected first"));
}

#[test]
fn test_metadata_fetch_error_propagated_unwrapped() {
    let rule = Arc::new(accepting_with("m1", &[InputType::FullMetadata]));
    let rules = vec![shared(&rule)];

    let source = MetadataSource::failing("502 Bad Gateway");
    let mut selection = selection("1.0");
    let err = ComponentSelectionRulesProcessor::new()
        .apply(&mut selection, &rules, source.factory())
        .unwrap_err();

    match err {
        SelectionError::MetadataFetch(fetch) => assert_eq!(fetch.message(), "502 Bad Gateway"),
        other => panic!("expected a metadata fetch error, got {other:?}"),
    }
    assert_eq!(rule.calls(), 0);
}

#[test]
fn test_fetch_failure_not_reached_when_input_free_rule_rejects() {
    let rules: Vec<Arc<dyn SelectionRule>> = vec![
        Arc::new(StubRule::rejecting("cheap", "blocked")),
        Arc::new(accepting_with("costly", &[InputType::FullMetadata])),
    ];

    let source = MetadataSource::failing("unreachable repository");
    let mut selection = selection("1.0");
    ComponentSelectionRulesProcessor::new()
        .apply(&mut selection, &rules, source.factory())
        .unwrap();

    assert_eq!(selection.rejection_reason(), Some("blocked"));
    assert_eq!(source.calls(), 0);
}

#[test]
fn test_rules_reusable_across_candidates() {
    let rule = Arc::new(accepting_with("m1", &[InputType::FullMetadata]));
    let rules = vec![shared(&rule)];
    let processor = ComponentSelectionRulesProcessor::new();

    for version in ["1.0", "1.1", "2.0"] {
        let source = MetadataSource::new(maven_metadata(version));
        let mut selection = selection(version);
        processor
            .apply(&mut selection, &rules, source.factory())
            .unwrap();
        assert_eq!(source.calls(), 1);
    }
    assert_eq!(rule.calls(), 3);
}

#[test]
fn test_shared_rules_evaluated_concurrently() {
    let metadata_rule = Arc::new(accepting_with("m1", &[InputType::FullMetadata]));
    let snapshots: Arc<dyn SelectionRule> = Arc::new(ClosureRule::new([], reject_snapshots));
    let rules = vec![snapshots, shared(&metadata_rule)];
    let processor = ComponentSelectionRulesProcessor::new();

    thread::scope(|scope| {
        for i in 0..8 {
            let rules = &rules;
            scope.spawn(move || {
                let version = match i % 2 {
                    0 => format!("1.{i}"),
                    _ => format!("1.{i}-SNAPSHOT"),
                };
                let source = MetadataSource::new(maven_metadata(&version));
                let mut selection = selection(&version);
                processor
                    .apply(&mut selection, rules, source.factory())
                    .unwrap();

                if i % 2 == 0 {
                    assert!(!selection.is_rejected());
                    assert_eq!(source.calls(), 1);
                } else {
                    assert_eq!(selection.rejection_reason(), Some("snapshot"));
                    assert_eq!(source.calls(), 0);
                }
            });
        }
    });

    assert_eq!(metadata_rule.calls(), 4);
}
