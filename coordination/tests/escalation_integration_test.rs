//! Integration tests for the Escalation Controller
//!
//! Drives the controller with real text queries, validating the full
//! extract → impute → classify → decide flow.

use coordination::{
    AgentAction, AgentConfig, AgentStatus, EscalationController, Label, Role, TreeParams,
    LOW_CONFIDENCE_CAVEAT, SPECIALIST_POOL,
};

const SPAM: &[&str] = &[
    "WIN A FREE PRIZE NOW!!! Call 555-0199 today!",
    "URGENT: claim your $1000 reward!!! Reply YES",
    "Limited offer!!! 90% OFF, click http://x.example now!",
    "CONGRATULATIONS!!! You were selected. Send $5 to unlock!",
    "FREE entry!!! Text WIN to 80082 now!!!",
];

const HAM: &[&str] = &[
    "are we still meeting for lunch tomorrow",
    "thanks for the notes from class",
    "can you pick up some milk on the way home",
    "see you at the game tonight",
    "the report is attached for review",
];

/// Controller with every labeled example recorded and trained.
fn trained_controller(config: AgentConfig) -> EscalationController {
    let mut controller = EscalationController::new(config).expect("valid config");
    for text in SPAM {
        controller.record_example(text, Some(1.0)).unwrap();
    }
    for text in HAM {
        controller.record_example(text, Some(0.0)).unwrap();
    }
    controller.train().expect("labeled data available");
    controller
}

/// Test: A fresh controller only ever asks for data
#[test]
fn test_untrained_always_requests_data() {
    let mut controller = EscalationController::new(AgentConfig::default()).unwrap();

    for query in SPAM.iter().chain(HAM) {
        let decision = controller.think(query);
        assert!(!decision.action.is_answer(), "untrained agent answered");
        assert_eq!(
            decision.action.target_roles(),
            vec![Role::DataCollector, Role::KnowledgeExpert]
        );
    }
    assert_eq!(controller.status(), AgentStatus::Untrained);
    assert_eq!(controller.history().len(), SPAM.len() + HAM.len());
    assert_eq!(controller.history().labeled_count(), 0);
}

/// Test: With the default threshold every specialist is tried once, then the
/// agent answers with a caveat
#[test]
fn test_low_confidence_exhausts_pool_without_repeats() {
    // One shallow round cannot exceed the default 0.7 threshold
    let mut controller = trained_controller(AgentConfig::default());

    let mut delegated = Vec::new();
    for _ in 0..SPECIALIST_POOL.len() {
        let decision = controller.think("Is this message something I should read?");
        match decision.action {
            AgentAction::Delegate { targets, context } => {
                assert_eq!(targets.len(), 1);
                let context = context.expect("specialist delegation carries context");
                assert_eq!(context.attempted_approaches.last(), Some(&targets[0].role));
                delegated.push(targets[0].role);
            }
            other => panic!("expected delegation, got {:?}", other),
        }
    }

    let mut unique = delegated.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), delegated.len(), "a role was delegated twice");
    assert_eq!(delegated, SPECIALIST_POOL.to_vec());

    let sixth = controller.think("Is this message something I should read?");
    match &sixth.action {
        AgentAction::Answer { caveat, .. } => {
            assert_eq!(caveat.as_deref(), Some(LOW_CONFIDENCE_CAVEAT));
        }
        other => panic!("expected caveated answer, got {:?}", other),
    }
    assert!(sixth
        .action
        .render()
        .starts_with("Low confidence prediction"));
    assert_eq!(controller.attempts().attempted(), &SPECIALIST_POOL);
}

/// Test: Lowering the threshold lets the agent answer directly
#[test]
fn test_threshold_at_half_always_answers() {
    let mut controller = trained_controller(AgentConfig {
        confidence_threshold: 0.5,
        ..Default::default()
    });

    for query in ["FREE MONEY!!! Reply NOW!!!", "lunch at noon?"] {
        let decision = controller.think(query);
        match decision.action {
            AgentAction::Answer {
                confidence, caveat, ..
            } => {
                assert!(confidence >= 0.5);
                assert!(caveat.is_none());
            }
            other => panic!("expected answer, got {:?}", other),
        }
    }
    assert!(controller.attempts().attempted().is_empty());
}

/// Test: A split-friendly configuration separates the two classes
#[test]
fn test_trained_tree_separates_classes() {
    let mut controller = trained_controller(AgentConfig {
        confidence_threshold: 0.5,
        tree: TreeParams {
            max_depth: 2,
            min_child_weight: 0.0,
            gamma: 0.0,
            lambda: 1.0,
            eta: 1.0,
        },
        ..Default::default()
    });

    let spam = controller.think("WIN CASH NOW!!! Call 555-0000!!!");
    let ham = controller.think("see you at dinner tonight");
    assert!(matches!(
        spam.action,
        AgentAction::Answer {
            label: Label::Positive,
            ..
        }
    ));
    assert!(matches!(
        ham.action,
        AgentAction::Answer {
            label: Label::Negative,
            ..
        }
    ));
}

/// Test: Faults are converted to error recovery and logged
#[test]
fn test_empty_query_routes_to_error_recovery() {
    let mut controller = trained_controller(AgentConfig::default());

    let decision = controller.think("");
    assert_eq!(
        decision.action.target_roles(),
        vec![Role::ErrorRecoverySpecialist]
    );
    assert_eq!(controller.diagnostics().len(), 1);
    assert!(controller.diagnostics()[0].message.contains("empty"));

    // The fault did not consume a specialist
    let next = controller.think("Is this message something I should read?");
    assert_eq!(next.action.target_roles(), vec![SPECIALIST_POOL[0]]);
}

/// Test: Externally orchestrated training of previously unlabeled queries
#[test]
fn test_data_collection_then_training() {
    let mut controller = EscalationController::new(AgentConfig {
        confidence_threshold: 0.5,
        ..Default::default()
    })
    .unwrap();

    let queries: Vec<(&str, f64)> = SPAM
        .iter()
        .map(|q| (*q, 1.0))
        .chain(HAM.iter().map(|q| (*q, 0.0)))
        .collect();
    for (query, _) in &queries {
        controller.think(query);
    }
    for (index, (_, label)) in queries.iter().enumerate() {
        controller.label_sample(index, *label).unwrap();
    }
    controller.train().unwrap();

    assert_eq!(controller.status(), AgentStatus::Trained);
    assert!(controller.think("hello there").action.is_answer());
}
