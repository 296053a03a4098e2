//! Tests for structural type inference and registry reconciliation.
mod common;
use common::*;
use rensa::prelude::*;
use serde_json::json;

fn contract_of(tree: &ElTree, id: &str) -> ScriptContract {
    tree.infer_contract(tree.find_by_id(id).expect("node exists"))
}

#[test]
fn test_if_condition_is_boolean() {
    let tree = build(if_chain());
    assert_eq!(contract_of(&tree, "cond"), ScriptContract::BooleanScript);
    assert_eq!(contract_of(&tree, "a"), ScriptContract::Script);
}

#[test]
fn test_switch_condition_is_selector() {
    let tree = build(switch_chain());
    assert_eq!(contract_of(&tree, "x"), ScriptContract::SwitchScript);
    assert_eq!(contract_of(&tree, "a"), ScriptContract::Script);
}

#[test]
fn test_loop_conditions() {
    assert_eq!(
        contract_of(&build(for_chain()), "n"),
        ScriptContract::ForScript
    );
    assert_eq!(
        contract_of(&build(while_chain()), "w"),
        ScriptContract::BooleanScript
    );
    assert_eq!(
        contract_of(&build(iterator_chain()), "it"),
        ScriptContract::ForScript
    );
}

#[test]
fn test_combinator_members_inherit_condition_contract() {
    let tree = build(combinator_chain());
    assert_eq!(contract_of(&tree, "x"), ScriptContract::BooleanScript);
    assert_eq!(contract_of(&tree, "y"), ScriptContract::BooleanScript);
    assert_eq!(contract_of(&tree, "z"), ScriptContract::BooleanScript);
    assert_eq!(contract_of(&tree, "w"), ScriptContract::Script);
}

#[test]
fn test_catch_slot_imposes_no_contract() {
    let tree = build(catch_chain());
    // The protected flow's members are plain orchestration children.
    assert_eq!(contract_of(&tree, "a"), ScriptContract::Script);
    assert_eq!(contract_of(&tree, "h"), ScriptContract::Script);
}

#[test]
fn test_combinator_outside_any_condition_is_default() {
    let tree = build(json!({
        "type": "THEN",
        "children": [
            {
                "type": "AND",
                "children": [
                    { "type": "NodeBooleanComponent", "id": "x" },
                    { "type": "NodeBooleanComponent", "id": "y" },
                ],
            },
        ],
    }));
    assert_eq!(contract_of(&tree, "x"), ScriptContract::Script);
}

#[test]
fn test_root_leaf_is_default() {
    let tree = build(json!({ "type": "NodeComponent", "id": "a" }));
    assert_eq!(contract_of(&tree, "a"), ScriptContract::Script);
}

/// Inference depends only on the path to the root: mutating an unrelated
/// sibling leaves the classification unchanged, and repeating the call gives
/// the same answer.
#[test]
fn test_inference_is_deterministic() {
    let mut tree = build(combinator_chain());
    let x = tree.find_by_id("x").unwrap();
    let before = tree.infer_contract(x);
    assert_eq!(before, tree.infer_contract(x));

    let root = tree.root();
    tree.apply(Command::AppendChild {
        parent: root,
        kind: ElKind::Leaf(LeafKind::Common),
        id: Some("unrelated".to_string()),
    })
    .unwrap();
    assert_eq!(tree.infer_contract(x), before);
}

fn script_entry(node_type: ScriptContract) -> RegisteredNode {
    RegisteredNode {
        node_type,
        language: Some("groovy".to_string()),
        is_script_node: true,
        liteflow_node_type: None,
    }
}

#[test]
fn test_registry_type_takes_precedence() {
    let tree = build(then_chain());
    let mut registry = NodeTypeRegistry::new();
    registry.insert("a", script_entry(ScriptContract::SwitchScript));

    let a = tree.find_by_id("a").unwrap();
    let b = tree.find_by_id("b").unwrap();
    assert_eq!(
        tree.effective_contract(a, &registry),
        ScriptContract::SwitchScript
    );
    assert_eq!(tree.effective_contract(b, &registry), ScriptContract::Script);
}

#[test]
fn test_reconcile_reports_mismatches() {
    let tree = build(if_chain());
    let mut registry = NodeTypeRegistry::new();
    registry.insert("cond", script_entry(ScriptContract::Script));

    let issues = tree.reconcile(&registry);
    assert_eq!(
        issues,
        vec![ReconcileIssue::Mismatch {
            node_id: "cond".to_string(),
            inferred: ScriptContract::BooleanScript,
            registered: ScriptContract::Script,
        }]
    );
    let message = issues[0].to_string();
    assert!(message.contains("cond"));
    assert!(message.contains("boolean_script"));
}

#[test]
fn test_reconcile_passes_on_agreement() {
    let tree = build(if_chain());
    let mut registry = NodeTypeRegistry::new();
    registry.insert("cond", script_entry(ScriptContract::BooleanScript));
    registry.insert("a", script_entry(ScriptContract::Script));

    assert!(tree.reconcile(&registry).is_empty());
}

#[test]
fn test_reconcile_ignores_non_script_entries() {
    let tree = build(if_chain());
    let mut registry = NodeTypeRegistry::new();
    registry.insert(
        "cond",
        RegisteredNode {
            node_type: ScriptContract::Script,
            language: None,
            is_script_node: false,
            liteflow_node_type: Some("common".to_string()),
        },
    );

    assert!(tree.reconcile(&registry).is_empty());
}

#[test]
fn test_registry_parses_list_and_map_forms() {
    let list = r#"[
        { "nodeId": "a", "nodeType": "boolean_script", "language": "groovy", "isScriptNode": true }
    ]"#;
    let registry = NodeTypeRegistry::from_json(list).unwrap();
    assert_eq!(
        registry.get("a").unwrap().node_type,
        ScriptContract::BooleanScript
    );

    let map = r#"{
        "b": { "nodeType": "for_script", "isScriptNode": true }
    }"#;
    let registry = NodeTypeRegistry::from_json(map).unwrap();
    assert_eq!(
        registry.get("b").unwrap().node_type,
        ScriptContract::ForScript
    );
}

#[test]
fn test_cross_chain_conflict_is_reported() {
    // `x` decides an IF in one chain and a SWITCH in the other.
    let if_tree = build(json!({
        "type": "IF",
        "condition": { "type": "NodeBooleanComponent", "id": "x" },
        "children": [{ "type": "NodeComponent", "id": "a" }],
    }));
    let switch_tree = build(json!({
        "type": "SWITCH",
        "condition": { "type": "NodeSwitchComponent", "id": "x" },
        "children": [{ "type": "NodeComponent", "id": "b" }],
    }));

    let issues = reconcile_chains(&[("chain_if", &if_tree), ("chain_switch", &switch_tree)]);
    assert_eq!(issues.len(), 1);
    match &issues[0] {
        ReconcileIssue::Conflict { node_id, usages } => {
            assert_eq!(node_id, "x");
            assert_eq!(usages.len(), 2);
        }
        other => panic!("expected a conflict, got {other:?}"),
    }
}

#[test]
fn test_cross_chain_consistent_usage_is_clean() {
    let first = build(if_chain());
    let second = build(json!({
        "type": "WHILE",
        "condition": { "type": "NodeBooleanComponent", "id": "cond" },
        "children": [{ "type": "NodeComponent", "id": "a" }],
    }));

    assert!(reconcile_chains(&[("one", &first), ("two", &second)]).is_empty());
}
