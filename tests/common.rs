//! Common test fixtures: chain documents covering every operator kind.
use rensa::prelude::*;
use serde_json::{Value, json};

/// Builds a tree from a JSON value, panicking on parse errors.
#[allow(dead_code)]
pub fn build(value: Value) -> ElTree {
    ElTree::from_value(value).expect("fixture should build")
}

/// `THEN(a,b,c)`
#[allow(dead_code)]
pub fn then_chain() -> Value {
    json!({
        "type": "THEN",
        "children": [
            { "type": "NodeComponent", "id": "a" },
            { "type": "NodeComponent", "id": "b" },
            { "type": "NodeComponent", "id": "c" },
        ],
    })
}

/// `THEN(a,WHEN(b,c,d),e)`
#[allow(dead_code)]
pub fn nested_when_chain() -> Value {
    json!({
        "type": "THEN",
        "children": [
            { "type": "NodeComponent", "id": "a" },
            {
                "type": "WHEN",
                "children": [
                    { "type": "NodeComponent", "id": "b" },
                    { "type": "NodeComponent", "id": "c" },
                    { "type": "NodeComponent", "id": "d" },
                ],
            },
            { "type": "NodeComponent", "id": "e" },
        ],
    })
}

/// `SWITCH(x).to(a,b)`
#[allow(dead_code)]
pub fn switch_chain() -> Value {
    json!({
        "type": "SWITCH",
        "condition": { "type": "NodeSwitchComponent", "id": "x" },
        "children": [
            { "type": "NodeComponent", "id": "a" },
            { "type": "NodeComponent", "id": "b" },
        ],
    })
}

/// `IF(cond).then(a)`
#[allow(dead_code)]
pub fn if_chain() -> Value {
    json!({
        "type": "IF",
        "condition": { "type": "NodeBooleanComponent", "id": "cond" },
        "children": [
            { "type": "NodeComponent", "id": "a" },
        ],
    })
}

/// `FOR(n).do(THEN(a,b))`
#[allow(dead_code)]
pub fn for_chain() -> Value {
    json!({
        "type": "FOR",
        "condition": { "type": "NodeForComponent", "id": "n" },
        "children": [
            {
                "type": "THEN",
                "children": [
                    { "type": "NodeComponent", "id": "a" },
                    { "type": "NodeComponent", "id": "b" },
                ],
            },
        ],
    })
}

/// `WHILE(w).do(THEN(a,b))`
#[allow(dead_code)]
pub fn while_chain() -> Value {
    json!({
        "type": "WHILE",
        "condition": { "type": "NodeWhileComponent", "id": "w" },
        "children": [
            {
                "type": "THEN",
                "children": [
                    { "type": "NodeComponent", "id": "a" },
                    { "type": "NodeComponent", "id": "b" },
                ],
            },
        ],
    })
}

/// `ITERATOR(it).do(THEN(a,b))`
#[allow(dead_code)]
pub fn iterator_chain() -> Value {
    json!({
        "type": "ITERATOR",
        "condition": { "type": "NodeIteratorComponent", "id": "it" },
        "children": [
            {
                "type": "THEN",
                "children": [
                    { "type": "NodeComponent", "id": "a" },
                    { "type": "NodeComponent", "id": "b" },
                ],
            },
        ],
    })
}

/// `CATCH(WHEN(a,b)).do(h)`
#[allow(dead_code)]
pub fn catch_chain() -> Value {
    json!({
        "type": "CATCH",
        "condition": {
            "type": "WHEN",
            "children": [
                { "type": "NodeComponent", "id": "a" },
                { "type": "NodeComponent", "id": "b" },
            ],
        },
        "children": [
            { "type": "NodeComponent", "id": "h" },
        ],
    })
}

/// `IF(AND(OR(x,y),NOT(z))).then(w)`
#[allow(dead_code)]
pub fn combinator_chain() -> Value {
    json!({
        "type": "IF",
        "condition": {
            "type": "AND",
            "children": [
                {
                    "type": "OR",
                    "children": [
                        { "type": "NodeBooleanComponent", "id": "x" },
                        { "type": "NodeBooleanComponent", "id": "y" },
                    ],
                },
                {
                    "type": "NOT",
                    "children": [
                        { "type": "NodeBooleanComponent", "id": "z" },
                    ],
                },
            ],
        },
        "children": [
            { "type": "NodeComponent", "id": "w" },
        ],
    })
}

/// `WHEN(t1,d)` where `t1` is a sub-chain owning `THEN(p,q)`.
#[allow(dead_code)]
pub fn subchain_chain() -> Value {
    json!({
        "type": "WHEN",
        "children": [
            {
                "type": "CHAIN",
                "id": "t1",
                "children": [
                    {
                        "type": "THEN",
                        "children": [
                            { "type": "NodeComponent", "id": "p" },
                            { "type": "NodeComponent", "id": "q" },
                        ],
                    },
                ],
            },
            { "type": "NodeComponent", "id": "d" },
        ],
    })
}
