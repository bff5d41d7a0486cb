//! Declarative scenario data: nodes, choices, outcomes. No logic.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::score::BadgeTier;

/// Identifier of a node within a single scenario graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Construct an id from a string slice, trimming whitespace.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    /// Borrow the id as a plain string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Classification of a terminal node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// The drill ended well; accumulated score counts.
    Success,
    /// A disqualifying ending; the attempt scores zero.
    Failure,
}

/// A selectable action at a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Label shown to the learner. Opaque to the engine.
    pub text: String,
    /// Signed score contribution.
    #[serde(default)]
    pub xp_delta: i32,
    /// Text shown after selection. Opaque to the engine.
    #[serde(default)]
    pub feedback: String,
    /// Node to transition to.
    pub next_node_id: NodeId,
}

/// One narrative step in a drill.
///
/// A node is either terminal (no choices, classified success or failure) or
/// non-terminal (at least one choice). [`crate::validate::validate`] enforces
/// that shape before a graph is played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioNode {
    /// Narrative text shown to the learner. Opaque to the engine.
    pub description: String,
    /// Optional reference to illustrative content. Opaque to the engine.
    #[serde(default)]
    pub media: Option<String>,
    #[serde(default)]
    pub is_terminal: bool,
    /// Only meaningful when `is_terminal` is set.
    #[serde(default)]
    pub outcome: Option<OutcomeKind>,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl ScenarioNode {
    /// Borrow a choice by index, if present.
    #[must_use]
    pub fn choice(&self, index: usize) -> Option<&Choice> {
        self.choices.get(index)
    }
}

/// Author-supplied display data for a badge tier. Opaque to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BadgeLabel {
    pub label: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// An immutable branching drill scenario.
///
/// Owned by whatever loads it and shared read-only by any number of sessions
/// and best-path computations; nothing in this crate mutates a graph after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScenarioGraph {
    /// Display title for the drill. Opaque to the engine.
    #[serde(default)]
    pub title: String,
    /// Nodes keyed by their unique id.
    pub nodes: BTreeMap<NodeId, ScenarioNode>,
    /// Id of the start node.
    pub entry_id: NodeId,
    /// Author-declared upper bound used for percentage normalization.
    ///
    /// Deliberately not computed from the graph; a wrong bound is a
    /// content-authoring defect, and the scorer clamps either way.
    pub max_possible_score: i32,
    /// Optional display labels per badge tier, resolved only by presentation
    /// layers.
    #[serde(default)]
    pub badge_labels: BTreeMap<BadgeTier, BadgeLabel>,
}

impl ScenarioGraph {
    /// Create an empty graph (useful for tests).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a scenario graph from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a valid graph
    /// shape. Structural invariants are checked separately by
    /// [`crate::validate::validate`].
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Borrow a node by id.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&ScenarioNode> {
        self.nodes.get(id)
    }

    /// Borrow the entry node.
    #[must_use]
    pub fn entry_node(&self) -> Option<&ScenarioNode> {
        self.nodes.get(&self.entry_id)
    }

    /// Display label for a badge tier, when the author supplied one.
    #[must_use]
    pub fn badge_label(&self, tier: BadgeTier) -> Option<&BadgeLabel> {
        self.badge_labels.get(&tier)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_from_json_parses_nodes_and_choices() {
        let json = r#"{
            "title": "Smoke in the hallway",
            "entry_id": "start",
            "max_possible_score": 20,
            "nodes": {
                "start": {
                    "description": "You smell smoke.",
                    "choices": [
                        {
                            "text": "Pull the alarm",
                            "xp_delta": 20,
                            "feedback": "Alerting everyone comes first.",
                            "next_node_id": "safe"
                        }
                    ]
                },
                "safe": {
                    "description": "Everyone evacuates.",
                    "is_terminal": true,
                    "outcome": "success"
                }
            }
        }"#;

        let graph = ScenarioGraph::from_json(json).unwrap();
        assert_eq!(graph.title, "Smoke in the hallway");
        assert_eq!(graph.nodes.len(), 2);

        let entry = graph.entry_node().unwrap();
        assert!(!entry.is_terminal);
        assert_eq!(entry.choices[0].xp_delta, 20);
        assert_eq!(entry.choices[0].next_node_id, NodeId::new("safe"));

        let safe = graph.node(&NodeId::new("safe")).unwrap();
        assert!(safe.is_terminal);
        assert_eq!(safe.outcome, Some(OutcomeKind::Success));
        assert!(safe.choices.is_empty());
    }

    #[test]
    fn optional_fields_default_cleanly() {
        let json = r#"{
            "entry_id": "end",
            "max_possible_score": 0,
            "nodes": {
                "end": {
                    "description": "Done.",
                    "is_terminal": true,
                    "outcome": "failure"
                }
            }
        }"#;
        let graph = ScenarioGraph::from_json(json).unwrap();
        assert!(graph.title.is_empty());
        assert!(graph.badge_labels.is_empty());
        let end = graph.node(&NodeId::new("end")).unwrap();
        assert_eq!(end.media, None);
        assert!(end.choice(0).is_none());
    }

    #[test]
    fn node_id_trims_whitespace() {
        assert_eq!(NodeId::new("  start "), NodeId::new("start"));
        assert_eq!(NodeId::from("start").as_str(), "start");
    }
}
