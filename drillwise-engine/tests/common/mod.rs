use drillwise_engine::ScenarioGraph;

/// Two-decision drill used across the integration suites: one success
/// ending worth the declared maximum, failure endings off both decision
/// points.
#[must_use]
pub fn drill_graph() -> ScenarioGraph {
    ScenarioGraph::from_json(
        r#"{
            "title": "Integration drill",
            "entry_id": "start",
            "max_possible_score": 35,
            "nodes": {
                "start": {
                    "description": "First decision.",
                    "choices": [
                        {
                            "text": "A",
                            "xp_delta": 15,
                            "feedback": "good start",
                            "next_node_id": "n1"
                        },
                        {
                            "text": "B",
                            "xp_delta": -15,
                            "feedback": "bad start",
                            "next_node_id": "end_fail"
                        }
                    ]
                },
                "n1": {
                    "description": "Second decision.",
                    "choices": [
                        {
                            "text": "C",
                            "xp_delta": 20,
                            "feedback": "strong finish",
                            "next_node_id": "end_ok"
                        },
                        {
                            "text": "D",
                            "xp_delta": -10,
                            "feedback": "weak finish",
                            "next_node_id": "end_fail2"
                        }
                    ]
                },
                "end_ok": {
                    "description": "Success ending.",
                    "is_terminal": true,
                    "outcome": "success"
                },
                "end_fail": {
                    "description": "Early failure ending.",
                    "is_terminal": true,
                    "outcome": "failure"
                },
                "end_fail2": {
                    "description": "Late failure ending.",
                    "is_terminal": true,
                    "outcome": "failure"
                }
            }
        }"#,
    )
    .expect("fixture graph parses")
}
