//! `update_requirements` - records what the client has said about the home

use super::Tool;
use crate::session::{RequirementKey, RequirementsDoc};
use serde_json::{json, Map, Value};

/// Structured extraction of home requirements into the live brief
pub struct UpdateRequirementsTool;

impl UpdateRequirementsTool {
    /// Arguments are accepted as-is; anything other than an object carries
    /// no keys and becomes an empty update.
    pub fn parse(args: Value) -> RequirementsDoc {
        match args {
            Value::Object(object) => RequirementsDoc::from_json_object(object),
            other => {
                tracing::warn!(args = %other, "update_requirements called without an object");
                RequirementsDoc::new()
            }
        }
    }
}

impl Tool for UpdateRequirementsTool {
    fn name(&self) -> &'static str {
        "update_requirements"
    }

    fn description(&self) -> String {
        "Update the requirements and vision for the client's home. Call it as soon as the client mentions any concrete detail (floors, pool, style, garden, budget, timeline). Only include the fields you learned; omitted fields keep their previous value.".to_string()
    }

    fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = RequirementKey::ALL
            .into_iter()
            .map(|key| {
                let schema = if key.is_list() {
                    json!({
                        "type": "array",
                        "items": { "type": "string" },
                        "description": key.description()
                    })
                } else {
                    json!({
                        "type": "string",
                        "description": key.description()
                    })
                };
                (key.as_str().to_string(), schema)
            })
            .collect();

        json!({
            "type": "object",
            "properties": properties
        })
    }
}
