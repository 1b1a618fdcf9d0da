//! Tool handlers module.
//!
//! Defines the shape every tool implements and the adapter that turns a
//! typed tool into an untyped handler the registry can dispatch to.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use super::error::ToolError;
use super::validation::validate_arguments;

/// An untyped tool handler: raw JSON arguments in, tool result out.
///
/// Arguments are validated against the tool's schema before the handler
/// runs, so a handler only sees structurally valid input.
pub type ToolHandler =
    Box<dyn Fn(serde_json::Value) -> Result<CallToolResult, ToolError> + Send + Sync>;

/// A tool with typed parameters.
///
/// Domain conditions such as "not found" are returned as successful text
/// results from `execute`, never as errors.
pub trait ToolDefinition {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Parameters struct; its `JsonSchema` is the tool's input schema.
    type Params: DeserializeOwned + JsonSchema + 'static;

    /// Execute the tool logic.
    fn execute(params: Self::Params) -> CallToolResult;

    /// Create a Tool model for this tool (metadata).
    fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<Self::Params>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

/// Build the untyped handler for `T`.
///
/// The returned handler validates arguments against `tool`'s input schema,
/// reporting every offending field, then decodes them into `T::Params`.
pub fn typed_handler<T: ToolDefinition>(tool: &Tool) -> ToolHandler {
    let schema = tool.input_schema.clone();

    Box::new(move |arguments: serde_json::Value| {
        let issues = validate_arguments(&schema, &arguments);
        if !issues.is_empty() {
            return Err(ToolError::Validation {
                tool: T::NAME.to_string(),
                issues,
            });
        }

        let params: T::Params = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

        Ok(T::execute(params))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::Content;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, JsonSchema)]
    struct ShoutParams {
        word: String,
    }

    struct ShoutTool;

    impl ToolDefinition for ShoutTool {
        const NAME: &'static str = "shout";
        const DESCRIPTION: &'static str = "Upper-case a word";
        type Params = ShoutParams;

        fn execute(params: ShoutParams) -> CallToolResult {
            CallToolResult::success(vec![Content::text(params.word.to_uppercase())])
        }
    }

    #[test]
    fn test_to_tool_metadata() {
        let tool = ShoutTool::to_tool();
        assert_eq!(tool.name, "shout");
        assert_eq!(tool.description.as_deref(), Some("Upper-case a word"));
        assert!(tool.input_schema.contains_key("properties"));
    }

    #[test]
    fn test_typed_handler_runs_tool() {
        let handler = typed_handler::<ShoutTool>(&ShoutTool::to_tool());
        let result = handler(serde_json::json!({ "word": "hey" })).unwrap();
        let text = match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        assert_eq!(text, "HEY");
    }

    #[test]
    fn test_typed_handler_rejects_bad_arguments() {
        let handler = typed_handler::<ShoutTool>(&ShoutTool::to_tool());
        match handler(serde_json::json!({ "word": 7 })) {
            Err(ToolError::Validation { tool, issues }) => {
                assert_eq!(tool, "shout");
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].field, "word");
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }
}
