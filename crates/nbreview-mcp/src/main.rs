use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use std::sync::{Arc, Mutex};

use nbreview_core::{help, parse_notebook, read_guidelines, read_notebook, Cell};
use nbreview_prompt::compose_prompt;

// --- Request types ---

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct LoadGuidelinesRequest {
    /// Path to a CSV file of review guidelines. The first row is treated as
    /// a header; only the first column is read; empty rows are dropped.
    path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct LoadNotebookRequest {
    /// Path to a local .ipynb file.
    path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct LoadNotebookContentRequest {
    /// Raw notebook JSON (e.g. pasted from the client).
    json_string: String,
}

// --- Server ---

/// The two process-wide load slots. Each load replaces its slot wholesale
/// on success and leaves it untouched on failure; `generate_prompt` reads
/// both under the same lock.
#[derive(Debug, Default)]
struct ReviewState {
    guidelines: Vec<String>,
    cells: Vec<Cell>,
}

#[derive(Clone)]
pub struct ReviewServer {
    state: Arc<Mutex<ReviewState>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ReviewServer {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ReviewState::default())),
            tool_router: Self::tool_router(),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, ReviewState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[tool(
        description = "Load qualitative review guidelines from a CSV file. Only the first column is used. Replaces any previously loaded guidelines."
    )]
    fn load_guidelines(
        &self,
        Parameters(req): Parameters<LoadGuidelinesRequest>,
    ) -> Result<CallToolResult, McpError> {
        match read_guidelines(&req.path) {
            Ok(guidelines) => {
                let count = guidelines.len();
                self.state().guidelines = guidelines;
                Ok(CallToolResult::success(vec![Content::text(format!(
                    "{} guideline(s) loaded.",
                    count
                ))]))
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Error loading guidelines: {}",
                e
            ))])),
        }
    }

    #[tool(
        description = "Load a Jupyter notebook (.ipynb) from the filesystem. Extracts code and markdown cells with their outputs. Replaces any previously loaded notebook."
    )]
    fn load_notebook(
        &self,
        Parameters(req): Parameters<LoadNotebookRequest>,
    ) -> Result<CallToolResult, McpError> {
        match read_notebook(&req.path) {
            Ok(cells) => {
                let count = cells.len();
                self.state().cells = cells;
                Ok(CallToolResult::success(vec![Content::text(format!(
                    "{} notebook cell(s) loaded.",
                    count
                ))]))
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Error loading notebook: {}",
                e
            ))])),
        }
    }

    #[tool(
        description = "Load notebook content from a raw JSON string (e.g. pasted into the client). Replaces any previously loaded notebook."
    )]
    fn load_notebook_content(
        &self,
        Parameters(req): Parameters<LoadNotebookContentRequest>,
    ) -> Result<CallToolResult, McpError> {
        match parse_notebook(&req.json_string) {
            Ok(cells) => {
                let count = cells.len();
                self.state().cells = cells;
                Ok(CallToolResult::success(vec![Content::text(format!(
                    "{} notebook cell(s) loaded from pasted content.",
                    count
                ))]))
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Failed to parse notebook JSON: {}",
                e
            ))])),
        }
    }

    #[tool(
        description = "Generate the review prompt pairing the loaded guidelines with the loaded notebook content. Long cells and outputs are truncated to fit a fixed character budget."
    )]
    fn generate_prompt(&self) -> Result<CallToolResult, McpError> {
        let state = self.state();
        match compose_prompt(&state.guidelines, &state.cells) {
            Ok(prompt) => Ok(CallToolResult::success(vec![Content::text(prompt)])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        }
    }

    #[tool(description = "Show usage instructions for the notebook reviewer tools")]
    fn get_help(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(help::HELP)]))
    }
}

const INSTRUCTIONS: &str = "\
Builds a guideline-driven review prompt for a Jupyter notebook. Typical flow: \
`load_guidelines` (CSV, first column), then `load_notebook` or \
`load_notebook_content`, then `generate_prompt`. The generated prompt embeds \
the notebook content (truncated to a character budget), the numbered \
guidelines, and fixed analysis instructions.";

#[tool_handler]
impl ServerHandler for ReviewServer {
    fn get_info(&self) -> ServerInfo {
        let instructions = format!("{}\n\n{}", INSTRUCTIONS, help::HELP);
        ServerInfo {
            instructions: Some(instructions.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("[nbreview-mcp] starting MCP server on stdio");
    let service = ReviewServer::new()
        .serve(rmcp::transport::io::stdio())
        .await
        .inspect_err(|e| eprintln!("[nbreview-mcp] server error: {}", e))?;
    service.waiting().await?;
    Ok(())
}
