//! Final prompt composition: preamble, notebook section, guideline list,
//! analysis instructions.

use nbreview_core::Cell;

use crate::assemble::{assemble_notebook, DEFAULT_NOTEBOOK_BUDGET};

/// Missing-precondition conditions. Reported to the caller as guidance
/// text, never as a panic; the MCP layer forwards `Display` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    EmptyGuidelines,
    EmptyNotebook,
}

impl std::fmt::Display for PromptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyGuidelines => {
                write!(f, "No guidelines loaded. Use `load_guidelines()` first.")
            }
            Self::EmptyNotebook => write!(
                f,
                "No notebook loaded. Use `load_notebook()` or `load_notebook_content()` first."
            ),
        }
    }
}

impl std::error::Error for PromptError {}

/// Compose the full review prompt from the current guideline list and cell
/// sequence. Stateless: reads nothing but its arguments.
pub fn compose_prompt(guidelines: &[String], cells: &[Cell]) -> Result<String, PromptError> {
    if guidelines.is_empty() {
        return Err(PromptError::EmptyGuidelines);
    }
    if cells.is_empty() {
        return Err(PromptError::EmptyNotebook);
    }

    let notebook = assemble_notebook(cells, DEFAULT_NOTEBOOK_BUDGET);

    let mut prompt = String::with_capacity(notebook.len() + 1024);
    prompt.push_str(
        "Below is the content of a Jupyter notebook. Please review this notebook based on the \
         specific guidelines provided afterwards.\n",
    );
    prompt.push_str(
        "Note that some code cells, markdown cells, or their outputs may be truncated due to \
         length limits.\n\n",
    );

    prompt.push_str("--- START NOTEBOOK CONTENT ---\n");
    prompt.push_str(&notebook);
    prompt.push_str("\n--- END NOTEBOOK CONTENT ---\n\n");

    prompt.push_str("--- REVIEW GUIDELINES ---\n");
    for (i, guideline) in guidelines.iter().enumerate() {
        prompt.push_str(&format!("Guideline {}: {}\n", i + 1, guideline));
    }
    prompt.push_str("--- END REVIEW GUIDELINES ---\n\n");

    prompt.push_str("--- ANALYSIS INSTRUCTIONS ---\n");
    prompt.push_str(
        "Please evaluate the notebook content based on the guidelines. For each guideline, \
         state whether it is met or not, and provide specific, constructive feedback and \
         reasoning. Cite specific cell numbers where relevant.\n",
    );
    prompt.push_str("Example feedback format:\n");
    prompt.push_str("Guideline X: [Met/Not Met]\n");
    prompt.push_str("Feedback: [Your specific feedback, referencing relevant cell numbers]\n\n");
    prompt.push_str("--- END ANALYSIS INSTRUCTIONS ---\n");

    Ok(prompt.trim().to_string())
}
