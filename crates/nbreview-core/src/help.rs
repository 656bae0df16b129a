/// Usage instructions, shared by the get_help tool and the MCP server
/// instructions.
pub const HELP: &str = "\
Notebook Reviewer MCP Help:\n\n\
1. Use `load_guidelines(path)` to load review guidelines from a CSV file. \
Only the first column is used; the first row is treated as a header.\n\
2. Load a notebook in either of two ways:\n\
   - `load_notebook(path)` for local .ipynb files\n\
   - `load_notebook_content(json_string)` for raw notebook JSON pasted into the client\n\
3. Use `generate_prompt()` to generate the full review prompt.\n\
Paste the result into your LLM client for feedback. Long cells and outputs \
are truncated head/tail to keep the prompt within a fixed character budget.\n";
