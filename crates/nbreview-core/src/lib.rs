pub mod help;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;

// --- Types (matching the nbformat v4 structures we consume) ---

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CellType {
    Code,
    Markdown,
    /// Any other cell type ("raw" etc.). Rendered as a header with no body.
    Other,
}

impl<'de> Deserialize<'de> for CellType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(match tag.as_str() {
            "code" => CellType::Code,
            "markdown" => CellType::Markdown,
            _ => CellType::Other,
        })
    }
}

impl CellType {
    /// Capitalized label used in rendered cell headers.
    pub fn label(&self) -> &'static str {
        match self {
            CellType::Code => "Code",
            CellType::Markdown => "Markdown",
            CellType::Other => "Other",
        }
    }
}

/// nbformat stores multiline text either as a single string or as a list of
/// line strings (each usually keeping its trailing newline).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SourceText {
    One(String),
    Many(Vec<String>),
}

impl SourceText {
    /// Normalize to a single string the way nbformat does on read:
    /// concatenation, since list entries carry their own newlines.
    pub fn flatten(&self) -> String {
        match self {
            SourceText::One(s) => s.clone(),
            SourceText::Many(lines) => lines.concat(),
        }
    }
}

impl Default for SourceText {
    fn default() -> Self {
        SourceText::One(String::new())
    }
}

/// A MIME bundle from an execute_result output: mime type → JSON value.
pub type MimeBundle = HashMap<String, serde_json::Value>;

/// One recorded output of a code cell, tagged by the ipynb `output_type`
/// field. Unrecognized tags (display_data included) collapse into `Other`
/// so the renderer can skip them with an explicit match arm.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "output_type", rename_all = "snake_case")]
pub enum Output {
    Stream {
        #[serde(default)]
        text: SourceText,
    },
    ExecuteResult {
        #[serde(default)]
        data: MimeBundle,
    },
    Error {
        #[serde(default)]
        ename: String,
        #[serde(default)]
        evalue: String,
    },
    #[serde(other)]
    Other,
}

/// Extract a textual MIME entry from a bundle. List values are joined with
/// newlines; non-text values (JSON objects etc.) yield None.
pub fn mime_text(data: &MimeBundle, mime: &str) -> Option<String> {
    match data.get(mime)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        _ => None,
    }
}

/// One unit of a notebook document. Position in the containing vector is
/// significant: cell numbering in the rendered prompt is 1-based order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: CellType,
    /// Source text, already trimmed of surrounding whitespace.
    pub source: String,
    pub outputs: Vec<Output>,
}

// --- Notebook parsing ---

#[derive(Debug, Deserialize)]
struct RawCell {
    cell_type: CellType,
    #[serde(default)]
    source: SourceText,
    #[serde(default)]
    outputs: Vec<Output>,
}

#[derive(Debug, Deserialize)]
struct RawNotebook {
    #[serde(default)]
    cells: Vec<RawCell>,
}

/// Parse raw ipynb v4 JSON into the cell sequence consumed by the prompt
/// builder. Cell sources are normalized and trimmed; markdown cells keep
/// their outputs field (always empty in practice) so the renderer can
/// ignore it uniformly.
pub fn parse_notebook(json: &str) -> Result<Vec<Cell>, String> {
    let raw: RawNotebook = serde_json::from_str(json).map_err(|e| e.to_string())?;
    Ok(raw
        .cells
        .into_iter()
        .map(|c| Cell {
            cell_type: c.cell_type,
            source: c.source.flatten().trim().to_string(),
            outputs: c.outputs,
        })
        .collect())
}

/// Read and parse a .ipynb file from disk.
pub fn read_notebook(path: &str) -> Result<Vec<Cell>, String> {
    let raw = fs::read_to_string(path).map_err(|e| e.to_string())?;
    parse_notebook(&raw)
}

// --- Guideline loading ---

/// Load review guidelines from a CSV file. The first row is treated as a
/// header (pandas `read_csv` semantics), only the first column is read, and
/// empty or whitespace-only cells are dropped.
pub fn read_guidelines(path: &str) -> Result<Vec<String>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| e.to_string())?;

    let mut guidelines = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| e.to_string())?;
        if let Some(first) = record.get(0) {
            let text = first.trim();
            if !text.is_empty() {
                guidelines.push(text.to_string());
            }
        }
    }
    Ok(guidelines)
}
