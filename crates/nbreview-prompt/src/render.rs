//! Per-cell rendering with per-type truncation rules.

use nbreview_core::{mime_text, Cell, CellType, Output};

use crate::truncate::{truncate_head_chars, truncate_middle_chars, truncate_middle_lines};

// Truncation budgets. Tuned so a full notebook section stays well inside
// typical client display limits.
pub const MAX_CODE_LINES: usize = 15;
pub const MAX_MARKDOWN_CHARS: usize = 250;
pub const MAX_STREAM_CHARS: usize = 100;
pub const MAX_RESULT_CHARS: usize = 150;
pub const MAX_ERROR_CHARS: usize = 100;

pub const STREAM_MARKER: &str = "\n... [STREAM OUTPUT TRUNCATED - middle omitted] ...\n";
pub const RESULT_MARKER: &str = "\n... [EXEC RESULT TRUNCATED - middle omitted] ...\n";
pub const MARKDOWN_MARKER: &str = "\n... [MARKDOWN TRUNCATED] ...";
pub const ERROR_MARKER: &str = "\n... [ERROR TRUNCATED] ...";

const IMAGE_PLACEHOLDER: &str =
    "Output (image/plot): [Image data omitted. Refer to code for generation logic.]";

/// One rendered cell, header and body kept separate so the assembler can
/// account for them and fall back to header-plus-marker on overflow.
#[derive(Debug, Clone)]
pub struct RenderedCell {
    /// `# Cell {n} - {Type}\n`
    pub header: String,
    /// Truncated source plus rendered outputs, blank-line separated.
    pub body: String,
}

impl RenderedCell {
    /// Header and body lengths in characters, as charged against the
    /// notebook budget.
    pub fn chars(&self) -> usize {
        self.header.chars().count() + self.body.chars().count()
    }
}

/// Render one cell. `index` is the 0-based position in the notebook; the
/// header shows it 1-based. Pure function of its input.
pub fn render_cell(index: usize, cell: &Cell) -> RenderedCell {
    let header = format!("# Cell {} - {}\n", index + 1, cell.cell_type.label());

    let mut parts: Vec<String> = Vec::new();
    match cell.cell_type {
        CellType::Code => {
            parts.push(truncate_middle_lines(&cell.source, MAX_CODE_LINES, "CODE"));
            for output in &cell.outputs {
                if let Some(block) = render_output(output) {
                    parts.push(block);
                }
            }
        }
        CellType::Markdown => {
            // Markdown cells never render outputs, even if present.
            parts.push(truncate_head_chars(
                &cell.source,
                MAX_MARKDOWN_CHARS,
                MARKDOWN_MARKER,
            ));
        }
        CellType::Other => {}
    }

    RenderedCell {
        header,
        body: parts.join("\n\n"),
    }
}

/// Render one output block, or None for outputs that produce nothing
/// (unhandled tags, execute results with no usable MIME entry).
fn render_output(output: &Output) -> Option<String> {
    match output {
        Output::Stream { text } => {
            let text = truncate_middle_chars(&text.flatten(), MAX_STREAM_CHARS, STREAM_MARKER);
            Some(format!("Output (stream):\n```\n{}\n```", text))
        }
        Output::ExecuteResult { data } => {
            if let Some(plain) = mime_text(data, "text/plain") {
                let text = truncate_middle_chars(&plain, MAX_RESULT_CHARS, RESULT_MARKER);
                Some(format!("Output (result):\n```\n{}\n```", text))
            } else if data.contains_key("image/png") {
                Some(IMAGE_PLACEHOLDER.to_string())
            } else {
                None
            }
        }
        Output::Error { ename, evalue } => {
            let text = format!("Error Type: {}\nError Value: {}", ename, evalue);
            // Errors keep the prefix only; the tail is usually traceback noise.
            let text = truncate_head_chars(&text, MAX_ERROR_CHARS, ERROR_MARKER);
            Some(format!("Output (error):\n```\n{}\n```", text))
        }
        Output::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbreview_core::{MimeBundle, SourceText};

    fn code_cell(source: &str, outputs: Vec<Output>) -> Cell {
        Cell {
            cell_type: CellType::Code,
            source: source.to_string(),
            outputs,
        }
    }

    fn stream(text: &str) -> Output {
        Output::Stream {
            text: SourceText::One(text.to_string()),
        }
    }

    #[test]
    fn header_is_one_based_and_capitalized() {
        let cell = code_cell("x = 1", vec![]);
        let rendered = render_cell(0, &cell);
        assert_eq!(rendered.header, "# Cell 1 - Code\n");
        assert_eq!(rendered.body, "x = 1");
    }

    #[test]
    fn short_cell_renders_untruncated() {
        let source = (1..=15).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n");
        let rendered = render_cell(0, &code_cell(&source, vec![]));
        assert_eq!(rendered.body, source);
    }

    #[test]
    fn long_code_source_is_truncated_head_tail() {
        let source = (1..=20).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n");
        let rendered = render_cell(0, &code_cell(&source, vec![]));
        assert!(rendered.body.starts_with("line 1\n"));
        assert!(rendered.body.contains("... [CODE TRUNCATED - 5 lines omitted] ..."));
        assert!(rendered.body.ends_with("line 20"));
    }

    #[test]
    fn stream_output_is_fenced_and_truncated() {
        let text = "s".repeat(250);
        let rendered = render_cell(0, &code_cell("x", vec![stream(&text)]));
        assert!(rendered.body.contains("Output (stream):\n```\n"));
        assert!(rendered.body.contains("STREAM OUTPUT TRUNCATED"));

        // head 50 chars + marker + whatever tail budget the marker leaves
        let start = rendered.body.find("```\n").unwrap() + 4;
        let end = rendered.body.rfind("\n```").unwrap();
        let inner = &rendered.body[start..end];
        let tail = MAX_STREAM_CHARS.saturating_sub(50 + STREAM_MARKER.chars().count());
        assert_eq!(inner.chars().count(), 50 + STREAM_MARKER.chars().count() + tail);
    }

    #[test]
    fn short_stream_output_passes_through() {
        let rendered = render_cell(0, &code_cell("x", vec![stream("done\n")]));
        assert!(rendered.body.contains("Output (stream):\n```\ndone\n\n```"));
    }

    #[test]
    fn execute_result_joins_plain_text_lines() {
        let mut data = MimeBundle::new();
        data.insert("text/plain".to_string(), serde_json::json!(["a", "b"]));
        let rendered = render_cell(0, &code_cell("x", vec![Output::ExecuteResult { data }]));
        assert!(rendered.body.contains("Output (result):\n```\na\nb\n```"));
    }

    #[test]
    fn execute_result_png_renders_placeholder() {
        let mut data = MimeBundle::new();
        data.insert("image/png".to_string(), serde_json::json!("base64data"));
        let rendered = render_cell(0, &code_cell("x", vec![Output::ExecuteResult { data }]));
        assert!(rendered.body.contains("Output (image/plot): [Image data omitted."));
    }

    #[test]
    fn execute_result_without_known_mime_renders_nothing() {
        let mut data = MimeBundle::new();
        data.insert("text/html".to_string(), serde_json::json!("<b>hi</b>"));
        let rendered = render_cell(0, &code_cell("x", vec![Output::ExecuteResult { data }]));
        assert_eq!(rendered.body, "x");
    }

    #[test]
    fn error_output_is_prefix_truncated() {
        let rendered = render_cell(
            0,
            &code_cell(
                "x",
                vec![Output::Error {
                    ename: "ValueError".to_string(),
                    evalue: "v".repeat(200),
                }],
            ),
        );
        assert!(rendered.body.contains("Error Type: ValueError\nError Value: "));
        assert!(rendered.body.contains("... [ERROR TRUNCATED] ..."));
        // head+tail is not used for errors
        assert!(!rendered.body.contains("middle omitted"));
    }

    #[test]
    fn short_error_is_untruncated() {
        let rendered = render_cell(
            0,
            &code_cell(
                "x",
                vec![Output::Error {
                    ename: "KeyError".to_string(),
                    evalue: "'id'".to_string(),
                }],
            ),
        );
        assert!(rendered
            .body
            .contains("Output (error):\n```\nError Type: KeyError\nError Value: 'id'\n```"));
    }

    #[test]
    fn unhandled_output_tag_is_skipped() {
        let rendered = render_cell(0, &code_cell("x", vec![Output::Other]));
        assert_eq!(rendered.body, "x");
    }

    #[test]
    fn markdown_is_prefix_truncated() {
        let cell = Cell {
            cell_type: CellType::Markdown,
            source: "m".repeat(300),
            outputs: vec![],
        };
        let rendered = render_cell(2, &cell);
        assert_eq!(rendered.header, "# Cell 3 - Markdown\n");
        assert_eq!(
            rendered.body,
            format!("{}{}", "m".repeat(250), MARKDOWN_MARKER)
        );
    }

    #[test]
    fn markdown_outputs_are_never_rendered() {
        let cell = Cell {
            cell_type: CellType::Markdown,
            source: "notes".to_string(),
            outputs: vec![stream("spurious")],
        };
        let rendered = render_cell(0, &cell);
        assert_eq!(rendered.body, "notes");
    }

    #[test]
    fn other_cell_type_renders_empty_body() {
        let cell = Cell {
            cell_type: CellType::Other,
            source: "raw content".to_string(),
            outputs: vec![],
        };
        let rendered = render_cell(0, &cell);
        assert_eq!(rendered.header, "# Cell 1 - Other\n");
        assert_eq!(rendered.body, "");
    }
}
