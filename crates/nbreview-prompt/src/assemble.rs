//! Budget-bounded assembly of the notebook content section.

use nbreview_core::Cell;

use crate::render::render_cell;

/// Default character budget for the whole notebook section. Generous, but
/// keeps the final prompt under common client display limits.
pub const DEFAULT_NOTEBOOK_BUDGET: usize = 150_000;

pub const SKIP_MARKER: &str =
    "[Remaining cell content and subsequent cells skipped due to overall notebook content length limit.]";

/// Render cells in document order and accumulate them against `budget`
/// (characters). The check happens before appending: the first cell that
/// would overflow is replaced entirely by its header plus [`SKIP_MARKER`],
/// and no later cell is considered. Single forward pass, no backtracking,
/// so identical input always yields an identical prompt.
pub fn assemble_notebook(cells: &[Cell], budget: usize) -> String {
    let mut blocks: Vec<String> = Vec::with_capacity(cells.len());
    let mut used = 0usize;

    for (idx, cell) in cells.iter().enumerate() {
        let rendered = render_cell(idx, cell);
        if used + rendered.chars() > budget {
            blocks.push(format!("{}{}", rendered.header, SKIP_MARKER));
            break;
        }
        used += rendered.chars();
        blocks.push(format!("{}{}", rendered.header, rendered.body));
    }

    blocks.join("\n\n")
}
