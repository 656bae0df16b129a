pub mod assemble;
pub mod compose;
pub mod render;
pub mod truncate;

pub use assemble::{assemble_notebook, DEFAULT_NOTEBOOK_BUDGET, SKIP_MARKER};
pub use compose::{compose_prompt, PromptError};
pub use render::{render_cell, RenderedCell};
