//! Render a template against JSON input

use super::{CliError, load_context};
use crate::template::{render, try_render};

/// Options for the render command
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Template text containing `{{ ... }}` markers
    pub template: String,
    /// JSON data context
    pub input: Option<String>,
    /// Fail on the first marker that does not evaluate
    pub strict: bool,
}

/// Execute a render operation
pub fn execute_render(options: &RenderOptions) -> Result<String, CliError> {
    let context = load_context(options.input.as_deref())?;

    if options.strict {
        Ok(try_render(&options.template, &context)?)
    } else {
        Ok(render(&options.template, &context))
    }
}
