use std::fmt;

use thiserror::Error;

/// Pipeline stage a shader error refers to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Failures that disable the gradient renderer.
///
/// None of these stop the application: point editing, history and exports do
/// not depend on a working GPU program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("no graphics context available: {0}")]
    ContextUnavailable(String),

    #[error("{stage} shader failed to compile:\n{message}")]
    ShaderCompileFailed { stage: ShaderStage, message: String },

    #[error("shader program failed to link: {0}")]
    ProgramLinkFailed(String),
}
