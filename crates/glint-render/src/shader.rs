//! Shader program contract.
//!
//! Compiling GLSL and binding uniforms is the backend's job. The scene graph
//! only needs to activate a program and look up locations by name.

use crate::error::{RenderError, RenderResult};

/// A linked GPU shader program.
pub trait ShaderProgram: Send + Sync {
    /// Make this program current for subsequent draw calls.
    fn activate(&self);

    /// Location of a uniform, or `-1` if the program has none by that name.
    fn uniform_location(&self, name: &str) -> i32;

    /// Location of a vertex attribute, or `-1` if absent.
    fn attrib_location(&self, name: &str) -> i32;

    /// The backend's handle for this program.
    fn gl_name(&self) -> u32;
}

/// A shader pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        }
    }
}

/// GLSL source for a vertex/fragment program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    pub fn stage(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }

    /// Cheap structural check run before handing the source to a backend.
    ///
    /// Catches empty stages and stages without an entry point. Real compile
    /// errors are reported by the backend.
    pub fn validate(&self) -> RenderResult<()> {
        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            let source = self.stage(stage);
            if source.trim().is_empty() {
                return Err(RenderError::ShaderCompile {
                    stage: stage.as_str(),
                    log: "source is empty".into(),
                });
            }
            if !source.contains("void main") {
                return Err(RenderError::ShaderCompile {
                    stage: stage.as_str(),
                    log: "missing `void main` entry point".into(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let ok = ShaderSource::new("void main() {}", "void main() {}");
        assert!(ok.validate().is_ok());

        let empty = ShaderSource::new("void main() {}", "  ");
        assert!(matches!(
            empty.validate(),
            Err(RenderError::ShaderCompile { stage: "fragment", .. })
        ));

        let no_main = ShaderSource::new("int x;", "void main() {}");
        assert!(matches!(
            no_main.validate(),
            Err(RenderError::ShaderCompile { stage: "vertex", .. })
        ));
    }
}
