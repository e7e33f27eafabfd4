//! Pay stub rendering.
//!
//! Rendering runs after a stub is persisted and only ever produces an
//! artifact from it. A failed rendering leaves the stored stub untouched.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{EngineError, EngineResult};
use crate::models::PayStub;

/// Turns a persisted pay stub into a document.
pub trait PayStubRenderer: Send + Sync {
    /// Renders `stub` and returns the path of the produced artifact.
    fn render(&self, stub: &PayStub) -> EngineResult<PathBuf>;
}

/// Writes each stub as pretty-printed JSON under a root directory.
///
/// The artifact sits at the stub's document path with a `.json` extension,
/// e.g. `{root}/documents/paystubs/EMP-007_2025-03.json`.
#[derive(Debug, Clone)]
pub struct JsonSnapshotRenderer {
    root: PathBuf,
}

impl JsonSnapshotRenderer {
    /// Creates a renderer writing below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn artifact_path(&self, stub: &PayStub) -> PathBuf {
        self.root.join(&stub.document_path).with_extension("json")
    }
}

impl PayStubRenderer for JsonSnapshotRenderer {
    fn render(&self, stub: &PayStub) -> EngineResult<PathBuf> {
        let relative = Path::new(&stub.document_path);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(EngineError::Rendering {
                path: stub.document_path.clone(),
                message: "document path must be relative and stay below the root".to_string(),
            });
        }

        let path = self.artifact_path(stub);
        let rendering_error = |message: String| EngineError::Rendering {
            path: path.display().to_string(),
            message,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| rendering_error(e.to_string()))?;
        }
        let body = serde_json::to_string_pretty(stub).map_err(|e| rendering_error(e.to_string()))?;
        fs::write(&path, body).map_err(|e| rendering_error(e.to_string()))?;

        tracing::debug!(path = %path.display(), "Pay stub rendered");
        Ok(path)
    }
}

/// A renderer that produces nothing, for deployments that render elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRenderer;

impl PayStubRenderer for NoopRenderer {
    fn render(&self, stub: &PayStub) -> EngineResult<PathBuf> {
        Ok(PathBuf::from(&stub.document_path))
    }
}
