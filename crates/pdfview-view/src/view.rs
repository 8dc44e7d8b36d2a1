use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tera::{Context, Tera};

use crate::error::ViewError;
use crate::finder::ViewFinder;

#[derive(Debug, Clone)]
struct BoundFile {
    name: String,
    path: PathBuf,
}

/// A template bound to a file and a set of variables.
#[derive(Debug, Clone)]
pub struct View {
    finder: Arc<ViewFinder>,
    file: Option<BoundFile>,
    data: Map<String, Value>,
}

impl View {
    /// Create a view, binding `file` if given. Fails with
    /// [`ViewError::TemplateNotFound`] when the file does not resolve.
    pub fn new(
        finder: Arc<ViewFinder>,
        file: Option<&str>,
        data: Option<Map<String, Value>>,
    ) -> Result<Self, ViewError> {
        let mut view = Self {
            finder,
            file: None,
            data: data.unwrap_or_default(),
        };
        if let Some(file) = file {
            view.set_filename(file)?;
        }
        Ok(view)
    }

    pub fn set_filename(&mut self, name: &str) -> Result<&mut Self, ViewError> {
        let path = self
            .finder
            .find(name)
            .ok_or_else(|| ViewError::TemplateNotFound(name.to_string()))?;
        self.file = Some(BoundFile {
            name: name.to_string(),
            path,
        });
        Ok(self)
    }

    /// Bind one variable.
    pub fn set(&mut self, key: &str, value: impl Serialize) -> Result<&mut Self, ViewError> {
        self.data.insert(key.to_string(), serde_json::to_value(value)?);
        Ok(self)
    }

    /// Merge a JSON object into the bound variables.
    pub fn bind(&mut self, data: Value) -> Result<&mut Self, ViewError> {
        match data {
            Value::Object(map) => {
                self.data.extend(map);
                Ok(self)
            }
            _ => Err(ViewError::DataNotAnObject),
        }
    }

    pub fn filename(&self) -> Option<&str> {
        self.file.as_ref().map(|f| f.name.as_str())
    }

    pub fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(|f| f.path.as_path())
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Render the bound template, or bind `file` first when given.
    pub fn render(&mut self, file: Option<&str>) -> Result<String, ViewError> {
        if let Some(file) = file {
            self.set_filename(file)?;
        }
        let bound = self.file.as_ref().ok_or(ViewError::NoTemplate)?;
        let source = std::fs::read_to_string(&bound.path)?;

        // Named after the resolved file so Tera autoescapes `.html` views.
        let template_name = bound
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(bound.name.as_str());

        let mut tera = Tera::default();
        tera.add_raw_template(template_name, &source)
            .map_err(|e| ViewError::TemplateParse(e.to_string()))?;

        let context = Context::from_value(Value::Object(self.data.clone()))
            .map_err(|e| ViewError::TemplateRender(e.to_string()))?;

        let rendered = tera.render(template_name, &context)?;
        tracing::debug!(view = %bound.name, bytes = rendered.len(), "rendered view");
        Ok(rendered)
    }
}
