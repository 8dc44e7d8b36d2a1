use std::path::{Path, PathBuf};

use pdfview_core::{CoreError, OptionValue, Options};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config namespace: {0:?}")]
    InvalidNamespace(String),

    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config entry {0} is not an object")]
    NotAnObject(String),

    #[error(transparent)]
    Option(#[from] CoreError),
}

/// Where default engine options come from.
///
/// A namespace is a dotted path: the first segment names a config group,
/// the rest walks into it, e.g. `dompdf.options`.
pub trait ConfigSource: Send + Sync {
    fn load(&self, namespace: &str) -> Result<Options, ConfigError>;
}

/// Reads `<dir>/<group>.json`. A missing file or a missing entry is an
/// empty set of options, not an error.
#[derive(Debug, Clone)]
pub struct JsonConfigSource {
    dir: PathBuf,
}

impl JsonConfigSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ConfigSource for JsonConfigSource {
    fn load(&self, namespace: &str) -> Result<Options, ConfigError> {
        let mut segments = namespace.split('.');
        let group = segments
            .next()
            .filter(|g| !g.is_empty())
            .ok_or_else(|| ConfigError::InvalidNamespace(namespace.to_string()))?;

        let path = self.dir.join(format!("{group}.json"));
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no config file, using empty options");
            return Ok(Options::new());
        }
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        let mut value: serde_json::Value = serde_json::from_str(&contents)?;
        for segment in segments {
            value = match value {
                serde_json::Value::Object(mut map) => match map.remove(segment) {
                    Some(inner) => inner,
                    None => return Ok(Options::new()),
                },
                _ => return Err(ConfigError::NotAnObject(namespace.to_string())),
            };
        }

        let map = match value {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => return Ok(Options::new()),
            _ => return Err(ConfigError::NotAnObject(namespace.to_string())),
        };

        let mut options = Options::new();
        for (key, value) in map.iter().filter(|(_, v)| !v.is_null()) {
            options.insert(key.clone(), OptionValue::from_json(key, value)?);
        }
        tracing::debug!(
            path = %path.display(),
            namespace,
            count = options.len(),
            "read config options"
        );
        Ok(options)
    }
}

/// A fixed set of options, returned for every namespace.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigSource {
    options: Options,
}

impl MemoryConfigSource {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn with(mut self, key: &str, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }
}

impl ConfigSource for MemoryConfigSource {
    fn load(&self, _namespace: &str) -> Result<Options, ConfigError> {
        Ok(self.options.clone())
    }
}
