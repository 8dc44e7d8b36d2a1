use std::path::{Component, Path, PathBuf};

pub const DEFAULT_EXTENSION: &str = "html";

/// Extensions a view name may carry explicitly, e.g. `invoice.css`.
const KNOWN_EXTENSIONS: &[&str] = &["html", "htm", "tera", "css", "txt", "xml", "svg"];

/// Resolves view names to template files.
///
/// Roots are searched in the order they were added. A name resolves to
/// `root/name` when it already carries a known extension, otherwise (or if
/// that file is missing) to `root/name.<extension>`.
#[derive(Debug, Clone)]
pub struct ViewFinder {
    roots: Vec<PathBuf>,
    extension: String,
}

impl ViewFinder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            roots: vec![root.into()],
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Build a finder from several roots. An empty iterator yields a finder
    /// that resolves nothing.
    pub fn from_roots<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn find(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        let confined = !name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !confined {
            tracing::debug!(name, "rejecting view name outside the view roots");
            return None;
        }

        let mut candidates = Vec::with_capacity(2);
        if self.has_known_extension(relative) {
            candidates.push(relative.to_path_buf());
        }
        candidates.push(PathBuf::from(format!("{name}.{}", self.extension)));

        self.roots
            .iter()
            .flat_map(|root| candidates.iter().map(move |c| root.join(c)))
            .find(|path| path.is_file())
    }

    fn has_known_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .is_some_and(|e| e == self.extension || KNOWN_EXTENSIONS.contains(&e.as_str()))
    }
}
