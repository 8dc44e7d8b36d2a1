use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use pdfview_core::{EngineSettings, OptionValue, Options};
use pdfview_engine::{PdfBackend, PdfRenderer, TextFlowBackend};
use pdfview_view::ViewFinder;

use crate::config::{ConfigSource, JsonConfigSource, MemoryConfigSource};
use crate::error::Error;

/// Namespace the default options are loaded from.
pub const DEFAULT_NAMESPACE: &str = "dompdf.options";

/// Environment variable naming the config directory of [`Environment::global`].
pub const CONFIG_DIR_VAR: &str = "PDFVIEW_CONFIG_DIR";

/// Environment variable naming the views directory of [`Environment::global`].
pub const VIEWS_DIR_VAR: &str = "PDFVIEW_VIEWS_DIR";

static GLOBAL: OnceLock<Arc<Environment>> = OnceLock::new();

#[derive(Default)]
struct State {
    options: Options,
    defaults_loaded: bool,
    settings: Option<Arc<EngineSettings>>,
}

/// Engine configuration shared by every [`PdfView`](crate::PdfView) built
/// from it.
///
/// Options stay writable until [`initialize`](Self::initialize) publishes
/// them and activates the backend. That happens at most once; afterwards the
/// store is sealed for the lifetime of the environment.
pub struct Environment {
    source: Box<dyn ConfigSource>,
    backend: Arc<dyn PdfBackend>,
    views: Arc<ViewFinder>,
    namespace: String,
    state: Mutex<State>,
    initialized: AtomicBool,
}

impl Environment {
    pub fn builder() -> EnvironmentBuilder {
        EnvironmentBuilder::default()
    }

    /// Environment configured from [`CONFIG_DIR_VAR`] and [`VIEWS_DIR_VAR`],
    /// defaulting to `./config` and `./views`.
    pub fn from_env() -> Self {
        let dir = |var: &str, default: &str| {
            std::env::var_os(var)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };
        Self::builder()
            .config_source(JsonConfigSource::new(dir(CONFIG_DIR_VAR, "config")))
            .views(ViewFinder::new(dir(VIEWS_DIR_VAR, "views")))
            .build()
    }

    /// The process-wide environment. Built with [`from_env`](Self::from_env)
    /// on first access unless one was installed before.
    pub fn global() -> &'static Arc<Environment> {
        GLOBAL.get_or_init(|| Arc::new(Environment::from_env()))
    }

    /// Install the process-wide environment. Fails, handing the environment
    /// back, once [`global`](Self::global) has been used or another one was
    /// installed.
    pub fn install_global(env: Arc<Environment>) -> Result<(), Arc<Environment>> {
        GLOBAL.set(env)
    }

    pub fn views(&self) -> &Arc<ViewFinder> {
        &self.views
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the store with the options from the config source.
    pub fn load_default_options(&self) -> Result<(), Error> {
        let mut state = self.lock();
        if self.is_initialized() {
            return Err(Error::AlreadyInitialized(
                "could not load engine options as the engine has already been initialised"
                    .to_string(),
            ));
        }
        state.options = self.source.load(&self.namespace)?;
        state.defaults_loaded = true;
        tracing::info!(
            namespace = %self.namespace,
            count = state.options.len(),
            "loaded default engine options"
        );
        Ok(())
    }

    /// Load defaults unless that already happened. Options set before this
    /// call win over the defaults. A sealed environment is left alone.
    pub(crate) fn ensure_default_options(&self) -> Result<(), Error> {
        let mut state = self.lock();
        if state.defaults_loaded || self.is_initialized() {
            return Ok(());
        }
        let mut options = self.source.load(&self.namespace)?;
        options.append(&mut state.options);
        state.options = options;
        state.defaults_loaded = true;
        tracing::info!(
            namespace = %self.namespace,
            count = state.options.len(),
            "loaded default engine options"
        );
        Ok(())
    }

    /// Value of `key`, or `default` when it is not set.
    pub fn get_option(&self, key: &str, default: Option<OptionValue>) -> Option<OptionValue> {
        self.lock().options.get(key).cloned().or(default)
    }

    /// A copy of the whole store.
    pub fn options(&self) -> Options {
        self.lock().options.clone()
    }

    pub fn set_option(&self, key: &str, value: impl Into<OptionValue>) -> Result<(), Error> {
        let value = value.into();
        let mut state = self.lock();
        if self.is_initialized() {
            return Err(Error::AlreadyInitialized(format!(
                "could not assign {key} to {value} as the engine has already been initialised"
            )));
        }
        tracing::debug!(key, value = %value, "engine option set");
        state.options.insert(key.to_string(), value);
        Ok(())
    }

    /// Publish the store and activate the backend. Succeeds at most once.
    pub fn initialize(&self) -> Result<Arc<EngineSettings>, Error> {
        let mut state = self.lock();
        if self.is_initialized() {
            return Err(Error::AlreadyInitialized(
                "the engine is already initialised".to_string(),
            ));
        }
        self.initialize_locked(&mut state)
    }

    /// Published settings, initialising first if nobody has yet.
    pub(crate) fn ensure_initialized(&self) -> Result<Arc<EngineSettings>, Error> {
        let mut state = self.lock();
        if let Some(settings) = &state.settings {
            return Ok(Arc::clone(settings));
        }
        self.initialize_locked(&mut state)
    }

    fn initialize_locked(&self, state: &mut State) -> Result<Arc<EngineSettings>, Error> {
        let settings = Arc::new(EngineSettings::publish(&state.options)?);
        self.backend.activate(&settings)?;

        state.settings = Some(Arc::clone(&settings));
        self.initialized.store(true, Ordering::Release);
        tracing::info!(
            backend = self.backend.name(),
            constants = settings.constants().len(),
            "engine initialised, options are now read-only"
        );
        Ok(settings)
    }

    pub(crate) fn create_renderer(&self) -> Result<Box<dyn PdfRenderer>, Error> {
        let settings = self.ensure_initialized()?;
        let renderer = self.backend.create_renderer(settings)?;
        tracing::debug!(backend = self.backend.name(), "renderer created");
        Ok(renderer)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// The published settings; `None` before initialisation.
    pub fn settings(&self) -> Option<Arc<EngineSettings>> {
        self.lock().settings.clone()
    }

    /// Whether a published constant named `name` exists.
    pub fn is_defined(&self, name: &str) -> bool {
        self.lock()
            .settings
            .as_ref()
            .is_some_and(|s| s.is_defined(name))
    }

    /// Value of a published constant.
    pub fn constant(&self, name: &str) -> Option<OptionValue> {
        self.lock()
            .settings
            .as_ref()
            .and_then(|s| s.constant(name).cloned())
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("backend", &self.backend.name())
            .field("views", &self.views)
            .field("namespace", &self.namespace)
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

/// Builds an [`Environment`]. Defaults: no config options, the text-flow
/// backend, views under `./views`, namespace [`DEFAULT_NAMESPACE`].
pub struct EnvironmentBuilder {
    source: Box<dyn ConfigSource>,
    backend: Arc<dyn PdfBackend>,
    views: ViewFinder,
    namespace: String,
}

impl Default for EnvironmentBuilder {
    fn default() -> Self {
        Self {
            source: Box::new(MemoryConfigSource::default()),
            backend: Arc::new(TextFlowBackend),
            views: ViewFinder::new("views"),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl EnvironmentBuilder {
    pub fn config_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    pub fn backend(mut self, backend: impl PdfBackend + 'static) -> Self {
        self.backend = Arc::new(backend);
        self
    }

    pub fn views(mut self, views: ViewFinder) -> Self {
        self.views = views;
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn build(self) -> Environment {
        Environment {
            source: self.source,
            backend: self.backend,
            views: Arc::new(self.views),
            namespace: self.namespace,
            state: Mutex::new(State::default()),
            initialized: AtomicBool::new(false),
        }
    }
}
