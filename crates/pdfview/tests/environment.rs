mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use pdfview::{Environment, Error, MemoryConfigSource, OptionValue, PdfView, keys};
use pdfview_engine::EngineError;

use common::{CountingBackend, builder, environment};

fn text(value: &str) -> Option<OptionValue> {
    Some(OptionValue::from(value))
}

#[test]
fn get_option_falls_back_to_default_before_anything_is_loaded() {
    let env = environment();
    assert_eq!(
        env.get_option("NEVER_SET", Some(OptionValue::Integer(5))),
        Some(OptionValue::Integer(5))
    );
    assert_eq!(env.get_option(keys::DEFAULT_PAPER_SIZE, None), None);
    assert!(env.options().is_empty());
}

#[test]
fn factory_loads_default_options_from_config() {
    let env = environment();
    PdfView::factory(&env, Some("exists"), None).unwrap();
    assert_eq!(env.get_option(keys::DEFAULT_PAPER_SIZE, None), text("a5"));
    assert_eq!(env.get_option(keys::DPI, None), Some(OptionValue::Integer(96)));
}

#[test]
fn options_can_be_set_and_read_before_initialisation() {
    let env = environment();
    env.set_option(keys::DEFAULT_MEDIA_TYPE, "braille").unwrap();
    assert_eq!(env.get_option(keys::DEFAULT_MEDIA_TYPE, None), text("braille"));
}

#[test]
fn overrides_set_before_the_factory_survive_default_loading() {
    let env = environment();
    env.set_option(keys::DEFAULT_PAPER_SIZE, "a4").unwrap();
    env.set_option(keys::DEFAULT_MEDIA_TYPE, "print").unwrap();
    PdfView::factory(&env, Some("exists"), None).unwrap();

    assert_eq!(env.get_option(keys::DEFAULT_PAPER_SIZE, None), text("a4"));
    assert_eq!(env.get_option(keys::DEFAULT_MEDIA_TYPE, None), text("print"));
    assert_eq!(env.get_option(keys::DEFAULT_FONT, None), text("sans-serif"));
}

#[test]
fn defaults_are_loaded_only_once_by_the_factory() {
    let env = environment();
    PdfView::factory(&env, Some("exists"), None).unwrap();
    env.set_option(keys::DEFAULT_PAPER_SIZE, "legal").unwrap();
    PdfView::factory(&env, Some("exists"), None).unwrap();
    assert_eq!(env.get_option(keys::DEFAULT_PAPER_SIZE, None), text("legal"));
}

#[test]
fn explicit_load_replaces_the_store() {
    let env = environment();
    env.set_option("APP_ONLY", true).unwrap();
    env.load_default_options().unwrap();
    assert_eq!(env.get_option("APP_ONLY", None), None);
    assert_eq!(env.get_option(keys::DEFAULT_PAPER_SIZE, None), text("a5"));
}

#[test]
fn initialize_succeeds_at_most_once() {
    let env = environment();
    assert!(!env.is_initialized());
    env.initialize().unwrap();
    assert!(env.is_initialized());

    for _ in 0..3 {
        assert!(matches!(env.initialize(), Err(Error::AlreadyInitialized(_))));
    }
}

#[test]
fn setting_options_fails_once_initialised_and_leaves_store_unchanged() {
    let env = environment();
    env.set_option(keys::FONT_CACHE, "/var/cache/fonts").unwrap();
    env.initialize().unwrap();
    let before = env.options();

    let err = env.set_option(keys::FONT_CACHE, "foo").unwrap_err();
    assert!(matches!(err, Error::AlreadyInitialized(ref msg) if msg.contains(keys::FONT_CACHE)));
    assert_eq!(env.options(), before);
    assert_eq!(env.get_option(keys::FONT_CACHE, None), text("/var/cache/fonts"));
}

#[test]
fn loading_defaults_fails_once_initialised() {
    let env = environment();
    env.initialize().unwrap();
    assert!(matches!(
        env.load_default_options(),
        Err(Error::AlreadyInitialized(_))
    ));
}

#[test]
fn factory_still_works_on_a_sealed_environment() {
    let env = environment();
    env.initialize().unwrap();
    assert!(PdfView::factory(&env, Some("exists"), None).is_ok());
    assert!(env.options().is_empty());
}

#[test]
fn constants_are_published_only_when_the_first_renderer_is_built() {
    let env = environment();
    let mut view = PdfView::factory(&env, Some("exists"), None).unwrap();
    env.set_option(keys::DEFAULT_MEDIA_TYPE, "braille").unwrap();

    assert!(!env.is_initialized());
    assert!(env.settings().is_none());
    for key in keys::ALL {
        assert!(!env.is_defined(key), "{key} defined too early");
    }

    view.renderer().unwrap();

    assert!(env.is_initialized());
    assert_eq!(env.constant(keys::DEFAULT_MEDIA_TYPE), text("braille"));
    for (key, value) in env.options() {
        assert_eq!(env.constant(&key), Some(value), "constant {key}");
    }
    assert!(env.is_defined(keys::DEFAULT_FONT));
}

#[test]
fn renderer_is_built_lazily_and_cached() {
    let env = environment();
    let mut view = PdfView::factory(&env, Some("exists"), None).unwrap();
    assert!(!view.has_renderer());

    view.renderer().unwrap();
    assert!(view.has_renderer());
    view.renderer().unwrap();
    assert!(view.has_renderer());
}

#[test]
fn failed_activation_leaves_the_environment_unsealed() {
    let env = environment();
    env.set_option(keys::PDF_BACKEND, "PDFLib").unwrap();
    let mut view = PdfView::factory(&env, Some("exists"), None).unwrap();

    let err = view.renderer().err().unwrap();
    assert!(matches!(
        err,
        Error::Engine(EngineError::UnsupportedBackend(ref name)) if name == "PDFLib"
    ));
    assert!(!env.is_initialized());
    assert!(!env.is_defined(keys::PDF_BACKEND));
    assert!(!view.has_renderer());

    env.set_option(keys::PDF_BACKEND, "CPDF").unwrap();
    assert!(view.renderer().is_ok());
}

#[test]
fn invalid_option_values_are_reported_at_initialisation() {
    let env = environment();
    env.set_option(keys::ENABLE_REMOTE, "sometimes").unwrap();
    assert!(matches!(env.initialize(), Err(Error::Option(_))));
    assert!(!env.is_initialized());
}

#[test]
fn concurrent_first_use_initialises_once() {
    let backend = CountingBackend::default();
    let activations = Arc::clone(&backend.activations);
    let env = Arc::new(builder().backend(backend).build());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let env = Arc::clone(&env);
            std::thread::spawn(move || {
                let mut view = PdfView::factory(&env, Some("exists"), None).unwrap();
                view.renderer().map(|_| ()).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(activations.load(Ordering::SeqCst), 1);
    assert!(env.is_initialized());
}

#[test]
fn memory_source_feeds_defaults() {
    let env = Arc::new(
        Environment::builder()
            .config_source(MemoryConfigSource::default().with(keys::DPI, 300))
            .views(pdfview_view::ViewFinder::new(common::test_data("views")))
            .build(),
    );
    PdfView::factory(&env, Some("exists"), None).unwrap();
    assert_eq!(env.get_option(keys::DPI, None), Some(OptionValue::Integer(300)));
    let settings = env.initialize().unwrap();
    assert_eq!(settings.constant(keys::DPI), Some(&OptionValue::Integer(300)));
}
