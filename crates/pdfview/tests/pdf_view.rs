mod common;

use std::sync::Arc;

use pdfview::{Error, PdfView};
use pdfview_engine::EngineError;
use serde_json::json;

use common::{FailingBackend, builder, environment};

#[test]
fn missing_views_fail_at_construction() {
    let env = environment();
    for (path, expects_error) in [("exists", false), ("exists.css", false), ("doesnt_exist", true)] {
        let result = PdfView::new(&env, Some(path), None);
        assert_eq!(
            matches!(result, Err(Error::TemplateNotFound(_))),
            expects_error,
            "view {path}"
        );
        if !expects_error {
            assert!(result.is_ok(), "view {path}");
        }
    }
}

#[test]
fn factory_creates_a_new_instance_each_time() {
    let env = environment();
    let mut first = PdfView::factory(&env, Some("exists"), None).unwrap();
    let second = PdfView::factory(&env, Some("exists"), None).unwrap();

    assert!(!std::ptr::eq(&first, &second));
    assert!(Arc::ptr_eq(first.environment(), second.environment()));

    first.renderer().unwrap();
    assert!(first.has_renderer());
    assert!(!second.has_renderer());
}

#[test]
fn render_returns_pdf_bytes() {
    let env = environment();
    let mut view = PdfView::factory(&env, Some("exists"), None).unwrap();
    view.set("title", "Quarterly report").unwrap();
    view.set("items", vec!["revenue", "costs"]).unwrap();

    let pdf = view.render(None).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));

    let doc = lopdf::Document::load_mem(&pdf).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn render_can_be_repeated_on_the_same_view() {
    let env = environment();
    let mut view = PdfView::factory(&env, Some("exists"), None).unwrap();
    let first = view.render(None).unwrap();
    let second = view.render(Some("exists.css")).unwrap();
    assert!(first.starts_with(b"%PDF-"));
    assert!(second.starts_with(b"%PDF-"));
    assert_eq!(view.view().filename(), Some("exists.css"));
}

#[test]
fn render_seals_the_environment() {
    let env = environment();
    let mut view = PdfView::factory(&env, Some("exists"), None).unwrap();
    view.render(None).unwrap();
    assert!(matches!(
        env.set_option("DOMPDF_DPI", 72),
        Err(Error::AlreadyInitialized(_))
    ));
}

#[test]
fn render_with_a_missing_view_fails_before_touching_the_engine() {
    let env = environment();
    let mut view = PdfView::factory(&env, Some("exists"), None).unwrap();
    assert!(matches!(
        view.render(Some("doesnt_exist")),
        Err(Error::TemplateNotFound(ref name)) if name == "doesnt_exist"
    ));
    assert!(!env.is_initialized());
}

#[test]
fn bound_data_is_passed_through_bind() {
    let env = environment();
    let data = json!({ "client": "Acme" });
    let mut view = PdfView::factory(&env, Some("exists"), data.as_object().cloned()).unwrap();
    view.bind(json!({ "title": "Statement" })).unwrap();

    assert_eq!(view.view().data().get("client"), Some(&json!("Acme")));
    assert_eq!(view.view().data().get("title"), Some(&json!("Statement")));
    assert!(view.render(None).unwrap().starts_with(b"%PDF-"));
}

#[test]
fn engine_errors_pass_through_untranslated() {
    let env = Arc::new(builder().backend(FailingBackend::default()).build());
    let mut view = PdfView::factory(&env, Some("exists"), None).unwrap();

    let err = view.render(None).unwrap_err();
    assert!(matches!(
        err,
        Error::Engine(EngineError::Backend(ref msg)) if msg == "layout exploded"
    ));
    assert_eq!(err.to_string(), "layout exploded");
}

#[test]
fn render_to_file_writes_the_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.pdf");
    let env = environment();
    let mut view = PdfView::factory(&env, Some("exists"), None).unwrap();

    view.render_to_file(&out, None).unwrap();

    let written = std::fs::read(&out).unwrap();
    assert!(written.starts_with(b"%PDF-"));
}
