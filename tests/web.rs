//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use hero_particle_field::{FieldConfig, ParticleBackground};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlCanvasElement, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn host_element(id: &str) -> HtmlElement {
    let doc = document();
    let host = doc
        .create_element("section")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    host.set_id(id);
    doc.body().unwrap().append_child(&host).unwrap();
    host
}

// Resolves inside the next animation frame, after any callback queued
// before it
async fn next_animation_frame() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .request_animation_frame(&resolve)
            .unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}

fn canvas(width: u32, height: u32) -> HtmlCanvasElement {
    let canvas = document()
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(width);
    canvas.set_height(height);
    canvas
}

#[wasm_bindgen_test]
fn seeded_background_draws_frames() {
    let background = ParticleBackground::new(canvas(320, 200), "", Some(7)).unwrap();
    assert_eq!(background.particle_count(), 50);
    background.frame().unwrap();
    background.frame().unwrap();
}

#[wasm_bindgen_test]
fn config_json_sets_particle_count() {
    let background =
        ParticleBackground::new(canvas(320, 200), r#"{"particle_count": 12}"#, Some(1)).unwrap();
    assert_eq!(background.particle_count(), 12);
}

#[wasm_bindgen_test]
fn invalid_config_is_rejected() {
    let result = ParticleBackground::new(canvas(320, 200), r#"{"opacity_range": [0.9, 0.1]}"#, None);
    assert!(result.is_err());
}

#[wasm_bindgen_test]
fn resize_updates_canvas() {
    let element = canvas(320, 200);
    let background =
        ParticleBackground::with_canvas(element.clone(), FieldConfig::default(), StdRng::seed_from_u64(3))
            .unwrap();
    background.resize(100, 60);
    assert_eq!(element.width(), 100);
    assert_eq!(element.height(), 60);
    background.frame().unwrap();
}

#[wasm_bindgen_test]
fn attach_without_host_is_a_no_op() {
    let result = ParticleBackground::attach("#no-such-hero", "").unwrap();
    assert!(result.is_none());
}

#[wasm_bindgen_test]
fn attach_adds_overlay_canvas_and_starts() {
    let doc = document();
    let host = doc
        .create_element("section")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    host.set_id("particle-host");
    doc.body().unwrap().append_child(&host).unwrap();

    let background = ParticleBackground::attach("#particle-host", "")
        .unwrap()
        .unwrap();
    assert!(background.running());

    let overlay = host
        .query_selector("canvas")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    let style = overlay.style();
    assert_eq!(style.get_property_value("position").unwrap(), "absolute");
    assert_eq!(style.get_property_value("pointer-events").unwrap(), "none");
    assert_eq!(style.get_property_value("opacity").unwrap(), "0.3");

    host.remove();
}

#[wasm_bindgen_test]
async fn removing_the_host_stops_the_loop() {
    let host = host_element("particle-host-removed");
    let background = ParticleBackground::attach("#particle-host-removed", "")
        .unwrap()
        .unwrap();
    assert!(background.running());

    next_animation_frame().await;
    assert!(background.running());

    host.remove();
    next_animation_frame().await;
    next_animation_frame().await;
    assert!(!background.running());
}

#[wasm_bindgen_test]
async fn stopped_loop_stays_stopped() {
    let host = host_element("particle-host-stopped");
    let background = ParticleBackground::attach("#particle-host-stopped", "")
        .unwrap()
        .unwrap();
    background.stop();
    next_animation_frame().await;
    next_animation_frame().await;
    assert!(!background.running());
    host.remove();
}

#[wasm_bindgen_test]
fn start_and_stop() {
    let background = ParticleBackground::new(canvas(320, 200), "", Some(9)).unwrap();
    background.start().unwrap();
    assert!(background.running());
    background.start().unwrap();
    background.stop();
    assert!(!background.running());
}
