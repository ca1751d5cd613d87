use renko_chart_wasm::domain::chart::Viewport;
use wasm_bindgen_test::*;

fn viewport() -> Viewport {
    Viewport {
        start_time: 0.0,
        end_time: 100.0,
        min_price: 0.0,
        max_price: 100.0,
        width: 200,
        height: 100,
    }
}

#[wasm_bindgen_test]
fn zoom_changes_time_range() {
    let mut vp = viewport();
    vp.zoom(2.0, 0.5);
    assert!((vp.start_time - 25.0).abs() < 1e-6);
    assert!((vp.end_time - 75.0).abs() < 1e-6);
}

#[wasm_bindgen_test]
fn pan_moves_viewport() {
    let mut vp = viewport();
    vp.pan(0.1, 0.1);
    assert!((vp.start_time - 10.0).abs() < 1e-6);
    assert!((vp.end_time - 110.0).abs() < 1e-6);
    assert!((vp.min_price - 10.0).abs() < 1e-6);
    assert!((vp.max_price - 110.0).abs() < 1e-6);
}

#[wasm_bindgen_test]
fn time_to_x_calculates() {
    let x = viewport().time_to_x(50.0).unwrap();
    assert!((x - 100.0).abs() < 1e-6);
}

#[wasm_bindgen_test]
fn time_outside_window_has_no_x() {
    let vp = viewport();
    assert_eq!(vp.time_to_x(-1.0), None);
    assert_eq!(vp.time_to_x(100.5), None);
}

#[wasm_bindgen_test]
fn price_to_y_is_inverted() {
    let vp = viewport();
    assert_eq!(vp.price_to_y(100.0), Some(0.0));
    assert_eq!(vp.price_to_y(0.0), Some(100.0));
    // prices beyond the visible range still map, off screen
    assert_eq!(vp.price_to_y(150.0), Some(-50.0));
}

#[wasm_bindgen_test]
fn empty_window_maps_nothing() {
    let vp = Viewport::new(800, 600);
    assert_eq!(vp.time_to_x(0.0), None);
}

#[wasm_bindgen_test]
fn zoom_round_trip_preserves_viewport() {
    let mut vp = viewport();
    let original = vp.clone();
    vp.zoom(2.0, 0.5);
    vp.zoom(0.5, 0.5);
    assert!((vp.start_time - original.start_time).abs() < 1e-6);
    assert!((vp.end_time - original.end_time).abs() < 1e-6);
}
