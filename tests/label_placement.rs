use quickcheck_macros::quickcheck;
use renko_chart_wasm::domain::chart::{
    ChartConfig, ChartSurface, ElementSize, PricePrecision, ScreenPosition,
};
use renko_chart_wasm::domain::errors::{OverlayError, OverlayResult};
use renko_chart_wasm::domain::market_data::{Bar, Price, SeriesMarker, UnixSeconds};
use renko_chart_wasm::domain::overlay::{
    ArrowIcon, LabelContent, LabelDirection, LabelLayout, LabelStyle, place_label, position_from_coordinates,
};
use strum::IntoEnumIterator;
use wasm_bindgen_test::*;

/// Maps every price to y and every time to x, or nothing when unset.
struct FixedSurface {
    y: Option<f64>,
    x: Option<f64>,
}

impl ChartSurface for FixedSurface {
    type PriceLine = ();

    fn create(_config: &ChartConfig) -> OverlayResult<Self> {
        Ok(Self { y: Some(100.0), x: Some(200.0) })
    }

    fn price_to_coordinate(&self, _price: Price) -> Option<f64> {
        self.y
    }

    fn time_to_coordinate(&self, _time: UnixSeconds) -> Option<f64> {
        self.x
    }

    fn set_data(&mut self, _bars: &[Bar]) -> OverlayResult<()> {
        Ok(())
    }

    fn update_bar(&mut self, _bar: &Bar) -> OverlayResult<()> {
        Ok(())
    }

    fn set_markers(&mut self, _markers: &[SeriesMarker]) -> OverlayResult<()> {
        Ok(())
    }

    fn set_price_precision(&mut self, _precision: PricePrecision) -> OverlayResult<()> {
        Ok(())
    }

    fn create_price_line(&mut self, _price: Price) -> OverlayResult<()> {
        Ok(())
    }

    fn remove_price_line(&mut self, _line: ()) {}

    fn resize(&mut self, _width: f64, _height: f64) {}

    fn destroy(self) {}
}

const SIZE: ElementSize = ElementSize { width: 40.0, height: 20.0 };

fn place(surface: &FixedSurface, direction: LabelDirection) -> OverlayResult<ScreenPosition> {
    place_label(surface, Price::from(1.0), UnixSeconds::from(1.0), direction, SIZE)
}

#[wasm_bindgen_test]
fn buy_side_placement() {
    let surface = FixedSurface::create(&ChartConfig::default()).unwrap();
    for direction in [LabelDirection::Buy, LabelDirection::BuyLimit] {
        assert_eq!(place(&surface, direction), Ok(ScreenPosition::new(108, 188)));
    }
}

#[wasm_bindgen_test]
fn sell_side_placement() {
    let surface = FixedSurface::create(&ChartConfig::default()).unwrap();
    for direction in [LabelDirection::Sell, LabelDirection::SellLimit] {
        assert_eq!(place(&surface, direction), Ok(ScreenPosition::new(88, 188)));
    }
}

#[wasm_bindgen_test]
fn missing_coordinate_is_an_error() {
    let surface = FixedSurface { y: Some(100.0), x: None };
    let err = place(&surface, LabelDirection::Buy).unwrap_err();
    assert_eq!(
        err,
        OverlayError::CoordinateUndefined { price: Price::from(1.0), time: UnixSeconds::from(1.0) }
    );
}

#[test]
fn direction_presentation() {
    let expected = [
        (LabelDirection::Buy, ArrowIcon::UpFilled, LabelLayout::IconThenText, LabelStyle::Up),
        (LabelDirection::BuyLimit, ArrowIcon::UpOutline, LabelLayout::IconThenText, LabelStyle::Up),
        (LabelDirection::Sell, ArrowIcon::DownFilled, LabelLayout::TextThenIcon, LabelStyle::Down),
        (LabelDirection::SellLimit, ArrowIcon::DownOutline, LabelLayout::TextThenIcon, LabelStyle::Down),
    ];
    for (direction, icon, layout, style) in expected {
        let content = LabelContent::for_direction(direction, "t");
        assert_eq!((content.icon, content.layout, content.style), (icon, layout, style), "{direction:?}");
    }
}

#[test]
fn host_direction_names_round_trip() {
    for direction in LabelDirection::iter().filter(|d| *d != LabelDirection::Unrecognized) {
        assert_eq!(LabelDirection::from_host(direction.as_ref()), direction);
    }
    assert_eq!(LabelDirection::from_host("BUY"), LabelDirection::Unrecognized);
    assert_eq!(LabelDirection::from_host(""), LabelDirection::Unrecognized);
}

#[quickcheck]
fn sell_lift_equals_height(x: u16, y: u16, w: u8, h: u8) -> bool {
    let size = ElementSize::new(w as f64, h as f64);
    let (x, y) = (x as f64, y as f64);
    let buy = position_from_coordinates(x, y, LabelDirection::Buy, size);
    let sell = position_from_coordinates(x, y, LabelDirection::Sell, size);
    buy.left == sell.left && buy.top - sell.top == h as i32
}

#[quickcheck]
fn label_is_centred_on_offset_anchor(x: u16, w: u8) -> bool {
    let size = ElementSize::new(w as f64, 10.0);
    let pos = position_from_coordinates(x as f64, 0.0, LabelDirection::Buy, size);
    let centre = pos.left as f64 + w as f64 / 2.0;
    let anchor = x as f64 + 8.0;
    centre <= anchor && anchor - centre < 1.0
}
