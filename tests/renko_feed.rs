use quickcheck_macros::quickcheck;
use renko_chart_wasm::application::ChartOverlay;
use renko_chart_wasm::domain::chart::{ChartConfig, PricePrecision};
use renko_chart_wasm::domain::market_data::{BarTime, Price, RenkoBuilder, Timestamp, UnixSeconds};
use renko_chart_wasm::infrastructure::{HeadlessLabelFactory, HeadlessSurface};
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn bricks_feed_the_series_one_second_apart() {
    let mut overlay: ChartOverlay<HeadlessSurface, HeadlessLabelFactory> =
        ChartOverlay::initialize_chart(&ChartConfig::default(), HeadlessLabelFactory::default()).unwrap();
    let mut renko = RenkoBuilder::new(Price::from(5.0)).unwrap();

    let ticks = [(100.0, 1_000), (104.0, 2_000), (106.0, 3_000), (111.0, 4_000), (95.0, 5_000)];
    for (price, time) in ticks {
        for brick in renko.push(Price::from(price), Timestamp::from_millis(time)) {
            overlay.append_bar(brick.to_raw_bar()).unwrap();
        }
    }

    let bars = overlay.surface().bars();
    let times: Vec<BarTime> = bars.iter().map(|b| b.time.clone()).collect();
    // the drop to 95 spans two bricks, one millisecond apart
    let expected: Vec<BarTime> = [3.0, 4.0, 5.0, 5.001].into_iter().map(|s| BarTime::from(UnixSeconds::from(s))).collect();
    assert_eq!(times, expected);
    assert!(bars[0].is_bullish() && bars[1].is_bullish());
    assert!(bars[2].is_bearish() && bars[3].is_bearish());
    assert_eq!(bars[3].close, Price::from(95.0));
    assert_eq!(overlay.precision(), PricePrecision::DEFAULT);
}

#[quickcheck]
fn bricks_are_contiguous(prices: Vec<u16>) -> bool {
    let mut renko = match RenkoBuilder::new(Price::from(10.0)) {
        Ok(renko) => renko,
        Err(_) => return false,
    };
    let bricks: Vec<_> = prices
        .iter()
        .enumerate()
        .flat_map(|(i, p)| renko.push(Price::from(*p as f64), Timestamp::from_millis(i as u64)))
        .collect();

    bricks.windows(2).all(|pair| {
        let size = (pair[1].open.value() - pair[1].close.value()).abs();
        let joined = if pair[0].is_up() == pair[1].is_up() {
            pair[1].open == pair[0].close
        } else {
            pair[1].open == pair[0].open
        };
        (size - 10.0).abs() < 1e-9 && joined && pair[1].time > pair[0].time
    })
}
