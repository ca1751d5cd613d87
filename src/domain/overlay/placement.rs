use super::label::LabelDirection;
use crate::domain::chart::{ChartSurface, ElementSize, ScreenPosition};
use crate::domain::errors::{OverlayError, OverlayResult};
use crate::domain::market_data::{Price, UnixSeconds};

/// Gap between the anchor point and the label so the exact price/time stays visible
pub const ANCHOR_OFFSET_PX: f64 = 8.0;

/// Screen position of a label anchored at `(price, time)`.
///
/// The label is centred horizontally on the anchor; sell-side labels are
/// lifted by their own height so they sit above it.
pub fn place_label<S: ChartSurface + ?Sized>(
    surface: &S,
    price: Price,
    time: UnixSeconds,
    direction: LabelDirection,
    size: ElementSize,
) -> OverlayResult<ScreenPosition> {
    let (Some(y), Some(x)) = (surface.price_to_coordinate(price), surface.time_to_coordinate(time)) else {
        return Err(OverlayError::CoordinateUndefined { price, time });
    };
    Ok(position_from_coordinates(x, y, direction, size))
}

pub fn position_from_coordinates(x: f64, y: f64, direction: LabelDirection, size: ElementSize) -> ScreenPosition {
    let mut top = (y + ANCHOR_OFFSET_PX).floor();
    let left = ((x + ANCHOR_OFFSET_PX).floor() - size.width / 2.0).floor();
    if direction.is_sell_side() {
        top -= size.height;
    }
    ScreenPosition::new(top as i32, left as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: ElementSize = ElementSize { width: 40.0, height: 20.0 };

    #[test]
    fn buy_sits_below_and_centred() {
        let pos = position_from_coordinates(200.0, 100.0, LabelDirection::Buy, SIZE);
        assert_eq!(pos, ScreenPosition::new(108, 188));
    }

    #[test]
    fn sell_is_lifted_by_its_height() {
        let pos = position_from_coordinates(200.0, 100.0, LabelDirection::Sell, SIZE);
        assert_eq!(pos, ScreenPosition::new(88, 188));
    }

    #[test]
    fn fractional_coordinates_floor_before_centering() {
        let pos = position_from_coordinates(10.7, 5.9, LabelDirection::BuyLimit, ElementSize::new(15.0, 10.0));
        // x: floor(18.7) = 18, 18 - 7.5 = 10.5 -> 10
        assert_eq!(pos, ScreenPosition::new(13, 10));
    }
}
