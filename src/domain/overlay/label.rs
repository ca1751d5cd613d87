use crate::domain::market_data::{Price, UnixSeconds};
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// Caller-supplied label identifier, unique among live labels
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into, Serialize, Deserialize)]
pub struct LabelId(String);

impl LabelId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LabelId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for LabelId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

/// Order side a label annotates.
///
/// `Unrecognized` keeps the down presentation of the sell branch but is not
/// treated as sell-side when positioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum LabelDirection {
    Buy,
    BuyLimit,
    Sell,
    SellLimit,
    #[strum(disabled)]
    Unrecognized,
}

impl LabelDirection {
    /// Lenient host parsing: anything unknown falls into `Unrecognized`.
    pub fn from_host(value: &str) -> Self {
        value.parse().unwrap_or(LabelDirection::Unrecognized)
    }

    /// Sell-side labels sit above their anchor.
    pub fn is_sell_side(self) -> bool {
        matches!(self, LabelDirection::Sell | LabelDirection::SellLimit)
    }

    pub fn style(self) -> LabelStyle {
        match self {
            LabelDirection::Buy | LabelDirection::BuyLimit => LabelStyle::Up,
            _ => LabelStyle::Down,
        }
    }

    pub fn icon(self) -> ArrowIcon {
        match self {
            LabelDirection::BuyLimit => ArrowIcon::UpOutline,
            LabelDirection::Buy => ArrowIcon::UpFilled,
            LabelDirection::SellLimit => ArrowIcon::DownOutline,
            _ => ArrowIcon::DownFilled,
        }
    }

    pub fn layout(self) -> LabelLayout {
        match self.style() {
            LabelStyle::Up => LabelLayout::IconThenText,
            LabelStyle::Down => LabelLayout::TextThenIcon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    Up,
    Down,
}

impl LabelStyle {
    pub fn css_class(self) -> &'static str {
        match self {
            LabelStyle::Up => "up",
            LabelStyle::Down => "down",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelLayout {
    IconThenText,
    TextThenIcon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowIcon {
    UpFilled,
    UpOutline,
    DownFilled,
    DownOutline,
}

const UP_FILLED_PATH: &str = "M8 10h-5l9-10 9 10h-5v10h-8v-10zm8 12h-8v2h8v-2z";
const UP_OUTLINE_PATH: &str =
    "M10 18v-10h-2.51l4.51-5.01 4.51 5.01h-2.51v10h-4zm-2 2h8v-10h5l-9-10-9 10h5v10zm8 2h-8v2h8v-2z";

impl ArrowIcon {
    pub fn is_filled(self) -> bool {
        matches!(self, ArrowIcon::UpFilled | ArrowIcon::DownFilled)
    }

    pub fn points_up(self) -> bool {
        matches!(self, ArrowIcon::UpFilled | ArrowIcon::UpOutline)
    }

    /// Inline 24x24 SVG markup
    pub fn svg(self) -> String {
        let path = if self.is_filled() { UP_FILLED_PATH } else { UP_OUTLINE_PATH };
        let transform = if self.points_up() { "" } else { r#" transform="rotate(180 12 12)""# };
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24"><path d="{path}"{transform}/></svg>"#
        )
    }
}

/// Everything a visual backend needs to build a label element
#[derive(Debug, Clone, PartialEq)]
pub struct LabelContent {
    pub text: String,
    pub icon: ArrowIcon,
    pub layout: LabelLayout,
    pub style: LabelStyle,
}

impl LabelContent {
    pub fn for_direction(direction: LabelDirection, text: impl Into<String>) -> Self {
        Self { text: text.into(), icon: direction.icon(), layout: direction.layout(), style: direction.style() }
    }
}

/// Live overlay label. Semantic fields never change after creation.
#[derive(Debug)]
pub struct Label<H> {
    pub id: LabelId,
    pub price: Price,
    pub time: UnixSeconds,
    pub direction: LabelDirection,
    pub text: String,
    pub handle: H,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_directions_parse_camel_case() {
        assert_eq!(LabelDirection::from_host("buyLimit"), LabelDirection::BuyLimit);
        assert_eq!(LabelDirection::from_host("sell"), LabelDirection::Sell);
        assert_eq!(LabelDirection::from_host("hold"), LabelDirection::Unrecognized);
        assert_eq!(LabelDirection::from_host("Unrecognized"), LabelDirection::Unrecognized);
    }

    #[test]
    fn content_follows_direction_table() {
        let buy_limit = LabelContent::for_direction(LabelDirection::BuyLimit, "b");
        assert_eq!((buy_limit.icon, buy_limit.layout, buy_limit.style), (ArrowIcon::UpOutline, LabelLayout::IconThenText, LabelStyle::Up));

        let sell_limit = LabelContent::for_direction(LabelDirection::SellLimit, "s");
        assert_eq!((sell_limit.icon, sell_limit.layout, sell_limit.style), (ArrowIcon::DownOutline, LabelLayout::TextThenIcon, LabelStyle::Down));

        let other = LabelContent::for_direction(LabelDirection::Unrecognized, "?");
        assert_eq!((other.icon, other.layout, other.style), (ArrowIcon::DownFilled, LabelLayout::TextThenIcon, LabelStyle::Down));
    }

    #[test]
    fn only_sell_and_sell_limit_are_sell_side() {
        assert!(LabelDirection::Sell.is_sell_side());
        assert!(LabelDirection::SellLimit.is_sell_side());
        assert!(!LabelDirection::Unrecognized.is_sell_side());
        assert!(!LabelDirection::Buy.is_sell_side());
    }

    #[test]
    fn down_icons_are_rotated() {
        assert!(ArrowIcon::DownFilled.svg().contains("rotate(180 12 12)"));
        assert!(!ArrowIcon::UpOutline.svg().contains("rotate"));
    }
}
