use super::entities::{Bar, BarTime, Price, RawBar, Timestamp};
use crate::domain::errors::{OverlayError, OverlayResult};
use crate::log_trace;
use crate::domain::logging::LogComponent;
use chrono::NaiveDate;
use rand::Rng;

/// One Renko brick. Time is the host clock in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brick {
    pub time: Timestamp,
    pub open: Price,
    pub close: Price,
}

impl Brick {
    pub fn is_up(&self) -> bool {
        self.close > self.open
    }

    pub fn high(&self) -> Price {
        Price::from(self.open.value().max(self.close.value()))
    }

    pub fn low(&self) -> Price {
        Price::from(self.open.value().min(self.close.value()))
    }

    /// Host-shaped bar, ready for `append_bar`.
    pub fn to_raw_bar(&self) -> RawBar {
        RawBar { time: self.time, open: self.open, high: self.high(), low: self.low(), close: self.close }
    }
}

/// Turns a price stream into fixed-size Renko bricks.
///
/// The first price only seeds the range. A later price at or beyond one
/// brick above the top (or below the bottom) emits as many bricks as the
/// move spans.
#[derive(Debug, Clone)]
pub struct RenkoBuilder {
    brick_size: f64,
    range: Option<(f64, f64)>,
    last_brick_time: u64,
}

impl RenkoBuilder {
    pub fn new(brick_size: Price) -> OverlayResult<Self> {
        let size = brick_size.value();
        if !size.is_finite() || size <= 0.0 {
            return Err(OverlayError::InvalidBrickSize(size));
        }
        Ok(Self { brick_size: size, range: None, last_brick_time: 0 })
    }

    pub fn brick_size(&self) -> Price {
        Price::from(self.brick_size)
    }

    pub fn push(&mut self, price: Price, now: Timestamp) -> Vec<Brick> {
        let price = price.value();
        let Some((mut top, mut bottom)) = self.range else {
            self.range = Some((price, price));
            return Vec::new();
        };

        let mut bricks = Vec::new();
        loop {
            if price >= top + self.brick_size {
                bottom = top;
                top += self.brick_size;
                bricks.push(self.brick(bottom, top, now));
            } else if price <= bottom - self.brick_size {
                top = bottom;
                bottom -= self.brick_size;
                bricks.push(self.brick(top, bottom, now));
            } else {
                break;
            }
        }
        self.range = Some((top, bottom));
        bricks
    }

    /// Brick times are strictly increasing even when several bricks are
    /// emitted within the same millisecond.
    fn brick(&mut self, open: f64, close: f64, now: Timestamp) -> Brick {
        let time = now.value().max(self.last_brick_time + 1);
        self.last_brick_time = time;
        let brick = Brick { time: Timestamp::from_millis(time), open: Price::from(open), close: Price::from(close) };
        log_trace!(LogComponent::Domain("Renko"), "new brick {:?}", brick);
        brick
    }
}

const SYNTHETIC_START: f64 = 500.0;
const SYNTHETIC_BRICK: f64 = 10.0;
const TREND_FLIP_PROBABILITY: f64 = 0.3;

/// Synthetic Renko series for demos: one brick per business day starting at
/// `start_day`, trend flipping at random.
pub fn generate_renko_series<R: Rng + ?Sized>(items: usize, start_day: NaiveDate, rng: &mut R) -> Vec<Bar> {
    let mut trend_up = true;
    let mut last_up = true;
    let mut level = SYNTHETIC_START;

    start_day
        .iter_days()
        .take(items)
        .map(|day| {
            if rng.gen_bool(TREND_FLIP_PROBABILITY) {
                trend_up = !trend_up;
            }
            let time = BarTime::BusinessDay(day.format("%Y-%m-%d").to_string());
            if trend_up {
                if !last_up {
                    level += SYNTHETIC_BRICK;
                }
                last_up = true;
                let bar = Bar::new(
                    time,
                    Price::from(level),
                    Price::from(level + SYNTHETIC_BRICK),
                    Price::from(level),
                    Price::from(level + SYNTHETIC_BRICK),
                );
                level += SYNTHETIC_BRICK;
                bar
            } else {
                if last_up {
                    level -= SYNTHETIC_BRICK;
                }
                last_up = false;
                let bar = Bar::new(
                    time,
                    Price::from(level),
                    Price::from(level),
                    Price::from(level - SYNTHETIC_BRICK),
                    Price::from(level - SYNTHETIC_BRICK),
                );
                level -= SYNTHETIC_BRICK;
                bar
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ms(value: u64) -> Timestamp {
        Timestamp::from_millis(value)
    }

    #[test]
    fn first_price_only_seeds_the_range() {
        let mut renko = RenkoBuilder::new(Price::from(10.0)).unwrap();
        assert!(renko.push(Price::from(100.0), ms(1)).is_empty());
        assert!(renko.push(Price::from(109.0), ms(2)).is_empty());
    }

    #[test]
    fn large_move_emits_several_bricks_with_increasing_times() {
        let mut renko = RenkoBuilder::new(Price::from(10.0)).unwrap();
        renko.push(Price::from(100.0), ms(1));
        let bricks = renko.push(Price::from(131.0), ms(50));
        assert_eq!(bricks.len(), 3);
        assert_eq!(bricks[0].open.value(), 100.0);
        assert_eq!(bricks[2].close.value(), 130.0);
        assert!(bricks.iter().all(Brick::is_up));
        let times: Vec<u64> = bricks.iter().map(|b| b.time.value()).collect();
        assert_eq!(times, vec![50, 51, 52]);
    }

    #[test]
    fn reversal_needs_a_full_brick_below_the_bottom() {
        let mut renko = RenkoBuilder::new(Price::from(10.0)).unwrap();
        renko.push(Price::from(100.0), ms(1));
        renko.push(Price::from(110.0), ms(2));
        // range is now 100..110
        assert!(renko.push(Price::from(91.0), ms(3)).is_empty());
        let down = renko.push(Price::from(90.0), ms(4));
        assert_eq!(down.len(), 1);
        assert_eq!(down[0].open.value(), 100.0);
        assert_eq!(down[0].close.value(), 90.0);
        assert_eq!(down[0].high().value(), 100.0);
        assert_eq!(down[0].low().value(), 90.0);
    }

    #[test]
    fn non_positive_brick_size_is_rejected() {
        assert_eq!(RenkoBuilder::new(Price::from(0.0)).unwrap_err(), OverlayError::InvalidBrickSize(0.0));
        assert!(RenkoBuilder::new(Price::from(f64::NAN)).is_err());
    }

    #[test]
    fn synthetic_series_is_contiguous() {
        let mut rng = StdRng::seed_from_u64(7);
        let start = NaiveDate::from_ymd_opt(2024, 1, 30).unwrap();
        let bars = generate_renko_series(40, start, &mut rng);
        assert_eq!(bars.len(), 40);
        assert_eq!(bars[0].time, BarTime::BusinessDay("2024-01-30".into()));
        assert_eq!(bars[2].time, BarTime::BusinessDay("2024-02-01".into()));
        for bar in &bars {
            assert_eq!((bar.close.value() - bar.open.value()).abs(), SYNTHETIC_BRICK);
        }
        // each brick opens where the previous same-direction brick closed
        for pair in bars.windows(2) {
            if pair[0].is_bullish() == pair[1].is_bullish() {
                assert_eq!(pair[1].open, pair[0].close);
            }
        }
    }
}
