//! Synthetic bar generation
//!
//! Produces plausible random bars for demos and tests. The random source is
//! injected, so a seeded [`rand::rngs::StdRng`] gives reproducible bars.
//!
//! # Example
//!
//! ```rust
//! use barstrength::generator::BarGenerator;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut generator = BarGenerator::new(StdRng::seed_from_u64(7));
//! let first = generator.generate_sample("Candle A", Some(100.0));
//! let second = generator.create_linked(&first, "Candle B");
//! assert_eq!(second.open, first.close);
//! ```

use chrono::Utc;
use rand::Rng;

use crate::analysis::round_price;
use crate::bar::Bar;
use crate::settings::Settings;

/// Per-bar volatility is drawn from `MIN_VOLATILITY .. MIN_VOLATILITY + VOLATILITY_SPAN`.
pub const MIN_VOLATILITY: f64 = 0.002;
pub const VOLATILITY_SPAN: f64 = 0.02;

/// Random base price is drawn from `MIN_BASE_PRICE .. MIN_BASE_PRICE + BASE_PRICE_SPAN`.
pub const MIN_BASE_PRICE: f64 = 100.0;
pub const BASE_PRICE_SPAN: f64 = 200.0;

/// Volume is drawn from `MIN_VOLUME .. MIN_VOLUME + VOLUME_SPAN` and floored.
pub const MIN_VOLUME: f64 = 500_000.0;
pub const VOLUME_SPAN: f64 = 2_000_000.0;

/// Length of the random base-36 bar id.
pub const ID_LEN: usize = 9;

const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random bar factory over an injected uniform source.
#[derive(Debug, Clone)]
pub struct BarGenerator<R> {
    rng: R,
}

impl<R: Rng> BarGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }

    /// A fresh bar opening at `base_price`, or at a random price in
    /// 100..300 when none is given.
    pub fn generate_sample(&mut self, name: impl Into<String>, base_price: Option<f64>) -> Bar {
        let base = match base_price {
            Some(price) => price,
            None => MIN_BASE_PRICE + self.uniform() * BASE_PRICE_SPAN,
        };
        self.bar_from_base(name.into(), base, round_price(base))
    }

    /// A bar opening exactly at `previous.close`. Volatility is drawn afresh.
    pub fn create_linked(&mut self, previous: &Bar, name: impl Into<String>) -> Bar {
        self.bar_from_base(name.into(), previous.close, previous.close)
    }

    /// Two bars for a new comparison, the second chained onto the first when
    /// `settings.auto_link_candles` is set.
    pub fn generate_pair(&mut self, settings: &Settings) -> (Bar, Bar) {
        let first = self.generate_sample("Random Candle A", Some(settings.base_price));
        let second = if settings.auto_link_candles {
            self.create_linked(&first, "Random Candle B")
        } else {
            self.generate_sample("Random Candle B", Some(settings.base_price))
        };
        tracing::debug!(
            first = %first.id,
            second = %second.id,
            linked = settings.auto_link_candles,
            "generated bar pair"
        );
        (first, second)
    }

    /// Prices derive from the unrounded `base`; `open` is stored verbatim and
    /// high, low and close are rounded to five decimals afterwards.
    fn bar_from_base(&mut self, name: String, base: f64, open: f64) -> Bar {
        let volatility = MIN_VOLATILITY + self.uniform() * VOLATILITY_SPAN;

        let price_change = (self.uniform() - 0.5) * 2.0 * volatility * base;
        let close = base + price_change;

        let range = price_change.abs() + self.uniform() * volatility * base * 0.5;
        let high = base.max(close) + self.uniform() * range * 0.3;
        let low = base.min(close) - self.uniform() * range * 0.3;

        let volume = (MIN_VOLUME + self.uniform() * VOLUME_SPAN).floor();
        let id = self.random_id();

        Bar::new(
            id,
            name,
            open,
            round_price(high),
            round_price(low),
            round_price(close),
            volume,
        )
        .with_timestamp(Utc::now())
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn random_id(&mut self) -> String {
        (0..ID_LEN)
            .map(|_| ID_ALPHABET[self.rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, RngCore, SeedableRng};

    /// Source that always yields zero, pinning every draw to the bottom of its range.
    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            dest.fill(0);
            Ok(())
        }
    }

    #[test]
    fn test_zero_draws_follow_formula() {
        let mut generator = BarGenerator::new(ZeroRng);
        let bar = generator.generate_sample("Z", Some(100.0));

        // volatility 0.002, change -0.2, range 0.2, no extra wick
        assert_eq!(bar.open, 100.0);
        assert_eq!(bar.close, 99.8);
        assert_eq!(bar.high, 100.0);
        assert_eq!(bar.low, 99.8);
        assert_eq!(bar.volume, 500_000.0);
        assert_eq!(bar.id, "000000000");
        assert_eq!(bar.name, "Z");
        assert!(bar.timestamp.is_some());
        assert_eq!(bar.pattern(), Some(crate::analysis::Pattern::StrongBearishMarubozu));
    }

    #[test]
    fn test_random_base_without_price() {
        let mut generator = BarGenerator::new(ZeroRng);
        let bar = generator.generate_sample("Z", None);
        assert_eq!(bar.open, MIN_BASE_PRICE);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let mut a = BarGenerator::new(StdRng::seed_from_u64(42));
        let mut b = BarGenerator::new(StdRng::seed_from_u64(42));
        for _ in 0..20 {
            let x = a.generate_sample("X", None);
            let y = b.generate_sample("X", None);
            assert_eq!(
                (x.id, x.open, x.high, x.low, x.close, x.volume),
                (y.id, y.open, y.high, y.low, y.close, y.volume)
            );
        }
    }

    #[test]
    fn test_generated_bars_are_well_formed() {
        let mut generator = BarGenerator::new(StdRng::seed_from_u64(1));
        for _ in 0..200 {
            let bar = generator.generate_sample("S", None);
            assert!(bar.high >= bar.open.max(bar.close));
            assert!(bar.low <= bar.open.min(bar.close));
            assert!(bar.open >= MIN_BASE_PRICE && bar.open <= MIN_BASE_PRICE + BASE_PRICE_SPAN);
            assert!((MIN_VOLUME..MIN_VOLUME + VOLUME_SPAN).contains(&bar.volume));
            assert_eq!(bar.volume.fract(), 0.0);
            assert_eq!(bar.id.len(), ID_LEN);
            assert!(bar.id.bytes().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
            assert_eq!(bar.open, round_price(bar.open));
            assert_eq!(bar.pattern(), Some(crate::analysis::classify(&bar)));
        }
    }

    #[test]
    fn test_linked_bar_opens_at_previous_close() {
        let mut generator = BarGenerator::new(StdRng::seed_from_u64(9));
        let mut previous = generator.generate_sample("Start", Some(250.0));
        for i in 0..50 {
            let next = generator.create_linked(&previous, format!("Linked {i}"));
            assert_eq!(next.open, previous.close);
            previous = next;
        }
    }

    #[test]
    fn test_sample_rounds_only_at_the_end() {
        let base = 100.002_514_9;
        let bar = BarGenerator::new(ZeroRng).generate_sample("Z", Some(base));

        // close = base * 0.998 = 99.802509..., while the rounded open would give 99.802504...
        assert_eq!(bar.open, 100.00251);
        assert_eq!(bar.close, round_price(base - 0.002 * base));
        assert_eq!(bar.close, 99.80251);
        assert_eq!(bar.high, 100.00251);
        assert_eq!(bar.low, bar.close);
    }

    #[test]
    fn test_linked_bar_keeps_unrounded_close() {
        let previous = Bar::new("p", "P", 100.0, 101.0, 99.0, 100.123_456_789, 0.0);
        let mut generator = BarGenerator::new(StdRng::seed_from_u64(5));
        let next = generator.create_linked(&previous, "Next");
        assert_eq!(next.open, 100.123_456_789);
    }

    #[test]
    fn test_generate_pair_respects_settings() {
        let mut generator = BarGenerator::new(StdRng::seed_from_u64(3));

        let linked = Settings {
            auto_link_candles: true,
            base_price: 150.0,
            ..Settings::default()
        };
        let (a, b) = generator.generate_pair(&linked);
        assert_eq!(a.open, 150.0);
        assert_eq!(b.open, a.close);
        assert_eq!(a.name, "Random Candle A");
        assert_eq!(b.name, "Random Candle B");

        let independent = Settings {
            auto_link_candles: false,
            base_price: 150.0,
            ..Settings::default()
        };
        let (a, b) = generator.generate_pair(&independent);
        assert_eq!(a.open, 150.0);
        assert_eq!(b.open, 150.0);
    }
}
