use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::PatternKind;

/// Raw per-bar recognition signal in [-100, 100]. Zero means no occurrence;
/// the sign encodes direction, the magnitude the recognizer's confidence in
/// the geometric match.
pub type RawSignal = i32;

pub const SIGNAL_MIN: RawSignal = -100;
pub const SIGNAL_MAX: RawSignal = 100;

// Column-oriented OHLCV history for one symbol: ascending by date, one bar
// per trading session. Columns stay parallel so recognition delegates can
// consume them as plain slices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandleSeries {
    pub symbol: String,
    pub dates: Vec<NaiveDate>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<u64>,
}

impl CandleSeries {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    pub fn push_bar(
        &mut self,
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) {
        self.dates.push(date);
        self.open.push(open);
        self.high.push(high);
        self.low.push(low);
        self.close.push(close);
        self.volume.push(volume);
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    pub fn candle(&self, index: usize) -> Candle {
        Candle {
            date: self.dates[index],
            open: self.open[index],
            high: self.high[index],
            low: self.low[index],
            close: self.close[index],
            volume: self.volume[index],
        }
    }

    /// Borrowed view over the trailing `n` bars, or the whole series when it
    /// is shorter than `n`.
    pub fn tail(&self, n: usize) -> CandleWindow<'_> {
        let start = self.len().saturating_sub(n);
        CandleWindow {
            symbol: &self.symbol,
            dates: &self.dates[start..],
            open: &self.open[start..],
            high: &self.high[start..],
            low: &self.low[start..],
            close: &self.close[start..],
            volume: &self.volume[start..],
        }
    }

    pub fn window(&self) -> CandleWindow<'_> {
        self.tail(self.len())
    }

    /// Most recent bar on the given date, if the series has one.
    pub fn bar_on(&self, date: NaiveDate) -> Option<Candle> {
        self.dates
            .iter()
            .rposition(|d| *d == date)
            .map(|index| self.candle(index))
    }
}

/// Borrowed window over the trailing bars of a series. Recognizers operate
/// on windows, never on the full history directly.
#[derive(Debug, Clone, Copy)]
pub struct CandleWindow<'a> {
    pub symbol: &'a str,
    pub dates: &'a [NaiveDate],
    pub open: &'a [f64],
    pub high: &'a [f64],
    pub low: &'a [f64],
    pub close: &'a [f64],
    pub volume: &'a [u64],
}

impl<'a> CandleWindow<'a> {
    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    pub fn candle(&self, index: usize) -> Candle {
        Candle {
            date: self.dates[index],
            open: self.open[index],
            high: self.high[index],
            low: self.low[index],
            close: self.close[index],
            volume: self.volume[index],
        }
    }

    /// Lazy, restartable traversal over consecutive three-bar windows.
    /// Yields the index of the closing bar together with the three candles
    /// ending there; windows shorter than three bars yield nothing.
    pub fn triples(&self) -> Triples<'a> {
        Triples {
            window: *self,
            next: 2,
        }
    }
}

/// Iterator behind [`CandleWindow::triples`].
#[derive(Debug, Clone)]
pub struct Triples<'a> {
    window: CandleWindow<'a>,
    next: usize,
}

impl Iterator for Triples<'_> {
    type Item = (usize, [Candle; 3]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.window.len() {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some((
            index,
            [
                self.window.candle(index - 2),
                self.window.candle(index - 1),
                self.window.candle(index),
            ],
        ))
    }
}

/// One OHLCV bar, copied out of a series for geometric checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Candle {
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn upper_shadow(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    pub fn lower_shadow(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    pub fn midpoint(&self) -> f64 {
        (self.open + self.close) / 2.0
    }
}

/// One confirmed pattern occurrence for one symbol. Immutable once emitted;
/// downstream notification and persistence collaborators receive these as
/// read-only snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub symbol: String,
    pub pattern: PatternKind,
    pub occurrence_date: NaiveDate,
    pub raw_strength: RawSignal,
    pub confidence_score: u8,
    pub recommendation: String,
    pub close_price: f64,
    pub volume: u64,
    pub high: f64,
    pub low: f64,
    pub days_ago: i64,
}
