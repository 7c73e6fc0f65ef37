use crate::models::Candle;
use rust_decimal::Decimal;
use std::collections::VecDeque;

/// Default number of candles retained per timeframe.
pub const DEFAULT_CAPACITY: usize = 300;

/// Bounded, time-ordered collection of OHLCV bars.
///
/// The series owns its candles exclusively; readers get copies. The last bar
/// may be replaced in place while its time bucket is still open: a tick with
/// the same `time` as the stored last bar amends, anything newer appends.
/// Once the configured capacity is exceeded the oldest bar is evicted.
///
/// No validation beyond the amend-vs-append time check: ordering and price
/// sanity of incoming data are the feed's responsibility.
#[derive(Debug, Clone)]
pub struct CandleSeries {
    capacity: usize,
    candles: VecDeque<Candle>,
}

impl CandleSeries {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "series capacity must be > 0");
        Self {
            capacity,
            candles: VecDeque::with_capacity(capacity),
        }
    }

    /// Replace the entire series with `history` (ascending by time).
    /// Only the newest `capacity` bars are kept.
    pub fn load(&mut self, history: Vec<Candle>) {
        self.candles.clear();
        let skip = history.len().saturating_sub(self.capacity);
        self.candles.extend(history.into_iter().skip(skip));
    }

    /// Amend the open bar or append a new one, evicting the oldest past capacity.
    pub fn append_or_amend(&mut self, candle: Candle) {
        match self.candles.back_mut() {
            Some(last) if last.time == candle.time => {
                *last = candle;
            }
            _ => {
                self.candles.push_back(candle);
                if self.candles.len() > self.capacity {
                    self.candles.pop_front();
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.back()
    }

    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    /// Close of the bar before the open one, if any.
    pub fn prev_close(&self) -> Option<Decimal> {
        let len = self.candles.len();
        if len < 2 {
            None
        } else {
            self.candles.get(len - 2).map(|c| c.close)
        }
    }

    /// Full series as an owned, contiguous snapshot.
    pub fn candles(&self) -> Vec<Candle> {
        self.candles.iter().cloned().collect()
    }

    pub fn closes(&self) -> Vec<Decimal> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn highs(&self) -> Vec<Decimal> {
        self.candles.iter().map(|c| c.high).collect()
    }

    pub fn lows(&self) -> Vec<Decimal> {
        self.candles.iter().map(|c| c.low).collect()
    }
}

impl Default for CandleSeries {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
