use super::*;

use chrono::{Datelike, Months, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyClose {
    pub date: NaiveDate,
    pub close: f64,
}

/// Source of daily closing prices.
pub trait PriceHistory {
    /// Daily closes for `ticker` within `start..=end`, in any order.
    fn daily_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<DailyClose>>;
}

/// Closing prices taken on the first trading day of consecutive months.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyPrices {
    pub ticker: String,
    /// Oldest first.
    pub points: Vec<DailyClose>,
}

impl MonthlyPrices {
    #[cfg(test)]
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.close).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The first day of the month `months_back` months before the one containing `date`.
pub fn month_start(date: NaiveDate, months_back: u32) -> Option<NaiveDate> {
    date.with_day(1)?.checked_sub_months(Months::new(months_back))
}

/// Pick the first trading-day close of each of the last `months` calendar months,
/// counting the month of `today` as the newest.
///
/// Months without data are skipped. An empty history gives an empty result.
pub fn first_of_month_prices(
    history: &dyn PriceHistory,
    ticker: &str,
    today: NaiveDate,
    months: usize,
) -> anyhow::Result<MonthlyPrices> {
    let mut result = MonthlyPrices {
        ticker: ticker.to_owned(),
        points: Vec::new(),
    };
    let Some(oldest) = months
        .checked_sub(1)
        .and_then(|back| month_start(today, back as u32))
    else {
        return Ok(result);
    };

    let mut data = history
        .daily_closes(ticker, oldest, today)
        .context(format!("when fetching price history for {}", ticker))?;
    if data.is_empty() {
        log::warn!("No data available for {}", ticker);
        return Ok(result);
    }
    data.sort_by_key(|point| point.date);

    for back in (0..months as u32).rev() {
        let Some(first_day) = month_start(today, back) else {
            continue;
        };
        let first_trading_day = data.iter().find(|point| {
            point.date >= first_day
                && point.date <= today
                && point.date.year() == first_day.year()
                && point.date.month() == first_day.month()
        });
        if let Some(point) = first_trading_day {
            result.points.push(DailyClose {
                date: point.date,
                close: round_cents(point.close),
            });
        }
    }

    Ok(result)
}

fn round_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

/// Line labels for a chart, falling back to numbered ones when they don't match up.
pub fn series_labels(labels: &[String], series: usize) -> Vec<String> {
    if labels.len() == series {
        labels.to_vec()
    } else {
        (1..=series).map(|i| format!("Line {}", i)).collect()
    }
}
