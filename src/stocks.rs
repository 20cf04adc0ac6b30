use crate::prelude::*;

use chrono::NaiveDate;

/// Price history read from a RON file mapping tickers to `(date, close)` pairs.
pub struct FileHistory {
    closes: HashMap<String, Vec<(NaiveDate, f64)>>,
}

impl FileHistory {
    pub async fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = file::load_string(path)
            .await
            .context(format!("when loading price history at {:?}", path))?;
        Self::parse(&content).context(format!("when parsing price history at {:?}", path))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(Self {
            closes: ron::from_str(content)?,
        })
    }
}

impl PriceHistory for FileHistory {
    fn daily_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<DailyClose>> {
        let Some(closes) = self.closes.get(ticker) else {
            return Ok(Vec::new());
        };
        Ok(closes
            .iter()
            .filter(|(date, _)| (start..=end).contains(date))
            .map(|&(date, close)| DailyClose { date, close })
            .collect())
    }
}

/// Monthly prices of all configured tickers, ready to be printed.
pub struct StockReport {
    pub title: String,
    pub series: Vec<(String, MonthlyPrices)>,
}

impl StockReport {
    pub fn collect(
        history: &dyn PriceHistory,
        config: &StocksConfig,
        today: NaiveDate,
    ) -> anyhow::Result<Self> {
        let mut all = Vec::with_capacity(config.tickers.len());
        for ticker in &config.tickers {
            let prices = first_of_month_prices(history, &ticker.symbol, today, config.months)?;
            log::info!("Fetched {} monthly prices for {}", prices.points.len(), ticker.symbol);
            all.push(prices);
        }

        let labels: Vec<String> = config.tickers.iter().map(|t| t.label.clone()).collect();
        let series = series_labels(&labels, all.len())
            .into_iter()
            .zip(all)
            .collect();
        Ok(Self {
            title: config.title.clone(),
            series,
        })
    }
}

impl std::fmt::Display for StockReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.title)?;
        for (label, prices) in &self.series {
            let points = prices
                .points
                .iter()
                .map(|point| format!("{} {:.2}", point.date.format("%Y-%m"), point.close))
                .collect::<Vec<_>>()
                .join(", ");
            if prices.is_empty() {
                writeln!(f, "{}: no data", label)?;
            } else {
                writeln!(f, "{}: {}", label, points)?;
            }
        }
        Ok(())
    }
}

pub async fn run(
    config: &Config,
    history: &std::path::Path,
    today: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let history = FileHistory::load(history).await?;
    let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
    let report = StockReport::collect(&history, &config.stocks, today)?;
    print!("{}", report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HISTORY: &str = r#"{
        "AAPL": [("2026-09-01", 230.456), ("2026-10-01", 250.0), ("2026-08-29", 220.0)],
        "GOOG": [("2026-10-02", 160.0)],
    }"#;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).expect("valid date")
    }

    #[test]
    fn file_history_filters_by_range() {
        let history = FileHistory::parse(HISTORY).unwrap();
        let start = NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date");
        let closes = history.daily_closes("AAPL", start, today()).unwrap();
        assert_eq!(closes.len(), 2);
        assert!(history.daily_closes("MSFT", start, today()).unwrap().is_empty());
    }

    #[test]
    fn report_keeps_ticker_order_and_labels() {
        let history = FileHistory::parse(HISTORY).unwrap();
        let config = crate::config::test_config();
        let report = StockReport::collect(&history, &config.stocks, today()).unwrap();

        let labels: Vec<_> = report.series.iter().map(|(label, _)| label.as_str()).collect();
        assert_eq!(
            labels,
            ["Apple (AAPL)", "Amazon (AMZN)", "Alphabet Inc. (GOOG)", "NVIDIA Corp (NVDA)"]
        );
        assert_eq!(report.series[0].1.prices(), vec![220.0, 230.46, 250.0]);
        assert!(report.series[1].1.is_empty());
        assert_eq!(report.series[2].1.prices(), vec![160.0]);

        let text = report.to_string();
        assert!(text.contains("Apple (AAPL): 2026-08 220.00, 2026-09 230.46, 2026-10 250.00"));
        assert!(text.contains("Amazon (AMZN): no data"));
    }

    #[test]
    fn load_reads_the_demo_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/prices.ron");
        let history = futures::executor::block_on(FileHistory::load(path)).unwrap();
        let start = NaiveDate::from_ymd_opt(2026, 10, 1).expect("valid date");
        assert!(!history.daily_closes("AAPL", start, today()).unwrap().is_empty());
    }

    #[test]
    fn demo_history_covers_a_full_year() {
        let history = FileHistory::parse(include_str!("../demos/prices.ron")).unwrap();
        let config = crate::config::test_config();
        let report = StockReport::collect(&history, &config.stocks, today()).unwrap();
        for (label, prices) in &report.series {
            assert_eq!(prices.points.len(), 12, "{}", label);
        }
    }
}
