//! Report listing and lookup over the active source

use serde::Serialize;
use tracing::debug;

use super::normalizer::normalize_report;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{Mode, Report};
use crate::providers::source::ReportSource;
use crate::utils::constants::DEFAULT_PAGE_LIMIT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u64,
    pub offset: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportPage {
    pub reports: Vec<Report>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
    pub source: Mode,
}

/// Newest-first page of reports
pub async fn list_reports(source: &ReportSource, page: Page) -> AppResult<ReportPage> {
    let Page { limit, offset } = page;

    let (reports, total) = match source {
        ReportSource::Demo(store) => {
            let mut all = store.all();
            all.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            let total = all.len() as u64;
            let reports = all
                .into_iter()
                .skip(usize::try_from(offset).unwrap_or(usize::MAX))
                .take(usize::try_from(limit).unwrap_or(usize::MAX))
                .collect();
            (reports, total)
        }
        ReportSource::Onchain(client) => {
            // ids are sequential, so newest-first means walking back from the end
            let total = client.report_count().await?;
            let end = total.saturating_sub(offset);
            let start = end.saturating_sub(limit);
            debug!(total, start, end, "📄 Paging registry reports");

            let mut reports = Vec::with_capacity((end - start) as usize);
            for id in (start..end).rev() {
                let raw = client.report(id).await?;
                reports.push(normalize_report(id, &raw));
            }
            (reports, total)
        }
    };

    Ok(ReportPage {
        reports,
        total,
        limit,
        offset,
        source: source.mode(),
    })
}

/// Single report by source-scoped id
pub async fn get_report(source: &ReportSource, id: u64) -> AppResult<Report> {
    match source {
        ReportSource::Demo(store) => store
            .by_id(id)
            .ok_or_else(|| AppError::not_found("Report not found")),
        ReportSource::Onchain(client) => {
            let total = client.report_count().await?;
            if id >= total {
                return Err(AppError::not_found("Report not found"));
            }
            let raw = client.report(id).await?;
            Ok(normalize_report(id, &raw))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalizer::{RawReport, RawTime};
    use crate::models::errors::ErrorCode;
    use crate::providers::demo::{DemoRecord, DemoReportStore};
    use crate::providers::mock::{chain_report, MockChain};
    use std::sync::Arc;

    const TARGET: &str = "0x22222222222A7f2f2D0efA7D2A6fD6b88E59f6a9";

    fn demo_source() -> ReportSource {
        // stored out of order: t0 > t1 > t2
        let record = |id: u64, millis: i64| DemoRecord {
            id,
            raw: RawReport {
                target_address: Some(TARGET.to_string()),
                timestamp: RawTime::Millis(millis),
                ..Default::default()
            },
        };
        let store = DemoReportStore::new(vec![record(10, 200), record(11, 300), record(12, 100)]);
        ReportSource::Demo(Arc::new(store))
    }

    fn chain_source(count: u64) -> ReportSource {
        let chain = (0..count).fold(MockChain::new(), |chain, id| {
            chain.with_report(id, chain_report(TARGET, 1_700_000_000 + id, 0, false))
        });
        ReportSource::Onchain(Arc::new(chain))
    }

    fn ids(page: &ReportPage) -> Vec<u64> {
        page.reports.iter().map(|r| r.id).collect()
    }

    #[tokio::test]
    async fn test_demo_first_page_is_newest() {
        let page = list_reports(&demo_source(), Page { limit: 2, offset: 0 }).await.unwrap();
        assert_eq!(ids(&page), vec![11, 10]);
        assert_eq!(page.total, 3);
        assert_eq!(page.source, Mode::Demo);
    }

    #[tokio::test]
    async fn test_demo_second_page_is_oldest() {
        let page = list_reports(&demo_source(), Page { limit: 2, offset: 2 }).await.unwrap();
        assert_eq!(ids(&page), vec![12]);
        assert_eq!(page.offset, 2);
    }

    #[tokio::test]
    async fn test_demo_offset_past_end() {
        let page = list_reports(&demo_source(), Page { limit: 5, offset: 9 }).await.unwrap();
        assert!(page.reports.is_empty());
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn test_onchain_pages_walk_backwards() {
        let source = chain_source(5);

        let page = list_reports(&source, Page { limit: 2, offset: 0 }).await.unwrap();
        assert_eq!(ids(&page), vec![4, 3]);
        assert_eq!(page.source, Mode::Onchain);

        let page = list_reports(&source, Page { limit: 2, offset: 4 }).await.unwrap();
        assert_eq!(ids(&page), vec![0]);

        let page = list_reports(&source, Page { limit: 2, offset: 7 }).await.unwrap();
        assert!(page.reports.is_empty());
        assert_eq!(page.total, 5);
    }

    #[tokio::test]
    async fn test_get_report() {
        let report = get_report(&demo_source(), 12).await.unwrap();
        assert_eq!(report.timestamp, 100);

        let err = get_report(&demo_source(), 3).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ApiNotFound);

        let report = get_report(&chain_source(3), 2).await.unwrap();
        assert_eq!(report.timestamp, 1_700_000_002_000);

        let err = get_report(&chain_source(3), 3).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ApiNotFound);
    }
}
