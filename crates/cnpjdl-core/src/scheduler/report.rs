//! Per-link results of a run.

use crate::fetcher::{FetchError, FetchOutcome};
use crate::progress::TaskId;
use crate::url_model::Link;

/// Result for one discovered link.
#[derive(Debug)]
pub struct LinkReport {
    pub task: TaskId,
    pub link: Link,
    pub result: Result<FetchOutcome, FetchError>,
}

/// Everything a run did, one entry per link in discovery order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub entries: Vec<LinkReport>,
}

impl RunReport {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn downloaded(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.result, Ok(FetchOutcome::Downloaded { .. })))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.result, Ok(FetchOutcome::Skipped { .. })))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.entries.iter().filter(|e| e.result.is_err()).count()
    }

    /// Total body bytes written by this run (skipped archives count zero).
    pub fn bytes_downloaded(&self) -> u64 {
        self.entries
            .iter()
            .map(|e| match e.result {
                Ok(FetchOutcome::Downloaded { bytes, .. }) => bytes,
                _ => 0,
            })
            .sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Link, &FetchError)> {
        self.entries
            .iter()
            .filter_map(|e| e.result.as_ref().err().map(|err| (&e.link, err)))
    }

    /// True when no link failed.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(task: TaskId, result: Result<FetchOutcome, FetchError>) -> LinkReport {
        LinkReport {
            task,
            link: Link::parse(&format!("http://example.com/DADOS_ABERTOS_CNPJ_{task}.zip")).unwrap(),
            result,
        }
    }

    #[test]
    fn counts_by_outcome() {
        let report = RunReport {
            entries: vec![
                entry(
                    0,
                    Ok(FetchOutcome::Downloaded {
                        path: PathBuf::from("/tmp/a.zip"),
                        bytes: 10,
                    }),
                ),
                entry(
                    1,
                    Ok(FetchOutcome::Skipped {
                        path: PathBuf::from("/tmp/b.zip"),
                    }),
                ),
                entry(2, Err(FetchError::MissingContentLength)),
                entry(
                    3,
                    Ok(FetchOutcome::Downloaded {
                        path: PathBuf::from("/tmp/c.zip"),
                        bytes: 5,
                    }),
                ),
            ],
        };
        assert_eq!(report.len(), 4);
        assert_eq!(report.downloaded(), 2);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.bytes_downloaded(), 15);
        assert!(!report.is_success());
        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].0.as_str().ends_with("DADOS_ABERTOS_CNPJ_2.zip"));
    }

    #[test]
    fn empty_report_is_success() {
        let report = RunReport::default();
        assert!(report.is_empty());
        assert!(report.is_success());
    }
}
