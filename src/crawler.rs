//! The crawl engine shared by every source.
//!
//! A [`Crawler`] walks one [`SourceDescriptor`]'s targets strictly in order:
//!
//! 1. **Address**: build the listing URL for the target
//! 2. **Fetch**: download it through the [`Fetch`] implementation
//! 3. **Extract**: run the source's extractor over the body
//! 4. **Persist**: append the extracted records to the source's output file
//! 5. **Pause**: sleep the configured delay before the next target
//!
//! Failures at any step are reported to the [`CrawlObserver`] and the crawl
//! moves on to the next target. A target is never revisited, and
//! [`Crawler::run`] never fails.

use crate::enumerator::{CrawlTarget, Enumeration};
use crate::errors::{ExtractionError, FetchError, PersistError};
use crate::fetcher::Fetch;
use crate::outputs::text::append_records;
use crate::scrapers::{SourceDescriptor, SourceOptions};
use itertools::Itertools;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

/// Lifecycle of a crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    /// Targets remain (or the crawl has not started yet).
    Enumerating,
    /// Every target has been visited. Terminal.
    Done,
}

/// Counters accumulated over one crawl.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    pub targets_visited: usize,
    pub fetch_failures: usize,
    pub records_extracted: usize,
    pub extraction_errors: usize,
    pub records_written: usize,
    pub persist_failures: usize,
}

/// Receives crawl events.
///
/// Every hook has an empty default, so implementors only override what they
/// care about.
pub trait CrawlObserver: Send + Sync {
    fn on_target_started(&self, _source: &str, _target: &CrawlTarget, _url: &str) {}

    fn on_fetch_failed(&self, _source: &str, _target: &CrawlTarget, _error: &FetchError) {}

    fn on_extraction_error(&self, _source: &str, _target: &CrawlTarget, _error: &ExtractionError) {}

    fn on_records_persisted(&self, _source: &str, _target: &CrawlTarget, _count: usize, _path: &Path) {}

    fn on_persist_failed(&self, _source: &str, _target: &CrawlTarget, _error: &PersistError) {}

    fn on_crawl_complete(&self, _source: &str, _stats: &CrawlStats) {}
}

/// Observer that reports every event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CrawlObserver for TracingObserver {
    fn on_target_started(&self, source: &str, target: &CrawlTarget, url: &str) {
        info!(source, %target, %url, "Scraping target");
    }

    fn on_fetch_failed(&self, source: &str, target: &CrawlTarget, error: &FetchError) {
        error!(source, %target, error = %error, "Fetch failed; skipping target");
    }

    fn on_extraction_error(&self, source: &str, target: &CrawlTarget, error: &ExtractionError) {
        warn!(source, %target, error = %error, "Skipping listing item");
    }

    fn on_records_persisted(&self, source: &str, target: &CrawlTarget, count: usize, path: &Path) {
        info!(source, %target, count, path = %path.display(), "Data written");
    }

    fn on_persist_failed(&self, source: &str, target: &CrawlTarget, error: &PersistError) {
        error!(source, %target, error = %error, "Failed writing records");
    }

    fn on_crawl_complete(&self, source: &str, stats: &CrawlStats) {
        info!(
            source,
            targets = stats.targets_visited,
            fetch_failures = stats.fetch_failures,
            extracted = stats.records_extracted,
            extraction_errors = stats.extraction_errors,
            written = stats.records_written,
            persist_failures = stats.persist_failures,
            "Crawl complete"
        );
    }
}

/// Sequential fetch/extract/persist loop over one source.
pub struct Crawler<F> {
    descriptor: SourceDescriptor,
    options: SourceOptions,
    enumeration: Enumeration,
    delay: Duration,
    output_path: PathBuf,
    fetcher: F,
    observer: Arc<dyn CrawlObserver>,
    state: CrawlState,
    stats: CrawlStats,
}

impl<F: Fetch> Crawler<F> {
    /// Create a crawler writing to `output_dir/<descriptor.output_file>` with
    /// the descriptor's default bounds and delay.
    pub fn new(
        descriptor: SourceDescriptor,
        fetcher: F,
        observer: Arc<dyn CrawlObserver>,
        output_dir: &Path,
    ) -> Self {
        Self {
            enumeration: descriptor.enumeration,
            delay: descriptor.delay,
            output_path: output_dir.join(descriptor.output_file),
            options: SourceOptions::default(),
            descriptor,
            fetcher,
            observer,
            state: CrawlState::Enumerating,
            stats: CrawlStats::default(),
        }
    }

    pub fn with_options(mut self, options: SourceOptions) -> Self {
        self.options = options;
        self
    }

    /// Crawl explicit bounds instead of the descriptor's defaults.
    pub fn with_enumeration(mut self, enumeration: Enumeration) -> Self {
        self.enumeration = enumeration;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Visit every target until the enumeration is exhausted.
    ///
    /// # Returns
    ///
    /// The counters for this crawl. The crawler is left in
    /// [`CrawlState::Done`].
    #[instrument(level = "info", skip_all, fields(source = self.descriptor.name))]
    pub async fn run(&mut self) -> CrawlStats {
        let started = Instant::now();
        self.state = CrawlState::Enumerating;
        self.stats = CrawlStats::default();

        for target in self.enumeration.targets() {
            self.visit(&target).await;
            if !self.delay.is_zero() {
                sleep(self.delay).await;
            }
        }

        self.state = CrawlState::Done;
        debug!(elapsed = ?started.elapsed(), "Enumeration exhausted");
        self.observer
            .on_crawl_complete(self.descriptor.name, &self.stats);
        self.stats.clone()
    }

    #[instrument(level = "debug", skip_all, fields(%target))]
    async fn visit(&mut self, target: &CrawlTarget) {
        let source = self.descriptor.name;
        self.stats.targets_visited += 1;

        let url = match (self.descriptor.url_for)(target, &self.options) {
            Ok(url) => url,
            Err(e) => {
                self.stats.fetch_failures += 1;
                self.observer.on_fetch_failed(source, target, &e);
                return;
            }
        };
        self.observer.on_target_started(source, target, &url);

        let body = match self.fetcher.fetch(&url, self.descriptor.user_agent).await {
            Ok(body) => body,
            Err(e) => {
                self.stats.fetch_failures += 1;
                self.observer.on_fetch_failed(source, target, &e);
                return;
            }
        };

        let (records, errors): (Vec<_>, Vec<_>) =
            (self.descriptor.extract)(&body).into_iter().partition_result();
        for e in &errors {
            self.observer.on_extraction_error(source, target, e);
        }
        self.stats.records_extracted += records.len();
        self.stats.extraction_errors += errors.len();
        debug!(
            extracted = records.len(),
            errors = errors.len(),
            "Extracted listing items"
        );

        match append_records(&records, &self.output_path).await {
            Ok(0) => {}
            Ok(written) => {
                self.stats.records_written += written;
                self.observer
                    .on_records_persisted(source, target, written, &self.output_path);
            }
            Err(e) => {
                self.stats.persist_failures += 1;
                self.observer.on_persist_failed(source, target, &e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExtractionError;
    use crate::models::{Label, ListingRecord};
    use std::sync::Mutex;

    /// Serves page 1 as two listing items and fails every other URL.
    struct PageOneOnly;

    impl Fetch for PageOneOnly {
        async fn fetch(&self, url: &str, _user_agent: Option<&str>) -> Result<String, FetchError> {
            if url.ends_with("/1") {
                Ok("First headline\nSecond headline".to_string())
            } else {
                Err(FetchError::Status {
                    url: url.to_string(),
                    status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                })
            }
        }
    }

    /// Records every URL it was asked for and returns one item per request.
    #[derive(Default)]
    struct Recording {
        urls: Mutex<Vec<String>>,
    }

    impl Fetch for Arc<Recording> {
        async fn fetch(&self, url: &str, _user_agent: Option<&str>) -> Result<String, FetchError> {
            self.urls.lock().unwrap().push(url.to_string());
            Ok("Only headline".to_string())
        }
    }

    #[derive(Default)]
    struct Events(Mutex<Vec<String>>);

    impl CrawlObserver for Events {
        fn on_fetch_failed(&self, _source: &str, target: &CrawlTarget, _error: &FetchError) {
            self.0.lock().unwrap().push(format!("fetch_failed {}", target));
        }

        fn on_extraction_error(&self, _source: &str, target: &CrawlTarget, _error: &ExtractionError) {
            self.0.lock().unwrap().push(format!("extraction_error {}", target));
        }

        fn on_records_persisted(&self, _source: &str, target: &CrawlTarget, count: usize, _path: &Path) {
            self.0
                .lock()
                .unwrap()
                .push(format!("persisted {} {}", target, count));
        }

        fn on_crawl_complete(&self, _source: &str, _stats: &CrawlStats) {
            self.0.lock().unwrap().push("complete".to_string());
        }
    }

    fn url_for(target: &CrawlTarget, _options: &SourceOptions) -> Result<String, FetchError> {
        match target {
            CrawlTarget::Page(page) => Ok(format!("https://listing.test/page/{}", page)),
            other => Err(FetchError::Target {
                target: other.to_string(),
                reason: "pages only".to_string(),
            }),
        }
    }

    /// One record per non-empty line; a line starting with `!` is a broken item.
    fn extract_lines(body: &str) -> Vec<Result<ListingRecord, ExtractionError>> {
        body.lines()
            .enumerate()
            .map(|(index, line)| {
                if line.starts_with('!') {
                    Err(ExtractionError::MissingAttribute {
                        index,
                        attribute: "href",
                    })
                } else {
                    Ok(ListingRecord::new(
                        line,
                        format!("https://listing.test/{}", index),
                        Label::Sarcastic,
                    ))
                }
            })
            .collect()
    }

    fn descriptor(enumeration: Enumeration) -> SourceDescriptor {
        SourceDescriptor {
            name: "listing_test",
            output_file: "listing_test.txt",
            label: Label::Sarcastic,
            enumeration,
            delay: Duration::ZERO,
            user_agent: None,
            url_for,
            extract: extract_lines,
        }
    }

    #[tokio::test]
    async fn test_failed_fetch_does_not_stop_crawl() {
        let tmp = tempfile::tempdir().unwrap();
        let events = Arc::new(Events::default());
        let mut crawler = Crawler::new(
            descriptor(Enumeration::Pages { start: 1, end: 2 }),
            PageOneOnly,
            events.clone(),
            tmp.path(),
        );

        let stats = crawler.run().await;

        assert_eq!(crawler.state(), CrawlState::Done);
        let contents = std::fs::read_to_string(crawler.output_path()).unwrap();
        assert_eq!(
            contents,
            "First headline|https://listing.test/0|1\nSecond headline|https://listing.test/1|1\n"
        );
        assert_eq!(
            stats,
            CrawlStats {
                targets_visited: 2,
                fetch_failures: 1,
                records_extracted: 2,
                extraction_errors: 0,
                records_written: 2,
                persist_failures: 0,
            }
        );
        assert_eq!(
            *events.0.lock().unwrap(),
            vec![
                "persisted page 1 2".to_string(),
                "fetch_failed page 2".to_string(),
                "complete".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_broken_items_are_reported_and_skipped() {
        struct Mixed;
        impl Fetch for Mixed {
            async fn fetch(&self, _url: &str, _ua: Option<&str>) -> Result<String, FetchError> {
                Ok("Good one\n!broken\nGood two".to_string())
            }
        }

        let tmp = tempfile::tempdir().unwrap();
        let events = Arc::new(Events::default());
        let mut crawler = Crawler::new(
            descriptor(Enumeration::Pages { start: 1, end: 1 }),
            Mixed,
            events.clone(),
            tmp.path(),
        );

        let stats = crawler.run().await;
        assert_eq!(stats.records_written, 2);
        assert_eq!(stats.extraction_errors, 1);
        assert!(events
            .0
            .lock()
            .unwrap()
            .contains(&"extraction_error page 1".to_string()));
    }

    #[tokio::test]
    async fn test_unaddressable_target_counts_as_fetch_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let recording = Arc::new(Recording::default());
        let mut crawler = Crawler::new(
            descriptor(Enumeration::Months {
                start_year: 2021,
                start_month: 2,
                end_year: 2021,
            }),
            recording.clone(),
            Arc::new(TracingObserver),
            tmp.path(),
        );

        let stats = crawler.run().await;
        assert_eq!(stats.targets_visited, 2);
        assert_eq!(stats.fetch_failures, 2);
        assert!(recording.urls.lock().unwrap().is_empty());
        assert_eq!(crawler.state(), CrawlState::Done);
    }

    #[tokio::test]
    async fn test_explicit_bounds_override_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let recording = Arc::new(Recording::default());
        let mut crawler = Crawler::new(
            descriptor(Enumeration::Pages { start: 1, end: 100 }),
            recording.clone(),
            Arc::new(TracingObserver),
            tmp.path(),
        )
        .with_enumeration(Enumeration::Pages { start: 5, end: 3 });

        crawler.run().await;
        assert_eq!(
            *recording.urls.lock().unwrap(),
            vec![
                "https://listing.test/page/5".to_string(),
                "https://listing.test/page/4".to_string(),
                "https://listing.test/page/3".to_string(),
            ]
        );
        let lines = std::fs::read_to_string(crawler.output_path()).unwrap();
        assert_eq!(lines.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_persist_failure_is_swallowed() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("does-not-exist");
        let mut crawler = Crawler::new(
            descriptor(Enumeration::Pages { start: 1, end: 2 }),
            Arc::new(Recording::default()),
            Arc::new(TracingObserver),
            &missing,
        );

        let stats = crawler.run().await;
        assert_eq!(stats.persist_failures, 2);
        assert_eq!(stats.records_written, 0);
        assert_eq!(crawler.state(), CrawlState::Done);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleeps_after_each_target() {
        let tmp = tempfile::tempdir().unwrap();
        let mut crawler = Crawler::new(
            descriptor(Enumeration::Pages { start: 1, end: 3 }),
            Arc::new(Recording::default()),
            Arc::new(TracingObserver),
            tmp.path(),
        )
        .with_delay(Duration::from_secs(2));

        let started = tokio::time::Instant::now();
        crawler.run().await;
        assert!(started.elapsed() >= Duration::from_secs(6));
    }
}
