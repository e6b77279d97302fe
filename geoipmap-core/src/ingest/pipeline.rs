use crate::conf::types::{AutomatedTrafficPolicy, IngestConfig};
use crate::geo::GeoResolver;
use crate::ingest::{LineParser, ParseError, TrafficClassifier};
use crate::store::{AggregateStore, Observation};
use std::borrow::Cow;
use std::io::BufRead;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// What happened to a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Recorded,
    NoMatch,
    Unresolved,
    AutomatedTraffic,
}

/// Why [`IngestLoop::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndOfStream,
    /// An automated-client line was seen under [`AutomatedTrafficPolicy::Stop`].
    AutomatedTraffic,
    ReadError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub lines_read: u64,
    pub recorded: u64,
    pub no_match: u64,
    pub unresolved: u64,
    pub automated: u64,
    pub stop_reason: StopReason,
}

impl IngestReport {
    fn new() -> Self {
        Self {
            lines_read: 0,
            recorded: 0,
            no_match: 0,
            unresolved: 0,
            automated: 0,
            stop_reason: StopReason::EndOfStream,
        }
    }

    fn count(&mut self, outcome: LineOutcome) {
        match outcome {
            LineOutcome::Recorded => self.recorded += 1,
            LineOutcome::NoMatch => self.no_match += 1,
            LineOutcome::Unresolved => self.unresolved += 1,
            LineOutcome::AutomatedTraffic => self.automated += 1,
        }
    }
}

/// Drives classifier -> parser -> resolver -> store for every input line.
pub struct IngestLoop<R> {
    classifier: TrafficClassifier,
    parser: LineParser,
    resolver: R,
    store: Arc<AggregateStore>,
    policy: AutomatedTrafficPolicy,
}

impl<R: GeoResolver> IngestLoop<R> {
    /// Built-in signatures, no sentinel, [`AutomatedTrafficPolicy::Stop`].
    pub fn new(resolver: R, store: Arc<AggregateStore>) -> Self {
        Self {
            classifier: TrafficClassifier::default(),
            parser: LineParser::default(),
            resolver,
            store,
            policy: AutomatedTrafficPolicy::default(),
        }
    }

    pub fn from_config(cfg: &IngestConfig, resolver: R, store: Arc<AggregateStore>) -> Self {
        Self::new(resolver, store)
            .with_classifier(TrafficClassifier::new(&cfg.extra_signatures))
            .with_sentinel(cfg.sentinel_ip)
            .with_policy(cfg.automated_traffic)
    }

    pub fn with_classifier(mut self, classifier: TrafficClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_sentinel(mut self, sentinel: Option<Ipv4Addr>) -> Self {
        self.parser = LineParser::new(sentinel);
        self
    }

    pub fn with_policy(mut self, policy: AutomatedTrafficPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &Arc<AggregateStore> {
        &self.store
    }

    /// Run one line through the pipeline. At most one store mutation.
    ///
    /// Does not apply the automated-traffic policy; that is the loop's job.
    pub fn process_line(&self, line: &str) -> LineOutcome {
        if let Some(signature) = self.classifier.matching_signature(line) {
            tracing::debug!(signature, "automated traffic");
            return LineOutcome::AutomatedTraffic;
        }

        let parsed = match self.parser.extract(line) {
            Ok(parsed) => parsed,
            Err(ParseError::NoMatch(reason)) => {
                tracing::debug!(%reason, "line skipped");
                return LineOutcome::NoMatch;
            }
        };

        let Some(location) = self.resolver.resolve(parsed.ip) else {
            tracing::debug!(ip = parsed.ip_text, "address not resolved");
            return LineOutcome::Unresolved;
        };

        self.store
            .record_observation(Observation::new(location, parsed.ip_text, parsed.request));

        LineOutcome::Recorded
    }

    /// Consume `input` until it ends, fails, or an automated client ends
    /// ingestion under the `Stop` policy.
    pub fn run<B: BufRead>(&self, mut input: B) -> IngestReport {
        let mut report = IngestReport::new();
        let mut buf = Vec::with_capacity(1024);

        loop {
            buf.clear();
            match input.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, lines_read = report.lines_read, "failed to read input line");
                    report.stop_reason = StopReason::ReadError;
                    break;
                }
            }

            report.lines_read += 1;

            // A stray non-UTF-8 byte must not end ingestion.
            let line: Cow<'_, str> = String::from_utf8_lossy(trim_line_ending(&buf));
            let outcome = self.process_line(&line);
            report.count(outcome);

            if outcome == LineOutcome::AutomatedTraffic
                && self.policy == AutomatedTrafficPolicy::Stop
            {
                tracing::info!(
                    line = report.lines_read,
                    "automated traffic detected, ingestion stopped"
                );
                report.stop_reason = StopReason::AutomatedTraffic;
                break;
            }
        }

        tracing::info!(
            lines_read = report.lines_read,
            recorded = report.recorded,
            no_match = report.no_match,
            unresolved = report.unresolved,
            automated = report.automated,
            stop_reason = ?report.stop_reason,
            "ingest finished"
        );

        report
    }
}

fn trim_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}
