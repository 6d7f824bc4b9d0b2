// RcaCrab - GPL-3.0-or-later
// This file is part of RcaCrab.
//
// Copyright (C) 2026 Daniel Freiermuth
//
// RcaCrab is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// RcaCrab is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with RcaCrab.  If not, see <https://www.gnu.org/licenses/>.

//! The analysis pipeline.
//!
//! Normalization is strictly sequential: decode, unpack event records,
//! redact, reassemble entries, normalize timestamps. Once that corpus exists
//! it is read-only, and the detectors fan out over it with rayon.

use super::bundle::{AnalysisBundle, RcaFinding, SourceReport};
use super::pattern_rule::RuleSet;
use crate::anomaly::stack::NO_FRAME;
use crate::anomaly::{
    check_sequence, compare_logs, detect_spikes, find_missing_events, match_signatures,
    summarize_anomalies, summarize_stack_trace, Match, RcaClassifier, StackSummary,
};
use crate::config::AnalyzerConfig;
use crate::error::IngestError;
use crate::feedback::{collect_unmatched, PatternSuggester, TemplateSuggester};
use crate::parser::installer::parse_installer_lines;
use crate::parser::line::{LogEntry, LogLine, RawLog};
use crate::parser::redactor::Redactor;
use crate::parser::{decoder, events, multiline, timestamp, SourceKind};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// The normalized corpus of one source.
#[derive(Debug, Clone)]
pub struct NormalizedLog {
    pub kind: SourceKind,
    /// Redacted lines, before reassembly. Timestamps untouched.
    pub redacted: Vec<LogLine>,
    /// Redacted lines with canonical timestamps
    pub lines: Vec<LogLine>,
    /// Reassembled entries with canonical timestamps
    pub entries: Vec<LogEntry>,
}

impl NormalizedLog {
    pub fn line_texts(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }

    /// The entry holding `lines[idx]` and the line's offset inside it.
    pub fn entry_of(&self, idx: usize) -> Option<(&LogEntry, usize)> {
        let mut first = 0;
        for entry in &self.entries {
            if idx < first + entry.line_count {
                return Some((entry, idx - first));
            }
            first += entry.line_count;
        }
        None
    }
}

pub struct Analyzer {
    config: AnalyzerConfig,
    rules: Arc<RuleSet>,
    redactor: Redactor,
    classifier: RcaClassifier,
    suggester: Box<dyn PatternSuggester>,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig, rules: Arc<RuleSet>) -> Self {
        let suggester = Box::new(TemplateSuggester::new(config.template_min_count));
        Self {
            config,
            rules,
            redactor: Redactor::default(),
            classifier: RcaClassifier::default(),
            suggester,
        }
    }

    #[must_use]
    pub fn with_suggester(mut self, suggester: Box<dyn PatternSuggester>) -> Self {
        self.suggester = suggester;
        self
    }

    #[must_use]
    pub fn with_redactor(mut self, redactor: Redactor) -> Self {
        self.redactor = redactor;
        self
    }

    /// Run the sequential normalization chain.
    pub fn normalize(&self, raw: &RawLog) -> NormalizedLog {
        profiling::scope!("normalize");
        let start = Instant::now();

        let decoded = decoder::decode(&raw.bytes);
        let kind = crate::parser::detect_source_kind(&decoded);
        let decoded = if kind == SourceKind::EventRecords {
            events::records_to_lines(&decoded)
        } else {
            decoded
        };

        let redacted = self.redactor.redact(&decoded);
        let entries = multiline::merge(&redacted);
        let lines = timestamp::normalize_lines(&redacted);
        let entries = timestamp::normalize_entries(&entries);

        tracing::info!(
            "Normalized {} into {} lines and {} entries in {:?}",
            raw.source,
            lines.len(),
            entries.len(),
            start.elapsed()
        );

        NormalizedLog {
            kind,
            redacted,
            lines,
            entries,
        }
    }

    /// Normalized line texts of a baseline run, ready for [`Self::analyze`].
    pub fn prepare_baseline(&self, raw: &RawLog) -> Vec<String> {
        self.normalize(raw)
            .lines
            .into_iter()
            .map(|line| line.text)
            .collect()
    }

    /// Analyze one source, optionally diffing it against a prepared baseline.
    pub fn analyze(&self, raw: &RawLog, baseline: Option<&[String]>) -> AnalysisBundle {
        profiling::scope!("analyze");
        let log = self.normalize(raw);
        let line_texts = log.line_texts();

        let detect_start = Instant::now();
        let ((sequence, spikes), (matches, (diff, unmatched))) = rayon::join(
            || {
                rayon::join(
                    || check_sequence(&line_texts, &self.config.milestones),
                    || detect_spikes(&line_texts, self.config.spike_threshold),
                )
            },
            || {
                rayon::join(
                    || match_signatures(&line_texts, &self.rules),
                    || {
                        rayon::join(
                            || {
                                baseline
                                    .map(|baseline| compare_logs(baseline, &line_texts))
                                    .unwrap_or_default()
                            },
                            || collect_unmatched(&line_texts, &self.rules),
                        )
                    },
                )
            },
        );
        tracing::debug!("Detectors took {:?} for {}", detect_start.elapsed(), raw.source);

        let rca_findings = self.findings(&log, matches);
        let missing_events = find_missing_events(&line_texts, &self.config.expected_events);
        let installer_errors = if log.kind == SourceKind::Installer {
            parse_installer_lines(&log.redacted)
        } else {
            Vec::new()
        };
        let suggestions = self.suggester.suggest(&unmatched);

        tracing::info!(
            "{}: {} findings, {} unmatched lines, sequence {}",
            raw.source,
            rca_findings.len(),
            unmatched.len(),
            sequence.status
        );

        AnalysisBundle {
            source: raw.source.clone(),
            kind: log.kind,
            rca_findings,
            anomaly_summary: summarize_anomalies(&sequence, &spikes, &diff),
            unmatched_count: unmatched.len(),
            installer_errors,
            missing_events,
            suggestions,
            unmatched,
        }
    }

    /// Classify each match and summarize the trace that follows it.
    fn findings(&self, log: &NormalizedLog, matches: Vec<Match>) -> Vec<RcaFinding> {
        matches
            .into_iter()
            .map(|m| {
                let idx = m.line - 1;
                let stack = match log.entry_of(idx) {
                    // Frames only ever sit on continuation lines below the hit
                    Some((entry, offset)) if entry.is_multiline() => {
                        let tail: Vec<&str> = entry.text.split('\n').skip(offset).collect();
                        summarize_stack_trace(&tail.join("\n"))
                    }
                    _ => summarize_stack_trace(&m.content),
                };
                let has_exception = stack.has_exception();
                let StackSummary { summary, top_frame } = stack;
                RcaFinding {
                    line: log.lines.get(idx).map_or(m.line, |line| line.line_number),
                    rca: self.classifier.classify(&m.content),
                    exception_summary: has_exception.then_some(summary),
                    top_frame: (top_frame != NO_FRAME).then_some(top_frame),
                    pattern: m.pattern,
                }
            })
            .collect()
    }

    /// Read and analyze one file.
    pub fn analyze_path(
        &self,
        path: &Path,
        baseline: Option<&[String]>,
    ) -> Result<AnalysisBundle, IngestError> {
        let raw = RawLog::read(path)?;
        Ok(self.analyze(&raw, baseline))
    }

    /// Analyze several files in parallel. A file that cannot be read becomes
    /// a failed report; the others are unaffected. Output keeps input order.
    pub fn analyze_batch(&self, paths: &[PathBuf], baseline: Option<&[String]>) -> Vec<SourceReport> {
        profiling::scope!("analyze_batch");
        paths
            .par_iter()
            .map(|path| match self.analyze_path(path, baseline) {
                Ok(bundle) => SourceReport::Analyzed(Box::new(bundle)),
                Err(e) => {
                    tracing::error!("{e}");
                    SourceReport::Failed {
                        source: path.display().to_string(),
                        error: e.to_string(),
                    }
                }
            })
            .collect()
    }
}
