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

use crate::parser::timestamp::extract_timestamp;
use std::collections::BTreeMap;

/// Default events-per-minute threshold.
pub const DEFAULT_THRESHOLD_PER_MINUTE: usize = 10;

/// Minute bucket key format.
pub const BUCKET_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Busy minutes: bucket key to line count. Keys iterate lexicographically,
/// which for this key format is also chronological.
pub type SpikeResult = BTreeMap<String, usize>;

/// Count timestamped lines per minute and keep the minutes whose count is
/// strictly above `threshold_per_minute`.
///
/// Lines without a parsable timestamp do not count toward any bucket.
pub fn detect_spikes<S: AsRef<str>>(lines: &[S], threshold_per_minute: usize) -> SpikeResult {
    let mut buckets: BTreeMap<String, usize> = BTreeMap::new();
    let mut untimed = 0usize;

    for line in lines {
        match extract_timestamp(line.as_ref()) {
            Some(ts) => *buckets.entry(ts.format(BUCKET_FORMAT).to_string()).or_insert(0) += 1,
            None => untimed += 1,
        }
    }

    tracing::debug!(
        "Spike detection: {} buckets, {} untimed lines, threshold {}",
        buckets.len(),
        untimed,
        threshold_per_minute
    );

    buckets.retain(|_, count| *count > threshold_per_minute);
    buckets
}
