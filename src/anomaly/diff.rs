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

//! Baseline comparison.
//!
//! Both sides are masked first so that run-specific noise (timestamps,
//! GUIDs, absolute paths) never shows up as a difference. The raw lines are
//! never compared.

use crate::parser::mask::{MaskRule, Masker};
use similar::{ChangeTag, TextDiff};
use std::sync::LazyLock;

/// Lines of unchanged context around each hunk.
pub const CONTEXT_RADIUS: usize = 3;

static DIFF_MASKER: LazyLock<Masker> = LazyLock::new(|| {
    Masker::new(vec![
        // Before GUIDs: a timestamp never contains a GUID, the reverse can
        // happen with all-digit groups.
        MaskRule::from_literal(
            "timestamp",
            r"\d{4}[-/]\d{2}[-/]\d{2}[ T]\d{2}:\d{2}:\d{2}(?:\.\d+)?",
            "[TIMESTAMP]",
        ),
        MaskRule::from_literal(
            "guid",
            r"\{?\b[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\b\}?",
            "[GUID]",
        ),
        MaskRule::from_literal(
            "path",
            // Drive paths take either separator. Inner folders may hold
            // spaces, the last component may not.
            r"\b[A-Za-z]:[\\/](?:[^\\/\s]+(?: [^\\/\s]+)*[\\/])*[^\\/\s]*|(?<![\w:/])/(?:[\w.-]+/)*[\w.-]+",
            "[PATH]",
        ),
    ])
});

/// Mask the volatile parts of one line.
pub fn mask_dynamic_fields(line: &str) -> String {
    DIFF_MASKER.apply(line)
}

/// Unified diff of the masked baseline against the masked target.
///
/// Output follows the usual layout: `--- baseline` and `+++ target`
/// headers, `@@` hunk headers, then context, removed (`-`) and added (`+`)
/// lines, none with a trailing newline. Identical inputs after masking give
/// an empty result.
pub fn compare_logs<B, T>(baseline: &[B], target: &[T]) -> Vec<String>
where
    B: AsRef<str>,
    T: AsRef<str>,
{
    profiling::scope!("compare_logs");
    let baseline = DIFF_MASKER.apply_all(baseline);
    let target = DIFF_MASKER.apply_all(target);

    let old: Vec<&str> = baseline.iter().map(String::as_str).collect();
    let new: Vec<&str> = target.iter().map(String::as_str).collect();
    let diff = TextDiff::from_slices(&old, &new);

    let mut unified = diff.unified_diff();
    unified.context_radius(CONTEXT_RADIUS);

    let mut out = Vec::new();
    for hunk in unified.iter_hunks() {
        if out.is_empty() {
            out.push("--- baseline".to_string());
            out.push("+++ target".to_string());
        }
        out.push(hunk.header().to_string());
        for change in hunk.iter_changes() {
            let marker = match change.tag() {
                ChangeTag::Delete => '-',
                ChangeTag::Insert => '+',
                ChangeTag::Equal => ' ',
            };
            let value = change.value();
            out.push(format!("{marker}{}", value.trim_end_matches('\n')));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_timestamps_guids_paths() {
        assert_eq!(
            mask_dynamic_fields("2025-07-27 14:22:01 start 123e4567-e89b-12d3-a456-426614174000"),
            "[TIMESTAMP] start [GUID]"
        );
        assert_eq!(
            mask_dynamic_fields(r"load C:\Program Files\App\app.dll now"),
            "load [PATH] now"
        );
        assert_eq!(mask_dynamic_fields("copy C:/Temp/run1/x done"), "copy [PATH] done");
        assert_eq!(mask_dynamic_fields("read /opt/app/conf.yml ok"), "read [PATH] ok");
        assert_eq!(
            mask_dynamic_fields("2025-07-27T14:22:01.250 iso"),
            "[TIMESTAMP] iso"
        );
    }

    #[test]
    fn test_volatile_only_differences_vanish() {
        let baseline = [
            "2025-07-27 14:22:01 Initialize session 123e4567-e89b-12d3-a456-426614174000",
            r"2025-07-27 14:22:02 Loading C:\Temp\run1\config.xml",
            "2025-07-27 14:22:03 Complete",
        ];
        let target = [
            "2025-08-01 09:00:00 Initialize session 00000000-1111-2222-3333-444444444444",
            r"2025-08-01 09:00:01 Loading C:\Temp\run2\config.xml",
            "2025-08-01 09:00:02 Complete",
        ];
        assert!(compare_logs(&baseline, &target).is_empty());
    }

    #[test]
    fn test_real_change_is_reported() {
        let baseline = ["Initialize", "Load Config", "Start Services", "Complete"];
        let target = ["Initialize", "Load Config", "Service crashed", "Complete"];
        let diff = compare_logs(&baseline, &target);
        assert_eq!(diff[0], "--- baseline");
        assert_eq!(diff[1], "+++ target");
        assert!(diff[2].starts_with("@@"));
        assert!(diff.contains(&"-Start Services".to_string()));
        assert!(diff.contains(&"+Service crashed".to_string()));
        assert!(diff.contains(&" Initialize".to_string()));
        assert!(diff.iter().all(|l| !l.ends_with('\n')));
    }

    #[test]
    fn test_inputs_are_untouched() {
        let baseline = vec!["2025-07-27 14:22:01 a".to_string()];
        let target = vec!["2025-07-27 14:22:01 b".to_string()];
        let _ = compare_logs(&baseline, &target);
        assert_eq!(baseline[0], "2025-07-27 14:22:01 a");
    }

    #[test]
    fn test_empty_sides() {
        let none: [&str; 0] = [];
        assert!(compare_logs(&none, &none).is_empty());
        let diff = compare_logs(&none, &["new line"]);
        assert_eq!(diff.last().map(String::as_str), Some("+new line"));
    }
}
