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

use crate::core::RuleSet;
use crate::error::IngestError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Lines no rule matches, trimmed, in input order. Duplicates are kept.
pub fn collect_unmatched<S: AsRef<str>>(lines: &[S], rules: &RuleSet) -> Vec<String> {
    profiling::scope!("collect_unmatched");
    lines
        .iter()
        .map(|line| line.as_ref())
        .filter(|line| !rules.matches_any(line))
        .map(|line| line.trim().to_string())
        .collect()
}

/// Write one line per entry, replacing whatever `path` held before.
pub fn save_unmatched(lines: &[String], path: &Path) -> Result<(), IngestError> {
    let io_err = |source| IngestError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{line}").map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;

    tracing::info!("Saved {} unmatched lines to {}", lines.len(), path.display());
    Ok(())
}
