//! ## tracecheck-trace::segment
//! Marker-bounded block extraction from a structured dump.
//!
//! A block opens on a line equal (after trimming) to the start marker and
//! closes on a line equal to the end marker. Marker lines are never captured.
//! A start marker seen while already capturing opens a fresh block; a block
//! still open at end of input is closed there.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, instrument};

use crate::error::TraceError;

/// One trimmed line of the dump with its 1-based position in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

/// Lines between one start marker and the following end marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceSegment {
    pub lines: Vec<SourceLine>,
}

impl TraceSegment {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Scanning,
    Capturing,
}

/// Streaming block extractor; feed it lines in file order.
#[derive(Debug)]
pub struct SegmentScanner<'m> {
    start_marker: &'m str,
    end_marker: &'m str,
    state: CaptureState,
    current: TraceSegment,
    segments: Vec<TraceSegment>,
}

impl<'m> SegmentScanner<'m> {
    pub fn new(start_marker: &'m str, end_marker: &'m str) -> Self {
        Self {
            start_marker,
            end_marker,
            state: CaptureState::Scanning,
            current: TraceSegment::default(),
            segments: Vec::new(),
        }
    }

    pub fn feed(&mut self, number: usize, raw: &str) {
        let line = raw.trim();
        if line == self.start_marker {
            self.close();
            self.state = CaptureState::Capturing;
            return;
        }
        if line == self.end_marker {
            self.close();
            return;
        }
        // Blank lines carry no record.
        if self.state == CaptureState::Capturing && !line.is_empty() {
            self.current.lines.push(SourceLine {
                number,
                text: line.to_string(),
            });
        }
    }

    fn close(&mut self) {
        if self.state == CaptureState::Capturing {
            self.segments.push(std::mem::take(&mut self.current));
        }
        self.state = CaptureState::Scanning;
    }

    pub fn finish(mut self) -> Vec<TraceSegment> {
        self.close();
        self.segments
    }
}

/// Extract every block from buffered input.
pub fn extract_segments_from_reader<R: BufRead>(
    reader: R,
    start_marker: &str,
    end_marker: &str,
) -> std::io::Result<Vec<TraceSegment>> {
    let mut scanner = SegmentScanner::new(start_marker, end_marker);
    for (idx, line) in reader.lines().enumerate() {
        scanner.feed(idx + 1, &line?);
    }
    Ok(scanner.finish())
}

/// Extract every block from the dump at `path`.
#[instrument(level = "debug", skip(start_marker, end_marker), fields(path = %path.display()))]
pub fn extract_segments(
    path: &Path,
    start_marker: &str,
    end_marker: &str,
) -> Result<Vec<TraceSegment>, TraceError> {
    if !path.exists() {
        return Err(TraceError::FileNotFound(path.to_path_buf()));
    }
    let io_err = |source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_err)?;
    let segments =
        extract_segments_from_reader(BufReader::new(file), start_marker, end_marker).map_err(io_err)?;
    debug!(segments = segments.len(), "Extracted reference blocks");
    Ok(segments)
}

/// Concatenate captured lines across blocks, preserving source order.
pub fn captured_lines(segments: &[TraceSegment]) -> Vec<&SourceLine> {
    segments.iter().flat_map(|s| s.lines.iter()).collect()
}
