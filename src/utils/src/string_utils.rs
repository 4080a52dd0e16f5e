// Copyright 2017 The Australian National University
// 
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
// 
//     http://www.apache.org/licenses/LICENSE-2.0
// 
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use regex::Regex;

/// A block of whole lines strictly between a start line and an end line.
///
/// `start` and `end` are byte offsets into the text the region was found in. `start` points to
/// the first byte after the start line (including its newline), `end` to the first byte of the
/// end line. The region may be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRegion {
    pub start: usize,
    pub end: usize
}

/// why a line region could not be located
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionError {
    /// no line matches the start pattern
    NoStart,
    /// a start line was found, but no later line matches the end pattern
    NoEnd
}

/// iterates over lines together with the byte offset of each line
/// the yielded line does not contain the trailing newline, the yielded length does
fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();
        let line = raw.trim_end_matches('\n').trim_end_matches('\r');
        (start, raw.len(), line)
    })
}

/// locates the first region delimited by a line matching `start` and the next line matching `end`
///
/// If `start_name` is given, the start line only counts when capture group 1 of `start` equals it.
/// This is how `struct NAME {` ... `};` blocks are found: the pattern is generic, the name selects.
pub fn find_line_region(
    text: &str,
    start: &Regex,
    start_name: Option<&str>,
    end: &Regex
) -> Result<LineRegion, RegionError> {
    let mut body_start: Option<usize> = None;

    for (offset, len, line) in lines_with_offsets(text) {
        match body_start {
            None => {
                if let Some(caps) = start.captures(line) {
                    let name_ok = match start_name {
                        Some(name) => caps.get(1).map_or(false, |m| m.as_str() == name),
                        None => true
                    };
                    if name_ok {
                        body_start = Some(offset + len);
                    }
                }
            }
            Some(s) => {
                if end.is_match(line) {
                    return Ok(LineRegion {
                        start: s,
                        end: offset
                    });
                }
            }
        }
    }

    match body_start {
        None => Err(RegionError::NoStart),
        Some(_) => Err(RegionError::NoEnd)
    }
}

/// returns the verbatim text between the start line and the end line
pub fn extract_lines<'a>(
    text: &'a str,
    start: &Regex,
    start_name: Option<&str>,
    end: &Regex
) -> Result<&'a str, RegionError> {
    find_line_region(text, start, start_name, end).map(|r| &text[r.start..r.end])
}

/// replaces the lines of `region` with `replacement`
///
/// A non-empty replacement always ends with exactly one newline, so the end line stays on a line
/// of its own.
pub fn replace_region(text: &str, region: LineRegion, replacement: &str) -> String {
    let body = replacement.trim_end_matches('\n');

    let mut ret = String::with_capacity(text.len() + replacement.len());
    ret.push_str(&text[..region.start]);
    if !body.is_empty() {
        ret.push_str(body);
        ret.push('\n');
    }
    ret.push_str(&text[region.end..]);
    ret
}

/// removes all whitespace characters (`MuCtx *` becomes `MuCtx*`)
pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}
