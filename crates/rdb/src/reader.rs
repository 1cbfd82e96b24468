//! Streaming RDB decoder

use crate::record::RdbRecord;
use crate::{RdbError, Result};

/// Lazy sequence of records decoded from RDB lines
///
/// Created by [`parse_rdb`] once the column headers have been read. Each
/// call to `next` pulls lines from the input until a non-blank one is
/// found and decodes it. The input is consumed exactly once.
#[derive(Debug)]
pub struct RdbRecords<I> {
    lines: I,
    headers: Vec<String>,
}

impl<I> RdbRecords<I> {
    /// Column headers, in file order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl<I, S> Iterator for RdbRecords<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = RdbRecord;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            let line = strip_line_ending(line.as_ref());
            if line.trim().is_empty() {
                continue;
            }
            return Some(RdbRecord::from_fields(&self.headers, line.split('\t')));
        }
        None
    }
}

/// Parse records in RDB lines into ordered column/value maps
///
/// Comment lines (starting with `#`) and empty lines before the header are
/// skipped. The line right after the header holds column types and is
/// discarded without inspection. Blank data lines are skipped. Data values
/// are zipped with the headers positionally: short rows lack the trailing
/// columns, long rows lose their extra values.
///
/// # Errors
/// Returns [`RdbError::MissingHeader`] if the input ends before a header
/// line is found.
///
/// # Examples
/// ```
/// use rdb::parse_rdb;
///
/// let lines = ["# USGS site file", "agency_cd\tsite_no", "5s\t15s", "USGS\t01646500"];
/// let records: Vec<_> = parse_rdb(lines).unwrap().collect();
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].get("site_no"), Some("01646500"));
/// ```
pub fn parse_rdb<I, S>(lines: I) -> Result<RdbRecords<I::IntoIter>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lines = lines.into_iter();

    let headers = loop {
        let line = lines.next().ok_or(RdbError::MissingHeader)?;
        let line = strip_line_ending(line.as_ref());
        if !line.is_empty() && !line.starts_with('#') {
            break line.split('\t').map(str::to_string).collect::<Vec<_>>();
        }
    };

    // column type row; a header with nothing after it yields no records
    // instead of failing
    lines.next();

    Ok(RdbRecords { lines, headers })
}

/// Parse an in-memory RDB document, such as a response body
pub fn parse_rdb_str(text: &str) -> Result<RdbRecords<std::str::Lines<'_>>> {
    parse_rdb(text.lines())
}

fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(|c| c == '\r' || c == '\n')
}
