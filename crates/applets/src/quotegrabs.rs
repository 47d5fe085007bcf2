//! Import IRC quote-grabs from an HTML dump into CSV
//!
//! The dump is a sequence of `<h3>channel</h3>` headings, each followed by a
//! table whose five-cell rows are `id, authors, text, date, grabber`.

use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime, TimeZone};
use log::{debug, info};

use crate::error::{AppletError, AppletResult};
use crate::html::{self, HtmlToken};

const DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";
const MESSAGE_SEPARATOR: &str = "   ";

/// One channel heading and the rows of the table that follows it
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Channel {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

/// A grab ready to be written as a CSV record
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRow {
    pub id: String,
    pub authors: Vec<String>,
    pub channel: String,
    pub grabber: String,
    pub text: String,
    pub timestamp: i64,
}

impl QuoteRow {
    /// CSV fields; the timestamp is written with one decimal place
    /// (`1579089600.0`), the format existing quote databases were fed
    pub fn to_record(&self) -> [String; 6] {
        [
            self.id.clone(),
            self.authors.join("+"),
            self.channel.clone(),
            self.grabber.clone(),
            self.text.clone(),
            format!("{:.1}", self.timestamp as f64),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("quotegrabs.html"),
            output: PathBuf::from("quotes.csv"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub channels: usize,
    pub written: usize,
    pub skipped: usize,
}

/// Walk the document and collect each channel's first table.
///
/// Headings that follow one another with no table in between all take the
/// next table. Cell text is the concatenated text of everything inside the
/// `<td>`, trimmed. Nested tables are not supported.
pub fn extract_channels(document: &str) -> Vec<Channel> {
    let mut channels: Vec<Channel> = Vec::new();
    let mut pending: Vec<String> = Vec::new();
    let mut heading: Option<String> = None;
    // Index of the first channel fed by the open table
    let mut table: Option<usize> = None;
    let mut row: Option<Vec<String>> = None;
    let mut cell: Option<String> = None;

    for token in html::tokenize(document) {
        match token {
            HtmlToken::StartTag(tag) if tag == "h3" => heading = Some(String::new()),
            HtmlToken::EndTag(tag) if tag == "h3" => {
                if let Some(name) = heading.take() {
                    pending.push(name.trim().to_string());
                }
            }
            HtmlToken::StartTag(tag) if tag == "table" && table.is_none() => {
                if let Some(name) = heading.take() {
                    pending.push(name.trim().to_string());
                }
                if !pending.is_empty() {
                    table = Some(channels.len());
                    channels.extend(pending.drain(..).map(|name| Channel {
                        name,
                        rows: Vec::new(),
                    }));
                }
            }
            HtmlToken::EndTag(tag) if tag == "table" => {
                if let Some(first) = table.take() {
                    finish_row(&mut channels[first..], &mut row, &mut cell);
                }
            }
            HtmlToken::StartTag(tag) if tag == "tr" => {
                if let Some(first) = table {
                    finish_row(&mut channels[first..], &mut row, &mut cell);
                    row = Some(Vec::new());
                }
            }
            HtmlToken::EndTag(tag) if tag == "tr" => {
                if let Some(first) = table {
                    finish_row(&mut channels[first..], &mut row, &mut cell);
                }
            }
            HtmlToken::StartTag(tag) if tag == "td" && table.is_some() => {
                finish_cell(&mut row, &mut cell);
                cell = Some(String::new());
            }
            HtmlToken::EndTag(tag) if tag == "td" && table.is_some() => {
                finish_cell(&mut row, &mut cell);
            }
            HtmlToken::Text(text) => {
                if let Some(name) = heading.as_mut() {
                    name.push_str(&text);
                } else if let Some(cell) = cell.as_mut() {
                    cell.push_str(&text);
                }
            }
            _ => {}
        }
    }

    channels
}

fn finish_cell(row: &mut Option<Vec<String>>, cell: &mut Option<String>) {
    if let Some(text) = cell.take() {
        row.get_or_insert_with(Vec::new).push(text.trim().to_string());
    }
}

/// Close the current row and hand it to every channel fed by the table
fn finish_row(
    channels: &mut [Channel],
    row: &mut Option<Vec<String>>,
    cell: &mut Option<String>,
) {
    finish_cell(row, cell);
    if let Some(cells) = row.take() {
        for channel in channels.iter_mut() {
            channel.rows.push(cells.clone());
        }
    }
}

/// Normalize the first line of a grab: drop a leading `<nick> `, or turn a
/// leading `* nick` action into `/me`
pub fn rewrite_text(text: &str) -> String {
    if text.starts_with('<') {
        if let Some(end) = text.find('>') {
            if end > 1 && text[end + 1..].starts_with(' ') {
                return text[end + 2..].to_string();
            }
        }
        return text.to_string();
    }

    if let Some(rest) = text.strip_prefix("* ") {
        let nick_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        if nick_len > 0 {
            return format!("/me{}", &rest[nick_len..]);
        }
    }

    text.to_string()
}

/// Nick credited by a message's leading `* nick` or `<nick>`
fn speaker(message: &str) -> Option<&str> {
    if let Some(rest) = message.strip_prefix("* ") {
        let nick = &rest[..rest.find(' ').unwrap_or(rest.len())];
        if !nick.is_empty() {
            return Some(nick);
        }
    }

    let rest = message.strip_prefix('<')?;
    let nick = &rest[..rest.find('>')?];
    (!nick.is_empty()).then_some(nick)
}

/// Authors of each message in a multi-line grab.
///
/// The first message always belongs to `first_author`. Later messages are
/// credited to their own speaker and skipped when they name none.
pub fn message_authors(first_author: &str, text: &str) -> Vec<String> {
    text.split(MESSAGE_SEPARATOR)
        .enumerate()
        .filter_map(|(i, message)| {
            if i == 0 {
                Some(first_author.to_string())
            } else {
                speaker(message.trim()).map(str::to_string)
            }
        })
        .collect()
}

/// Parse `YYYY/MM/DD Day HH:MM:SS` as local time, in Unix seconds.
///
/// The weekday is not checked against the date.
pub fn parse_timestamp(date: &str) -> AppletResult<i64> {
    let parts: Vec<&str> = date.split_whitespace().collect();
    let [day, _weekday, time] = parts.as_slice() else {
        return Err(AppletError::date(date, "expected 'YYYY/MM/DD Day HH:MM:SS'"));
    };

    let naive = NaiveDateTime::parse_from_str(&format!("{} {}", day, time), DATE_FORMAT)
        .map_err(|e| AppletError::date(date, e.to_string()))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| AppletError::date(date, "time does not exist in the local timezone"))
}

/// Convert one table row; `None` for rows that are not five cells wide
pub fn convert_row(channel: &str, cells: &[String]) -> AppletResult<Option<QuoteRow>> {
    let [id, authors, text, date, grabber] = cells else {
        return Ok(None);
    };

    let first_author = authors.split(", ").next().unwrap_or_default();
    let text = rewrite_text(text);

    Ok(Some(QuoteRow {
        id: id.clone(),
        authors: message_authors(first_author, &text),
        channel: channel.to_string(),
        grabber: grabber.clone(),
        timestamp: parse_timestamp(date)?,
        text,
    }))
}

/// Read `config.input` and write every grab to `config.output`
pub fn import(config: &ImportConfig) -> AppletResult<ImportSummary> {
    let document = fs::read_to_string(&config.input)?;
    let channels = extract_channels(&document);
    info!(
        "found {} channels in {}",
        channels.len(),
        config.input.display()
    );

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_path(&config.output)?;
    let mut summary = ImportSummary {
        channels: channels.len(),
        ..Default::default()
    };

    for channel in &channels {
        for cells in &channel.rows {
            match convert_row(&channel.name, cells)? {
                Some(row) => {
                    debug!("{} {:?} {}", row.id, row.authors, row.text);
                    writer.write_record(row.to_record())?;
                    summary.written += 1;
                }
                None => summary.skipped += 1,
            }
        }
    }

    writer.flush()?;
    info!(
        "wrote {} grabs to {} ({} rows skipped)",
        summary.written,
        config.output.display(),
        summary.skipped
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DUMP: &str = r#"<html><body>
<h3>#c</h3>
<table>
<tr><th>id</th><th>author(s)</th><th>quote</th><th>date</th><th>grabbed by</th></tr>
<tr><td>1</td><td>alice, bob</td><td>&lt;alice&gt; hi   &lt;bob&gt; hello</td><td>2020/01/15 Wed 12:00:00</td><td>carol</td></tr>
<tr><td>2</td><td>dave</td><td>* dave waves</td><td>2020/01/15 Wed 13:00:00</td><td>erin</td></tr>
</table>
<table><tr><td>x</td><td>x</td><td>x</td><td>x</td><td>x</td></tr></table>
<h3>##c</h3>
<table><tr><td>3</td><td>frank</td><td>&lt;frank&gt; ok</td><td>2021/06/01 Tue 08:30:00</td><td>gina</td></tr></table>
</body></html>"#;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_extract_channels_uses_first_table_per_heading() {
        let channels = extract_channels(DUMP);

        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].name, "#c");
        assert_eq!(channels[0].rows.len(), 3);
        assert_eq!(channels[0].rows[0], Vec::<String>::new());
        assert_eq!(
            channels[0].rows[1],
            cells(&["1", "alice, bob", "<alice> hi   <bob> hello", "2020/01/15 Wed 12:00:00", "carol"])
        );
        assert_eq!(channels[1].name, "##c");
        assert_eq!(channels[1].rows.len(), 1);
    }

    #[test]
    fn test_adjacent_headings_share_the_next_table() {
        let channels = extract_channels(
            "<h3>#a</h3><h3>#b</h3><table><tr><td>1</td></tr></table><h3>#c</h3>",
        );

        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].name, "#a");
        assert_eq!(channels[1].name, "#b");
        assert_eq!(channels[0].rows, vec![cells(&["1"])]);
        assert_eq!(channels[1].rows, vec![cells(&["1"])]);
    }

    #[test]
    fn test_rewrite_text() {
        assert_eq!(rewrite_text("<alice> hi there"), "hi there");
        assert_eq!(rewrite_text("* dave waves"), "/me waves");
        assert_eq!(rewrite_text("plain"), "plain");
        assert_eq!(rewrite_text("<> odd"), "<> odd");
    }

    #[test]
    fn test_rewrite_applies_once() {
        assert_eq!(rewrite_text("<a> <b> x"), "<b> x");
    }

    #[test]
    fn test_message_authors() {
        assert_eq!(message_authors("alice", "hi   <bob> hello"), vec!["alice", "bob"]);
        assert_eq!(message_authors("dave", "/me waves   * erin waves back"), vec!["dave", "erin"]);
        assert_eq!(message_authors("x", "one   no speaker here"), vec!["x"]);
    }

    #[test]
    fn test_parse_timestamp_is_local_seconds() {
        let noon = parse_timestamp("2020/01/15 Wed 12:00:00").unwrap();
        let one = parse_timestamp("2020/01/15 Wed 13:00:00").unwrap();
        assert_eq!(one - noon, 3600);
    }

    #[test]
    fn test_parse_timestamp_rejects_bad_dates() {
        assert!(matches!(
            parse_timestamp("2020-01-15 12:00"),
            Err(AppletError::Date { .. })
        ));
        assert!(matches!(
            parse_timestamp("2020/13/15 Wed 12:00:00"),
            Err(AppletError::Date { .. })
        ));
    }

    #[test]
    fn test_convert_row() {
        let row = convert_row(
            "#c",
            &cells(&["1", "alice, bob", "<alice> hi   <bob> hello", "2020/01/15 Wed 12:00:00", "carol"]),
        )
        .unwrap()
        .unwrap();

        assert_eq!(row.authors, vec!["alice", "bob"]);
        assert_eq!(row.text, "hi   <bob> hello");
        let record = row.to_record();
        assert_eq!(record[1], "alice+bob");
        assert_eq!(record[2], "#c");
        assert_eq!(record[3], "carol");
        assert_eq!(record[5], format!("{}.0", row.timestamp));
    }

    #[test]
    fn test_convert_row_skips_other_widths() {
        assert_eq!(convert_row("#c", &cells(&["a", "b"])).unwrap(), None);
        assert_eq!(convert_row("#c", &[]).unwrap(), None);
    }
}
