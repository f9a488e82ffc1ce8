//! The line protocol toward the consuming bar host.
//!
//! The output stream is one unbounded JSON array, appended to one line at a
//! time: a header object, the opening bracket, an empty array (so the stream
//! is well-formed even if no frame ever follows), then one `,`-prefixed frame
//! per cycle. Input from the host is one JSON click-event object per line.

use std::io::Write;

use anyhow::Result;
use barpipe_shared_util::Block;
use serde::{Deserialize, Serialize};

pub const PROTOCOL_VERSION: u32 = 1;

/// The one-off header line declaring protocol version and click-event support.
#[derive(Debug, Clone, Serialize)]
pub struct Header {
    pub version: u32,
    pub click_events: bool,
}

impl Default for Header {
    fn default() -> Self {
        Header { version: PROTOCOL_VERSION, click_events: true }
    }
}

/// A click notification sent back by the bar host.
#[derive(Debug, Clone, Deserialize)]
pub struct ClickEvent {
    pub name: Option<String>,
    pub instance: Option<String>,
    pub button: Option<u32>,
    pub x: Option<i32>,
    pub y: Option<i32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Writes the append-only frame stream, one flushed line at a time.
pub struct FeedWriter<W: Write> {
    out: W,
}

impl<W: Write> FeedWriter<W> {
    pub fn new(out: W) -> Self {
        FeedWriter { out }
    }

    pub fn write_header(&mut self, header: &Header) -> Result<()> {
        writeln!(self.out, "{}", serde_json::to_string(header)?)?;
        self.out.flush()?;
        Ok(())
    }

    /// The opening-array marker sequence: a `[` line, then an `[]` line.
    pub fn write_preamble(&mut self) -> Result<()> {
        writeln!(self.out, "[")?;
        writeln!(self.out, "[]")?;
        self.out.flush()?;
        Ok(())
    }

    pub fn write_frame(&mut self, frame: &[Block]) -> Result<()> {
        writeln!(self.out, ",{}", serde_json::to_string(frame)?)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Decode one input line from the bar host.
///
/// Empty lines and the opening-array line are startup artifacts, not data.
/// Undecodable lines are logged and dropped; the host's input never gets to
/// break the poll cycle.
pub fn decode_input_line(line: &str) -> Option<ClickEvent> {
    let line = line.trim();
    if line.is_empty() || line == "[" {
        return None;
    }
    let line = line.trim_matches(',');
    match serde_json::from_str(line) {
        Ok(event) => Some(event),
        Err(err) => {
            log::debug!("discarding undecodable input line: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::{decode_input_line, FeedWriter, Header};
    use barpipe_shared_util::Block;
    use pretty_assertions::assert_eq;

    #[test]
    fn header_line_is_stable() {
        let mut buf = Vec::new();
        FeedWriter::new(&mut buf).write_header(&Header::default()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\"version\":1,\"click_events\":true}\n");
    }

    #[test]
    fn stream_is_one_valid_unbounded_json_array() {
        let mut buf = Vec::new();
        {
            let mut feed = FeedWriter::new(&mut buf);
            feed.write_header(&Header::default()).unwrap();
            feed.write_preamble().unwrap();
            feed.write_frame(&[Block::text("12:00")]).unwrap();
            feed.write_frame(&[]).unwrap();
            feed.write_frame(&[Block::text("12:01"), Block::text("volume 20%")]).unwrap();
        }

        let stream = String::from_utf8(buf).unwrap();
        let mut lines = stream.lines();
        assert!(lines.next().unwrap().starts_with('{'));
        assert_eq!(lines.next().unwrap(), "[");
        assert_eq!(lines.next().unwrap(), "[]");

        // Every frame line is valid JSON once the leading comma is stripped,
        // and the whole tail re-wraps into one array.
        let mut elements = vec!["[]".to_string()];
        for line in lines {
            let stripped = line.strip_prefix(',').unwrap();
            serde_json::from_str::<serde_json::Value>(stripped).unwrap();
            elements.push(stripped.to_string());
        }
        let wrapped = format!("[{}]", elements.join(","));
        let parsed: serde_json::Value = serde_json::from_str(&wrapped).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 4);
    }

    #[test]
    fn startup_artifacts_are_not_data() {
        assert!(decode_input_line("").is_none());
        assert!(decode_input_line("   ").is_none());
        assert!(decode_input_line("[").is_none());
    }

    #[test]
    fn click_events_decode_with_and_without_leading_comma() {
        let event = decode_input_line(r#",{"name":"clock","instance":"clock-0","button":1,"x":10,"y":4}"#).unwrap();
        assert_eq!(event.name.as_deref(), Some("clock"));
        assert_eq!(event.button, Some(1));

        let event = decode_input_line(r#"{"name":"volume"}"#).unwrap();
        assert_eq!(event.name.as_deref(), Some("volume"));
        assert_eq!(event.button, None);
    }

    #[test]
    fn unknown_click_keys_are_tolerated() {
        let event = decode_input_line(r#"{"name":"clock","relative_x":3,"modifiers":["Shift"]}"#).unwrap();
        assert_eq!(event.extra["relative_x"], serde_json::json!(3));
    }

    #[test]
    fn garbage_lines_are_dropped() {
        assert!(decode_input_line("not json").is_none());
        assert!(decode_input_line(r#"{"name": unterminated"#).is_none());
    }
}
