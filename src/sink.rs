//! Presentation sinks used by the `phyta` binary.

use phyta_core::PresentationSink;
use phyta_data::{Color, OrganismId, Position, WorldEvent};
use serde_json::{json, Value};
use std::io::Write;

/// Writes every event to the log at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl PresentationSink for LogSink {
    fn on_create(&mut self, id: OrganismId, position: Position, color: Color) {
        tracing::debug!(%id, %position, color = %color.to_hex(), "create");
    }

    fn on_destroy(&mut self, id: OrganismId, position: Position) {
        tracing::debug!(%id, %position, "destroy");
    }
}

/// One JSON object per event, newline separated.
///
/// Full events carry parent, cause and tick. The bare `on_create` and
/// `on_destroy` callbacks only know id, position and colour, so their
/// records hold just those fields.
///
/// Write failures are logged once and further output is dropped.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: u64,
    failed: bool,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            written: 0,
            failed: false,
        }
    }

    /// Events successfully written so far.
    #[must_use]
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_record(&mut self, record: &Value) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn emit(&mut self, record: serde_json::Result<Value>) {
        if self.failed {
            return;
        }
        match record.map_err(anyhow::Error::from).and_then(|r| self.write_record(&r)) {
            Ok(()) => self.written += 1,
            Err(e) => {
                tracing::error!(error = %e, "event output failed, disabling sink");
                self.failed = true;
            }
        }
    }
}

impl<W: Write> PresentationSink for JsonLinesSink<W> {
    fn on_create(&mut self, id: OrganismId, position: Position, color: Color) {
        self.emit(Ok(json!({
            "event": "Created",
            "id": id,
            "position": position,
            "color": color.to_hex(),
        })));
    }

    fn on_destroy(&mut self, id: OrganismId, position: Position) {
        self.emit(Ok(json!({
            "event": "Destroyed",
            "id": id,
            "position": position,
        })));
    }

    fn on_event(&mut self, event: &WorldEvent) {
        self.emit(serde_json::to_value(event));
    }

    fn flush(&mut self) {
        if !self.failed {
            if let Err(e) = self.writer.flush() {
                tracing::error!(error = %e, "event output flush failed");
                self.failed = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phyta_core::dispatch;
    use phyta_data::DeathCause;

    #[test]
    fn test_json_lines_one_per_event() {
        let events = vec![
            WorldEvent::Created {
                id: OrganismId(1),
                position: Position::new(2, 3),
                color: Color::TEAL,
                parent: Some(OrganismId(0)),
                tick: 4,
            },
            WorldEvent::Destroyed {
                id: OrganismId(0),
                position: Position::new(2, 2),
                cause: DeathCause::Exhausted,
                tick: 4,
            },
        ];
        let mut sink = JsonLinesSink::new(Vec::new());
        dispatch(&events, &mut sink);
        assert_eq!(sink.written(), 2);

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["event"], "Created");
        assert_eq!(first["color"], "#6abbd3");
        assert_eq!(first["parent"], 0);
        let second: WorldEvent = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second, events[1]);
    }

    #[test]
    fn test_bare_callbacks_omit_unknown_fields() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.on_create(OrganismId(3), Position::new(1, 2), Color::TEAL);
        sink.on_destroy(OrganismId(3), Position::new(1, 2));
        assert_eq!(sink.written(), 2);

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines[0]["event"], "Created");
        assert_eq!(lines[0]["id"], 3);
        assert_eq!(lines[0]["color"], "#6abbd3");
        for record in &lines {
            assert!(record.get("tick").is_none());
            assert!(record.get("parent").is_none());
            assert!(record.get("cause").is_none());
        }
        assert_eq!(lines[1]["event"], "Destroyed");
        assert_eq!(lines[1]["position"], lines[0]["position"]);
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_disables_sink() {
        let mut sink = JsonLinesSink::new(Broken);
        sink.on_create(OrganismId(0), Position::new(0, 0), Color::TEAL);
        sink.on_destroy(OrganismId(0), Position::new(0, 0));
        assert_eq!(sink.written(), 0);
    }
}
