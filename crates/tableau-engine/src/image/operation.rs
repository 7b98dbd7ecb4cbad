use std::fmt;
use std::sync::mpsc;

use crate::coords::Size;

/// A single recorded image operation.
///
/// `Display` renders the canonical log line, e.g. `DRAW: 64x64 at (100,100)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Raster decoded from `source` at its original size.
    Read { source: String, size: Size },
    /// Buffer resized right after a read.
    Resize { from: Size, to: Size },
    /// This image was drawn onto another one.
    Draw { size: Size, x: i32, y: i32 },
    /// Another image of `size` was drawn onto this one.
    DrawnOn { size: Size, x: i32, y: i32 },
    /// Text annotation.
    Text { text: String, x: i32, y: i32, font_size: f32 },
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Read { source, size } => write!(f, "READ: {source} ({size})"),
            Operation::Resize { from, to } => write!(f, "RESIZE: {from} -> {to}"),
            Operation::Draw { size, x, y } => write!(f, "DRAW: {size} at ({x},{y})"),
            Operation::DrawnOn { size, x, y } => write!(f, "DRAWN_ON: {size} at ({x},{y})"),
            Operation::Text { text, x, y, font_size } => {
                write!(f, "TEXT: '{text}' at ({x},{y}) size={}", FontSize(*font_size))
            }
        }
    }
}

/// Prints whole sizes with one decimal (`1.0`), others in shortest form (`2.5`).
struct FontSize(f32);

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
            write!(f, "{v:.1}")
        } else {
            write!(f, "{v}")
        }
    }
}

/// Receiver of operation events, in the order they are performed.
///
/// Attach one with [`Image::with_sink`](super::Image::with_sink) to observe an
/// image without polling its log.
pub trait OperationSink {
    fn record(&mut self, op: &Operation);
}

impl<F> OperationSink for F
where
    F: FnMut(&Operation),
{
    #[inline]
    fn record(&mut self, op: &Operation) {
        self(op)
    }
}

impl OperationSink for mpsc::Sender<Operation> {
    fn record(&mut self, op: &Operation) {
        // A dropped receiver just means nobody is listening anymore.
        let _ = self.send(op.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_and_resize_lines() {
        let read = Operation::Read { source: "test.jpg".into(), size: Size::new(800, 600) };
        let resize = Operation::Resize { from: Size::new(800, 600), to: Size::new(200, 150) };
        assert_eq!(read.to_string(), "READ: test.jpg (800x600)");
        assert_eq!(resize.to_string(), "RESIZE: 800x600 -> 200x150");
    }

    #[test]
    fn draw_lines() {
        let size = Size::new(64, 48);
        let draw = Operation::Draw { size, x: 100, y: 200 };
        assert_eq!(draw.to_string(), "DRAW: 64x48 at (100,200)");
        assert_eq!(
            Operation::DrawnOn { size, x: 100, y: 200 }.to_string(),
            "DRAWN_ON: 64x48 at (100,200)"
        );
    }

    #[test]
    fn text_size_keeps_decimal_point() {
        let op = |font_size| Operation::Text {
            text: "Hello World".into(),
            x: 50,
            y: 100,
            font_size,
        };
        assert_eq!(op(2.5).to_string(), "TEXT: 'Hello World' at (50,100) size=2.5");
        assert_eq!(op(1.0).to_string(), "TEXT: 'Hello World' at (50,100) size=1.0");
        assert_eq!(op(2.0).to_string(), "TEXT: 'Hello World' at (50,100) size=2.0");
        assert_eq!(op(1.5).to_string(), "TEXT: 'Hello World' at (50,100) size=1.5");
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        {
            let mut sink = |op: &Operation| seen.push(op.to_string());
            sink.record(&Operation::Resize { from: Size::new(1, 1), to: Size::new(2, 2) });
        }
        assert_eq!(seen, vec!["RESIZE: 1x1 -> 2x2".to_string()]);
    }

    #[test]
    fn sender_sink_survives_dropped_receiver() {
        let (mut tx, rx) = mpsc::channel();
        drop(rx);
        tx.record(&Operation::Resize { from: Size::new(1, 1), to: Size::new(2, 2) });
    }
}
