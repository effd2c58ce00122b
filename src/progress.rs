use std::io::Write;
use std::time::{Duration, Instant};

/// In-place progress line for enumerations whose total is unknown up
/// front. The reported total starts at one chunk and is pushed out by
/// another chunk whenever the count reaches it, so the line always shows a
/// moving estimate rather than a lie that hits 100% early.
pub struct DynamicProgress {
    label: String,
    current: usize,
    total: usize,
    chunk: usize,
    started: Instant,
    last_drawn: Option<Instant>,
}

const REDRAW_INTERVAL: Duration = Duration::from_millis(100);

impl DynamicProgress {
    pub fn new(label: impl Into<String>, chunk: usize) -> Self {
        let chunk = chunk.max(1);
        Self {
            label: label.into(),
            current: 0,
            total: chunk,
            chunk,
            started: Instant::now(),
            last_drawn: None,
        }
    }

    pub fn update(&mut self, amount: usize) {
        self.current += amount;
        while self.current >= self.total {
            self.total += self.chunk;
        }
        let due = self
            .last_drawn
            .map_or(true, |last| last.elapsed() >= REDRAW_INTERVAL);
        if due {
            self.draw();
            self.last_drawn = Some(Instant::now());
        }
    }

    /// Pins the total to the final count, draws the completed line, and
    /// returns how many items were counted.
    pub fn finish(mut self) -> usize {
        self.total = self.current;
        self.draw();
        eprintln!();
        self.current
    }

    fn draw(&self) {
        let elapsed = format_elapsed(self.started.elapsed(), 1);
        eprint!(
            "\r{}: {} / ~{} [{}]",
            self.label, self.current, self.total, elapsed
        );
        let _ = std::io::stderr().flush();
    }
}

/// Formats a duration as seconds, minutes, or hours with the given number
/// of fractional digits.
pub fn format_elapsed(elapsed: Duration, digits: usize) -> String {
    let seconds = elapsed.as_secs_f64();
    if seconds < 60.0 {
        format!("{seconds:.digits$}s")
    } else if seconds < 3600.0 {
        format!("{:.digits$}m", seconds / 60.0)
    } else {
        format!("{:.digits$}h", seconds / 3600.0)
    }
}
