const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Braille spinner for the status line. Advances only while a run is
/// in flight.
#[derive(Debug, Default)]
pub struct Spinner {
    frame: usize,
    running: bool,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_running(&mut self, running: bool) {
        if self.running != running {
            self.running = running;
            self.frame = 0;
        }
    }

    /// Advances one frame; true when the glyph changed.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.frame = (self.frame + 1) % FRAMES.len();
        true
    }

    pub fn glyph(&self) -> &'static str {
        FRAMES[self.frame]
    }
}
