//! Rotating tips shown while an analysis is running
//!
//! Only the index arithmetic lives here. The timer that drives it belongs to
//! the shell.

/// Funneling reminders shown by default.
pub const DEFAULT_SLIDES: [&str; 5] = [
    "Start broad: a Thinking question lets the merchant tell their story.",
    "Stack Explore questions to dig into the details before moving on.",
    "Narrow and confirm: play back what you heard and check it is right.",
    "Close each funnel with a Sweeper: \"Is there anything else?\"",
    "Tie every pain to a motivation, then ask for a commitment.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// A move from one slide to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideChange {
    pub previous: usize,
    pub current: usize,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    slides: Vec<String>,
    index: usize,
}

impl Carousel {
    pub fn new<I, S>(slides: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            slides: slides.into_iter().map(Into::into).collect(),
            index: 0,
        }
    }

    pub fn with_default_slides() -> Self {
        Self::new(DEFAULT_SLIDES)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&str> {
        self.slides.get(self.index).map(String::as_str)
    }

    /// Jump to `index`, wrapping in both directions. `None` when there are no slides.
    pub fn show(&mut self, index: isize, direction: Direction) -> Option<SlideChange> {
        if self.slides.is_empty() {
            return None;
        }
        let previous = self.index;
        self.index = index.rem_euclid(self.slides.len() as isize) as usize;
        Some(SlideChange {
            previous,
            current: self.index,
            direction,
        })
    }

    pub fn next(&mut self) -> Option<SlideChange> {
        self.show(self.index as isize + 1, Direction::Next)
    }

    pub fn previous(&mut self) -> Option<SlideChange> {
        self.show(self.index as isize - 1, Direction::Previous)
    }
}

impl Default for Carousel {
    fn default() -> Self {
        Self::with_default_slides()
    }
}
