use heapless::Deque;

use crate::sample::Sample;

/// Number of samples driving one computation pass.
pub const WINDOW_CAPACITY: usize = 50;

/// Fixed-capacity FIFO of the most recent samples.
///
/// The window fills until it holds `WINDOW_CAPACITY` samples. From then on
/// every push evicts the oldest sample before admitting the new one, so the
/// length stays at capacity.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: Deque<Sample, WINDOW_CAPACITY>,
}

impl SampleWindow {
    pub const fn new() -> Self {
        Self {
            samples: Deque::new(),
        }
    }

    /// Admit a sample and report whether the window is full afterwards,
    /// i.e. whether a computation pass is due.
    pub fn push(&mut self, sample: Sample) -> bool {
        if self.samples.is_full() {
            self.samples.pop_front();
        }
        // A slot is always free at this point.
        self.samples.push_back(sample).ok();
        self.samples.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.samples.is_full()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.front()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Contiguous copy of the current contents, oldest first.
    pub fn snapshot(&self) -> heapless::Vec<Sample, WINDOW_CAPACITY> {
        self.samples.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self::new()
    }
}
