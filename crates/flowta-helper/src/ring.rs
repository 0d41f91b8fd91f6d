//! Fixed-capacity circular buffer.

/// Circular buffer that overwrites its oldest value once full.
#[derive(Debug, Clone)]
pub struct Ring<T> {
    buffer: Vec<Option<T>>,
    begin: usize,
    end: usize,
    empty: bool,
}

impl<T> Ring<T> {
    /// Create an empty ring holding at most `capacity` values.
    pub fn new(capacity: usize) -> Self {
        let mut buffer = Vec::with_capacity(capacity);
        buffer.resize_with(capacity, || None);
        Self {
            buffer,
            begin: 0,
            end: 0,
            empty: true,
        }
    }

    /// Store a value, returning the evicted oldest value when the ring was
    /// already full.
    pub fn put(&mut self, value: T) -> Option<T> {
        if self.buffer.is_empty() {
            return Some(value);
        }

        let evicted = if self.is_full() {
            self.begin = self.next(self.begin);
            self.buffer[self.end].take()
        } else {
            None
        };

        self.buffer[self.end] = Some(value);
        self.end = self.next(self.end);
        self.empty = false;

        evicted
    }

    /// Remove and return the oldest value.
    pub fn get(&mut self) -> Option<T> {
        if self.empty {
            return None;
        }

        let value = self.buffer[self.begin].take();
        self.begin = self.next(self.begin);
        self.empty = self.begin == self.end;

        value
    }

    /// Value at logical position `index`, 0 being the oldest.
    pub fn at(&self, index: usize) -> Option<&T> {
        if index >= self.len() {
            return None;
        }
        self.buffer[(self.begin + index) % self.buffer.len()].as_ref()
    }

    /// Number of values held.
    pub fn len(&self) -> usize {
        if self.empty {
            0
        } else if self.end > self.begin {
            self.end - self.begin
        } else {
            self.buffer.len() - self.begin + self.end
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.buffer.is_empty() || (!self.empty && self.begin == self.end)
    }

    /// Iterate from the oldest to the newest value.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (0..self.len()).filter_map(move |i| self.at(i))
    }

    #[inline]
    fn next(&self, index: usize) -> usize {
        (index + 1) % self.buffer.len()
    }
}
