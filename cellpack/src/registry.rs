use crate::{error::PackError, types::Entry};

/// Collects named rectangles and packs them into a single canvas.
///
/// Entries are kept in the order they were added, which is also the order
/// used to break ties between entries of equal height while packing. The
/// registry survives any number of calls to [`pack`](#method.pack) until it
/// is [cleared](#method.clear).
#[derive(Debug)]
pub struct RectanglePacker<'a, T: ?Sized> {
    pub(crate) entries: Vec<Entry<'a, T>>,
    pub(crate) max_width: u32,
    pub(crate) max_height: Option<u32>,
    pub(crate) max_trials: Option<u32>,
}

impl<'a, T: ?Sized> RectanglePacker<'a, T> {
    pub fn new(max_width: u32) -> Self {
        Self {
            entries: Vec::new(),
            max_width,
            max_height: None,
            max_trials: None,
        }
    }

    /// Stops the search once the canvas would have to grow past this height.
    pub fn max_height(mut self, max_height: u32) -> Self {
        self.max_height = Some(max_height);
        self
    }

    /// Stops the search after this many trial canvases, keeping the best
    /// packing found so far.
    pub fn max_trials(mut self, max_trials: u32) -> Self {
        self.max_trials = Some(max_trials);
        self
    }

    pub fn set_max_width(&mut self, max_width: u32) {
        self.max_width = max_width;
    }

    #[inline]
    pub fn max_width(&self) -> u32 {
        self.max_width
    }

    /// Registers a rectangle to be placed by the next call to `pack`.
    ///
    /// The rectangle is refused if either side is zero, if it could never fit
    /// within the configured canvas limits, or if `key` is already taken. A
    /// refused rectangle leaves the packer untouched.
    pub fn add_rectangle<K: Into<String>>(
        &mut self,
        key: K,
        size: (u32, u32),
        payload: &'a T,
    ) -> Result<(), PackError> {
        let key = key.into();

        if size.0 == 0 || size.1 == 0 {
            return Err(PackError::ZeroSize {
                key,
                width: size.0,
                height: size.1,
            });
        }

        if self.entries.iter().any(|entry| entry.key == key) {
            return Err(PackError::DuplicateKey { key });
        }

        let entry = Entry { key, size, payload };
        self.check_limits(&entry)?;

        log::trace!("Added rectangle {} ({}x{})", entry.key, size.0, size.1);
        self.entries.push(entry);

        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[Entry<'a, T>] {
        &self.entries
    }

    /// The summed area of every registered rectangle. No packing can use a
    /// smaller canvas than this.
    pub fn total_area(&self) -> u64 {
        self.entries.iter().map(Entry::area).sum()
    }

    pub(crate) fn check_limits(&self, entry: &Entry<'a, T>) -> Result<(), PackError> {
        if entry.size.0 > self.max_width {
            return Err(PackError::TooWide {
                key: entry.key.clone(),
                width: entry.size.0,
                max_width: self.max_width,
            });
        }

        if let Some(max_height) = self.max_height {
            if entry.size.1 > max_height {
                return Err(PackError::TooTall {
                    key: entry.key.clone(),
                    height: entry.size.1,
                    max_height,
                });
            }
        }

        Ok(())
    }
}
