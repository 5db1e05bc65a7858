use std::cell::OnceCell;
use std::fmt::Debug;

/// A derived value which is computed on first access and kept for the
/// lifetime of its owner. Owners are immutable, so it is never invalidated.
pub struct Memo<T> {
    cell: OnceCell<T>,
}

impl<T> Memo<T> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Create an already-filled cell, for values known at construction.
    #[inline]
    pub fn filled(value: T) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(value);
        Self { cell }
    }

    #[inline]
    pub fn get_or_init<F: FnOnce() -> T>(&self, f: F) -> &T {
        self.cell.get_or_init(f)
    }

    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Memo<T> {
    fn clone(&self) -> Self {
        match self.cell.get() {
            Some(value) => Memo::filled(value.clone()),
            None => Memo::new(),
        }
    }
}

impl<T: Debug> Debug for Memo<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.cell.get() {
            Some(inner) => write!(f, "Memo::Some({:?})", inner),
            None => write!(f, "Memo::None"),
        }
    }
}
