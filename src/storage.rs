//! Persistent storage seam.
//!
//! Every operation is a complete open, write, close cycle: implementations
//! must not keep a file handle between calls, so a row that was accepted is
//! already flushed when the call returns.

use core::fmt::Debug;

pub trait Storage {
    type Error: Debug;

    /// Whether a file with this name already exists.
    fn exists(&mut self, name: &str) -> Result<bool, Self::Error>;

    /// Create the file (replacing any previous content) holding `contents`.
    fn create(&mut self, name: &str, contents: &[u8]) -> Result<(), Self::Error>;

    /// Append `contents` to an existing file.
    fn append(&mut self, name: &str, contents: &[u8]) -> Result<(), Self::Error>;
}

impl<T: Storage + ?Sized> Storage for &mut T {
    type Error = T::Error;

    fn exists(&mut self, name: &str) -> Result<bool, Self::Error> {
        (**self).exists(name)
    }

    fn create(&mut self, name: &str, contents: &[u8]) -> Result<(), Self::Error> {
        (**self).create(name, contents)
    }

    fn append(&mut self, name: &str, contents: &[u8]) -> Result<(), Self::Error> {
        (**self).append(name, contents)
    }
}
