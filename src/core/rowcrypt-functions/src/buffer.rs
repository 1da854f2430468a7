//! Nullable borrowed byte buffers.

/// A borrowed, possibly-null view of bytes supplied by the caller.
///
/// Null and zero-length are distinct states. Most functions treat both as
/// "no content", but `md5` hashes an empty buffer and rejects a null one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ByteBuffer<'a> {
    data: Option<&'a [u8]>,
}

impl<'a> ByteBuffer<'a> {
    /// The null buffer.
    pub const fn null() -> Self {
        Self { data: None }
    }

    /// A non-null buffer over `data`, which may be empty.
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data: Some(data) }
    }

    /// Returns true if the buffer is null.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.data.is_none()
    }

    /// Returns true if the buffer is null or has no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of bytes; zero for null.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.map_or(0, <[u8]>::len)
    }

    /// The bytes, or `None` if null.
    #[inline]
    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        self.data
    }

    /// The bytes, or `None` if null or empty.
    #[inline]
    pub fn content(&self) -> Option<&'a [u8]> {
        self.data.filter(|d| !d.is_empty())
    }
}

impl<'a> From<&'a [u8]> for ByteBuffer<'a> {
    fn from(data: &'a [u8]) -> Self {
        Self::new(data)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for ByteBuffer<'a> {
    fn from(data: &'a [u8; N]) -> Self {
        Self::new(data)
    }
}

impl<'a> From<&'a str> for ByteBuffer<'a> {
    fn from(data: &'a str) -> Self {
        Self::new(data.as_bytes())
    }
}

impl<'a> From<&'a Vec<u8>> for ByteBuffer<'a> {
    fn from(data: &'a Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl<'a> From<Option<&'a [u8]>> for ByteBuffer<'a> {
    fn from(data: Option<&'a [u8]>) -> Self {
        Self { data }
    }
}
