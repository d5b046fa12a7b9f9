/*!
Output sinks.

Any [`embedded_io::Write`] implementation can receive flushed CBOR. With the
`std` feature, [`FromStd`] adapts a [`std::io::Write`] implementation.
*/

pub use embedded_io::{Error, ErrorKind, ErrorType, Write};

/// Adapts a `std::io::Write` implementation into a sink.
#[cfg(feature = "std")]
#[derive(Debug, Default, Clone)]
pub struct FromStd<W> {
    inner: W,
}

#[cfg(feature = "std")]
impl<W> FromStd<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &W {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<W> ErrorType for FromStd<W> {
    type Error = std::io::Error;
}

#[cfg(feature = "std")]
impl<W> Write for FromStd<W>
where
    W: std::io::Write,
{
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        // A full writer reports Ok(0), which the sink contract reserves for empty buffers
        match self.inner.write(buf)? {
            0 if !buf.is_empty() => Err(std::io::ErrorKind::WriteZero.into()),
            n => Ok(n),
        }
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush()
    }
}
