use super::*;

/// A buffered CBOR encoder that owns its output sink.
///
/// Items accumulate in memory until [`flush`](Self::flush) hands the whole
/// buffer to the sink. A `StreamEncoder` is not meant to be shared between
/// threads; the [`EncMode`] it borrows can be.
pub struct StreamEncoder<'m, W> {
    encoder: Encoder<'m>,
    sink: W,
}

impl<'m, W> StreamEncoder<'m, W>
where
    W: io::Write,
{
    pub fn new(mode: &'m EncMode, sink: W) -> Self {
        Self {
            encoder: Encoder::new(mode),
            sink,
        }
    }

    pub fn mode(&self) -> &'m EncMode {
        self.encoder.mode()
    }

    /// Access to the underlying encoder, for marshaling code written against
    /// [`Encoder`].
    pub fn encoder(&mut self) -> &mut Encoder<'m> {
        &mut self.encoder
    }

    /// Bytes written since the last flush.
    pub fn buffered(&self) -> &[u8] {
        self.encoder.as_bytes()
    }

    pub fn encode_array_head(&mut self, count: u64) {
        self.encoder.encode_array_head(count)
    }

    pub fn encode_map_head(&mut self, count: u64) {
        self.encoder.encode_map_head(count)
    }

    pub fn encode_tag_head(&mut self, tag: u64) {
        self.encoder.encode_tag_head(tag)
    }

    pub fn encode_raw_slice(&mut self, data: &[u8]) {
        self.encoder.encode_raw_slice(data)
    }

    pub fn encode<T>(&mut self, value: &T)
    where
        T: ToCbor + ?Sized,
    {
        self.encoder.encode(value)
    }

    pub fn encode_tagged<T>(&mut self, tag: u64, value: &T)
    where
        T: ToCbor + ?Sized,
    {
        self.encoder.encode_tagged(tag, value)
    }

    /// Writes everything buffered to the sink, returning the number of bytes
    /// the sink accepted.
    ///
    /// The sink always sees at least one `write`, with an empty slice if
    /// nothing is buffered. Short writes are continued until the sink accepts
    /// the rest or reports `Ok(0)`, in which case the returned count is less
    /// than what was buffered.
    ///
    /// The buffer is emptied whether or not the write succeeds, so after an
    /// error the sink may hold a partial transmission. Sink errors are
    /// returned unchanged and never retried.
    pub fn flush(&mut self) -> Result<usize, W::Error> {
        let len = self.encoder.offset();
        let r = write_buffer(&mut self.sink, self.encoder.as_bytes());
        self.encoder.clear();

        match &r {
            Ok(written) if *written == len => tracing::trace!("Flushed {len} bytes of CBOR"),
            Ok(written) => {
                tracing::debug!("Sink stopped accepting CBOR after {written} of {len} bytes")
            }
            Err(e) => tracing::debug!("Failed to flush {len} bytes of CBOR: {e:?}"),
        }
        r
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    /// Returns the sink, discarding anything not yet flushed.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

fn write_buffer<W>(sink: &mut W, buf: &[u8]) -> Result<usize, W::Error>
where
    W: io::Write,
{
    let mut written = sink.write(buf)?;
    while written < buf.len() {
        match sink.write(&buf[written..])? {
            0 => break,
            n => written += n,
        }
    }
    Ok(written)
}
