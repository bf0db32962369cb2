use std::{
    fs,
    io::{Read, Write},
    path::Path,
};

use anyhow::Context;
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

/// Read a file and return its contents gzipped.
pub fn compress(path: impl AsRef<Path>) -> anyhow::Result<Vec<u8>> {
    let path = path.as_ref();
    let data = fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let z = gzip(&data)
        .with_context(|| format!("failed to compress {}", path.display()))?;
    log::debug!(
        "compressed {}: {} -> {} bytes",
        path.display(),
        data.len(),
        z.len()
    );
    Ok(z)
}

/// Gzip a buffer with default settings.
///
/// The gzip header carries no file name and a zero timestamp, so the same
/// input always produces the same bytes.
pub fn gzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Inverse of [`gzip`].
pub fn gunzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut ret = Vec::new();
    GzDecoder::new(data).read_to_end(&mut ret)?;
    Ok(ret)
}
