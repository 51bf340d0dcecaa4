//! Transparent decompression for file sources.
//!
//! Detection checks the file name first and falls back to the leading bytes of
//! the stream, so a renamed `.gz` file still decodes. Each codec is behind its
//! own feature:
//! - **Gzip** (`.gz`) via `flate2` (feature `compression-gzip`)
//! - **Zstd** (`.zst`) via `zstd` (feature `compression-zstd`)
//! - **Bzip2** (`.bz2`) via `bzip2` (feature `compression-bzip2`)
//! - **Xz** (`.xz`) via `xz2` (feature `compression-xz`)
//!
//! Compressed streams are still tokenized chunk by chunk; the decoder simply
//! sits between the file and the tokenizer's reads.

use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Compression formats recognised on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    Gzip,
    Zstd,
    Bzip2,
    Xz,
}

impl Codec {
    /// Codecs compiled into this build.
    pub fn enabled() -> &'static [Codec] {
        &[
            #[cfg(feature = "compression-gzip")]
            Codec::Gzip,
            #[cfg(feature = "compression-zstd")]
            Codec::Zstd,
            #[cfg(feature = "compression-bzip2")]
            Codec::Bzip2,
            #[cfg(feature = "compression-xz")]
            Codec::Xz,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Codec::Gzip => "gzip",
            Codec::Zstd => "zstd",
            Codec::Bzip2 => "bzip2",
            Codec::Xz => "xz",
        }
    }

    /// Lowercase file suffixes, leading dot included.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Codec::Gzip => &[".gz", ".gzip"],
            Codec::Zstd => &[".zst", ".zstd"],
            Codec::Bzip2 => &[".bz2", ".bzip2"],
            Codec::Xz => &[".xz"],
        }
    }

    pub fn magic_bytes(self) -> &'static [u8] {
        match self {
            Codec::Gzip => &[0x1f, 0x8b],
            Codec::Zstd => &[0x28, 0xb5, 0x2f, 0xfd],
            Codec::Bzip2 => b"BZh",
            Codec::Xz => &[0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00],
        }
    }

    /// First enabled codec whose suffix matches `path`, case-insensitively.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Codec> {
        let name = path.as_ref().to_string_lossy().to_lowercase();
        Self::enabled()
            .iter()
            .copied()
            .find(|c| c.extensions().iter().any(|ext| name.ends_with(ext)))
    }

    /// First enabled codec whose signature starts `head`.
    pub fn from_magic(head: &[u8]) -> Option<Codec> {
        Self::enabled()
            .iter()
            .copied()
            .find(|c| head.starts_with(c.magic_bytes()))
    }

    /// Wrap `reader` in this codec's decoder.
    pub fn decoder<'r>(self, reader: impl Read + 'r) -> std::io::Result<Box<dyn Read + 'r>> {
        match self {
            #[cfg(feature = "compression-gzip")]
            Codec::Gzip => Ok(Box::new(flate2::read::MultiGzDecoder::new(reader))),
            #[cfg(feature = "compression-zstd")]
            Codec::Zstd => Ok(Box::new(zstd::stream::read::Decoder::new(reader)?)),
            #[cfg(feature = "compression-bzip2")]
            Codec::Bzip2 => Ok(Box::new(bzip2::read::MultiBzDecoder::new(reader))),
            #[cfg(feature = "compression-xz")]
            Codec::Xz => Ok(Box::new(xz2::read::XzDecoder::new_multi_decoder(reader))),
            #[allow(unreachable_patterns)]
            other => Err(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                format!("{} support is not compiled in", other.name()),
            )),
        }
    }
}

/// Wrap `reader` with a decoder when `path_hint` or the stream's first bytes
/// identify a compressed format; otherwise return it buffered as-is.
pub fn auto_detect_reader<R: Read + 'static>(
    reader: R,
    path_hint: impl AsRef<Path>,
) -> Result<Box<dyn Read>> {
    if let Some(codec) = Codec::from_path(&path_hint) {
        return codec
            .decoder(reader)
            .with_context(|| format!("wrap reader with {} codec", codec.name()));
    }

    let mut buffered = BufReader::new(reader);
    let head = buffered.fill_buf().context("peek stream header")?;
    if let Some(codec) = Codec::from_magic(head) {
        return codec
            .decoder(buffered)
            .with_context(|| format!("wrap reader with {} codec", codec.name()));
    }
    Ok(Box::new(buffered))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        let mut out = String::new();
        auto_detect_reader(&b"a,b\n"[..], "data.csv")
            .unwrap()
            .read_to_string(&mut out)
            .unwrap();
        assert_eq!(out, "a,b\n");
    }

    #[cfg(feature = "compression-gzip")]
    #[test]
    fn suffix_match_ignores_case() {
        assert_eq!(Codec::from_path("DATA.CSV.GZ"), Some(Codec::Gzip));
        assert_eq!(Codec::from_path("data.csv"), None);
    }
}
