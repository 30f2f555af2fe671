//! Font loading and WOFF2 serialization.
//!
//! A [`Font`] holds validated OpenType bytes together with the [`Flavor`] it
//! will be written as. Parsing is done by `read-fonts`, WOFF2 compression by
//! `ttf2woff2`, and optional glyph sanitizing by HarfBuzz's subsetter.
//!
//! # Example
//!
//! ```no_run
//! use woff2_batch_codec::{Flavor, Font};
//!
//! let mut font = Font::open("Inter-Regular.ttf").unwrap();
//! font.set_flavor(Flavor::Woff2);
//! font.save("Inter-Regular.woff2").unwrap();
//! ```

pub mod error;
pub mod sanitize;

use std::{
    fmt,
    fs::{read, write},
    path::Path,
    str::FromStr,
};

use log::debug;
use read_fonts::{FontRef, types::Tag};
use ttf2woff2::BrotliQuality;

pub use error::{Error, Result};
pub use sanitize::{PROBLEMATIC_CODEPOINTS, has_problematic_codepoints, subset_for_woff2};

/// Container format a [`Font`] is serialized as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Flavor {
    /// Plain OpenType/TrueType, written as loaded.
    #[default]
    Sfnt,
    /// Web Open Font Format 2.
    Woff2,
}

impl Flavor {
    /// File extension for fonts of this flavor, without the leading dot.
    ///
    /// `Sfnt` depends on the outline format, so the font data is consulted:
    /// CFF-flavored fonts are `otf`, everything else `ttf`.
    pub fn extension(self, data: &[u8]) -> &'static str {
        match self {
            Flavor::Woff2 => "woff2",
            Flavor::Sfnt if has_cff_outlines(data) => "otf",
            Flavor::Sfnt => "ttf",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flavor::Sfnt => f.write_str("sfnt"),
            Flavor::Woff2 => f.write_str("woff2"),
        }
    }
}

impl FromStr for Flavor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "woff2" => Ok(Flavor::Woff2),
            "sfnt" => Ok(Flavor::Sfnt),
            _ => Err(Error::UnknownFlavor(s.to_string())),
        }
    }
}

fn has_cff_outlines(data: &[u8]) -> bool {
    FontRef::new(data).is_ok_and(|font| {
        font.table_data(Tag::new(b"CFF ")).is_some() || font.table_data(Tag::new(b"CFF2")).is_some()
    })
}

/// An in-memory font ready to be serialized.
#[derive(Debug, Clone)]
pub struct Font {
    data: Vec<u8>,
    flavor: Flavor,
    sanitize: bool,
}

impl Font {
    /// Reads and parses a font file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = read(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        debug!("Read {} ({} bytes)", path.display(), data.len());
        Self::from_bytes(data)
    }

    /// Wraps raw font data, rejecting anything that is not an OpenType font.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        FontRef::new(&data)?;
        Ok(Self { data, flavor: Flavor::default(), sanitize: false })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn set_flavor(&mut self, flavor: Flavor) {
        self.flavor = flavor;
    }

    /// Drops [`PROBLEMATIC_CODEPOINTS`] before WOFF2 compression.
    ///
    /// Has no effect on `Sfnt` output or on fonts that do not map any of them.
    pub fn set_sanitize(&mut self, sanitize: bool) {
        self.sanitize = sanitize;
    }

    /// Extension of the serialized output, without the leading dot.
    pub fn extension(&self) -> &'static str {
        self.flavor.extension(&self.data)
    }

    /// Serializes the font according to its flavor.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match self.flavor {
            Flavor::Sfnt => Ok(self.data.clone()),
            Flavor::Woff2 => {
                if self.sanitize && has_problematic_codepoints(&self.data)? {
                    debug!("Removing problematic codepoints before compression");
                    let subset = subset_for_woff2(&self.data)?;
                    compress(&subset)
                } else {
                    compress(&self.data)
                }
            }
        }
    }

    /// Serializes the font and writes it to `path`, returning the number of
    /// bytes written.
    ///
    /// Nothing is written if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        write(path, &bytes).map_err(|source| Error::Write { path: path.to_path_buf(), source })?;
        debug!("Wrote {} ({} bytes, {})", path.display(), bytes.len(), self.flavor);
        Ok(bytes.len())
    }
}

fn compress(data: &[u8]) -> Result<Vec<u8>> {
    ttf2woff2::encode(data, BrotliQuality::default()).map_err(|e| Error::Compress(format!("{e:?}")))
}
