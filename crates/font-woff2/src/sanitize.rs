//! Glyph sanitizing ahead of WOFF2 compression.
//!
//! Some glyphs survive OpenType validation but are rejected by browsers once
//! the font is decoded from WOFF2. The functions here drop them by subsetting
//! the font to every mapped codepoint except [`PROBLEMATIC_CODEPOINTS`].

use hb_subset::{Blob, FontFace, SubsetInput, Tag};
use log::debug;
use read_fonts::{
    FontRef, ReadError, TableProvider,
    tables::cmap::{Cmap, CmapSubtable},
};

use crate::error::{Error, Result};

/// Codepoints known to cause WOFF2 OTS validation errors.
///
/// U+F8FF (Apple logo) references `.notdef` as a composite component,
/// which Chrome's OTS parser rejects during WOFF2 decompression.
pub const PROBLEMATIC_CODEPOINTS: &[u32] = &[0xF8FF];

/// Layout features to retain during subsetting.
const LAYOUT_FEATURES: &[&[u8; 4]] = &[
    b"aalt", b"ccmp", b"dlig", b"fwid", b"hwid", b"jp78", b"jp83", b"jp90", b"liga", b"locl",
    b"nlck", b"pwid", b"vert", b"vjmo", b"vrt2", b"halt", b"vhal", b"kern", b"mark", b"mkmk",
    b"calt", b"rvrn", b"ss01", b"ss02", b"ss03", b"ss04", b"ss05", b"ss06", b"ss07", b"ss08",
    b"ss09", b"ss10", b"ss11", b"ss12", b"ss20", b"dnom", b"numr", b"frac", b"ordn", b"sups",
    b"subs", b"sinf", b"case", b"zero",
];

/// Returns true if the font maps any of [`PROBLEMATIC_CODEPOINTS`].
///
/// A font without a cmap table maps nothing, so it has none.
pub fn has_problematic_codepoints(data: &[u8]) -> Result<bool> {
    let font = FontRef::new(data)?;
    let cmap = match font.cmap() {
        Ok(cmap) => cmap,
        Err(ReadError::TableIsMissing(_)) => return Ok(false),
        Err(e) => return Err(e.into()),
    };
    Ok(extract_codepoints(&cmap).iter().any(|cp| PROBLEMATIC_CODEPOINTS.contains(cp)))
}

/// Subsets font data excluding problematic codepoints.
///
/// Every codepoint mapped by the cmap is retained except
/// [`PROBLEMATIC_CODEPOINTS`]. The result is a plain OpenType font that can be
/// handed to the WOFF2 encoder.
pub fn subset_for_woff2(data: &[u8]) -> Result<Vec<u8>> {
    let codepoints = mapped_codepoints(data)?;
    if codepoints.is_empty() {
        return Err(Error::NoCodepoints);
    }

    let before = codepoints.len();
    let retained: Vec<char> = codepoints
        .into_iter()
        .filter(|cp| !PROBLEMATIC_CODEPOINTS.contains(cp))
        .filter_map(char::from_u32)
        .collect();
    debug!("Retaining {} of {before} codepoints", retained.len());

    let mut input = SubsetInput::new().map_err(subset_error)?;

    {
        let mut feature_set = input.layout_feature_tag_set();
        for tag in LAYOUT_FEATURES {
            feature_set.insert(Tag::new(*tag));
        }
    }

    {
        let mut unicode_set = input.unicode_set();
        for c in retained {
            unicode_set.insert(c);
        }
    }

    let blob = Blob::from_bytes(data).map_err(subset_error)?;
    let font_face = FontFace::new(blob).map_err(subset_error)?;
    let subset_font = input.subset_font(&font_face).map_err(subset_error)?;
    Ok(subset_font.underlying_blob().to_vec())
}

fn subset_error(e: impl std::fmt::Display) -> Error {
    Error::Subset(e.to_string())
}

fn mapped_codepoints(data: &[u8]) -> Result<Vec<u32>> {
    let font = FontRef::new(data)?;
    let cmap = font.cmap()?;
    Ok(extract_codepoints(&cmap))
}

/// Collects codepoints mapped to a real glyph.
///
/// Prefers a format 12 subtable (full Unicode) and falls back to format 4.
fn extract_codepoints(cmap: &Cmap) -> Vec<u32> {
    let subtables: Vec<CmapSubtable> = cmap
        .encoding_records()
        .iter()
        .filter_map(|record| record.subtable(cmap.offset_data()).ok())
        .collect();

    let preferred = subtables
        .iter()
        .find(|s| matches!(s, CmapSubtable::Format12(_)))
        .or_else(|| subtables.iter().find(|s| matches!(s, CmapSubtable::Format4(_))));

    let Some(subtable) = preferred else {
        return Vec::new();
    };

    let mut codepoints: Vec<u32> = subtable
        .iter()
        .filter(|(_, gid)| gid.to_u32() != 0)
        .map(|(cp, _)| cp)
        .collect();
    codepoints.sort_unstable();
    codepoints.dedup();
    codepoints
}


#[cfg(test)]
mod tests {
    use super::{fixtures::font_with_apple_logo, *};

    #[test]
    fn test_problematic_codepoints() {
        assert!(PROBLEMATIC_CODEPOINTS.contains(&0xF8FF));
    }

    #[test]
    fn test_extract_codepoints_skips_notdef() {
        let font = FontRef::new(font_test_data::VAZIRMATN_VAR).unwrap();
        let cmap = font.cmap().unwrap();
        let codepoints = extract_codepoints(&cmap);
        assert!(!codepoints.is_empty());
        assert!(codepoints.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_vazirmatn_has_no_problematic_codepoints() {
        assert!(!has_problematic_codepoints(font_test_data::VAZIRMATN_VAR).unwrap());
    }

    #[test]
    fn test_subset_for_woff2_produces_font() {
        let subset = subset_for_woff2(font_test_data::VAZIRMATN_VAR).unwrap();
        assert!(FontRef::new(&subset).is_ok());
        assert!(!has_problematic_codepoints(&subset).unwrap());
    }

    /// Table directory with no tables.
    const EMPTY_SFNT: &[u8] = &[0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];

    #[test]
    fn test_font_without_cmap_has_no_problematic_codepoints() {
        assert!(FontRef::new(EMPTY_SFNT).unwrap().cmap().is_err());
        assert!(!has_problematic_codepoints(EMPTY_SFNT).unwrap());
    }

    #[test]
    fn test_subset_removes_apple_logo() {
        let data = font_with_apple_logo();
        assert!(has_problematic_codepoints(&data).unwrap());

        let subset = subset_for_woff2(&data).unwrap();
        assert!(!has_problematic_codepoints(&subset).unwrap());
        let lowest = mapped_codepoints(&data).unwrap()[0];
        let cmap = FontRef::new(&subset).unwrap().cmap().unwrap();
        assert!(cmap.map_codepoint(lowest).is_some());
    }

    #[test]
    fn test_subset_rejects_garbage() {
        assert!(matches!(subset_for_woff2(b"not a font"), Err(Error::Parse(_))));
    }
}
