// Copyright 2025 VersionUp Contributors (https://github.com/versionup/versionup)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Versioned-filename arithmetic.
//!
//! Project files carry a `.vNNN` token before the extension
//! (`shot010.v002.nk`). Bumping a name increments that token by one and
//! re-pads it to at least three digits; names without a token get a fresh
//! `.v001` inserted before the extension.

use regex::Regex;
use std::path::{Path, PathBuf};

/// Matches `(stem)(.v)(digits)(.ext)` at the end of a file name.
///
/// The lazy stem group makes the match bind to the last `.v<digits>` token
/// that still leaves a single-segment extension behind it.
fn version_token_regex() -> Regex {
    Regex::new(r"(?i)^(.+?)(\.v)(\d+)(\.[^.]+)$").unwrap()
}

/// A file name split around its `.vNNN` version token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedName {
    /// Text before the version marker.
    pub stem: String,
    /// The `.v` marker exactly as written (case preserved).
    pub marker: String,
    /// Parsed version number.
    pub number: u64,
    /// Extension including its leading dot.
    pub ext: String,
}

impl VersionedName {
    /// Parse a file name into its version-token parts.
    ///
    /// The `.v` marker is matched case-insensitively. Returns `None` when the
    /// name has no token, or when the digit run does not fit a `u64`.
    pub fn parse(file_name: &str) -> Option<Self> {
        let captures = version_token_regex().captures(file_name)?;
        let number = captures[3].parse::<u64>().ok()?;
        Some(Self {
            stem: captures[1].to_string(),
            marker: captures[2].to_string(),
            number,
            ext: captures[4].to_string(),
        })
    }

    /// The name with the version number incremented by one.
    ///
    /// Numbers are re-padded to at least three digits; wider numbers keep
    /// their natural width (`v999` becomes `v1000`).
    pub fn bumped(&self) -> String {
        format!(
            "{}{}{:03}{}",
            self.stem,
            self.marker,
            self.number.saturating_add(1),
            self.ext
        )
    }
}

/// Split a file name into stem and extension.
///
/// A dot at position zero does not start an extension, matching the
/// dotfile behavior of the usual splitext routines.
fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => file_name.split_at(idx),
        _ => (file_name, ""),
    }
}

/// Compute the next versioned file name.
///
/// Bumps an existing `.vNNN` token, or inserts `.v001` before the extension
/// when the name carries none.
pub fn next_version_name(file_name: &str) -> String {
    match VersionedName::parse(file_name) {
        Some(versioned) => versioned.bumped(),
        None => {
            let (stem, ext) = split_extension(file_name);
            format!("{stem}.v001{ext}")
        }
    }
}

/// Compute the next versioned path, preserving the directory.
///
/// Pure and deterministic. Paths without a UTF-8 file name are returned
/// unchanged; callers treat that as "save in place".
pub fn next_version_path(path: &Path) -> PathBuf {
    match path.file_name().and_then(|name| name.to_str()) {
        Some(file_name) => path.with_file_name(next_version_name(file_name)),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bump_existing_token() {
        assert_eq!(next_version_name("shot010.v002.nk"), "shot010.v003.nk");
    }

    #[test]
    fn test_insert_token_when_absent() {
        assert_eq!(next_version_name("render.nk"), "render.v001.nk");
    }

    #[test]
    fn test_marker_case_preserved() {
        assert_eq!(next_version_name("COMP.V009.NK"), "COMP.V010.NK");
    }

    #[test]
    fn test_padding_grows_past_three_digits() {
        assert_eq!(next_version_name("shot.v999.nk"), "shot.v1000.nk");
        assert_eq!(next_version_name("shot.v1000.nk"), "shot.v1001.nk");
    }

    #[test]
    fn test_wide_padding_collapses_to_three() {
        // 0007 parses as 7; the bumped token is re-padded, not width-preserved
        assert_eq!(next_version_name("shot.v0007.nk"), "shot.v008.nk");
    }

    #[test]
    fn test_no_extension() {
        assert_eq!(next_version_name("render"), "render.v001");
    }

    #[test]
    fn test_dotfile_has_no_extension() {
        assert_eq!(next_version_name(".hidden"), ".hidden.v001");
    }

    #[test]
    fn test_last_token_wins() {
        assert_eq!(
            next_version_name("shot.v001.v002.nk"),
            "shot.v001.v003.nk"
        );
    }

    #[test]
    fn test_directory_preserved() {
        let next = next_version_path(Path::new("/proj/shots/shot010.v002.nk"));
        assert_eq!(next, PathBuf::from("/proj/shots/shot010.v003.nk"));
    }

    #[test]
    fn test_path_without_file_name_unchanged() {
        assert_eq!(next_version_path(Path::new("/")), PathBuf::from("/"));
    }

    #[test]
    fn test_parse_exposes_parts() {
        let versioned = VersionedName::parse("shot010.v002.nk").unwrap();
        assert_eq!(versioned.stem, "shot010");
        assert_eq!(versioned.marker, ".v");
        assert_eq!(versioned.number, 2);
        assert_eq!(versioned.ext, ".nk");
    }

    #[test]
    fn test_oversized_digits_treated_as_unversioned() {
        let digits = "9".repeat(26);
        let name = format!("shot.v{digits}.nk");
        assert!(VersionedName::parse(&name).is_none());
        assert_eq!(next_version_name(&name), format!("shot.v{digits}.v001.nk"));
    }

    proptest! {
        #[test]
        fn prop_bump_increments_by_one(
            stem in "[A-Za-z][A-Za-z0-9_]{0,12}",
            marker in prop::sample::select(vec![".v", ".V"]),
            number in 0u64..1_000_000,
            width in 1usize..7,
        ) {
            let name = format!("{stem}{marker}{number:0width$}.nk");
            let next = next_version_name(&name);
            let parsed = VersionedName::parse(&next).unwrap();
            prop_assert_eq!(parsed.number, number + 1);
        }

        #[test]
        fn prop_bumped_token_is_padded(
            stem in "[A-Za-z][A-Za-z0-9_]{0,12}",
            number in 0u64..100_000,
        ) {
            let name = format!("{stem}.v{number}.nk");
            let next = next_version_name(&name);
            let digits = VersionedName::parse(&next).unwrap();
            let token_digits = next
                .trim_start_matches(&format!("{stem}.v"))
                .trim_end_matches(".nk");
            prop_assert!(token_digits.len() >= 3);
            prop_assert_eq!(digits.number, number + 1);
        }

        #[test]
        fn prop_repeated_application_strictly_increases(
            stem in "[A-Za-z][A-Za-z0-9_]{0,12}",
            number in 0u64..100_000,
        ) {
            let first = next_version_name(&format!("{stem}.v{number:03}.nk"));
            let second = next_version_name(&first);
            let a = VersionedName::parse(&first).unwrap().number;
            let b = VersionedName::parse(&second).unwrap().number;
            prop_assert!(b > a);
            prop_assert_eq!(a, number + 1);
            prop_assert_eq!(b, number + 2);
        }

        #[test]
        fn prop_unversioned_names_get_v001(
            stem in "[A-Za-z][A-Za-z0-9_]{0,12}",
            ext in "[a-z]{2,4}",
        ) {
            let name = format!("{stem}.{ext}");
            prop_assert_eq!(next_version_name(&name), format!("{stem}.v001.{ext}"));
        }
    }
}
