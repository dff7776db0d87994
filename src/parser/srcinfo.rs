//! `.SRCINFO` parser
//!
//! A `.SRCINFO` is a flat list of `key = value` lines. The `pkgbase` line
//! opens the base section; every `pkgname` line opens a package section.
//! Only the base section is kept: it carries `pkgver`, `pkgrel` and the
//! per-architecture sources and checksums.

use regex::Regex;
use tracing::debug;

use crate::parser::error::ParseError;
use crate::version::Version;

/// Parsed contents of a `.SRCINFO`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Srcinfo {
    pub pkgbase: String,
    pub pkgver: String,
    pub pkgrel: Option<String>,
    /// Names from every `pkgname` line, in order
    pub pkgnames: Vec<String>,
    /// All base-section fields in declaration order, including repeated keys
    pub base_fields: Vec<(String, String)>,
}

impl Srcinfo {
    /// Values of `key` in the base section, in declaration order
    pub fn base_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.base_fields
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The recorded version
    pub fn version(&self) -> Version {
        Version::new(self.pkgver.clone())
    }
}

/// Parser for `.SRCINFO` files
pub struct SrcinfoParser {
    /// Regex for a field line: `key = value`
    field_re: Regex,
}

impl SrcinfoParser {
    pub fn new() -> Self {
        Self {
            field_re: Regex::new(r"^([A-Za-z0-9_]+)\s*=\s*(.*)$").unwrap(),
        }
    }

    pub fn parse(&self, content: &str) -> Result<Srcinfo, ParseError> {
        let mut pkgbase: Option<String> = None;
        let mut pkgver: Option<String> = None;
        let mut pkgrel: Option<String> = None;
        let mut pkgnames = Vec::new();
        let mut base_fields = Vec::new();
        let mut in_base = false;

        for (line_num, line) in content.lines().enumerate() {
            let line_no = line_num + 1;
            let trimmed = line.trim();

            // Skip empty lines and comments
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let captures =
                self.field_re
                    .captures(trimmed)
                    .ok_or_else(|| ParseError::InvalidSyntax {
                        line: line_no,
                        content: trimmed.to_string(),
                    })?;
            let key = &captures[1];
            let value = captures[2].trim();

            if key == "pkgbase" {
                if pkgbase.is_some() {
                    return Err(duplicate(line_no, key));
                }
                if value.is_empty() {
                    return Err(empty(line_no, key));
                }
                pkgbase = Some(value.to_string());
                in_base = true;
                continue;
            }

            if pkgbase.is_none() {
                return Err(ParseError::FieldBeforePkgbase {
                    line: line_no,
                    key: key.to_string(),
                });
            }

            if key == "pkgname" {
                pkgnames.push(value.to_string());
                in_base = false;
                continue;
            }

            // Package sections may override descriptive fields only
            if !in_base {
                continue;
            }

            match key {
                "pkgver" => {
                    if pkgver.is_some() {
                        return Err(duplicate(line_no, key));
                    }
                    if value.is_empty() {
                        return Err(empty(line_no, key));
                    }
                    pkgver = Some(value.to_string());
                }
                "pkgrel" => {
                    if pkgrel.is_some() {
                        return Err(duplicate(line_no, key));
                    }
                    pkgrel = Some(value.to_string());
                }
                _ => {}
            }

            base_fields.push((key.to_string(), value.to_string()));
        }

        Ok(Srcinfo {
            pkgbase: pkgbase.ok_or(ParseError::MissingField("pkgbase"))?,
            pkgver: pkgver.ok_or(ParseError::MissingField("pkgver"))?,
            pkgrel,
            pkgnames,
            base_fields,
        })
    }
}

impl Default for SrcinfoParser {
    fn default() -> Self {
        Self::new()
    }
}

fn duplicate(line: usize, key: &str) -> ParseError {
    ParseError::DuplicateField {
        line,
        key: key.to_string(),
    }
}

fn empty(line: usize, key: &str) -> ParseError {
    ParseError::EmptyValue {
        line,
        key: key.to_string(),
    }
}

/// Reads the recorded `pkgver` from `.SRCINFO` content
pub fn read_version(content: &str) -> Result<Version, ParseError> {
    let srcinfo = SrcinfoParser::new().parse(content)?;
    debug!("{} records pkgver {}", srcinfo.pkgbase, srcinfo.pkgver);
    Ok(srcinfo.version())
}
