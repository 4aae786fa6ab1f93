// -*- coding: utf-8 -*-
//
// Copyright (C) 2026 Michael Büsch <m@bues.ch>
//
// Licensed under the Apache License version 2.0
// or the MIT license, at your option.
// SPDX-License-Identifier: Apache-2.0 OR MIT

use anyhow::{self as ah, format_err as err};
use std::collections::HashMap;

/// Options of one `[SECTION]`.
type IniSection = HashMap<String, String>;

/// Minimal `.ini` file parser.
///
/// Option names and values are trimmed.
/// Lines starting with `#` or `;` are comments.
#[derive(Clone, Debug, Default)]
pub struct Ini {
    sections: HashMap<String, IniSection>,
}

impl Ini {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn parse_str(&mut self, content: &str) -> ah::Result<()> {
        let mut sections: HashMap<String, IniSection> = HashMap::new();
        let mut cur_section: Option<String> = None;

        for (idx, line) in content.lines().enumerate() {
            let lineno = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[') {
                let Some(name) = name.strip_suffix(']') else {
                    return Err(err!("Line {lineno}: Invalid section header: '{line}'"));
                };
                let name = name.trim();
                if name.is_empty() {
                    return Err(err!("Line {lineno}: Section name is empty"));
                }
                if sections.contains_key(name) {
                    return Err(err!("Line {lineno}: Duplicate section [{name}]"));
                }
                sections.insert(name.to_string(), IniSection::new());
                cur_section = Some(name.to_string());
                continue;
            }

            let Some(section) = cur_section.as_ref().and_then(|s| sections.get_mut(s)) else {
                return Err(err!(
                    "Line {lineno}: Option is not inside of a section: '{line}'"
                ));
            };
            let Some((name, value)) = line.split_once('=') else {
                return Err(err!("Line {lineno}: Option has no equal sign '=': '{line}'"));
            };
            let name = name.trim();
            if name.is_empty() {
                return Err(err!("Line {lineno}: Option name is empty: '{line}'"));
            }
            section.insert(name.to_string(), value.trim().to_string());
        }

        self.sections = sections;
        Ok(())
    }

    /// Get the value of an option from the given section.
    pub fn get(&self, section: &str, option: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|s| s.get(option))
            .map(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let mut ini = Ini::new();
        ini.parse_str(
            "\
# comment
[GENERAL]
debug = yes

; other comment
[ DATABASE ]
  passwd=/srv/passwd
empty =
",
        )
        .unwrap();
        assert_eq!(ini.get("GENERAL", "debug"), Some("yes"));
        assert_eq!(ini.get("DATABASE", "passwd"), Some("/srv/passwd"));
        assert_eq!(ini.get("DATABASE", "empty"), Some(""));
        assert_eq!(ini.get("DATABASE", "debug"), None);
        assert_eq!(ini.get("NOPE", "debug"), None);
    }

    #[test]
    fn test_value_with_equal_sign() {
        let mut ini = Ini::new();
        ini.parse_str("[A]\nx = a=b\n").unwrap();
        assert_eq!(ini.get("A", "x"), Some("a=b"));
    }

    #[test]
    fn test_errors() {
        let mut ini = Ini::new();
        assert!(ini.parse_str("[]\n").is_err());
        assert!(ini.parse_str("[A\n").is_err());
        assert!(ini.parse_str("[A]\n[A]\n").is_err());
        assert!(ini.parse_str("x = 1\n").is_err());
        assert!(ini.parse_str("[A]\nno equal sign\n").is_err());
        assert!(ini.parse_str("[A]\n = 1\n").is_err());
        let e = ini.parse_str("[A]\nx = 1\nbroken\n").unwrap_err();
        assert!(e.to_string().starts_with("Line 3:"));
    }

    #[test]
    fn test_failed_parse_keeps_content() {
        let mut ini = Ini::new();
        ini.parse_str("[A]\nx = 1\n").unwrap();
        assert!(ini.parse_str("garbage\n").is_err());
        assert_eq!(ini.get("A", "x"), Some("1"));
    }
}

// vim: ts=4 sw=4 expandtab
