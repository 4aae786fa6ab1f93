// -*- coding: utf-8 -*-
//
// Copyright (C) 2026 Michael Büsch <m@bues.ch>
//
// Licensed under the Apache License version 2.0
// or the MIT license, at your option.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate implements the configuration file parsing of `pwlookup`.
//!
//! Defaults for a missing configuration file
//! or missing individual configuration entries are implemented here.

#![forbid(unsafe_code)]

mod ini;

use crate::ini::Ini;
use anyhow::{self as ah, format_err as err, Context as _};
use pwlookup_db::PASSWD_PATH;
use std::path::{Path, PathBuf};

/// The default configuration path, relative to the install prefix.
const CONF_PATH: &str = "etc/pwlookup.conf";

fn parse_bool(s: &str) -> ah::Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(err!("Invalid boolean string '{other}'")),
    }
}

fn get_debug(ini: &Ini) -> ah::Result<bool> {
    if let Some(debug) = ini.get("GENERAL", "debug") {
        return parse_bool(debug).context("[GENERAL] debug");
    }
    Ok(false)
}

fn get_passwd(ini: &Ini) -> ah::Result<PathBuf> {
    if let Some(passwd) = ini.get("DATABASE", "passwd") {
        if passwd.is_empty() {
            return Err(err!("[DATABASE] passwd is empty"));
        }
        return Ok(PathBuf::from(passwd));
    }
    Ok(PathBuf::from(PASSWD_PATH))
}

/// Parsed pwlookup.conf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    path: Option<PathBuf>,
    debug: bool,
    passwd: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Create a new configuration instance with all-default values.
    pub fn new() -> Self {
        Self {
            path: None,
            debug: false,
            passwd: PathBuf::from(PASSWD_PATH),
        }
    }

    /// Get the default configuration file path.
    pub fn get_default_path() -> PathBuf {
        // The build-time environment variable PWLOOKUP_CONF_PREFIX can be
        // used to give an additional prefix.
        let prefix = option_env!("PWLOOKUP_CONF_PREFIX").unwrap_or("/");
        Path::new(prefix).join(CONF_PATH)
    }

    /// Get the actual path the configuration was read from.
    pub fn get_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// (Re-)load a configuration from a file.
    ///
    /// A file that does not exist or can't be read leaves the defaults in place.
    /// A file that has been read, but can't be parsed, is an error.
    pub fn load(&mut self, path: &Path) -> ah::Result<()> {
        let Ok(content) = std::fs::read(path) else {
            return Ok(());
        };
        let content = String::from_utf8(content)
            .with_context(|| format!("Configuration {path:?} to UTF-8 conversion"))?;
        self.load_str(&content)
            .with_context(|| format!("Failed to load configuration {path:?}"))?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// (Re-)load a configuration from a string.
    pub fn load_str(&mut self, content: &str) -> ah::Result<()> {
        let mut ini = Ini::new();
        ini.parse_str(content)?;
        self.load_ini(&ini)
    }

    fn load_ini(&mut self, ini: &Ini) -> ah::Result<()> {
        let debug = get_debug(ini)?;
        let passwd = get_passwd(ini)?;

        self.debug = debug;
        self.passwd = passwd;
        Ok(())
    }

    /// Get the `debug` option from `[GENERAL]` section.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Get the `passwd` option from `[DATABASE]` section.
    pub fn passwd(&self) -> &Path {
        &self.passwd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let conf = Config::new();
        assert!(!conf.debug());
        assert_eq!(conf.passwd(), Path::new("/etc/passwd"));
        assert_eq!(conf.get_path(), None);
        assert!(Config::get_default_path().ends_with("etc/pwlookup.conf"));
    }

    #[test]
    fn test_general() {
        let mut ini = Ini::new();
        ini.parse_str("[GENERAL]\ndebug = On\n").unwrap();
        assert!(get_debug(&ini).unwrap());
        ini.parse_str("[GENERAL]\ndebug = 0\n").unwrap();
        assert!(!get_debug(&ini).unwrap());
        ini.parse_str("[GENERAL]\ndebug = maybe\n").unwrap();
        assert!(get_debug(&ini).is_err());
    }

    #[test]
    fn test_database() {
        let mut conf = Config::new();
        conf.load_str("[DATABASE]\npasswd = /srv/chroot/etc/passwd\n")
            .unwrap();
        assert_eq!(conf.passwd(), Path::new("/srv/chroot/etc/passwd"));
        assert!(conf.load_str("[DATABASE]\npasswd =\n").is_err());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pwlookup.conf");

        let mut conf = Config::new();
        conf.load(&path).unwrap();
        assert_eq!(conf, Config::new());

        std::fs::write(&path, "[GENERAL]\ndebug = true\n").unwrap();
        conf.load(&path).unwrap();
        assert!(conf.debug());
        assert_eq!(conf.get_path(), Some(path.as_path()));

        std::fs::write(&path, "debug = true\n").unwrap();
        assert!(conf.load(&path).is_err());
    }

    #[test]
    fn test_load_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let mut conf = Config::new();
        // A directory can be opened, but not read.
        conf.load(dir.path()).unwrap();
        assert_eq!(conf, Config::new());
        assert_eq!(conf.get_path(), None);
    }
}

// vim: ts=4 sw=4 expandtab
