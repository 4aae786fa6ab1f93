// -*- coding: utf-8 -*-
//
// Copyright (C) 2026 Michael Büsch <m@bues.ch>
//
// Licensed under the Apache License version 2.0
// or the MIT license, at your option.
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::{
    fs::read_to_string,
    io,
    path::{Path, PathBuf},
};

/// The default account database.
pub const PASSWD_PATH: &str = "/etc/passwd";

/// Source of the raw account database content.
pub trait Database {
    /// Read the complete database content in one go.
    fn read(&self) -> io::Result<String>;

    /// Path of the database, for diagnostics.
    fn path(&self) -> &Path;
}

/// The account database file on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswdFile {
    path: PathBuf,
}

impl PasswdFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for PasswdFile {
    fn default() -> Self {
        Self::new(PASSWD_PATH)
    }
}

impl Database for PasswdFile {
    fn read(&self) -> io::Result<String> {
        read_to_string(&self.path)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

// vim: ts=4 sw=4 expandtab
