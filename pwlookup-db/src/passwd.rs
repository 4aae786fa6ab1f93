// -*- coding: utf-8 -*-
//
// Copyright (C) 2026 Michael Büsch <m@bues.ch>
//
// Licensed under the Apache License version 2.0
// or the MIT license, at your option.
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{Account, Query};

/// One borrowed line of the passwd database.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswdEntry<'a> {
    pub name: &'a str,
    pub password: &'a str,
    pub uid: &'a str,
    pub gid: &'a str,
    pub gecos: &'a str,
    pub home: &'a str,
    pub shell: &'a str,
}

impl<'a> PasswdEntry<'a> {
    /// Split one line into its fields.
    ///
    /// Returns `None`, if the line does not have exactly
    /// seven colon separated fields.
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut fields = line.split(':');
        let entry = Self {
            name: fields.next()?,
            password: fields.next()?,
            uid: fields.next()?,
            gid: fields.next()?,
            gecos: fields.next()?,
            home: fields.next()?,
            shell: fields.next()?,
        };
        if fields.next().is_some() {
            return None; // Too many fields.
        }
        Some(entry)
    }

    /// Check whether this line is the one asked for by `query`.
    pub fn matches(&self, query: &Query) -> bool {
        match query {
            Query::Name(name) => self.name == name.as_str(),
            Query::Id(id) => self.uid == id.as_str(),
        }
    }

    /// Build the [Account] record for this line.
    ///
    /// The GECOS field is not used.
    /// The display name is always the login name.
    pub fn to_account(&self) -> Account {
        Account {
            id: self.uid.to_string(),
            group_id: self.gid.to_string(),
            username: self.name.to_string(),
            display_name: self.name.to_string(),
            home_directory: self.home.to_string(),
        }
    }
}

/// Iterate over all well-formed lines of the database content.
pub fn entries(content: &str) -> impl Iterator<Item = PasswdEntry<'_>> {
    content.lines().filter_map(PasswdEntry::parse)
}

/// Find the first well-formed line matching `query`.
///
/// Lines after the first match are not looked at.
pub fn find<'a>(content: &'a str, query: &Query) -> Option<PasswdEntry<'a>> {
    entries(content).find(|entry| entry.matches(query))
}


// vim: ts=4 sw=4 expandtab
