// -*- coding: utf-8 -*-
//
// Copyright (C) 2026 Michael Büsch <m@bues.ch>
//
// Licensed under the Apache License version 2.0
// or the MIT license, at your option.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate resolves user accounts and their primary groups
//! from the system account database (`/etc/passwd`).
//!
//! Resolved accounts are cached inside of the [Resolver].
//! The database file is only read on a cache miss.

#![forbid(unsafe_code)]

mod database;
pub mod passwd;

pub use crate::database::{Database, PasswdFile, PASSWD_PATH};

use std::{
    collections::HashMap,
    io,
    path::PathBuf,
    sync::{Arc, Mutex, PoisonError},
};

/// The environment variable holding the name of the current user.
pub const USER_ENV: &str = "USER";

/// One resolved entry of the account database.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Account {
    /// Decimal user ID.
    pub id: String,
    /// Decimal ID of the primary group.
    pub group_id: String,
    /// Login name.
    pub username: String,
    /// Always the same as `username`.
    pub display_name: String,
    /// Home directory. May be empty.
    pub home_directory: String,
}

/// The primary group of an [Account].
///
/// This is not a record from the group database.
/// The group name is the user name of the account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Group {
    /// Decimal group ID.
    pub gid: String,
    /// Login name of the account.
    pub name: String,
}

impl From<&Account> for Group {
    fn from(account: &Account) -> Self {
        Self {
            gid: account.group_id.clone(),
            name: account.username.clone(),
        }
    }
}

/// What to search the account database for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Query {
    /// Search by login name.
    Name(String),
    /// Search by decimal user ID.
    Id(String),
}

impl Query {
    fn key(&self) -> &str {
        match self {
            Self::Name(name) => name.as_str(),
            Self::Id(id) => id.as_str(),
        }
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => write!(f, "name '{name}'"),
            Self::Id(id) => write!(f, "id '{id}'"),
        }
    }
}

/// Account resolver error.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The account database could not be read.
    /// Nothing has been cached. The next lookup will try again.
    #[error("Failed to read account database {path:?}: {source}")]
    DatabaseUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No well-formed database line matched the query.
    #[error("Account with {0} not found")]
    AccountNotFound(Query),

    /// The `USER` environment variable is not set, empty or not valid Unicode.
    #[error("The current user is unknown: Environment variable 'USER' is not set or invalid")]
    NoCurrentUser,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Resolved accounts, by login name and by user ID.
///
/// Both keys of an account point to the same object.
/// A key, once inserted, is never replaced.
#[derive(Debug, Default)]
struct Cache {
    by_name: HashMap<String, Arc<Account>>,
    by_id: HashMap<String, Arc<Account>>,
}

impl Cache {
    fn get(&self, query: &Query) -> Option<Arc<Account>> {
        let account = match query {
            Query::Name(name) => self.by_name.get(name),
            Query::Id(id) => self.by_id.get(id),
        };
        account.cloned()
    }

    fn insert(&mut self, account: Arc<Account>) {
        self.by_name
            .entry(account.username.clone())
            .or_insert_with(|| Arc::clone(&account));
        self.by_id
            .entry(account.id.clone())
            .or_insert(account);
    }
}

/// Caching account resolver.
#[derive(Debug)]
pub struct Resolver<D = PasswdFile> {
    db: D,
    // Held over the complete lookup, including the database scan.
    cache: Mutex<Cache>,
}

impl Resolver<PasswdFile> {
    /// Create a resolver for the account database file at `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self::new(PasswdFile::new(path))
    }
}

impl Default for Resolver<PasswdFile> {
    fn default() -> Self {
        Self::new(PasswdFile::default())
    }
}

impl<D: Database> Resolver<D> {
    /// Create a resolver with an empty cache.
    pub fn new(db: D) -> Self {
        Self {
            db,
            cache: Mutex::new(Cache::default()),
        }
    }

    /// Get the underlying database.
    pub fn database(&self) -> &D {
        &self.db
    }

    /// Look up an account by login name.
    pub fn lookup_by_name(&self, name: &str) -> Result<Arc<Account>> {
        self.resolve(Query::Name(name.to_string()))
    }

    /// Look up an account by decimal user ID.
    pub fn lookup_by_id(&self, id: &str) -> Result<Arc<Account>> {
        self.resolve(Query::Id(id.to_string()))
    }

    /// Look up the account named by the `USER` environment variable.
    pub fn current_user(&self) -> Result<Arc<Account>> {
        self.resolve_current(std::env::var(USER_ENV).ok())
    }

    /// Look up an account by login name and get its primary group.
    pub fn lookup_group_by_name(&self, name: &str) -> Result<Group> {
        Ok(Group::from(&*self.lookup_by_name(name)?))
    }

    /// Look up an account by decimal user ID and get its primary group.
    pub fn lookup_group_by_id(&self, id: &str) -> Result<Group> {
        Ok(Group::from(&*self.lookup_by_id(id)?))
    }

    fn resolve_current(&self, user: Option<String>) -> Result<Arc<Account>> {
        match user {
            Some(user) if !user.is_empty() => self.resolve(Query::Name(user)),
            _ => Err(Error::NoCurrentUser),
        }
    }

    fn resolve(&self, query: Query) -> Result<Arc<Account>> {
        if query.key().is_empty() {
            return Err(Error::AccountNotFound(query));
        }

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(account) = cache.get(&query) {
            tracing::debug!("Cache hit for account with {query}");
            return Ok(account);
        }

        let content = self.db.read().map_err(|source| Error::DatabaseUnreadable {
            path: self.db.path().to_path_buf(),
            source,
        })?;
        tracing::debug!(
            "Read account database {:?} ({} bytes)",
            self.db.path(),
            content.len()
        );

        let Some(entry) = passwd::find(&content, &query) else {
            tracing::debug!("No account with {query} in {:?}", self.db.path());
            return Err(Error::AccountNotFound(query));
        };
        let account = Arc::new(entry.to_account());
        cache.insert(Arc::clone(&account));
        Ok(account)
    }
}


// vim: ts=4 sw=4 expandtab
