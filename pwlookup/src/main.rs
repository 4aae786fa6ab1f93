// -*- coding: utf-8 -*-
//
// Copyright (C) 2026 Michael Büsch <m@bues.ch>
//
// Licensed under the Apache License version 2.0
// or the MIT license, at your option.
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![forbid(unsafe_code)]

use anyhow::{self as ah, format_err as err, Context as _};
use clap::{CommandFactory as _, Parser, Subcommand};
use pwlookup_conf::Config;
use pwlookup_db::{Account, Database, Group, Resolver};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Opts {
    /// Override the default path to the configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the path to the account database.
    ///
    /// If this option is not given, then the `[DATABASE] passwd`
    /// value from the configuration file is used instead.
    /// The default is /etc/passwd.
    #[arg(short, long)]
    passwd: Option<PathBuf>,

    /// Show detailed information about what happens internally.
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// Show version information and exit.
    #[arg(long, short = 'v')]
    version: bool,
}

impl Opts {
    /// Get the configuration path from command line or default.
    pub fn get_config(&self) -> PathBuf {
        if let Some(config) = &self.config {
            config.clone()
        } else {
            Config::get_default_path()
        }
    }

    /// Get the account database path from command line or configuration.
    pub fn get_passwd(&self, conf: &Config) -> PathBuf {
        if let Some(passwd) = &self.passwd {
            passwd.clone()
        } else {
            conf.passwd().to_path_buf()
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a user account by login name.
    User {
        /// The login name.
        name: String,
    },

    /// Look up a user account by numeric user ID.
    Uid {
        /// The decimal user ID.
        id: String,
    },

    /// Look up the account of the current user.
    ///
    /// The current user is taken from the USER environment variable.
    Current,

    /// Look up the primary group of a user account by login name.
    ///
    /// The group name is the login name of the account.
    Group {
        /// The login name.
        name: String,
    },

    /// Look up the primary group of a user account by numeric user ID.
    ///
    /// Note that the ID is the user ID of the account, not a group ID.
    Gid {
        /// The decimal user ID.
        id: String,
    },
}

/// Format an account as `username:id:group_id:display_name:home_directory`.
fn format_account(account: &Account) -> String {
    format!(
        "{}:{}:{}:{}:{}",
        account.username,
        account.id,
        account.group_id,
        account.display_name,
        account.home_directory
    )
}

/// Format a group as `name:gid`.
fn format_group(group: &Group) -> String {
    format!("{}:{}", group.name, group.gid)
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` takes precedence over `--verbose` and `[GENERAL] debug`.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run one lookup subcommand and format its result.
fn lookup<D: Database>(res: &Resolver<D>, command: &Command) -> ah::Result<String> {
    Ok(match command {
        Command::User { name } => format_account(&*res.lookup_by_name(name)?),
        Command::Uid { id } => format_account(&*res.lookup_by_id(id)?),
        Command::Current => format_account(&*res.current_user()?),
        Command::Group { name } => format_group(&res.lookup_group_by_name(name)?),
        Command::Gid { id } => format_group(&res.lookup_group_by_id(id)?),
    })
}

fn run(opts: Opts) -> ah::Result<()> {
    // Read the pwlookup.conf configuration file.
    let mut conf = Config::new();
    conf.load(&opts.get_config())
        .context("Configuration file")?;

    init_logging(opts.verbose || conf.debug());
    if let Some(path) = conf.get_path() {
        tracing::debug!("Using configuration {path:?}");
    }

    let Some(command) = opts.command.as_ref() else {
        Opts::command()
            .print_help()
            .context("Failed to print help")?;
        println!();
        return Err(err!(
            "'pwlookup' requires a subcommand but one was not provided. \
            Please run 'pwlookup --help' for more information."
        ));
    };

    let res = Resolver::with_path(opts.get_passwd(&conf));
    println!("{}", lookup(&res, command)?);
    Ok(())
}

fn main() -> ah::Result<()> {
    let opts = Opts::parse();

    if opts.version {
        println!("pwlookup version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    run(opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opts() {
        Opts::command().debug_assert();

        let opts = Opts::try_parse_from(["pwlookup", "--passwd", "/tmp/pw", "user", "alice"])
            .unwrap();
        assert_eq!(opts.get_passwd(&Config::new()), PathBuf::from("/tmp/pw"));
        assert!(matches!(
            opts.command,
            Some(Command::User { ref name }) if name == "alice"
        ));

        let opts = Opts::try_parse_from(["pwlookup", "gid", "0"]).unwrap();
        assert_eq!(opts.get_passwd(&Config::new()), PathBuf::from("/etc/passwd"));
        assert!(matches!(opts.command, Some(Command::Gid { ref id }) if id == "0"));

        assert!(Opts::try_parse_from(["pwlookup", "uid"]).is_err());
    }

    #[test]
    fn test_format() {
        let account = Account {
            id: "501".to_string(),
            group_id: "20".to_string(),
            username: "alice".to_string(),
            display_name: "alice".to_string(),
            home_directory: "/home/alice".to_string(),
        };
        assert_eq!(format_account(&account), "alice:501:20:alice:/home/alice");
        assert_eq!(format_group(&Group::from(&account)), "alice:20");
    }

    #[test]
    fn test_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("passwd");
        std::fs::write(
            &path,
            "root:x:0:0:root:/root:/bin/bash\nalice:x:501:20:Alice Doe:/home/alice:/bin/sh\n",
        )
        .unwrap();
        let res = Resolver::with_path(&path);

        let user = Command::User {
            name: "alice".to_string(),
        };
        assert_eq!(lookup(&res, &user).unwrap(), "alice:501:20:alice:/home/alice");
        let uid = Command::Uid { id: "0".to_string() };
        assert_eq!(lookup(&res, &uid).unwrap(), "root:0:0:root:/root");
        let group = Command::Group {
            name: "alice".to_string(),
        };
        assert_eq!(lookup(&res, &group).unwrap(), "alice:20");
        let gid = Command::Gid { id: "501".to_string() };
        assert_eq!(lookup(&res, &gid).unwrap(), "alice:20");

        let missing = Command::User {
            name: "bob".to_string(),
        };
        assert!(lookup(&res, &missing).is_err());
    }
}

// vim: ts=4 sw=4 expandtab
