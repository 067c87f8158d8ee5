// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |        publish / config / generate
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  Config.toml, .rimpub.toml|
//!              '-----+---------------+-----'
//!                    |               |
//!                    v               v
//!                 pattern         publish
//!              ignore rules   plan / copy / hook
//!
//!   +-----------------------------------------+
//!   |  core      process runner (build hook)  |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod pattern;
pub mod publish;
pub mod utility;
