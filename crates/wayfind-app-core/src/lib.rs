// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for Wayfind tools (config port, service prefs).
//! Keeps the HTTP boundary thin and storage-agnostic.

pub mod config;
pub mod prefs;
