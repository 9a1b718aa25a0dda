// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules, one per collection.

pub mod pictures;
pub mod points;
