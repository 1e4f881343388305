// SPDX-License-Identifier: MIT

pub mod error;
pub mod filter;
pub mod ottl;
