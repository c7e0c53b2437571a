//! Dungeon room content for undercroft.
//!
//! This crate holds the procedural generation tools, and the catalog of hand-composed
//! room templates built with them. It depends on the core library crate [`undercroft`]
//! and its main purpose is to provide [`RoomTemplate`] and [`TemplateRegistry`]; the
//! shape routines in [`alg`] and the mazes in [`maze`] are public so that hosts can
//! compose rooms of their own, but should be assumed less stable.
//!
//! Templates are written against the named materials of [`DungeonMaterial`]; a host
//! binds those names to its own material type with a [`MaterialProvider`].
//!
//! ```
//! use undercroft_content::{RoomTemplate, TemplateParameters, identity_provider};
//!
//! let room = RoomTemplate::TreasureVault
//!     .build(&identity_provider(), TemplateParameters { seed: Some(7) })
//!     .unwrap();
//! assert_eq!(room.buffer().width(), 26);
//! assert!(!room.records().is_empty());
//! ```
//!
//! [`MaterialProvider`]: undercroft::MaterialProvider

#![deny(rust_2018_idioms)]
#![warn(unused_extern_crates)]

extern crate alloc;

pub mod alg;

mod dungeon;
pub use dungeon::*;

mod materials;
pub use materials::*;

pub mod maze;

mod rooms;
pub use rooms::LootTable;

mod template;
pub use template::*;
