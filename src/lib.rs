#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod ai;
mod bitboard;
mod board;
mod common;
mod config;
mod game;
#[cfg(feature = "std")]
mod logging;
mod player;
pub mod prelude;
mod ship;

pub use ai::*;
pub use bitboard::{BitBoard, BitBoardError, SetBits, ShotGrid};
pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_with, level_from_env, LOG_ENV};
pub use player::*;
pub use ship::*;
