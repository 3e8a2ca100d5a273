mod all;
mod footer;
mod header;
mod items;
mod log;
mod materials;
mod modal;
mod projects;
mod status;
mod trends;

use self::log::log;
use super::*;
use footer::footer;
use header::header;
use status::status;

pub use all::all as render;
