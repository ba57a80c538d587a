pub use crate::app::App;
pub use dashcfg_types::prelude::*;

// vim: ts=4
