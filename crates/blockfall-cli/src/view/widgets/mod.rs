pub(crate) use self::{
    block_display::*, board_display::*, menu_display::*, piece_display::*, status_display::*,
};

mod block_display;
mod board_display;
mod menu_display;
mod piece_display;
mod status_display;
