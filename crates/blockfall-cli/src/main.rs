mod audio;
mod command;
mod keyboard;
mod logging;
mod tui;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
