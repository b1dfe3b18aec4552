mod command;
mod high_score;
mod logging;
mod ui;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
