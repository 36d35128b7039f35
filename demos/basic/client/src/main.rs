mod app;

use std::{thread, time::Duration};

use app::App;

const FRAME: Duration = Duration::from_millis(50);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut app = App::default();
    while app.is_running() {
        app.update();
        thread::sleep(FRAME);
    }
}
