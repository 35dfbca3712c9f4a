extern crate env_logger;
#[macro_use]
extern crate log;
extern crate tritex;

use std::env;
use std::process::exit;

use tritex::prelude::*;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut settings = Settings::default();
    if let Some(exe) = env::args().next() {
        settings.window = settings.window.with_title_from_exe(exe);
    }

    let result = Engine::new(&settings).and_then(|mut engine| engine.run());
    if let Err(err) = result {
        error!("{}", err);
        eprintln!("{}", err);
        exit(1);
    }
}
