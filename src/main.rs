use std::io;
use std::process;

use netstat_report::app::App;
use netstat_report::cli::parse_args;

fn main() {
    env_logger::init();

    let settings = parse_args();

    let app = App::new()
        .with_mode(settings.mode)
        .with_filter(settings.filter)
        .with_show_zero(settings.show_zero);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = app.run(&settings.input, &mut out) {
        eprintln!("netstat-report: {e}");
        process::exit(1);
    }
}
