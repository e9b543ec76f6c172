//! Binary entry point. Session setup and the demo loop live in the `app`
//! module; a nonzero exit means configuration or pool setup failed.

fn main() {
    if let Err(err) = startrails::app::run() {
        eprintln!("startrails: {err}");
        std::process::exit(1);
    }
}
