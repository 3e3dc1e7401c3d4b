use relmeta::ui::output;

fn main() {
    if let Err(err) = relmeta::cli::run() {
        output::error(format!("{err:#}"));
        std::process::exit(1);
    }
}
