mod app;
mod error;
mod logread;
mod msgview;
mod paths;
mod types;

fn main() {
    std::process::exit(app::run());
}
