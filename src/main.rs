use env_logger::{Builder, Env};
use log::error;

fn init_logger() {
    // RUST_LOG=debug покажет решение по каждой записи снимка.
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    // stale => код 1; решать, что с этим делать, — дело вызывающего shell-хука.
    if let Err(e) = FileWatches::cli::run() {
        error!("{:?}", e);
        std::process::exit(1);
    }
}
