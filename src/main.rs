fn main() {
    app_lib::logging::init_logging();

    let config = app_lib::config::AppConfig::default();
    if let Err(e) = app_lib::run(&config) {
        log::error!("{} ({})", e, e.code());
        std::process::exit(1);
    }
}
