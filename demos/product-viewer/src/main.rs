pub fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    if let Err(error) = product_viewer::real_main() {
        let (title, message) = error.user_facing();
        log::error!("[VIEWER] {title}: {message}");
    }
}
