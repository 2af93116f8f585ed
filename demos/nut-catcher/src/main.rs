pub fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    if let Err(error) = nut_catcher::real_main() {
        let (title, message) = error.user_facing();
        log::error!("[NUT_CATCHER] {title}: {message}");
    }
}
