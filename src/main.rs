fn main() {
    docchat::config::load_dotenv();
    docchat::logging::init();
    tracing::info!(backend = %docchat::config::get().api_base_url, "starting docchat");
    dioxus::launch(docchat::ui::App);
}
