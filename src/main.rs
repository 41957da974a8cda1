mod app;
mod core;
mod pages;

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Starting NFT image frontend");

    dioxus::launch(app::App);
}
