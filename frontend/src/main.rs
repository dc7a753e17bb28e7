use crate::app::App;

mod app;
mod components;
mod config;
mod logger;
mod stats_grid;
mod storage;
mod tops_sheet;
mod transport;

fn main() {
    logger::init();
    yew::Renderer::<App>::new().render();
}
