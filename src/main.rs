use iced::{Application, Settings};
use perfume_form::{config::Config, gui, http::HttpCatalog};

fn main() -> iced::Result {
    env_logger::init();

    let config = Config::load().unwrap_or_else(|err| {
        log::error!("couldn't load config ({err}), using defaults");
        Config::default()
    });

    // built before iced starts its runtime; the blocking client can't be created inside it
    let catalog = match HttpCatalog::new(&config) {
        Ok(catalog) => catalog,
        Err(err) => {
            log::error!("couldn't build HTTP client: {err}");
            std::process::exit(1);
        }
    };
    log::info!("Posting new perfumes to {}", config.endpoint);

    gui::App::run(Settings {
        window: iced::window::Settings {
            size: (800, 960),
            ..Default::default()
        },
        ..Settings::with_flags(gui::Flags { config, catalog })
    })
}
