//! Drive the item typeahead from the command line.
//!
//! ```text
//! cargo run -p sitebook --example item_picker -- ce
//! ```
//!
//! Set `RUST_LOG=sitebook=trace` to watch the overlay's state changes.

use sitebook::config::ClientConfig;
use sitebook::events::{Key, KeyPressEvent};
use sitebook::geometry::Rect;
use sitebook::typeahead::{ListenerRegistry, SharedLayout, TypeaheadOverlay};
use sitebook::{EntityId, Item};
use tracing_subscriber::EnvFilter;

fn item(id: &str, name: &str, unit: &str, rate: f64) -> Item {
    Item {
        id: EntityId::from(id),
        name: name.into(),
        unit: unit.into(),
        rate,
        category: None,
        code: None,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sitebook=debug")),
        )
        .init();

    let query = std::env::args().nth(1).unwrap_or_else(|| "ce".to_string());
    let config = match ClientConfig::default().with_env_overrides() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config: {err}");
            std::process::exit(1);
        }
    };
    println!("API: {}", config.api.base_url);

    let layout = SharedLayout::new(Rect::new(24.0, 180.0, 320.0, 36.0));
    let mut picker = TypeaheadOverlay::new(
        layout,
        config
            .typeahead
            .options()
            .input_id("line-0-item")
            .placeholder("Search items"),
    );
    picker.selected.connect(|item: &Item| {
        println!("selected {} ({} @ {:.2})", item.name, item.unit, item.rate);
    });

    let mut host = ListenerRegistry::new();
    picker.mount(&mut host);

    picker.set_candidates(vec![
        item("i1", "Cement", "bag", 650.0),
        item("i2", "Steel Rod", "pc", 1200.0),
        item("i3", "Cement Board", "sheet", 980.0),
        item("i4", "River Sand", "cft", 55.0),
    ]);
    picker.set_query(query.as_str());

    match picker.render() {
        Some(view) => {
            println!(
                "overlay at top={} left={} width={} ({} matches)",
                view.rect.top, view.rect.left, view.rect.width, view.total_matches
            );
            for row in &view.rows {
                let marker = if row.active { '>' } else { ' ' };
                println!(
                    "{marker} {} {}",
                    row.label,
                    row.secondary.as_deref().unwrap_or_default()
                );
            }
        }
        None => println!("no matches for {query:?}"),
    }

    picker.key_press(&mut KeyPressEvent::new(Key::ArrowDown));
    picker.key_press(&mut KeyPressEvent::new(Key::Enter));
    picker.unmount(&mut host);
}
