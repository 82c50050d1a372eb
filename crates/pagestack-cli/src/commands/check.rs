use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use pagestack_core::{Pagestack, PagestackConfig};
use pagestack_tui::{Deck, TerminalSurface};

/// Initialize the deck headlessly and report what the engine sees
pub fn run(config: PagestackConfig, deck_path: &Path, as_json: bool) -> Result<()> {
    let deck = Deck::load(deck_path)?;
    let mut surface = TerminalSurface::new(deck, config.ui.scroll.clone());
    if config.navigation.enabled && config.navigation.dynamic {
        surface = surface.with_dynamic_navigation();
    }

    let mut stack = Pagestack::new(config, surface);
    stack
        .initialize()
        .with_context(|| format!("Failed to initialize {}", deck_path.display()))?;
    stack.verify_invariant()?;

    let active = stack.active_index();
    let surface = stack.surface();

    if as_json {
        let pages: Vec<_> = stack
            .pages()
            .iter()
            .map(|page| {
                let classes: Vec<&str> = surface
                    .page(page.index())
                    .map(|view| view.classes.iter().map(String::as_str).collect())
                    .unwrap_or_default();
                json!({
                    "index": page.index(),
                    "id": page.id(),
                    "active": Some(page.index()) == active,
                    "scrollable": page.is_scrollable(),
                    "classes": classes,
                })
            })
            .collect();
        let report = json!({
            "container": stack.config().paging.container,
            "direction": stack.config().paging.slide_direction().as_str(),
            "pages": pages,
            "navigation": stack.navigation_model(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Pages in {} ({}):\n",
        stack.config().paging.container,
        stack.pages().len()
    );
    for page in stack.pages().iter() {
        let marker = if Some(page.index()) == active { "*" } else { " " };
        let id = if page.has_anchor() { page.id() } else { "(no id)" };
        let scrollable = if page.is_scrollable() { " [scrollable]" } else { "" };
        println!("  {} {}. {}{}", marker, page.index() + 1, id, scrollable);
    }

    if let Some(bar) = surface.navigation_bar() {
        println!("\nNavigation ({}, {} items)", bar.position, bar.items.len());
        for item in &bar.items {
            match &item.tooltip {
                Some(tooltip) => println!("  #{} - {}", item.anchor, tooltip),
                None => println!("  #{}", item.anchor),
            }
        }
    }

    Ok(())
}
