//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use cromaticar_core::normalize::Rgb;
use cromaticar_core::{
    BrandRecord, ColorCard, ColorRecord, ModelRecord, ResultView, StoreKind, StoreResult, YearRecord,
};
use unicode_width::UnicodeWidthStr;

/// Print the results area for a search.
pub fn print_view(view: &ResultView<'_>) {
    match view {
        ResultView::Idle => {
            println!("{}", "Pick a brand, model or year to search for colors.".dimmed());
        }
        ResultView::Loading => {
            println!("{}", "Searching...".dimmed());
        }
        ResultView::Error(message) => {
            println!("{} {}", "✗".red().bold(), message.red());
        }
        ResultView::Empty => {
            println!("{}", "No colors match these filters.".yellow());
        }
        ResultView::Populated(cards) => print_cards(cards),
    }
}

fn print_cards(cards: &[ColorCard<'_>]) {
    let name_width = (term_width().saturating_sub(48)).clamp(16, 36);

    println!(
        "  {} {} {:<8} {:<8} {}",
        "  ",
        pad_right("Name", name_width),
        "Hex",
        "Code",
        "Vehicle"
    );
    println!("{}", "─".repeat(name_width + 42));

    for card in cards {
        println!(
            "  {} {} {:<8} {:<8} {}",
            swatch(card.swatch),
            pad_right(&truncate_visual(card.title, name_width), name_width),
            card.swatch,
            card.code.unwrap_or("-"),
            card.vehicle.as_deref().unwrap_or("").dimmed()
        );
    }

    println!();
    println!("{} color(s)", cards.len());
}

/// Print one color in full.
pub fn print_color(color: &ColorRecord) {
    println!(
        "{} {} {}",
        swatch(&color.hex_code),
        color.display_name.cyan().bold(),
        format!("({})", color.id).dimmed()
    );
    println!();
    println!("{}: {}", "Hex".bold(), color.hex_code);
    if let Some(rgb) = &color.rgb_triple {
        println!("{}: {}", "RGB".bold(), rgb);
    }
    if let Some(code) = &color.color_code {
        println!("{}: {}", "Paint code".bold(), code);
    }
    if let Some(vehicle) = color.vehicle_label() {
        println!("{}: {}", "Vehicle".bold(), vehicle);
    }
    if let Some(category) = &color.category {
        println!("{}: {}", "Finish".bold(), category);
    }
}

/// Print brands as a table.
pub fn print_brands(brands: &[BrandRecord]) {
    if brands.is_empty() {
        println!("{}", "No brands found.".dimmed());
        return;
    }

    println!("{:<8} {:<24} {:>8}", "ID", "Brand", "Colors");
    println!("{}", "─".repeat(42));
    for brand in brands {
        let count = brand
            .color_count
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} {} {:>8}",
            brand.id.dimmed(),
            pad_right(&truncate_visual(&brand.name, 24), 24),
            count
        );
    }
}

/// Print one brand's header and model names.
pub fn print_brand(brand: &BrandRecord) {
    println!("{} {}", brand.name.cyan().bold(), format!("({})", brand.id).dimmed());
    if let Some(count) = brand.color_count {
        println!("{}: {}", "Colors".bold(), count);
    }
    if let Some(logo) = &brand.logo {
        println!("{}: {}", "Logo".bold(), logo);
    }
    if !brand.models.is_empty() {
        let names: Vec<&str> = brand.models.iter().map(|m| m.name.as_str()).collect();
        println!("{}: {}", "Models".bold(), names.join(", "));
    }
}

/// Print a brand's models.
pub fn print_models(brand: &str, models: &[ModelRecord]) {
    if models.is_empty() {
        println!("{}", format!("No models found for {}.", brand).dimmed());
        return;
    }

    println!("{}", format!("Models for {}", brand).bold());
    for model in models {
        println!("  {:<8} {}", model.id.dimmed(), model.name);
    }
}

/// Print the years a brand has colors for.
pub fn print_years(brand: &str, years: &[YearRecord]) {
    if years.is_empty() {
        println!("{}", format!("No years found for {}.", brand).dimmed());
        return;
    }

    let list: Vec<String> = years.iter().map(|y| y.year.to_string()).collect();
    println!("{}: {}", format!("Years for {}", brand).bold(), list.join(", "));
}

/// Print store locator results in the order received.
pub fn print_stores(color_name: &str, stores: &[StoreResult]) {
    if stores.is_empty() {
        println!("{}", "No stores found.".dimmed());
        return;
    }

    println!("{} result(s) for \"{}\"", stores.len(), color_name.cyan());
    println!();

    for store in stores {
        println!("{} {}", store.name.bold(), store_kind(store.kind));

        if let (Some(km), Some(min)) = (store.distance_km, store.time_min) {
            println!("    {:.1} km · {:.0} min", km, min);
        } else if let Some(km) = store.distance_km {
            println!("    {:.1} km", km);
        }
        if let Some(address) = &store.address {
            println!("    {}", address);
        }
        if let Some(phone) = &store.phone {
            println!("    {}", phone);
        }
        if store.kind == StoreKind::Online && store.ships_to_cep {
            println!("    {}", "Ships to your postal code".green());
        }

        let availability = if store.has_product {
            "Likely in stock".green()
        } else {
            "Check availability".yellow()
        };
        println!("    {} · {}", availability, store.product_match.dimmed());
        println!("    {}", store.url.blue().underline());
        println!();
    }
}

fn store_kind(kind: StoreKind) -> ColoredString {
    match kind {
        StoreKind::Physical => "[physical]".cyan(),
        StoreKind::Online => "[online]".magenta(),
    }
}

/// Two-cell block painted with the color.
fn swatch(hex: &str) -> ColoredString {
    match Rgb::parse_hex(hex) {
        Ok(rgb) => "  ".on_truecolor(rgb.r, rgb.g, rgb.b),
        Err(_) => "??".dimmed(),
    }
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}
