//! Interactive console front-end.
//!
//! Every listing runs the same navigation loop: the current window
//! is fetched by raw row offset, the paging commands move the
//! offset. Stepping forward past the last page is allowed and shows
//! an empty page, since the totals can change between fetches.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use fmdb_core::{
    entities::*,
    repositories::{MarketFilter, MarketRepo, MarketSearchHit, MarketSummary, Pagination},
    usecases as uc,
    util::{
        paging::{PageCommand, PageCommandError},
        sort::{MarketOrdering, SortDirection, SortKey},
        validate,
    },
};
use fmdb_db_postgres::Db;

use crate::cfg::Cfg;

const SEARCH_PER_PAGE: u64 = 15;
const CATEGORY_PER_PAGE: u64 = 20;
const PAGE_WINDOW_RADIUS: u64 = 2;

pub fn run(db: &Db, cfg: &Cfg) -> Result<()> {
    println!("Farmer Markets Directory");
    loop {
        println!();
        println!(" 1) Browse markets");
        println!(" 2) Search by city/state/zip");
        println!(" 3) Search by text");
        println!(" 4) Markets within a radius");
        println!(" 5) Nearest markets");
        println!(" 6) Browse by category");
        println!(" 7) Market details");
        println!(" 8) Add a market");
        println!(" 9) Dashboard");
        println!(" 0) Quit");
        match prompt("> ")?.as_str() {
            "1" => browse_markets(db, cfg)?,
            "2" => search_by_fields(db)?,
            "3" => search_by_text(db)?,
            "4" => markets_within_radius(db, cfg)?,
            "5" => nearest_markets(db, cfg)?,
            "6" => browse_by_category(db)?,
            "7" => market_details(db)?,
            "8" => add_market(db)?,
            "9" => dashboard(db)?,
            "0" => return Ok(()),
            other => println!("Unknown choice: {other}"),
        }
    }
}

fn prompt(text: &str) -> Result<String> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    // EOF behaves like leaving the current prompt.
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok("0".to_string());
    }
    Ok(line.trim().to_string())
}

fn prompt_optional(text: &str) -> Result<Option<String>> {
    let input = prompt(text)?;
    Ok(validate::nonempty_trimmed(&input).map(str::to_string))
}

/// The shared navigation loop. `count` and `fetch` are re-evaluated
/// on every turn so the listing follows concurrent changes.
fn browse_pages<T>(
    per_page: u64,
    count: impl Fn() -> Result<u64>,
    fetch: impl Fn(&Pagination) -> Result<Vec<T>>,
    render: impl Fn(&T),
) -> Result<()> {
    let mut offset = 0u64;
    loop {
        let total = count()?;
        let total_pages = total.div_ceil(per_page).max(1);
        let rows = fetch(&Pagination {
            offset,
            limit: per_page,
        })?;
        println!();
        if rows.is_empty() {
            println!("  (nothing on this page)");
        }
        for row in &rows {
            render(row);
        }
        let page = offset / per_page + 1;
        let first = page.saturating_sub(PAGE_WINDOW_RADIUS).max(1);
        let last = (page + PAGE_WINDOW_RADIUS).min(total_pages);
        let window = (first..=last)
            .map(|p| {
                if p == page {
                    format!("[{p}]")
                } else {
                    p.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!("Page {page} of {total_pages} ({total} total)   {window}");
        let input = prompt("Navigate (+ - << >> <page> 0=back): ")?;
        match input.parse::<PageCommand>() {
            Ok(command) => match command.apply(offset, per_page, total_pages) {
                Ok(Some(next)) => offset = next,
                Ok(None) => return Ok(()),
                Err(err @ PageCommandError::PageOutOfRange { .. }) => println!("{err}"),
                Err(_) => unreachable!(),
            },
            Err(err) => println!("{err}"),
        }
    }
}

fn render_summary(market: &MarketSummary) {
    let distance = market
        .distance
        .map(|d| format!("  {:.1} mi", d.to_miles()))
        .unwrap_or_default();
    println!(
        "  {:>6}  {:<40}  {}, {}  {:.1} stars ({}){}",
        market.id,
        market.name,
        market.city,
        market.state,
        market.avg_rating.to_f64(),
        market.review_count,
        distance,
    );
}

fn render_hit(hit: &MarketSearchHit) {
    let zip = hit.zip.as_deref().unwrap_or("-");
    println!(
        "  {:>6}  {:<40}  {}, {} {}",
        hit.id, hit.name, hit.city, hit.state, zip
    );
}

fn prompt_origin() -> Result<Option<GeoPoint>> {
    let lat = prompt("Latitude: ")?;
    let lng = prompt("Longitude: ")?;
    match GeoPoint::parse_lat_lng_deg(&lat, &lng) {
        Ok(origin) => Ok(Some(origin)),
        Err(err) => {
            println!("{err}");
            Ok(None)
        }
    }
}

fn browse_markets(db: &Db, cfg: &Cfg) -> Result<()> {
    let raw_key = prompt("Sort by (id, rating, city, state, distance): ")?;
    let key = SortKey::resolve(&raw_key);
    let direction = if key == SortKey::Distance {
        SortDirection::default()
    } else {
        SortDirection::resolve(&prompt("Direction (asc, desc): ")?)
    };
    let origin = if key == SortKey::Distance {
        match prompt_origin()? {
            Some(origin) => Some(origin),
            None => return Ok(()),
        }
    } else {
        None
    };
    let ordering = MarketOrdering::from_key(key, direction, origin).unwrap_or_default();

    let per_page = cfg.page_bounds.default_per_page;
    browse_pages(
        per_page,
        || {
            Ok(if ordering.requires_coordinates() {
                db.count_located_markets()?
            } else {
                db.count_markets()?
            })
        },
        |pagination| Ok(db.list_markets(&ordering, pagination)?),
        render_summary,
    )
}

fn search_by_fields(db: &Db) -> Result<()> {
    let filter = MarketFilter {
        city: prompt_optional("City (blank for any): ")?,
        state: prompt_optional("State (blank for any): ")?,
        zip: prompt_optional("Zip (blank for any): ")?,
    };
    browse_pages(
        SEARCH_PER_PAGE,
        || Ok(db.count_markets_filtered(&filter)?),
        |pagination| Ok(db.filter_markets(&filter, pagination)?),
        render_hit,
    )
}

fn search_by_text(db: &Db) -> Result<()> {
    let Some(query) = prompt_optional("Search text: ")? else {
        println!("Nothing to search for");
        return Ok(());
    };
    browse_pages(
        SEARCH_PER_PAGE,
        || Ok(db.count_markets_matching_text(&query)?),
        |pagination| Ok(db.search_markets_by_text(&query, pagination)?),
        render_hit,
    )
}

fn markets_within_radius(db: &Db, cfg: &Cfg) -> Result<()> {
    let Some(origin) = prompt_origin()? else {
        return Ok(());
    };
    let raw_radius = prompt(&format!(
        "Radius in miles (blank for {}): ",
        cfg.default_radius_miles
    ))?;
    let radius = Distance::from_miles(if raw_radius.is_empty() {
        cfg.default_radius_miles
    } else {
        validate::radius_miles_from_param(Some(&raw_radius))
    });
    browse_pages(
        SEARCH_PER_PAGE,
        || Ok(db.count_markets_within_radius(origin, radius)?),
        |pagination| Ok(db.markets_within_radius(origin, radius, pagination)?),
        render_summary,
    )
}

fn nearest_markets(db: &Db, cfg: &Cfg) -> Result<()> {
    let Some(origin) = prompt_origin()? else {
        return Ok(());
    };
    let radius = Distance::from_miles(cfg.default_radius_miles);
    let markets = uc::nearest_markets(db, origin, radius, cfg.nearest_limit)?;
    if markets.is_empty() {
        println!(
            "No markets within {} miles of that point",
            cfg.default_radius_miles
        );
    }
    for market in &markets {
        render_summary(market);
    }
    Ok(())
}

fn browse_by_category(db: &Db) -> Result<()> {
    let categories = uc::all_categories(db)?;
    if categories.is_empty() {
        println!("No categories defined");
        return Ok(());
    }
    for category in &categories {
        println!("  {:>4}  {}", category.id, category.name);
    }
    let input = prompt("Category id (0=back): ")?;
    if input == "0" {
        return Ok(());
    }
    let Ok(category_id) = input.parse::<CategoryId>() else {
        println!("Not a category id: {input}");
        return Ok(());
    };
    let Some(category) = categories.iter().find(|c| c.id == category_id) else {
        println!("No such category: {category_id}");
        return Ok(());
    };
    println!("Markets in '{}':", category.name);
    browse_pages(
        CATEGORY_PER_PAGE,
        || Ok(db.count_markets_in_category(category_id)?),
        |pagination| Ok(db.markets_in_category(category_id, pagination)?),
        render_summary,
    )
}

fn market_details(db: &Db) -> Result<()> {
    let input = prompt("Market id: ")?;
    let Ok(market_id) = input.parse::<MarketId>() else {
        println!("Not a market id: {input}");
        return Ok(());
    };
    let details = match uc::market_details(db, market_id) {
        Ok(details) => details,
        Err(err) => {
            println!("{err}");
            return Ok(());
        }
    };
    print_details(&details);
    loop {
        match prompt("Action (r=add review, x=delete review, d=delete market, 0=back): ")?
            .as_str()
        {
            "r" => {
                add_review(db, market_id)?;
                return Ok(());
            }
            "x" => {
                delete_review(db)?;
                return Ok(());
            }
            "d" => {
                // The console runs with moderator rights.
                match uc::delete_market(db, market_id) {
                    Ok(()) => println!("Market {market_id} deleted"),
                    Err(err) => println!("{err}"),
                }
                return Ok(());
            }
            "0" => return Ok(()),
            other => println!("Unknown action: {other}"),
        }
    }
}

fn print_details(details: &uc::MarketDetails) {
    let location = &details.location;
    println!();
    println!("{} (#{})", details.market.name, details.market.id);
    if let Some(street) = &location.street {
        println!("  {street}");
    }
    let zip = location.zip.as_deref().unwrap_or("");
    println!("  {}, {} {}", location.city, location.state, zip);
    if let Some(county) = &location.county {
        println!("  {county} county");
    }
    if let Some(position) = details.market.position {
        println!("  at {:.5}, {:.5}", position.lat(), position.lng());
    }
    let links = &details.market.links;
    for (label, link) in [
        ("Website", &links.website),
        ("Facebook", &links.facebook),
        ("Twitter", &links.twitter),
        ("YouTube", &links.youtube),
        ("Media", &links.other_media),
    ] {
        if let Some(link) = link {
            println!("  {label}: {link}");
        }
    }
    if !details.categories.is_empty() {
        let names: Vec<_> = details.categories.iter().map(|c| c.name.as_str()).collect();
        println!("  Categories: {}", names.join(", "));
    }
    println!(
        "  {:.1} stars, {} review(s)",
        details.avg_rating.to_f64(),
        details.reviews.len()
    );
    for review in &details.reviews {
        println!(
            "    #{} {} ({} stars): {}",
            review.id,
            review.user_name,
            RatingPrimitive::from(review.rating),
            review.text,
        );
    }
}

fn add_market(db: &Db) -> Result<()> {
    let name = prompt("Name: ")?;
    let street = prompt_optional("Street (optional): ")?;
    let city = prompt("City: ")?;
    let county = prompt_optional("County (optional): ")?;
    let state = prompt("State: ")?;
    let zip = prompt_optional("Zip (optional): ")?;
    let website = prompt_optional("Website (optional): ")?;

    let lat = prompt("Latitude (blank if unknown): ")?;
    let lng = prompt("Longitude (blank if unknown): ")?;
    let position = if lat.is_empty() && lng.is_empty() {
        None
    } else {
        match GeoPoint::parse_lat_lng_deg(&lat, &lng) {
            Ok(position) => Some(position),
            Err(err) => {
                println!("{err}");
                return Ok(());
            }
        }
    };

    let req = uc::NewMarketRequest {
        name,
        street,
        city,
        county,
        state,
        zip,
        links: MarketLinks {
            website,
            ..Default::default()
        },
        position,
    };
    match uc::create_market(db, req) {
        Ok(id) => println!("Created market {id}"),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn add_review(db: &Db, market_id: MarketId) -> Result<()> {
    let user_name = prompt("Your name: ")?;
    let rating_input = prompt("Rating (1-5): ")?;
    let Ok(rating) = rating_input.parse::<RatingPrimitive>() else {
        println!("Not a rating: {rating_input}");
        return Ok(());
    };
    let text = prompt("Review: ")?;
    let req = uc::NewReviewRequest {
        market_id,
        user_name,
        rating,
        text,
        author_id: None,
    };
    match uc::add_review(db, req) {
        Ok(id) => println!("Added review {id}"),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn delete_review(db: &Db) -> Result<()> {
    let input = prompt("Review id: ")?;
    let Ok(review_id) = input.parse::<ReviewId>() else {
        println!("Not a review id: {input}");
        return Ok(());
    };
    // The console runs with moderator rights.
    match uc::delete_review(db, &uc::Actor::moderator(), review_id) {
        Ok(()) => println!("Review {review_id} deleted"),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn dashboard(db: &Db) -> Result<()> {
    let stats = uc::directory_stats(db)?;
    println!();
    println!("Markets:         {}", stats.market_count);
    println!("Reviews:         {}", stats.review_count);
    println!("States covered:  {}", stats.state_count);
    println!("Cities covered:  {}", stats.city_count);
    println!("Top states:");
    for entry in &stats.top_states {
        println!("  {:<20} {}", entry.state, entry.market_count);
    }
    println!("Markets per category:");
    for entry in &stats.category_counts {
        println!("  {:<20} {}", entry.category, entry.market_count);
    }
    Ok(())
}
