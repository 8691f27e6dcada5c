//! Command dispatch for the `parkstash` binary.
//!
//! Every command works against an explicitly passed `Store` and writes its
//! report to `out`, so the same code runs against file storage in the
//! binary and memory storage in tests.

use std::io::Write;

use anyhow::{bail, Context, Result};
use parkstash_core::planner;
use parkstash_core::{Clock, Medium, Park, ParksLoader, PreferenceKey, Store, TripData};
use tracing::{info, warn};

pub const USAGE: &str = "\
Usage: parkstash <command>

Commands:
  favorites                              List favorite parks
  favorites add <id> <name> [location]   Add a favorite
  favorites remove <id>                  Remove a favorite
  favorites toggle <id> <name> [location]
  prefs                                  Show preferences
  prefs set <key> <value>                Update one preference
  viewed                                 Show recently viewed parks
  viewed add <id> <name>                 Record a park view
  parks [--refresh]                      List parks (cached for 24h)
  plan <season> [activity...]            Recommend parks for a trip
  trip                                   Show the saved trip and recommendations
  status                                 Storage and cache status
  clear                                  Remove all stored data
  config [set <field> <value>]           Show or change configuration";

pub async fn run<M, C, W>(
    store: &Store<M, C>,
    loader: &dyn ParksLoader,
    args: &[String],
    out: &mut W,
) -> Result<()>
where
    M: Medium,
    C: Clock,
    W: Write,
{
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        ["favorites"] => list_favorites(store, out),
        ["favorites", "add", id, name, rest @ ..] => {
            let park = park_arg(id, name, rest);
            if store.is_favorite(&park.id) {
                writeln!(out, "{} is already a favorite", park.name)?;
            } else if store.add_favorite(&park) {
                writeln!(out, "Added {} to favorites", park.name)?;
            } else {
                bail!("Could not save favorite {}", park.id);
            }
            Ok(())
        }
        ["favorites", "remove", id] => {
            if store.remove_favorite(id) {
                writeln!(out, "Removed {} from favorites", id)?;
            } else {
                writeln!(out, "{} was not a favorite", id)?;
            }
            Ok(())
        }
        ["favorites", "toggle", id, name, rest @ ..] => {
            let park = park_arg(id, name, rest);
            let now_favorite = store.toggle_favorite(&park);
            let verb = if now_favorite { "Added" } else { "Removed" };
            writeln!(out, "{} {}", verb, park.name)?;
            Ok(())
        }
        ["prefs"] => show_preferences(store, out),
        ["prefs", "set", key, value] => {
            let key: PreferenceKey = key.parse().map_err(anyhow::Error::msg)?;
            if !store.update_preference(key, *value) {
                bail!("Could not save preference {}", key);
            }
            show_preferences(store, out)
        }
        ["viewed"] => {
            let viewed = store.recently_viewed();
            if viewed.is_empty() {
                writeln!(out, "No parks viewed yet")?;
            }
            for park in viewed {
                writeln!(
                    out,
                    "{}  {}  {}",
                    park.viewed_at.format("%Y-%m-%d %H:%M"),
                    park.id,
                    park.name
                )?;
            }
            Ok(())
        }
        ["viewed", "add", id, name] => {
            if !store.add_viewed_park(&Park::new(*id, *name)) {
                bail!("Could not record view of {}", id);
            }
            Ok(())
        }
        ["parks", rest @ ..] => {
            if rest.contains(&"--refresh") {
                if !store.clear_cache() {
                    warn!("Could not clear parks cache, listing cached data");
                }
            }
            let parks = store.fetch_with_cache(loader).await?;
            for park in &parks {
                let marker = if store.is_favorite(&park.id) { "*" } else { " " };
                writeln!(out, "{} {:<8} {:<32} {}", marker, park.id, park.name, park.location)?;
            }
            writeln!(out, "{} parks (updated {})", parks.len(), store.cache_age_display())?;
            Ok(())
        }
        ["plan", season, activities @ ..] => {
            let parks = store
                .fetch_with_cache(loader)
                .await
                .context("Unable to plan a trip without parks data")?;

            let mut trip = TripData::for_season(*season);
            trip.activities = activities.iter().map(|a| a.to_string()).collect();
            trip.timestamp = Some(store.clock().now());
            let recommendations = planner::recommend(&parks, &trip);
            info!(count = recommendations.len(), season = %season, "Generated recommendations");

            let saved = store.save_trip_data(&trip) && store.save_recommendations(&recommendations);
            print_recommendations(&recommendations, out)?;
            if !saved {
                warn!("Trip plan was not saved");
                writeln!(out, "(not saved: storage unavailable or full)")?;
            }
            Ok(())
        }
        ["trip"] => {
            match store.trip_data() {
                Some(trip) => writeln!(
                    out,
                    "Trip: season {}, activities {}",
                    trip.season.as_deref().unwrap_or("any"),
                    if trip.activities.is_empty() {
                        "any".to_string()
                    } else {
                        trip.activities.join(", ")
                    }
                )?,
                None => writeln!(out, "No trip planned")?,
            }
            print_recommendations(&store.recommendations(), out)
        }
        ["status"] => {
            writeln!(out, "Storage available: {}", store.is_available())?;
            writeln!(out, "Favorites: {}", store.favorites_count())?;
            writeln!(out, "Recently viewed: {}", store.recently_viewed().len())?;
            writeln!(out, "Parks cache: {}", store.cache_age_display())?;
            Ok(())
        }
        ["clear"] => {
            if !store.clear_all() {
                bail!("Storage is not available");
            }
            writeln!(out, "All stored data cleared")?;
            Ok(())
        }
        _ => bail!("{}", USAGE),
    }
}

fn park_arg(id: &str, name: &str, rest: &[&str]) -> Park {
    Park::new(id, name).with_location(rest.join(" "))
}

fn list_favorites<M: Medium, C: Clock, W: Write>(store: &Store<M, C>, out: &mut W) -> Result<()> {
    let favorites = store.favorites();
    if favorites.is_empty() {
        writeln!(out, "No favorite parks yet")?;
    }
    for fav in favorites {
        writeln!(out, "{:<8} {:<32} {}", fav.id, fav.name, fav.location)?;
    }
    Ok(())
}

fn show_preferences<M: Medium, C: Clock, W: Write>(store: &Store<M, C>, out: &mut W) -> Result<()> {
    let prefs = store.preferences();
    for key in PreferenceKey::ALL {
        writeln!(out, "{} = {:?}", key, prefs.get(key))?;
    }
    Ok(())
}

fn print_recommendations<W: Write>(parks: &[Park], out: &mut W) -> Result<()> {
    if parks.is_empty() {
        writeln!(out, "No matching parks")?;
    }
    for (i, park) in parks.iter().enumerate() {
        let rating = park
            .rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| "-".to_string());
        writeln!(out, "{}. {} ({}) rating {}", i + 1, park.name, park.location, rating)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use parkstash_core::{FileLoader, ManualClock, MemoryMedium};

    use super::*;

    const DATASET: &str = r#"[
        {"id":"zion","name":"Zion","location":"Utah","bestSeason":"Spring, Fall",
         "activities":["Hiking"],"elevation":3666,"rating":4.8},
        {"id":"romo","name":"Rocky Mountain","location":"Colorado","bestSeason":"Summer",
         "activities":["Hiking"],"elevation":8150,"rating":4.9}
    ]"#;

    struct Fixture {
        _dir: tempfile::TempDir,
        loader: FileLoader,
        store: Store<MemoryMedium, ManualClock>,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parks.json");
        std::fs::write(&path, DATASET).unwrap();
        Fixture {
            loader: FileLoader::new(path),
            _dir: dir,
            store: Store::with_clock(MemoryMedium::new(), ManualClock::default()),
        }
    }

    async fn exec(fx: &Fixture, args: &[&str]) -> Result<String> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let mut out = Vec::new();
        run(&fx.store, &fx.loader, &args, &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_favorites_commands() {
        let fx = fixture();
        let out = exec(&fx, &["favorites", "add", "zion", "Zion", "Springdale,", "Utah"])
            .await
            .unwrap();
        assert_eq!(out, "Added Zion to favorites\n");
        assert_eq!(fx.store.favorites()[0].location, "Springdale, Utah");

        let out = exec(&fx, &["favorites", "toggle", "zion", "Zion"]).await.unwrap();
        assert_eq!(out, "Removed Zion\n");
        let out = exec(&fx, &["favorites"]).await.unwrap();
        assert_eq!(out, "No favorite parks yet\n");
    }

    #[tokio::test]
    async fn test_prefs_set_rejects_unknown_key() {
        let fx = fixture();
        let out = exec(&fx, &["prefs", "set", "viewMode", "list"]).await.unwrap();
        assert!(out.contains("viewMode = \"list\""));
        assert!(out.contains("sortBy = \"name\""));
        assert!(exec(&fx, &["prefs", "set", "colour", "red"]).await.is_err());
    }

    #[tokio::test]
    async fn test_parks_marks_favorites() {
        let fx = fixture();
        fx.store.add_favorite(&Park::new("romo", "Rocky Mountain"));
        let out = exec(&fx, &["parks"]).await.unwrap();
        assert!(out.lines().any(|l| l.starts_with("* romo")));
        assert!(out.lines().any(|l| l.starts_with("  zion")));
        assert!(out.ends_with("2 parks (updated just now)\n"));
    }

    #[tokio::test]
    async fn test_plan_saves_trip_and_recommendations() {
        let fx = fixture();
        let out = exec(&fx, &["plan", "Summer", "Hiking"]).await.unwrap();
        assert_eq!(out, "1. Rocky Mountain (Colorado) rating 4.9\n");
        assert_eq!(fx.store.trip_data().unwrap().season.as_deref(), Some("Summer"));
        assert_eq!(fx.store.recommendations().len(), 1);

        let out = exec(&fx, &["trip"]).await.unwrap();
        assert!(out.starts_with("Trip: season Summer, activities Hiking\n"));
    }

    #[tokio::test]
    async fn test_failed_favorite_write_is_reported() {
        let fx = fixture();
        fx.store.medium().set_available(false);
        let err = exec(&fx, &["favorites", "add", "zion", "Zion"]).await.unwrap_err();
        assert_eq!(err.to_string(), "Could not save favorite zion");

        fx.store.medium().set_available(true);
        exec(&fx, &["favorites", "add", "zion", "Zion"]).await.unwrap();
        let out = exec(&fx, &["favorites", "add", "zion", "Zion"]).await.unwrap();
        assert_eq!(out, "Zion is already a favorite\n");
    }

    #[tokio::test]
    async fn test_plan_reports_unsaved_trip() {
        let fx = fixture();
        fx.store.medium().set_available(false);
        let out = exec(&fx, &["plan", "Summer", "Hiking"]).await.unwrap();
        assert_eq!(
            out,
            "1. Rocky Mountain (Colorado) rating 4.9\n(not saved: storage unavailable or full)\n"
        );
        fx.store.medium().set_available(true);
        assert_eq!(fx.store.trip_data(), None);
    }

    #[tokio::test]
    async fn test_refresh_lists_parks_when_cache_cannot_be_cleared() {
        let fx = fixture();
        fx.store.medium().set_available(false);
        let out = exec(&fx, &["parks", "--refresh"]).await.unwrap();
        assert!(out.lines().any(|l| l.starts_with("  zion")));
        assert!(out.ends_with("2 parks (updated never)\n"));
    }

    #[tokio::test]
    async fn test_clear_and_unknown_command() {
        let fx = fixture();
        exec(&fx, &["viewed", "add", "zion", "Zion"]).await.unwrap();
        exec(&fx, &["clear"]).await.unwrap();
        assert_eq!(exec(&fx, &["viewed"]).await.unwrap(), "No parks viewed yet\n");

        let err = exec(&fx, &["launch"]).await.unwrap_err();
        assert!(err.to_string().starts_with("Usage: parkstash"));
    }
}
