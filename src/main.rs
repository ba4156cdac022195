use std::{env, fs, path::Path, time::Instant};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use storefront_recommender::{Catalog, Recommender, RecommenderConfig};
use tracing::info;

const USAGE: &str = "usage: storefront-recommender <catalog.json|catalog.cbor> <command>

commands:
  similar <id>        TF-IDF similar products (same gender and category)
  cart [json-ids]     recommendations for a cart, e.g. '[\"id1\",\"id2\"]'
  compare <id>        bag-of-words vs TF-IDF for one product
  related <id>        same gender and category, no scoring
  best-seller         highest rated product
  new-arrivals        most recently created products";

fn load_catalog(path: &Path) -> Result<Catalog> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let catalog = match path.extension().and_then(|e| e.to_str()) {
        Some("cbor") => Catalog::from_cbor_slice(&bytes),
        _ => Catalog::from_json_slice(&bytes),
    }
    .with_context(|| format!("decoding {}", path.display()))?;
    Ok(catalog)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn require_id(arg: Option<&String>) -> Result<&str> {
    match arg {
        Some(id) => Ok(id.as_str()),
        None => bail!("missing product id\n\n{USAGE}"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("storefront_recommender=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (path, command) = match (args.first(), args.get(1)) {
        (Some(path), Some(command)) => (Path::new(path), command.as_str()),
        _ => bail!("{USAGE}"),
    };

    let config = RecommenderConfig::from_env()?;
    let recommender = Recommender::new(config);

    let start = Instant::now();
    let catalog = load_catalog(path)?;
    info!(products = catalog.len(), elapsed = ?start.elapsed(), "catalog loaded");

    let start = Instant::now();
    match command {
        "similar" => print_json(&recommender.similar_products(&catalog, require_id(args.get(2))?)?)?,
        "cart" => print_json(&recommender.cart_recommendations_from_payload(&catalog, args.get(2).map(String::as_str)))?,
        "compare" => print_json(&recommender.compare(&catalog, require_id(args.get(2))?)?)?,
        "related" => print_json(
            &catalog.similar_by_attributes(require_id(args.get(2))?, recommender.config().similar_limit)?,
        )?,
        "best-seller" => match catalog.best_seller() {
            Some(item) => print_json(item)?,
            None => bail!("no best seller found"),
        },
        "new-arrivals" => print_json(&catalog.new_arrivals(recommender.config().new_arrivals_limit))?,
        other => bail!("unknown command `{other}`\n\n{USAGE}"),
    }
    info!(command, elapsed = ?start.elapsed(), "done");
    Ok(())
}
