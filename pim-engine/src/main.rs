use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pim_engine::{Config, ElasticStore, Engine, PgRelationalStore, init_logger};
use serde::Serialize;
use shared::{EntityKind, ListFilters};

#[derive(Parser)]
#[command(name = "pim-engine")]
#[command(about = "Build product catalog entities from the PIM stores")]
struct Args {
    /// Public locale (en, de-DE, ...)
    #[arg(short, long, default_value = "en", global = true)]
    locale: String,

    #[arg(short, long, default_value = "systemair", global = true)]
    brand: String,

    /// Market id; derived from brand and locale when omitted
    #[arg(short, long, global = true)]
    market: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build one entity
    Get { kind: EntityKind, id: String },
    /// One page of entities
    List {
        kind: EntityKind,
        #[arg(long, default_value_t = 0)]
        offset: usize,
        #[arg(long, default_value_t = 20)]
        limit: usize,
        #[arg(long)]
        parent_id: Option<String>,
        #[arg(long)]
        sku_id: Option<String>,
    },
    /// SKUs of a product
    Skus { product_id: String },
    /// Related objects of a SKU
    Relations { id: String },
    /// Documents of a SKU
    Documents { id: String },
    /// Certifications in use
    Certifications,
    /// Markets with live shop assortments
    Shops,
}

fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger(&config.log_level, config.log_json, config.log_dir.as_deref())?;
    let args = Args::parse();

    let docs = ElasticStore::new(&config.elastic).context("document store client")?;
    let sql = PgRelationalStore::connect(&config.database)
        .await
        .context("relational store")?;
    let engine = Engine::from_config(&config, Arc::new(docs), Arc::new(sql));

    let scope = engine.scope(&args.locale, &args.brand, args.market.as_deref())?;
    tracing::info!(
        environment = %config.environment,
        lang = %scope.lang,
        brand = %scope.brand,
        market = %scope.market,
        "PIM engine ready"
    );
    let (lang, brand, market) = (&scope.lang, &scope.brand, &scope.market);

    match args.command {
        Command::Get { kind, id } => {
            match engine.build_entity(kind, &id, lang, brand, market).await? {
                Some(entity) => print(&entity)?,
                None => anyhow::bail!("{kind} {id} not found"),
            }
        }
        Command::List {
            kind,
            offset,
            limit,
            parent_id,
            sku_id,
        } => {
            let filters = ListFilters { parent_id, sku_id };
            let page = engine
                .list_entities(kind, offset, limit, lang, brand, market, &filters)
                .await?;
            print(&page)?;
        }
        Command::Skus { product_id } => {
            print(&engine.product_skus(&product_id, lang, brand, market).await?)?;
        }
        Command::Relations { id } => match engine.sku_relations(&id, lang, brand).await? {
            Some(relations) => print(&relations)?,
            None => anyhow::bail!("sku {id} not found"),
        },
        Command::Documents { id } => match engine.sku_documents(&id, lang, brand).await? {
            Some(documents) => print(&documents)?,
            None => anyhow::bail!("sku {id} not found"),
        },
        Command::Certifications => print(&engine.list_certifications(lang).await?)?,
        Command::Shops => print(&engine.shop_overview(brand).await?)?,
    }
    Ok(())
}
