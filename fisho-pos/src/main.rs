use anyhow::{Context, bail};
use fisho_client::{FishoApi, Session};
use fisho_pos::logger::init_logger;
use fisho_pos::{LogNotifier, PosConfig, Register};

const USAGE: &str = "usage: fisho-pos [STORE_ID [SEARCH...]] | login EMAIL PASSWORD | logout";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment and logging
    let config = PosConfig::from_env();
    init_logger(&config.log_level, config.log_dir.as_deref());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let store = config.session_store();

    match args.first().map(String::as_str) {
        Some("-h") | Some("--help") => {
            println!("{}", USAGE);
            Ok(())
        }
        Some("login") => {
            let (Some(email), Some(password)) = (args.get(1), args.get(2)) else {
                bail!(USAGE);
            };
            let http = config
                .client_config()
                .build_http_client(&Session::anonymous())
                .context("failed to build HTTP client")?;
            let mut api = FishoApi::new(http);
            let session = api
                .login(email, password)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            store.save(&session).context("failed to save session")?;
            println!("Logged in, session saved to {}", store.path().display());
            Ok(())
        }
        Some("logout") => {
            store.delete().context("failed to delete session")?;
            println!("Logged out");
            Ok(())
        }
        store_id => {
            // 2. Session and client
            let session = store.load_or_anonymous();
            if !session.is_authenticated() {
                tracing::warn!("No saved session, requests are sent without a token");
            }
            let http = config
                .client_config()
                .build_http_client(&session)
                .context("failed to build HTTP client")?;
            let mut register = Register::new(FishoApi::new(http), LogNotifier);

            // 3. List stores, or show one store's catalog
            match store_id {
                None => {
                    if !register.load_stores().await {
                        bail!("could not load stores");
                    }
                    for row in register.stores().rows() {
                        println!("{}\t{}", row.item.id, row.item.name);
                    }
                }
                Some(store_id) => {
                    if !register.select_store(store_id).await {
                        bail!("could not load inventory of store {}", store_id);
                    }
                    register.set_search(args[1..].join(" "));
                    for entry in register.visible_entries() {
                        let price = entry
                            .selling_price
                            .map(|p| p.to_string())
                            .unwrap_or_else(|| "-".into());
                        println!("{}\t{}\t{}\tstock {}", entry.id, entry.name, price, entry.total_stock);
                        for variant in &entry.variants {
                            println!("  {}\t{}\t{}", variant.id, variant.name, variant.selling_price);
                        }
                    }
                }
            }
            Ok(())
        }
    }
}
