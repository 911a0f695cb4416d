use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use dr_deliveroo::{Coordinate, Restaurants, Session, SessionConfig};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct CliArgs {
    #[command(subcommand)]
    pub subcommand: Command,

    #[command(flatten)]
    pub global_opts: GlobalOpts,
}

#[derive(Args, Debug)]
struct GlobalOpts {
    #[arg(short = 'b', long, global = true, help = "API root")]
    pub base_url: Option<String>,

    #[arg(short = 's', long, global = true, help = "Page visited to obtain session cookies")]
    pub session_url: Option<String>,

    #[arg(long, global = true, help = "Print session cookies after establishing")]
    pub dump_cookies: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    #[clap(name = "restaurants", about = "List restaurants near a coordinate")]
    Restaurants {
        #[command(flatten)]
        coordinate_opts: CoordinateOpts,

        #[arg(long, help = "Print JSON instead of one line per restaurant")]
        json: bool,
    },

    #[clap(name = "menus", about = "Fetch menus for the nearest restaurants")]
    Menus {
        #[command(flatten)]
        coordinate_opts: CoordinateOpts,

        #[arg(short = 'n', long, default_value_t = 5, help = "Number of restaurants")]
        limit: usize,

        #[arg(short = 'o', long, help = "Output file")]
        output_path: Option<String>,
    },
}

#[derive(Args, Debug, PartialEq)]
struct CoordinateOpts {
    #[arg(long, default_value = "52.5166791", allow_hyphen_values = true)]
    pub lat: String,
    #[arg(long, default_value = "13.4584727", allow_hyphen_values = true)]
    pub lng: String,
}

impl CoordinateOpts {
    fn coordinate(&self) -> Result<Coordinate> {
        Ok(Coordinate::parse(&self.lat, &self.lng)?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG, when set, replaces the default filter entirely.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dr_deliveroo=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let mut config = SessionConfig::builder();
    if let Some(base_url) = args.global_opts.base_url {
        config.base_url(base_url);
    }
    if let Some(session_url) = args.global_opts.session_url {
        config.session_url(session_url);
    }
    let mut session = Session::new(config.build()?)?;
    session.establish().await?;
    if args.global_opts.dump_cookies {
        println!("Cookies");
        for (name, value) in session.dump_cookies() {
            println!("{}={}", name, value);
        }
    }

    match args.subcommand {
        Command::Restaurants {
            coordinate_opts,
            json,
        } => {
            let restaurants = Restaurants::get(&session, &coordinate_opts.coordinate()?).await?;
            tracing::info!(count = restaurants.len(), "fetched restaurants");
            if json {
                println!("{}", serde_json::to_string(&restaurants)?);
            } else {
                for restaurant in &restaurants {
                    println!("{}", restaurant);
                }
            }
        }
        Command::Menus {
            coordinate_opts,
            limit,
            output_path,
        } => {
            let restaurants = Restaurants::get(&session, &coordinate_opts.coordinate()?).await?;
            let mut selected = restaurants.into_iter().take(limit).collect::<Vec<_>>();

            let progress = ProgressBar::new(selected.len() as u64);
            progress.set_style(ProgressStyle::with_template(
                "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )?);
            for restaurant in selected.iter_mut() {
                // A failed menu is logged and the restaurant kept without items.
                let _ = restaurant.load_menu_items(&session).await;
                progress.inc(1);
            }
            progress.finish();

            let json_output = serde_json::to_string_pretty(&selected)?;
            if let Some(output_path) = output_path {
                std::fs::write(output_path, json_output)?;
            } else {
                println!("{}", json_output);
            }
        }
    }

    Ok(())
}
