use std::{fs::File, io::BufWriter, path::PathBuf, sync::Arc};

use clap::Parser;
use pinmap::{
    config::Config,
    directions::OsrmDirections,
    display::{LogAlerts, NoDisplay},
    geocoding::NominatimGeocoder,
    gpx_export::write_gpx,
    session::Session,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Geocode addresses in order and print the walking route between them"
)]
struct Args {
    /// Addresses, visited in the given order
    #[arg(required = true, num_args = 2..)]
    addresses: Vec<String>,

    /// Write the route as GPX to this path
    #[arg(long)]
    gpx: Option<PathBuf>,

    /// Nominatim-compatible geocoder base URL
    #[arg(long)]
    geocoder_url: Option<String>,

    /// OSRM-compatible directions base URL
    #[arg(long)]
    directions_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(url) = args.geocoder_url {
        config.geocoder_url = url;
    }
    if let Some(url) = args.directions_url {
        config.directions_url = url;
    }

    let client = config.http_client()?;
    let session = Session::new(
        Arc::new(NominatimGeocoder::new(client.clone(), config.geocoder_url.clone())),
        Arc::new(OsrmDirections::new(client, config.directions_url.clone())),
        Arc::new(NoDisplay),
        Arc::new(LogAlerts),
    );

    for address in &args.addresses {
        match session.add_address(address).await {
            Ok(pin) => println!(
                "pin {:>2}  {:<40} {:.5}, {:.5}",
                session.count(),
                pin.label,
                pin.coordinate.lat,
                pin.coordinate.lon
            ),
            Err(err) => eprintln!("skipping {address:?}: {err}"),
        }
    }

    let report = session.build_routes().await?;
    for segment in &report.segments {
        println!(
            "{:>2}. {} -> {}: {:.2} km, {:.0} min",
            segment.index + 1,
            segment.from.label,
            segment.to.label,
            segment.distance_m / 1000.0,
            segment.duration_s / 60.0
        );
    }
    for failure in &report.failures {
        eprintln!(
            "{:>2}. {} -> {}: {}",
            failure.index + 1,
            failure.from,
            failure.to,
            failure.message
        );
    }
    println!("total walking distance: {:.2} km", report.total_distance_m / 1000.0);

    if let Some(path) = args.gpx {
        let out = BufWriter::new(File::create(&path)?);
        write_gpx(&report.waypoints, &report.segments, out)?;
        tracing::info!("GPX written to {}", path.display());
    }

    Ok(())
}
