use std::path::PathBuf;

use clap::{Parser, Subcommand};
use foundation::{MapPoint, Vec3, WorldCoord};
use layers::TileCoord;
use serde::Serialize;
use tools::{
    Workspace, format_layer_row, layer_rows, locate, parse_link, tile_url, unproject, view_link,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect a rendered Tectonicus map directory")]
struct Args {
    /// Content file written by the renderer
    #[arg(long, default_value = "contents.json")]
    contents: PathBuf,

    /// Viewer settings (maxZoom, defaultLayerId, ...)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List layers with their start view and marker counts
    Layers,

    /// Print the url of one tile
    TileUrl {
        #[arg(long)]
        layer: Option<String>,
        #[arg(allow_negative_numbers = true)]
        x: i64,
        #[arg(allow_negative_numbers = true)]
        y: i64,
        z: i64,
    },

    /// Build a link opening a layer at a world position
    Link {
        #[arg(long)]
        layer: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        x: i64,
        #[arg(long, default_value_t = 64, allow_negative_numbers = true)]
        y: i64,
        #[arg(long, allow_negative_numbers = true)]
        z: i64,
        #[arg(long, default_value_t = 0)]
        zoom: u32,
        /// Page url; its fragment is replaced
        #[arg(long, default_value = "index.html")]
        base: String,
    },

    /// Decode the view a link opens
    ParseLink { url: String },

    /// Project a world position onto the map
    Locate {
        #[arg(long)]
        layer: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, default_value_t = 64.0, allow_negative_numbers = true)]
        y: f64,
        #[arg(long, allow_negative_numbers = true)]
        z: f64,
        /// Also report lat/long for this latitude range
        #[arg(long, num_args = 0..=1, default_missing_value = "10")]
        lat_lng: Option<f64>,
    },

    /// Turn a map point back into a world position
    Unproject {
        #[arg(long)]
        layer: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// Known altitude; sea level when omitted
        #[arg(long, allow_negative_numbers = true)]
        y: Option<f64>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main(Args::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn print<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> Result<(), String> {
    if json {
        let out = serde_json::to_string_pretty(value).map_err(|e| format!("encode json: {e}"))?;
        println!("{out}");
    } else {
        println!("{}", text(value));
    }
    Ok(())
}

fn real_main(args: Args) -> Result<(), String> {
    let ws = Workspace::load(&args.contents, args.config.as_deref()).map_err(|e| e.to_string())?;

    match args.command {
        Command::Layers => print(args.json, &layer_rows(&ws), |rows| {
            rows.iter().map(format_layer_row).collect::<Vec<_>>().join("\n")
        }),
        Command::TileUrl { layer, x, y, z } => {
            let layer = ws.layer(layer.as_deref()).map_err(|e| e.to_string())?;
            print(args.json, &tile_url(layer, TileCoord::new(x, y, z)), String::clone)
        }
        Command::Link {
            layer,
            x,
            y,
            z,
            zoom,
            base,
        } => {
            let layer = ws.layer(layer.as_deref()).map_err(|e| e.to_string())?;
            let zoom = zoom.min(ws.config.max_zoom);
            print(
                args.json,
                &view_link(&base, layer, WorldCoord::new(x, y, z), zoom),
                String::clone,
            )
        }
        Command::ParseLink { url } => {
            let state = parse_link(&ws, &url);
            let row = serde_json::json!({
                "layerId": state.layer_id.as_str(),
                "worldPos": state.world_pos,
                "zoom": state.zoom,
            });
            print(args.json, &row, |_| {
                format!("{}\t{}\tzoom {}", state.layer_id, state.world_pos, state.zoom)
            })
        }
        Command::Locate {
            layer,
            x,
            y,
            z,
            lat_lng,
        } => {
            let layer = ws.layer(layer.as_deref()).map_err(|e| e.to_string())?;
            let loc = locate(layer, Vec3::new(x, y, z), lat_lng).map_err(|e| e.to_string())?;
            print(args.json, &loc, |l| {
                let mut out = format!(
                    "pixel {:.3}, {:.3}\nmap   {:.3}, {:.3}",
                    l.pixel.x, l.pixel.y, l.map.lat, l.map.lng
                );
                if let Some(ll) = l.lat_lng {
                    out.push_str(&format!("\nlatlng {:.6}, {:.6}", ll.lat, ll.lng));
                }
                out
            })
        }
        Command::Unproject { layer, lat, lng, y } => {
            let layer = ws.layer(layer.as_deref()).map_err(|e| e.to_string())?;
            let world = unproject(layer, MapPoint::new(lat, lng), y);
            print(args.json, &world, |w| {
                format!("{:.3}, {:.3}, {:.3}\t(block {})", w.x, w.y, w.z, WorldCoord::round(*w))
            })
        }
    }
}
