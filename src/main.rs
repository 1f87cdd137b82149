use flavorwheel::data::ratings::unescape_label;
use flavorwheel::data::{SeriesInput, load_ratings, preset_labels, preset_names};
use flavorwheel::{Chart, RawPoint, WheelConfig, WheelOptions};

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use log::info;

#[derive(Parser, Debug)]
#[command(name = "flavorwheel")]
#[command(about = "Radial flavor wheel charts rendered to SVG", version)]
struct Args {
    /// Comma separated category labels (e.g. "sweet,sour,salty"); write \n for a line break
    #[arg(long, conflicts_with = "preset")]
    labels: Option<String>,

    /// Built-in label set: beer, coffee, tea, whisky or wine
    #[arg(long)]
    preset: Option<String>,

    /// Highest rating on the scale
    #[arg(long, default_value_t = 5.0)]
    max_rating: f64,

    /// Radius of the outer grid ring
    #[arg(long, default_value_t = 250.0)]
    grid_radius: f64,

    /// Side of the square view box
    #[arg(long, default_value_t = 800.0)]
    view_width: f64,

    /// Number of grid rings; defaults to one per rating step
    #[arg(long)]
    ring_count: Option<usize>,

    /// Distance between the outer ring and the label centers
    #[arg(long, default_value_t = 50.0)]
    label_margin: f64,

    /// Ratings CSV with columns series,label,value[,class]; .gz files are decompressed
    #[arg(long = "data")]
    data: Vec<String>,

    /// Inline series as KEY=label:value,label:value[@class]
    #[arg(long = "series")]
    series: Vec<String>,

    /// Skip drawing the category labels
    #[arg(long)]
    no_labels: bool,

    /// Optional CSS override file path; if omitted embedded CSS is used
    #[arg(long)]
    css: Option<String>,

    /// Output SVG path
    #[arg(short = 'o', long = "out")]
    out: String,
}

fn parse_labels(s: &str) -> Result<Vec<String>> {
    let labels: Vec<String> = s
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(unescape_label)
        .collect();
    if labels.is_empty() {
        bail!("no labels in '{s}'");
    }
    Ok(labels)
}

fn resolve_labels(labels: Option<&str>, preset: Option<&str>) -> Result<Vec<String>> {
    match (labels, preset) {
        (Some(l), _) => parse_labels(l),
        (None, Some(p)) => preset_labels(p).ok_or_else(|| {
            anyhow!(
                "unknown preset '{p}'. Use: {}",
                preset_names().join(" | ")
            )
        }),
        (None, None) => bail!("either --labels or --preset is required"),
    }
}

fn parse_series_spec(s: &str) -> Result<SeriesInput> {
    let (key, rest) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("bad series '{s}': expected KEY=label:value,..."))?;
    let key = key.trim();
    if key.is_empty() {
        bail!("bad series '{s}': empty key");
    }
    let (body, class_name) = match rest.rsplit_once('@') {
        Some((body, class)) if !class.trim().is_empty() => (body, Some(class.trim().to_owned())),
        Some((body, _)) => (body, None),
        None => (rest, None),
    };

    let mut points = Vec::new();
    for part in body.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (label, value) = part
            .rsplit_once(':')
            .ok_or_else(|| anyhow!("bad point '{part}' in series {key}: expected label:value"))?;
        let value: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("rating for '{label}' in series {key}"))?;
        points.push(RawPoint::new(unescape_label(label.trim()), value));
    }
    Ok(SeriesInput {
        key: key.to_owned(),
        points,
        class_name,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let labels = resolve_labels(args.labels.as_deref(), args.preset.as_deref())?;
    let options = WheelOptions {
        labels,
        max_rating: args.max_rating,
        grid_radius: args.grid_radius,
        view_width: args.view_width,
        ring_count: args.ring_count,
        label_margin: args.label_margin,
        ..Default::default()
    };
    let cfg = WheelConfig::new(options).context("building wheel configuration")?;

    let mut series = Vec::new();
    for path in &args.data {
        series.extend(load_ratings(path)?);
    }
    for spec in &args.series {
        series.push(parse_series_spec(spec)?);
    }

    let mut chart = Chart::new(&cfg, args.css)?;
    if !args.no_labels {
        chart.renderer.render_config_labels()?;
    }
    for s in &series {
        chart
            .renderer
            .add_data(&s.points, &s.key, s.class_name.as_deref())
            .with_context(|| format!("adding series {}", s.key))?;
    }

    chart
        .to_file(&args.out)
        .with_context(|| format!("writing {}", args.out))?;
    info!("wrote {} series to {}", series.len(), args.out);

    Ok(())
}
