use crate::catalogue::{CataloguePanel, ComponentKind, ComponentSpec, catalogue_menu};
use crate::config::load_config;
use crate::placement::placement_for_surface;
use crate::surface::SheetSnapshot;
use anyhow::Result;
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "splace",
    version,
    about = "Pick a non-overlapping position for a new schematic component"
)]
pub struct Args {
    /// Sheet snapshot (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config file (JSON or JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Id of the last inserted component (overrides the snapshot's hint)
    #[arg(long = "last")]
    pub last: Option<String>,

    /// Insert a catalogue component and print the updated sheet
    #[arg(long = "insert", value_name = "KIND")]
    pub insert: Option<String>,

    /// Bit width asked for by the insertion dialog
    #[arg(long = "bits")]
    pub bits: Option<u32>,

    /// Name asked for by the insertion dialog
    #[arg(long = "name")]
    pub name: Option<String>,

    /// Print the component catalogue and exit
    #[arg(long = "list")]
    pub list: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    if args.list {
        return write_output(&render_menu(), args.output.as_deref());
    }

    let config = load_config(args.config.as_deref())?;
    let input = read_input(args.input.as_deref())?;
    let mut sheet = parse_sheet(&input)?;
    if args.last.is_some() {
        sheet.last_placed = args.last.clone();
    }

    let Some(kind) = args.insert.as_deref() else {
        let placement = placement_for_surface(
            &sheet,
            sheet.last_placed.as_deref(),
            &config.placement,
            &config.viewport,
        );
        let json = serde_json::to_string_pretty(&placement)?;
        return write_output(&json, args.output.as_deref());
    };

    let mut spec = ComponentSpec::new(kind.parse::<ComponentKind>()?);
    spec.bits = args.bits;
    spec.name = args.name.clone();

    let mut panel = CataloguePanel::new(config).with_last_placed(sheet.last_placed.clone());
    let inserted = panel.insert(&mut sheet, &spec)?;
    sheet.last_placed = Some(inserted.id);
    write_output(&sheet.to_json()?, args.output.as_deref())
}

fn parse_sheet(input: &str) -> Result<SheetSnapshot> {
    if input.trim().is_empty() {
        return Ok(SheetSnapshot::default());
    }
    Ok(SheetSnapshot::from_json(input)?)
}

fn render_menu() -> String {
    let mut out = String::new();
    for section in catalogue_menu() {
        out.push_str(section.title);
        out.push('\n');
        for entry in section.entries {
            out.push_str(&format!("  {:<12} {}\n", entry.key, entry.title));
        }
    }
    out
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn write_output(contents: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, contents.as_bytes())?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            if !contents.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_lists_every_group() {
        let menu = render_menu();
        assert!(menu.starts_with("Gates\n"));
        assert!(menu.contains("Inputs/Outputs"));
        assert!(menu.contains("  num_entry    Input"));
    }

    #[test]
    fn blank_input_is_an_empty_sheet() {
        assert_eq!(parse_sheet("  \n").unwrap(), SheetSnapshot::default());
    }

    #[test]
    fn parses_cli_flags() {
        let args = Args::parse_from([
            "splace", "-i", "sheet.json", "--insert", "and", "--bits", "4", "--last", "g1",
        ]);
        assert_eq!(args.insert.as_deref(), Some("and"));
        assert_eq!(args.bits, Some(4));
        assert_eq!(args.last.as_deref(), Some("g1"));
        assert_eq!(args.log_level, "warn");
    }
}
