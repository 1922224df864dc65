use floorgen::render::raster::{RasterError, RasterOptions};
use floorgen::render::{
    FloorPlanLayout, FloorPlanRenderer, HeadlessError, SvgLabels, UnitMetrics, sanitize_svg_id,
};
use floorgen::{LayoutRequest, RawLayoutRequest};
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::{Read, Write};
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Request(floorgen::Error),
    Render(HeadlessError),
    Raster(RasterError),
    Json(serde_json::Error),
}

impl CliError {
    fn is_request_error(&self) -> bool {
        match self {
            CliError::Request(_) => true,
            CliError::Render(err) => err.is_request_error(),
            CliError::Raster(err) => err.is_request_error(),
            _ => false,
        }
    }

    fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            err if err.is_request_error() => 3,
            _ => 1,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Request(err) => write!(f, "invalid request: {err}"),
            CliError::Render(err) if err.is_request_error() => write!(f, "invalid request: {err}"),
            CliError::Raster(err) if err.is_request_error() => write!(f, "invalid request: {err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<floorgen::Error> for CliError {
    fn from(value: floorgen::Error) -> Self {
        Self::Request(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Render(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Check,
    Layout,
    Render,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
    Pdf,
}

impl RenderFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Pdf => "pdf",
        }
    }
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Lang {
    #[default]
    En,
    ZhTw,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    /// Wire-format fields given on the command line; they win over the input document.
    overrides: Map<String, Value>,
    pretty: bool,
    lang: Lang,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    diagram_id: Option<String>,
    out: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckOut<'a> {
    arrangement: &'static str,
    unit_count: u32,
    public_area_m2: f64,
    unit: &'a UnitMetrics,
    unit_display_area: f64,
}

fn usage() -> &'static str {
    "floorgen-cli\n\
\n\
USAGE:\n\
  floorgen-cli [check] [--pretty] [REQUEST FLAGS] [<path>|-]\n\
  floorgen-cli layout [--pretty] [REQUEST FLAGS] [<path>|-]\n\
  floorgen-cli render [--format svg|png|jpg|pdf] [--scale <n>] [--background <color>] [--lang en|zh-tw] [--id <diagram-id>] [--out <path>] [REQUEST FLAGS] [<path>|-]\n\
\n\
REQUEST FLAGS:\n\
  --area <m2> --units <n> --ratio <r> --arrangement L|R|T|B|LR|TB\n\
  --spacing <m> --balcony <m> --m2-to-ping <factor>\n\
\n\
NOTES:\n\
  - The request is a JSON document with building_area_m2, arrangement_type, total_units,\n\
    public_ratio, balcony_depth, unit_spacing and optional m2_to_ping.\n\
  - If <path> is '-', or omitted without request flags, input is read from stdin.\n\
  - Request flags override (or supply) fields of the input document.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG/JPG/PDF output defaults to writing next to the input file (or ./out.<ext> for stdin).\n\
  - Exit codes: 2 usage, 3 invalid request, 1 render or I/O failure.\n\
"
}

fn number_flag(value: Option<&String>) -> Result<Value, CliError> {
    let Some(raw) = value else {
        return Err(CliError::Usage(usage()));
    };
    let n = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| CliError::Usage(usage()))?;
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .ok_or(CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        render_scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "check" => args.command = Command::Check,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--area" => {
                let v = number_flag(it.next())?;
                args.overrides.insert("building_area_m2".into(), v);
            }
            "--ratio" => {
                let v = number_flag(it.next())?;
                args.overrides.insert("public_ratio".into(), v);
            }
            "--spacing" => {
                let v = number_flag(it.next())?;
                args.overrides.insert("unit_spacing".into(), v);
            }
            "--balcony" => {
                let v = number_flag(it.next())?;
                args.overrides.insert("balcony_depth".into(), v);
            }
            "--m2-to-ping" => {
                let v = number_flag(it.next())?;
                args.overrides.insert("m2_to_ping".into(), v);
            }
            "--units" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let n = n.trim().parse::<i64>().map_err(|_| CliError::Usage(usage()))?;
                args.overrides.insert("total_units".into(), Value::from(n));
            }
            "--arrangement" => {
                let Some(code) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.overrides
                    .insert("arrangement_type".into(), Value::from(code.as_str()));
            }
            "--lang" => {
                let Some(lang) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.lang = match lang.trim().to_ascii_lowercase().as_str() {
                    "en" => Lang::En,
                    "zh-tw" | "zh_tw" => Lang::ZhTw,
                    _ => return Err(CliError::Usage(usage())),
                };
            }
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_format = fmt
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.diagram_id = Some(id.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

/// Builds the request from the input document (if any) with flag overrides applied.
fn load_request(args: &Args) -> Result<LayoutRequest, CliError> {
    let read_document = args.input.is_some() || args.overrides.is_empty();
    let mut doc = if read_document {
        let text = read_input(args.input.as_deref())?;
        serde_json::from_str::<Value>(&text).map_err(floorgen::Error::from)?
    } else {
        Value::Object(Map::new())
    };

    let Value::Object(fields) = &mut doc else {
        return Err(CliError::Request(floorgen::Error::InvalidParameter {
            name: "request",
            message: "expected a JSON object".to_string(),
        }));
    };
    for (k, v) in &args.overrides {
        fields.insert(k.clone(), v.clone());
    }

    let raw: RawLayoutRequest = serde_json::from_value(doc).map_err(floorgen::Error::from)?;
    log::debug!("request document: {raw:?}");
    Ok(LayoutRequest::try_from(raw)?)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn write_bytes(bytes: &[u8], out: &str) -> Result<(), CliError> {
    if out == "-" {
        std::io::stdout().lock().write_all(bytes)?;
    } else {
        std::fs::write(out, bytes)?;
        log::info!("wrote {} bytes to {out}", bytes.len());
    }
    Ok(())
}

fn default_raster_out_path(input: Option<&str>, ext: &str) -> std::path::PathBuf {
    match input {
        Some(path) if path != "-" => std::path::PathBuf::from(path).with_extension(ext),
        _ => std::path::PathBuf::from(format!("out.{ext}")),
    }
}

fn build_renderer(args: &Args) -> FloorPlanRenderer {
    let mut renderer = FloorPlanRenderer::new();
    if let Lang::ZhTw = args.lang {
        renderer = renderer.with_labels(SvgLabels::zh_tw());
    }
    renderer.svg.diagram_id = args.diagram_id.as_deref().map(sanitize_svg_id);
    renderer
}

fn check_out(layout: &FloorPlanLayout) -> CheckOut<'_> {
    let req = &layout.request;
    CheckOut {
        arrangement: req.arrangement.code(),
        unit_count: req.unit_count,
        public_area_m2: layout.unit.public_area_m2,
        unit: &layout.unit,
        unit_display_area: req.display_area(layout.unit.target_area_m2),
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let request = load_request(&args)?;
    let renderer = build_renderer(&args);

    match args.command {
        Command::Check => {
            let layout = renderer.layout_sync(&request)?;
            write_json(&check_out(&layout), args.pretty)
        }
        Command::Layout => {
            let layout = renderer.layout_sync(&request)?;
            write_json(&layout, args.pretty)
        }
        Command::Render => {
            let raster = RasterOptions {
                scale: args.render_scale,
                background: args.background.clone(),
                ..RasterOptions::default()
            };
            let bytes = match args.render_format {
                RenderFormat::Svg => {
                    let svg = renderer.render_svg_sync(&request)?;
                    match args.out.as_deref() {
                        None => {
                            print!("{svg}");
                            return Ok(());
                        }
                        Some(_) => svg.into_bytes(),
                    }
                }
                RenderFormat::Png => renderer.render_png_sync(&request, &raster)?,
                RenderFormat::Jpeg => renderer.render_jpeg_sync(&request, &raster)?,
                RenderFormat::Pdf => renderer.render_pdf_sync(&request)?,
            };
            let out = args.out.clone().unwrap_or_else(|| {
                default_raster_out_path(args.input.as_deref(), args.render_format.extension())
                    .to_string_lossy()
                    .to_string()
            });
            write_bytes(&bytes, &out)
        }
    }
}

fn main() {
    env_logger::init();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(err.exit_code());
        }
    };
    log::debug!("{args:?}");

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        std::iter::once("floorgen-cli")
            .chain(items.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn flags_become_wire_overrides() {
        let args = parse_args(&argv(&[
            "layout",
            "--area",
            "1000",
            "--units",
            "10",
            "--arrangement",
            "tb",
        ]))
        .unwrap();
        assert!(matches!(args.command, Command::Layout));
        assert_eq!(args.overrides["building_area_m2"], 1000.0);
        assert_eq!(args.overrides["total_units"], 10);
        assert_eq!(args.overrides["arrangement_type"], "tb");
        assert!(args.input.is_none());
    }

    #[test]
    fn overrides_alone_build_a_request() {
        let args = parse_args(&argv(&[
            "check",
            "--area",
            "1000",
            "--units",
            "10",
            "--ratio",
            "0.2",
            "--arrangement",
            "TB",
            "--spacing",
            "0.5",
            "--balcony",
            "1.5",
        ]))
        .unwrap();
        let req = load_request(&args).unwrap();
        assert_eq!(req.unit_count, 10);
        assert_eq!(req.arrangement, floorgen::ArrangementType::BothTopBottom);
    }

    #[test]
    fn bad_flags_are_usage_errors() {
        let cases: [&[&str]; 7] = [
            &["--units"],
            &["--area", "lots"],
            &["--format", "gif"],
            &["--scale", "0"],
            &["--lang", "fr"],
            &["--bogus"],
            &["a.json", "b.json"],
        ];
        for bad in cases {
            let err = parse_args(&argv(bad)).unwrap_err();
            assert_eq!(err.exit_code(), 2, "{bad:?}");
        }
    }

    #[test]
    fn default_out_path_follows_input() {
        assert_eq!(
            default_raster_out_path(Some("plans/a.json"), "png"),
            std::path::PathBuf::from("plans/a.png")
        );
        assert_eq!(
            default_raster_out_path(Some("-"), "pdf"),
            std::path::PathBuf::from("out.pdf")
        );
        assert_eq!(
            default_raster_out_path(None, "jpg"),
            std::path::PathBuf::from("out.jpg")
        );
    }
}
