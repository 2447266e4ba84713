// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use tinysvg::codegen::{self, Target};
use tinysvg::data_uri::{self, format_bytes, format_file_size};
use tinysvg::diff::{self as markup_diff, DIFF_CONTEXT_LINES};
use tinysvg::dimensions::{self, Side};
use tinysvg::export::{self, ExportFormat, ExportSize};
use tinysvg::history::{self, History};
use tinysvg::i18n::{self, Locale};
use tinysvg::session::{Markup, SettingsUpdate};
use tinysvg::source::optimized_file_name;
use tinysvg::transform::{self, Transformation};
use tinysvg::{Config, Session, Source};

fn main() {
    if let Err(e) = process() {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}

const HELP: &str = "\
tinysvg is an SVG optimization, transformation and code generation tool.

USAGE:
  tinysvg <COMMAND> [OPTIONS] ARGS...

  tinysvg optimize icon.svg                   # writes icon.optimized.svg
  tinysvg optimize -c icon.svg                # prints to the stdout
  tinysvg optimize icons/*.svg                # optimizes files in parallel
  tinysvg transform rotate icon.svg           # writes icon.rotated.svg
  tinysvg transform resize -w 48 icon.svg out.svg
  tinysvg export -z 4 icon.svg                # writes icon.png
  tinysvg export --format jpeg -w 512 icon.svg out.jpg
  tinysvg code --target react-tsx icon.svg
  tinysvg data-uri icon.svg
  tinysvg diff --precision 1 icon.svg
  tinysvg history show <ID> -c

COMMANDS:
  optimize <in-svg>...          Optimizes files. '-' reads the stdin
  transform <OP> <in-svg> [out-svg]
                                Applies a transformation
                                [possible values: rotate, flip-h, flip-v, resize]
                                [default out-svg: like icon.rotated.svg]
  export <in-svg> [out-image]   Renders SVG into a raster image
  code <in-svg> [out-file]      Generates a UI component
  data-uri <in-svg>             Prints SVG data URIs
  diff <in-svg>                 Prints a diff between the original and the optimized markup
  info <in-svg>                 Prints SVG sizes and colors
  history [ACTION] [ID]         Manages the conversion history
                                [possible values: list, recent, show, delete, clear]
                                [default: list]
  plugins                       Lists optimization plugins

OPTIONS:
      --help                    Prints this help
  -V, --version                 Prints version
  -c                            Prints the output to the stdout
  -o, --output PATH             Sets the output file of 'optimize'

      --lang LANG               Sets the messages language
                                [possible values: en, zh, ko, de]
                                [default: detected from the environment]
      --config PATH             Loads settings from a JSON file
                                [default: tinysvg/config.json in the user config dir]

      --precision DIGITS        Sets the number of fractional digits
                                [default: 2] [possible values: 0..8 (inclusive)]
      --transform-precision DIGITS
                                Sets the number of fractional digits in transforms
                                [default: 4] [possible values: 0..8 (inclusive)]
      --no-multipass            Runs the plugins pipeline only once
      --enable NAME             Enables a plugin. Can be set multiple times
      --disable NAME            Disables a plugin. Can be set multiple times
      --pretty                  Indents the optimized markup
      --gzip                    Also prints gzipped sizes
      --no-history              Does not save optimized files to the history

  -w, --width LENGTH            Sets the width in pixels
  -h, --height LENGTH           Sets the height in pixels
  -z, --zoom FACTOR             Scales an exported image by a factor
                                [default: 2]
      --auto                    Scales an exported image to be at least 512px
      --format FORMAT           Sets the export format
                                [default: png] [possible values: png, jpeg]
      --quality QUALITY         Sets the JPEG quality
                                [default: 0.95] [possible values: 0..1 (inclusive)]

      --target TARGET           Sets the code generation target
                                [default: react-tsx]
                                [possible values: react-jsx, react-tsx, vue,
                                svelte, react-native, flutter]
      --kind KIND               Prints only one data URI
                                [possible values: minified, base64, url]
      --thumbnail               Prints a thumbnail data URI in 'info'

      --quiet                   Disables warnings
      --verbose                 Enables debug messages
";

#[derive(Clone, Debug)]
enum InputFrom {
    Stdin,
    File(PathBuf),
}

impl std::str::FromStr for InputFrom {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(InputFrom::Stdin)
        } else {
            Ok(InputFrom::File(PathBuf::from(s)))
        }
    }
}

impl std::fmt::Display for InputFrom {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            InputFrom::Stdin => write!(f, "stdin"),
            InputFrom::File(ref path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum TransformOp {
    Rotate,
    FlipHorizontal,
    FlipVertical,
    Resize,
}

impl std::str::FromStr for TransformOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rotate" => Ok(TransformOp::Rotate),
            "flip-h" => Ok(TransformOp::FlipHorizontal),
            "flip-v" => Ok(TransformOp::FlipVertical),
            "resize" => Ok(TransformOp::Resize),
            _ => Err(format!("unknown transformation '{}'", s)),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum UriKind {
    Minified,
    Base64,
    Url,
}

impl std::str::FromStr for UriKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minified" => Ok(UriKind::Minified),
            "base64" => Ok(UriKind::Base64),
            "url" => Ok(UriKind::Url),
            _ => Err(format!("unknown data URI kind '{}'", s)),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
enum HistoryAction {
    List,
    Recent,
    Show(String),
    Delete(String),
    Clear,
}

#[derive(Debug)]
enum Command {
    Optimize(Vec<InputFrom>),
    Transform(TransformOp, InputFrom, Option<PathBuf>),
    Export(InputFrom, Option<PathBuf>),
    Code(InputFrom, Option<PathBuf>),
    DataUri(InputFrom),
    Diff(InputFrom),
    Info(InputFrom),
    History(HistoryAction),
    Plugins,
}

#[derive(Debug)]
struct CliArgs {
    stdout: bool,
    output: Option<PathBuf>,

    lang: Option<Locale>,
    config: Option<PathBuf>,

    precision: Option<u8>,
    transform_precision: Option<u8>,
    no_multipass: bool,
    enable: Vec<String>,
    disable: Vec<String>,
    pretty: bool,
    gzip: bool,
    no_history: bool,

    width: Option<u32>,
    height: Option<u32>,
    zoom: Option<f64>,
    auto: bool,
    format: Option<ExportFormat>,
    quality: Option<f32>,

    target: Target,
    kind: Option<UriKind>,
    thumbnail: bool,

    quiet: bool,
    verbose: bool,

    command: Command,
}

fn collect_args() -> Result<CliArgs, String> {
    let mut input = pico_args::Arguments::from_env();

    if input.contains("--help") {
        print!("{}", HELP);
        std::process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    let subcommand = input.subcommand().map_err(|e| e.to_string())?;
    let mut args = collect_options(&mut input).map_err(|e| e.to_string())?;

    args.command = match subcommand.as_deref() {
        Some("optimize") => {
            let mut files = Vec::new();
            while let Some(file) = input.opt_free_from_str().map_err(|e| e.to_string())? {
                files.push(file);
            }

            if files.is_empty() {
                return Err("no input files".to_string());
            }

            Command::Optimize(files)
        }
        Some("transform") => Command::Transform(
            free(&mut input)?,
            free(&mut input)?,
            opt_free(&mut input)?,
        ),
        Some("export") => Command::Export(free(&mut input)?, opt_free(&mut input)?),
        Some("code") => Command::Code(free(&mut input)?, opt_free(&mut input)?),
        Some("data-uri") => Command::DataUri(free(&mut input)?),
        Some("diff") => Command::Diff(free(&mut input)?),
        Some("info") => Command::Info(free(&mut input)?),
        Some("history") => {
            let action: Option<String> = opt_free(&mut input)?;
            match action.as_deref() {
                None | Some("list") => Command::History(HistoryAction::List),
                Some("recent") => Command::History(HistoryAction::Recent),
                Some("show") => Command::History(HistoryAction::Show(free(&mut input)?)),
                Some("delete") => Command::History(HistoryAction::Delete(free(&mut input)?)),
                Some("clear") => Command::History(HistoryAction::Clear),
                Some(s) => return Err(format!("unknown history action '{}'", s)),
            }
        }
        Some("plugins") => Command::Plugins,
        Some(s) => return Err(format!("unknown command '{}'", s)),
        None => return Err("no command".to_string()),
    };

    let remaining = input.finish();
    if !remaining.is_empty() {
        return Err(format!("unexpected arguments: {:?}", remaining));
    }

    Ok(args)
}

fn collect_options(input: &mut pico_args::Arguments) -> Result<CliArgs, pico_args::Error> {
    Ok(CliArgs {
        stdout: input.contains("-c"),
        output: input.opt_value_from_str(["-o", "--output"])?,

        lang: input.opt_value_from_str("--lang")?,
        config: input.opt_value_from_str("--config")?,

        precision: input.opt_value_from_fn("--precision", parse_precision)?,
        transform_precision: input.opt_value_from_fn("--transform-precision", parse_precision)?,
        no_multipass: input.contains("--no-multipass"),
        enable: input.values_from_str("--enable")?,
        disable: input.values_from_str("--disable")?,
        pretty: input.contains("--pretty"),
        gzip: input.contains("--gzip"),
        no_history: input.contains("--no-history"),

        width: input.opt_value_from_fn(["-w", "--width"], parse_length)?,
        height: input.opt_value_from_fn(["-h", "--height"], parse_length)?,
        zoom: input.opt_value_from_fn(["-z", "--zoom"], parse_zoom)?,
        auto: input.contains("--auto"),
        format: input.opt_value_from_str("--format")?,
        quality: input.opt_value_from_fn("--quality", parse_quality)?,

        target: input
            .opt_value_from_str("--target")?
            .unwrap_or(Target::ReactTsx),
        kind: input.opt_value_from_str("--kind")?,
        thumbnail: input.contains("--thumbnail"),

        quiet: input.contains("--quiet"),
        verbose: input.contains("--verbose"),

        command: Command::Plugins,
    })
}

fn free<T>(input: &mut pico_args::Arguments) -> Result<T, String>
where
    T: std::str::FromStr,
    <T as std::str::FromStr>::Err: std::fmt::Display,
{
    input.free_from_str().map_err(|e| e.to_string())
}

fn opt_free<T>(input: &mut pico_args::Arguments) -> Result<Option<T>, String>
where
    T: std::str::FromStr,
    <T as std::str::FromStr>::Err: std::fmt::Display,
{
    input.opt_free_from_str().map_err(|e| e.to_string())
}

fn parse_precision(s: &str) -> Result<u8, String> {
    let n: u8 = s.parse().map_err(|_| "invalid precision")?;

    if n <= 8 {
        Ok(n)
    } else {
        Err("precision out of bounds".to_string())
    }
}

fn parse_length(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid length")?;

    if n > 0 {
        Ok(n)
    } else {
        Err("LENGTH cannot be zero".to_string())
    }
}

fn parse_zoom(s: &str) -> Result<f64, String> {
    let n: f64 = s.parse().map_err(|_| "invalid zoom factor")?;

    if n > 0.0 {
        Ok(n)
    } else {
        Err("ZOOM should be positive".to_string())
    }
}

fn parse_quality(s: &str) -> Result<f32, String> {
    let n: f32 = s.parse().map_err(|_| "invalid quality")?;

    if (0.0..=1.0).contains(&n) {
        Ok(n)
    } else {
        Err("QUALITY out of bounds".to_string())
    }
}

fn process() -> Result<(), String> {
    let args = match collect_args() {
        Ok(args) => args,
        Err(e) => {
            println!("{}", HELP);
            return Err(e);
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            let level = if args.verbose {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Warn
            };
            log::set_max_level(level);
        }
    }

    let config = match args.config {
        Some(ref path) => Config::load(path),
        None => Config::load_default(),
    }
    .map_err(|e| format!("failed to load config cause {}", e))?;

    let locale = args
        .lang
        .or_else(|| config.lang.as_deref().and_then(|s| s.parse().ok()))
        .or_else(Locale::from_env)
        .unwrap_or_default();

    let session = make_session(&args, &config)?;

    match args.command {
        Command::Optimize(ref inputs) => optimize(&args, session, inputs, locale),
        Command::Transform(op, ref input, ref output) => {
            transform(&args, op, input, output.as_deref())
        }
        Command::Export(ref input, ref output) => {
            export(&args, &config, input, output.as_deref(), locale)
        }
        Command::Code(ref input, ref output) => code(&args, input, output.as_deref()),
        Command::DataUri(ref input) => print_data_uri(&args, input),
        Command::Diff(ref input) => print_diff(session, input),
        Command::Info(ref input) => info(&args, input, locale),
        Command::History(ref action) => manage_history(&args, action, locale),
        Command::Plugins => list_plugins(&session, locale),
    }
}

fn make_session(args: &CliArgs, config: &Config) -> Result<Session, String> {
    let mut session = Session::new();
    config.apply(&mut session).map_err(|e| e.to_string())?;

    session.update_settings(SettingsUpdate {
        compare_gzipped: args.gzip.then_some(true),
        prettify_markup: args.pretty.then_some(true),
        multipass: args.no_multipass.then_some(false),
        float_precision: args.precision,
        transform_precision: args.transform_precision,
        ..SettingsUpdate::default()
    });

    for (names, enabled) in [(&args.enable, true), (&args.disable, false)] {
        for name in names {
            let plugin = name
                .parse::<tinysvg::svgtidy::Plugin>()
                .map_err(|e| e.to_string())?;
            session.plugins.set_enabled(plugin, enabled);
        }
    }

    Ok(session)
}

fn load(input: &InputFrom) -> Result<Source, String> {
    match input {
        InputFrom::Stdin => Source::from_stdin(),
        InputFrom::File(ref path) => Source::from_file(path),
    }
    .map_err(|e| e.to_string())
}

// Files are written next to the input, stdin results into the current directory.
fn default_output(input: &InputFrom, name: &str) -> PathBuf {
    match input {
        InputFrom::File(ref path) => path.with_file_name(name),
        InputFrom::Stdin => PathBuf::from(name),
    }
}

fn write_output(args: &CliArgs, path: &Path, data: &[u8]) -> Result<(), String> {
    if args.stdout {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(data)
            .and_then(|_| stdout.flush())
            .map_err(|_| "failed to write to the stdout".to_string())
    } else {
        std::fs::write(path, data)
            .map_err(|e| format!("failed to write '{}' cause {}", path.display(), e))
    }
}

fn optimize(
    args: &CliArgs,
    session: Session,
    inputs: &[InputFrom],
    locale: Locale,
) -> Result<(), String> {
    if inputs.len() > 1 && (args.stdout || args.output.is_some()) {
        return Err("'-c' and '--output' require a single input".to_string());
    }

    let results: Vec<(&InputFrom, Result<(Session, usize), String>)> = inputs
        .par_iter()
        .map(|input| {
            let result = load(input).and_then(|source| {
                let mut session = session.clone();
                session.set_original(source.content, source.name);
                let passes = session.optimize().map_err(|e| e.to_string())?;
                Ok((session, passes))
            });

            (input, result)
        })
        .collect();

    let mut history = if args.no_history {
        None
    } else {
        History::open_default()
    };

    let mut failed = 0;
    for (input, result) in results {
        let (session, passes) = match result {
            Ok(v) => v,
            Err(e) => {
                eprintln!("Error: {}: {}.", input, e);
                failed += 1;
                continue;
            }
        };

        let data = if args.pretty {
            session.prettified(Markup::Compressed)
        } else {
            session.compressed.clone()
        };

        let path = match args.output {
            Some(ref path) => path.clone(),
            None => default_output(input, &optimized_file_name(&session.file_name)),
        };
        write_output(args, &path, data.as_bytes())?;

        print_stats(args, &session, passes, locale);

        if let (Some(history), Some(entry)) = (history.as_mut(), session.history_entry()) {
            if let Err(e) = history.save(entry) {
                log::warn!("Failed to save history cause {}.", e);
            }
        }
    }

    if failed != 0 {
        return Err(format!("{} of {} files failed", failed, inputs.len()));
    }

    Ok(())
}

fn print_stats(args: &CliArgs, session: &Session, passes: usize, locale: Locale) {
    let stats = session.stats();
    let mut line = format!(
        "{}: {} {} -> {} {} ({} {:.1}%, {} {})",
        session.file_name,
        i18n::message("original", locale),
        format_file_size(stats.original_size),
        i18n::message("optimized", locale),
        format_file_size(stats.compressed_size),
        i18n::message("compression", locale),
        stats.compression_rate,
        i18n::message("passes", locale),
        passes,
    );

    if let Some((original, compressed)) = stats.gzipped {
        line.push_str(&format!(
            ", {} {} -> {}",
            i18n::message("gzipped", locale),
            format_file_size(original),
            format_file_size(compressed),
        ));
    }

    // Keep the stdout clean when it's used for the output.
    if args.stdout {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}

fn transform(
    args: &CliArgs,
    op: TransformOp,
    input: &InputFrom,
    output: Option<&Path>,
) -> Result<(), String> {
    let source = load(input)?;

    let ts = match op {
        TransformOp::Rotate => Transformation::Rotate,
        TransformOp::FlipHorizontal => Transformation::FlipHorizontal,
        TransformOp::FlipVertical => Transformation::FlipVertical,
        TransformOp::Resize => {
            let dims = dimensions::svg_dimensions(&source.content)
                .ok_or("provided data is not an SVG")?;
            let resized = |value: u32, side| {
                dimensions::proportional_dimensions(dims.width, dims.height, value as f64, side)
            };

            let (width, height) = match (args.width, args.height) {
                (Some(w), Some(h)) => (w as f64, h as f64),
                (Some(w), None) => resized(w, Side::Width),
                (None, Some(h)) => resized(h, Side::Height),
                (None, None) => {
                    return Err("'resize' requires '--width' or '--height'".to_string());
                }
            };

            Transformation::Resize(width, height)
        }
    };

    let data = transform::apply(&source.content, ts);
    let path = output.map(Path::to_path_buf).unwrap_or_else(|| {
        default_output(input, &transform::transformed_file_name(&source.name, ts))
    });
    write_output(args, &path, data.as_bytes())
}

fn export(
    args: &CliArgs,
    config: &Config,
    input: &InputFrom,
    output: Option<&Path>,
    locale: Locale,
) -> Result<(), String> {
    let source = load(input)?;

    let mut format = args.format.unwrap_or(ExportFormat::Png);
    if let Some(q) = args.quality {
        if let ExportFormat::Jpeg { ref mut quality } = format {
            *quality = q;
        }
    }

    let size = match (args.width, args.height) {
        (Some(w), Some(h)) => ExportSize::Exact(w, h),
        (Some(w), None) => ExportSize::Width(w),
        (None, Some(h)) => ExportSize::Height(h),
        (None, None) if args.auto => ExportSize::Auto,
        (None, None) => {
            let scale = args
                .zoom
                .or(config.export_scale)
                .unwrap_or(export::DEFAULT_EXPORT_SCALE);
            if export::matching_scale(scale).is_none() {
                log::debug!("Scale {} is not one of the presets.", scale);
            }

            ExportSize::Scale(scale)
        }
    };

    let data = export::export(&source.content, format, size)
        .map_err(|e| format!("{}: {}", i18n::message("exportFailed", locale), e))?;

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| {
            default_output(input, &export::exported_file_name(&source.name, format))
        });
    write_output(args, &path, &data)?;

    if !args.stdout {
        let (width, height) = export::resolve_size(&source.content, size);
        let key = match format {
            ExportFormat::Png => "exportedPng",
            ExportFormat::Jpeg { .. } => "exportedJpeg",
        };
        println!("{} ({}x{}): {}", i18n::message(key, locale), width, height, path.display());
    }

    Ok(())
}

fn code(args: &CliArgs, input: &InputFrom, output: Option<&Path>) -> Result<(), String> {
    let source = load(input)?;
    let code = codegen::generate(args.target, &source.content, Some(&source.name))
        .map_err(|e| e.to_string())?;

    match output {
        Some(path) => write_output(args, path, code.as_bytes()),
        None if args.stdout => write_output(args, Path::new(""), code.as_bytes()),
        None => {
            let name = codegen::code_file_name(args.target, Some(&source.name));
            write_output(args, &default_output(input, &name), code.as_bytes())
        }
    }
}

fn print_data_uri(args: &CliArgs, input: &InputFrom) -> Result<(), String> {
    let source = load(input)?;
    let uri = data_uri::svg_to_data_uri(&source.content);

    match args.kind {
        Some(UriKind::Minified) => println!("{}", uri.minified),
        Some(UriKind::Base64) => println!("{}", uri.base64),
        Some(UriKind::Url) => println!("{}", uri.url_encoded),
        None => {
            println!("minified ({}):\n{}\n", format_bytes(uri.minified_size), uri.minified);
            println!("base64 ({}):\n{}\n", format_bytes(uri.base64_size), uri.base64);
            println!("url ({}):\n{}", format_bytes(uri.url_encoded_size), uri.url_encoded);
        }
    }

    Ok(())
}

fn print_diff(mut session: Session, input: &InputFrom) -> Result<(), String> {
    let source = load(input)?;
    session.set_original(source.content, source.name);
    session.optimize().map_err(|e| e.to_string())?;

    let text = session.unified_diff(DIFF_CONTEXT_LINES);
    if !text.is_empty() {
        print!("{}", text);
        if !text.ends_with('\n') {
            println!();
        }
    }

    let stats = markup_diff::stats(&session.diff());
    println!(
        "{}: {} removed, {} added, {} modified, {} unchanged",
        session.file_name, stats.removed, stats.added, stats.modified, stats.unchanged
    );

    Ok(())
}

fn info(args: &CliArgs, input: &InputFrom, locale: Locale) -> Result<(), String> {
    let source = load(input)?;
    let text = &source.content;
    let dims = dimensions::svg_dimensions(text).ok_or("provided data is not an SVG")?;

    println!("{}", source.name);
    println!("  {}: {}", i18n::message("width", locale), dims.width);
    println!("  {}: {}", i18n::message("height", locale), dims.height);
    println!(
        "  {}: {}",
        i18n::message("viewBox", locale),
        dims.view_box.as_deref().unwrap_or("-")
    );
    if let Some((w, h)) = dimensions::content_dimensions(text) {
        println!("  content: {}x{}", w, h);
    }

    println!("  size: {}", format_file_size(text.len()));
    println!(
        "  {}: {}",
        i18n::message("gzipped", locale),
        format_file_size(data_uri::gzip_size(text))
    );

    let (w, h) = export::resolve_size(text, ExportSize::Auto);
    println!("  raster: {}x{}", w, h);

    let colors = codegen::analyze_colors(text);
    println!("  colors: {}", colors.unique_colors.join(", "));
    if colors.use_current_color {
        println!("  (single color, components use {})", codegen::CURRENT_COLOR);
    }

    if args.thumbnail {
        println!("{}", dimensions::thumbnail(text, dimensions::THUMBNAIL_SIZE));
    }

    Ok(())
}

fn manage_history(args: &CliArgs, action: &HistoryAction, locale: Locale) -> Result<(), String> {
    let mut history = History::open_default().ok_or("failed to find the user data directory")?;
    let now = chrono::Utc::now().timestamp_millis();

    match action {
        HistoryAction::List | HistoryAction::Recent => {
            let entries = if *action == HistoryAction::Recent {
                history.recent(history::RECENT_ENTRIES_COUNT)
            } else {
                history.all()
            }
            .map_err(|e| e.to_string())?;

            if entries.is_empty() {
                println!("{}", i18n::message("historyEmpty", locale));
            }

            for e in entries {
                println!(
                    "{}  {}  {} -> {}  {}",
                    e.id,
                    e.file_name,
                    format_file_size(e.original_size),
                    format_file_size(e.compressed_size),
                    history::format_timestamp(e.timestamp, now),
                );
            }
        }
        HistoryAction::Show(ref id) => {
            let entry = history
                .get(id)
                .map_err(|e| e.to_string())?
                .ok_or_else(|| i18n::message("entryNotFound", locale).to_string())?;

            if args.stdout {
                write_output(args, Path::new(""), entry.compressed_svg.as_bytes())?;
            } else {
                println!("{}", entry.compressed_svg);
            }
        }
        HistoryAction::Delete(ref id) => {
            if history.get(id).map_err(|e| e.to_string())?.is_none() {
                return Err(i18n::message("entryNotFound", locale).to_string());
            }

            history.delete(id).map_err(|e| e.to_string())?;
            println!("{}", i18n::message("entryDeleted", locale));
        }
        HistoryAction::Clear => {
            history.clear().map_err(|e| e.to_string())?;
            println!("{}", i18n::message("historyCleared", locale));
        }
    }

    Ok(())
}

fn list_plugins(session: &Session, locale: Locale) -> Result<(), String> {
    let options = session.options();
    for plugin in tinysvg::svgtidy::Plugin::all() {
        let mark = if options.is_enabled(*plugin) { "x" } else { " " };
        println!(
            "[{}] {:<32} {}",
            mark,
            plugin.name(),
            i18n::plugin_label(plugin.name(), locale)
        );
    }

    Ok(())
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);
            let args = record.args();

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, args),
                log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, args),
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, args),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, args),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, args),
            }
        }
    }

    fn flush(&self) {}
}
