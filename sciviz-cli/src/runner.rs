use std::{
    error::Error,
    fs, io,
    path::PathBuf,
    sync::Arc,
    thread::sleep,
    time::Duration,
};

use clap::ArgMatches;
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{backend::CrosstermBackend, Terminal};
use sciviz_lib::asset::AudioAsset;
use sciviz_lib::concept::{ConceptData, Exploration};
use sciviz_lib::playback::{PlaybackTracker, RodioDevice, TrackerSettings};
use sciviz_lib::service::{GeminiClient, GeminiConfig};

use crate::cli::inspect::{self, parse_value};
use crate::logging::{self, LogBuffer};
use crate::ui::ConceptView;
use crate::{controls, ui};

/// Playback options shared by the explore and `play` paths.
struct PlaybackOptions {
    settings: TrackerSettings,
    gain: f32,
    autoplay: bool,
    quiet: bool,
}

impl PlaybackOptions {
    fn from_args(args: &ArgMatches) -> Result<Self, String> {
        let restart_delay_ms = parse_value::<u64>(args, "restart-delay-ms")?;
        let end_epsilon_ms = parse_value::<u64>(args, "end-epsilon-ms")?;
        let gain = parse_value::<f32>(args, "GAIN")?;

        Ok(Self {
            settings: TrackerSettings::default()
                .restart_delay(Duration::from_millis(restart_delay_ms))
                .completion_epsilon(end_epsilon_ms as f64 / 1000.0),
            gain: gain.clamp(0.0, 100.0),
            autoplay: args.get_flag("autoplay"),
            quiet: args.get_flag("quiet"),
        })
    }
}

pub fn run(args: &ArgMatches, log_buffer: LogBuffer) -> Result<i32, Box<dyn Error>> {
    info!("Starting SciViz CLI");
    match args.subcommand() {
        Some(("inspect", sub)) => return inspect::run_inspect(sub),
        Some(("play", sub)) => {
            let options = PlaybackOptions::from_args(sub)?;
            let asset = inspect::load_asset(sub)?;
            let input = sub
                .get_one::<String>("INPUT")
                .cloned()
                .unwrap_or_default();
            let view = ConceptView {
                title: input,
                explanation: inspect::describe(&asset),
                svg_path: None,
            };
            play_interactive(Arc::new(asset), &view, &options, log_buffer)?;
            return Ok(0);
        }
        _ => {}
    }

    let Some(term) = args.get_one::<String>("TERM") else {
        error!("No term given");
        return Ok(-1);
    };
    let options = PlaybackOptions::from_args(args)?;
    let client = GeminiClient::new(GeminiConfig::from_env())?;

    let mut exploration = Exploration::new();
    if !exploration.can_submit(term) {
        error!("Term is empty");
        return Ok(-1);
    }

    let quiet = options.quiet;
    let result = exploration.run(term, &client, |stage| {
        info!("Stage: {}", stage.label());
        if !quiet {
            println!("… {}", stage.label());
        }
    });

    let svg_path = match exploration.concept() {
        Some(concept) => Some(write_svg(concept, term, args.get_one::<String>("svg-out"))?),
        None => None,
    };

    if let Err(err) = result {
        eprintln!("error: {}", err);
        return Ok(-1);
    }

    let (Some(concept), Some(audio)) = (exploration.concept(), exploration.audio()) else {
        return Ok(-1);
    };

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(concept)?);
    } else if options.quiet || args.get_flag("no-playback") {
        println!("{}\n\n{}", concept.title, concept.explanation);
    }
    if let Some(path) = svg_path.as_ref() {
        info!("Wrote diagram to {}", path.display());
    }

    if args.get_flag("no-playback") {
        return Ok(0);
    }

    let view = ConceptView {
        title: concept.title.clone(),
        explanation: concept.explanation.clone(),
        svg_path: svg_path.map(|path| path.display().to_string()),
    };
    play_interactive(audio, &view, &options, log_buffer)?;

    Ok(0)
}

/// Drive the tracker from the keyboard until the user quits.
fn play_interactive(
    asset: Arc<AudioAsset>,
    view: &ConceptView,
    options: &PlaybackOptions,
    log_buffer: LogBuffer,
) -> Result<(), Box<dyn Error>> {
    let mut device = RodioDevice::open()?;
    device.set_volume(options.gain / 100.0);

    let mut tracker = PlaybackTracker::with_settings(device, options.settings);
    tracker.replace_asset(Some(asset));
    if options.autoplay {
        tracker.play();
    }

    let _raw_mode = RawModeGuard::enable().ok();
    let mut terminal = if !options.quiet {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, EnterAlternateScreen, cursor::Hide);
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).ok()
    } else {
        None
    };

    // UI / input loop.
    loop {
        tracker.tick();

        if let Some(term) = terminal.as_mut() {
            let status = controls::status_text(controls::StatusArgs {
                time: tracker.position(),
                duration: tracker.duration(),
                playing: tracker.is_playing(),
                restarting: tracker.is_restart_pending(),
                gain: options.gain,
            });
            let log_lines = logging::snapshot(&log_buffer);
            ui::draw_status(term, view, &status, &log_lines);
        }

        if !controls::handle_key_event(&mut tracker) {
            break;
        }

        sleep(Duration::from_millis(50));
    }

    tracker.close();

    // Restore the terminal state before exiting.
    if let Some(mut term) = terminal {
        let _ = term.show_cursor();
        let stdout = term.backend_mut();
        let _ = execute!(stdout, LeaveAlternateScreen, cursor::Show);
    }

    Ok(())
}

fn write_svg(
    concept: &ConceptData,
    term: &str,
    requested: Option<&String>,
) -> Result<PathBuf, Box<dyn Error>> {
    let path = requested
        .map(PathBuf::from)
        .unwrap_or_else(|| default_svg_path(term));
    fs::write(&path, &concept.svg_code)
        .map_err(|err| format!("failed to write {}: {}", path.display(), err))?;
    Ok(path)
}

/// `<term>.svg` with anything but letters and digits collapsed to dashes.
fn default_svg_path(term: &str) -> PathBuf {
    let mut slug = String::new();
    for c in term.trim().chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    let stem = if slug.is_empty() { "concept" } else { slug };
    PathBuf::from(format!("{}.svg", stem))
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_paths_are_slugged() {
        assert_eq!(default_svg_path("Dyson Sphere"), PathBuf::from("dyson-sphere.svg"));
        assert_eq!(default_svg_path(" CRISPR-Cas9!! "), PathBuf::from("crispr-cas9.svg"));
        assert_eq!(default_svg_path("相对论"), PathBuf::from("相对论.svg"));
        assert_eq!(default_svg_path("???"), PathBuf::from("concept.svg"));
    }

    #[test]
    fn writes_svg_to_requested_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("out.svg").display().to_string();
        let concept = ConceptData {
            title: "t".to_string(),
            svg_code: "<svg viewBox=\"0 0 1200 800\"/>".to_string(),
            explanation: "e".to_string(),
        };
        let path = write_svg(&concept, "ignored", Some(&target)).expect("write svg");
        assert_eq!(fs::read_to_string(path).unwrap(), concept.svg_code);
    }
}
