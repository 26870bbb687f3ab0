//! CLI argument definitions for `sciviz`.

use clap::{Arg, ArgAction, Command};

/// Build the CLI argument parser and command definitions.
pub fn build_cli() -> Command {
    Command::new("SciViz")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Explain a scientific term with an animated diagram and narration")
        .arg_required_else_help(true)
        .arg(
            Arg::new("TERM")
                .help("The scientific term or concept to explain")
                .required(false)
                .index(1),
        )
        .arg(
            Arg::new("svg-out")
                .long("svg-out")
                .short('o')
                .value_name("PATH")
                .help("Where to write the generated SVG (defaults to <term>.svg)"),
        )
        .arg(
            Arg::new("no-playback")
                .long("no-playback")
                .action(ArgAction::SetTrue)
                .help("Print the concept and exit without opening the player"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the generated concept as JSON"),
        )
        .arg(
            Arg::new("GAIN")
                .long("gain")
                .short('g')
                .value_name("GAIN")
                .default_value("70")
                .global(true)
                .help("The playback gain (0-100)"),
        )
        .arg(
            Arg::new("restart-delay-ms")
                .long("restart-delay-ms")
                .value_name("MS")
                .default_value("100")
                .global(true)
                .help("Wait before reopening the output stream on restart"),
        )
        .arg(
            Arg::new("end-epsilon-ms")
                .long("end-epsilon-ms")
                .value_name("MS")
                .default_value("100")
                .global(true)
                .help("How close to the end a stopped stream counts as finished"),
        )
        .arg(
            Arg::new("autoplay")
                .long("autoplay")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Start playing as soon as the narration is loaded"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Suppress the terminal UI"),
        )
        .subcommand(
            Command::new("play")
                .about("Play a local base64 PCM narration file")
                .arg(
                    Arg::new("INPUT")
                        .help("Path to a file holding base64 16-bit PCM")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("sample-rate")
                        .long("sample-rate")
                        .value_name("HZ")
                        .default_value("24000")
                        .help("Sample rate of the payload"),
                )
                .arg(
                    Arg::new("channels")
                        .long("channels")
                        .value_name("COUNT")
                        .default_value("1")
                        .help("Channel count of the payload"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Decode a base64 PCM file and print its format")
                .arg(
                    Arg::new("INPUT")
                        .help("Path to a file holding base64 16-bit PCM")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("sample-rate")
                        .long("sample-rate")
                        .value_name("HZ")
                        .default_value("24000")
                        .help("Sample rate of the payload"),
                )
                .arg(
                    Arg::new("channels")
                        .long("channels")
                        .value_name("COUNT")
                        .default_value("1")
                        .help("Channel count of the payload"),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn global_options_reach_subcommands() {
        let matches = build_cli()
            .try_get_matches_from(["sciviz", "play", "speech.b64", "--gain", "40"])
            .expect("parse args");
        let (name, sub) = matches.subcommand().expect("subcommand");
        assert_eq!(name, "play");
        assert_eq!(sub.get_one::<String>("GAIN").map(String::as_str), Some("40"));
    }

    #[test]
    fn term_is_positional() {
        let matches = build_cli()
            .try_get_matches_from(["sciviz", "CRISPR", "--no-playback"])
            .expect("parse args");
        assert_eq!(
            matches.get_one::<String>("TERM").map(String::as_str),
            Some("CRISPR")
        );
        assert!(matches.get_flag("no-playback"));
    }
}
