//! Load and describe local PCM payloads without playing them.

use std::error::Error;
use std::fs;
use std::path::Path;

use clap::ArgMatches;

use sciviz_lib::asset::AudioAsset;
use sciviz_lib::pcm::decode_base64_pcm;

/// Decode the `INPUT` file of a `play`/`inspect` subcommand.
pub fn load_asset(args: &ArgMatches) -> Result<AudioAsset, Box<dyn Error>> {
    let path = args
        .get_one::<String>("INPUT")
        .ok_or("missing INPUT argument")?;
    let sample_rate = parse_value::<u32>(args, "sample-rate")?;
    let channels = parse_value::<u16>(args, "channels")?;

    let payload = fs::read_to_string(Path::new(path))
        .map_err(|err| format!("failed to read {}: {}", path, err))?;
    Ok(decode_base64_pcm(&payload, sample_rate, channels)?)
}

/// Print the format line for an `inspect` invocation.
pub fn run_inspect(args: &ArgMatches) -> Result<i32, Box<dyn Error>> {
    let asset = load_asset(args)?;
    println!("{}", describe(&asset));
    Ok(0)
}

pub fn describe(asset: &AudioAsset) -> String {
    format!(
        "sample_rate={} channels={} frames={} duration={:.3}s",
        asset.sample_rate(),
        asset.channels(),
        asset.frames(),
        asset.duration()
    )
}

/// Parse a string-valued argument.
pub fn parse_value<T>(args: &ArgMatches, name: &str) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = args
        .get_one::<String>(name)
        .ok_or_else(|| format!("missing --{}", name))?;
    raw.parse::<T>()
        .map_err(|err| format!("invalid --{} value {:?}: {}", name, raw, err))
}
