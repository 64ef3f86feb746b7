//! Command-line arguments.

use std::path::{Path, PathBuf};

use clap::Parser;
use tintype_core::ParamField;
use tintype_core::transform::params::parse_assignment;

/// Grade a still image with a preset and write a PNG snapshot.
#[derive(Parser, Debug)]
#[command(name = "tintype", version, about, long_about = None)]
pub struct Args {
    /// Image to grade (PNG, JPEG, WEBP, BMP, TIFF).
    #[arg(
        value_name = "INPUT",
        required_unless_present_any = ["list_presets", "dump_params"]
    )]
    pub input: Option<PathBuf>,

    /// Output PNG. Defaults to `<INPUT stem>_graded.png` next to the input.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Preset id to start from.
    #[arg(short, long, value_name = "ID")]
    pub preset: Option<String>,

    /// Override one field, e.g. `exposure=0.5` or `lift.r=0.02`. Repeatable.
    #[arg(short, long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(ParamField, f32)>,

    /// JSON file holding a full parameter set. Applied after `--preset`.
    #[arg(long, value_name = "JSON")]
    pub params: Option<PathBuf>,

    /// JSON preset catalog to use instead of the built-in one.
    #[arg(long, value_name = "JSON")]
    pub catalog: Option<PathBuf>,

    /// Frame time in milliseconds; seeds the grain pattern.
    #[arg(long, value_name = "MS", default_value_t = 0.0)]
    pub time: f32,

    /// Print the catalog and exit.
    #[arg(long)]
    pub list_presets: bool,

    /// Print the resolved parameter set as JSON and exit.
    #[arg(long)]
    pub dump_params: bool,
}

impl Args {
    /// Where the snapshot is written for `input`.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        input.with_file_name(format!("{stem}_graded.png"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tintype_core::Channel;

    #[test]
    fn test_minimal_invocation() {
        let args = Args::try_parse_from(["tintype", "photo.jpg"]).unwrap();
        assert_eq!(args.input, Some(PathBuf::from("photo.jpg")));
        assert!(args.preset.is_none());
        assert!(args.set.is_empty());
        assert_eq!(args.time, 0.0);
    }

    #[test]
    fn test_preset_and_repeated_overrides() {
        let args = Args::try_parse_from([
            "tintype",
            "photo.jpg",
            "-p",
            "apple_cinematic",
            "-s",
            "exposure=0.5",
            "--set",
            "lift.g=-0.02",
            "--time",
            "1200",
        ])
        .unwrap();
        assert_eq!(args.preset.as_deref(), Some("apple_cinematic"));
        assert_eq!(
            args.set,
            vec![
                (ParamField::Exposure, 0.5),
                (ParamField::Lift(Channel::G), -0.02),
            ]
        );
        assert_eq!(args.time, 1200.0);
    }

    #[test]
    fn test_bad_override_is_rejected() {
        assert!(Args::try_parse_from(["tintype", "a.png", "-s", "sparkle=1"]).is_err());
        assert!(Args::try_parse_from(["tintype", "a.png", "-s", "exposure"]).is_err());
    }

    #[test]
    fn test_input_required_unless_listing() {
        assert!(Args::try_parse_from(["tintype"]).is_err());
        let args = Args::try_parse_from(["tintype", "--list-presets"]).unwrap();
        assert!(args.list_presets);
        assert!(args.input.is_none());
        assert!(Args::try_parse_from(["tintype", "--dump-params", "-p", "old_money"]).is_ok());
    }

    #[test]
    fn test_default_output_path() {
        let args = Args::try_parse_from(["tintype", "shots/beach.jpg"]).unwrap();
        assert_eq!(
            args.output_path(Path::new("shots/beach.jpg")),
            PathBuf::from("shots/beach_graded.png")
        );

        let args = Args::try_parse_from(["tintype", "beach.jpg", "-o", "out.png"]).unwrap();
        assert_eq!(
            args.output_path(Path::new("beach.jpg")),
            PathBuf::from("out.png")
        );
    }
}
