use clap::Parser;

/// Extracts a geographic sub-region from a NavIT-style binfile map archive.
///
/// Reads the archive from stdin and writes the clipped archive to stdout.
#[derive(Parser, Debug)]
#[command(name = "binfile-clip", disable_help_flag = false)]
pub struct Cli {
    /// Bottom-left corner longitude, decimal degrees (WGS84)
    pub lon_bottom_left: f64,
    /// Bottom-left corner latitude, decimal degrees (WGS84)
    pub lat_bottom_left: f64,
    /// Top-right corner longitude, decimal degrees (WGS84)
    pub lon_top_right: f64,
    /// Top-right corner latitude, decimal degrees (WGS84)
    pub lat_top_right: f64,
}

/// The original tool's `usage()` banner, reproduced verbatim so scripts
/// built against it keep working unchanged.
pub const USAGE: &str = "\n\
 usage: binfile-clip <coordinates>\n\
\n\
 binfile-clip extracts a given area from a NavIT binfile\n\
 It reads the binfile from stdin and writes the result to stdout.\n\
\n\
 Coordinates\n\
  <bottom left lon> <bottom left lat> <top right lon> <top right lat>\n\
\n\
 Example: extract Munich, Bavaria from a world map\n\
  cat world.bin | binfile-clip 11.3 47.9 11.7 48.2 > munich.bin\n\
\n";
