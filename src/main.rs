use std::io::{self, BufReader, BufWriter, Write};
use std::process::ExitCode;

use binfile_clip::central_directory::{self, CompatMode};
use binfile_clip::cli::{Cli, USAGE};
use binfile_clip::counting_writer::CountingWriter;
use binfile_clip::geometry::Rect;
use binfile_clip::rewriter;
use binfile_clip::vprintln;
use clap::Parser;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => {
            eprint!("{USAGE}");
            return ExitCode::from(1);
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    vprintln!("binfile-clip");

    let query: Rect = binfile_clip::projection::project(
        cli.lon_bottom_left,
        cli.lat_bottom_left,
        cli.lon_top_right,
        cli.lat_top_right,
    );
    vprintln!(
        "extract area (lon {}, lat {}) - (lon {}, lat {})",
        cli.lon_bottom_left,
        cli.lat_bottom_left,
        cli.lon_top_right,
        cli.lat_top_right,
    );
    vprintln!(
        "mercator ({}, {}) - ({}, {})",
        query.low.x,
        query.low.y,
        query.high.x,
        query.high.y,
    );

    let stdin = io::stdin();
    let mut input = BufReader::new(stdin.lock());
    let stdout = io::stdout();
    let mut writer = CountingWriter::new(BufWriter::new(stdout.lock()));

    let store = rewriter::rewrite(&mut input, &mut writer, &query)?;
    let processed = store.len();

    central_directory::write_central_directory(&mut writer, &store, CompatMode::current())?;
    writer.flush()?;

    vprintln!("processed {processed} files");
    Ok(())
}
