//! Result files and terminal summaries

use crate::query::QueryOutcome;
use crate::set::HashSet;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Write one document id per line to `<results_dir>/<query_id>`.
///
/// The query id must be a plain file name.
pub fn write_result(results_dir: &Path, query_id: &str, documents: &HashSet) -> io::Result<PathBuf> {
    if query_id.is_empty()
        || query_id == "."
        || query_id == ".."
        || query_id.contains(['/', '\\'])
    {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("query id {:?} is not a valid file name", query_id),
        ));
    }

    fs::create_dir_all(results_dir)?;
    let path = results_dir.join(query_id);
    let mut writer = BufWriter::new(fs::File::create(&path)?);
    for doc_id in documents.keys() {
        writeln!(writer, "{}", doc_id)?;
    }
    writer.flush()?;
    Ok(path)
}

fn color_choice(color: bool) -> ColorChoice {
    if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Print one line per query outcome and a final tally
pub fn print_summary(outcomes: &[QueryOutcome], color: bool) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color_choice(color));
    let mut failed = 0;

    for outcome in outcomes {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
        write!(stdout, "{}", outcome.query_id)?;
        stdout.reset()?;

        match &outcome.result {
            Ok(hit) => {
                write!(stdout, ": ")?;
                stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                write!(stdout, "{}", hit.documents)?;
                stdout.reset()?;
                writeln!(stdout, " documents -> {}", hit.path.display())?;
            }
            Err(err) => {
                failed += 1;
                write!(stdout, ": ")?;
                stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
                writeln!(stdout, "{:#}", err)?;
                stdout.reset()?;
            }
        }
    }

    writeln!(
        stdout,
        "{} queries, {} succeeded, {} failed",
        outcomes.len(),
        outcomes.len() - failed,
        failed
    )?;
    Ok(())
}

/// Print matching document ids, sorted, one per line
pub fn print_documents(documents: &HashSet, color: bool) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color_choice(color));
    let mut ids: Vec<&str> = documents.keys().collect();
    ids.sort_unstable();

    for id in &ids {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(stdout, "{}", id)?;
        stdout.reset()?;
        writeln!(stdout)?;
    }

    stdout.set_color(ColorSpec::new().set_dimmed(true))?;
    writeln!(stdout, "{} documents", ids.len())?;
    stdout.reset()?;
    Ok(())
}
