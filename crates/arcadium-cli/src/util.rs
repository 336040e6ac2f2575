use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;

/// JSON report sink: stdout or a file chosen on the command line.
#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        match self {
            Output::Stdout { writer } => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .context("Failed to write JSON to stdout")?;
                writeln!(writer).context("Failed to write JSON to stdout")?;
                writer.flush().context("Failed to flush stdout")?;
            }
            Output::File { writer, path } => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
                writeln!(writer)
                    .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
                writer
                    .flush()
                    .with_context(|| format!("Failed to flush {}", path.display()))?;
            }
        }
        Ok(())
    }
}
