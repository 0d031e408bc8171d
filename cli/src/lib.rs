use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::anyhow;
use checks_core::ChunkMode;
use checks_core::Measure;
use checks_core::TruncateFrom;
use checks_core::TruncatedStringBuilder;
use checks_core::TruncationConfig;
use clap::Parser;
use clap::ValueEnum;
use tracing::debug;

/// Truncate text to a size limit without splitting atomic chunks.
///
/// Every FILE is one chunk (or raw text to split into lines with `--lines`).
/// Without FILEs, stdin is read as a single chunk.
#[derive(Debug, Parser)]
#[command(name = "checks-truncate", version)]
pub struct Cli {
    /// Maximum size of the output, counted with `--measure`.
    #[arg(long, value_name = "N")]
    pub max_size: Option<usize>,

    /// Unit used to count the size of the output.
    #[arg(long, value_enum)]
    pub measure: Option<MeasureArg>,

    /// Text that replaces the dropped content.
    #[arg(long, value_name = "TEXT")]
    pub truncation_text: Option<String>,

    /// Drop the earliest content instead of the latest.
    #[arg(long, default_value_t = false)]
    pub from_start: bool,

    /// Split the input after every line terminator instead of keeping each
    /// input whole.
    #[arg(long, default_value_t = false)]
    pub lines: bool,

    /// TOML file with truncation settings. Flags take precedence.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Input files, in order.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MeasureArg {
    Bytes,
    Chars,
}

impl From<MeasureArg> for Measure {
    fn from(value: MeasureArg) -> Self {
        match value {
            MeasureArg::Bytes => Measure::Bytes,
            MeasureArg::Chars => Measure::Chars,
        }
    }
}

impl Cli {
    /// Applies the command-line flags on top of `base`.
    pub fn apply_overrides(&self, mut base: TruncationConfig) -> TruncationConfig {
        if let Some(max_size) = self.max_size {
            base.max_size = Some(max_size);
        }
        if let Some(measure) = self.measure {
            base.measure = measure.into();
        }
        if let Some(text) = &self.truncation_text {
            base.truncation_text = Some(text.clone());
        }
        if self.from_start {
            base.truncate_from = TruncateFrom::Start;
        }
        if self.lines {
            base.chunking = ChunkMode::Lines;
        }
        base
    }
}

pub fn run_main(cli: Cli) -> Result<()> {
    let base = match cli.config.as_deref() {
        Some(path) => load_config(path)?,
        None => TruncationConfig::default(),
    };
    let config = cli.apply_overrides(base);

    let inputs = if cli.files.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        vec![text]
    } else {
        cli.files
            .iter()
            .map(|path| {
                std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))
            })
            .collect::<Result<Vec<_>>>()?
    };

    let output = render(&config, inputs)?;
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("failed to write output")?;
    stdout.flush().context("failed to flush output")?;
    Ok(())
}

pub fn load_config(path: &Path) -> Result<TruncationConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: TruncationConfig = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    debug!(path = %path.display(), ?config, "loaded truncation config");
    Ok(config)
}

/// Builds the document from `inputs` and renders it within the configured
/// maximum size.
pub fn render(config: &TruncationConfig, inputs: Vec<String>) -> Result<String> {
    let max_size = config.max_size.ok_or_else(|| {
        anyhow!("no maximum size given; pass --max-size or set `max_size` in the config file")
    })?;

    let mut builder = TruncatedStringBuilder::from_config(config);
    for input in inputs {
        builder.add_text(input);
    }
    let text = builder.build();
    Ok(text.build(max_size, config.measure)?)
}
