use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{anyhow, Context, Result};
use sonopack_migrator::{
    LegacyDataChoice, MigrationPrompt, ProductKind, RestoreRunner, RestoreSignal,
    PROBE_COMMAND_WORD,
};
use sonopack_security::verify_file_signature;
use tracing::info;

pub struct SubprocessRestoreRunner {
    executable: PathBuf,
    public_key_hex: Option<String>,
}

impl SubprocessRestoreRunner {
    pub fn new(executable: PathBuf, public_key_hex: Option<String>) -> Self {
        Self {
            executable,
            public_key_hex,
        }
    }

    fn ensure_trusted(&self) -> Result<()> {
        let Some(public_key_hex) = &self.public_key_hex else {
            return Ok(());
        };
        let sidecar = signature_sidecar_path(&self.executable);
        let verified = verify_file_signature(&self.executable, &sidecar, public_key_hex)?;
        if !verified {
            return Err(anyhow!(
                "restore executable failed signature verification: {}",
                self.executable.display()
            ));
        }
        Ok(())
    }

    fn run(&self, command_word: &str, product: ProductKind) -> Result<i32> {
        self.ensure_trusted()?;

        let working_dir = self
            .executable
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let status = Command::new(&self.executable)
            .arg(command_word)
            .arg(product.as_str())
            .current_dir(working_dir)
            .status()
            .with_context(|| {
                format!(
                    "failed to launch restore executable: {}",
                    self.executable.display()
                )
            })?;

        Ok(status.code().unwrap_or(-1))
    }
}

impl RestoreRunner for SubprocessRestoreRunner {
    fn probe(&mut self, product: ProductKind) -> Result<i32> {
        let code = self.run(PROBE_COMMAND_WORD, product)?;
        info!(code, "restore probe finished");
        Ok(code)
    }

    fn signal(&mut self, signal: RestoreSignal, product: ProductKind) -> Result<()> {
        let code = self.run(signal.command_word(), product)?;
        info!(command = signal.command_word(), code, "restore signal finished");
        Ok(())
    }
}

pub fn signature_sidecar_path(path: &Path) -> PathBuf {
    let mut sidecar = OsString::from(path.as_os_str());
    sidecar.push(".sig");
    PathBuf::from(sidecar)
}

#[derive(Debug, Default)]
pub struct InteractivePrompt;

impl MigrationPrompt for InteractivePrompt {
    fn legacy_data_choice(&mut self, product: ProductKind) -> Result<LegacyDataChoice> {
        let mut stdout = io::stdout();
        writeln!(
            stdout,
            "The installed product type changed ({} console).",
            product.as_str()
        )
        .context("failed to write prompt")?;
        write!(stdout, "Discard the previous patient images? [y/N] ")
            .context("failed to write prompt")?;
        stdout.flush().context("failed to flush prompt")?;

        let mut answer = String::new();
        io::stdin()
            .read_line(&mut answer)
            .context("failed to read prompt answer")?;
        Ok(parse_prompt_answer(&answer))
    }
}

pub fn parse_prompt_answer(answer: &str) -> LegacyDataChoice {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => LegacyDataChoice::Discard,
        _ => LegacyDataChoice::KeepAside,
    }
}

#[derive(Debug)]
pub struct ForcedPrompt {
    choice: LegacyDataChoice,
}

impl ForcedPrompt {
    pub fn new(choice: LegacyDataChoice) -> Self {
        Self { choice }
    }
}

impl MigrationPrompt for ForcedPrompt {
    fn legacy_data_choice(&mut self, _product: ProductKind) -> Result<LegacyDataChoice> {
        Ok(self.choice)
    }
}
