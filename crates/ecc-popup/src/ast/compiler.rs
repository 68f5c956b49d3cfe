use std::fmt::{Display, Formatter};
use std::path::Path;
use std::process::Command;

use tracing::{debug, warn};

use crate::config::ClangSettings;

/// Run clang's JSON AST dump on `file` and return the raw JSON.
///
/// Compile errors are logged but not fatal: clang still emits a partial AST.
pub fn run_ast_dump(
    file: &Path,
    settings: &ClangSettings,
) -> Result<String, AstDumpError> {
    let mut args = vec![
        "-Xclang".to_string(),
        "-ast-dump=json".to_string(),
        "-fsyntax-only".to_string(),
        "-fparse-all-comments".to_string(),
        "-fno-color-diagnostics".to_string(),
    ];
    args.extend(settings.flags.iter().cloned());
    args.push(file.display().to_string());

    debug!("AST dump: {} {}", settings.binary, args.join(" "));

    let output = Command::new(&settings.binary).args(&args).output().map_err(|error| AstDumpError::LaunchFailed {
        binary: settings.binary.clone(),
        reason: error.to_string(),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines() {
            if line.contains("error:") {
                warn!("[ast-dump] compiler error: {line}");
            }
        }
        debug!("[ast-dump] exited with {} (partial AST may still be usable)", output.status);
    }

    let stdout = String::from_utf8(output.stdout).map_err(|error| AstDumpError::InvalidJson(error.to_string()))?;
    if stdout.is_empty() || !stdout.starts_with('{') {
        return Err(AstDumpError::NoOutput(file.display().to_string()));
    }
    debug!("[ast-dump] produced {} bytes of JSON for {}", stdout.len(), file.display());
    Ok(stdout)
}

#[derive(Debug)]
pub enum AstDumpError {
    LaunchFailed {
        binary: String,
        reason: String,
    },
    NoOutput(String),
    InvalidJson(String),
}

impl Display for AstDumpError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::LaunchFailed { binary, reason } => write!(f, "failed to launch {binary}: {reason}"),
            Self::NoOutput(file) => write!(f, "AST dump produced no usable JSON for {file}"),
            Self::InvalidJson(reason) => write!(f, "invalid AST JSON: {reason}"),
        }
    }
}

impl std::error::Error for AstDumpError {}
