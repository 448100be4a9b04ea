//! Pipeline step execution.
//!
//! Steps run one at a time, in config order, with the working directory and
//! `$DOCSET_*` variables derived from the loaded config.

use anyhow::{Context, Result, bail};
use rustc_hash::FxHashMap;
use std::path::PathBuf;
use std::process::Command;

use crate::config::{DocsetConfig, StepConfig};

// ============================================================================
// Environment Variables
// ============================================================================

/// Build `$DOCSET_*` variables for step execution.
pub fn build_docset_vars(config: &DocsetConfig) -> FxHashMap<String, String> {
    let mut vars = FxHashMap::default();
    vars.insert("DOCSET_ROOT".into(), config.root.display().to_string());
    vars.insert(
        "DOCSET_SITE_DIR".into(),
        config.site.root.display().to_string(),
    );
    vars
}

/// Replace `$DOCSET_*` occurrences with their values.
///
/// Longer names are substituted first, so a variable that is a prefix of
/// another never clobbers it.
pub fn resolve_args(args: &[String], vars: &FxHashMap<String, String>) -> Vec<String> {
    let mut keys: Vec<&String> = vars.keys().collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    args.iter()
        .map(|arg| {
            keys.iter().fold(arg.clone(), |acc, key| {
                acc.replace(&format!("${key}"), &vars[*key])
            })
        })
        .collect()
}

// ============================================================================
// Step Execution
// ============================================================================

/// Run one step, failing on a missing program or a non-zero exit.
///
/// `phase` is the log prefix (`pre` or `post`).
pub fn run_step(step: &StepConfig, config: &DocsetConfig, phase: &str) -> Result<()> {
    if !step.enable {
        crate::debug!(phase; "`{}` disabled, skipping", step.display_name());
        return Ok(());
    }

    let vars = build_docset_vars(config);
    let argv = resolve_args(&step.command, &vars);
    let Some((program, args)) = argv.split_first() else {
        bail!("step `{}` has an empty command", step.display_name());
    };

    let program_path = which::which(program)
        .with_context(|| format!("step `{}`: program `{program}` not found", step.display_name()))?;
    let cwd = step_cwd(step, config, &vars);

    crate::log!(phase; "`{}` running", step.display_name());
    crate::debug!(phase; "{} (in {})", argv.join(" "), cwd.display());

    let output = Command::new(&program_path)
        .args(args)
        .current_dir(&cwd)
        .envs(&vars)
        .output()
        .with_context(|| format!("step `{}`: failed to execute `{program}`", step.display_name()))?;

    if !step.quiet {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stdout = stdout.trim();
        if !stdout.is_empty() {
            println!("{stdout}");
        }
    }

    if !output.status.success() {
        let code = output
            .status
            .code()
            .map_or_else(|| "signal".to_string(), |c| c.to_string());
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "step `{}` failed (exit code {code})\n{}",
            step.display_name(),
            stderr.trim()
        );
    }

    Ok(())
}

/// Working directory of a step: its `cwd` (after substitution) relative to
/// the config root, or the config root itself.
fn step_cwd(step: &StepConfig, config: &DocsetConfig, vars: &FxHashMap<String, String>) -> PathBuf {
    match &step.cwd {
        Some(cwd) => {
            let raw = cwd.to_string_lossy().into_owned();
            let resolved = resolve_args(&[raw], vars).concat();
            config.root.join(resolved)
        }
        None => config.root.clone(),
    }
}

/// Run all `[[pipeline.pre]]` steps.
pub fn run_pre_steps(config: &DocsetConfig) -> Result<()> {
    for step in &config.pipeline.pre {
        run_step(step, config, "pre")?;
    }
    Ok(())
}

/// Run all `[[pipeline.post]]` steps.
pub fn run_post_steps(config: &DocsetConfig) -> Result<()> {
    for step in &config.pipeline.post {
        run_step(step, config, "post")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn vars() -> FxHashMap<String, String> {
        let mut vars = FxHashMap::default();
        vars.insert("DOCSET_ROOT".into(), "/work".into());
        vars.insert("DOCSET_SITE_DIR".into(), "/work/_site".into());
        vars
    }

    fn config_in(dir: &Path) -> DocsetConfig {
        let mut config = DocsetConfig {
            root: dir.to_path_buf(),
            ..DocsetConfig::default()
        };
        config.site.root = dir.join("_site");
        config
    }

    fn step(command: &[&str]) -> StepConfig {
        StepConfig {
            command: command.iter().map(|s| s.to_string()).collect(),
            ..StepConfig::default()
        }
    }

    #[test]
    fn test_resolve_args() {
        let args = vec![
            "dashing".into(),
            "build".into(),
            "--source".into(),
            "$DOCSET_SITE_DIR".into(),
            "$DOCSET_ROOT/out".into(),
        ];
        let resolved = resolve_args(&args, &vars());
        assert_eq!(
            resolved,
            vec!["dashing", "build", "--source", "/work/_site", "/work/out"]
        );
    }

    #[test]
    fn test_resolve_args_multiple_in_one_arg() {
        let args = vec!["cp $DOCSET_ROOT/a $DOCSET_SITE_DIR/b".into()];
        assert_eq!(resolve_args(&args, &vars()), vec!["cp /work/a /work/_site/b"]);
    }

    #[test]
    fn test_resolve_args_no_vars() {
        let args = vec!["echo".into(), "$HOME".into()];
        assert_eq!(resolve_args(&args, &vars()), args);
    }

    #[test]
    fn test_build_docset_vars() {
        let dir = TempDir::new().unwrap();
        let vars = build_docset_vars(&config_in(dir.path()));
        assert_eq!(vars["DOCSET_ROOT"], dir.path().display().to_string());
        assert_eq!(
            vars["DOCSET_SITE_DIR"],
            dir.path().join("_site").display().to_string()
        );
    }

    #[test]
    fn test_step_cwd() {
        let config = config_in(Path::new("/work"));
        let vars = build_docset_vars(&config);

        assert_eq!(step_cwd(&step(&["x"]), &config, &vars), Path::new("/work"));

        let mut relative = step(&["x"]);
        relative.cwd = Some("build/website".into());
        assert_eq!(
            step_cwd(&relative, &config, &vars),
            Path::new("/work/build/website")
        );

        let mut site = step(&["x"]);
        site.cwd = Some("$DOCSET_SITE_DIR".into());
        assert_eq!(step_cwd(&site, &config, &vars), Path::new("/work/_site"));
    }

    #[test]
    fn test_missing_program() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        let err = run_step(&step(&["docset-no-such-program-x"]), &config, "pre").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_disabled_step_is_skipped() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        let mut disabled = step(&["docset-no-such-program-x"]);
        disabled.enable = false;
        assert!(run_step(&disabled, &config, "post").is_ok());
    }

    #[test]
    fn test_empty_command() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        assert!(run_step(&step(&[]), &config, "pre").is_err());
    }
}
