//! `generate` subcommand.
use anyhow::{Context, Result};
use clap_complete::Shell;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write completions for `shell` to `writer`.
pub fn generate_completions<W: Write>(
    shell: Shell,
    cmd: &mut clap::Command,
    writer: &mut W,
) {
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, cmd, name, writer);
}

/// Generate a man page for `cmd` and one for each of its subcommands, nested
/// or not, into `output_dir` if specified, else the current directory.
///
/// Subcommand pages are named after their full invocation, e.g.
/// `srch-generate-man.1`. Returns the paths of the written pages.
///
/// # Errors
///
/// Returns a [`Result`] with an [`anyhow::Error`] if the output directory
/// could not be created or a page could not be written.
pub fn generate_man_pages(
    cmd: &clap::Command,
    output_dir: Option<PathBuf>,
) -> Result<Vec<PathBuf>> {
    let output_dir = match output_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Opening current directory")?,
    };
    std::fs::create_dir_all(&output_dir)
        .context("create output Man directories")?;

    let mut written = Vec::new();
    let mut pending = vec![(cmd.get_name().to_string(), cmd.clone())];

    while let Some((name, page)) = pending.pop() {
        for subcmd in page.get_subcommands() {
            pending.push((
                format!("{name}-{}", subcmd.get_name()),
                subcmd.clone(),
            ));
        }

        // clap_mangen takes the page title from the command name, which only
        // accepts a `&'static str`. Generation runs once per process.
        let leaked: &'static str = Box::leak(name.clone().into_boxed_str());
        let page = page.name(leaked).disable_help_subcommand(true);

        let path = output_dir.join(format!("{name}.1"));
        render_page(&page, &path)?;
        log::debug!("generated {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// Render one man page to `path`, replacing any existing file.
fn render_page(cmd: &clap::Command, path: &Path) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    clap_mangen::Man::new(cmd.clone())
        .render(&mut file)
        .with_context(|| format!("failed to render {}", path.display()))
}
