use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use htmlwhitelist::{AllowList, PolicyFlags, SanitizePolicy, SanitizeReport, Sanitizer};
use tracing::debug;

mod logging;
mod policy_file;

use policy_file::PolicyFile;

#[derive(Parser, Debug)]
#[command(name = "htmlwhitelist", version)]
#[command(about = "Strip every HTML tag and attribute that is not on the allow-list")]
struct Cli {
    /// Markup to sanitize (defaults to --file, then stdin)
    input: Option<String>,

    /// Read markup from a file
    #[arg(short, long, conflicts_with = "input")]
    file: Option<PathBuf>,

    /// Allowed tags and attributes, e.g. 'a[href|title] b i br' (repeatable)
    #[arg(short, long = "allow", value_name = "SPEC")]
    allow: Vec<String>,

    /// JSON policy file; --allow entries replace its entries for the same tag
    #[arg(short, long, value_name = "FILE")]
    policy: Option<PathBuf>,

    /// Keep attribute values that start with `javascript:`
    #[arg(long)]
    allow_javascript_prefix: bool,

    /// Keep query strings in attribute values
    #[arg(long)]
    allow_querystring: bool,

    /// Print a summary of what was removed to stderr
    #[arg(long)]
    report: bool,

    /// Print the result and the report as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn build_policy(&self) -> Result<SanitizePolicy> {
        let mut policy = match &self.policy {
            Some(path) => SanitizePolicy::from(PolicyFile::load(path)?),
            None => SanitizePolicy::default(),
        };

        for spec in &self.allow {
            let list: AllowList = spec
                .parse()
                .with_context(|| format!("invalid --allow value {:?}", spec))?;
            policy.allow_list.extend(list.iter().map(|(tag, attributes)| (tag, attributes.iter())));
        }

        if self.allow_javascript_prefix {
            policy.flags |= PolicyFlags::ALLOW_JAVASCRIPT_PREFIX;
        }
        if self.allow_querystring {
            policy.flags |= PolicyFlags::ALLOW_QUERYSTRING;
        }
        Ok(policy)
    }

    fn read_input(&self) -> Result<String> {
        if let Some(input) = &self.input {
            return Ok(input.clone());
        }
        if let Some(path) = &self.file {
            return fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        Ok(input)
    }
}

fn print_report(report: &SanitizeReport) {
    let status = if report.is_clean() {
        "nothing removed".green().bold()
    } else {
        "content removed".yellow().bold()
    };
    eprintln!("{}: {}", status, report);
    if report.truncated {
        eprintln!(
            "{}",
            "input ended inside a tag or an unclosed disallowed element; the rest was dropped".red()
        );
    }
}

fn run(cli: &Cli) -> Result<()> {
    let policy = cli.build_policy()?;
    debug!(tags = policy.allow_list.len(), allow_list = %policy.allow_list, flags = ?policy.flags, "policy loaded");
    if policy.allow_list.is_empty() {
        eprintln!("{}", "warning: empty allow-list, every tag will be removed".yellow());
    }

    let input = cli.read_input()?;
    let result = Sanitizer::new(&policy).sanitize_with_report(&input);

    if cli.json {
        let json = serde_json::to_string_pretty(&result).context("failed to encode result")?;
        println!("{}", json);
    } else {
        print!("{}", result.html);
    }
    if cli.report {
        print_report(&result.report);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("{} {}", "error:".red().bold(), e);
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("htmlwhitelist").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_policy_from_allow_flags() {
        let policy = cli(&["--allow", "a[href] b", "--allow", "i", "--allow-querystring", "x"])
            .build_policy()
            .unwrap();
        assert_eq!(policy.allow_list.len(), 3);
        assert!(policy.allow_list.is_attribute_allowed("a", "href"));
        assert_eq!(policy.flags, PolicyFlags::ALLOW_QUERYSTRING);
    }

    #[test]
    fn test_allow_overrides_policy_file_entry() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"tags": {"a": ["href", "title"], "p": []}, "allow_javascript_prefix": true}"#)
            .unwrap();
        let path = file.path().to_str().unwrap();

        let policy = cli(&["--policy", path, "--allow", "a[title]", "x"])
            .build_policy()
            .unwrap();
        assert!(policy.allow_list.is_attribute_allowed("a", "title"));
        assert!(!policy.allow_list.is_attribute_allowed("a", "href"));
        assert!(policy.allow_list.is_tag_allowed("p"));
        assert_eq!(policy.flags, PolicyFlags::ALLOW_JAVASCRIPT_PREFIX);
    }

    #[test]
    fn test_invalid_allow_spec() {
        let err = cli(&["--allow", "a[href", "x"]).build_policy().unwrap_err();
        assert!(format!("{:#}", err).contains("never closed"));
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<b>x</b>").unwrap();
        let args = cli(&["--file", file.path().to_str().unwrap()]);
        assert_eq!(args.read_input().unwrap(), "<b>x</b>");
    }

    #[test]
    fn test_input_and_file_conflict() {
        let parsed = Cli::try_parse_from(["htmlwhitelist", "--file", "a.html", "<b>"]);
        assert!(parsed.is_err());
    }
}
