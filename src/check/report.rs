//! Rendering of check results

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use crate::check::runner::CheckSummary;
use crate::version::checker::RotVerdict;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One sentence per package
    #[default]
    Text,
    /// A single JSON document
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    rotten: bool,
    rotten_count: usize,
    packages: &'a [RotVerdict],
}

/// Write the summary to `out` in the requested format
pub fn write_report<W: Write>(
    out: &mut W,
    summary: &CheckSummary,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            for verdict in &summary.verdicts {
                writeln!(out, "{}", verdict.message)?;
            }
            if summary.has_rotten() {
                writeln!(out, "Your requirements are a bit rotten!")?;
            } else if !summary.verdicts.is_empty() {
                writeln!(out, "Looks like you've been keeping up to date, time for a delicious beverage!")?;
            }
        }
        OutputFormat::Json => {
            let report = JsonReport {
                rotten: summary.has_rotten(),
                rotten_count: summary.rotten_count(),
                packages: &summary.verdicts,
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::checker::RotMessage;

    fn summary() -> CheckSummary {
        CheckSummary {
            verdicts: vec![
                RotVerdict {
                    package: "requests".to_string(),
                    rotten: false,
                    message: RotMessage::UpToDate {
                        package: "requests".to_string(),
                        version: "2.31.0".to_string(),
                    },
                },
                RotVerdict {
                    package: "six".to_string(),
                    rotten: true,
                    message: RotMessage::RottenDirectSuccessor {
                        package: "six".to_string(),
                        current_version: "1.15.0".to_string(),
                        rotten_days: 30,
                        latest_version: "1.16.0".to_string(),
                    },
                },
            ],
        }
    }

    #[test]
    fn text_report_lists_each_package() {
        let mut out = Vec::new();

        write_report(&mut out, &summary(), OutputFormat::Text).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "requests (2.31.0) is up to date\n\
             six (1.15.0) is 30 days out of date. Latest version is: 1.16.0\n\
             Your requirements are a bit rotten!\n"
        );
    }

    #[test]
    fn text_report_for_empty_summary_is_empty() {
        let mut out = Vec::new();

        write_report(&mut out, &CheckSummary { verdicts: vec![] }, OutputFormat::Text).unwrap();

        assert!(out.is_empty());
    }

    #[test]
    fn json_report_contains_aggregate_and_verdicts() {
        let mut out = Vec::new();

        write_report(&mut out, &summary(), OutputFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["rotten"], true);
        assert_eq!(value["rotten_count"], 1);
        assert_eq!(value["packages"][1]["package"], "six");
        assert_eq!(
            value["packages"][1]["message"]["kind"],
            "rotten_direct_successor"
        );
        assert_eq!(value["packages"][1]["message"]["rotten_days"], 30);
    }
}
