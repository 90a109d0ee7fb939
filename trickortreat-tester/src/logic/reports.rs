use anyhow::Result;
use colored::Colorize;
use std::io::Write;

use super::tester::BatchReport;

pub fn generate_console_report<W: Write + ?Sized>(out: &mut W, report: &BatchReport) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Session Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "==========================".cyan())?;
    writeln!(out, "Generated: {}", report.generated_at)?;
    writeln!(out, "Policy: {}", report.policy)?;

    let total = report.seeds.len();
    writeln!(out, "Total seeds: {total}")?;
    writeln!(out, "Passed: {}", report.passed().to_string().green())?;
    writeln!(out, "Failed: {}", report.failed().to_string().red())?;
    if total > 0 {
        #[allow(clippy::cast_precision_loss)]
        let success_rate = (report.passed() as f64 / total as f64) * 100.0;
        writeln!(out, "Success rate: {success_rate:.1}%")?;
    }
    writeln!(out)?;

    for seed in &report.seeds {
        let status = if seed.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(
            out,
            "{} seed {} ({})",
            status,
            seed.start_ms.to_string().bold(),
            seed.fingerprint
        )?;
        writeln!(
            out,
            "   Turns: {}  Treats: {}  Tricks: {}  Ghosts caught: {}/{}",
            seed.turns_played,
            seed.treats,
            seed.tricks,
            seed.mini_games_won,
            seed.mini_games_played
        )?;
        if !seed.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &seed.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
    }
    Ok(())
}

pub fn generate_json_report<W: Write + ?Sized>(out: &mut W, report: &BatchReport) -> Result<()> {
    let json_output = serde_json::to_string_pretty(report)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report<W: Write + ?Sized>(
    out: &mut W,
    report: &BatchReport,
) -> Result<()> {
    writeln!(out, "# Trick or Treat Session Results\n")?;
    writeln!(out, "_Generated {} with `{}`_\n", report.generated_at, report.policy)?;

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total seeds**: {}", report.seeds.len())?;
    writeln!(out, "- **Passed**: {}", report.passed())?;
    writeln!(out, "- **Failed**: {}\n", report.failed())?;

    writeln!(out, "## Seeds\n")?;
    writeln!(out, "| Seed | Status | Turns | Treats | Tricks | Ghosts | Fingerprint |")?;
    writeln!(out, "|---|---|---|---|---|---|---|")?;
    for seed in &report.seeds {
        let status = if seed.passed { "✅" } else { "❌" };
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {}/{} | `{}` |",
            seed.start_ms,
            status,
            seed.turns_played,
            seed.treats,
            seed.tricks,
            seed.mini_games_won,
            seed.mini_games_played,
            seed.fingerprint
        )?;
    }

    let failing: Vec<_> = report.seeds.iter().filter(|s| !s.passed).collect();
    if !failing.is_empty() {
        writeln!(out, "\n## Failures\n")?;
        for seed in failing {
            writeln!(out, "### Seed {}\n", seed.start_ms)?;
            for failure in &seed.failures {
                writeln!(out, "- {failure}")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn generate_csv_report<W: Write + ?Sized>(out: &mut W, report: &BatchReport) -> Result<()> {
    writeln!(
        out,
        "start_ms,session_seed,passed,turns_played,treats,tricks,mini_games_played,mini_games_won,completed,fingerprint,failures"
    )?;
    for seed in &report.seeds {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},\"{}\"",
            seed.start_ms,
            seed.session_seed,
            seed.passed,
            seed.turns_played,
            seed.treats,
            seed.tricks,
            seed.mini_games_played,
            seed.mini_games_won,
            seed.completed,
            seed.fingerprint,
            seed.failures.join("; ").replace('"', "\"\"")
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::tester::SeedReport;
    use std::time::Duration;

    fn sample() -> BatchReport {
        let seed = |start_ms, failures: Vec<String>| SeedReport {
            start_ms,
            session_seed: 1_234,
            passed: failures.is_empty(),
            turns_played: 8,
            treats: 4,
            tricks: 2,
            mini_games_played: 1,
            mini_games_won: 1,
            completed: true,
            fingerprint: "00ff00ff00ff00ff".to_string(),
            failures,
            duration: Duration::from_millis(3),
        };
        BatchReport {
            generated_at: "2025-10-31T00:00:00Z".to_string(),
            policy: "door=random catch=random".to_string(),
            player: "Ánh".to_string(),
            seeds: vec![
                seed(1, Vec::new()),
                seed(2, vec!["turn 3 reused id \"x\"".to_string()]),
            ],
            total_duration: Duration::from_millis(6),
        }
    }

    #[test]
    fn csv_has_header_and_quoted_failures() {
        let mut buffer = Vec::new();
        generate_csv_report(&mut buffer, &sample()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("start_ms,session_seed"));
        assert!(lines[2].ends_with("\"turn 3 reused id \"\"x\"\"\""));
    }

    #[test]
    fn markdown_lists_failures_section() {
        let mut buffer = Vec::new();
        generate_markdown_report(&mut buffer, &sample()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("# Trick or Treat Session Results"));
        assert!(text.contains("- **Failed**: 1"));
        assert!(text.contains("### Seed 2"));
    }

    #[test]
    fn json_round_trips_through_serde_value() {
        let mut buffer = Vec::new();
        generate_json_report(&mut buffer, &sample()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["seeds"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["player"], "Ánh");
    }

    #[test]
    fn console_report_counts_passes() {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        generate_console_report(&mut buffer, &sample()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Passed: 1"));
        assert!(text.contains("Success rate: 50.0%"));
    }
}
