use anyhow::Result;
use colored::Colorize;
use override_guard::report::AnalysisReport;

pub fn print(report: &AnalysisReport, quiet: bool, no_color: bool) -> Result<()> {
    if no_color {
        colored::control::set_override(false);
    }

    if !quiet {
        println!();
        println!("{}", "  override-guard - Embedded Interface Override Check".bold());
        println!("  Units analyzed: {}", report.units_analyzed.len());
        println!();
    }

    for advisory in &report.advisories {
        println!("  {} {}", "advisory:".yellow(), advisory);
    }
    if !report.advisories.is_empty() {
        println!();
    }

    if report.diagnostics.is_empty() {
        if !quiet {
            println!("  {} No issues found.", "✓".green().bold());
            println!();
        }
        return Ok(());
    }

    for diag in &report.diagnostics {
        println!(
            "  {} {}",
            format!("{}:", diag.location).bold(),
            diag.message
        );
        println!(
            "    {} {} ({})",
            "-->".dimmed(),
            diag.unit,
            diag.check.dimmed()
        );
    }
    println!();

    if !quiet {
        println!("{}", "  Summary".bold().underline());
        for (check, count) in &report.diagnostics_by_check {
            println!("    {:<28} {}", check, count);
        }
        println!("    {:<28} {}", "Total", report.total_diagnostics);
        println!();
    }

    Ok(())
}
