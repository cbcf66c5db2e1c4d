use cert_prune_lib::{Result, RunSummary};
use console::style;

pub fn print_summary(summary: &RunSummary) {
    println!("{} Prune completed", style("✓").green());
    println!("  Certs deleted:   {}", style(summary.certificates.deleted).cyan());
    println!("  CSRs  deleted:   {}", style(summary.csrs.deleted).cyan());
    println!("  Keys  deleted:   {}", style(summary.keys.deleted).cyan());

    if summary.unresolved_links > 0 {
        println!(
            "  Broken links:    {}",
            style(summary.unresolved_links).yellow()
        );
    }

    let errors = summary.certificates.errors + summary.csrs.errors + summary.keys.errors;
    if errors > 0 {
        println!("  Errors:          {}", style(errors).yellow());
    }
}

pub fn print_json(summary: &RunSummary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}
