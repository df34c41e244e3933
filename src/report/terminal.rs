use comfy_table::{Cell, Table};

use super::Report;

pub fn render(report: &Report) -> anyhow::Result<String> {
    let mut output = String::new();

    output.push_str(&format!(
        "=== User Field Privacy Report ({}) ===\n\n",
        report.generated_at
    ));

    // Summary
    output.push_str("--- Summary ---\n");
    output.push_str(&format!(
        "Users:                {}\n",
        report.summary.total_users
    ));
    output.push_str(&format!(
        "Privacy flags:        {}\n",
        report.summary.total_flags
    ));
    output.push_str(&format!(
        "  Private:            {}\n",
        report.summary.private_flags
    ));
    output.push_str(&format!(
        "  Public:             {}\n",
        report.summary.public_flags
    ));
    output.push_str(&format!(
        "Users with private fields: {}\n",
        report.summary.users_with_private_fields
    ));

    if !report.flags.is_empty() {
        output.push_str("\n--- Field Privacy ---\n");
        output.push_str(&flag_table(report).to_string());
        output.push('\n');
    }

    Ok(output)
}

fn flag_table(report: &Report) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["UID", "Mail", "Field", "Visibility"]);
    for f in &report.flags {
        table.add_row(vec![
            Cell::new(f.uid),
            Cell::new(&f.mail),
            Cell::new(f.fid),
            Cell::new(if f.private { "private" } else { "public" }),
        ]);
    }
    table
}
