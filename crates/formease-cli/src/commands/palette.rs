use colored::Colorize;
use formease::registry;

pub fn execute() {
    println!("{}", "Components".green().bold());
    println!();

    for entry in registry::palette() {
        let properties: Vec<&str> = registry::editable_properties(&entry.field_type)
            .iter()
            .map(|p| p.label())
            .collect();

        println!(
            "  {:<12} {:<12} {}",
            entry.field_type.tag().cyan(),
            entry.label,
            format!("[{}]", entry.icon).dimmed()
        );
        if properties.is_empty() {
            println!("  {:<12} {}", "", "no editable properties".dimmed());
        } else {
            println!("  {:<12} {}", "", properties.join(", ").dimmed());
        }
    }
}
