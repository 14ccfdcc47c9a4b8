use anyhow::Result;
use formease::FormDocument;

pub fn execute() -> Result<()> {
    let sample = FormDocument::sample();
    println!("{}", formease::schema::to_pretty_json(&sample.components)?);
    Ok(())
}
