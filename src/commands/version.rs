use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("mashup version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
