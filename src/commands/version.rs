use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("procintel version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
