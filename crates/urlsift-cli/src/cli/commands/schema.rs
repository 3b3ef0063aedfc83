//! `urlsift schema` – print the published feature schema.

use anyhow::Result;
use urlsift_core::schema::SchemaDescriptor;

pub fn run_schema(json: bool) -> Result<()> {
    let schema = SchemaDescriptor::current();
    if json {
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }
    println!("version:     {}", schema.version);
    println!("fingerprint: {}", schema.fingerprint);
    for (i, column) in schema.columns.iter().enumerate() {
        println!("{:>2}  {}", i, column);
    }
    Ok(())
}
